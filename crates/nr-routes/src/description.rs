//! Structured route descriptions and their text form.

use std::fmt;

use nr_core::RouteId;

/// One step of a route: the road taken and the city it leads to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Leg {
    pub length: u32,
    pub year:   i32,
    pub city:   String,
}

impl Leg {
    pub fn new(length: u32, year: i32, city: impl Into<String>) -> Self {
        Self { length, year, city: city.into() }
    }
}

/// A route as seen from outside: its number, first city, and legs.
///
/// `Display` renders the semicolon-separated form
/// `id;city;length;year;city;...;city` with no trailing separator.  City
/// names never contain `;`, so the text is unambiguous.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteDescription {
    pub id:    RouteId,
    pub start: String,
    pub legs:  Vec<Leg>,
}

impl RouteDescription {
    /// City names from start to end.
    pub fn cities(&self) -> impl Iterator<Item = &str> + '_ {
        std::iter::once(self.start.as_str()).chain(self.legs.iter().map(|l| l.city.as_str()))
    }

    /// Sum of leg lengths.
    pub fn total_length(&self) -> u64 {
        self.legs.iter().map(|l| u64::from(l.length)).sum()
    }
}

impl fmt::Display for RouteDescription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{};{}", self.id, self.start)?;
        for leg in &self.legs {
            write!(f, ";{};{};{}", leg.length, leg.year, leg.city)?;
        }
        Ok(())
    }
}
