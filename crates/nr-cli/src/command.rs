//! Parsing of single command lines.

use thiserror::Error;

use nr_core::RouteId;
use nr_routes::Leg;

const FIELD_SEPARATOR: char = ';';

/// One parsed command line.  City names are borrowed from the line and are
/// validated later by the map itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command<'a> {
    AddRoad { city1: &'a str, city2: &'a str, length: u32, year: i32 },
    RepairRoad { city1: &'a str, city2: &'a str, year: i32 },
    GetRouteDescription { id: RouteId },
    NewRoute { id: RouteId, city1: &'a str, city2: &'a str },
    ExtendRoute { id: RouteId, city: &'a str },
    RemoveRoad { city1: &'a str, city2: &'a str },
    RemoveRoute { id: RouteId },
    /// `id;start;length;year;city;...`
    DeclareRoute { id: RouteId, start: &'a str, legs: Vec<Leg> },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("`{command}` takes {expected} fields, got {found}")]
    Arity { command: &'static str, expected: usize, found: usize },

    #[error("bad {what}: {value:?}")]
    BadNumber { what: &'static str, value: String },

    #[error("route declaration needs `id;city` followed by `length;year;city` groups ({found} fields)")]
    Declaration { found: usize },
}

/// Parse one line (without its line terminator).
///
/// Returns `Ok(None)` for blank lines and `#` comments.
pub fn parse_line(line: &str) -> Result<Option<Command<'_>>, ParseError> {
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let fields: Vec<&str> = line.split(FIELD_SEPARATOR).collect();
    let command = match fields[0] {
        "addRoad" => {
            arity("addRoad", &fields, 5)?;
            Command::AddRoad {
                city1:  fields[1],
                city2:  fields[2],
                length: length(fields[3])?,
                year:   year(fields[4])?,
            }
        }
        "repairRoad" => {
            arity("repairRoad", &fields, 4)?;
            Command::RepairRoad { city1: fields[1], city2: fields[2], year: year(fields[3])? }
        }
        "getRouteDescription" => {
            arity("getRouteDescription", &fields, 2)?;
            Command::GetRouteDescription { id: route_id(fields[1])? }
        }
        "newRoute" => {
            arity("newRoute", &fields, 4)?;
            Command::NewRoute { id: route_id(fields[1])?, city1: fields[2], city2: fields[3] }
        }
        "extendRoute" => {
            arity("extendRoute", &fields, 3)?;
            Command::ExtendRoute { id: route_id(fields[1])?, city: fields[2] }
        }
        "removeRoad" => {
            arity("removeRoad", &fields, 3)?;
            Command::RemoveRoad { city1: fields[1], city2: fields[2] }
        }
        "removeRoute" => {
            arity("removeRoute", &fields, 2)?;
            Command::RemoveRoute { id: route_id(fields[1])? }
        }
        _ => declaration(&fields)?,
    };
    Ok(Some(command))
}

fn declaration<'a>(fields: &[&'a str]) -> Result<Command<'a>, ParseError> {
    if fields.len() < 5 || (fields.len() - 2) % 3 != 0 {
        return Err(ParseError::Declaration { found: fields.len() });
    }
    let id = route_id(fields[0])?;
    let legs = fields[2..]
        .chunks_exact(3)
        .map(|leg| -> Result<Leg, ParseError> { Ok(Leg::new(length(leg[0])?, year(leg[1])?, leg[2])) })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Command::DeclareRoute { id, start: fields[1], legs })
}

fn arity(command: &'static str, fields: &[&str], expected: usize) -> Result<(), ParseError> {
    if fields.len() == expected {
        Ok(())
    } else {
        Err(ParseError::Arity { command, expected, found: fields.len() })
    }
}

fn bad(what: &'static str, value: &str) -> ParseError {
    ParseError::BadNumber { what, value: value.to_owned() }
}

/// Positive road length.
fn length(field: &str) -> Result<u32, ParseError> {
    match field.parse::<u32>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(bad("length", field)),
    }
}

/// Non-zero year; negative years are allowed.
fn year(field: &str) -> Result<i32, ParseError> {
    match field.parse::<i32>() {
        Ok(n) if n != 0 => Ok(n),
        _ => Err(bad("year", field)),
    }
}

/// Route number.  Its range is checked by the map.
fn route_id(field: &str) -> Result<RouteId, ParseError> {
    field.parse::<u32>().map(RouteId).map_err(|_| bad("route id", field))
}
