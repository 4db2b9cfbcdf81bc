//! Road graph: an arena of cities and road segments.
//!
//! # Data layout
//!
//! Cities live in a `Vec<City>` indexed by [`CityId`]; they are never removed,
//! so a `CityId` stays valid for the lifetime of the graph.  Segments live in
//! a `Vec<Option<RoadSegment>>` indexed by [`SegmentId`]; removal empties the
//! slot and pushes its id onto a free list for reuse by the next insertion.
//!
//! Each city keeps the ids of its incident segments in an unordered
//! `Vec<SegmentId>`.  A segment appears in exactly two such lists (its
//! endpoints are always distinct) and at most one segment joins any pair of
//! cities.
//!
//! # Allocation failure
//!
//! Mutations reserve every buffer they will grow (`try_reserve`) before
//! touching the graph, so an allocation failure is reported as
//! [`MapError::OutOfMemory`] with the graph unchanged.

use log::debug;

use nr_core::{CityId, MapError, MapResult, SegmentId, validate_city_name};

use crate::NameTable;

// ── City / RoadSegment ────────────────────────────────────────────────────────

/// A named vertex of the road graph.
#[derive(Debug)]
pub struct City {
    name:  Box<str>,
    roads: Vec<SegmentId>,
}

impl City {
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Ids of the segments incident to this city, in no particular order.
    #[inline]
    pub fn roads(&self) -> &[SegmentId] {
        &self.roads
    }
}

/// An undirected, dated road between two distinct cities.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RoadSegment {
    pub city_a: CityId,
    pub city_b: CityId,
    /// Length in km.  Always positive.
    pub length: u32,
    /// Year of construction or of the latest repair.  Never zero.
    pub year:   i32,
}

impl RoadSegment {
    /// The endpoint opposite `city`.  `city` must be one of the endpoints.
    #[inline]
    pub fn other(&self, city: CityId) -> CityId {
        if self.city_a == city { self.city_b } else { self.city_a }
    }

    /// `true` if the segment joins `a` and `b` (in either order).
    #[inline]
    pub fn joins(&self, a: CityId, b: CityId) -> bool {
        (self.city_a == a && self.city_b == b) || (self.city_a == b && self.city_b == a)
    }
}

/// A city whose allocations are done but which is not yet in the arena.
struct NewCity {
    name:  Box<str>,
    key:   Box<str>,
    roads: Vec<SegmentId>,
}

/// Endpoint of a road being added: either already in the graph or pending.
enum Endpoint {
    Existing(CityId),
    New(NewCity),
}

// ── RoadGraph ─────────────────────────────────────────────────────────────────

/// Owns every city and road segment of the map.
#[derive(Default)]
pub struct RoadGraph {
    cities:        Vec<City>,
    segments:      Vec<Option<RoadSegment>>,
    /// Vacant segment slots.  Capacity is kept `>= segments.len()` so that
    /// [`remove_segment`](Self::remove_segment) never allocates.
    free_segments: Vec<SegmentId>,
    live_segments: usize,
    names:         NameTable,
}

impl RoadGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-size the arenas for the expected number of cities and segments.
    pub fn with_capacity(cities: usize, segments: usize) -> Self {
        Self {
            cities:        Vec::with_capacity(cities),
            segments:      Vec::with_capacity(segments),
            free_segments: Vec::with_capacity(segments),
            live_segments: 0,
            names:         NameTable::with_capacity(cities),
        }
    }

    // ── Dimensions ────────────────────────────────────────────────────────

    pub fn city_count(&self) -> usize {
        self.cities.len()
    }

    /// Number of live (not removed) segments.
    pub fn segment_count(&self) -> usize {
        self.live_segments
    }

    pub fn is_empty(&self) -> bool {
        self.cities.is_empty()
    }

    // ── Lookup ────────────────────────────────────────────────────────────

    #[inline]
    pub fn city_id(&self, name: &str) -> Option<CityId> {
        self.names.lookup(name)
    }

    #[inline]
    pub fn city(&self, city: CityId) -> &City {
        &self.cities[city.index()]
    }

    #[inline]
    pub fn city_name(&self, city: CityId) -> &str {
        &self.cities[city.index()].name
    }

    /// All cities in creation order.
    pub fn cities(&self) -> impl Iterator<Item = (CityId, &City)> + '_ {
        self.cities
            .iter()
            .enumerate()
            .map(|(i, c)| (CityId(i as u32), c))
    }

    /// The segment stored under `id`, or `None` if it has been removed.
    #[inline]
    pub fn segment(&self, id: SegmentId) -> Option<&RoadSegment> {
        self.segments.get(id.index()).and_then(Option::as_ref)
    }

    /// Segments incident to `city`.
    pub fn segments_of(&self, city: CityId) -> impl Iterator<Item = (SegmentId, &RoadSegment)> + '_ {
        self.cities[city.index()]
            .roads
            .iter()
            .filter_map(move |&id| self.segment(id).map(|s| (id, s)))
    }

    /// The segment joining `a` and `b`, if any.  Symmetric in its arguments.
    ///
    /// Scans the adjacency list of whichever endpoint has fewer roads.
    pub fn find_segment(&self, a: CityId, b: CityId) -> Option<SegmentId> {
        if a == b {
            return None;
        }
        let (scan, target) = if self.city(a).roads.len() <= self.city(b).roads.len() {
            (a, b)
        } else {
            (b, a)
        };
        self.segments_of(scan)
            .find(|(_, s)| s.other(scan) == target)
            .map(|(id, _)| id)
    }

    /// Resolve the segment between two named cities.
    ///
    /// # Errors
    ///
    /// `InvalidName` for a malformed name, `NoSuchCity` if either city is
    /// unknown, `NoSuchSegment` if they are not directly connected.
    pub fn segment_between(&self, name1: &str, name2: &str) -> MapResult<SegmentId> {
        validate_city_name(name1)?;
        validate_city_name(name2)?;
        let a = self.city_id(name1).ok_or_else(|| MapError::NoSuchCity(name1.to_owned()))?;
        let b = self.city_id(name2).ok_or_else(|| MapError::NoSuchCity(name2.to_owned()))?;
        self.find_segment(a, b)
            .ok_or_else(|| MapError::NoSuchSegment(name1.to_owned(), name2.to_owned()))
    }

    // ── City creation ─────────────────────────────────────────────────────

    /// Look `name` up, creating the city if it does not exist yet.
    pub fn find_or_create_city(&mut self, name: &str) -> MapResult<CityId> {
        if let Some(id) = self.city_id(name) {
            return Ok(id);
        }
        validate_city_name(name)?;
        let city = prepare_city(name)?;
        self.reserve_cities(1)?;
        self.commit_city(city)
    }

    fn reserve_cities(&mut self, additional: usize) -> MapResult<()> {
        if self.cities.len() + additional > CityId::INVALID.index() {
            return Err(MapError::OutOfMemory);
        }
        self.cities.try_reserve(additional)?;
        self.names.reserve(additional)?;
        Ok(())
    }

    fn commit_city(&mut self, city: NewCity) -> MapResult<CityId> {
        let id = CityId::try_from(self.cities.len()).map_err(|_| MapError::OutOfMemory)?;
        self.names.insert(city.key, id)?;
        self.cities.push(City { name: city.name, roads: city.roads });
        debug!("city {:?} created as {id}", self.city_name(id));
        Ok(id)
    }

    fn resolve_endpoint(&self, name: &str) -> MapResult<Endpoint> {
        match self.city_id(name) {
            Some(id) => Ok(Endpoint::Existing(id)),
            None => Ok(Endpoint::New(prepare_city(name)?)),
        }
    }

    fn commit_endpoint(&mut self, endpoint: Endpoint) -> MapResult<CityId> {
        match endpoint {
            Endpoint::Existing(id) => Ok(id),
            Endpoint::New(city) => self.commit_city(city),
        }
    }

    // ── Segment mutation ──────────────────────────────────────────────────

    /// Add a road between two distinct named cities, creating either city if
    /// it does not exist yet.
    ///
    /// # Errors
    ///
    /// `InvalidName`, `InvalidArgument` (identical names, zero length, zero
    /// year), `DuplicateSegment`, or `OutOfMemory`.  On error nothing is
    /// created.
    pub fn add_road(&mut self, name1: &str, name2: &str, length: u32, year: i32) -> MapResult<SegmentId> {
        validate_city_name(name1)?;
        validate_city_name(name2)?;
        if name1 == name2 {
            return Err(MapError::InvalidArgument("road endpoints must be distinct cities"));
        }
        check_length_and_year(length, year)?;

        let a = self.resolve_endpoint(name1)?;
        let b = self.resolve_endpoint(name2)?;
        if let (Endpoint::Existing(a), Endpoint::Existing(b)) = (&a, &b) {
            if self.find_segment(*a, *b).is_some() {
                return Err(MapError::DuplicateSegment(name1.to_owned(), name2.to_owned()));
            }
        }

        // Reserve everything before the first mutation.
        let new_cities = [&a, &b].iter().filter(|e| matches!(e, Endpoint::New(_))).count();
        self.reserve_cities(new_cities)?;
        self.reserve_segment_slot()?;
        for endpoint in [&a, &b] {
            if let Endpoint::Existing(id) = endpoint {
                self.cities[id.index()].roads.try_reserve(1)?;
            }
        }

        let a = self.commit_endpoint(a)?;
        let b = self.commit_endpoint(b)?;
        let id = self.link(a, b, length, year);
        debug!("road {name1:?} - {name2:?} added as {id} (length {length}, year {year})");
        Ok(id)
    }

    /// Add a road between two existing, distinct cities.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` (same city, zero length, zero year),
    /// `DuplicateSegment`, or `OutOfMemory`.
    pub fn connect(&mut self, a: CityId, b: CityId, length: u32, year: i32) -> MapResult<SegmentId> {
        if a == b {
            return Err(MapError::InvalidArgument("road endpoints must be distinct cities"));
        }
        check_length_and_year(length, year)?;
        if self.find_segment(a, b).is_some() {
            return Err(MapError::DuplicateSegment(
                self.city_name(a).to_owned(),
                self.city_name(b).to_owned(),
            ));
        }
        self.reserve_segment_slot()?;
        self.cities[a.index()].roads.try_reserve(1)?;
        self.cities[b.index()].roads.try_reserve(1)?;
        let id = self.link(a, b, length, year);
        debug!(
            "road {:?} - {:?} added as {id} (length {length}, year {year})",
            self.city_name(a),
            self.city_name(b),
        );
        Ok(id)
    }

    /// Set the repair year of the road between two named cities.
    ///
    /// # Errors
    ///
    /// `InvalidName`, `InvalidArgument` (zero year, year earlier than the
    /// recorded one), `NoSuchCity`, or `NoSuchSegment`.
    pub fn repair_road(&mut self, name1: &str, name2: &str, year: i32) -> MapResult<()> {
        validate_city_name(name1)?;
        validate_city_name(name2)?;
        if year == 0 {
            return Err(MapError::InvalidArgument("year must be non-zero"));
        }
        let id = self.segment_between(name1, name2)?;
        self.repair_segment(id, year)
    }

    /// Set the repair year of segment `id`.  A year equal to the recorded one
    /// is accepted; an earlier one is rejected.
    pub fn repair_segment(&mut self, id: SegmentId, year: i32) -> MapResult<()> {
        if year == 0 {
            return Err(MapError::InvalidArgument("year must be non-zero"));
        }
        let segment = self
            .segments
            .get_mut(id.index())
            .and_then(Option::as_mut)
            .ok_or(MapError::InvalidArgument("segment has been removed"))?;
        if year < segment.year {
            return Err(MapError::InvalidArgument("repair year precedes the recorded year"));
        }
        segment.year = year;
        debug!("{id} repaired in {year}");
        Ok(())
    }

    /// Unlink segment `id` from both endpoints and free its slot.
    ///
    /// Returns the removed segment, or `None` if `id` was not live.  Never
    /// allocates.
    pub fn remove_segment(&mut self, id: SegmentId) -> Option<RoadSegment> {
        let segment = self.segments.get_mut(id.index())?.take()?;
        for city in [segment.city_a, segment.city_b] {
            let roads = &mut self.cities[city.index()].roads;
            if let Some(pos) = roads.iter().position(|&r| r == id) {
                roads.swap_remove(pos);
            }
        }
        self.free_segments.push(id);
        self.live_segments -= 1;
        debug!(
            "road {:?} - {:?} ({id}) removed",
            self.city_name(segment.city_a),
            self.city_name(segment.city_b),
        );
        Some(segment)
    }

    /// Make sure [`link`](Self::link) has a slot to write into and that the
    /// free list can later absorb every slot without growing.
    fn reserve_segment_slot(&mut self) -> MapResult<()> {
        if self.free_segments.is_empty() {
            if self.segments.len() >= SegmentId::INVALID.index() {
                return Err(MapError::OutOfMemory);
            }
            self.segments.try_reserve(1)?;
            let slots = self.segments.len() + 1;
            self.free_segments.try_reserve(slots - self.free_segments.len())?;
        }
        Ok(())
    }

    /// Store a new segment and append it to both adjacency lists.  All
    /// buffers must have been reserved.
    fn link(&mut self, a: CityId, b: CityId, length: u32, year: i32) -> SegmentId {
        let segment = RoadSegment { city_a: a, city_b: b, length, year };
        let id = match self.free_segments.pop() {
            Some(id) => {
                self.segments[id.index()] = Some(segment);
                id
            }
            None => {
                let id = SegmentId(self.segments.len() as u32);
                self.segments.push(Some(segment));
                id
            }
        };
        self.cities[a.index()].roads.push(id);
        self.cities[b.index()].roads.push(id);
        self.live_segments += 1;
        id
    }
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn prepare_city(name: &str) -> MapResult<NewCity> {
    let mut roads = Vec::new();
    roads.try_reserve(1)?;
    Ok(NewCity { name: name.into(), key: name.into(), roads })
}

fn check_length_and_year(length: u32, year: i32) -> MapResult<()> {
    if length == 0 {
        return Err(MapError::InvalidArgument("length must be positive"));
    }
    if year == 0 {
        return Err(MapError::InvalidArgument("year must be non-zero"));
    }
    Ok(())
}
