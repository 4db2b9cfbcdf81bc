//! The `RouteTable` — every live national route plus the operations that
//! create, extend, remove, and repair them.
//!
//! # Atomicity
//!
//! Each operation validates and computes everything it needs (paths,
//! spliced paths, reserved buffers) before its first mutation.  A call that
//! returns `Err` leaves both the table and the road graph as they were.
//!
//! # Road removal
//!
//! [`RouteTable::remove_road`] is the one operation that touches several
//! routes at once:
//!
//! 1. resolve the segment;
//! 2. for every route that drives along it, search a bridge between the
//!    segment's endpoints with that segment forbidden and the route's other
//!    cities excluded;
//! 3. if any search fails, stop; nothing has changed;
//! 4. otherwise splice every bridge into its route and delete the segment.

use std::collections::BTreeMap;

use log::debug;

use nr_core::{CityId, MapConfig, MapError, MapResult, RouteId, SegmentId, validate_city_name};
use nr_graph::{Avoid, PathFinder, RoadGraph};

use crate::{Leg, Route, RouteDescription};

/// Sparse map from route number to [`Route`].
///
/// Route numbers are checked against [`MapConfig::max_route_id`] at every
/// entry point.
pub struct RouteTable {
    routes: BTreeMap<RouteId, Route>,
    config: MapConfig,
}

/// A planned splice: replace `path[at..=at + 1]` of route `id` with `bridge`.
struct Splice {
    id:     RouteId,
    at:     usize,
    bridge: Vec<CityId>,
}

impl RouteTable {
    pub fn new(config: MapConfig) -> Self {
        Self { routes: BTreeMap::new(), config }
    }

    pub fn config(&self) -> &MapConfig {
        &self.config
    }

    // ── Read access ───────────────────────────────────────────────────────

    pub fn get(&self, id: RouteId) -> Option<&Route> {
        self.routes.get(&id)
    }

    pub fn contains(&self, id: RouteId) -> bool {
        self.routes.contains_key(&id)
    }

    /// Live route numbers in ascending order.
    pub fn ids(&self) -> impl Iterator<Item = RouteId> + '_ {
        self.routes.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Route> + '_ {
        self.routes.values()
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    fn route_mut(&mut self, id: RouteId) -> MapResult<&mut Route> {
        self.routes.get_mut(&id).ok_or(MapError::NoSuchRoute(id))
    }

    fn existing(&self, id: RouteId) -> MapResult<&Route> {
        self.config.check_route_id(id)?;
        self.routes.get(&id).ok_or(MapError::NoSuchRoute(id))
    }

    fn check_free(&self, id: RouteId) -> MapResult<()> {
        self.config.check_route_id(id)?;
        if self.routes.contains_key(&id) {
            return Err(MapError::DuplicateRouteId(id));
        }
        Ok(())
    }

    // ── Automatic routes ──────────────────────────────────────────────────

    /// Create route `id` along the unique best path from `start` to `finish`.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` (id out of range, `start == finish`),
    /// `DuplicateRouteId`, `InvalidName`, `NoSuchCity`, `NoUniquePath`, or
    /// `OutOfMemory`.
    pub fn new_route<P: PathFinder>(
        &mut self,
        graph:  &RoadGraph,
        finder: &P,
        id:     RouteId,
        start:  &str,
        finish: &str,
    ) -> MapResult<()> {
        self.check_free(id)?;
        let from = existing_city(graph, start)?;
        let to = existing_city(graph, finish)?;
        if from == to {
            return Err(MapError::InvalidArgument("route must join two different cities"));
        }

        let path = finder.find_path(graph, from, to, Avoid::NOTHING)?;
        debug!(
            "route {id} created {start:?} -> {finish:?} ({} cities, length {})",
            path.cities.len(),
            path.length,
        );
        self.routes.insert(id, Route::new(id, path.cities));
        Ok(())
    }

    /// Extend route `id` from its last city to `city` along the unique best
    /// path that does not revisit the route.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` (id out of range), `NoSuchRoute`, `InvalidName`,
    /// `NoSuchCity`, `SelfIntersectingRoute` (target already on the route),
    /// `NoUniquePath`, or `OutOfMemory`.
    pub fn extend_route<P: PathFinder>(
        &mut self,
        graph:  &RoadGraph,
        finder: &P,
        id:     RouteId,
        city:   &str,
    ) -> MapResult<()> {
        let route = self.existing(id)?;
        let target = existing_city(graph, city)?;
        if route.contains(target) {
            return Err(MapError::SelfIntersectingRoute(id, city.to_owned()));
        }

        let extension = finder.find_path(graph, route.last(), target, Avoid::cities(route.path()))?;

        let path = self.route_mut(id)?.path_mut();
        path.try_reserve(extension.cities.len() - 1)?;
        path.extend_from_slice(&extension.cities[1..]);
        debug!("route {id} extended to {city:?} (+{} cities)", extension.cities.len() - 1);
        Ok(())
    }

    /// Drop route `id`.  Cities and roads are untouched.
    pub fn remove_route(&mut self, id: RouteId) -> MapResult<Route> {
        self.config.check_route_id(id)?;
        let route = self.routes.remove(&id).ok_or(MapError::NoSuchRoute(id))?;
        debug!("route {id} removed");
        Ok(route)
    }

    // ── Declared routes ───────────────────────────────────────────────────

    /// Start a user-declared route at `start`, creating the city if needed.
    ///
    /// Returns the route number, used as the handle for subsequent
    /// [`extend_custom_route`](Self::extend_custom_route) calls.
    pub fn new_custom_route(&mut self, graph: &mut RoadGraph, id: RouteId, start: &str) -> MapResult<RouteId> {
        self.check_free(id)?;
        let city = graph.find_or_create_city(start)?;
        self.routes.insert(id, Route::new(id, vec![city]));
        debug!("route {id} declared at {start:?}");
        Ok(id)
    }

    /// Append `destination` to a declared route over a road of the given
    /// `length` and `year`.
    ///
    /// If the road already exists its length must match and its recorded
    /// year must not be newer than `year`; a newer `year` repairs it.
    /// Otherwise the road (and, if needed, the destination city) is created.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` (id out of range, zero length or year, conflicting
    /// existing road), `NoSuchRoute`, `InvalidName`, `SelfIntersectingRoute`,
    /// or `OutOfMemory`.
    pub fn extend_custom_route(
        &mut self,
        graph:       &mut RoadGraph,
        id:          RouteId,
        length:      u32,
        year:        i32,
        destination: &str,
    ) -> MapResult<()> {
        let route = self.existing(id)?;
        check_leg(length, year, destination)?;
        let last = route.last();

        let existing = match graph.city_id(destination) {
            Some(city) if route.contains(city) => {
                return Err(MapError::SelfIntersectingRoute(id, destination.to_owned()));
            }
            Some(city) => graph.find_segment(last, city),
            None => None,
        };
        if let Some(segment) = existing {
            check_existing_road(graph, segment, length, year)?;
        }

        self.route_mut(id)?.path_mut().try_reserve(1)?;

        let city = match existing {
            Some(segment) => {
                if graph.segment(segment).is_some_and(|s| s.year < year) {
                    graph.repair_segment(segment, year)?;
                }
                graph.find_or_create_city(destination)?
            }
            None => {
                let from = graph.city_name(last).to_owned();
                graph.add_road(&from, destination, length, year)?;
                graph.find_or_create_city(destination)?
            }
        };

        self.route_mut(id)?.path_mut().push(city);
        debug!("route {id} extended to {destination:?} (length {length}, year {year})");
        Ok(())
    }

    /// Declare a whole route in one call: `start`, then each leg in order.
    ///
    /// The declaration is checked in full (range and uniqueness of `id`,
    /// names, lengths, years, no repeated city, compatibility with roads
    /// that already exist) before anything is created, so a rejected
    /// declaration leaves the map unchanged.
    pub fn declare_route(
        &mut self,
        graph: &mut RoadGraph,
        id:    RouteId,
        start: &str,
        legs:  &[Leg],
    ) -> MapResult<()> {
        self.check_free(id)?;
        validate_city_name(start)?;
        if legs.is_empty() {
            return Err(MapError::InvalidArgument("a declared route needs at least one road"));
        }

        let mut previous = start;
        for (i, leg) in legs.iter().enumerate() {
            check_leg(leg.length, leg.year, &leg.city)?;
            if leg.city == start || legs[..i].iter().any(|l| l.city == leg.city) {
                return Err(MapError::SelfIntersectingRoute(id, leg.city.clone()));
            }
            if let (Some(a), Some(b)) = (graph.city_id(previous), graph.city_id(&leg.city)) {
                if let Some(segment) = graph.find_segment(a, b) {
                    check_existing_road(graph, segment, leg.length, leg.year)?;
                }
            }
            previous = leg.city.as_str();
        }

        self.new_custom_route(graph, id, start)?;
        for leg in legs {
            if let Err(e) = self.extend_custom_route(graph, id, leg.length, leg.year, &leg.city) {
                // Only allocation failure gets here; withdraw the route.
                self.routes.remove(&id);
                return Err(e);
            }
        }
        Ok(())
    }

    // ── Road removal ──────────────────────────────────────────────────────

    /// Remove the road between two named cities, rerouting every route that
    /// uses it.  All-or-nothing across all affected routes.
    ///
    /// # Errors
    ///
    /// `InvalidName`, `NoSuchCity`, `NoSuchSegment`, `NoUniquePath` (some
    /// affected route cannot be repaired), or `OutOfMemory`.
    pub fn remove_road<P: PathFinder>(
        &mut self,
        graph:  &mut RoadGraph,
        finder: &P,
        name1:  &str,
        name2:  &str,
    ) -> MapResult<()> {
        let segment_id = graph.segment_between(name1, name2)?;
        let segment = *graph
            .segment(segment_id)
            .ok_or_else(|| MapError::NoSuchSegment(name1.to_owned(), name2.to_owned()))?;

        // ① Plan: one bridge per route that drives along the segment.
        let mut splices: Vec<Splice> = Vec::new();
        for route in self.routes.values() {
            let Some((lo, hi)) = route.traversal(segment.city_a, segment.city_b) else {
                continue;
            };
            let avoid = Avoid::cities(route.path()).with_segment(segment_id);
            let bridge = finder.find_path(graph, route.path()[lo], route.path()[hi], avoid)?;
            splices.try_reserve(1)?;
            splices.push(Splice { id: route.id(), at: lo, bridge: bridge.cities });
        }

        // ② Build every new path before committing any of them.
        let mut new_paths: Vec<(RouteId, Vec<CityId>)> = Vec::new();
        new_paths.try_reserve_exact(splices.len())?;
        for splice in &splices {
            let old = self.existing(splice.id)?.path();
            let mut path = Vec::new();
            path.try_reserve_exact(old.len() + splice.bridge.len() - 2)?;
            path.extend_from_slice(&old[..splice.at]);
            path.extend_from_slice(&splice.bridge);
            path.extend_from_slice(&old[splice.at + 2..]);
            new_paths.push((splice.id, path));
        }

        // ③ Commit.
        for (id, path) in new_paths {
            debug!("route {id} rerouted around {name1:?} - {name2:?}");
            self.route_mut(id)?.replace_path(path);
        }
        graph.remove_segment(segment_id);
        Ok(())
    }

    // ── Description ───────────────────────────────────────────────────────

    /// Structured description of route `id`, or `None` if the number is out
    /// of range or unused.
    pub fn describe(&self, graph: &RoadGraph, id: RouteId) -> Option<RouteDescription> {
        let route = self.existing(id).ok()?;
        let mut legs = Vec::with_capacity(route.len() - 1);
        for pair in route.path().windows(2) {
            let segment = graph.segment(graph.find_segment(pair[0], pair[1])?)?;
            legs.push(Leg::new(segment.length, segment.year, graph.city_name(pair[1])));
        }
        Some(RouteDescription {
            id,
            start: graph.city_name(route.first()).to_owned(),
            legs,
        })
    }
}

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Resolve a name that must already denote a city.
fn existing_city(graph: &RoadGraph, name: &str) -> MapResult<CityId> {
    validate_city_name(name)?;
    graph.city_id(name).ok_or_else(|| MapError::NoSuchCity(name.to_owned()))
}

fn check_leg(length: u32, year: i32, city: &str) -> MapResult<()> {
    if length == 0 {
        return Err(MapError::InvalidArgument("length must be positive"));
    }
    if year == 0 {
        return Err(MapError::InvalidArgument("year must be non-zero"));
    }
    validate_city_name(city)
}

/// A declared leg may reuse an existing road only if it agrees on length and
/// does not claim an older year than the one recorded.
fn check_existing_road(graph: &RoadGraph, segment: SegmentId, length: u32, year: i32) -> MapResult<()> {
    let Some(road) = graph.segment(segment) else {
        return Ok(());
    };
    if road.length != length {
        return Err(MapError::InvalidArgument("declared length differs from the existing road"));
    }
    if road.year > year {
        return Err(MapError::InvalidArgument("declared year is older than the existing road"));
    }
    Ok(())
}
