//! `RoadMap` — the engine's public face.
//!
//! Owns the road graph, the route table, and the path finder, and exposes
//! one method per command the command layer can issue.  Every method is
//! all-or-nothing: on `Err` the map is unchanged.

use std::io::Read;

use nr_core::{CityId, MapConfig, MapResult, RouteId};
use nr_graph::{DijkstraPathFinder, LoadResult, PathFinder, RoadGraph, load_roads_reader};

use crate::{Leg, Route, RouteDescription, RouteTable};

/// A road network plus its national routes.
///
/// # Type parameter
///
/// `P` is the path-search algorithm used for automatic planning and for
/// rerouting after road removal.  Defaults to [`DijkstraPathFinder`].
///
/// # Example
///
/// ```
/// use nr_core::RouteId;
/// use nr_routes::RoadMap;
///
/// let mut map = RoadMap::new();
/// map.add_road("A", "B", 10, 2000).unwrap();
/// map.add_road("B", "C", 10, 1990).unwrap();
/// map.add_road("A", "C", 25, 2020).unwrap();
/// map.new_route(RouteId(1), "A", "C").unwrap();
/// assert_eq!(map.describe_route(RouteId(1)), "1;A;10;2000;B;10;1990;C");
/// ```
pub struct RoadMap<P: PathFinder = DijkstraPathFinder> {
    graph:  RoadGraph,
    routes: RouteTable,
    finder: P,
}

impl RoadMap {
    /// Empty map with [`MapConfig::default`].
    pub fn new() -> Self {
        Self::with_config(MapConfig::default())
    }

    pub fn with_config(config: MapConfig) -> Self {
        Self::with_finder(config, DijkstraPathFinder)
    }
}

impl Default for RoadMap {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: PathFinder> RoadMap<P> {
    pub fn with_finder(config: MapConfig, finder: P) -> Self {
        Self {
            graph: RoadGraph::with_capacity(config.city_capacity, config.segment_capacity),
            routes: RouteTable::new(config),
            finder,
        }
    }

    pub fn config(&self) -> &MapConfig {
        self.routes.config()
    }

    /// Read-only view of the road graph.
    pub fn graph(&self) -> &RoadGraph {
        &self.graph
    }

    /// Read-only view of the route table.
    pub fn routes(&self) -> &RouteTable {
        &self.routes
    }

    // ── Roads ─────────────────────────────────────────────────────────────

    pub fn add_road(&mut self, city1: &str, city2: &str, length: u32, year: i32) -> MapResult<()> {
        self.graph.add_road(city1, city2, length, year).map(|_| ())
    }

    pub fn repair_road(&mut self, city1: &str, city2: &str, year: i32) -> MapResult<()> {
        self.graph.repair_road(city1, city2, year)
    }

    /// Remove a road, rerouting every route that drives along it.  See
    /// [`RouteTable::remove_road`].
    pub fn remove_road(&mut self, city1: &str, city2: &str) -> MapResult<()> {
        self.routes.remove_road(&mut self.graph, &self.finder, city1, city2)
    }

    /// Bulk-add roads from CSV (see [`nr_graph::loader`]).  Adding roads
    /// never invalidates a route.
    pub fn load_roads<R: Read>(&mut self, reader: R) -> LoadResult<usize> {
        load_roads_reader(reader, &mut self.graph)
    }

    // ── Routes ────────────────────────────────────────────────────────────

    pub fn new_route(&mut self, id: RouteId, city1: &str, city2: &str) -> MapResult<()> {
        self.routes.new_route(&self.graph, &self.finder, id, city1, city2)
    }

    pub fn extend_route(&mut self, id: RouteId, city: &str) -> MapResult<()> {
        self.routes.extend_route(&self.graph, &self.finder, id, city)
    }

    pub fn remove_route(&mut self, id: RouteId) -> MapResult<()> {
        self.routes.remove_route(id).map(|_| ())
    }

    pub fn new_custom_route(&mut self, id: RouteId, start: &str) -> MapResult<RouteId> {
        self.routes.new_custom_route(&mut self.graph, id, start)
    }

    pub fn extend_custom_route(
        &mut self,
        id:          RouteId,
        length:      u32,
        year:        i32,
        destination: &str,
    ) -> MapResult<()> {
        self.routes.extend_custom_route(&mut self.graph, id, length, year, destination)
    }

    pub fn declare_route(&mut self, id: RouteId, start: &str, legs: &[Leg]) -> MapResult<()> {
        self.routes.declare_route(&mut self.graph, id, start, legs)
    }

    // ── Queries ───────────────────────────────────────────────────────────

    pub fn route(&self, id: RouteId) -> Option<&Route> {
        self.routes.get(id)
    }

    pub fn route_ids(&self) -> impl Iterator<Item = RouteId> + '_ {
        self.routes.ids()
    }

    pub fn route_path(&self, id: RouteId) -> Option<&[CityId]> {
        self.routes.get(id).map(Route::path)
    }

    pub fn route_description(&self, id: RouteId) -> Option<RouteDescription> {
        self.routes.describe(&self.graph, id)
    }

    /// Text form of [`route_description`](Self::route_description); empty
    /// if `id` is out of range or unused.
    pub fn describe_route(&self, id: RouteId) -> String {
        self.route_description(id).map(|d| d.to_string()).unwrap_or_default()
    }
}
