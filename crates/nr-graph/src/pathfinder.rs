//! Path-search trait and the default tie-breaking Dijkstra.
//!
//! # Pluggability
//!
//! The route table calls path search through the [`PathFinder`] trait, so a
//! different algorithm can be swapped in at compile time without touching
//! route bookkeeping.  Any implementation must reproduce the selection rule
//! below exactly.
//!
//! # Selection rule
//!
//! Among all simple paths from `start` to `finish` that avoid the excluded
//! cities and the forbidden segment:
//!
//! 1. the shortest total length wins;
//! 2. among equally short paths, the one whose *oldest* segment (smallest
//!    year) is youngest wins;
//! 3. if two paths still tie, there is no answer and the search reports
//!    [`MapError::NoUniquePath`].

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use log::trace;

use nr_core::{CityId, MapError, MapResult, SegmentId};

use crate::RoadGraph;

// ── Path ──────────────────────────────────────────────────────────────────────

/// A search result: the cities from `start` to `finish` inclusive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Path {
    pub cities:     Vec<CityId>,
    /// Sum of segment lengths.
    pub length:     u64,
    /// Smallest segment year along the path; `i32::MAX` for a one-city path.
    pub worst_year: i32,
}

impl Path {
    /// `true` if start and finish coincide.
    pub fn is_trivial(&self) -> bool {
        self.cities.len() <= 1
    }
}

/// What a search must stay clear of.
#[derive(Debug, Clone, Copy, Default)]
pub struct Avoid<'a> {
    /// Cities treated as already visited.  The search's own start and finish
    /// are never excluded, even if listed here.
    pub cities:  &'a [CityId],
    /// A segment treated as absent.
    pub segment: Option<SegmentId>,
}

impl<'a> Avoid<'a> {
    pub const NOTHING: Avoid<'static> = Avoid { cities: &[], segment: None };

    pub fn cities(cities: &'a [CityId]) -> Self {
        Self { cities, segment: None }
    }

    pub fn with_segment(mut self, segment: SegmentId) -> Self {
        self.segment = Some(segment);
        self
    }
}

// ── PathFinder trait ──────────────────────────────────────────────────────────

/// Pluggable path-search engine.
pub trait PathFinder {
    /// Find the unique best path from `start` to `finish`.
    ///
    /// `start == finish` yields the one-city path.
    ///
    /// # Errors
    ///
    /// `NoUniquePath` if `finish` is unreachable or the best path is
    /// ambiguous; `OutOfMemory` if the search's scratch space cannot be
    /// allocated.
    fn find_path(
        &self,
        graph:  &RoadGraph,
        start:  CityId,
        finish: CityId,
        avoid:  Avoid<'_>,
    ) -> MapResult<Path>;
}

// ── DijkstraPathFinder ────────────────────────────────────────────────────────

/// Early-exit Dijkstra over the road graph with the length/age tie-break.
///
/// A binary heap selects the next city.  Every candidate for a city's final
/// `(distance, worst_year)` comes from a city with strictly smaller distance
/// (lengths are positive), so the order in which equal-distance cities are
/// popped cannot change which predecessor, or which ambiguity, is recorded.
#[derive(Debug, Clone, Copy, Default)]
pub struct DijkstraPathFinder;

impl PathFinder for DijkstraPathFinder {
    fn find_path(
        &self,
        graph:  &RoadGraph,
        start:  CityId,
        finish: CityId,
        avoid:  Avoid<'_>,
    ) -> MapResult<Path> {
        dijkstra(graph, start, finish, avoid)
    }
}

// ── Dijkstra internals ────────────────────────────────────────────────────────

/// Per-search state for one city.  Lives in a table allocated per call, so
/// nothing leaks from one search to the next.
#[derive(Clone, Copy)]
struct Scratch {
    distance:   u64,
    worst_year: i32,
    /// `None` before the city is reached and whenever the best known
    /// `(distance, worst_year)` is achieved through two different cities.
    previous:   Option<CityId>,
    visited:    bool,
}

impl Scratch {
    const UNREACHED: Scratch = Scratch {
        distance:   u64::MAX,
        worst_year: i32::MAX,
        previous:   None,
        visited:    false,
    };
}

fn dijkstra(graph: &RoadGraph, start: CityId, finish: CityId, avoid: Avoid<'_>) -> MapResult<Path> {
    if start == finish {
        return Ok(Path { cities: vec![start], length: 0, worst_year: i32::MAX });
    }

    let n = graph.city_count();
    let mut scratch: Vec<Scratch> = Vec::new();
    scratch.try_reserve_exact(n)?;
    scratch.resize(n, Scratch::UNREACHED);

    for &city in avoid.cities {
        scratch[city.index()].visited = true;
    }
    scratch[start.index()].visited = false;
    scratch[finish.index()].visited = false;
    scratch[start.index()].distance = 0;

    // Min-heap: (distance, city).  Reverse makes BinaryHeap (max) a min-heap.
    let mut heap: BinaryHeap<Reverse<(u64, CityId)>> = BinaryHeap::new();
    heap.push(Reverse((0, start)));

    while let Some(Reverse((distance, city))) = heap.pop() {
        let current = scratch[city.index()];
        // Skip stale heap entries and excluded cities.
        if current.visited || distance > current.distance {
            continue;
        }
        scratch[city.index()].visited = true;
        if city == finish {
            break;
        }

        for (segment_id, segment) in graph.segments_of(city) {
            if avoid.segment == Some(segment_id) {
                continue;
            }
            let next = segment.other(city);
            let entry = &mut scratch[next.index()];
            if entry.visited {
                continue;
            }

            let candidate_distance = current.distance + u64::from(segment.length);
            let candidate_year = current.worst_year.min(segment.year);

            match candidate_distance.cmp(&entry.distance) {
                Ordering::Less => {
                    entry.distance = candidate_distance;
                    entry.worst_year = candidate_year;
                    entry.previous = Some(city);
                    heap.push(Reverse((candidate_distance, next)));
                }
                Ordering::Equal => match candidate_year.cmp(&entry.worst_year) {
                    Ordering::Greater => {
                        entry.worst_year = candidate_year;
                        entry.previous = Some(city);
                    }
                    // Two different, equally good ways in.
                    Ordering::Equal => entry.previous = None,
                    Ordering::Less => {}
                },
                Ordering::Greater => {}
            }
        }
    }

    let result = reconstruct(&scratch, start, finish);
    match &result {
        Some(path) => trace!(
            "path {start} -> {finish}: {} cities, length {}, worst year {}",
            path.cities.len(),
            path.length,
            path.worst_year,
        ),
        None => trace!("path {start} -> {finish}: none unique"),
    }
    result.ok_or_else(|| MapError::NoUniquePath {
        from: graph.city_name(start).to_owned(),
        to:   graph.city_name(finish).to_owned(),
    })
}

/// Walk `previous` links back from `finish`.  Hitting a city without a
/// predecessor before reaching `start` means the path through it was
/// ambiguous (or `finish` was never reached).
fn reconstruct(scratch: &[Scratch], start: CityId, finish: CityId) -> Option<Path> {
    let end = scratch[finish.index()];
    end.previous?;

    let mut cities = vec![finish];
    let mut cur = finish;
    while cur != start {
        cur = scratch[cur.index()].previous?;
        cities.push(cur);
    }
    cities.reverse();

    Some(Path {
        cities,
        length:     end.distance,
        worst_year: end.worst_year,
    })
}
