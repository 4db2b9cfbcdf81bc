//! `nr-routes` — national routes over the road graph.
//!
//! # Crate layout
//!
//! | Module          | Contents                                                     |
//! |-----------------|--------------------------------------------------------------|
//! | [`route`]       | `Route` — a numbered simple path                             |
//! | [`table`]       | `RouteTable` — create / extend / declare / remove / reroute  |
//! | [`description`] | `RouteDescription`, `Leg`, and the `id;city;len;year;…` form |
//! | [`map`]         | `RoadMap<P>` — graph + routes + path finder facade           |
//!
//! # Invariant
//!
//! After every successful call, each route's path is a simple path whose
//! consecutive cities are joined by live road segments.  Failed calls change
//! nothing.

pub mod description;
pub mod map;
pub mod route;
pub mod table;

#[cfg(test)]
mod tests;

pub use description::{Leg, RouteDescription};
pub use map::RoadMap;
pub use route::Route;
pub use table::RouteTable;
