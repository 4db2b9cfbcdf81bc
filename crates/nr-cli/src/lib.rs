//! `nr-cli` — the text command layer over [`nr_routes::RoadMap`].
//!
//! # Protocol
//!
//! One command per line, fields separated by `;`:
//!
//! ```text
//! addRoad;city1;city2;length;year
//! repairRoad;city1;city2;year
//! getRouteDescription;routeId
//! newRoute;routeId;city1;city2
//! extendRoute;routeId;city
//! removeRoad;city1;city2
//! removeRoute;routeId
//! routeId;city;length;year;city;...;length;year;city
//! ```
//!
//! Blank lines and lines starting with `#` are skipped.  A line that does
//! not parse, or whose command fails, produces `ERROR <line>` on the error
//! stream; the map is left as it was.
//!
//! # Crate layout
//!
//! | Module      | Contents                                        |
//! |-------------|-------------------------------------------------|
//! | [`command`] | `Command`, `parse_line`, `ParseError`           |
//! | [`session`] | `Session` — runs a command stream against a map |

pub mod command;
pub mod session;


pub use command::{Command, ParseError, parse_line};
pub use session::{CommandError, RunSummary, Session};
