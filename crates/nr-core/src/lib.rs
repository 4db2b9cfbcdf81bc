//! `nr-core` — foundational types for the national-road map engine.
//!
//! This crate is a dependency of every other `nr-*` crate.  It has no `nr-*`
//! dependencies and only `thiserror` (plus optional `serde`) externally.
//!
//! # What lives here
//!
//! | Module      | Contents                                              |
//! |-------------|-------------------------------------------------------|
//! | [`ids`]     | `CityId`, `SegmentId`, `RouteId`                      |
//! | [`name`]    | `validate_city_name`, `is_valid_city_name`            |
//! | [`config`]  | `MapConfig`                                           |
//! | [`error`]   | `MapError`, `MapResult`                               |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to ids and `MapConfig`.     |

pub mod config;
pub mod error;
pub mod ids;
pub mod name;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::MapConfig;
pub use error::{MapError, MapResult};
pub use ids::{CityId, RouteId, SegmentId};
pub use name::{is_valid_city_name, validate_city_name};
