//! `nr-graph` — city name table, road graph, and path search.
//!
//! # Crate layout
//!
//! | Module         | Contents                                                 |
//! |----------------|----------------------------------------------------------|
//! | [`names`]      | `NameTable` — name → `CityId` hash table                 |
//! | [`graph`]      | `RoadGraph` (city + segment arenas), `City`, `RoadSegment` |
//! | [`pathfinder`] | `PathFinder` trait, `Path`, `Avoid`, `DijkstraPathFinder` |
//! | [`loader`]     | `load_roads_csv`, `load_roads_reader`                    |
//! | [`error`]      | `LoadError`, `LoadResult<T>`                             |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on `RoadSegment` and ids.  |

pub mod error;
pub mod graph;
pub mod loader;
pub mod names;
pub mod pathfinder;


pub use error::{LoadError, LoadResult};
pub use graph::{City, RoadGraph, RoadSegment};
pub use loader::{load_roads_csv, load_roads_reader};
pub use names::NameTable;
pub use pathfinder::{Avoid, DijkstraPathFinder, Path, PathFinder};
