//! Map configuration.

use crate::{MapError, MapResult, RouteId};

/// Engine configuration.
///
/// Typically built by the application (e.g. from command-line flags) and
/// passed to `RoadMap::with_config`.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MapConfig {
    /// Highest valid route number.  Route ids are valid in
    /// `1..=max_route_id`.  Default: 999.
    pub max_route_id: u32,

    /// Pre-sizing hint for the city arena and name table.
    pub city_capacity: usize,

    /// Pre-sizing hint for the segment arena.
    pub segment_capacity: usize,
}

impl MapConfig {
    pub const DEFAULT_MAX_ROUTE_ID: u32 = 999;

    /// Accept `id` if it lies in `1..=max_route_id`.
    pub fn check_route_id(&self, id: RouteId) -> MapResult<RouteId> {
        if (1..=self.max_route_id).contains(&id.0) {
            Ok(id)
        } else {
            Err(MapError::InvalidArgument("route id out of range"))
        }
    }
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            max_route_id:     Self::DEFAULT_MAX_ROUTE_ID,
            city_capacity:    0,
            segment_capacity: 0,
        }
    }
}
