//! Map error taxonomy.
//!
//! Every core operation returns [`MapResult`]; a failed call never leaves a
//! partial mutation behind.  Only the command layer turns these into
//! user-visible output.

use thiserror::Error;

use crate::RouteId;

/// Errors produced by the map engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MapError {
    #[error("invalid city name {0:?}")]
    InvalidName(String),

    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),

    #[error("a road between {0:?} and {1:?} already exists")]
    DuplicateSegment(String, String),

    #[error("no road between {0:?} and {1:?}")]
    NoSuchSegment(String, String),

    #[error("city {0:?} not found")]
    NoSuchCity(String),

    #[error("route {0} not found")]
    NoSuchRoute(RouteId),

    #[error("route {0} already exists")]
    DuplicateRouteId(RouteId),

    #[error("route {0} already passes through {1:?}")]
    SelfIntersectingRoute(RouteId, String),

    #[error("no unique shortest path from {from:?} to {to:?}")]
    NoUniquePath { from: String, to: String },

    #[error("out of memory")]
    OutOfMemory,
}

impl From<std::collections::TryReserveError> for MapError {
    fn from(_: std::collections::TryReserveError) -> Self {
        MapError::OutOfMemory
    }
}

/// Shorthand result type for all `nr-*` crates.
pub type MapResult<T> = Result<T, MapError>;
