//! A single national route.

use nr_core::{CityId, RouteId};

/// A numbered, ordered simple path through the road graph.
///
/// Every adjacent pair of cities in `path` is joined by a live segment and
/// no city appears twice.  The route table maintains this across every
/// graph mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    id:   RouteId,
    path: Vec<CityId>,
}

impl Route {
    pub(crate) fn new(id: RouteId, path: Vec<CityId>) -> Self {
        debug_assert!(!path.is_empty());
        Self { id, path }
    }

    #[inline]
    pub fn id(&self) -> RouteId {
        self.id
    }

    #[inline]
    pub fn path(&self) -> &[CityId] {
        &self.path
    }

    #[inline]
    pub fn first(&self) -> CityId {
        self.path[0]
    }

    #[inline]
    pub fn last(&self) -> CityId {
        self.path[self.path.len() - 1]
    }

    /// Number of cities on the route.
    pub fn len(&self) -> usize {
        self.path.len()
    }

    pub fn is_empty(&self) -> bool {
        self.path.is_empty()
    }

    pub fn contains(&self, city: CityId) -> bool {
        self.path.contains(&city)
    }

    pub fn position(&self, city: CityId) -> Option<usize> {
        self.path.iter().position(|&c| c == city)
    }

    /// If the route drives along the road `a`–`b`, the positions of its two
    /// endpoints as `(lo, hi)` with `hi == lo + 1`.
    pub fn traversal(&self, a: CityId, b: CityId) -> Option<(usize, usize)> {
        let (pa, pb) = (self.position(a)?, self.position(b)?);
        let (lo, hi) = if pa < pb { (pa, pb) } else { (pb, pa) };
        (hi == lo + 1).then_some((lo, hi))
    }

    pub(crate) fn path_mut(&mut self) -> &mut Vec<CityId> {
        &mut self.path
    }

    pub(crate) fn replace_path(&mut self, path: Vec<CityId>) {
        debug_assert!(!path.is_empty());
        self.path = path;
    }
}
