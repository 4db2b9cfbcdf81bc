//! Name → city lookup table.

use rustc_hash::FxHashMap;

use nr_core::{CityId, MapResult};

/// Hash table from city name to [`CityId`].
///
/// Cities are never removed, so neither is there a removal operation here.
/// The table does not deduplicate: inserting a name that is already present
/// is a caller bug (the road graph always looks a name up before creating
/// the city).
#[derive(Default)]
pub struct NameTable {
    map: FxHashMap<Box<str>, CityId>,
}

impl NameTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            map: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
        }
    }

    #[inline]
    pub fn lookup(&self, name: &str) -> Option<CityId> {
        self.map.get(name).copied()
    }

    /// Ensure room for `additional` names without reallocating.
    pub fn reserve(&mut self, additional: usize) -> MapResult<()> {
        self.map.try_reserve(additional)?;
        Ok(())
    }

    /// Register `name` for `city`.
    ///
    /// Fails only with `OutOfMemory`.  Does not allocate if
    /// [`reserve`](Self::reserve) was called beforehand.
    pub fn insert(&mut self, name: Box<str>, city: CityId) -> MapResult<()> {
        self.reserve(1)?;
        debug_assert!(!self.map.contains_key(&name), "duplicate city name {name:?}");
        self.map.insert(name, city);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}
