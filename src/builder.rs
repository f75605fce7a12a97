use crate::checking::AbortChecking;
use crate::enum_map::EnumMap;
use crate::key::EnumKey;

/// Fluent construction of an [`EnumMap`].
///
/// Insertions follow [`EnumMap::insert`]: the first value seen for a key
/// wins.
///
/// # Examples
/// ```
/// use enum_map_fixed::{EnumMap, EnumMapBuilder};
///
/// let map: EnumMap<bool, u8> = EnumMapBuilder::new()
///     .insert(true, 1)
///     .insert_all([(false, 2), (true, 3)])
///     .build();
/// assert_eq!(map.get(true), Some(&1));
/// assert_eq!(map.get(false), Some(&2));
/// ```
pub struct EnumMapBuilder<K: EnumKey, V, C = AbortChecking> {
    map: EnumMap<K, V, C>,
}

impl<K: EnumKey, V, C> EnumMapBuilder<K, V, C> {
    /// Starts from an empty map.
    pub const fn new() -> Self {
        Self {
            map: EnumMap::new(),
        }
    }

    /// Adds `value` for `key` unless `key` was already added.
    pub fn insert(mut self, key: K, value: V) -> Self {
        self.map.insert(key, value);
        self
    }

    /// Adds every pair of `pairs`.
    pub fn insert_all<I>(mut self, pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
    {
        self.map.insert_all(pairs);
        self
    }

    /// Number of entries added so far.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Returns `true` if nothing has been added.
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Finishes by moving the map out.
    pub fn build(self) -> EnumMap<K, V, C> {
        self.map
    }

    /// Finishes with a clone, leaving the builder reusable.
    pub fn build_cloned(&self) -> EnumMap<K, V, C>
    where
        V: Clone,
    {
        self.map.clone()
    }
}

impl<K: EnumKey, V, C> Default for EnumMapBuilder<K, V, C> {
    fn default() -> Self {
        Self::new()
    }
}
