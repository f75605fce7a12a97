use core::fmt::{Debug, Formatter};
use core::hash::{Hash, Hasher};
use core::marker::PhantomData;
use core::ops::{Bound, Index, RangeBounds};
use core::panic::Location;

use crate::bitmap::Occupancy;
use crate::builder::EnumMapBuilder;
use crate::checking::{AbortChecking, EnumMapChecking, EnumMapError};
use crate::dense::DenseSkip;
use crate::entries::{IntoIter, Iter, IterMut};
use crate::iterator::{BidirectionalIterator, Direction, Forward, Reverse};
use crate::key::{EnumKey, has_contiguous_ordinals};
use crate::pair::{Occupied, PairProvider, PairProviderMut};
use crate::slot::SlotArray;

/// Read-only position provider of an [`EnumMap`].
pub type Entries<'a, K, V> =
    DenseSkip<Occupied<'a, <K as EnumKey>::Occupancy>, PairProvider<'a, K, V>>;

/// Mutable position provider of an [`EnumMap`].
pub type EntriesMut<'a, K, V> =
    DenseSkip<Occupied<'a, <K as EnumKey>::Occupancy>, PairProviderMut<'a, K, V>>;

/// Read-only forward cursor into an [`EnumMap`].
///
/// A [`CursorMut`] converts into a `Cursor` with `into()`; the other way
/// round does not exist:
/// ```compile_fail
/// use enum_map_fixed::{CursorMut, EnumMap};
///
/// let mut map: EnumMap<bool, u8> = EnumMap::new();
/// let _: CursorMut<'_, bool, u8> = map.begin().into();
/// ```
pub type Cursor<'a, K, V> = BidirectionalIterator<Entries<'a, K, V>, Forward>;

/// Mutable forward cursor into an [`EnumMap`].
pub type CursorMut<'a, K, V> = BidirectionalIterator<EntriesMut<'a, K, V>, Forward>;

/// Read-only reverse cursor into an [`EnumMap`].
pub type RevCursor<'a, K, V> = BidirectionalIterator<Entries<'a, K, V>, Reverse>;

/// Mutable reverse cursor into an [`EnumMap`].
pub type RevCursorMut<'a, K, V> = BidirectionalIterator<EntriesMut<'a, K, V>, Reverse>;

/// Fixed-capacity map over every key of the domain `K`.
///
/// Storage is two inline arrays sized to `K::COUNT` (one value slot and one
/// occupancy bit per key) plus a live count. Keys address their slot by
/// ordinal, so lookup, insertion and removal are O(1) and nothing is ever
/// allocated. Iteration visits entries in ascending ordinal order.
///
/// Failing operations ([`at`], [`create_with_all_entries`]) report through
/// the checking policy `C`, [`AbortChecking`] by default.
///
/// # Examples
/// ```
/// use enum_map_fixed::{EnumMap, enum_key};
///
/// enum_key! {
///     #[derive(Debug, Clone, Copy, PartialEq, Eq)]
///     enum Color {
///         Red,
///         Green,
///         Blue,
///     }
/// }
///
/// let mut map = EnumMap::<Color, i32>::create_with_all_entries([
///     (Color::Red, 1),
///     (Color::Green, 2),
///     (Color::Blue, 3),
/// ]);
/// assert_eq!(map.len(), 3);
/// assert_eq!(map.at(Color::Green), &2);
///
/// map.erase(Color::Green);
/// assert!(!map.contains(Color::Green));
///
/// map.insert_or_assign(Color::Red, 9);
/// let entries: Vec<_> = map.iter().map(|(k, v)| (k, *v)).collect();
/// assert_eq!(entries, [(Color::Red, 9), (Color::Blue, 3)]);
/// ```
///
/// [`at`]: EnumMap::at
/// [`create_with_all_entries`]: EnumMap::create_with_all_entries
pub struct EnumMap<K: EnumKey, V, C = AbortChecking> {
    values: K::Storage<V>,
    occupancy: K::Occupancy,
    len: usize,
    _checking: PhantomData<fn() -> C>,
}

impl<K: EnumKey, V, C> EnumMap<K, V, C> {
    /// Creates an empty map.
    ///
    /// Callable in compile-time contexts.
    ///
    /// # Examples
    /// ```
    /// use enum_map_fixed::EnumMap;
    ///
    /// const FLAGS: EnumMap<bool, u8> = EnumMap::new();
    /// assert!(FLAGS.is_empty());
    /// ```
    pub const fn new() -> Self {
        Self {
            values: <K::Storage<V> as SlotArray<V>>::UNINIT,
            occupancy: <K::Occupancy as Occupancy>::EMPTY,
            len: 0,
            _checking: PhantomData,
        }
    }

    /// Starts a fluent [`EnumMapBuilder`].
    pub const fn builder() -> EnumMapBuilder<K, V, C> {
        EnumMapBuilder::new()
    }

    /// Creates a map holding a clone of `value` for each of `keys`.
    ///
    /// # Examples
    /// ```
    /// use enum_map_fixed::EnumMap;
    ///
    /// let map = EnumMap::<bool, &str>::create_with_keys([true], "yes");
    /// assert_eq!(map.get(true), Some(&"yes"));
    /// assert_eq!(map.get(false), None);
    /// ```
    pub fn create_with_keys<I>(keys: I, value: V) -> Self
    where
        I: IntoIterator<Item = K>,
        V: Clone,
    {
        let mut output = Self::new();
        for key in keys {
            output.insert_or_assign(key, value.clone());
        }
        output
    }

    /// Creates a map from `pairs` that must name every key exactly once.
    ///
    /// Returns [`EnumMapError::DuplicateEnumEntries`] on the first repeated
    /// key and [`EnumMapError::MissingEnumEntries`] if a key is left out.
    ///
    /// # Examples
    /// ```
    /// use enum_map_fixed::{EnumMap, EnumMapError};
    ///
    /// let map = EnumMap::<bool, u8>::try_create_with_all_entries([(false, 0), (true, 1)]);
    /// assert!(map.is_ok());
    ///
    /// let missing = EnumMap::<bool, u8>::try_create_with_all_entries([(false, 0)]);
    /// assert_eq!(missing.unwrap_err(), EnumMapError::MissingEnumEntries);
    /// ```
    pub fn try_create_with_all_entries<I>(pairs: I) -> Result<Self, EnumMapError>
    where
        I: IntoIterator<Item = (K, V)>,
    {
        let mut output = Self::new();
        for (key, value) in pairs {
            if !output.insert_at(key.ordinal(), value) {
                #[cfg(feature = "log")]
                log::trace!("duplicate entry for ordinal {}", key.ordinal());
                return Err(EnumMapError::DuplicateEnumEntries);
            }
        }
        if output.len != K::COUNT {
            #[cfg(feature = "log")]
            log::trace!("{} of {} entries present", output.len, K::COUNT);
            return Err(EnumMapError::MissingEnumEntries);
        }
        Ok(output)
    }

    /// Maximum number of entries, `K::COUNT`.
    #[inline]
    pub const fn max_size() -> usize {
        K::COUNT
    }

    /// Number of entries.
    #[inline]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the map holds no entries.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns `true` if `key` has an entry.
    #[inline]
    pub fn contains(&self, key: K) -> bool {
        self.contains_at(key.ordinal())
    }

    /// Number of entries for `key`: `0` or `1`.
    #[inline]
    pub fn count(&self, key: K) -> usize {
        usize::from(self.contains(key))
    }

    /// Reference to the value of `key`, if present.
    #[inline]
    pub fn get(&self, key: K) -> Option<&V> {
        let i = key.ordinal();
        // SAFETY: the slot is occupied.
        self.contains_at(i).then(|| unsafe { self.unchecked_ref(i) })
    }

    /// Mutable reference to the value of `key`, if present.
    #[inline]
    pub fn get_mut(&mut self, key: K) -> Option<&mut V> {
        let i = key.ordinal();
        if !self.contains_at(i) {
            return None;
        }
        // SAFETY: the slot is occupied.
        Some(unsafe { self.unchecked_mut(i) })
    }

    /// Mutable reference to the value of `key`, inserting `V::default()`
    /// first if absent.
    ///
    /// # Examples
    /// ```
    /// use enum_map_fixed::EnumMap;
    ///
    /// let mut counts: EnumMap<bool, u32> = EnumMap::new();
    /// *counts.get_or_insert_default(true) += 1;
    /// *counts.get_or_insert_default(true) += 1;
    /// assert_eq!(counts.get(true), Some(&2));
    /// assert_eq!(counts.len(), 1);
    /// ```
    pub fn get_or_insert_default(&mut self, key: K) -> &mut V
    where
        V: Default,
    {
        let i = key.ordinal();
        if !self.contains_at(i) {
            self.construct_at(i, V::default());
        }
        // SAFETY: the slot is occupied.
        unsafe { self.unchecked_mut(i) }
    }

    /// Inserts `value` for `key` unless `key` already has an entry.
    ///
    /// Never overwrites. Returns a cursor at `key` and whether the value was
    /// inserted; a rejected `value` is dropped.
    ///
    /// # Examples
    /// ```
    /// use enum_map_fixed::EnumMap;
    ///
    /// let mut map: EnumMap<bool, &str> = EnumMap::new();
    /// assert!(map.insert(true, "first").1);
    /// assert!(!map.insert(true, "second").1);
    /// assert_eq!(map.get(true), Some(&"first"));
    /// ```
    pub fn insert(&mut self, key: K, value: V) -> (CursorMut<'_, K, V>, bool) {
        let i = key.ordinal();
        let inserted = self.insert_at(i, value);
        (self.cursor_mut_at(i), inserted)
    }

    /// Inserts every pair from `pairs` with [`insert`](Self::insert)
    /// semantics: the first value seen for a key wins.
    pub fn insert_all<I>(&mut self, pairs: I)
    where
        I: IntoIterator<Item = (K, V)>,
    {
        for (key, value) in pairs {
            self.insert_at(key.ordinal(), value);
        }
    }

    /// Inserts `value` for `key`, or assigns it over the existing value.
    ///
    /// Returns a cursor at `key` and `true` if this was an insertion.
    ///
    /// # Examples
    /// ```
    /// use enum_map_fixed::EnumMap;
    ///
    /// let mut map: EnumMap<bool, u8> = EnumMap::new();
    /// assert!(map.insert_or_assign(false, 1).1);
    /// assert!(!map.insert_or_assign(false, 2).1);
    /// assert_eq!(map.get(false), Some(&2));
    /// assert_eq!(map.len(), 1);
    /// ```
    pub fn insert_or_assign(&mut self, key: K, value: V) -> (CursorMut<'_, K, V>, bool) {
        let i = key.ordinal();
        let is_insertion = !self.contains_at(i);
        if is_insertion {
            self.construct_at(i, value);
        } else {
            // SAFETY: the slot is occupied.
            unsafe { *self.unchecked_mut(i) = value };
        }
        (self.cursor_mut_at(i), is_insertion)
    }

    /// Constructs the value for `key` from `make` only if `key` is absent.
    ///
    /// `make` is not called when `key` already has an entry.
    ///
    /// # Examples
    /// ```
    /// use enum_map_fixed::EnumMap;
    ///
    /// let mut map: EnumMap<bool, String> = EnumMap::new();
    /// map.try_emplace(true, || "built".to_string());
    /// let (_, inserted) = map.try_emplace(true, || unreachable!());
    /// assert!(!inserted);
    /// ```
    pub fn try_emplace<F>(&mut self, key: K, make: F) -> (CursorMut<'_, K, V>, bool)
    where
        F: FnOnce() -> V,
    {
        let i = key.ordinal();
        if self.contains_at(i) {
            return (self.cursor_mut_at(i), false);
        }
        self.construct_at(i, make());
        (self.cursor_mut_at(i), true)
    }

    /// Removes the entry for `key`. Returns the number of removed entries,
    /// `0` if `key` was absent.
    pub fn erase(&mut self, key: K) -> usize {
        let i = key.ordinal();
        if !self.contains_at(i) {
            return 0;
        }
        self.reset_at(i);
        1
    }

    /// Removes the entry at the position of `key` and returns a cursor to the
    /// entry after it.
    ///
    /// This is the positional erase: the position is named by its key rather
    /// than by a cursor, since a live cursor already borrows the map. The
    /// returned cursor is the one a cursor-based erase would yield, or
    /// [`end_mut`](Self::end_mut) after the last entry.
    ///
    /// `key` must have an entry; erasing an absent position is a contract
    /// violation caught by debug assertions and a no-op otherwise.
    pub fn erase_at(&mut self, key: K) -> CursorMut<'_, K, V> {
        let i = key.ordinal();
        debug_assert!(self.contains_at(i), "erase_at on a vacant position");
        if self.contains_at(i) {
            self.reset_at(i);
        }
        CursorMut::new(self.entries_mut_from(i))
    }

    /// Removes every entry whose key falls in `range` (by ordinal). Returns
    /// the number of removed entries.
    ///
    /// Stands in for erasing a `[first, last)` cursor range: the bounds are
    /// keys, so `first..last` covers the same positions. The cursor at `last`
    /// is not returned; take it afterwards with [`find`](Self::find) or
    /// [`end`](Self::end).
    ///
    /// # Examples
    /// ```
    /// use enum_map_fixed::EnumMap;
    ///
    /// let mut map = EnumMap::<bool, u8>::create_with_keys([false, true], 0);
    /// assert_eq!(map.erase_range(..true), 1);
    /// assert!(map.contains(true));
    /// assert_eq!(map.erase_range(..), 1);
    /// assert!(map.is_empty());
    /// ```
    pub fn erase_range<R>(&mut self, range: R) -> usize
    where
        R: RangeBounds<K>,
    {
        let from = match range.start_bound() {
            Bound::Included(key) => key.ordinal(),
            Bound::Excluded(key) => key.ordinal() + 1,
            Bound::Unbounded => 0,
        };
        let to = match range.end_bound() {
            Bound::Included(key) => key.ordinal() + 1,
            Bound::Excluded(key) => key.ordinal(),
            Bound::Unbounded => K::COUNT,
        };
        debug_assert!(from <= to, "range start {from} after end {to}");

        let mut erased = 0;
        for i in from..to.min(K::COUNT) {
            if self.contains_at(i) {
                self.reset_at(i);
                erased += 1;
            }
        }
        erased
    }

    /// Removes the entry for `key` and returns its value.
    pub fn remove(&mut self, key: K) -> Option<V> {
        self.remove_entry(key).map(|(_, value)| value)
    }

    /// Removes the entry for `key` and returns it.
    pub fn remove_entry(&mut self, key: K) -> Option<(K, V)> {
        let i = key.ordinal();
        self.contains_at(i).then(|| self.take_at(i))
    }

    /// Keeps only the entries for which `keep` returns `true`.
    pub fn retain<F>(&mut self, mut keep: F)
    where
        F: FnMut(K, &mut V) -> bool,
    {
        for i in 0..K::COUNT {
            if !self.contains_at(i) {
                continue;
            }
            // SAFETY: the slot is occupied.
            let value = unsafe { self.unchecked_mut(i) };
            if !keep(K::VALUES[i], value) {
                self.reset_at(i);
            }
        }
    }

    /// Removes every entry.
    ///
    /// Values without drop glue are not visited; only the occupancy bitmap
    /// and count are reset.
    pub fn clear(&mut self) {
        if core::mem::needs_drop::<V>() {
            let mut next = self.occupancy.next_occupied(0);
            while let Some(i) = next {
                self.reset_at(i);
                next = self.occupancy.next_occupied(i + 1);
            }
        }
        self.occupancy.clear();
        self.len = 0;
        self.debug_check_len();
    }

    /// Cursor at `key`, or [`end`](Self::end) if absent.
    pub fn find(&self, key: K) -> Cursor<'_, K, V> {
        let i = key.ordinal();
        let index = if self.contains_at(i) { i } else { K::COUNT };
        Cursor::new(self.entries_at(index))
    }

    /// Mutable cursor at `key`, or [`end_mut`](Self::end_mut) if absent.
    pub fn find_mut(&mut self, key: K) -> CursorMut<'_, K, V> {
        let i = key.ordinal();
        let index = if self.contains_at(i) { i } else { K::COUNT };
        self.cursor_mut_at(index)
    }

    /// Cursor at the first entry.
    pub fn begin(&self) -> Cursor<'_, K, V> {
        Cursor::new(self.entries_from(0))
    }

    /// Cursor past the last entry.
    pub fn end(&self) -> Cursor<'_, K, V> {
        Cursor::new(self.entries_at(K::COUNT))
    }

    /// Reverse cursor at the last entry.
    pub fn rbegin(&self) -> RevCursor<'_, K, V> {
        RevCursor::new(self.entries_at(K::COUNT))
    }

    /// Reverse cursor before the first entry.
    pub fn rend(&self) -> RevCursor<'_, K, V> {
        RevCursor::new(self.entries_at(0))
    }

    /// Mutable cursor at the first entry.
    pub fn begin_mut(&mut self) -> CursorMut<'_, K, V> {
        CursorMut::new(self.entries_mut_from(0))
    }

    /// Mutable cursor past the last entry.
    pub fn end_mut(&mut self) -> CursorMut<'_, K, V> {
        self.cursor_mut_at(K::COUNT)
    }

    /// Mutable reverse cursor at the last entry.
    pub fn rbegin_mut(&mut self) -> RevCursorMut<'_, K, V> {
        RevCursorMut::new(self.entries_mut_at(K::COUNT))
    }

    /// Mutable reverse cursor before the first entry.
    pub fn rend_mut(&mut self) -> RevCursorMut<'_, K, V> {
        RevCursorMut::new(self.entries_mut_at(0))
    }

    /// Iterator over `(key, &value)` in ascending ordinal order.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter::new(self.begin(), self.end(), self.len)
    }

    /// Iterator over `(key, &mut value)` in ascending ordinal order.
    pub fn iter_mut(&mut self) -> IterMut<'_, K, V> {
        let len = self.len;
        let occupancy = &self.occupancy;
        let provider = PairProviderMut::<K, V>::new(self.values.as_mut(), occupancy);
        // SAFETY: `IterMut` stops once its two ends meet, so the front and back
        // handles never yield the same index.
        let back_provider = unsafe { provider.alias() };
        let front = DenseSkip::first_from(Occupied(occupancy), provider, 0, K::COUNT);
        let back = DenseSkip::at(Occupied(occupancy), back_provider, K::COUNT, K::COUNT);
        IterMut::new(CursorMut::new(front), CursorMut::new(back), len)
    }

    /// Iterator over the keys that have entries.
    pub fn keys(&self) -> impl DoubleEndedIterator<Item = K> + ExactSizeIterator + '_ {
        self.iter().map(|(key, _)| key)
    }

    /// Iterator over the values.
    pub fn values(&self) -> impl DoubleEndedIterator<Item = &V> + ExactSizeIterator + '_ {
        self.iter().map(|(_, value)| value)
    }

    /// Iterator over mutable references to the values.
    pub fn values_mut(
        &mut self,
    ) -> impl DoubleEndedIterator<Item = &mut V> + ExactSizeIterator + '_ {
        self.iter_mut().map(|(_, value)| value)
    }

    /// Flat copy of both backing arrays, available when `V: Copy`.
    ///
    /// Produces the same map as [`clone`](Clone::clone) without visiting
    /// individual entries.
    pub fn copied(&self) -> Self
    where
        V: Copy,
    {
        Self {
            values: self.values.bitwise_copy(),
            occupancy: self.occupancy,
            len: self.len,
            _checking: PhantomData,
        }
    }

    #[inline]
    pub(crate) fn contains_at(&self, i: usize) -> bool {
        self.occupancy.contains(i)
    }

    pub(crate) fn occupancy(&self) -> &K::Occupancy {
        &self.occupancy
    }

    fn occupied_ordinals(&self) -> impl Iterator<Item = usize> + '_ {
        core::iter::successors(self.occupancy.next_occupied(0), |&i| {
            self.occupancy.next_occupied(i + 1)
        })
    }

    /// # Safety
    /// Slot `i` must be occupied.
    #[inline]
    unsafe fn unchecked_ref(&self, i: usize) -> &V {
        // SAFETY: guaranteed by the caller.
        unsafe { self.values.as_ref()[i].assume_init_ref() }
    }

    /// # Safety
    /// Slot `i` must be occupied.
    #[inline]
    unsafe fn unchecked_mut(&mut self, i: usize) -> &mut V {
        // SAFETY: guaranteed by the caller.
        unsafe { self.values.as_mut()[i].assume_init_mut() }
    }

    fn construct_at(&mut self, i: usize, value: V) {
        debug_assert!(!self.contains_at(i));
        self.values.as_mut()[i].write(value);
        self.occupancy.insert(i);
        self.len += 1;
        self.debug_check_len();
    }

    fn insert_at(&mut self, i: usize, value: V) -> bool {
        if self.contains_at(i) {
            return false;
        }
        self.construct_at(i, value);
        true
    }

    fn reset_at(&mut self, i: usize) {
        debug_assert!(self.contains_at(i));
        self.occupancy.remove(i);
        self.len -= 1;
        self.debug_check_len();
        if core::mem::needs_drop::<V>() {
            // SAFETY: the slot was occupied and is now marked vacant.
            unsafe { self.values.as_mut()[i].assume_init_drop() };
        }
    }

    pub(crate) fn take_at(&mut self, i: usize) -> (K, V) {
        debug_assert!(self.contains_at(i));
        let key = K::VALUES[i];
        self.occupancy.remove(i);
        self.len -= 1;
        self.debug_check_len();
        // SAFETY: the slot was occupied and is now marked vacant.
        let value = unsafe { self.values.as_ref()[i].assume_init_read() };
        (key, value)
    }

    #[inline]
    fn debug_check_len(&self) {
        debug_assert_eq!(
            self.len,
            self.occupancy.count(),
            "live count out of sync with occupancy"
        );
    }

    fn entries_at(&self, index: usize) -> Entries<'_, K, V> {
        let provider = PairProvider::<K, V>::new(self.values.as_ref(), &self.occupancy);
        DenseSkip::at(Occupied(&self.occupancy), provider, index, K::COUNT)
    }

    fn entries_from(&self, start: usize) -> Entries<'_, K, V> {
        let provider = PairProvider::<K, V>::new(self.values.as_ref(), &self.occupancy);
        DenseSkip::first_from(Occupied(&self.occupancy), provider, start, K::COUNT)
    }

    fn entries_mut_at(&mut self, index: usize) -> EntriesMut<'_, K, V> {
        let occupancy = &self.occupancy;
        let provider = PairProviderMut::<K, V>::new(self.values.as_mut(), occupancy);
        DenseSkip::at(Occupied(occupancy), provider, index, K::COUNT)
    }

    fn entries_mut_from(&mut self, start: usize) -> EntriesMut<'_, K, V> {
        let occupancy = &self.occupancy;
        let provider = PairProviderMut::<K, V>::new(self.values.as_mut(), occupancy);
        DenseSkip::first_from(Occupied(occupancy), provider, start, K::COUNT)
    }

    fn cursor_mut_at(&mut self, index: usize) -> CursorMut<'_, K, V> {
        CursorMut::new(self.entries_mut_at(index))
    }
}

impl<K: EnumKey, V, C: EnumMapChecking> EnumMap<K, V, C> {
    /// Reference to the value of `key`.
    ///
    /// # Failure
    /// Calls `C::out_of_range` with the caller's location if `key` has no
    /// entry.
    ///
    /// # Examples
    /// ```
    /// use enum_map_fixed::{EnumMap, PanicChecking};
    ///
    /// let map = EnumMap::<bool, u8, PanicChecking>::create_with_keys([true], 7);
    /// assert_eq!(map.at(true), &7);
    /// assert!(std::panic::catch_unwind(|| *map.at(false)).is_err());
    /// ```
    #[track_caller]
    pub fn at(&self, key: K) -> &V {
        let i = key.ordinal();
        if !self.contains_at(i) {
            C::out_of_range(key, self.len, Location::caller());
        }
        // SAFETY: the slot is occupied.
        unsafe { self.unchecked_ref(i) }
    }

    /// Mutable reference to the value of `key`.
    ///
    /// # Failure
    /// Calls `C::out_of_range` with the caller's location if `key` has no
    /// entry.
    #[track_caller]
    pub fn at_mut(&mut self, key: K) -> &mut V {
        let i = key.ordinal();
        if !self.contains_at(i) {
            C::out_of_range(key, self.len, Location::caller());
        }
        // SAFETY: the slot is occupied.
        unsafe { self.unchecked_mut(i) }
    }

    /// Creates a map from `pairs` that must name every key exactly once.
    ///
    /// # Failure
    /// Calls `C::duplicate_enum_entries` on the first repeated key and
    /// `C::missing_enum_entries` if the result lacks any key.
    #[track_caller]
    pub fn create_with_all_entries<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
    {
        let location = Location::caller();
        let mut output = Self::new();
        for (key, value) in pairs {
            if !output.insert_at(key.ordinal(), value) {
                C::duplicate_enum_entries(location);
            }
        }
        if output.len != K::COUNT {
            C::missing_enum_entries(location);
        }
        output
    }
}

impl<K: EnumKey, V, C> Drop for EnumMap<K, V, C> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<K: EnumKey, V, C> Default for EnumMap<K, V, C> {
    fn default() -> Self {
        debug_assert!(
            has_contiguous_ordinals::<K>(),
            "key domain ordinals must be 0..COUNT in VALUES order"
        );
        Self::new()
    }
}

/// Clones occupied slots only.
impl<K: EnumKey, V: Clone, C> Clone for EnumMap<K, V, C> {
    fn clone(&self) -> Self {
        let mut output = Self::new();
        for i in self.occupied_ordinals() {
            // SAFETY: `i` comes from the occupancy bitmap.
            output.construct_at(i, unsafe { self.unchecked_ref(i) }.clone());
        }
        output
    }

    fn clone_from(&mut self, source: &Self) {
        self.clear();
        for i in source.occupied_ordinals() {
            // SAFETY: `i` comes from the occupancy bitmap of `source`.
            self.construct_at(i, unsafe { source.unchecked_ref(i) }.clone());
        }
    }
}

impl<K: EnumKey, V: PartialEq, C, C2> PartialEq<EnumMap<K, V, C2>> for EnumMap<K, V, C> {
    fn eq(&self, other: &EnumMap<K, V, C2>) -> bool {
        self.occupancy == other.occupancy
            && self.occupied_ordinals().all(|i| {
                // SAFETY: both maps have slot `i` occupied.
                unsafe { self.unchecked_ref(i) == other.unchecked_ref(i) }
            })
    }
}

impl<K: EnumKey, V: Eq, C> Eq for EnumMap<K, V, C> {}

impl<K: EnumKey, V: Hash, C> Hash for EnumMap<K, V, C> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.len.hash(state);
        for i in self.occupied_ordinals() {
            i.hash(state);
            // SAFETY: `i` comes from the occupancy bitmap.
            unsafe { self.unchecked_ref(i) }.hash(state);
        }
    }
}

impl<K: EnumKey + Debug, V: Debug, C> Debug for EnumMap<K, V, C> {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K: EnumKey, V, C: EnumMapChecking> Index<K> for EnumMap<K, V, C> {
    type Output = V;

    #[track_caller]
    fn index(&self, key: K) -> &V {
        self.at(key)
    }
}

/// Collects with [`insert`](EnumMap::insert) semantics: the first value seen
/// for a key wins.
impl<K: EnumKey, V, C> FromIterator<(K, V)> for EnumMap<K, V, C> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        map.insert_all(iter);
        map
    }
}

impl<K: EnumKey, V, C> Extend<(K, V)> for EnumMap<K, V, C> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        self.insert_all(iter);
    }
}

impl<'a, K: EnumKey, V, C> IntoIterator for &'a EnumMap<K, V, C> {
    type Item = (K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, K: EnumKey, V, C> IntoIterator for &'a mut EnumMap<K, V, C> {
    type Item = (K, &'a mut V);
    type IntoIter = IterMut<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

impl<K: EnumKey, V, C> IntoIterator for EnumMap<K, V, C> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V, C>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter::new(self)
    }
}

impl<'a, K: EnumKey, V, D: Direction> From<BidirectionalIterator<EntriesMut<'a, K, V>, D>>
    for BidirectionalIterator<Entries<'a, K, V>, D>
{
    fn from(iterator: BidirectionalIterator<EntriesMut<'a, K, V>, D>) -> Self {
        iterator.into_const()
    }
}

/// Removes every entry of `map` for which `predicate` returns `true`.
/// Returns the number of removed entries.
///
/// # Examples
/// ```
/// use enum_map_fixed::{EnumMap, erase_if};
///
/// let mut map = EnumMap::<bool, u8>::create_with_all_entries([(false, 1), (true, 2)]);
/// assert_eq!(erase_if(&mut map, |_, value| *value > 1), 1);
/// assert!(!map.contains(true));
/// ```
pub fn erase_if<K, V, C, F>(map: &mut EnumMap<K, V, C>, mut predicate: F) -> usize
where
    K: EnumKey,
    F: FnMut(K, &V) -> bool,
{
    let before = map.len();
    map.retain(|key, value| !predicate(key, value));
    before - map.len()
}
