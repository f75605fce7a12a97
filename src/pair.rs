use core::fmt::{Debug, Formatter};
use core::marker::PhantomData;
use core::ptr::NonNull;

use crate::bitmap::Occupancy;
use crate::dense::{IndexPredicate, IndexedProvider, MutableIndexedProvider};
use crate::iterator::ReferenceOwnership;
use crate::key::EnumKey;
use crate::slot::ValueSlot;

/// Accepts exactly the occupied ordinals of a map.
pub struct Occupied<'a, O>(pub(crate) &'a O);

impl<O> Clone for Occupied<'_, O> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<O> Copy for Occupied<'_, O> {}

impl<O: Debug> Debug for Occupied<'_, O> {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        f.debug_tuple("Occupied").field(self.0).finish()
    }
}

impl<O: Occupancy> IndexPredicate for Occupied<'_, O> {
    #[inline]
    fn test(&self, i: usize) -> bool {
        self.0.contains(i)
    }

    #[inline]
    fn next_match(&self, from: usize, end: usize) -> usize {
        match self.0.next_occupied(from) {
            Some(i) if i < end => i,
            _ => end,
        }
    }

    #[inline]
    fn prev_match(&self, before: usize) -> Option<usize> {
        self.0.prev_occupied(before)
    }
}

#[cold]
#[track_caller]
fn vacant_position(index: usize) -> ! {
    panic!("no live entry at position {index}")
}

/// Read-only key/value provider over the backing arrays of an
/// [`EnumMap`](crate::EnumMap).
///
/// Yields `(K, &V)` pairs synthesized on every call.
pub struct PairProvider<'a, K: EnumKey, V> {
    values: &'a [ValueSlot<V>],
    occupancy: &'a K::Occupancy,
    index: usize,
}

impl<'a, K: EnumKey, V> PairProvider<'a, K, V> {
    #[inline]
    pub(crate) fn new(values: &'a [ValueSlot<V>], occupancy: &'a K::Occupancy) -> Self {
        Self {
            values,
            occupancy,
            index: 0,
        }
    }
}

impl<K: EnumKey, V> Clone for PairProvider<'_, K, V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K: EnumKey, V> Copy for PairProvider<'_, K, V> {}

impl<K: EnumKey, V> Debug for PairProvider<'_, K, V> {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("PairProvider")
            .field("index", &self.index)
            .finish_non_exhaustive()
    }
}

impl<'a, K: EnumKey, V> IndexedProvider for PairProvider<'a, K, V> {
    type Reference<'r>
        = (K, &'a V)
    where
        Self: 'r;

    const OWNERSHIP: ReferenceOwnership = ReferenceOwnership::IteratorOwned;

    #[inline]
    fn seek(&mut self, i: usize) {
        self.index = i;
    }

    #[inline]
    #[track_caller]
    fn get(&mut self) -> Self::Reference<'_> {
        let index = self.index;
        if !self.occupancy.contains(index) {
            vacant_position(index);
        }
        let values: &'a [ValueSlot<V>] = self.values;
        // SAFETY: the occupancy bit for `index` is set, so the slot holds a
        // constructed value.
        let value = unsafe { values[index].assume_init_ref() };
        (K::VALUES[index], value)
    }
}

/// Mutable key/value provider over the backing arrays of an
/// [`EnumMap`](crate::EnumMap).
///
/// Yields `(K, &mut V)` pairs borrowed from the provider itself, so at most
/// one mutable reference per provider is live at a time.
pub struct PairProviderMut<'a, K: EnumKey, V> {
    values: NonNull<ValueSlot<V>>,
    len: usize,
    occupancy: &'a K::Occupancy,
    index: usize,
    _values: PhantomData<&'a mut [ValueSlot<V>]>,
}

impl<'a, K: EnumKey, V> PairProviderMut<'a, K, V> {
    #[inline]
    pub(crate) fn new(values: &'a mut [ValueSlot<V>], occupancy: &'a K::Occupancy) -> Self {
        Self {
            len: values.len(),
            values: NonNull::from(values).cast(),
            occupancy,
            index: 0,
            _values: PhantomData,
        }
    }

    /// Second handle onto the same storage.
    ///
    /// # Safety
    /// The two handles must never hand out references to the same index at
    /// the same time.
    #[inline]
    pub(crate) unsafe fn alias(&self) -> Self {
        Self {
            values: self.values,
            len: self.len,
            occupancy: self.occupancy,
            index: self.index,
            _values: PhantomData,
        }
    }
}

// SAFETY: the provider behaves like `&'a mut [ValueSlot<V>]` plus
// `&'a K::Occupancy`.
unsafe impl<K: EnumKey, V: Send> Send for PairProviderMut<'_, K, V> where K::Occupancy: Sync {}

// SAFETY: as above; shared access to the provider hands out nothing mutable.
unsafe impl<K: EnumKey, V: Sync> Sync for PairProviderMut<'_, K, V> where K::Occupancy: Sync {}

impl<K: EnumKey, V> Debug for PairProviderMut<'_, K, V> {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("PairProviderMut")
            .field("index", &self.index)
            .finish_non_exhaustive()
    }
}

impl<'a, K: EnumKey, V> IndexedProvider for PairProviderMut<'a, K, V> {
    type Reference<'r>
        = (K, &'r mut V)
    where
        Self: 'r;

    const OWNERSHIP: ReferenceOwnership = ReferenceOwnership::IteratorOwned;

    #[inline]
    fn seek(&mut self, i: usize) {
        self.index = i;
    }

    #[inline]
    #[track_caller]
    fn get(&mut self) -> Self::Reference<'_> {
        let index = self.index;
        if index >= self.len || !self.occupancy.contains(index) {
            vacant_position(index);
        }
        // SAFETY: `index < len` keeps the pointer inside the slot array this
        // provider exclusively borrows for `'a`; the occupancy bit says the
        // slot is constructed, and the returned reference borrows `self`.
        let value = unsafe { (*self.values.as_ptr().add(index)).assume_init_mut() };
        (K::VALUES[index], value)
    }
}

impl<'a, K: EnumKey, V> MutableIndexedProvider for PairProviderMut<'a, K, V> {
    type Const = PairProvider<'a, K, V>;

    #[inline]
    fn into_const(self) -> Self::Const {
        // SAFETY: `self` was the exclusive borrow of these `len` slots for
        // `'a` and is consumed here, so downgrading to a shared slice is sound.
        let values = unsafe { core::slice::from_raw_parts(self.values.as_ptr(), self.len) };
        PairProvider {
            values,
            occupancy: self.occupancy,
            index: self.index,
        }
    }
}
