use core::fmt::{Debug, Formatter};
use core::iter::FusedIterator;

use crate::bitmap::Occupancy;
use crate::enum_map::{Cursor, CursorMut, EnumMap};
use crate::key::EnumKey;

/// Iterator over `(K, &V)` of an [`EnumMap`], created by
/// [`EnumMap::iter`].
///
/// Walks a pair of cursors towards each other.
pub struct Iter<'a, K: EnumKey, V> {
    front: Cursor<'a, K, V>,
    back: Cursor<'a, K, V>,
    remaining: usize,
}

impl<'a, K: EnumKey, V> Iter<'a, K, V> {
    pub(crate) fn new(front: Cursor<'a, K, V>, back: Cursor<'a, K, V>, remaining: usize) -> Self {
        Self {
            front,
            back,
            remaining,
        }
    }
}

impl<K: EnumKey, V> Clone for Iter<'_, K, V> {
    fn clone(&self) -> Self {
        Self {
            front: self.front,
            back: self.back,
            remaining: self.remaining,
        }
    }
}

impl<K: EnumKey, V> Debug for Iter<'_, K, V> {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Iter")
            .field("front", &self.front.provider().index())
            .field("back", &self.back.provider().index())
            .field("remaining", &self.remaining)
            .finish()
    }
}

impl<'a, K: EnumKey, V> Iterator for Iter<'a, K, V> {
    type Item = (K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        if self.front == self.back {
            return None;
        }
        let item = self.front.get();
        self.front.increment();
        self.remaining -= 1;
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K: EnumKey, V> DoubleEndedIterator for Iter<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.front == self.back {
            return None;
        }
        self.back.decrement();
        self.remaining -= 1;
        Some(self.back.get())
    }
}

impl<K: EnumKey, V> ExactSizeIterator for Iter<'_, K, V> {}

impl<K: EnumKey, V> FusedIterator for Iter<'_, K, V> {}

/// Iterator over `(K, &mut V)` of an [`EnumMap`], created by
/// [`EnumMap::iter_mut`].
pub struct IterMut<'a, K: EnumKey, V> {
    front: CursorMut<'a, K, V>,
    back: CursorMut<'a, K, V>,
    remaining: usize,
}

impl<'a, K: EnumKey, V> IterMut<'a, K, V> {
    /// `front` and `back` must share storage and satisfy `front <= back`.
    pub(crate) fn new(
        front: CursorMut<'a, K, V>,
        back: CursorMut<'a, K, V>,
        remaining: usize,
    ) -> Self {
        Self {
            front,
            back,
            remaining,
        }
    }
}

impl<K: EnumKey, V> Debug for IterMut<'_, K, V> {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("IterMut")
            .field("front", &self.front.provider().index())
            .field("back", &self.back.provider().index())
            .field("remaining", &self.remaining)
            .finish()
    }
}

impl<'a, K: EnumKey, V> Iterator for IterMut<'a, K, V> {
    type Item = (K, &'a mut V);

    fn next(&mut self) -> Option<Self::Item> {
        if self.front == self.back {
            return None;
        }
        let (key, value) = self.front.get();
        let value: *mut V = value;
        self.front.increment();
        self.remaining -= 1;
        // SAFETY: the front cursor has moved past this index and the back
        // cursor never goes below the front, so no other reference to the
        // slot is handed out while the map stays borrowed for `'a`.
        Some((key, unsafe { &mut *value }))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K: EnumKey, V> DoubleEndedIterator for IterMut<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.front == self.back {
            return None;
        }
        self.back.decrement();
        self.remaining -= 1;
        let (key, value) = self.back.get();
        let value: *mut V = value;
        // SAFETY: the back cursor now sits at an index the front cursor has
        // not reached and will stop before, so this slot is yielded once.
        Some((key, unsafe { &mut *value }))
    }
}

impl<K: EnumKey, V> ExactSizeIterator for IterMut<'_, K, V> {}

impl<K: EnumKey, V> FusedIterator for IterMut<'_, K, V> {}

/// Owning iterator over `(K, V)` of an [`EnumMap`].
///
/// Entries not yielded are dropped with the iterator.
pub struct IntoIter<K: EnumKey, V, C> {
    map: EnumMap<K, V, C>,
    front: usize,
    back: usize,
}

impl<K: EnumKey, V, C> IntoIter<K, V, C> {
    pub(crate) fn new(map: EnumMap<K, V, C>) -> Self {
        Self {
            map,
            front: 0,
            back: K::COUNT,
        }
    }
}

impl<K: EnumKey + Debug, V: Debug, C> Debug for IntoIter<K, V, C> {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        f.debug_tuple("IntoIter").field(&self.map).finish()
    }
}

impl<K: EnumKey, V, C> Iterator for IntoIter<K, V, C> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        let i = self
            .map
            .occupancy()
            .next_occupied(self.front)
            .filter(|&i| i < self.back)?;
        self.front = i + 1;
        Some(self.map.take_at(i))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.map.len(), Some(self.map.len()))
    }
}

impl<K: EnumKey, V, C> DoubleEndedIterator for IntoIter<K, V, C> {
    fn next_back(&mut self) -> Option<Self::Item> {
        let i = self
            .map
            .occupancy()
            .prev_occupied(self.back)
            .filter(|&i| i >= self.front)?;
        self.back = i;
        Some(self.map.take_at(i))
    }
}

impl<K: EnumKey, V, C> ExactSizeIterator for IntoIter<K, V, C> {}

impl<K: EnumKey, V, C> FusedIterator for IntoIter<K, V, C> {}
