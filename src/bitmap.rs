use core::fmt::{Debug, Formatter};

/// Computes the number of buckets needed to store `bit_count` occupancy bits.
///
/// Used in the `Occupancy` associated type of an [`EnumKey`] implementation,
/// inlined as a const expression into the type annotation generics.
///
/// # Examples
/// ```
/// use enum_map_fixed::bucket_count;
///
/// assert_eq!(bucket_count(3), 1);
/// assert_eq!(bucket_count(9), 2);
/// assert_eq!(bucket_count(17), 3);
/// ```
///
/// [`EnumKey`]: crate::EnumKey
pub const fn bucket_count(bit_count: usize) -> usize {
    bit_count.div_ceil(8)
}

pub(crate) const fn assert_const_params(bit_count: usize, buckets: usize) {
    assert!(
        bucket_count(bit_count) == buckets,
        "BUCKET_COUNT must match bucket_count(BIT_COUNT)."
    );
}

pub(crate) const fn ones_mask(start_bit: usize, width: usize) -> u8 {
    if width >= 8 {
        // shift would overflow on u8
        !0u8
    } else {
        (1u8 << width).wrapping_sub(1) << start_bit
    }
}

mod sealed {
    pub trait Sealed {}
    impl<const BIT_COUNT: usize, const BUCKET_COUNT: usize> Sealed
        for super::BitMap<BIT_COUNT, BUCKET_COUNT>
    {
    }
}

/// Records which ordinals of a key domain currently hold a live value.
///
/// Implemented by [`BitMap`] only; a key domain names its concrete bitmap
/// type in [`EnumKey::Occupancy`](crate::EnumKey::Occupancy). Map slots are
/// read on the word of this trait, so it is sealed:
/// ```compile_fail
/// use enum_map_fixed::Occupancy;
///
/// #[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// struct AlwaysFull;
///
/// impl Occupancy for AlwaysFull {
///     const EMPTY: Self = AlwaysFull;
///     const CAPACITY: usize = 2;
///     fn insert(&mut self, _: usize) {}
///     fn remove(&mut self, _: usize) {}
///     fn contains(&self, idx: usize) -> bool {
///         idx < 2
///     }
///     fn clear(&mut self) {}
///     fn count(&self) -> usize {
///         2
///     }
///     fn next_occupied(&self, from: usize) -> Option<usize> {
///         (from < 2).then_some(from)
///     }
///     fn prev_occupied(&self, before: usize) -> Option<usize> {
///         before.min(2).checked_sub(1)
///     }
/// }
/// ```
pub trait Occupancy: sealed::Sealed + Copy + Eq + Debug {
    /// A bitmap with every ordinal vacant.
    const EMPTY: Self;

    /// Number of ordinals tracked.
    const CAPACITY: usize;

    /// Marks `idx` as occupied.
    fn insert(&mut self, idx: usize);

    /// Marks `idx` as vacant.
    fn remove(&mut self, idx: usize);

    /// Returns `true` if `idx` is in range and occupied.
    fn contains(&self, idx: usize) -> bool;

    /// Marks every ordinal as vacant.
    fn clear(&mut self);

    /// Number of occupied ordinals.
    fn count(&self) -> usize;

    /// First occupied ordinal `>= from`.
    fn next_occupied(&self, from: usize) -> Option<usize>;

    /// Last occupied ordinal `< before`.
    fn prev_occupied(&self, before: usize) -> Option<usize>;
}

/// Fixed-size bitmap backing the occupancy of an [`EnumMap`](crate::EnumMap).
///
/// `BIT_COUNT` is the number of usable bits, one per key ordinal.
/// `BUCKET_COUNT` is the number of internal buckets and should only be set
/// via const expression with [`bucket_count`].
///
/// Internally stores bits in an array of `u8`. Bits past `BIT_COUNT` in the
/// last bucket are always zero.
#[derive(PartialEq, Eq, Hash, Clone, Copy)]
pub struct BitMap<const BIT_COUNT: usize, const BUCKET_COUNT: usize>(pub(crate) [u8; BUCKET_COUNT]);

impl<const BIT_COUNT: usize, const BUCKET_COUNT: usize> BitMap<BIT_COUNT, BUCKET_COUNT> {
    /// Creates a new bitmap with all bits unset.
    ///
    /// Callable in compile-time contexts.
    ///
    /// # Panics
    /// Panics (or fails const evaluation) if
    /// `BUCKET_COUNT != bucket_count(BIT_COUNT)`.
    ///
    /// # Examples
    /// ```
    /// use enum_map_fixed::{BitMap, bucket_count};
    ///
    /// const EMPTY: BitMap<12, { bucket_count(12) }> = BitMap::new();
    /// assert_eq!(EMPTY.popcount(), 0);
    /// ```
    pub const fn new() -> Self {
        assert_const_params(BIT_COUNT, BUCKET_COUNT);
        Self([0u8; BUCKET_COUNT])
    }

    /// Sets the bit at the given index.
    ///
    /// # Panics
    /// Panics if the index is out of bounds (i.e., `>= BIT_COUNT`).
    #[inline]
    pub fn set(&mut self, idx: usize) {
        assert!(idx < BIT_COUNT, "Bit index {idx} out of bounds");
        let (group_idx, item_idx) = Self::idxs(idx);
        self.0[group_idx] |= 1 << item_idx;
    }

    /// Unsets the bit at the given index.
    ///
    /// # Panics
    /// Panics if `idx >= BIT_COUNT`.
    #[inline]
    pub fn unset(&mut self, idx: usize) {
        assert!(idx < BIT_COUNT, "Bit index {idx} out of bounds");
        let (group_idx, item_idx) = Self::idxs(idx);
        self.0[group_idx] &= !(1 << item_idx);
    }

    /// Returns `true` if the bit at the given index is set.
    ///
    /// # Panics
    /// Panics if `idx >= BIT_COUNT`.
    ///
    /// # Examples
    /// ```
    /// use enum_map_fixed::{BitMap, bucket_count};
    ///
    /// let mut bm = BitMap::<8, { bucket_count(8) }>::new();
    /// bm.set(2);
    /// assert!(bm.is_set(2));
    /// assert!(!bm.is_set(3));
    /// ```
    #[inline]
    pub fn is_set(&self, idx: usize) -> bool {
        assert!(idx < BIT_COUNT, "Bit index {idx} out of bounds");
        let (group_idx, item_idx) = Self::idxs(idx);
        self.0[group_idx] & 1 << item_idx != 0
    }

    #[inline]
    fn idxs(idx: usize) -> (usize, usize) {
        (idx / 8, idx % 8)
    }

    /// Unsets every bit.
    #[inline]
    pub fn clear(&mut self) {
        self.0.fill(0);
    }

    /// Counts the number of set bits.
    #[inline]
    pub fn popcount(&self) -> usize {
        self.0.iter().map(|b| b.count_ones() as usize).sum()
    }

    /// Returns the index of the first set bit at or after `from`.
    ///
    /// Returns `None` if no such bit exists, including when
    /// `from >= BIT_COUNT`.
    ///
    /// # Examples
    /// ```
    /// use enum_map_fixed::{BitMap, bucket_count};
    ///
    /// let mut bm = BitMap::<20, { bucket_count(20) }>::new();
    /// bm.set(3);
    /// bm.set(17);
    /// assert_eq!(bm.next_set_bit(0), Some(3));
    /// assert_eq!(bm.next_set_bit(4), Some(17));
    /// assert_eq!(bm.next_set_bit(18), None);
    /// ```
    pub fn next_set_bit(&self, from: usize) -> Option<usize> {
        if from >= BIT_COUNT {
            return None;
        }
        let (mut byte_idx, bit_idx) = Self::idxs(from);
        let mut current = self.0[byte_idx] & (!0u8 << bit_idx);
        loop {
            if current != 0 {
                let idx = byte_idx * 8 + current.trailing_zeros() as usize;
                return (idx < BIT_COUNT).then_some(idx);
            }
            byte_idx += 1;
            if byte_idx >= BUCKET_COUNT {
                return None;
            }
            current = self.0[byte_idx];
        }
    }

    /// Returns the index of the last set bit strictly before `before`.
    ///
    /// `before` values past `BIT_COUNT` are clamped, so
    /// `prev_set_bit(usize::MAX)` finds the last set bit overall.
    ///
    /// # Examples
    /// ```
    /// use enum_map_fixed::{BitMap, bucket_count};
    ///
    /// let mut bm = BitMap::<20, { bucket_count(20) }>::new();
    /// bm.set(3);
    /// bm.set(17);
    /// assert_eq!(bm.prev_set_bit(20), Some(17));
    /// assert_eq!(bm.prev_set_bit(17), Some(3));
    /// assert_eq!(bm.prev_set_bit(3), None);
    /// ```
    pub fn prev_set_bit(&self, before: usize) -> Option<usize> {
        let before = before.min(BIT_COUNT);
        if before == 0 {
            return None;
        }
        let (mut byte_idx, bit_idx) = Self::idxs(before - 1);
        let mut current = self.0[byte_idx] & ones_mask(0, bit_idx + 1);
        loop {
            if current != 0 {
                return Some(byte_idx * 8 + 7 - current.leading_zeros() as usize);
            }
            if byte_idx == 0 {
                return None;
            }
            byte_idx -= 1;
            current = self.0[byte_idx];
        }
    }
}

impl<const BIT_COUNT: usize, const BUCKET_COUNT: usize> Default
    for BitMap<BIT_COUNT, BUCKET_COUNT>
{
    fn default() -> Self {
        Self::new()
    }
}

impl<const BIT_COUNT: usize, const BUCKET_COUNT: usize> Occupancy
    for BitMap<BIT_COUNT, BUCKET_COUNT>
{
    const EMPTY: Self = Self::new();
    const CAPACITY: usize = BIT_COUNT;

    #[inline]
    fn insert(&mut self, idx: usize) {
        self.set(idx);
    }

    #[inline]
    fn remove(&mut self, idx: usize) {
        self.unset(idx);
    }

    #[inline]
    fn contains(&self, idx: usize) -> bool {
        idx < BIT_COUNT && self.is_set(idx)
    }

    #[inline]
    fn clear(&mut self) {
        BitMap::clear(self);
    }

    #[inline]
    fn count(&self) -> usize {
        self.popcount()
    }

    #[inline]
    fn next_occupied(&self, from: usize) -> Option<usize> {
        self.next_set_bit(from)
    }

    #[inline]
    fn prev_occupied(&self, before: usize) -> Option<usize> {
        self.prev_set_bit(before)
    }
}

impl<const BIT_COUNT: usize, const BUCKET_COUNT: usize> Debug for BitMap<BIT_COUNT, BUCKET_COUNT> {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        write!(f, "LSB -> ")?;
        for i in 0..BIT_COUNT {
            if i % 8 == 0 {
                write!(f, "{i}: ")?;
            }
            write!(f, "{}", if self.is_set(i) { '1' } else { '0' })?;
            if i % 8 == 7 && i < BIT_COUNT - 1 {
                write!(f, " ")?;
            }
        }
        write!(f, " <- MSB")?;
        Ok(())
    }
}
