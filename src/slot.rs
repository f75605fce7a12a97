use core::mem::MaybeUninit;

/// Storage for exactly one value, without a presence flag.
///
/// Whether the slot holds a constructed value is tracked elsewhere (by the
/// occupancy bitmap of the owning map). Dropping a `ValueSlot` never drops
/// its contents.
#[repr(transparent)]
pub struct ValueSlot<V>(MaybeUninit<V>);

impl<V> ValueSlot<V> {
    /// An unconstructed slot.
    pub const UNINIT: Self = Self(MaybeUninit::uninit());

    /// Constructs `value` in the slot and returns a reference to it.
    ///
    /// If the slot already held a value, that value is leaked, not dropped.
    #[inline]
    pub fn write(&mut self, value: V) -> &mut V {
        self.0.write(value)
    }

    /// Shared reference to the constructed value.
    ///
    /// # Safety
    /// The slot must hold a constructed value.
    #[inline]
    pub unsafe fn assume_init_ref(&self) -> &V {
        // SAFETY: guaranteed by the caller.
        unsafe { self.0.assume_init_ref() }
    }

    /// Mutable reference to the constructed value.
    ///
    /// # Safety
    /// The slot must hold a constructed value.
    #[inline]
    pub unsafe fn assume_init_mut(&mut self) -> &mut V {
        // SAFETY: guaranteed by the caller.
        unsafe { self.0.assume_init_mut() }
    }

    /// Moves the value out, leaving the slot logically unconstructed.
    ///
    /// # Safety
    /// The slot must hold a constructed value, and the caller must mark it
    /// vacant before it is read again.
    #[inline]
    pub unsafe fn assume_init_read(&self) -> V {
        // SAFETY: guaranteed by the caller.
        unsafe { self.0.assume_init_read() }
    }

    /// Drops the value in place.
    ///
    /// # Safety
    /// The slot must hold a constructed value, and the caller must mark it
    /// vacant afterwards.
    #[inline]
    pub unsafe fn assume_init_drop(&mut self) {
        // SAFETY: guaranteed by the caller.
        unsafe { self.0.assume_init_drop() }
    }
}

impl<V: Copy> Clone for ValueSlot<V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<V: Copy> Copy for ValueSlot<V> {}

mod sealed {
    pub trait Sealed {}
    impl<V, const N: usize> Sealed for [super::ValueSlot<V>; N] {}
}

/// A fixed-size array of [`ValueSlot`]s, one per key ordinal.
///
/// Implemented for `[ValueSlot<V>; N]` only; a key domain names its concrete
/// array type in [`EnumKey::Storage`](crate::EnumKey::Storage). Slots written
/// through `as_mut` must be the ones read through `as_ref`, so the trait is
/// sealed:
/// ```compile_fail
/// use enum_map_fixed::{SlotArray, ValueSlot};
///
/// struct Split([ValueSlot<u8>; 1], [ValueSlot<u8>; 1]);
///
/// impl AsRef<[ValueSlot<u8>]> for Split {
///     fn as_ref(&self) -> &[ValueSlot<u8>] {
///         &self.0
///     }
/// }
///
/// impl AsMut<[ValueSlot<u8>]> for Split {
///     fn as_mut(&mut self) -> &mut [ValueSlot<u8>] {
///         &mut self.1
///     }
/// }
///
/// impl SlotArray<u8> for Split {
///     const LEN: usize = 1;
///     const UNINIT: Self = Split([ValueSlot::UNINIT], [ValueSlot::UNINIT]);
///     fn bitwise_copy(&self) -> Self {
///         Split([ValueSlot::UNINIT], [ValueSlot::UNINIT])
///     }
/// }
/// ```
pub trait SlotArray<V>: sealed::Sealed + Sized + AsRef<[ValueSlot<V>]> + AsMut<[ValueSlot<V>]> {
    /// Number of slots.
    const LEN: usize;

    /// An array of unconstructed slots.
    const UNINIT: Self;

    /// Flat copy of every slot, constructed or not.
    fn bitwise_copy(&self) -> Self
    where
        V: Copy;
}

impl<V, const N: usize> SlotArray<V> for [ValueSlot<V>; N] {
    const LEN: usize = N;
    const UNINIT: Self = [const { ValueSlot::UNINIT }; N];

    #[inline]
    fn bitwise_copy(&self) -> Self
    where
        V: Copy,
    {
        *self
    }
}
