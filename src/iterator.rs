use core::fmt::{Debug, Formatter};
use core::marker::PhantomData;

/// Who owns the value a [`ReferenceProvider`] hands out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceOwnership {
    /// The provider returns a reference into storage owned by the container.
    CollectionOwned,
    /// The provider synthesizes a fresh proxy (e.g. a key/value tuple) on
    /// every call.
    IteratorOwned,
}

/// Yields the element at a position and moves between adjacent positions.
///
/// Providers are direction-agnostic: [`BidirectionalIterator`] decides
/// whether `advance` or `recede` is called.
pub trait ReferenceProvider {
    /// What [`get`](Self::get) returns.
    type Reference<'r>
    where
        Self: 'r;

    /// Whether [`Reference`](Self::Reference) points into the container or
    /// is a per-call proxy.
    const OWNERSHIP: ReferenceOwnership;

    /// Moves to the next position.
    fn advance(&mut self);

    /// Moves to the previous position.
    fn recede(&mut self);

    /// The element at the current position.
    fn get(&mut self) -> Self::Reference<'_>;
}

/// A provider that yields mutable references and can be downgraded to its
/// read-only counterpart.
pub trait MutableReferenceProvider: ReferenceProvider {
    /// The read-only provider over the same storage.
    type Const: ReferenceProvider;

    /// Rewraps this provider, keeping its position.
    fn into_const(self) -> Self::Const;
}

mod sealed {
    pub trait Sealed {}
    impl Sealed for super::Forward {}
    impl Sealed for super::Reverse {}
}

/// Iteration direction of a [`BidirectionalIterator`].
pub trait Direction: sealed::Sealed {
    /// `true` for [`Reverse`].
    const REVERSE: bool;
}

/// Walks positions in ascending order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Forward;

/// Walks positions in descending order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Reverse;

impl Direction for Forward {
    const REVERSE: bool = false;
}

impl Direction for Reverse {
    const REVERSE: bool = true;
}

/// Cursor-style bidirectional iterator built from a [`ReferenceProvider`].
///
/// One type covers every combination of direction (`D`) and constness (the
/// provider type), for every container that supplies a provider.
///
/// A reverse iterator is constructed one step behind its provider's
/// position, so a reverse iterator built at `end` dereferences the last
/// element. [`base`](BidirectionalIterator::base) undoes that offset.
///
/// The postfix steps ([`post_increment`](Self::post_increment),
/// [`post_decrement`](Self::post_decrement)) need a `Clone` provider, so only
/// read-only cursors have them. Two live copies of a mutable cursor could
/// hand out aliasing `&mut` references; mutable cursors use the prefix
/// steps and [`get`](Self::get) in between.
pub struct BidirectionalIterator<P, D> {
    provider: P,
    _direction: PhantomData<D>,
}

impl<P: Clone, D> Clone for BidirectionalIterator<P, D> {
    fn clone(&self) -> Self {
        Self {
            provider: self.provider.clone(),
            _direction: PhantomData,
        }
    }
}

impl<P: Copy, D> Copy for BidirectionalIterator<P, D> {}

impl<P: Debug, D: Direction> Debug for BidirectionalIterator<P, D> {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("BidirectionalIterator")
            .field("provider", &self.provider)
            .field("reverse", &D::REVERSE)
            .finish()
    }
}

impl<P: ReferenceProvider, D: Direction> BidirectionalIterator<P, D> {
    /// Wraps `provider`. For [`Reverse`] iterators this steps back once.
    #[inline]
    pub fn new(provider: P) -> Self {
        let mut iterator = Self::from_provider(provider);
        if D::REVERSE {
            iterator.step_forward();
        }
        iterator
    }

    #[inline]
    pub(crate) fn from_provider(provider: P) -> Self {
        Self {
            provider,
            _direction: PhantomData,
        }
    }

    /// The element at the current position.
    #[inline]
    pub fn get(&mut self) -> P::Reference<'_> {
        self.provider.get()
    }

    /// Moves one element further in the iteration direction (prefix `++`).
    #[inline]
    pub fn increment(&mut self) -> &mut Self {
        self.step_forward();
        self
    }

    /// Moves one element back against the iteration direction (prefix `--`).
    #[inline]
    pub fn decrement(&mut self) -> &mut Self {
        self.step_backward();
        self
    }

    /// Moves forward, returning the iterator as it was before (postfix `++`).
    ///
    /// Not available on mutable cursors:
    /// ```compile_fail
    /// use enum_map_fixed::EnumMap;
    ///
    /// let mut map: EnumMap<bool, u8> = EnumMap::new();
    /// let mut cursor = map.begin_mut();
    /// let _ = cursor.post_increment();
    /// ```
    #[inline]
    pub fn post_increment(&mut self) -> Self
    where
        P: Clone,
    {
        let previous = self.clone();
        self.step_forward();
        previous
    }

    /// Moves back, returning the iterator as it was before (postfix `--`).
    #[inline]
    pub fn post_decrement(&mut self) -> Self
    where
        P: Clone,
    {
        let previous = self.clone();
        self.step_backward();
        previous
    }

    /// Whether [`get`](Self::get) returns container-owned references or
    /// per-call proxies.
    #[inline]
    pub const fn ownership() -> ReferenceOwnership {
        P::OWNERSHIP
    }

    /// The underlying provider.
    #[inline]
    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Converts a mutable iterator into the read-only iterator of the same
    /// direction.
    #[inline]
    pub fn into_const(self) -> BidirectionalIterator<P::Const, D>
    where
        P: MutableReferenceProvider,
    {
        BidirectionalIterator::from_provider(self.provider.into_const())
    }

    #[inline]
    fn step_forward(&mut self) {
        if D::REVERSE {
            self.provider.recede();
        } else {
            self.provider.advance();
        }
    }

    #[inline]
    fn step_backward(&mut self) {
        if D::REVERSE {
            self.provider.advance();
        } else {
            self.provider.recede();
        }
    }
}

impl<P: ReferenceProvider> BidirectionalIterator<P, Reverse> {
    /// The forward iterator positioned one past the current element.
    ///
    /// `rbegin().base() == end()` and `rend().base() == begin()`.
    ///
    /// Only reverse iterators have a base:
    /// ```compile_fail
    /// use enum_map_fixed::EnumMap;
    ///
    /// let map: EnumMap<bool, u8> = EnumMap::new();
    /// let _ = map.begin().base();
    /// ```
    #[inline]
    pub fn base(self) -> BidirectionalIterator<P, Forward> {
        let mut out = BidirectionalIterator::from_provider(self.provider);
        out.increment();
        out
    }
}

/// Compares positions only, so a mutable and a read-only iterator at the
/// same position are equal.
impl<P, Q, D> PartialEq<BidirectionalIterator<Q, D>> for BidirectionalIterator<P, D>
where
    P: PartialEq<Q>,
{
    #[inline]
    fn eq(&self, other: &BidirectionalIterator<Q, D>) -> bool {
        self.provider == other.provider
    }
}

impl<P: Eq, D> Eq for BidirectionalIterator<P, D> {}
