use crate::iterator::{MutableReferenceProvider, ReferenceOwnership, ReferenceProvider};

/// Position of a reverse iterator that has moved past the first index.
pub const BEFORE_BEGIN: usize = usize::MAX;

/// Decides which indices of a dense range hold an element.
pub trait IndexPredicate {
    /// Returns `true` if index `i` should be visited.
    fn test(&self, i: usize) -> bool;

    /// First matching index in `from..end`, or `end` if there is none.
    fn next_match(&self, from: usize, end: usize) -> usize {
        (from..end).find(|&i| self.test(i)).unwrap_or(end)
    }

    /// Last matching index in `0..before`.
    fn prev_match(&self, before: usize) -> Option<usize> {
        (0..before).rev().find(|&i| self.test(i))
    }
}

/// Yields the element at an index once positioned there with
/// [`seek`](IndexedProvider::seek).
pub trait IndexedProvider {
    /// What [`get`](Self::get) returns.
    type Reference<'r>
    where
        Self: 'r;

    /// Whether [`Reference`](Self::Reference) points into the container or
    /// is a per-call proxy.
    const OWNERSHIP: ReferenceOwnership;

    /// Positions the provider at index `i`.
    fn seek(&mut self, i: usize);

    /// The element at the last index passed to [`seek`](Self::seek).
    fn get(&mut self) -> Self::Reference<'_>;
}

/// Walks `0..end` visiting only the indices accepted by a predicate.
///
/// The position is a plain index: `end` is the past-the-end position and
/// [`BEFORE_BEGIN`] sits one before the first index. Neither can be
/// dereferenced.
///
/// Two `DenseSkip`s compare equal when their indices and end bounds match.
/// Comparing positions from different containers is meaningless.
#[derive(Debug, Clone, Copy)]
pub struct DenseSkip<F, P> {
    predicate: F,
    provider: P,
    index: usize,
    end: usize,
}

impl<F: IndexPredicate, P: IndexedProvider> DenseSkip<F, P> {
    /// Positions the iterator exactly at `index`, matching or not.
    ///
    /// # Panics
    /// Panics in debug builds if `index > end`.
    #[inline]
    pub fn at(predicate: F, provider: P, index: usize, end: usize) -> Self {
        debug_assert!(index <= end, "index {index} past end {end}");
        Self {
            predicate,
            provider,
            index,
            end,
        }
    }

    /// Positions the iterator at the first matching index `>= start`.
    #[inline]
    pub fn first_from(predicate: F, provider: P, start: usize, end: usize) -> Self {
        let index = if start < end {
            predicate.next_match(start, end)
        } else {
            end
        };
        Self::at(predicate, provider, index, end)
    }

    /// Current index.
    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Exclusive end bound.
    #[inline]
    pub fn end(&self) -> usize {
        self.end
    }

    /// Returns `true` at the past-the-end or before-begin position.
    #[inline]
    pub fn is_out_of_range(&self) -> bool {
        self.index >= self.end
    }
}

impl<F: IndexPredicate, P: IndexedProvider> ReferenceProvider for DenseSkip<F, P> {
    type Reference<'r>
        = P::Reference<'r>
    where
        Self: 'r;

    const OWNERSHIP: ReferenceOwnership = P::OWNERSHIP;

    fn advance(&mut self) {
        let from = self.index.wrapping_add(1);
        self.index = if from < self.end {
            self.predicate.next_match(from, self.end)
        } else {
            self.end
        };
    }

    fn recede(&mut self) {
        debug_assert_ne!(self.index, BEFORE_BEGIN, "receded past begin");
        let before = self.index.min(self.end);
        self.index = self.predicate.prev_match(before).unwrap_or(BEFORE_BEGIN);
    }

    fn get(&mut self) -> Self::Reference<'_> {
        self.provider.seek(self.index);
        self.provider.get()
    }
}

impl<F, G, P, Q> PartialEq<DenseSkip<G, Q>> for DenseSkip<F, P> {
    #[inline]
    fn eq(&self, other: &DenseSkip<G, Q>) -> bool {
        self.index == other.index && self.end == other.end
    }
}

impl<F, P> Eq for DenseSkip<F, P> {}

/// Conversion of an [`IndexedProvider`] to its read-only counterpart.
pub trait MutableIndexedProvider: IndexedProvider {
    /// The read-only provider over the same storage.
    type Const: IndexedProvider;

    /// Rewraps this provider.
    fn into_const(self) -> Self::Const;
}

impl<F, P> MutableReferenceProvider for DenseSkip<F, P>
where
    F: IndexPredicate,
    P: MutableIndexedProvider,
{
    type Const = DenseSkip<F, P::Const>;

    #[inline]
    fn into_const(self) -> Self::Const {
        DenseSkip {
            predicate: self.predicate,
            provider: self.provider.into_const(),
            index: self.index,
            end: self.end,
        }
    }
}
