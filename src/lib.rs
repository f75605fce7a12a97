//! A fixed-capacity, allocation-free map keyed by a finite enum domain,
//! written in pure Rust.
//!
//! `no_std` (without the default `std` feature), no heap / `alloc`.
//!
//! [`EnumMap`] is the main struct in this library. Every key of the domain
//! owns one inline slot, addressed by the key's ordinal, plus one bit in an
//! occupancy [`BitMap`]. Lookup, insertion and removal are O(1); iteration
//! visits entries in ascending ordinal order.
//!
//! # Examples
//! ```
//! use enum_map_fixed::{EnumMap, enum_key};
//!
//! enum_key! {
//!     #[derive(Debug, Clone, Copy, PartialEq, Eq)]
//!     enum Color {
//!         Red,
//!         Green,
//!         Blue,
//!     }
//! }
//!
//! let mut map: EnumMap<Color, &str> = EnumMap::new();
//! map.insert(Color::Blue, "sky");
//! map.insert(Color::Red, "rose");
//!
//! assert_eq!(map.len(), 2);
//! assert_eq!(map[Color::Red], "rose");
//! assert_eq!(map.keys().collect::<Vec<_>>(), [Color::Red, Color::Blue]);
//! ```
//!
//! # Use Cases
//!
//! - Embedded development
//! - Lookup tables and per-state data indexed by a small enum
//! - Compile-time constant tables: [`EnumMap::new`] is a `const fn`
//!
//! # Features
//!
//! - `#![no_std]` compatible
//! - Key domains declared with [`enum_key!`] (or by implementing [`EnumKey`])
//! - Bidirectional cursors ([`Cursor`], [`CursorMut`], [`RevCursor`],
//!   [`RevCursorMut`]) built on one generic [`BidirectionalIterator`]
//! - Standard iterators: `iter()`, `iter_mut()`, `keys()`, `values()`,
//!   `values_mut()` and owned `into_iter()`
//! - Failure handling chosen per map type through [`EnumMapChecking`]:
//!   [`AbortChecking`] (default) or [`PanicChecking`]
//! - Fallible construction with [`EnumMapError`]
//! - Optional `log` feature: checking policies log before failing
//!
//! # Cargo features
//!
//! - `std` (default): [`AbortChecking`] aborts the process.
//! - `log`: failures are reported through the `log` crate.

#![deny(missing_docs)]
#![deny(unsafe_op_in_unsafe_fn)]
#![warn(clippy::undocumented_unsafe_blocks)]
#![cfg_attr(not(any(test, feature = "std")), no_std)]

mod bitmap;
mod builder;
mod checking;
mod dense;
mod entries;
mod enum_map;
mod iterator;
mod key;
mod pair;
mod slot;

pub use bitmap::{BitMap, Occupancy, bucket_count};
pub use builder::EnumMapBuilder;
pub use checking::{AbortChecking, EnumMapChecking, EnumMapError, PanicChecking};
pub use dense::{
    BEFORE_BEGIN, DenseSkip, IndexPredicate, IndexedProvider, MutableIndexedProvider,
};
pub use entries::{IntoIter, Iter, IterMut};
pub use enum_map::{
    Cursor, CursorMut, Entries, EntriesMut, EnumMap, RevCursor, RevCursorMut, erase_if,
};
pub use iterator::{
    BidirectionalIterator, Direction, Forward, MutableReferenceProvider, ReferenceOwnership,
    ReferenceProvider, Reverse,
};
pub use key::{EnumKey, has_contiguous_ordinals};
pub use pair::{Occupied, PairProvider, PairProviderMut};
pub use slot::{SlotArray, ValueSlot};

#[cfg(test)]
mod proptests;
#[cfg(test)]
mod tests;
