use crate::bitmap::{BitMap, Occupancy};
use crate::slot::{SlotArray, ValueSlot};

/// A finite key domain whose members map one-to-one onto `0..COUNT`.
///
/// The ordinal of a key addresses its slot in an [`EnumMap`](crate::EnumMap)
/// directly, so the mapping must be total and stable: `VALUES[i].ordinal()`
/// must equal `i` for every `i < COUNT`.
///
/// The domain also names the fixed-size backing arrays sized to `COUNT`.
/// Implement it with [`enum_key!`](crate::enum_key) rather than by hand.
///
/// # Examples
/// ```
/// use enum_map_fixed::{EnumKey, enum_key};
///
/// enum_key! {
///     #[derive(Debug, Clone, Copy, PartialEq, Eq)]
///     pub enum Color {
///         Red,
///         Green,
///         Blue,
///     }
/// }
///
/// assert_eq!(Color::COUNT, 3);
/// assert_eq!(Color::Blue.ordinal(), 2);
/// assert_eq!(Color::VALUES, &[Color::Red, Color::Green, Color::Blue]);
/// ```
pub trait EnumKey: Copy + 'static {
    /// Number of keys in the domain.
    const COUNT: usize;

    /// Every key in ordinal order.
    const VALUES: &'static [Self];

    /// Value slot array holding exactly `COUNT` slots.
    type Storage<V>: SlotArray<V>;

    /// Occupancy bitmap tracking exactly `COUNT` ordinals.
    type Occupancy: Occupancy;

    /// Dense index of this key in `0..COUNT`.
    fn ordinal(&self) -> usize;
}

/// Returns `true` if `K` has zero-based, contiguous ordinals listed in
/// ordinal order and its storage types are sized to `K::COUNT`.
///
/// # Examples
/// ```
/// use enum_map_fixed::has_contiguous_ordinals;
///
/// assert!(has_contiguous_ordinals::<bool>());
/// ```
pub fn has_contiguous_ordinals<K: EnumKey>() -> bool {
    K::VALUES.len() == K::COUNT
        && <K::Storage<()> as SlotArray<()>>::LEN == K::COUNT
        && <K::Occupancy as Occupancy>::CAPACITY == K::COUNT
        && K::VALUES.iter().enumerate().all(|(i, key)| key.ordinal() == i)
}

impl EnumKey for bool {
    const COUNT: usize = 2;
    const VALUES: &'static [Self] = &[false, true];

    type Storage<V> = [ValueSlot<V>; 2];
    type Occupancy = BitMap<2, { crate::bucket_count(2) }>;

    #[inline]
    fn ordinal(&self) -> usize {
        *self as usize
    }
}

/// Declares a fieldless enum and implements [`EnumKey`] for it.
///
/// Ordinals follow declaration order. Attributes on the enum and on each
/// variant are passed through; explicit discriminants are not supported.
///
/// # Examples
/// ```
/// use enum_map_fixed::{EnumKey, EnumMap, enum_key};
///
/// enum_key! {
///     #[derive(Debug, Clone, Copy, PartialEq, Eq)]
///     enum Direction {
///         North,
///         East,
///         South,
///         West,
///     }
/// }
///
/// let mut headings: EnumMap<Direction, u16> = EnumMap::new();
/// headings.insert(Direction::East, 90);
/// assert_eq!(headings.at(Direction::East), &90);
/// assert_eq!(EnumMap::<Direction, u16>::max_size(), 4);
/// ```
#[macro_export]
macro_rules! enum_key {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $($(#[$variant_meta:meta])* $variant:ident),* $(,)?
        }
    ) => {
        $(#[$meta])*
        $vis enum $name {
            $($(#[$variant_meta])* $variant),*
        }

        impl $crate::EnumKey for $name {
            const COUNT: usize = $crate::__enum_key_count!($($variant)*);
            const VALUES: &'static [Self] = &[$($name::$variant),*];

            type Storage<V> = [$crate::ValueSlot<V>; $crate::__enum_key_count!($($variant)*)];
            type Occupancy = $crate::BitMap<
                { $crate::__enum_key_count!($($variant)*) },
                { $crate::bucket_count($crate::__enum_key_count!($($variant)*)) },
            >;

            #[inline]
            fn ordinal(&self) -> usize {
                *self as usize
            }
        }
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __enum_key_count {
    ($($variant:ident)*) => {
        0usize $(+ $crate::__enum_key_one!($variant))*
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __enum_key_one {
    ($variant:ident) => {
        1usize
    };
}
