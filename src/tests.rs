use super::*;
use bitmap::{assert_const_params, ones_mask};
use core::cell::Cell;
use core::fmt::{self, Write};
use std::hash::{BuildHasher, RandomState};
use std::rc::Rc;

crate::enum_key! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
    enum Color {
        Red,
        Green,
        Blue,
    }
}

crate::enum_key! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Month {
        Jan,
        Feb,
        Mar,
        Apr,
        May,
        Jun,
        Jul,
        Aug,
        Sep,
        Oct,
        Nov,
        Dec,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Swapped {
    A,
    B,
}

impl EnumKey for Swapped {
    const COUNT: usize = 2;
    const VALUES: &'static [Self] = &[Swapped::B, Swapped::A];

    type Storage<V> = [ValueSlot<V>; 2];
    type Occupancy = BitMap<2, { bucket_count(2) }>;

    fn ordinal(&self) -> usize {
        *self as usize
    }
}

// Ordinals past the occupancy capacity; storage is wide enough to hold them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Wide {
    A,
    B,
}

impl EnumKey for Wide {
    const COUNT: usize = 2;
    const VALUES: &'static [Self] = &[Wide::A, Wide::B];

    type Storage<V> = [ValueSlot<V>; 4];
    type Occupancy = BitMap<2, { bucket_count(2) }>;

    fn ordinal(&self) -> usize {
        *self as usize + 2
    }
}

type ColorMap<V> = EnumMap<Color, V, PanicChecking>;

fn rgb() -> ColorMap<i32> {
    ColorMap::create_with_all_entries([(Color::Red, 1), (Color::Green, 2), (Color::Blue, 3)])
}

fn entries<K: EnumKey, V: Copy, C>(map: &EnumMap<K, V, C>) -> Vec<(K, V)> {
    map.iter().map(|(k, v)| (k, *v)).collect()
}

#[derive(Debug, Clone)]
struct Tracked {
    drops: Rc<Cell<usize>>,
    value: i32,
}

impl Tracked {
    fn new(drops: &Rc<Cell<usize>>, value: i32) -> Self {
        Self {
            drops: Rc::clone(drops),
            value,
        }
    }
}

impl Drop for Tracked {
    fn drop(&mut self) {
        self.drops.set(self.drops.get() + 1);
    }
}

// --- bitmap -----------------------------------------------------------------

#[test]
fn test_bucket_count_runtime() {
    assert_eq!(bucket_count(0), 0);
    assert_eq!(bucket_count(1), 1);
    assert_eq!(bucket_count(8), 1);
    assert_eq!(bucket_count(9), 2);
    assert_eq!(bucket_count(16), 2);
    assert_eq!(bucket_count(17), 3);
    assert_eq!(bucket_count(100), 13);
}

#[test]
fn test_new() {
    macro_rules! test_new_by_bit_count {
        ($($bit_count:expr),+ $(,)?) => {
            $(
                {
                    const BIT_COUNT: usize = $bit_count;
                    let bitmap = BitMap::<BIT_COUNT, {bucket_count(BIT_COUNT)}>::new();
                    assert_eq!(bitmap.popcount(), 0, "Failed for BIT_COUNT = {}", BIT_COUNT);
                    assert_eq!(bitmap.next_set_bit(0), None, "Failed for BIT_COUNT = {}", BIT_COUNT);
                    assert_eq!(bitmap, BitMap::default());
                }
            )+
        };
    }

    test_new_by_bit_count!(0, 1, 7, 8, 9, 17, 31, 32, 33, 129);
}

#[test]
#[should_panic(expected = "BUCKET_COUNT must match bucket_count(BIT_COUNT).")]
fn test_runtime_assert_bit_bucket_mismatch() {
    assert_const_params(45, 1);
}

#[test]
fn test_set_and_unset() {
    let mut bitmap = BitMap::<20, { bucket_count(20) }>::new();
    for idx in [0, 7, 8, 19] {
        bitmap.set(idx);
        assert!(bitmap.is_set(idx));
    }
    assert_eq!(bitmap.popcount(), 4);

    bitmap.unset(8);
    assert!(!bitmap.is_set(8));
    assert_eq!(bitmap.popcount(), 3);

    bitmap.clear();
    assert_eq!(bitmap.popcount(), 0);
}

#[test]
#[should_panic(expected = "Bit index 35 out of bounds")]
fn test_set_out_of_bounds() {
    let mut bitmap = BitMap::<35, { bucket_count(35) }>::new();
    bitmap.set(35);
}

#[test]
fn test_occupancy_contains_is_bounds_safe() {
    let mut bitmap = BitMap::<3, { bucket_count(3) }>::new();
    Occupancy::insert(&mut bitmap, 2);
    assert!(Occupancy::contains(&bitmap, 2));
    assert!(!Occupancy::contains(&bitmap, 3));
    assert!(!Occupancy::contains(&bitmap, usize::MAX));
    assert_eq!(Occupancy::count(&bitmap), 1);
    assert_eq!(<BitMap<3, 1> as Occupancy>::CAPACITY, 3);
}

#[test]
fn test_ones_mask() {
    assert_eq!(ones_mask(0, 0), 0b0000_0000);
    assert_eq!(ones_mask(0, 3), 0b0000_0111);
    assert_eq!(ones_mask(2, 3), 0b0001_1100);
    assert_eq!(ones_mask(0, 8), 0b1111_1111);
}

#[test]
fn test_next_and_prev_set_bit() {
    let mut bitmap = BitMap::<30, { bucket_count(30) }>::new();
    assert_eq!(bitmap.next_set_bit(0), None);
    assert_eq!(bitmap.prev_set_bit(30), None);

    for idx in [1, 8, 15, 29] {
        bitmap.set(idx);
    }

    assert_eq!(bitmap.next_set_bit(0), Some(1));
    assert_eq!(bitmap.next_set_bit(2), Some(8));
    assert_eq!(bitmap.next_set_bit(8), Some(8));
    assert_eq!(bitmap.next_set_bit(9), Some(15));
    assert_eq!(bitmap.next_set_bit(16), Some(29));
    assert_eq!(bitmap.next_set_bit(30), None);
    assert_eq!(bitmap.next_set_bit(usize::MAX), None);

    assert_eq!(bitmap.prev_set_bit(usize::MAX), Some(29));
    assert_eq!(bitmap.prev_set_bit(29), Some(15));
    assert_eq!(bitmap.prev_set_bit(15), Some(8));
    assert_eq!(bitmap.prev_set_bit(9), Some(8));
    assert_eq!(bitmap.prev_set_bit(8), Some(1));
    assert_eq!(bitmap.prev_set_bit(1), None);
    assert_eq!(bitmap.prev_set_bit(0), None);
}

struct Buffer<const N: usize> {
    buf: [u8; N],
    pos: usize,
}

impl<const N: usize> Buffer<N> {
    pub const fn new() -> Self {
        Self {
            buf: [0u8; N],
            pos: 0,
        }
    }

    pub fn as_str(&self) -> &str {
        core::str::from_utf8(&self.buf[..self.pos]).unwrap()
    }
}

impl<const N: usize> Write for Buffer<N> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        let bytes = s.as_bytes();
        self.buf[self.pos..self.pos + bytes.len()].copy_from_slice(bytes);
        self.pos += bytes.len();
        Ok(())
    }
}

#[test]
fn debug_format_is_correct() {
    const BIT_COUNT: usize = 9;
    let mut bitmap = BitMap::<BIT_COUNT, { bucket_count(BIT_COUNT) }>::new();
    for idx in [0, 2, 7] {
        bitmap.set(idx);
    }

    let mut buf = Buffer::<128>::new();
    write!(&mut buf, "{:?}", bitmap).unwrap();

    assert_eq!(buf.as_str(), "LSB -> 0: 10100001 8: 0 <- MSB");
}

// --- key domain -------------------------------------------------------------

#[test]
fn test_enum_key_macro() {
    assert_eq!(Color::COUNT, 3);
    assert_eq!(Color::VALUES, &[Color::Red, Color::Green, Color::Blue]);
    assert_eq!(Color::Green.ordinal(), 1);
    assert!(has_contiguous_ordinals::<Color>());

    assert_eq!(Month::COUNT, 12);
    assert_eq!(Month::Dec.ordinal(), 11);
    assert!(has_contiguous_ordinals::<Month>());

    assert!(has_contiguous_ordinals::<bool>());
    assert_eq!(true.ordinal(), 1);
}

#[test]
fn test_out_of_order_domain_is_rejected() {
    assert!(!has_contiguous_ordinals::<Swapped>());
}

#[test]
#[should_panic(expected = "key domain ordinals must be 0..COUNT in VALUES order")]
fn test_default_checks_domain() {
    let _ = EnumMap::<Swapped, u8>::default();
}

// --- iterator engine ----------------------------------------------------------

#[derive(Debug, Clone, Copy)]
struct Even<'a>(&'a [i32]);

impl IndexPredicate for Even<'_> {
    fn test(&self, i: usize) -> bool {
        self.0[i] % 2 == 0
    }
}

#[derive(Debug, Clone, Copy)]
struct SliceProvider<'a> {
    items: &'a [i32],
    index: usize,
}

impl<'a> IndexedProvider for SliceProvider<'a> {
    type Reference<'r>
        = &'a i32
    where
        Self: 'r;

    const OWNERSHIP: ReferenceOwnership = ReferenceOwnership::CollectionOwned;

    fn seek(&mut self, i: usize) {
        self.index = i;
    }

    fn get(&mut self) -> Self::Reference<'_> {
        let items: &'a [i32] = self.items;
        &items[self.index]
    }
}

type Walk<'a, D> = BidirectionalIterator<DenseSkip<Even<'a>, SliceProvider<'a>>, D>;

const ITEMS: [i32; 6] = [1, 2, 4, 5, 7, 8];

fn skip_at(index: usize) -> DenseSkip<Even<'static>, SliceProvider<'static>> {
    let provider = SliceProvider {
        items: &ITEMS,
        index: 0,
    };
    DenseSkip::at(Even(&ITEMS), provider, index, ITEMS.len())
}

fn skip_first_from(start: usize) -> DenseSkip<Even<'static>, SliceProvider<'static>> {
    let provider = SliceProvider {
        items: &ITEMS,
        index: 0,
    };
    DenseSkip::first_from(Even(&ITEMS), provider, start, ITEMS.len())
}

#[test]
fn test_forward_walk_skips_rejected_indices() {
    let mut walk = Walk::<Forward>::new(skip_first_from(0));
    let mut seen = Vec::new();
    while !walk.provider().is_out_of_range() {
        seen.push(*walk.get());
        walk.increment();
    }
    assert_eq!(seen, [2, 4, 8]);
    assert_eq!(walk, Walk::<Forward>::new(skip_at(ITEMS.len())));
}

#[test]
fn test_reverse_walk_ends_before_begin() {
    let mut walk = Walk::<Reverse>::new(skip_at(ITEMS.len()));
    let mut seen = Vec::new();
    while !walk.provider().is_out_of_range() {
        seen.push(*walk.get());
        walk.increment();
    }
    assert_eq!(seen, [8, 4, 2]);
    assert_eq!(walk.provider().index(), BEFORE_BEGIN);
    assert_eq!(walk, Walk::<Reverse>::new(skip_at(0)));
}

#[test]
fn test_decrement_and_post_steps() {
    let mut walk = Walk::<Forward>::new(skip_at(ITEMS.len()));
    walk.decrement();
    assert_eq!(*walk.get(), 8);

    let mut previous = walk.post_decrement();
    assert_eq!(*previous.get(), 8);
    assert_eq!(*walk.get(), 4);

    let mut previous_again = walk.post_increment();
    assert_eq!(*previous_again.get(), 4);
    assert_eq!(*walk.get(), 8);
}

#[test]
fn test_base_of_reverse_walk() {
    let rbegin = Walk::<Reverse>::new(skip_at(ITEMS.len()));
    assert_eq!(rbegin.base(), Walk::<Forward>::new(skip_at(ITEMS.len())));

    let rend = Walk::<Reverse>::new(skip_at(0));
    assert_eq!(rend.base(), Walk::<Forward>::new(skip_first_from(0)));
}

#[test]
fn test_first_from_without_match() {
    assert_eq!(skip_first_from(3).index(), 5);

    let past_end = Walk::<Forward>::new(skip_first_from(ITEMS.len()));
    assert!(past_end.provider().is_out_of_range());
    assert_eq!(past_end.provider().index(), past_end.provider().end());
}

#[test]
fn test_reference_ownership() {
    assert_eq!(
        Walk::<'_, Forward>::ownership(),
        ReferenceOwnership::CollectionOwned
    );
    assert_eq!(Cursor::<'_, Color, i32>::ownership(), ReferenceOwnership::IteratorOwned);
    assert_eq!(
        RevCursorMut::<'_, Color, i32>::ownership(),
        ReferenceOwnership::IteratorOwned
    );
}

// --- map --------------------------------------------------------------------

#[test]
fn test_red_green_blue_scenario() {
    let mut map = rgb();
    assert_eq!(map.len(), 3);
    assert_eq!(map.at(Color::Green), &2);

    assert_eq!(map.erase(Color::Green), 1);
    assert_eq!(map.len(), 2);
    assert!(!map.contains(Color::Green));
    assert_eq!(entries(&map), [(Color::Red, 1), (Color::Blue, 3)]);

    map.insert_or_assign(Color::Red, 9);
    assert_eq!(map.at(Color::Red), &9);
    assert_eq!(map.len(), 2);
}

#[test]
fn test_never_inserted_key() {
    let mut map = ColorMap::<i32>::new();
    map.insert(Color::Blue, 3);
    assert!(!map.contains(Color::Red));
    assert_eq!(map.count(Color::Red), 0);
    assert_eq!(map.get(Color::Red), None);
    assert_eq!(map.find(Color::Red), map.end());
    assert_ne!(map.find(Color::Blue), map.end());
}

#[test]
fn test_insert_never_overwrites() {
    let mut map = ColorMap::<i32>::new();
    let (mut cursor, inserted) = map.insert(Color::Green, 1);
    assert!(inserted);
    assert_eq!(cursor.get(), (Color::Green, &mut 1));

    let (_, inserted) = map.insert(Color::Green, 2);
    assert!(!inserted);
    assert_eq!(map.at(Color::Green), &1);
    assert_eq!(map.len(), 1);
}

#[test]
fn test_insert_or_assign_keeps_size() {
    let mut map = ColorMap::<i32>::new();
    map.insert(Color::Red, 1);
    let (_, inserted) = map.insert_or_assign(Color::Red, 2);
    assert!(!inserted);
    assert_eq!(map[Color::Red], 2);
    assert_eq!(map.len(), 1);
}

#[test]
fn test_try_emplace_is_lazy() {
    let mut map = ColorMap::<i32>::new();
    let calls = Cell::new(0);
    let make = || {
        calls.set(calls.get() + 1);
        5
    };

    assert!(map.try_emplace(Color::Blue, make).1);
    assert!(!map.try_emplace(Color::Blue, make).1);
    assert_eq!(calls.get(), 1);
    assert_eq!(map[Color::Blue], 5);
}

#[test]
fn test_get_or_insert_default() {
    let mut map = ColorMap::<u32>::new();
    *map.get_or_insert_default(Color::Red) += 2;
    *map.get_or_insert_default(Color::Red) += 3;
    assert_eq!(map.get(Color::Red), Some(&5));
    assert_eq!(map.len(), 1);
}

#[test]
fn test_erase_present_and_absent() {
    let mut map = rgb();
    assert_eq!(map.erase(Color::Red), 1);
    assert_eq!(map.len(), 2);
    assert_eq!(map.erase(Color::Red), 0);
    assert_eq!(map.len(), 2);
}

#[test]
fn test_erase_at_returns_next_entry() {
    let mut map = rgb();
    let mut next = map.erase_at(Color::Green);
    assert_eq!(next.get().0, Color::Blue);

    let next = map.erase_at(Color::Blue);
    assert!(next.provider().is_out_of_range());
    assert_eq!(entries(&map), [(Color::Red, 1)]);
}

#[test]
fn test_erase_range() {
    let mut map: EnumMap<Month, u8> = Month::VALUES.iter().map(|&m| (m, m as u8)).collect();
    assert_eq!(map.erase_range(Month::Mar..Month::Jun), 3);
    assert_eq!(map.erase_range(Month::Mar..=Month::Jun), 1);
    assert!(map.contains(Month::Feb));
    assert!(map.contains(Month::Jul));
    assert_eq!(map.erase_range(Month::Oct..), 3);
    assert_eq!(map.erase_range(..), 5);
    assert!(map.is_empty());
}

#[test]
fn test_len_tracks_occupancy() {
    let mut map: EnumMap<Month, u8> = EnumMap::new();
    let check = |map: &EnumMap<Month, u8>| assert_eq!(map.occupancy().count(), map.len());

    for m in [Month::Jan, Month::Apr, Month::May, Month::Sep, Month::Dec] {
        map.insert(m, m as u8);
        check(&map);
    }
    map.insert(Month::Apr, 0);
    check(&map);
    map.insert_or_assign(Month::Feb, 1);
    check(&map);
    map.erase(Month::Jan);
    check(&map);
    map.erase(Month::Jan);
    check(&map);
    map.erase_at(Month::May);
    check(&map);
    assert_eq!(map.remove(Month::Sep), Some(Month::Sep as u8));
    check(&map);
    map.erase_range(Month::Feb..Month::Jun);
    check(&map);
    assert_eq!(map.len(), 1);
    map.clear();
    check(&map);
    assert_eq!(map.occupancy().count(), 0);
}

#[test]
fn test_erase_at_past_last_returns_end() {
    let mut map: EnumMap<Month, u8> = EnumMap::new();
    map.insert(Month::Jan, 1);
    map.insert(Month::Dec, 12);
    let next = map.erase_at(Month::Dec);
    assert!(next.provider().is_out_of_range());
    assert!(map.find(Month::Dec) == map.end());
    assert_eq!(map.len(), 1);
}

#[test]
#[should_panic(expected = "Bit index 3 out of bounds")]
fn test_ordinal_past_occupancy_panics() {
    let mut map: EnumMap<Wide, u8> = EnumMap::new();
    assert!(!map.contains(Wide::B));
    map.insert(Wide::B, 1);
}

#[test]
fn test_remove_and_remove_entry() {
    let mut map = rgb();
    assert_eq!(map.remove(Color::Red), Some(1));
    assert_eq!(map.remove(Color::Red), None);
    assert_eq!(map.remove_entry(Color::Blue), Some((Color::Blue, 3)));
    assert_eq!(map.len(), 1);
}

#[test]
fn test_retain_and_erase_if() {
    let mut map: EnumMap<Month, u8> = Month::VALUES.iter().map(|&m| (m, m as u8)).collect();
    map.retain(|_, value| {
        *value *= 10;
        *value % 20 == 0
    });
    assert_eq!(map.len(), 6);
    assert_eq!(map.get(Month::Mar), Some(&20));

    assert_eq!(erase_if(&mut map, |month, _| month.ordinal() > 5), 3);
    assert_eq!(
        map.keys().collect::<Vec<_>>(),
        [Month::Jan, Month::Mar, Month::May]
    );
}

#[test]
fn test_iteration_order() {
    let mut map: EnumMap<Month, u8> = EnumMap::new();
    for month in [Month::Nov, Month::Feb, Month::Sep, Month::Jan] {
        map.insert(month, month as u8);
    }

    assert_eq!(
        map.keys().collect::<Vec<_>>(),
        [Month::Jan, Month::Feb, Month::Sep, Month::Nov]
    );
    assert_eq!(
        map.keys().rev().collect::<Vec<_>>(),
        [Month::Nov, Month::Sep, Month::Feb, Month::Jan]
    );

    let mut cursor = map.rbegin();
    let rend = map.rend();
    let mut reversed = Vec::new();
    while cursor != rend {
        reversed.push(cursor.get().0);
        cursor.increment();
    }
    assert_eq!(reversed, [Month::Nov, Month::Sep, Month::Feb, Month::Jan]);
}

#[test]
fn test_double_ended_iter_meets_in_middle() {
    let map = rgb();
    let mut iter = map.iter();
    assert_eq!(iter.len(), 3);
    assert_eq!(iter.next(), Some((Color::Red, &1)));
    assert_eq!(iter.next_back(), Some((Color::Blue, &3)));
    assert_eq!(iter.len(), 1);
    assert_eq!(iter.next_back(), Some((Color::Green, &2)));
    assert_eq!(iter.next(), None);
    assert_eq!(iter.next_back(), None);
}

#[test]
fn test_iter_mut_and_values_mut() {
    let mut map = rgb();
    for (key, value) in &mut map {
        *value += key.ordinal() as i32 * 100;
    }
    assert_eq!(map.values().copied().collect::<Vec<_>>(), [1, 102, 203]);

    let mut iter = map.iter_mut();
    let (_, last) = iter.next_back().unwrap();
    let (_, first) = iter.next().unwrap();
    core::mem::swap(first, last);
    assert_eq!(iter.len(), 1);

    for value in map.values_mut() {
        *value = -*value;
    }
    assert_eq!(entries(&map), [(Color::Red, -203), (Color::Green, -102), (Color::Blue, -1)]);
}

#[test]
fn test_into_iter_both_ends() {
    let mut iter = rgb().into_iter();
    assert_eq!(iter.len(), 3);
    assert_eq!(iter.next_back(), Some((Color::Blue, 3)));
    assert_eq!(iter.next(), Some((Color::Red, 1)));
    assert_eq!(iter.next(), Some((Color::Green, 2)));
    assert_eq!(iter.next_back(), None);
}

#[test]
fn test_cursor_base_and_conversion() {
    let mut map = rgb();
    assert_eq!(map.rbegin().base(), map.end());
    assert_eq!(map.rend().base(), map.begin());

    let empty = ColorMap::<i32>::new();
    assert_eq!(empty.begin(), empty.end());
    assert_eq!(empty.rbegin(), empty.rend());

    let mut cursor = map.begin_mut();
    *cursor.get().1 = 10;
    cursor.increment();
    let mut cursor: Cursor<'_, Color, i32> = cursor.into();
    assert_eq!(cursor.get(), (Color::Green, &2));
    assert_eq!(map[Color::Red], 10);

    let mut last = map.rbegin_mut();
    *last.get().1 = 30;
    assert_eq!(map[Color::Blue], 30);
    assert_eq!(map.end_mut().provider().index(), Color::COUNT);
    assert_eq!(map.rend_mut().provider().index(), BEFORE_BEGIN);
}

#[test]
fn test_find_mut() {
    let mut map = rgb();
    let mut cursor = map.find_mut(Color::Blue);
    *cursor.get().1 = 33;
    assert_eq!(map[Color::Blue], 33);

    map.erase(Color::Blue);
    let cursor = map.find_mut(Color::Blue);
    assert!(cursor.provider().is_out_of_range());
}

#[test]
#[should_panic(expected = "no live entry at position 3")]
fn test_dereferencing_end_panics() {
    let map = rgb();
    let mut end = map.end();
    let _ = end.get();
}

#[test]
fn test_clear_then_reuse() {
    let mut map = rgb();
    map.clear();
    assert!(map.is_empty());
    assert_eq!(map.len(), 0);
    assert_eq!(map.begin(), map.end());

    assert!(map.insert(Color::Green, 7).1);
    assert_eq!(entries(&map), [(Color::Green, 7)]);
}

#[test]
fn test_create_with_all_entries() {
    let map = EnumMap::<Month, usize>::create_with_all_entries(
        Month::VALUES.iter().map(|&m| (m, m.ordinal())),
    );
    assert_eq!(map.len(), EnumMap::<Month, usize>::max_size());
}

#[test]
#[should_panic(expected = "missing enum entries")]
fn test_create_with_all_entries_missing() {
    let _ = ColorMap::create_with_all_entries([(Color::Red, 1), (Color::Blue, 3)]);
}

#[test]
#[should_panic(expected = "duplicate enum entries")]
fn test_create_with_all_entries_duplicate() {
    let _ = ColorMap::create_with_all_entries([
        (Color::Red, 1),
        (Color::Green, 2),
        (Color::Red, 3),
        (Color::Blue, 4),
    ]);
}

#[test]
fn test_try_create_with_all_entries() {
    let ok = ColorMap::try_create_with_all_entries([
        (Color::Blue, 3),
        (Color::Red, 1),
        (Color::Green, 2),
    ]);
    assert_eq!(ok, Ok(rgb()));

    let missing = ColorMap::<i32>::try_create_with_all_entries([(Color::Red, 1)]);
    assert_eq!(missing, Err(EnumMapError::MissingEnumEntries));

    let duplicate = ColorMap::try_create_with_all_entries([(Color::Red, 1), (Color::Red, 1)]);
    assert_eq!(duplicate, Err(EnumMapError::DuplicateEnumEntries));
}

#[test]
#[should_panic(expected = "no entry for key with ordinal 1 (map holds 0 entries)")]
fn test_at_missing_key() {
    let map = ColorMap::<i32>::new();
    let _ = map.at(Color::Green);
}

#[test]
#[should_panic(expected = "no entry for key with ordinal 2 (map holds 1 entries)")]
fn test_index_missing_key() {
    let mut map = ColorMap::<i32>::new();
    map.insert(Color::Red, 1);
    let _ = map[Color::Blue];
}

#[test]
fn test_create_with_keys() {
    let map = ColorMap::create_with_keys([Color::Green, Color::Blue], 4);
    assert_eq!(entries(&map), [(Color::Green, 4), (Color::Blue, 4)]);
}

#[test]
fn test_equality_ignores_insertion_order() {
    let mut forward = ColorMap::new();
    let mut backward: EnumMap<Color, i32> = EnumMap::new();
    for key in Color::VALUES {
        forward.insert(*key, key.ordinal() as i32);
    }
    for key in Color::VALUES.iter().rev() {
        backward.insert(*key, key.ordinal() as i32);
    }
    assert!(forward == backward);

    let hasher = RandomState::new();
    let rebuilt: ColorMap<i32> = backward.iter().map(|(k, v)| (k, *v)).collect();
    assert_eq!(hasher.hash_one(&forward), hasher.hash_one(&rebuilt));

    backward.insert_or_assign(Color::Red, 100);
    assert!(forward != backward);
}

#[test]
fn test_equality_compares_occupancy() {
    let mut a = ColorMap::new();
    let mut b = ColorMap::new();
    a.insert(Color::Red, 0);
    b.insert(Color::Green, 0);
    assert_ne!(a, b);
}

#[test]
fn test_copies_are_independent() {
    let original = rgb();

    let mut cloned = original.clone();
    let mut copied = original.copied();
    assert_eq!(cloned, original);
    assert_eq!(copied, original);

    cloned.insert_or_assign(Color::Red, 50);
    copied.erase(Color::Blue);
    assert_eq!(original, rgb());
    assert_eq!(cloned[Color::Red], 50);
    assert!(!copied.contains(Color::Blue));

    let mut target = ColorMap::create_with_keys([Color::Blue], 9);
    target.clone_from(&copied);
    assert_eq!(target, copied);
}

#[test]
fn test_take_leaves_empty_source() {
    let mut source = rgb();
    let moved = core::mem::take(&mut source);
    assert!(source.is_empty());
    assert_eq!(moved, rgb());

    let mut target = ColorMap::create_with_keys([Color::Red], 0);
    assert_eq!(target.len(), 1);
    target = core::mem::take(&mut source);
    assert!(target.is_empty());
}

#[test]
fn test_const_empty_map() {
    const EMPTY: EnumMap<Color, u8> = EnumMap::new();
    static TABLE: EnumMap<Month, u8> = EnumMap::new();
    assert!(EMPTY.is_empty());
    assert_eq!(TABLE.len(), 0);
    assert_eq!(EnumMap::<Color, u8>::max_size(), 3);
}

#[test]
fn test_from_iter_first_occurrence_wins() {
    let mut map: ColorMap<i32> = [(Color::Red, 1), (Color::Red, 2)].into_iter().collect();
    assert_eq!(map[Color::Red], 1);

    map.extend([(Color::Red, 3), (Color::Blue, 4)]);
    assert_eq!(entries(&map), [(Color::Red, 1), (Color::Blue, 4)]);
}

#[test]
fn test_builder() {
    let mut builder = EnumMapBuilder::<Color, i32, PanicChecking>::new()
        .insert(Color::Blue, 3)
        .insert_all([(Color::Red, 1), (Color::Blue, 30)]);
    assert_eq!(builder.len(), 2);

    let snapshot = builder.build_cloned();
    builder = builder.insert(Color::Green, 2);
    let map = builder.build();

    assert_eq!(entries(&snapshot), [(Color::Red, 1), (Color::Blue, 3)]);
    assert_eq!(map, rgb());
    assert!(ColorMap::<i32>::builder().is_empty());
}

#[test]
fn test_debug_format() {
    let mut map = rgb();
    map.erase(Color::Green);

    let mut buf = Buffer::<64>::new();
    write!(&mut buf, "{:?}", map).unwrap();
    assert_eq!(buf.as_str(), "{Red: 1, Blue: 3}");
}

#[test]
fn test_drops_every_live_value_once() {
    let drops = Rc::new(Cell::new(0));
    {
        let mut map: EnumMap<Month, Tracked> = EnumMap::new();
        for (i, month) in Month::VALUES.iter().enumerate().take(5) {
            map.insert(*month, Tracked::new(&drops, i as i32));
        }

        // rejected value is dropped right away
        map.insert(Month::Jan, Tracked::new(&drops, 99));
        assert_eq!(drops.get(), 1);
        assert_eq!(map[Month::Jan].value, 0);

        map.insert_or_assign(Month::Feb, Tracked::new(&drops, 20));
        assert_eq!(drops.get(), 2);

        map.erase(Month::Mar);
        assert_eq!(drops.get(), 3);

        let removed = map.remove(Month::Apr);
        assert_eq!(drops.get(), 3);
        drop(removed);
        assert_eq!(drops.get(), 4);
        assert_eq!(map.len(), 3);
    }
    assert_eq!(drops.get(), 7);
}

#[test]
fn test_clear_and_clone_track_drops() {
    let drops = Rc::new(Cell::new(0));
    let mut map: ColorMap<Tracked> = ColorMap::new();
    map.insert(Color::Red, Tracked::new(&drops, 1));
    map.insert(Color::Blue, Tracked::new(&drops, 3));

    let cloned = map.clone();
    map.clear();
    assert_eq!(drops.get(), 2);
    assert_eq!(cloned.values().map(|t| t.value).collect::<Vec<_>>(), [1, 3]);

    map.clone_from(&cloned);
    drop(cloned);
    assert_eq!(drops.get(), 4);
    drop(map);
    assert_eq!(drops.get(), 6);
}

#[test]
fn test_partially_consumed_into_iter_drops_rest() {
    let drops = Rc::new(Cell::new(0));
    let map: ColorMap<Tracked> = Color::VALUES
        .iter()
        .map(|&color| (color, Tracked::new(&drops, color.ordinal() as i32)))
        .collect();

    let mut iter = map.into_iter();
    let (color, tracked) = iter.next().unwrap();
    assert_eq!(color, Color::Red);
    assert_eq!(drops.get(), 0);
    drop(iter);
    assert_eq!(drops.get(), 2);
    drop(tracked);
    assert_eq!(drops.get(), 3);
}

#[test]
fn test_auto_traits() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<EnumMap<Color, i32>>();
    assert_send_sync::<Iter<'static, Color, i32>>();
    assert_send_sync::<IterMut<'static, Color, i32>>();
}
