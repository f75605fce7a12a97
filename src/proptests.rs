use super::*;

use proptest::prelude::*;
use std::collections::BTreeMap;

crate::enum_key! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
    enum Slot {
        S0,
        S1,
        S2,
        S3,
        S4,
        S5,
        S6,
        S7,
        S8,
        S9,
    }
}

type Map = EnumMap<Slot, u32, PanicChecking>;

#[derive(Debug, Clone)]
enum Op {
    Insert(Slot, u32),
    InsertOrAssign(Slot, u32),
    Erase(Slot),
    EraseRange(Slot, Slot),
    Retain(u32),
    Clear,
}

fn slot_strategy() -> impl Strategy<Value = Slot> + Clone {
    (0..Slot::COUNT).prop_map(|i| Slot::VALUES[i])
}

fn ops_strategy() -> impl Strategy<Value = Vec<Op>> {
    let slot = slot_strategy();
    let op = prop_oneof![
        40 => (slot.clone(), any::<u32>()).prop_map(|(k, v)| Op::Insert(k, v)),
        20 => (slot.clone(), any::<u32>()).prop_map(|(k, v)| Op::InsertOrAssign(k, v)),
        25 => slot.clone().prop_map(Op::Erase),
        8 => (slot.clone(), slot.clone()).prop_map(|(a, b)| Op::EraseRange(a.min(b), a.max(b))),
        5 => (1u32..5).prop_map(Op::Retain),
        2 => Just(Op::Clear),
    ];
    prop::collection::vec(op, 0..=200)
}

fn validate_map(map: &Map, model: &BTreeMap<Slot, u32>) {
    assert_eq!(map.len(), model.len(), "len must track live entries");
    assert_eq!(map.is_empty(), model.is_empty());

    let forward: Vec<(Slot, u32)> = map.iter().map(|(k, v)| (k, *v)).collect();
    let expected: Vec<(Slot, u32)> = model.iter().map(|(k, v)| (*k, *v)).collect();
    assert_eq!(forward, expected, "forward iteration must ascend by ordinal");

    let backward: Vec<(Slot, u32)> = map.iter().rev().map(|(k, v)| (k, *v)).collect();
    let expected_back: Vec<(Slot, u32)> = expected.iter().rev().copied().collect();
    assert_eq!(backward, expected_back, "reverse iteration must descend");

    let mut cursor = map.rbegin();
    let mut via_cursor = Vec::new();
    while cursor != map.rend() {
        via_cursor.push(cursor.get().0);
        cursor.increment();
    }
    let expected_keys: Vec<Slot> = expected_back.iter().map(|(k, _)| *k).collect();
    assert_eq!(via_cursor, expected_keys);

    for key in Slot::VALUES {
        assert_eq!(map.get(*key), model.get(key));
        assert_eq!(map.contains(*key), model.contains_key(key));
        assert_eq!(map.find(*key) == map.end(), !model.contains_key(key));
    }
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        .. ProptestConfig::default()
    })]

    #[test]
    fn prop_equivalence_with_btreemap(ops in ops_strategy()) {
        let mut map = Map::new();
        let mut model = BTreeMap::new();

        for op in ops {
            match op {
                Op::Insert(k, v) => {
                    let (_, inserted) = map.insert(k, v);
                    let expected = !model.contains_key(&k);
                    model.entry(k).or_insert(v);
                    prop_assert_eq!(inserted, expected);
                }
                Op::InsertOrAssign(k, v) => {
                    let (_, inserted) = map.insert_or_assign(k, v);
                    prop_assert_eq!(inserted, model.insert(k, v).is_none());
                }
                Op::Erase(k) => {
                    let erased = map.erase(k);
                    prop_assert_eq!(erased, usize::from(model.remove(&k).is_some()));
                }
                Op::EraseRange(from, to) => {
                    let erased = map.erase_range(from..=to);
                    let before = model.len();
                    model.retain(|k, _| !(from..=to).contains(k));
                    prop_assert_eq!(erased, before - model.len());
                }
                Op::Retain(divisor) => {
                    map.retain(|_, v| *v % divisor == 0);
                    model.retain(|_, v| *v % divisor == 0);
                }
                Op::Clear => {
                    map.clear();
                    model.clear();
                }
            }
            validate_map(&map, &model);
        }
    }

    #[test]
    fn prop_copies_equal_and_independent(ops in ops_strategy()) {
        let map: Map = ops
            .iter()
            .filter_map(|op| match op {
                Op::Insert(k, v) | Op::InsertOrAssign(k, v) => Some((*k, *v)),
                _ => None,
            })
            .collect();

        let mut cloned = map.clone();
        let copied = map.copied();
        prop_assert_eq!(&cloned, &map);
        prop_assert_eq!(&copied, &map);

        cloned.clear();
        prop_assert_eq!(&copied, &map);
        prop_assert!(cloned.is_empty());
    }

    #[test]
    fn prop_equality_ignores_insertion_order(
        pairs in prop::collection::vec((slot_strategy(), any::<u32>()), 0..=20),
    ) {
        let mut unique = BTreeMap::new();
        for (k, v) in pairs {
            unique.entry(k).or_insert(v);
        }

        let ascending: Map = unique.iter().map(|(k, v)| (*k, *v)).collect();
        let descending: Map = unique.iter().rev().map(|(k, v)| (*k, *v)).collect();
        prop_assert_eq!(ascending, descending);
    }
}
