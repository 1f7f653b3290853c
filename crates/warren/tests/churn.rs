//! Randomized insert/remove churn checked against an `IndexMap` oracle.
//!
//! The oracle holds the expected handle → value mapping; after every
//! operation the container must agree with it on length, membership, and
//! values, and every handle the oracle has forgotten must stay dead.

use indexmap::IndexMap;
use proptest::prelude::*;
use warren::{PagedSlotMap, SlotId, SlotList};

/// One scripted operation: `(selector, value)`. The selector picks both the
/// kind of operation and, for removals, which live entry dies.
type Op = (u8, i64);

fn ops() -> impl Strategy<Value = Vec<Op>> {
    proptest::collection::vec((any::<u8>(), any::<i64>()), 1..300)
}

proptest! {
    #[test]
    fn list_agrees_with_oracle(ops in ops()) {
        let mut list = SlotList::with_capacity(2);
        let mut oracle: IndexMap<SlotId, i64> = IndexMap::new();
        let mut dead: Vec<SlotId> = Vec::new();

        for (selector, value) in ops {
            let remove = selector % 3 == 0 && !oracle.is_empty();
            if remove {
                let pick = selector as usize % oracle.len();
                let (&id, &expected) = oracle.get_index(pick).unwrap();
                prop_assert_eq!(list.remove_by_id(id), Some(expected));
                oracle.swap_remove(&id);
                dead.push(id);
            } else {
                let id = list.add(value);
                prop_assert!(oracle.insert(id, value).is_none(), "handle reissued while live");
            }

            prop_assert_eq!(list.len(), oracle.len());
        }

        for (&id, &value) in &oracle {
            prop_assert_eq!(list.get(id), Some(&value));
            let position = list.index_by_id(id).unwrap();
            prop_assert_eq!(list[position], value);
            prop_assert_eq!(list.id_by_index(position), Some(id));
        }
        for id in dead {
            prop_assert!(!oracle.contains_key(&id));
            prop_assert!(list.get(id).is_none());
        }

        let mut expected: Vec<i64> = oracle.values().copied().collect();
        let mut actual: Vec<i64> = list.iter().copied().collect();
        expected.sort_unstable();
        actual.sort_unstable();
        prop_assert_eq!(actual, expected);
    }

    #[test]
    fn paged_map_agrees_with_oracle(ops in ops(), page_size in 4usize..32) {
        let mut map = PagedSlotMap::with_page_size(page_size).unwrap();
        let mut oracle: IndexMap<u32, i64> = IndexMap::new();

        for (selector, value) in ops {
            let raw = u32::from(selector) % 48;
            let id = SlotId::new(raw);
            match selector % 4 {
                0 => {
                    let expected = oracle.swap_remove(&raw);
                    prop_assert_eq!(map.remove(id), expected);
                }
                1 => {
                    let (_, old) = map.set_or_replace(id, value);
                    prop_assert_eq!(old, oracle.insert(raw, value));
                }
                _ => {
                    let added = map.try_add(id, value).is_some();
                    prop_assert_eq!(added, !oracle.contains_key(&raw));
                    if added {
                        oracle.insert(raw, value);
                    }
                }
            }

            prop_assert_eq!(map.len(), oracle.len());
        }

        for raw in 0..48u32 {
            let id = SlotId::new(raw);
            prop_assert_eq!(map.get(id), oracle.get(&raw));
            prop_assert_eq!(map.contains_id(id), oracle.contains_key(&raw));
        }

        // Page views cover exactly the live values.
        let mut paged: Vec<i64> = map.pages().flatten().copied().collect();
        let mut expected: Vec<i64> = oracle.values().copied().collect();
        paged.sort_unstable();
        expected.sort_unstable();
        prop_assert_eq!(paged, expected);
    }
}
