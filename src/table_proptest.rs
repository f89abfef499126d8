#![cfg(test)]

// Property tests for Table kept inside the crate so they can inspect the
// slot array directly.

use crate::slot::Slot;
use crate::table::{InsertError, Table};
use hashbrown::HashMap;
use proptest::prelude::*;

// Pool-indexed operations to improve shrinking: indices shrink to earlier keys,
// pool length shrinks, and op lists shrink in length.
#[derive(Clone, Debug)]
enum OpI {
    Insert(usize, i32),
    Remove(usize),
    Lookup(usize),
    Mutate(usize, i32),
    Clear,
}

fn arb_scenario() -> impl Strategy<Value = (usize, Vec<String>, Vec<OpI>)> {
    (1usize..=8, proptest::collection::vec("[a-z]{0,4}", 1..=12)).prop_flat_map(
        |(capacity, pool)| {
            let idx = 0..pool.len();
            let op = prop_oneof![
                4 => (idx.clone(), any::<i32>()).prop_map(|(i, v)| OpI::Insert(i, v)),
                2 => idx.clone().prop_map(OpI::Remove),
                2 => idx.clone().prop_map(OpI::Lookup),
                1 => (idx.clone(), any::<i32>()).prop_map(|(i, d)| OpI::Mutate(i, d)),
                1 => Just(OpI::Clear),
            ];
            proptest::collection::vec(op, 1..80)
                .prop_map(move |ops| (capacity, pool.clone(), ops))
        },
    )
}

// Property: State-machine equivalence against a model map.
// Invariants exercised across random operation sequences:
// - Insert upserts; it fails with TableFull iff the key is absent and every
//   slot is occupied, and a failed insert leaves the slot array unchanged.
// - Successful inserts return a handle inside the bound array that resolves
//   to the written key and value.
// - Remove returns the model's value once and leaves a tombstone; a second
//   remove yields nothing.
// - Lookups agree with the model no matter how many tombstones sit on the
//   probe path.
// - `len` equals the number of occupied slots and the model size; `iter`
//   yields exactly the model's entries.
proptest! {
    #![proptest_config(ProptestConfig { cases: 256, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine((capacity, pool, ops) in arb_scenario()) {
        let mut storage: Vec<Slot<'_, i32>> = vec![Slot::Tombstone; capacity];
        let mut sut = Table::bind(&mut storage).unwrap();
        let mut model: HashMap<&str, i32> = HashMap::new();

        for op in ops {
            match op {
                OpI::Insert(i, v) => {
                    let k = pool[i].as_str();
                    let present = model.contains_key(k);
                    let before = sut.slots().to_vec();
                    match sut.insert(k, v) {
                        Ok(h) => {
                            prop_assert!(present || model.len() < capacity);
                            prop_assert!(h.index() < capacity);
                            prop_assert_eq!(h.key(&sut), Some(k.as_bytes()));
                            prop_assert_eq!(h.value(&sut), Some(&v));
                            model.insert(k, v);
                        }
                        Err(InsertError::TableFull) => {
                            prop_assert!(!present, "existing keys always upsert");
                            prop_assert_eq!(model.len(), capacity);
                            prop_assert_eq!(sut.slots(), &before[..]);
                        }
                    }
                }
                OpI::Remove(i) => {
                    let k = pool[i].as_str();
                    prop_assert_eq!(sut.remove(k), model.remove(k));
                    prop_assert_eq!(sut.remove(k), None);
                    prop_assert!(!sut.contains_key(k));
                }
                OpI::Lookup(i) => {
                    let k = pool[i].as_str();
                    prop_assert_eq!(sut.lookup(k), model.get(k));
                    prop_assert_eq!(sut.find(k).is_some(), model.contains_key(k));
                }
                OpI::Mutate(i, d) => {
                    let k = pool[i].as_str();
                    match (sut.lookup_mut(k), model.get_mut(k)) {
                        (Some(a), Some(b)) => {
                            *a = a.wrapping_add(d);
                            *b = b.wrapping_add(d);
                        }
                        (None, None) => {}
                        (a, b) => prop_assert!(false, "presence mismatch: {:?} vs {:?}", a, b),
                    }
                }
                OpI::Clear => {
                    sut.clear();
                    model.clear();
                    prop_assert!(sut.slots().iter().all(Slot::is_empty));
                }
            }

            let occupied = sut.slots().iter().filter(|s| s.is_occupied()).count();
            prop_assert_eq!(sut.len(), occupied);
            prop_assert_eq!(sut.len(), model.len());
            prop_assert!(sut.len() + sut.tombstones() <= capacity);
            let mut seen: HashMap<&[u8], i32> = HashMap::new();
            for (h, k, v) in sut.iter() {
                prop_assert_eq!(sut.find(k), Some(h));
                prop_assert!(seen.insert(k, *v).is_none(), "key yielded twice");
            }
            let expected: HashMap<&[u8], i32> =
                model.iter().map(|(k, v)| (k.as_bytes(), *v)).collect();
            prop_assert_eq!(seen, expected);
        }
    }
}

// Property: once every slot has been filled and drained, every remaining
// slot is a tombstone, and each one is reusable. Filling the table again
// succeeds exactly `capacity` times.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_tombstones_fully_reusable(
        capacity in 1usize..=16,
        round in 0u32..4,
    ) {
        let first: Vec<String> = (0..capacity).map(|i| format!("a{i}")).collect();
        let second: Vec<String> = (0..=capacity).map(|i| format!("b{round}-{i}")).collect();
        let mut storage: Vec<Slot<'_, usize>> = (0..capacity).map(|_| Slot::EMPTY).collect();
        let mut t = Table::bind(&mut storage).unwrap();

        for (i, k) in first.iter().enumerate() {
            t.insert(k, i).unwrap();
        }
        for (i, k) in first.iter().enumerate() {
            prop_assert_eq!(t.remove(k), Some(i));
        }
        prop_assert_eq!(t.tombstones(), capacity);
        prop_assert!(t.is_empty());

        for (i, k) in second.iter().take(capacity).enumerate() {
            prop_assert!(t.insert(k, i).is_ok());
        }
        prop_assert_eq!(t.tombstones(), 0);
        prop_assert_eq!(t.insert(&second[capacity], 0), Err(InsertError::TableFull));
        for (i, k) in second.iter().take(capacity).enumerate() {
            prop_assert_eq!(t.lookup(k), Some(&i));
        }
    }
}
