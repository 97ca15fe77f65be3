// Dictionary property tests (public API).
//
// Property 1: model equivalence under churn.
//  - Model: std HashMap<String, i32>.
//  - Invariant: count() == model.len(); every model key maps to its most
//    recently associated value; removed keys are absent.
//  - Operations: associate, remove, get, remove of keys never inserted.
//
// Property 2: small tables never resize.
//  - Any interleaving that keeps the peak count at or below 50 leaves
//    capacity at its initial value, for any initial capacity.
//
// Property 3: capacity tracks the policy.
//  - Each mutating call doubles, halves, or keeps the capacity, and a
//    change happens exactly when the policy asked for it.
use chained_dict::{Dictionary, FixedState, Resize, ResizePolicy};
use proptest::prelude::*;
use std::collections::HashMap;

proptest! {
    #[test]
    fn prop_matches_hashmap_model(
        keys in 1usize..=200,
        ops in proptest::collection::vec((0u8..=3u8, 0usize..1000usize, any::<i32>()), 1..500)
    ) {
        let mut d: Dictionary<String, i32> = Dictionary::new();
        let mut model: HashMap<String, i32> = HashMap::new();

        for (op, raw_k, v) in ops {
            let key = key_of(raw_k, keys);
            match op {
                // Associate; the returned previous value matches the model.
                0 | 1 => {
                    prop_assert_eq!(d.associate(key.clone(), v), model.insert(key.clone(), v));
                }
                // Remove; absent keys are a no-op.
                2 => {
                    prop_assert_eq!(d.remove(key.as_str()), model.remove(&key));
                }
                // Remove a key outside the pool.
                3 => {
                    let before = d.count();
                    prop_assert_eq!(d.remove("never-inserted"), None);
                    prop_assert_eq!(d.count(), before);
                }
                _ => unreachable!(),
            }
            prop_assert_eq!(d.count(), model.len());
            prop_assert_eq!(d.get(key.as_str()), model.get(&key));
        }

        for (k, v) in &model {
            prop_assert_eq!(d.get(k.as_str()), Some(v));
        }
        prop_assert_eq!(d.iter().count(), model.len());
        prop_assert!(d.validate().is_ok());
    }

    #[test]
    fn prop_small_tables_never_resize(
        initial in 1usize..=64,
        ops in proptest::collection::vec((any::<bool>(), 0u8..50u8), 1..400)
    ) {
        let mut d: Dictionary<u8, u8, FixedState> =
            Dictionary::with_capacity_and_hasher(initial, FixedState::default()).unwrap();
        for (insert, k) in ops {
            if insert {
                d.associate(k, k);
            } else {
                d.remove(&k);
            }
            prop_assert!(d.count() <= 50);
            prop_assert_eq!(d.capacity(), initial);
        }
    }

    #[test]
    fn prop_capacity_is_scaled_initial(
        initial in prop_oneof![Just(10usize), Just(16usize), Just(40usize)],
        ops in proptest::collection::vec((0u8..=2u8, 0u32..400u32), 1..800)
    ) {
        let mut d: Dictionary<u32, u32> = Dictionary::with_capacity(initial).unwrap();
        let policy = ResizePolicy::default();
        for (op, k) in ops {
            let before = d.capacity();
            if op < 2 {
                d.associate(k, k);
            } else {
                d.remove(&k);
            }
            let after = d.capacity();
            // At most one doubling or halving per call.
            prop_assert!(after == before || after == before * 2 || after * 2 == before);
            if after != before {
                let expected = if after > before { Resize::Grow } else { Resize::Shrink };
                prop_assert_eq!(policy.check(d.count(), before), expected);
            }
        }
        prop_assert!(d.validate().is_ok());
    }
}

fn key_of(raw_k: usize, keys: usize) -> String {
    format!("k{}", raw_k % keys)
}
