#![cfg(test)]

// Property tests for Dictionary kept inside the crate so they can inspect
// the bucket table directly.

use crate::dictionary::{Dictionary, FixedState};
use crate::policy::{Resize, ResizePolicy};
use crate::table::bucket_index;
use proptest::prelude::*;
use std::collections::HashMap;
use std::hash::BuildHasher;

// Pool-indexed operations: indices shrink toward earlier keys and the op
// list shrinks in length.
#[derive(Clone, Debug)]
enum OpI {
    Associate(usize, i32),
    Remove(usize),
    Get(usize),
    Mutate(usize, i32),
}

fn key(i: usize) -> String {
    format!("k{i}")
}

// A pool wide enough to push the count past both bands.
fn arb_ops(pool: usize, len: usize) -> impl Strategy<Value = Vec<OpI>> {
    let op = prop_oneof![
        4 => (0..pool, any::<i32>()).prop_map(|(i, v)| OpI::Associate(i, v)),
        2 => (0..pool).prop_map(OpI::Remove),
        1 => (0..pool).prop_map(OpI::Get),
        1 => (0..pool, -5i32..5).prop_map(|(i, d)| OpI::Mutate(i, d)),
    ];
    proptest::collection::vec(op, 1..len)
}

// Every bucket index must match the stored hash for the live capacity.
fn assert_layout<S: BuildHasher>(d: &Dictionary<String, i32, S>) {
    let cap = d.table.capacity();
    for (i, bucket) in d.table.buckets().iter().enumerate() {
        for e in bucket {
            assert_eq!(bucket_index(e.hash, cap), i);
            assert_eq!(d.hasher().hash_one(&e.key), e.hash);
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 128, .. ProptestConfig::default() })]

    /// Invariant: under any churn the dictionary agrees with a HashMap model,
    /// the structural invariants hold after every call, and with the default
    /// policy starting from 10 buckets no call leaves the table asking for
    /// another resize.
    #[test]
    fn prop_model_and_policy(ops in arb_ops(160, 600)) {
        let mut d: Dictionary<String, i32> = Dictionary::new();
        let mut model: HashMap<String, i32> = HashMap::new();
        let policy = ResizePolicy::default();
        let mut peak = 0usize;

        for op in ops {
            match op {
                OpI::Associate(i, v) => {
                    prop_assert_eq!(d.associate(key(i), v), model.insert(key(i), v));
                }
                OpI::Remove(i) => {
                    prop_assert_eq!(d.remove(key(i).as_str()), model.remove(&key(i)));
                }
                OpI::Get(i) => {
                    let cap = d.capacity();
                    prop_assert_eq!(d.get(key(i).as_str()), model.get(&key(i)));
                    prop_assert_eq!(d.capacity(), cap);
                }
                OpI::Mutate(i, delta) => {
                    if let Some(v) = d.get_mut(key(i).as_str()) {
                        *v = v.wrapping_add(delta);
                    }
                    if let Some(v) = model.get_mut(&key(i)) {
                        *v = v.wrapping_add(delta);
                    }
                }
            }

            peak = peak.max(d.count());
            prop_assert_eq!(d.count(), model.len());
            prop_assert!(d.validate().is_ok());
            prop_assert_eq!(policy.check(d.count(), d.capacity()), Resize::Keep);
            prop_assert!(d.capacity() >= 10);
            prop_assert_eq!(d.capacity() % 10, 0);
            if peak <= 50 {
                prop_assert_eq!(d.capacity(), 10);
            }
        }

        assert_layout(&d);
        for (k, v) in &model {
            prop_assert_eq!(d.get(k.as_str()), Some(v));
        }
    }

    /// Invariant: the bucket layout depends only on the keys present and the
    /// capacity, so two dictionaries with a fixed hasher that reach the same
    /// capacity through different histories hold the same key set per bucket.
    #[test]
    fn prop_fixed_hasher_layout(ops in arb_ops(120, 300)) {
        let mut d: Dictionary<String, i32, FixedState> = Dictionary::with_hasher(FixedState::default());
        for op in ops {
            match op {
                OpI::Associate(i, v) => { d.associate(key(i), v); }
                OpI::Remove(i) => { d.remove(key(i).as_str()); }
                OpI::Get(_) | OpI::Mutate(..) => {}
            }
        }
        assert_layout(&d);

        let mut rebuilt: Dictionary<String, i32, FixedState> =
            Dictionary::with_capacity_and_hasher(d.capacity(), FixedState::default())
                .unwrap()
                .with_policy(ResizePolicy::new(usize::MAX, 1, 0).unwrap());
        rebuilt.extend(d.iter().map(|(k, v)| (k.clone(), *v)));
        prop_assert_eq!(rebuilt.capacity(), d.capacity());

        for (a, b) in d.table.buckets().iter().zip(rebuilt.table.buckets()) {
            let mut ka: Vec<&String> = a.iter().map(|e| &e.key).collect();
            let mut kb: Vec<&String> = b.iter().map(|e| &e.key).collect();
            ka.sort();
            kb.sort();
            prop_assert_eq!(ka, kb);
        }
    }
}
