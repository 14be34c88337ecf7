#![cfg(test)]

// Property tests for ChainedHashTable kept inside the crate so they can
// compare against private bucket placement through `bucket_index`.

use crate::chained_table::ChainedHashTable;
use crate::error::TableError;
use crate::hasher::{HashFn, KeyHasher};
use proptest::prelude::*;

// Small key space so duplicates and shared buckets are common.
#[derive(Clone, Debug)]
enum Op {
    Insert(u16, i32),
    InsertOrAssign(u16, i32),
    Erase(u16),
    Search(u16),
    Mutate(u16, i32),
    Count(u16),
    ContainsValue(i32),
    Resize(usize),
}

fn arb_op() -> impl Strategy<Value = Op> {
    let key = 0u16..40;
    let value = -5i32..5;
    prop_oneof![
        4 => (key.clone(), value.clone()).prop_map(|(k, v)| Op::Insert(k, v)),
        3 => (key.clone(), value.clone()).prop_map(|(k, v)| Op::InsertOrAssign(k, v)),
        2 => key.clone().prop_map(Op::Erase),
        2 => key.clone().prop_map(Op::Search),
        1 => (key.clone(), value.clone()).prop_map(|(k, d)| Op::Mutate(k, d)),
        1 => key.prop_map(Op::Count),
        1 => value.prop_map(Op::ContainsValue),
        1 => (0usize..24).prop_map(Op::Resize),
    ]
}

fn first(model: &[(u16, i32)], k: u16) -> Option<usize> {
    model.iter().position(|e| e.0 == k)
}

// The model is a single insertion-ordered list. Entries sharing a key always
// share a bucket, and chains keep insertion order, so "first match in the
// bucket" equals "first match in the list".
fn apply<H: KeyHasher<u16>>(
    sut: &mut ChainedHashTable<u16, i32, H>,
    model: &mut Vec<(u16, i32)>,
    op: Op,
) -> Result<(), TestCaseError> {
    match op {
        Op::Insert(k, v) => {
            sut.insert(k, v);
            model.push((k, v));
        }
        Op::InsertOrAssign(k, v) => {
            let prev = sut.insert_or_assign(k, v);
            match first(model, k) {
                Some(i) => {
                    prop_assert_eq!(prev, Some(model[i].1));
                    model[i].1 = v;
                }
                None => {
                    prop_assert_eq!(prev, None);
                    model.push((k, v));
                }
            }
        }
        Op::Erase(k) => {
            let removed = sut.erase(&k);
            match first(model, k) {
                Some(i) => {
                    prop_assert!(removed);
                    model.remove(i);
                }
                None => prop_assert!(!removed),
            }
        }
        Op::Search(k) => {
            let expected = first(model, k).map(|i| model[i].1);
            prop_assert_eq!(sut.search(&k).copied(), expected);
        }
        Op::Mutate(k, d) => {
            if let Some(v) = sut.search_mut(&k) {
                *v = v.saturating_add(d);
                let i = first(model, k).expect("model tracks every key");
                model[i].1 = model[i].1.saturating_add(d);
            } else {
                prop_assert!(first(model, k).is_none());
            }
        }
        Op::Count(k) => {
            prop_assert_eq!(sut.count(&k), model.iter().filter(|e| e.0 == k).count());
        }
        Op::ContainsValue(v) => {
            prop_assert_eq!(sut.contains_value(&v), model.iter().any(|e| e.1 == v));
        }
        Op::Resize(cap) => {
            let before_cap = sut.capacity();
            match sut.resize(cap) {
                Ok(()) => {
                    prop_assert!(cap > 0);
                    prop_assert_eq!(sut.capacity(), cap);
                }
                Err(TableError::InvalidCapacity { requested }) => {
                    prop_assert_eq!(requested, 0);
                    prop_assert_eq!(sut.capacity(), before_cap);
                }
            }
        }
    }
    Ok(())
}

fn check_invariants<H: KeyHasher<u16>>(
    sut: &ChainedHashTable<u16, i32, H>,
    model: &[(u16, i32)],
) -> Result<(), TestCaseError> {
    prop_assert_eq!(sut.len(), model.len());
    prop_assert_eq!(sut.is_empty(), model.is_empty());

    // Every entry sits in the bucket its key reduces to.
    let mut excess = 0;
    for bucket in sut.snapshot() {
        excess += bucket.len().saturating_sub(1);
        for (k, _) in bucket.iter() {
            prop_assert_eq!(sut.bucket_index(k), bucket.index());
        }
    }
    prop_assert_eq!(sut.count_collisions(), excess);

    // Same multiset of pairs.
    let mut got: Vec<(u16, i32)> = sut.iter().map(|(k, v)| (*k, *v)).collect();
    let mut want = model.to_vec();
    got.sort_unstable();
    want.sort_unstable();
    prop_assert_eq!(got, want);
    Ok(())
}

// Property: state-machine equivalence against an insertion-ordered list.
// Invariants exercised across random operation sequences:
// - `insert` always appends; `insert_or_assign` updates the first match.
// - `search`/`search_mut`/`erase` act on the first match in chain order.
// - `count` and `contains_value` agree with the model.
// - `resize` keeps the multiset of pairs and rejects zero without mutation.
// - `count_collisions` equals the excess recomputed from a snapshot.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine(ops in proptest::collection::vec(arb_op(), 1..80)) {
        let mut sut: ChainedHashTable<u16, i32> = ChainedHashTable::new();
        let mut model: Vec<(u16, i32)> = Vec::new();
        for op in ops {
            apply(&mut sut, &mut model, op)?;
            check_invariants(&sut, &model)?;
        }
    }
}

// Property: the same invariants when every key hashes to zero, so all
// entries share one chain regardless of capacity.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine_with_collisions(ops in proptest::collection::vec(arb_op(), 1..80)) {
        let mut sut = ChainedHashTable::with_hasher(HashFn(|_: &u16| 0u64));
        let mut model: Vec<(u16, i32)> = Vec::new();
        for op in ops {
            apply(&mut sut, &mut model, op)?;
            check_invariants(&sut, &model)?;
            prop_assert_eq!(sut.count_collisions(), model.len().saturating_sub(1));
        }
    }
}
