use chained_hashtable::ChainedHashTable;
use proptest::prelude::*;

fn sorted_pairs(m: &ChainedHashTable<u32, u8>) -> Vec<(u32, u8)> {
    let mut v: Vec<_> = m.iter().map(|(k, v)| (*k, *v)).collect();
    v.sort_unstable();
    v
}

proptest! {
    // Collision count is a pure function of bucket lengths, for any capacity
    // and any insert sequence (duplicates included).
    #[test]
    fn prop_collisions_match_snapshot(
        cap in 1usize..64,
        entries in proptest::collection::vec((0u32..500, any::<u8>()), 0..200),
    ) {
        let mut m: ChainedHashTable<u32, u8> = ChainedHashTable::with_capacity(cap).unwrap();
        for (k, v) in entries.iter().copied() {
            m.insert(k, v);
        }
        let recomputed: usize = m.snapshot().map(|b| b.len().saturating_sub(1)).sum();
        prop_assert_eq!(m.count_collisions(), recomputed);
        prop_assert_eq!(m.len(), entries.len());
    }

    // Resizing to any positive capacity preserves the multiset of pairs and
    // re-buckets every key by the new modulus.
    #[test]
    fn prop_resize_preserves_pairs(
        entries in proptest::collection::vec((0u32..500, any::<u8>()), 0..200),
        caps in proptest::collection::vec(0usize..100, 1..6),
    ) {
        let mut m: ChainedHashTable<u32, u8> = ChainedHashTable::new();
        for (k, v) in entries {
            m.insert(k, v);
        }
        let before = sorted_pairs(&m);
        for cap in caps {
            let prev_cap = m.capacity();
            if cap == 0 {
                prop_assert!(m.resize(cap).is_err());
                prop_assert_eq!(m.capacity(), prev_cap);
            } else {
                prop_assert!(m.resize(cap).is_ok());
                prop_assert_eq!(m.capacity(), cap);
            }
            prop_assert_eq!(sorted_pairs(&m), before.clone());
            for bucket in m.snapshot() {
                for (k, _) in bucket.iter() {
                    prop_assert_eq!(*k as usize % m.capacity(), bucket.index());
                }
            }
        }
    }

    // insert_or_assign keeps keys unique: after any sequence, each key
    // appears at most once and holds its most recent value.
    #[test]
    fn prop_insert_or_assign_keeps_keys_unique(
        ops in proptest::collection::vec((0u32..30, any::<u8>()), 1..100),
    ) {
        let mut m: ChainedHashTable<u32, u8> = ChainedHashTable::with_capacity(7).unwrap();
        let mut last = std::collections::BTreeMap::new();
        for (k, v) in ops {
            m.insert_or_assign(k, v);
            last.insert(k, v);
        }
        prop_assert_eq!(m.len(), last.len());
        for (k, v) in &last {
            prop_assert_eq!(m.count(k), 1);
            prop_assert_eq!(m.search(k), Some(v));
        }
    }
}
