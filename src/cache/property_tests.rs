//! Property-Based Tests for Cache Module
//!
//! Store-level invariants the pipeline caches rely on.

use proptest::prelude::*;
use std::collections::HashSet;
use std::time::Duration;

use crate::cache::CacheStore;

// == Test Configuration ==
const TEST_MAX_ENTRIES: usize = 50;
const TEST_TTL: Duration = Duration::from_secs(3600);

// == Strategies ==
fn valid_key_strategy() -> impl Strategy<Value = String> {
    "AsxCompany_[A-Z0-9]{1,12}"
}

/// Arbitrary bytes, including payloads that are not valid JSON
fn payload_strategy() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>(), 0..512)
}

#[derive(Debug, Clone)]
enum CacheOp {
    Set { key: String, value: Vec<u8> },
    Get { key: String },
}

fn cache_op_strategy() -> impl Strategy<Value = CacheOp> {
    prop_oneof![
        (valid_key_strategy(), payload_strategy())
            .prop_map(|(key, value)| CacheOp::Set { key, value }),
        valid_key_strategy().prop_map(|key| CacheOp::Get { key }),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // Payload bytes come back exactly as written
    #[test]
    fn prop_payload_round_trip(key in valid_key_strategy(), value in payload_strategy()) {
        let mut store = CacheStore::new(TEST_MAX_ENTRIES);
        store.set(key.clone(), value.clone(), TEST_TTL).unwrap();
        prop_assert_eq!(store.get(&key), Some(value));
    }

    // The last write for a key wins
    #[test]
    fn prop_last_write_wins(
        key in valid_key_strategy(),
        values in prop::collection::vec(payload_strategy(), 1..8),
    ) {
        let mut store = CacheStore::new(TEST_MAX_ENTRIES);
        for value in &values {
            store.set(key.clone(), value.clone(), TEST_TTL).unwrap();
        }
        prop_assert_eq!(store.get(&key), values.last().cloned());
        prop_assert_eq!(store.len(), 1);
    }

    // Counters match the observed outcome of every operation
    #[test]
    fn prop_statistics_accuracy(ops in prop::collection::vec(cache_op_strategy(), 1..60)) {
        let mut store = CacheStore::new(TEST_MAX_ENTRIES);
        let (mut hits, mut misses, mut writes) = (0u64, 0u64, 0u64);

        for op in ops {
            match op {
                CacheOp::Set { key, value } => {
                    if store.set(key, value, TEST_TTL).is_ok() {
                        writes += 1;
                    }
                }
                CacheOp::Get { key } => match store.get(&key) {
                    Some(_) => hits += 1,
                    None => misses += 1,
                },
            }
        }

        let stats = store.stats();
        prop_assert_eq!(stats.hits, hits);
        prop_assert_eq!(stats.misses, misses);
        prop_assert_eq!(stats.writes, writes);
        prop_assert_eq!(stats.total_entries, store.len());
    }

    // The store never holds more than its capacity
    #[test]
    fn prop_capacity_enforcement(
        capacity in 1usize..20,
        keys in prop::collection::vec(valid_key_strategy(), 1..80),
    ) {
        let mut store = CacheStore::new(capacity);
        for key in &keys {
            store.set(key.clone(), b"v".to_vec(), TEST_TTL).unwrap();
            prop_assert!(store.len() <= capacity);
        }

        let distinct: HashSet<&String> = keys.iter().collect();
        prop_assert_eq!(store.len(), distinct.len().min(capacity));
    }

    // The most recently written key always survives eviction
    #[test]
    fn prop_newest_key_survives(
        keys in prop::collection::vec(valid_key_strategy(), 2..40),
    ) {
        let mut store = CacheStore::new(2);
        for key in &keys {
            store.set(key.clone(), b"v".to_vec(), TEST_TTL).unwrap();
        }
        let newest = keys.last().unwrap();
        prop_assert!(store.get(newest).is_some());
    }
}
