//! Property-Based Tests for the Driver
//!
//! Uses proptest against the in-process store to check the cache contract.

use proptest::prelude::*;
use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;
use std::time::Duration;

use crate::codec::JsonPacker;
use crate::driver::{CacheDriver, RedisDriver};
use crate::store::{ManualClock, MemoryStore, StoreClient};

// == Strategies ==
/// Non-empty caller keys, including separators and glob characters
fn key_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9_:*?]{1,32}"
}

fn value_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 ]{0,64}"
}

fn new_driver(prefix: &str) -> (RedisDriver, MemoryStore) {
    let store = MemoryStore::default();
    let driver = RedisDriver::new(Arc::new(store.clone()), JsonPacker, prefix);
    (driver, store)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // set then get returns the stored value, never the default
    #[test]
    fn prop_roundtrip(key in key_strategy(), value in value_strategy(), ttl in -5i64..3600) {
        let (driver, _) = new_driver("app");
        let default = format!("{}-default", value);

        tokio_test::block_on(async {
            prop_assert!(driver.set(&key, &value, Some(ttl)).await.unwrap());
            prop_assert_eq!(driver.get(&key, default.clone()).await.unwrap(), value.clone());
            prop_assert_eq!(driver.fetch(&key, default).await.unwrap(), (true, value));
            Ok(())
        })?;
    }

    // never-written keys yield the default, and fetch reports absence
    #[test]
    fn prop_absent_key_yields_default(key in key_strategy(), default in value_strategy()) {
        let (driver, _) = new_driver("app");

        tokio_test::block_on(async {
            prop_assert_eq!(driver.get(&key, default.clone()).await.unwrap(), default.clone());
            prop_assert_eq!(driver.fetch(&key, default.clone()).await.unwrap(), (false, default));
            prop_assert!(!driver.has(&key).await.unwrap());
            Ok(())
        })?;
    }

    // delete succeeds whether or not the key exists, and has() follows it
    #[test]
    fn prop_delete_idempotent(key in key_strategy(), value in value_strategy(), write_first in any::<bool>()) {
        let (driver, _) = new_driver("app");

        tokio_test::block_on(async {
            if write_first {
                driver.set(&key, &value, None).await.unwrap();
                prop_assert!(driver.has(&key).await.unwrap());
            }
            prop_assert!(driver.delete(&key).await.unwrap());
            prop_assert!(driver.delete(&key).await.unwrap());
            prop_assert!(!driver.has(&key).await.unwrap());
            Ok(())
        })?;
    }

    // get_multiple has exactly one entry per distinct requested key
    #[test]
    fn prop_get_multiple_one_entry_per_key(
        stored in prop::collection::btree_map(key_strategy(), value_strategy(), 0..10),
        requested in prop::collection::vec(key_strategy(), 1..15),
    ) {
        let (driver, _) = new_driver("app");
        let default = "<absent>".to_string();

        tokio_test::block_on(async {
            driver.set_multiple(stored.clone(), None).await.unwrap();
            let result = driver.get_multiple(&requested, default.clone()).await.unwrap();

            let distinct: HashSet<&String> = requested.iter().collect();
            prop_assert_eq!(result.len(), distinct.len());
            for key in &requested {
                let expected = stored.get(key).unwrap_or(&default);
                prop_assert_eq!(&result[key.as_str()], expected);
            }
            Ok(())
        })?;
    }

    // set_multiple then get_multiple returns every value, with or without TTL
    #[test]
    fn prop_set_multiple_roundtrip(
        values in prop::collection::btree_map(key_strategy(), value_strategy(), 1..20),
        ttl in prop::option::of(-2i64..120),
    ) {
        let (driver, _) = new_driver("app");
        let keys: Vec<String> = values.keys().cloned().collect();

        tokio_test::block_on(async {
            let report = driver.set_multiple(values.clone(), ttl).await.unwrap();
            prop_assert!(report.is_success());
            prop_assert_eq!(report.len(), values.len());

            let result = driver.get_multiple(&keys, String::new()).await.unwrap();
            let result: BTreeMap<String, String> = result.into_iter().collect();
            prop_assert_eq!(result, values);
            Ok(())
        })?;
    }

    // clear removes every key under the prefix and nothing else
    #[test]
    fn prop_clear_is_prefix_scoped(
        mine in prop::collection::btree_set(key_strategy(), 0..60),
        theirs in prop::collection::btree_set(key_strategy(), 0..20),
        page in 1usize..25,
    ) {
        let store = MemoryStore::default();
        let shared: Arc<dyn StoreClient> = Arc::new(store.clone());
        let app = RedisDriver::new(shared.clone(), JsonPacker, "app").with_scan_count(page);
        let other = RedisDriver::new(shared, JsonPacker, "other");

        tokio_test::block_on(async {
            for key in &mine {
                app.set(key, &1u8, None).await.unwrap();
            }
            for key in &theirs {
                other.set(key, &2u8, None).await.unwrap();
            }

            prop_assert!(app.clear().await.unwrap());

            prop_assert_eq!(store.len().await, theirs.len());
            for key in &mine {
                prop_assert!(!app.has(key).await.unwrap());
            }
            for key in &theirs {
                prop_assert_eq!(other.get(key, 0u8).await.unwrap(), 2);
            }
            Ok(())
        })?;
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(50))]

    // positive TTLs expire exactly at the deadline; others persist
    #[test]
    fn prop_ttl_boundary(key in key_strategy(), ttl in -3i64..30) {
        let clock = ManualClock::new(10_000);
        let store = MemoryStore::with_clock(0, Arc::new(clock.clone()));
        let driver = RedisDriver::new(Arc::new(store), JsonPacker, "app");

        tokio_test::block_on(async {
            driver.set(&key, &"v", Some(ttl)).await.unwrap();

            if ttl > 0 {
                clock.advance(Duration::from_millis(ttl as u64 * 1000 - 1));
                prop_assert!(driver.has(&key).await.unwrap());
                clock.advance(Duration::from_millis(1));
                prop_assert!(!driver.has(&key).await.unwrap());
            } else {
                clock.advance(Duration::from_secs(86_400));
                prop_assert!(driver.has(&key).await.unwrap());
            }
            Ok(())
        })?;
    }
}

// == Concurrency ==
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_callers_share_one_driver() {
    let (driver, store) = new_driver("app");
    let driver = Arc::new(driver);

    let mut handles = Vec::new();
    for task in 0..8 {
        let driver = Arc::clone(&driver);
        handles.push(tokio::spawn(async move {
            for i in 0..25 {
                let key = format!("t{}:{}", task, i);
                driver.set(&key, &i, None).await.unwrap();
                assert_eq!(driver.get(&key, -1).await.unwrap(), i);
            }
        }));
    }
    for handle in handles {
        handle.await.expect("task should not panic");
    }

    assert_eq!(store.len().await, 200);
    assert!(driver.clear().await.unwrap());
    assert!(store.is_empty().await);
}
