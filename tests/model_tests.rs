//! Single-threaded comparison against a single-lock `HashMap` baseline.

use bucketmap::BucketMap;
use hashbrown::HashMap;
use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Baseline container: one lock around the whole table.
struct SingleLockMap<K, V> {
    map: Mutex<HashMap<K, V>>,
}

impl<K: std::hash::Hash + Eq, V: Clone> SingleLockMap<K, V> {
    fn new() -> Self {
        Self {
            map: Mutex::new(HashMap::new()),
        }
    }

    fn get(&self, key: &K) -> Option<V> {
        self.map.lock().get(key).cloned()
    }

    fn put(&self, key: K, value: V) {
        self.map.lock().insert(key, value);
    }

    fn remove(&self, key: &K) -> bool {
        self.map.lock().remove(key).is_some()
    }

    fn len(&self) -> usize {
        self.map.lock().len()
    }
}

fn run_model(bucket_count: usize, seed: u64) {
    let mut rng = StdRng::seed_from_u64(seed);
    let map = BucketMap::with_bucket_count(bucket_count).unwrap();
    let baseline = SingleLockMap::new();

    for step in 0..5000u32 {
        let key: u16 = rng.gen_range(0..300);
        match rng.gen_range(0..10) {
            0..=3 => {
                map.put(key, step);
                baseline.put(key, step);
            }
            4..=5 => assert_eq!(map.remove(&key), baseline.remove(&key), "step {}", step),
            6..=8 => {
                assert_eq!(map.get(&key), baseline.get(&key), "step {}", step);
                assert_eq!(map.contains(&key), baseline.get(&key).is_some());
            }
            _ => assert_eq!(map.size(), baseline.len(), "step {}", step),
        }
    }

    let mut entries: Vec<_> = map.iter().collect();
    entries.sort_unstable();
    let mut expected: Vec<_> = baseline.map.lock().iter().map(|(k, v)| (*k, *v)).collect();
    expected.sort_unstable();
    assert_eq!(entries, expected);
}

#[test]
fn test_matches_baseline_power_of_two() {
    run_model(16, 1);
}

#[test]
fn test_matches_baseline_odd_bucket_count() {
    run_model(13, 2);
}

#[test]
fn test_matches_baseline_single_bucket() {
    run_model(1, 3);
}

#[test]
fn test_matches_baseline_default_buckets() {
    run_model(bucketmap::DEFAULT_BUCKET_COUNT, 4);
}
