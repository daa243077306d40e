use bucketmap::{BucketMap, BucketMapBuilder};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use hashbrown::HashMap;
use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

const NUM_THREADS: usize = 8;
const OPS_PER_THREAD: usize = 20_000;
const KEY_SPACE: u64 = 10_000;
const PREPOPULATE: u64 = 1_000;

/// The operations the throughput workload drives.
trait Workload: Send + Sync + 'static {
    fn get(&self, key: u64) -> Option<u64>;
    fn put(&self, key: u64, value: u64);
    fn remove(&self, key: u64) -> bool;
}

impl Workload for BucketMap<u64, u64> {
    fn get(&self, key: u64) -> Option<u64> {
        BucketMap::get(self, &key)
    }

    fn put(&self, key: u64, value: u64) {
        BucketMap::put(self, key, value)
    }

    fn remove(&self, key: u64) -> bool {
        BucketMap::remove(self, &key)
    }
}

/// Single global lock baseline.
struct MutexHashMap(Mutex<HashMap<u64, u64>>);

impl Workload for MutexHashMap {
    fn get(&self, key: u64) -> Option<u64> {
        self.0.lock().get(&key).copied()
    }

    fn put(&self, key: u64, value: u64) {
        self.0.lock().insert(key, value);
    }

    fn remove(&self, key: u64) -> bool {
        self.0.lock().remove(&key).is_some()
    }
}

fn bucket_map(bucket_count: usize) -> BucketMap<u64, u64> {
    BucketMapBuilder::new()
        .bucket_count(bucket_count)
        .unwrap()
        .build()
        .unwrap()
}

/// Run `NUM_THREADS` workers doing a seeded mix of reads and writes.
/// Writes are 80% puts and 20% removes.
fn run_workload<M: Workload>(map: Arc<M>, read_ratio: f64) -> Duration {
    for key in 0..PREPOPULATE {
        map.put(key, key * 10);
    }

    let start = Instant::now();
    let handles: Vec<_> = (0..NUM_THREADS)
        .map(|t| {
            let map = Arc::clone(&map);
            thread::spawn(move || {
                let mut rng = StdRng::seed_from_u64(t as u64);
                for _ in 0..OPS_PER_THREAD {
                    let key = rng.gen_range(0..KEY_SPACE);
                    if rng.gen_bool(read_ratio) {
                        black_box(map.get(key));
                    } else if rng.gen_bool(0.8) {
                        map.put(key, key * 10);
                    } else {
                        black_box(map.remove(key));
                    }
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }
    start.elapsed()
}

fn bench_put(c: &mut Criterion) {
    let mut group = c.benchmark_group("put");

    group.bench_function("mutex_hashmap", |b| {
        let map = MutexHashMap(Mutex::new(HashMap::new()));
        b.iter(|| {
            for i in 0..1000 {
                map.put(i, i);
            }
        });
    });

    for bucket_count in [16, 256, 1024] {
        group.bench_with_input(
            BenchmarkId::new("bucketmap", bucket_count),
            &bucket_count,
            |b, &bucket_count| {
                let map = bucket_map(bucket_count);
                b.iter(|| {
                    for i in 0..1000 {
                        map.put(i, i);
                    }
                });
            },
        );
    }

    group.finish();
}

fn bench_get(c: &mut Criterion) {
    let mut group = c.benchmark_group("get");

    let baseline = MutexHashMap(Mutex::new(HashMap::new()));
    for i in 0..1000 {
        baseline.put(i, i);
    }
    group.bench_function("mutex_hashmap", |b| {
        b.iter(|| {
            for i in 0..1000 {
                black_box(baseline.get(i));
            }
        });
    });

    for bucket_count in [16, 256, 1024] {
        let map = bucket_map(bucket_count);
        for i in 0..1000 {
            map.put(i, i);
        }
        group.bench_with_input(
            BenchmarkId::new("bucketmap", bucket_count),
            &bucket_count,
            |b, _| {
                b.iter(|| {
                    for i in 0..1000 {
                        black_box(map.get(&i));
                    }
                });
            },
        );
    }

    group.finish();
}

fn bench_mixed_workload(c: &mut Criterion) {
    for (label, read_ratio) in [("read_heavy", 0.7), ("balanced", 0.5), ("write_heavy", 0.3)] {
        let mut group = c.benchmark_group(format!("mixed_{}", label));
        group.sample_size(20);

        group.bench_function("mutex_hashmap", |b| {
            b.iter_custom(|iters| {
                (0..iters)
                    .map(|_| {
                        let map = Arc::new(MutexHashMap(Mutex::new(HashMap::new())));
                        run_workload(map, read_ratio)
                    })
                    .sum()
            });
        });

        for bucket_count in [16, 1024] {
            group.bench_with_input(
                BenchmarkId::new("bucketmap", bucket_count),
                &bucket_count,
                |b, &bucket_count| {
                    b.iter_custom(|iters| {
                        (0..iters)
                            .map(|_| run_workload(Arc::new(bucket_map(bucket_count)), read_ratio))
                            .sum()
                    });
                },
            );
        }

        group.finish();
    }
}

criterion_group!(benches, bench_put, bench_get, bench_mixed_workload);
criterion_main!(benches);
