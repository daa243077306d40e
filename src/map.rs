use crate::bucket::Bucket;
use crate::config::Config;
use crate::error::Error;
use crate::hash::Distributor;
use crate::iter::Iter;
use crate::stats::{BucketDiagnostics, Diagnostics, Stats};
use std::hash::Hash;
use std::time::Duration;

/// Concurrent map split into a fixed number of independently locked buckets.
///
/// Every key belongs to exactly one bucket, picked by hashing the key. Each
/// bucket has its own read-write lock, so operations on keys in different
/// buckets never wait on each other, readers of the same bucket run side by
/// side, and a writer holds its bucket exclusively.
///
/// The bucket array is allocated once and never grows. No operation ever
/// holds more than one bucket lock at a time; the ones that touch every
/// bucket ([`size`](Self::size), [`clear`](Self::clear) and friends) walk
/// them in ascending index order and release each lock before taking the
/// next one. Their results are therefore not a snapshot of the whole map.
///
/// # Example
///
/// ```rust
/// use bucketmap::BucketMap;
///
/// let map = BucketMap::new();
/// map.put("key1", 1);
///
/// assert_eq!(map.get(&"key1"), Some(1));
/// assert!(map.contains(&"key1"));
/// assert!(map.remove(&"key1"));
/// assert!(!map.remove(&"key1"));
/// ```
pub struct BucketMap<K, V> {
    buckets: Box<[Bucket<K, V>]>,
    distributor: Distributor,
}

impl<K, V> BucketMap<K, V>
where
    K: Hash + Eq + Send + Sync,
    V: Send + Sync,
{
    /// Create a new map with defaults (1024 buckets, ahash).
    pub fn new() -> Self {
        Self::with_config(Config::default()).expect("default config is valid")
    }

    /// Create a new map with `bucket_count` buckets.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidBucketCount`] if `bucket_count` is 0.
    pub fn with_bucket_count(bucket_count: usize) -> Result<Self, Error> {
        Self::with_config(Config::default().bucket_count(bucket_count)?)
    }

    /// Create a new map with custom config.
    pub fn with_config(config: Config) -> Result<Self, Error> {
        if config.bucket_count == 0 {
            return Err(Error::InvalidBucketCount);
        }

        let buckets = (0..config.bucket_count)
            .map(|_| match config.capacity_per_bucket {
                Some(capacity) => Bucket::with_capacity(capacity),
                None => Bucket::new(),
            })
            .collect();

        Ok(Self {
            buckets,
            distributor: Distributor::new(config.hash_function.into(), config.bucket_count),
        })
    }

    #[inline]
    fn bucket(&self, key: &K) -> &Bucket<K, V> {
        &self.buckets[self.distributor.bucket_index(key)]
    }

    /// Number of buckets, fixed at construction.
    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// Index of the bucket that owns `key`.
    pub fn bucket_index(&self, key: &K) -> usize {
        self.distributor.bucket_index(key)
    }

    /// Get a copy of the value for `key`.
    ///
    /// Takes the bucket's shared lock, so it only waits behind a writer of
    /// the same bucket.
    ///
    /// # Example
    ///
    /// ```rust
    /// use bucketmap::BucketMap;
    ///
    /// let map = BucketMap::new();
    /// map.put("key", String::from("value"));
    /// assert_eq!(map.get(&"key").as_deref(), Some("value"));
    /// assert_eq!(map.get(&"missing"), None);
    /// ```
    pub fn get(&self, key: &K) -> Option<V>
    where
        V: Clone,
    {
        self.bucket(key).find(key)
    }

    /// Read the value for `key` through a closure instead of copying it.
    ///
    /// `f` runs while the bucket's shared lock is held.
    pub fn get_with<R>(&self, key: &K, f: impl FnOnce(&V) -> R) -> Option<R> {
        self.bucket(key).find_with(key, f)
    }

    /// Insert `value` under `key`, overwriting any existing value.
    ///
    /// # Example
    ///
    /// ```rust
    /// use bucketmap::BucketMap;
    ///
    /// let map = BucketMap::new();
    /// map.put("key", 1);
    /// map.put("key", 2);
    /// assert_eq!(map.get(&"key"), Some(2));
    /// assert_eq!(map.size(), 1);
    /// ```
    pub fn put(&self, key: K, value: V) {
        let bucket = &self.buckets[self.distributor.bucket_index(&key)];
        bucket.upsert(key, value);
    }

    /// Remove `key`. Returns whether an entry was removed.
    pub fn remove(&self, key: &K) -> bool {
        self.bucket(key).erase(key).is_some()
    }

    /// Remove `key` and hand back its value, if it was present.
    pub fn take(&self, key: &K) -> Option<V> {
        self.bucket(key).erase(key)
    }

    /// Whether `key` is present.
    ///
    /// Decided in a single shared-lock critical section, so it always
    /// agrees with a [`get`](Self::get) taken at the same instant.
    pub fn contains(&self, key: &K) -> bool {
        self.bucket(key).contains(key)
    }

    /// Mutate the value for `key` in place. Returns `false` if `key` is absent.
    ///
    /// `f` runs while the bucket's exclusive lock is held.
    ///
    /// # Example
    ///
    /// ```rust
    /// use bucketmap::BucketMap;
    ///
    /// let map = BucketMap::new();
    /// map.put("counter", 0);
    /// assert!(map.update(&"counter", |v| *v += 1));
    /// assert_eq!(map.get(&"counter"), Some(1));
    /// ```
    pub fn update(&self, key: &K, f: impl FnOnce(&mut V)) -> bool {
        self.bucket(key).update(key, f)
    }

    /// Like [`get`](Self::get), but gives up after waiting `timeout` for the lock.
    ///
    /// # Errors
    ///
    /// Returns [`Error::LockTimeout`] if the bucket stayed write-locked.
    pub fn try_get_for(&self, key: &K, timeout: Duration) -> Result<Option<V>, Error>
    where
        V: Clone,
    {
        self.bucket(key)
            .try_find_for(key, timeout)
            .ok_or(Error::LockTimeout)
    }

    /// Like [`put`](Self::put), but gives up after waiting `timeout` for the lock.
    ///
    /// # Errors
    ///
    /// Returns [`Error::LockTimeout`] if the bucket stayed locked; the map is
    /// left unchanged.
    pub fn try_put_for(&self, key: K, value: V, timeout: Duration) -> Result<(), Error> {
        let bucket = &self.buckets[self.distributor.bucket_index(&key)];
        bucket
            .try_upsert_for(key, value, timeout)
            .map(|_| ())
            .ok_or(Error::LockTimeout)
    }

    /// Like [`remove`](Self::remove), but gives up after waiting `timeout` for the lock.
    ///
    /// # Errors
    ///
    /// Returns [`Error::LockTimeout`] if the bucket stayed locked.
    pub fn try_remove_for(&self, key: &K, timeout: Duration) -> Result<bool, Error> {
        self.bucket(key)
            .try_erase_for(key, timeout)
            .map(|removed| removed.is_some())
            .ok_or(Error::LockTimeout)
    }

    /// Total number of entries.
    ///
    /// Sums each bucket's count under its shared lock, one bucket at a time.
    /// With writers running the result need not match any single instant.
    pub fn size(&self) -> usize {
        self.buckets.iter().map(|bucket| bucket.len()).sum()
    }

    /// Same as [`size`](Self::size).
    pub fn len(&self) -> usize {
        self.size()
    }

    /// Whether every bucket was empty when visited.
    pub fn is_empty(&self) -> bool {
        self.buckets.iter().all(|bucket| bucket.len() == 0)
    }

    /// Remove every entry.
    ///
    /// Buckets are cleared one at a time. A concurrent `put` into a bucket
    /// that was already cleared survives; one into a bucket not yet reached
    /// may be wiped.
    pub fn clear(&self) {
        for bucket in self.buckets.iter() {
            bucket.clear();
        }
    }

    /// Entry count of every bucket, in bucket index order.
    pub fn bucket_loads(&self) -> Vec<usize> {
        self.buckets.iter().map(|bucket| bucket.len()).collect()
    }

    /// Get detailed statistics about the map and its buckets.
    pub fn stats(&self) -> Stats {
        let bucket_sizes = self.bucket_loads();
        let operations = self.buckets.iter().map(|bucket| bucket.stats()).collect();
        let size = bucket_sizes.iter().sum();

        Stats {
            size,
            bucket_sizes,
            operations,
        }
    }

    /// Load distribution summary, useful for spotting hot buckets.
    pub fn diagnostics(&self) -> Diagnostics {
        let buckets = self
            .buckets
            .iter()
            .map(|bucket| BucketDiagnostics {
                entries: bucket.len(),
                ops: bucket.stats(),
            })
            .collect();
        Diagnostics::from_buckets(buckets)
    }

    /// Iterate over copies of all entries.
    ///
    /// Buckets are copied out one at a time under their shared lock, so the
    /// iterator never holds a lock between calls to `next`. Entries changed
    /// concurrently may or may not be seen.
    ///
    /// # Example
    ///
    /// ```rust
    /// use bucketmap::BucketMap;
    ///
    /// let map = BucketMap::new();
    /// map.put("a", 1);
    /// map.put("b", 2);
    ///
    /// let total: i32 = map.iter().map(|(_, v)| v).sum();
    /// assert_eq!(total, 3);
    /// ```
    pub fn iter(&self) -> Iter<'_, K, V>
    where
        K: Clone,
        V: Clone,
    {
        Iter::new(&self.buckets)
    }
}

impl<K, V> Default for BucketMap<K, V>
where
    K: Hash + Eq + Send + Sync,
    V: Send + Sync,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> std::fmt::Debug for BucketMap<K, V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BucketMap")
            .field("bucket_count", &self.buckets.len())
            .finish_non_exhaustive()
    }
}
