use crate::stats::{BucketOps, BucketStats};
use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::Duration;
#[cfg(feature = "lock-timing")]
use std::time::Instant;

type Entries<K, V> = Vec<(K, V)>;

/// A single bucket: an unordered run of entries behind a read-write lock.
///
/// Lookups are linear scans. Buckets are expected to stay small (key count
/// divided by bucket count), so a scan costs about as much as hashing would.
/// Removal swaps the last entry into the hole, so it never shifts the rest.
pub(crate) struct Bucket<K, V> {
    entries: RwLock<Entries<K, V>>,
    stats: BucketStats,
}

impl<K, V> Bucket<K, V>
where
    K: Eq,
{
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: RwLock::new(Vec::with_capacity(capacity)),
            stats: BucketStats::new(),
        }
    }

    #[inline]
    fn read(&self) -> RwLockReadGuard<'_, Entries<K, V>> {
        #[cfg(feature = "lock-timing")]
        let start = Instant::now();
        let guard = self.entries.read();
        #[cfg(feature = "lock-timing")]
        self.stats.record_lock_wait(start.elapsed().as_nanos() as u64);
        self.stats.record_lock_acquisition();
        guard
    }

    #[inline]
    fn write(&self) -> RwLockWriteGuard<'_, Entries<K, V>> {
        #[cfg(feature = "lock-timing")]
        let start = Instant::now();
        let guard = self.entries.write();
        #[cfg(feature = "lock-timing")]
        self.stats.record_lock_wait(start.elapsed().as_nanos() as u64);
        self.stats.record_lock_acquisition();
        guard
    }

    fn try_read_for(&self, timeout: Duration) -> Option<RwLockReadGuard<'_, Entries<K, V>>> {
        #[cfg(feature = "lock-timing")]
        let start = Instant::now();
        let guard = self.entries.try_read_for(timeout)?;
        #[cfg(feature = "lock-timing")]
        self.stats.record_lock_wait(start.elapsed().as_nanos() as u64);
        self.stats.record_lock_acquisition();
        Some(guard)
    }

    fn try_write_for(&self, timeout: Duration) -> Option<RwLockWriteGuard<'_, Entries<K, V>>> {
        #[cfg(feature = "lock-timing")]
        let start = Instant::now();
        let guard = self.entries.try_write_for(timeout)?;
        #[cfg(feature = "lock-timing")]
        self.stats.record_lock_wait(start.elapsed().as_nanos() as u64);
        self.stats.record_lock_acquisition();
        Some(guard)
    }

    #[inline]
    fn position(entries: &[(K, V)], key: &K) -> Option<usize> {
        entries.iter().position(|(k, _)| k == key)
    }

    fn lookup_in<R>(&self, entries: &[(K, V)], key: &K, f: impl FnOnce(&V) -> R) -> Option<R> {
        let result = entries.iter().find(|(k, _)| k == key).map(|(_, v)| f(v));
        if result.is_some() {
            self.stats.record_read();
        }
        result
    }

    fn upsert_in(&self, entries: &mut Entries<K, V>, key: K, value: V) -> bool {
        self.stats.record_write();
        match Self::position(entries, &key) {
            Some(idx) => {
                entries[idx].1 = value;
                false
            }
            None => {
                entries.push((key, value));
                true
            }
        }
    }

    fn erase_in(&self, entries: &mut Entries<K, V>, key: &K) -> Option<V> {
        let idx = Self::position(entries, key)?;
        self.stats.record_remove(1);
        Some(entries.swap_remove(idx).1)
    }

    /// Clone out the value for `key` under the shared lock.
    pub fn find(&self, key: &K) -> Option<V>
    where
        V: Clone,
    {
        let entries = self.read();
        self.lookup_in(&entries, key, V::clone)
    }

    /// Run `f` on the value for `key` while the shared lock is held.
    pub fn find_with<R>(&self, key: &K, f: impl FnOnce(&V) -> R) -> Option<R> {
        let entries = self.read();
        self.lookup_in(&entries, key, f)
    }

    /// Presence check in a single shared-lock critical section.
    pub fn contains(&self, key: &K) -> bool {
        let entries = self.read();
        Self::position(&entries, key).is_some()
    }

    /// Replace the value of an existing entry or append a new one.
    /// Returns `true` if a new entry was appended.
    pub fn upsert(&self, key: K, value: V) -> bool {
        let mut entries = self.write();
        self.upsert_in(&mut entries, key, value)
    }

    /// Mutate an existing value in place. Returns `false` if `key` is absent.
    pub fn update(&self, key: &K, f: impl FnOnce(&mut V)) -> bool {
        let mut entries = self.write();
        match Self::position(&entries, key) {
            Some(idx) => {
                f(&mut entries[idx].1);
                self.stats.record_write();
                true
            }
            None => false,
        }
    }

    /// Remove the entry for `key`, returning its value.
    pub fn erase(&self, key: &K) -> Option<V> {
        let mut entries = self.write();
        self.erase_in(&mut entries, key)
    }

    /// Bounded-wait variant of [`Bucket::find`]. `None` means the lock timed out.
    pub fn try_find_for(&self, key: &K, timeout: Duration) -> Option<Option<V>>
    where
        V: Clone,
    {
        let entries = self.try_read_for(timeout)?;
        Some(self.lookup_in(&entries, key, V::clone))
    }

    /// Bounded-wait variant of [`Bucket::upsert`]. `None` means the lock timed out.
    pub fn try_upsert_for(&self, key: K, value: V, timeout: Duration) -> Option<bool> {
        let mut entries = self.try_write_for(timeout)?;
        Some(self.upsert_in(&mut entries, key, value))
    }

    /// Bounded-wait variant of [`Bucket::erase`]. `None` means the lock timed out.
    pub fn try_erase_for(&self, key: &K, timeout: Duration) -> Option<Option<V>> {
        let mut entries = self.try_write_for(timeout)?;
        Some(self.erase_in(&mut entries, key))
    }

    /// Number of entries, read under the shared lock.
    pub fn len(&self) -> usize {
        self.read().len()
    }

    /// Drop every entry in this bucket.
    pub fn clear(&self) {
        let mut entries = self.write();
        let removed = entries.len() as u64;
        entries.clear();
        if removed > 0 {
            self.stats.record_remove(removed);
        }
    }

    /// Copy out all entries while holding the shared lock once.
    pub fn cloned_entries(&self) -> Vec<(K, V)>
    where
        K: Clone,
        V: Clone,
    {
        self.read().to_vec()
    }

    /// Get a snapshot of statistics for this bucket.
    pub fn stats(&self) -> BucketOps {
        self.stats.snapshot()
    }
}

impl<K, V> Default for Bucket<K, V>
where
    K: Eq,
{
    fn default() -> Self {
        Self::new()
    }
}
