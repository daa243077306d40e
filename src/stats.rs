//! Statistics and diagnostics types.

#[cfg(feature = "metrics")]
use std::sync::atomic::{AtomicU64, Ordering};

/// Per-bucket operation statistics.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BucketOps {
    /// Number of successful lookups on this bucket.
    pub reads: u64,
    /// Number of inserts and in-place updates on this bucket.
    pub writes: u64,
    /// Number of entries removed from this bucket.
    pub removes: u64,
    /// Number of lock acquisitions (0 when metrics feature disabled).
    pub lock_acquisitions: u64,
    /// Cumulative lock wait time in nanoseconds (0 when lock-timing disabled).
    pub lock_wait_nanos: u64,
}

impl BucketOps {
    /// Reads, writes and removes combined.
    pub fn total(&self) -> u64 {
        self.reads + self.writes + self.removes
    }
}

/// Thread-safe statistics tracker for a single bucket.
#[cfg(feature = "metrics")]
pub(crate) struct BucketStats {
    reads: AtomicU64,
    writes: AtomicU64,
    removes: AtomicU64,
    lock_acquisitions: AtomicU64,
    #[cfg(feature = "lock-timing")]
    lock_wait_nanos: AtomicU64,
}

#[cfg(feature = "metrics")]
impl BucketStats {
    pub fn new() -> Self {
        Self {
            reads: AtomicU64::new(0),
            writes: AtomicU64::new(0),
            removes: AtomicU64::new(0),
            lock_acquisitions: AtomicU64::new(0),
            #[cfg(feature = "lock-timing")]
            lock_wait_nanos: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn record_read(&self) {
        self.reads.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_write(&self) {
        self.writes.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_remove(&self, count: u64) {
        self.removes.fetch_add(count, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_lock_acquisition(&self) {
        self.lock_acquisitions.fetch_add(1, Ordering::Relaxed);
    }

    #[cfg(feature = "lock-timing")]
    #[inline]
    pub fn record_lock_wait(&self, nanos: u64) {
        self.lock_wait_nanos.fetch_add(nanos, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> BucketOps {
        BucketOps {
            reads: self.reads.load(Ordering::Relaxed),
            writes: self.writes.load(Ordering::Relaxed),
            removes: self.removes.load(Ordering::Relaxed),
            lock_acquisitions: self.lock_acquisitions.load(Ordering::Relaxed),
            #[cfg(feature = "lock-timing")]
            lock_wait_nanos: self.lock_wait_nanos.load(Ordering::Relaxed),
            #[cfg(not(feature = "lock-timing"))]
            lock_wait_nanos: 0,
        }
    }
}

/// Zero-sized placeholder when metrics are disabled.
#[cfg(not(feature = "metrics"))]
pub(crate) struct BucketStats;

#[cfg(not(feature = "metrics"))]
impl BucketStats {
    pub fn new() -> Self {
        BucketStats
    }

    #[inline]
    pub fn record_read(&self) {}

    #[inline]
    pub fn record_write(&self) {}

    #[inline]
    pub fn record_remove(&self, _count: u64) {}

    #[inline]
    pub fn record_lock_acquisition(&self) {}

    pub fn snapshot(&self) -> BucketOps {
        BucketOps::default()
    }
}

impl Default for BucketStats {
    fn default() -> Self {
        Self::new()
    }
}

/// Aggregate statistics for a BucketMap instance.
///
/// Gathered one bucket at a time, so under concurrent writes the numbers
/// need not describe any single instant of the whole map.
#[derive(Debug, Clone)]
pub struct Stats {
    /// Total number of entries across all buckets.
    pub size: usize,
    /// Number of entries in each bucket.
    pub bucket_sizes: Vec<usize>,
    /// Operation counts for each bucket.
    pub operations: Vec<BucketOps>,
}

/// Per-bucket diagnostics snapshot.
#[derive(Debug, Clone)]
pub struct BucketDiagnostics {
    /// Number of entries in this bucket.
    pub entries: usize,
    /// Operation counters (all 0 when metrics disabled).
    pub ops: BucketOps,
}

/// Structured snapshot for performance introspection.
#[derive(Debug, Clone)]
pub struct Diagnostics {
    /// Total number of entries across all buckets.
    pub total_entries: usize,
    /// Per-bucket diagnostics.
    pub buckets: Vec<BucketDiagnostics>,
    /// Total read + write + remove operations (0 when metrics disabled).
    pub total_operations: u64,
    /// Average load (entries) per bucket.
    pub avg_load_per_bucket: f64,
    /// Max load / avg load ratio. 0.0 for an empty map.
    pub max_load_ratio: f64,
}

impl Diagnostics {
    pub(crate) fn from_buckets(buckets: Vec<BucketDiagnostics>) -> Self {
        let total_entries: usize = buckets.iter().map(|b| b.entries).sum();
        let total_operations: u64 = buckets.iter().map(|b| b.ops.total()).sum();
        let max_load = buckets.iter().map(|b| b.entries).max().unwrap_or(0);

        let avg_load_per_bucket = if buckets.is_empty() {
            0.0
        } else {
            total_entries as f64 / buckets.len() as f64
        };
        let max_load_ratio = if avg_load_per_bucket > 0.0 {
            max_load as f64 / avg_load_per_bucket
        } else {
            0.0
        };

        Self {
            total_entries,
            buckets,
            total_operations,
            avg_load_per_bucket,
            max_load_ratio,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bucket(entries: usize) -> BucketDiagnostics {
        BucketDiagnostics {
            entries,
            ops: BucketOps::default(),
        }
    }

    #[test]
    fn test_diagnostics_load_ratio() {
        let diag = Diagnostics::from_buckets(vec![bucket(2), bucket(0), bucket(4), bucket(2)]);
        assert_eq!(diag.total_entries, 8);
        assert_eq!(diag.avg_load_per_bucket, 2.0);
        assert_eq!(diag.max_load_ratio, 2.0);
    }

    #[test]
    fn test_diagnostics_empty() {
        let diag = Diagnostics::from_buckets(vec![bucket(0), bucket(0)]);
        assert_eq!(diag.total_entries, 0);
        assert_eq!(diag.max_load_ratio, 0.0);
    }
}
