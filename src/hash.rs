use std::hash::{BuildHasher, Hash, Hasher};

/// Which hash function to use for bucket selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HashFunction {
    /// Use ahash (default, fast and well-distributed).
    #[default]
    AHash,
    /// Use fxhash (faster but potentially less distributed).
    #[cfg(feature = "fxhash")]
    FxHash,
}

/// Hash function implementation for bucket assignment.
///
/// Both variants run with fixed keys, so a key hashes to the same value
/// for the whole life of the process.
#[derive(Debug, Clone, Copy, Default)]
pub enum BucketHasher {
    /// AHash implementation (default, fast and well-distributed).
    #[default]
    AHash,
    /// FxHash implementation (faster but potentially less distributed).
    #[cfg(feature = "fxhash")]
    FxHash,
}

impl BucketHasher {
    /// Hash a key to determine which bucket it belongs to.
    pub fn hash_key<K: Hash + ?Sized>(&self, key: &K) -> u64 {
        match self {
            BucketHasher::AHash => {
                let mut hasher = ahash::RandomState::with_seeds(0, 0, 0, 0).build_hasher();
                key.hash(&mut hasher);
                hasher.finish()
            }
            #[cfg(feature = "fxhash")]
            BucketHasher::FxHash => {
                let mut hasher = fxhash::FxHasher::default();
                key.hash(&mut hasher);
                hasher.finish()
            }
        }
    }
}

impl From<HashFunction> for BucketHasher {
    fn from(hash_fn: HashFunction) -> Self {
        match hash_fn {
            HashFunction::AHash => BucketHasher::AHash,
            #[cfg(feature = "fxhash")]
            HashFunction::FxHash => BucketHasher::FxHash,
        }
    }
}

/// How a 64-bit hash is folded into `[0, bucket_count)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Reduction {
    /// `hash & mask`, for power-of-two bucket counts.
    Mask(usize),
    /// `hash % count` for everything else.
    Modulo(usize),
}

/// Maps a key to the index of the bucket that owns it.
///
/// Stateless apart from its configuration, which never changes after
/// construction; the same key always lands in the same bucket.
#[derive(Debug, Clone, Copy)]
pub struct Distributor {
    hasher: BucketHasher,
    reduction: Reduction,
}

impl Distributor {
    /// Create a distributor over `bucket_count` buckets.
    ///
    /// `bucket_count` must be non-zero; callers validate it first.
    pub(crate) fn new(hasher: BucketHasher, bucket_count: usize) -> Self {
        debug_assert!(bucket_count > 0);
        let reduction = if bucket_count.is_power_of_two() {
            Reduction::Mask(bucket_count - 1)
        } else {
            Reduction::Modulo(bucket_count)
        };
        Self { hasher, reduction }
    }

    /// Number of buckets this distributor spreads keys over.
    pub fn bucket_count(&self) -> usize {
        match self.reduction {
            Reduction::Mask(mask) => mask + 1,
            Reduction::Modulo(count) => count,
        }
    }

    /// Bucket index for `key`, always in `[0, bucket_count)`.
    #[inline]
    pub fn bucket_index<K: Hash + ?Sized>(&self, key: &K) -> usize {
        let hash = self.hasher.hash_key(key);
        match self.reduction {
            Reduction::Mask(mask) => (hash as usize) & mask,
            Reduction::Modulo(count) => (hash % count as u64) as usize,
        }
    }
}
