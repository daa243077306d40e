use crate::error::Error;
use crate::hash::HashFunction;

/// Bucket count used by [`BucketMap::new`](crate::BucketMap::new) and [`Config::default`].
pub const DEFAULT_BUCKET_COUNT: usize = 1024;

/// Configuration for a BucketMap instance.
#[derive(Debug, Clone)]
pub struct Config {
    pub(crate) bucket_count: usize,
    pub(crate) hash_function: HashFunction,
    pub(crate) capacity_per_bucket: Option<usize>,
}

impl Config {
    /// Create a new config with defaults (1024 buckets, ahash).
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of buckets. Must be greater than 0.
    ///
    /// Power-of-two counts select buckets by masking the hash, any other
    /// count falls back to a modulo.
    pub fn bucket_count(mut self, count: usize) -> Result<Self, Error> {
        if count == 0 {
            return Err(Error::InvalidBucketCount);
        }
        self.bucket_count = count;
        Ok(self)
    }

    /// Set the hash function to use.
    pub fn hash_function(mut self, hash_fn: HashFunction) -> Self {
        self.hash_function = hash_fn;
        self
    }

    /// Pre-allocate room for `capacity` entries in every bucket.
    pub fn capacity_per_bucket(mut self, capacity: usize) -> Self {
        self.capacity_per_bucket = Some(capacity);
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bucket_count: DEFAULT_BUCKET_COUNT,
            hash_function: HashFunction::AHash,
            capacity_per_bucket: None,
        }
    }
}

/// Builder for creating a BucketMap with custom configuration.
#[derive(Debug, Default)]
pub struct BucketMapBuilder {
    config: Config,
}

impl BucketMapBuilder {
    /// Create a new builder with default configuration.
    pub fn new() -> Self {
        Self {
            config: Config::default(),
        }
    }

    /// Set the number of buckets. Must be greater than 0.
    pub fn bucket_count(mut self, count: usize) -> Result<Self, Error> {
        self.config = self.config.bucket_count(count)?;
        Ok(self)
    }

    /// Set the hash function to use.
    pub fn hash_function(mut self, hash_fn: HashFunction) -> Self {
        self.config = self.config.hash_function(hash_fn);
        self
    }

    /// Pre-allocate room for `capacity` entries in every bucket.
    pub fn capacity_per_bucket(mut self, capacity: usize) -> Self {
        self.config = self.config.capacity_per_bucket(capacity);
        self
    }

    /// Build a BucketMap with the configured settings.
    pub fn build<K, V>(self) -> Result<crate::BucketMap<K, V>, Error>
    where
        K: std::hash::Hash + Eq + Send + Sync,
        V: Send + Sync,
    {
        crate::BucketMap::with_config(self.config)
    }
}
