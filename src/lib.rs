//! # BucketMap
//!
//! A concurrent map that splits its key space across a fixed number of
//! buckets, each guarded by its own read-write lock.
//!
//! Operations on keys that land in different buckets never block each
//! other. Operations on the same bucket are serialized by its lock: readers
//! share it, writers hold it alone. The bucket array is sized once at
//! construction and never resized.
//!
//! ## Features
//!
//! - **Per-bucket locking**: a writer only blocks its own bucket
//! - **Reader concurrency**: `get` and `contains` take shared locks
//! - **Deterministic**: the same key always maps to the same bucket
//! - **Deadlock-free aggregates**: `size` and `clear` hold one lock at a time
//! - **Bounded waits**: `try_*_for` variants give up after a timeout
//! - **Statistics**: optional per-bucket operation and lock counters
//!
//! ## Example
//!
//! ```rust
//! use bucketmap::BucketMap;
//!
//! let map = BucketMap::new();
//!
//! map.put("key1", "value1");
//! map.put("key2", "value2");
//!
//! if let Some(value) = map.get(&"key1") {
//!     println!("Found: {}", value);
//! }
//!
//! assert!(map.contains(&"key2"));
//! assert!(map.remove(&"key2"));
//! assert_eq!(map.size(), 1);
//!
//! map.clear();
//! assert!(map.is_empty());
//! ```
//!
//! ## Configuration
//!
//! ```rust
//! use bucketmap::{BucketMapBuilder, HashFunction};
//!
//! let map = BucketMapBuilder::new()
//!     .bucket_count(64)?
//!     .hash_function(HashFunction::AHash)
//!     .capacity_per_bucket(4)
//!     .build::<String, i32>()?;
//! # Ok::<(), bucketmap::Error>(())
//! ```

#![deny(missing_docs)]
#![warn(clippy::all)]

mod bucket;
/// Configuration and builder types.
pub mod config;
/// Error types.
pub mod error;
/// Key hashing and bucket selection.
pub mod hash;
/// Iterator implementations.
pub mod iter;
/// Main BucketMap implementation.
pub mod map;
/// Statistics and metrics collection.
pub mod stats;

pub use config::{BucketMapBuilder, Config, DEFAULT_BUCKET_COUNT};
pub use error::Error;
pub use hash::{Distributor, HashFunction};
pub use map::BucketMap;
pub use stats::{BucketOps, Diagnostics, Stats};
