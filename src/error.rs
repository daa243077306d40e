/// Errors that can occur when building or operating on a BucketMap.
///
/// A missing key is never an error: lookups report absence through
/// `Option` or `bool`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The bucket count is invalid (must be greater than 0).
    InvalidBucketCount,
    /// A bounded-wait operation could not acquire its bucket lock in time.
    LockTimeout,
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::InvalidBucketCount => write!(f, "bucket count must be greater than 0"),
            Error::LockTimeout => write!(f, "timed out waiting for bucket lock"),
        }
    }
}

impl std::error::Error for Error {}
