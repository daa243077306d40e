use crate::bucket::Bucket;

/// Weakly consistent iterator over copies of a map's entries.
///
/// Walks the buckets in index order. For each one it takes the shared lock,
/// copies the entries into a buffer and releases the lock before yielding
/// anything, so no lock is held between calls to `next`. Entries inserted
/// or removed while iterating may or may not show up.
pub struct Iter<'a, K, V> {
    buckets: &'a [Bucket<K, V>],
    next_bucket: usize,
    buffer: std::vec::IntoIter<(K, V)>,
}

impl<'a, K, V> Iter<'a, K, V>
where
    K: Eq + Clone,
    V: Clone,
{
    pub(crate) fn new(buckets: &'a [Bucket<K, V>]) -> Self {
        Self {
            buckets,
            next_bucket: 0,
            buffer: Vec::new().into_iter(),
        }
    }

    /// Refill the buffer from the next non-empty bucket.
    fn fill_buffer(&mut self) -> bool {
        while let Some(bucket) = self.buckets.get(self.next_bucket) {
            self.next_bucket += 1;
            let entries = bucket.cloned_entries();
            if !entries.is_empty() {
                self.buffer = entries.into_iter();
                return true;
            }
        }
        false
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V>
where
    K: Eq + Clone,
    V: Clone,
{
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(item) = self.buffer.next() {
                return Some(item);
            }
            if !self.fill_buffer() {
                return None;
            }
        }
    }
}

impl<'a, K, V> std::iter::FusedIterator for Iter<'a, K, V>
where
    K: Eq + Clone,
    V: Clone,
{
}
