//! Bucket store: a contiguous array of chains.
//!
//! Bucket membership depends on the live capacity, so a table never moves
//! entries between its own buckets. Changing the capacity builds a fresh
//! array and relocates every entry into it.

#[derive(Debug)]
pub(crate) struct Entry<K, V> {
    pub(crate) key: K,
    pub(crate) value: V,
    // Output of the dictionary's hasher for `key`; fixed for the entry's life.
    pub(crate) hash: u64,
}

/// Entries sharing one `hash % capacity` index, in insertion order.
pub(crate) type Bucket<K, V> = Vec<Entry<K, V>>;

#[inline]
pub(crate) fn bucket_index(hash: u64, capacity: usize) -> usize {
    (hash % capacity as u64) as usize
}

#[derive(Debug)]
pub(crate) struct Table<K, V> {
    buckets: Vec<Bucket<K, V>>,
}

impl<K, V> Table<K, V> {
    /// Allocates `capacity` empty buckets. Callers guarantee `capacity > 0`.
    pub(crate) fn new(capacity: usize) -> Self {
        debug_assert!(capacity > 0, "table needs at least one bucket");
        Self {
            buckets: Self::empty_buckets(capacity),
        }
    }

    fn empty_buckets(capacity: usize) -> Vec<Bucket<K, V>> {
        let mut buckets = Vec::with_capacity(capacity);
        buckets.resize_with(capacity, Vec::new);
        buckets
    }

    pub(crate) fn capacity(&self) -> usize {
        self.buckets.len()
    }

    pub(crate) fn buckets(&self) -> &[Bucket<K, V>] {
        &self.buckets
    }

    pub(crate) fn buckets_mut(&mut self) -> &mut [Bucket<K, V>] {
        &mut self.buckets
    }

    pub(crate) fn into_buckets(self) -> Vec<Bucket<K, V>> {
        self.buckets
    }

    pub(crate) fn bucket(&self, hash: u64) -> &Bucket<K, V> {
        &self.buckets[bucket_index(hash, self.capacity())]
    }

    pub(crate) fn bucket_mut(&mut self, hash: u64) -> &mut Bucket<K, V> {
        let i = bucket_index(hash, self.capacity());
        &mut self.buckets[i]
    }

    /// Replaces the bucket array with `capacity` buckets and moves every
    /// entry to `hash % capacity`, walking the old array bucket by bucket.
    ///
    /// Each new bucket is allocated at its final length before the old array
    /// is touched, so an allocation failure leaves the table as it was and
    /// the relocation loop never allocates.
    pub(crate) fn rebuild(&mut self, capacity: usize) {
        debug_assert!(capacity > 0, "table needs at least one bucket");
        let mut next: Vec<Bucket<K, V>> = self
            .chain_lengths(capacity)
            .into_iter()
            .map(Vec::with_capacity)
            .collect();
        for bucket in self.buckets.drain(..) {
            for entry in bucket {
                next[bucket_index(entry.hash, capacity)].push(entry);
            }
        }
        self.buckets = next;
    }

    /// Length of every chain if the table held `capacity` buckets.
    fn chain_lengths(&self, capacity: usize) -> Vec<usize> {
        let mut lengths = vec![0; capacity];
        for entry in self.buckets.iter().flatten() {
            lengths[bucket_index(entry.hash, capacity)] += 1;
        }
        lengths
    }

    /// Drops every entry and reallocates at `capacity`.
    pub(crate) fn reset(&mut self, capacity: usize) {
        self.buckets = Self::empty_buckets(capacity);
    }

    pub(crate) fn longest_chain(&self) -> usize {
        self.buckets.iter().map(Vec::len).max().unwrap_or(0)
    }

    pub(crate) fn empty_buckets_count(&self) -> usize {
        self.buckets.iter().filter(|b| b.is_empty()).count()
    }
}
