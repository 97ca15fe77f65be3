//! Dictionary: separate-chaining map whose bucket array doubles or halves
//! as the load factor crosses the [`ResizePolicy`] bands.

use crate::error::{CapacityError, InvariantError};
use crate::policy::{Resize, ResizePolicy};
use crate::table::{bucket_index, Bucket, Entry, Table};
use core::borrow::Borrow;
use core::fmt;
use core::hash::{BuildHasher, BuildHasherDefault, Hash};
use core::iter::Flatten;
use core::ops::Index;
use log::{debug, trace};
use std::collections::hash_map::{DefaultHasher, RandomState};

/// Number of buckets a dictionary starts with unless told otherwise.
pub const DEFAULT_CAPACITY: usize = 10;

/// Unseeded hasher: the same key hashes to the same bucket in every process.
pub type FixedState = BuildHasherDefault<DefaultHasher>;

pub struct Dictionary<K, V, S = RandomState> {
    hasher: S,
    pub(crate) table: Table<K, V>,
    count: usize,
    // `clear` restores this capacity.
    initial_capacity: usize,
    policy: ResizePolicy,
}

/// Snapshot of how entries are spread over the buckets.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct TableStats {
    pub capacity: usize,
    pub count: usize,
    pub longest_chain: usize,
    pub empty_buckets: usize,
}

impl TableStats {
    pub fn load_factor(&self) -> f64 {
        self.count as f64 / self.capacity as f64
    }
}

impl<K, V> Dictionary<K, V>
where
    K: Eq + Hash,
{
    pub fn new() -> Self {
        Self::with_hasher(Default::default())
    }

    /// Creates an empty dictionary with `capacity` buckets.
    ///
    /// Returns [`CapacityError::Zero`] for a zero capacity.
    pub fn with_capacity(capacity: usize) -> Result<Self, CapacityError> {
        Self::with_capacity_and_hasher(capacity, Default::default())
    }
}

impl<K, V> Default for Dictionary<K, V>
where
    K: Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}

// Accessors that never hash.
impl<K, V, S> Dictionary<K, V, S> {
    /// Number of keys currently stored.
    pub fn count(&self) -> usize {
        self.count
    }
    pub fn len(&self) -> usize {
        self.count
    }
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Number of buckets in the current table.
    pub fn capacity(&self) -> usize {
        self.table.capacity()
    }

    /// Average chain length, `count / capacity`.
    pub fn load_factor(&self) -> f64 {
        self.count as f64 / self.table.capacity() as f64
    }

    pub fn policy(&self) -> &ResizePolicy {
        &self.policy
    }

    pub fn hasher(&self) -> &S {
        &self.hasher
    }

    pub fn stats(&self) -> TableStats {
        TableStats {
            capacity: self.table.capacity(),
            count: self.count,
            longest_chain: self.table.longest_chain(),
            empty_buckets: self.table.empty_buckets_count(),
        }
    }

    /// Drops every entry and reallocates the table at the capacity the
    /// dictionary was created with.
    pub fn clear(&mut self) {
        self.table.reset(self.initial_capacity);
        self.count = 0;
    }

    /// Visits entries bucket by bucket. The order changes whenever the
    /// table is rebuilt.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            inner: self.table.buckets().iter().flatten(),
            remaining: self.count,
        }
    }

    pub fn iter_mut(&mut self) -> IterMut<'_, K, V> {
        IterMut {
            inner: self.table.buckets_mut().iter_mut().flatten(),
            remaining: self.count,
        }
    }

    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys { inner: self.iter() }
    }

    pub fn values(&self) -> Values<'_, K, V> {
        Values { inner: self.iter() }
    }

    pub fn values_mut(&mut self) -> ValuesMut<'_, K, V> {
        ValuesMut {
            inner: self.iter_mut(),
        }
    }
}

impl<K, V, S> Dictionary<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    pub fn with_hasher(hasher: S) -> Self {
        Self::from_parts(DEFAULT_CAPACITY, hasher)
    }

    pub fn with_capacity_and_hasher(capacity: usize, hasher: S) -> Result<Self, CapacityError> {
        if capacity == 0 {
            return Err(CapacityError::Zero);
        }
        Ok(Self::from_parts(capacity, hasher))
    }

    fn from_parts(capacity: usize, hasher: S) -> Self {
        Self {
            hasher,
            table: Table::new(capacity),
            count: 0,
            initial_capacity: capacity,
            policy: ResizePolicy::default(),
        }
    }

    /// Replaces the resize policy. It is first consulted by the next
    /// `associate` or `remove`.
    pub fn with_policy(mut self, policy: ResizePolicy) -> Self {
        self.policy = policy;
        self
    }

    fn make_hash<Q>(&self, q: &Q) -> u64
    where
        Q: ?Sized + Hash,
    {
        self.hasher.hash_one(q)
    }

    pub fn get<Q>(&self, q: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.get_key_value(q).map(|(_, v)| v)
    }

    pub fn get_key_value<Q>(&self, q: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let hash = self.make_hash(q);
        self.table
            .bucket(hash)
            .iter()
            .find(|e| e.hash == hash && e.key.borrow() == q)
            .map(|e| (&e.key, &e.value))
    }

    /// Mutable access to a stored value. Never resizes.
    pub fn get_mut<Q>(&mut self, q: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let hash = self.make_hash(q);
        self.table
            .bucket_mut(hash)
            .iter_mut()
            .find(|e| e.hash == hash && e.key.borrow() == q)
            .map(|e| &mut e.value)
    }

    pub fn contains_key<Q>(&self, q: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.get_key_value(q).is_some()
    }

    /// Associates `key` with `value`.
    ///
    /// An existing entry keeps its key and position in its chain and only
    /// has its value replaced; the old value is returned. Otherwise the pair
    /// is appended to the end of its chain. Either way the resize policy is
    /// consulted afterwards.
    pub fn associate(&mut self, key: K, value: V) -> Option<V> {
        let hash = self.make_hash(&key);
        let bucket = self.table.bucket_mut(hash);
        let previous = match bucket.iter_mut().find(|e| e.hash == hash && e.key == key) {
            Some(entry) => Some(core::mem::replace(&mut entry.value, value)),
            None => {
                bucket.push(Entry { key, value, hash });
                self.count += 1;
                None
            }
        };
        self.apply_policy();
        previous
    }

    /// Removes `q` and returns its value. Removing an absent key is a no-op
    /// that still consults the resize policy.
    pub fn remove<Q>(&mut self, q: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.remove_entry(q).map(|(_, v)| v)
    }

    pub fn remove_entry<Q>(&mut self, q: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let hash = self.make_hash(q);
        let bucket = self.table.bucket_mut(hash);
        // `Vec::remove` keeps the rest of the chain in order.
        let removed = bucket
            .iter()
            .position(|e| e.hash == hash && e.key.borrow() == q)
            .map(|i| bucket.remove(i));
        if removed.is_some() {
            self.count -= 1;
        }
        self.apply_policy();
        removed.map(|e| (e.key, e.value))
    }

    /// Runs one policy check against the live count and capacity and
    /// rebuilds the table if it asks for a new capacity.
    fn apply_policy(&mut self) {
        let capacity = self.table.capacity();
        let decision = self.policy.check(self.count, capacity);
        let Some(target) = decision.target(capacity) else {
            return;
        };
        trace!(
            "resize policy: {:?} at count={} capacity={}",
            decision,
            self.count,
            capacity
        );
        self.table.rebuild(target);
        debug!(
            "rehashed {} entries from {} to {} buckets{}",
            self.count,
            capacity,
            target,
            if decision == Resize::Grow { " (grow)" } else { " (shrink)" }
        );
    }

    /// Re-derives every structural invariant from scratch: the table has
    /// buckets, each entry sits in `hash(key) % capacity` with an up-to-date
    /// cached hash, no key is stored twice and `count` matches the chains.
    pub fn validate(&self) -> Result<(), InvariantError> {
        let capacity = self.table.capacity();
        if capacity == 0 {
            return Err(InvariantError::EmptyTable);
        }
        let mut actual = 0;
        for (i, bucket) in self.table.buckets().iter().enumerate() {
            for (j, entry) in bucket.iter().enumerate() {
                if self.make_hash(&entry.key) != entry.hash {
                    return Err(InvariantError::StaleHash { bucket: i });
                }
                let expected = bucket_index(entry.hash, capacity);
                if expected != i {
                    return Err(InvariantError::MisplacedEntry {
                        found: i,
                        expected,
                        capacity,
                    });
                }
                // Equal keys hash alike, so duplicates can only share a bucket.
                if bucket[..j].iter().any(|e| e.key == entry.key) {
                    return Err(InvariantError::DuplicateKey { bucket: i });
                }
            }
            actual += bucket.len();
        }
        if actual != self.count {
            return Err(InvariantError::CountMismatch {
                count: self.count,
                actual,
            });
        }
        Ok(())
    }
}

impl<K, V, S> fmt::Debug for Dictionary<K, V, S>
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V, S> Extend<(K, V)> for Dictionary<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (k, v) in iter {
            self.associate(k, v);
        }
    }
}

impl<K, V, S> FromIterator<(K, V)> for Dictionary<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher + Default,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut d = Self::with_hasher(S::default());
        d.extend(iter);
        d
    }
}

impl<K, Q, V, S> Index<&Q> for Dictionary<K, V, S>
where
    K: Eq + Hash + Borrow<Q>,
    Q: ?Sized + Eq + Hash,
    S: BuildHasher,
{
    type Output = V;

    /// # Panics
    ///
    /// Panics if the key is not present.
    fn index(&self, key: &Q) -> &V {
        self.get(key).expect("key not present in dictionary")
    }
}

/// Iterator over `(&K, &V)` in bucket order.
pub struct Iter<'a, K, V> {
    inner: Flatten<core::slice::Iter<'a, Bucket<K, V>>>,
    remaining: usize,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);
    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let e = self.inner.next()?;
        self.remaining -= 1;
        Some((&e.key, &e.value))
    }
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

/// Iterator over `(&K, &mut V)` in bucket order.
pub struct IterMut<'a, K, V> {
    inner: Flatten<core::slice::IterMut<'a, Bucket<K, V>>>,
    remaining: usize,
}

impl<'a, K, V> Iterator for IterMut<'a, K, V> {
    type Item = (&'a K, &'a mut V);
    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let e = self.inner.next()?;
        self.remaining -= 1;
        Some((&e.key, &mut e.value))
    }
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for IterMut<'_, K, V> {}

/// Owning iterator; consumes the dictionary.
pub struct IntoIter<K, V> {
    inner: Flatten<std::vec::IntoIter<Bucket<K, V>>>,
    remaining: usize,
}

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);
    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let e = self.inner.next()?;
        self.remaining -= 1;
        Some((e.key, e.value))
    }
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for IntoIter<K, V> {}

pub struct Keys<'a, K, V> {
    inner: Iter<'a, K, V>,
}

impl<'a, K, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;
    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, _)| k)
    }
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

pub struct Values<'a, K, V> {
    inner: Iter<'a, K, V>,
}

impl<'a, K, V> Iterator for Values<'a, K, V> {
    type Item = &'a V;
    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, v)| v)
    }
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

pub struct ValuesMut<'a, K, V> {
    inner: IterMut<'a, K, V>,
}

impl<'a, K, V> Iterator for ValuesMut<'a, K, V> {
    type Item = &'a mut V;
    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, v)| v)
    }
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V, S> IntoIterator for Dictionary<K, V, S> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter {
            remaining: self.count,
            inner: self.table.into_buckets().into_iter().flatten(),
        }
    }
}

impl<'a, K, V, S> IntoIterator for &'a Dictionary<K, V, S> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, K, V, S> IntoIterator for &'a mut Dictionary<K, V, S> {
    type Item = (&'a K, &'a mut V);
    type IntoIter = IterMut<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}
