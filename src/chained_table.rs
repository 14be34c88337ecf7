//! ChainedHashTable: separate chaining over a fixed bucket array with
//! explicit resizing and collision accounting.

use crate::error::TableError;
use crate::hasher::{IdentityHash, IntegerKey, KeyHasher};
use core::fmt;
use rand::Rng;

/// Bucket count used by `new()` and `default()`.
pub const DEFAULT_CAPACITY: usize = 16;

#[derive(Debug, Clone)]
struct Entry<K, V> {
    key: K,
    value: V,
    hash: u64,
}

type Bucket<K, V> = Vec<Entry<K, V>>;

/// A hash table whose buckets are ordered chains of `(key, value)` entries.
///
/// Keys are placed in bucket `hasher.hash_key(&key) % capacity`. The hash is
/// computed once on insertion and cached, so `resize` never calls the
/// hasher. Duplicate keys are allowed through `insert`; `insert_or_assign`
/// keeps a key unique. The table never grows by itself.
///
/// The table has no interior mutability. Sharing it between threads follows
/// the usual `&`/`&mut` rules; concurrent mutation needs a lock owned by
/// the caller.
#[derive(Debug)]
pub struct ChainedHashTable<K, V, H = IdentityHash> {
    buckets: Vec<Bucket<K, V>>,
    len: usize,
    hasher: H,
}

/// Read-only view of one bucket, yielded by `ChainedHashTable::snapshot`.
#[derive(Debug)]
pub struct BucketView<'a, K, V> {
    index: usize,
    entries: &'a [Entry<K, V>],
}

impl<'a, K, V> BucketView<'a, K, V> {
    /// Position of this bucket in the table.
    pub fn index(&self) -> usize {
        self.index
    }
    pub fn len(&self) -> usize {
        self.entries.len()
    }
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in chain order.
    pub fn iter(&self) -> impl Iterator<Item = (&'a K, &'a V)> + 'a {
        self.entries.iter().map(|e| (&e.key, &e.value))
    }
}

/// Iterator over every bucket of a table, in index order.
pub struct Snapshot<'a, K, V> {
    it: core::iter::Enumerate<core::slice::Iter<'a, Bucket<K, V>>>,
}

impl<'a, K, V> Iterator for Snapshot<'a, K, V> {
    type Item = BucketView<'a, K, V>;
    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.it.next().map(|(index, bucket)| BucketView {
            index,
            entries: bucket.as_slice(),
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.it.size_hint()
    }
}

impl<'a, K, V> ExactSizeIterator for Snapshot<'a, K, V> {}

/// Iterator over immutable entries, bucket by bucket.
pub struct Iter<'a, K, V> {
    it: core::iter::Flatten<core::slice::Iter<'a, Bucket<K, V>>>,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);
    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.it.next().map(|e| (&e.key, &e.value))
    }
}

/// Iterator over entries with mutable values. Keys stay immutable so the
/// bucket placement cannot be invalidated.
pub struct IterMut<'a, K, V> {
    it: core::iter::Flatten<core::slice::IterMut<'a, Bucket<K, V>>>,
}

impl<'a, K, V> Iterator for IterMut<'a, K, V> {
    type Item = (&'a K, &'a mut V);
    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.it.next().map(|e| (&e.key, &mut e.value))
    }
}

fn empty_buckets<K, V>(capacity: usize) -> Vec<Bucket<K, V>> {
    let mut buckets = Vec::with_capacity(capacity);
    buckets.resize_with(capacity, Vec::new);
    buckets
}

impl<K, V> ChainedHashTable<K, V>
where
    K: IntegerKey,
{
    /// Creates a table with `DEFAULT_CAPACITY` buckets and identity hashing.
    pub fn new() -> Self {
        Self::with_hasher(IdentityHash)
    }

    pub fn with_capacity(capacity: usize) -> Result<Self, TableError> {
        Self::with_capacity_and_hasher(capacity, IdentityHash)
    }
}

impl<K, V> ChainedHashTable<K, V>
where
    K: IntegerKey + PartialEq + From<u32>,
    V: From<u8>,
{
    /// Creates a default-capacity table holding keys `0..count`, each with a
    /// value drawn uniformly from `[1, 100]`.
    ///
    /// Pass a seeded generator to get a reproducible table.
    pub fn with_random_values<R>(count: u32, rng: &mut R) -> Self
    where
        R: Rng + ?Sized,
    {
        let mut table = Self::new();
        for key in 0..count {
            let value: u8 = rng.gen_range(1..=100);
            table.insert(K::from(key), V::from(value));
        }
        table
    }
}

impl<K, V> Default for ChainedHashTable<K, V>
where
    K: IntegerKey,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, H> ChainedHashTable<K, V, H> {
    /// Creates a table with `DEFAULT_CAPACITY` buckets using `hasher`.
    pub fn with_hasher(hasher: H) -> Self {
        Self {
            buckets: empty_buckets(DEFAULT_CAPACITY),
            len: 0,
            hasher,
        }
    }

    pub fn with_capacity_and_hasher(capacity: usize, hasher: H) -> Result<Self, TableError> {
        if capacity == 0 {
            return Err(TableError::InvalidCapacity {
                requested: capacity,
            });
        }
        Ok(Self {
            buckets: empty_buckets(capacity),
            len: 0,
            hasher,
        })
    }

    pub fn len(&self) -> usize {
        self.len
    }
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of buckets. Always at least one.
    pub fn capacity(&self) -> usize {
        self.buckets.len()
    }

    pub fn hasher(&self) -> &H {
        &self.hasher
    }

    /// Excess entries over all buckets: each bucket holding `n > 1` entries
    /// contributes `n - 1`, whether or not the entries share a key.
    pub fn count_collisions(&self) -> usize {
        self.buckets
            .iter()
            .map(|b| b.len().saturating_sub(1))
            .sum()
    }

    /// Returns true if any entry holds a value equal to `value`. Scans the
    /// whole table.
    pub fn contains_value(&self, value: &V) -> bool
    where
        V: PartialEq,
    {
        self.iter().any(|(_, v)| v == value)
    }

    /// Every bucket with its entries in chain order.
    pub fn snapshot(&self) -> Snapshot<'_, K, V> {
        Snapshot {
            it: self.buckets.iter().enumerate(),
        }
    }

    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            it: self.buckets.iter().flatten(),
        }
    }

    pub fn iter_mut(&mut self) -> IterMut<'_, K, V> {
        IterMut {
            it: self.buckets.iter_mut().flatten(),
        }
    }

    /// Rebuilds the table with `new_capacity` buckets.
    ///
    /// Entries are redistributed using their cached hashes, visiting old
    /// buckets in index order, so entries that shared an old bucket and
    /// land together keep their relative order. Fails with
    /// `InvalidCapacity` on zero and leaves the table unchanged.
    pub fn resize(&mut self, new_capacity: usize) -> Result<(), TableError> {
        if new_capacity == 0 {
            return Err(TableError::InvalidCapacity {
                requested: new_capacity,
            });
        }
        log::debug!(
            "resizing chained table from {} to {} buckets ({} entries)",
            self.buckets.len(),
            new_capacity,
            self.len
        );

        let mut buckets = empty_buckets(new_capacity);
        for entry in core::mem::take(&mut self.buckets).into_iter().flatten() {
            let idx = reduce(entry.hash, new_capacity);
            buckets[idx].push(entry);
        }
        self.buckets = buckets;
        Ok(())
    }
}

#[inline]
fn reduce(hash: u64, capacity: usize) -> usize {
    (hash % capacity as u64) as usize
}

impl<K, V, H> ChainedHashTable<K, V, H>
where
    K: PartialEq,
    H: KeyHasher<K>,
{
    /// Index of the bucket `key` hashes to under the current capacity.
    pub fn bucket_index(&self, key: &K) -> usize {
        reduce(self.hasher.hash_key(key), self.buckets.len())
    }

    fn position(&self, bucket: usize, hash: u64, key: &K) -> Option<usize> {
        self.buckets[bucket]
            .iter()
            .position(|e| e.hash == hash && e.key == *key)
    }

    /// Appends `(key, value)` to its bucket, even if the key is already
    /// present. Duplicates coexist and are visible through `count`.
    pub fn insert(&mut self, key: K, value: V) {
        let hash = self.hasher.hash_key(&key);
        let idx = reduce(hash, self.buckets.len());
        self.buckets[idx].push(Entry { key, value, hash });
        self.len += 1;
    }

    /// Overwrites the value of the first entry equal to `key` and returns the
    /// previous value. Inserts a new entry if there is none.
    pub fn insert_or_assign(&mut self, key: K, value: V) -> Option<V> {
        let hash = self.hasher.hash_key(&key);
        let idx = reduce(hash, self.buckets.len());
        match self.position(idx, hash, &key) {
            Some(pos) => Some(core::mem::replace(
                &mut self.buckets[idx][pos].value,
                value,
            )),
            None => {
                self.buckets[idx].push(Entry { key, value, hash });
                self.len += 1;
                None
            }
        }
    }

    /// Value of the first entry equal to `key`, in chain order.
    pub fn search(&self, key: &K) -> Option<&V> {
        let hash = self.hasher.hash_key(key);
        let idx = reduce(hash, self.buckets.len());
        self.position(idx, hash, key)
            .map(|pos| &self.buckets[idx][pos].value)
    }

    /// Mutable access to the value of the first entry equal to `key`.
    ///
    /// The reference borrows the table, so no insert, erase, or resize can
    /// happen while it is alive.
    pub fn search_mut(&mut self, key: &K) -> Option<&mut V> {
        let hash = self.hasher.hash_key(key);
        let idx = reduce(hash, self.buckets.len());
        let pos = self.position(idx, hash, key)?;
        Some(&mut self.buckets[idx][pos].value)
    }

    /// Removes the first entry equal to `key` and returns it. Remaining
    /// entries of the bucket keep their order.
    pub fn remove(&mut self, key: &K) -> Option<(K, V)> {
        let hash = self.hasher.hash_key(key);
        let idx = reduce(hash, self.buckets.len());
        let pos = self.position(idx, hash, key)?;
        let entry = self.buckets[idx].remove(pos);
        self.len -= 1;
        Some((entry.key, entry.value))
    }

    /// Removes the first entry equal to `key`. Returns whether one was
    /// removed; duplicates beyond the first stay.
    pub fn erase(&mut self, key: &K) -> bool {
        self.remove(key).is_some()
    }

    /// Number of entries equal to `key`. Only the key's own bucket is
    /// scanned.
    pub fn count(&self, key: &K) -> usize {
        let hash = self.hasher.hash_key(key);
        let idx = reduce(hash, self.buckets.len());
        self.buckets[idx]
            .iter()
            .filter(|e| e.hash == hash && e.key == *key)
            .count()
    }
}

impl<K: Clone, V: Clone, H: Clone> Clone for ChainedHashTable<K, V, H> {
    fn clone(&self) -> Self {
        Self {
            buckets: self.buckets.clone(),
            len: self.len,
            hasher: self.hasher.clone(),
        }
    }

    /// Always adopts the source's capacity, whatever `self` had before.
    fn clone_from(&mut self, source: &Self) {
        self.buckets.clone_from(&source.buckets);
        self.len = source.len;
        self.hasher.clone_from(&source.hasher);
    }
}

/// One line per bucket: `Bucket i: [k, v] [k, v]`.
impl<K, V, H> fmt::Display for ChainedHashTable<K, V, H>
where
    K: fmt::Display,
    V: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for bucket in self.snapshot() {
            write!(f, "Bucket {}:", bucket.index())?;
            for (k, v) in bucket.iter() {
                write!(f, " [{}, {}]", k, v)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
