//! Cuckoo hash map and set backed by two tables.
//!
//! Every entry lives either in table A at its primary bucket or in table B at
//! its secondary bucket, so lookups and erases touch at most two slots.
//! Insertion evicts residents back and forth between the tables for a number
//! of rounds that grows logarithmically with the entry count; when that runs
//! out, both tables double and every entry is replayed. Erases that drop the
//! load factor under a threshold halve the tables again.
//!
//! ```
//! use cuckoo_map::CuckooMap;
//!
//! let mut map: CuckooMap<&str, i32> = CuckooMap::new();
//! assert!(map.insert("a", 1));
//! // Inserting a present key is a no-op; assign through `get_mut` instead.
//! assert!(!map.insert("a", 2));
//! assert_eq!(map["a"], 1);
//! *map.lookup_mut("a") = 2;
//! assert_eq!(map.get("a"), Some(&2));
//! assert!(map.erase("a"));
//! assert!(map.is_empty());
//! ```

use core::{
    fmt::{self, Debug},
    hash::{BuildHasher, Hash},
    iter::FusedIterator,
    ops::Index,
};
use std::collections::hash_map::RandomState;

use raw::{
    iter::{RawIntoIter, RawIter, RawIterMut},
    router::HashRouter,
    util::equivalent_key,
    RawTable,
};

#[macro_use]
mod macros;
mod dump;
mod params;
mod raw;
pub mod set;

pub use hashbrown::Equivalent;

pub use crate::{
    dump::Dump,
    params::{Params, ParamsError, DEFAULT_DOWNSIZE_THRESHOLD, DEFAULT_EPSILON},
    set::CuckooSet,
};

#[cfg(feature = "serde")]
mod serde;

/// Map hashed with keyed aHash. `default()` keys the two hashers separately.
#[cfg(feature = "ahash")]
pub type ACuckooMap<K, V> = CuckooMap<K, V, ahash::RandomState>;
#[cfg(feature = "ahash")]
pub use set::ACuckooSet;

/// A hash map using two-table cuckoo hashing.
///
/// `S` builds both the key hasher and the hasher for the secondary bucket;
/// the two are separate instances.
///
/// Buckets are the low bits of the hashes and nothing probes past a taken
/// slot, so `S` must mix every input bit into the low bits of its output.
/// Plain multiplicative hashers such as FxHash do not: keys that agree in
/// their low `k` bits collide in both tables while there are at most `2^k`
/// buckets.
pub struct CuckooMap<K, V, S = RandomState> {
    raw: RawTable<K, V, S>,
}

impl<K: Clone, V: Clone, S: Clone> Clone for CuckooMap<K, V, S> {
    #[inline]
    fn clone(&self) -> Self {
        Self {
            raw: self.raw.clone(),
        }
    }
}

impl<K, V, S> Debug for CuckooMap<K, V, S>
where
    K: Debug,
    V: Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V, S: Default> Default for CuckooMap<K, V, S> {
    /// Creates an empty `CuckooMap` with default parameters and two
    /// default-built hashers.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::collections::hash_map::RandomState;
    ///
    /// use cuckoo_map::CuckooMap;
    ///
    /// let map: CuckooMap<u32, String> = CuckooMap::default();
    /// assert_eq!(map.num_buckets(), 2);
    /// let map: CuckooMap<u32, String, RandomState> = CuckooMap::default();
    /// assert_eq!(map.capacity(), 4);
    /// ```
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, S: Default> CuckooMap<K, V, S> {
    /// Creates an empty `CuckooMap` with two buckets per table.
    #[inline]
    pub fn new() -> Self {
        Self::with_params(Params::default())
    }

    /// Creates an empty `CuckooMap` with the given tuning.
    #[inline]
    pub fn with_params(params: Params) -> Self {
        Self::with_params_and_hashers(params, S::default(), S::default())
    }
}

impl<K, V, S: Clone> CuckooMap<K, V, S> {
    /// Creates an empty `CuckooMap` hashing keys with `hash_builder`. A clone
    /// of it hashes the bytes of primary hashes.
    ///
    /// # Examples
    ///
    /// ```
    /// use cuckoo_map::CuckooMap;
    ///
    /// let mut map = CuckooMap::with_hasher(ahash::RandomState::new());
    /// map.insert(1, 2);
    /// ```
    #[inline]
    pub fn with_hasher(hash_builder: S) -> Self {
        Self::with_hashers(hash_builder.clone(), hash_builder)
    }
}

impl<K, V, S> CuckooMap<K, V, S> {
    /// Creates an empty `CuckooMap` with `primary` hashing keys and
    /// `secondary` hashing the bytes of primary hashes.
    #[inline]
    pub fn with_hashers(primary: S, secondary: S) -> Self {
        Self::with_params_and_hashers(Params::default(), primary, secondary)
    }

    #[inline]
    pub fn with_params_and_hashers(params: Params, primary: S, secondary: S) -> Self {
        Self {
            raw: RawTable::new(params, HashRouter::new(primary, secondary)),
        }
    }

    /// Number of live entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.raw.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.raw.len() == 0
    }

    /// Buckets per table. Always a power of two, at least 2.
    #[inline]
    pub fn num_buckets(&self) -> usize {
        self.raw.num_buckets()
    }

    /// Total slots across both tables.
    #[inline]
    pub fn capacity(&self) -> usize {
        2 * self.raw.num_buckets()
    }

    /// `len() / capacity()`.
    #[inline]
    pub fn load_factor(&self) -> f64 {
        self.raw.load_factor()
    }

    /// Eviction rounds the next insertion may spend before the tables grow.
    #[inline]
    pub fn max_displacement(&self) -> usize {
        self.raw.max_displacement()
    }

    #[inline]
    pub fn params(&self) -> Params {
        self.raw.params()
    }

    /// The hasher used for keys.
    #[inline]
    pub fn hasher(&self) -> &S {
        self.raw.router().hasher()
    }

    /// Removes every entry and releases both tables, going back to two
    /// buckets per table.
    #[inline]
    pub fn clear(&mut self) {
        self.raw.clear();
    }

    /// Iterates over the entries of table A, then table B.
    #[inline]
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            inner: RawIter::new(self.raw.tables(), self.raw.len()),
        }
    }

    #[inline]
    pub fn iter_mut(&mut self) -> IterMut<'_, K, V> {
        let len = self.raw.len();
        IterMut {
            inner: RawIterMut::new(self.raw.tables_mut(), len),
        }
    }

    #[inline]
    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys { inner: self.iter() }
    }

    #[inline]
    pub fn values(&self) -> Values<'_, K, V> {
        Values { inner: self.iter() }
    }

    #[inline]
    pub fn values_mut(&mut self) -> ValuesMut<'_, K, V> {
        ValuesMut {
            inner: self.iter_mut(),
        }
    }

    /// Displays every slot of both tables and the current counters.
    ///
    /// ```
    /// use cuckoo_map::CuckooMap;
    ///
    /// let map: CuckooMap<&str, i32> = CuckooMap::new();
    /// assert_eq!(
    ///     map.dump().to_string(),
    ///     "Table A: [ (-:-) (-:-) ]\n\
    ///      Table B: [ (-:-) (-:-) ]\n\
    ///      epsilon: 0.4 downsize threshold: 0.2 buckets: 2 size: 0 max displacement: 1"
    /// );
    /// ```
    #[inline]
    pub fn dump(&self) -> Dump<'_, K, V, S>
    where
        K: fmt::Display,
        V: fmt::Display,
    {
        fn entry<K: fmt::Display, V: fmt::Display>(
            k: &K,
            v: &V,
            f: &mut fmt::Formatter<'_>,
        ) -> fmt::Result {
            write!(f, "({k}: {v})")
        }
        Dump::new(&self.raw, "(-:-)", entry::<K, V>)
    }
}

impl<K, V, S> CuckooMap<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    /// Returns `true` if the map holds `k`.
    ///
    /// Probes table A at the primary bucket first; the secondary bucket is only
    /// computed on a miss, from the primary hash already in hand.
    #[inline]
    pub fn contains<Q: ?Sized>(&self, k: &Q) -> bool
    where
        Q: Hash + Equivalent<K>,
    {
        let hash = self.raw.router().primary_hash(k);
        self.raw.find(hash, equivalent_key(k)).is_some()
    }

    #[inline]
    pub fn contains_key<Q: ?Sized>(&self, k: &Q) -> bool
    where
        Q: Hash + Equivalent<K>,
    {
        self.contains(k)
    }

    #[inline]
    pub fn get<Q: ?Sized>(&self, k: &Q) -> Option<&V>
    where
        Q: Hash + Equivalent<K>,
    {
        // Avoid `Option::map` because it bloats LLVM IR.
        match self.get_key_value(k) {
            Some((_, v)) => Some(v),
            None => None,
        }
    }

    /// Returns a mutable reference to the value corresponding to the key.
    ///
    /// This is the assignment path: unlike [`insert`](Self::insert), it
    /// changes the value of a present key.
    #[inline]
    pub fn get_mut<Q: ?Sized>(&mut self, k: &Q) -> Option<&mut V>
    where
        Q: Hash + Equivalent<K>,
    {
        let hash = self.raw.router().primary_hash(k);
        match self.raw.get_mut(hash, equivalent_key(k)) {
            Some((_, v)) => Some(v),
            None => None,
        }
    }

    /// Returns the key-value pair corresponding to the supplied key.
    #[inline]
    pub fn get_key_value<Q: ?Sized>(&self, k: &Q) -> Option<(&K, &V)>
    where
        Q: Hash + Equivalent<K>,
    {
        let hash = self.raw.router().primary_hash(k);
        match self.raw.get(hash, equivalent_key(k)) {
            Some((key, value)) => Some((key, value)),
            None => None,
        }
    }

    /// Returns the value of a key the caller knows to be present.
    ///
    /// # Panics
    ///
    /// Panics if the map does not contain `k`.
    #[inline]
    #[track_caller]
    pub fn lookup<Q: ?Sized>(&self, k: &Q) -> &V
    where
        Q: Hash + Equivalent<K>,
    {
        match self.get(k) {
            Some(v) => v,
            None => panic!("lookup of a key absent from the CuckooMap"),
        }
    }

    /// Mutable counterpart of [`lookup`](Self::lookup).
    ///
    /// # Panics
    ///
    /// Panics if the map does not contain `k`.
    #[inline]
    #[track_caller]
    pub fn lookup_mut<Q: ?Sized>(&mut self, k: &Q) -> &mut V
    where
        Q: Hash + Equivalent<K>,
    {
        match self.get_mut(k) {
            Some(v) => v,
            None => panic!("lookup of a key absent from the CuckooMap"),
        }
    }

    /// Inserts `key` with `value` if the key is absent and returns `true`.
    ///
    /// If the key is already present nothing changes, the old value included,
    /// and `false` is returned. Use [`get_mut`](Self::get_mut) to assign.
    ///
    /// ```
    /// use cuckoo_map::CuckooMap;
    ///
    /// let mut map: CuckooMap<i32, &str> = CuckooMap::new();
    /// assert!(map.insert(37, "a"));
    /// assert!(!map.insert(37, "b"));
    /// assert_eq!(map[&37], "a");
    /// ```
    #[inline]
    pub fn insert(&mut self, key: K, value: V) -> bool {
        if self.contains(&key) {
            return false;
        }
        self.raw.insert_new((key, value));
        true
    }

    /// Removes `k`, returning `true` if it was present. May halve the tables.
    #[inline]
    pub fn erase<Q: ?Sized>(&mut self, k: &Q) -> bool
    where
        Q: Hash + Equivalent<K>,
    {
        self.remove_entry(k).is_some()
    }

    #[inline]
    pub fn remove<Q: ?Sized>(&mut self, k: &Q) -> Option<V>
    where
        Q: Hash + Equivalent<K>,
    {
        // Avoid `Option::map` because it bloats LLVM IR.
        match self.remove_entry(k) {
            Some((_, v)) => Some(v),
            None => None,
        }
    }

    #[inline]
    pub fn remove_entry<Q: ?Sized>(&mut self, k: &Q) -> Option<(K, V)>
    where
        Q: Hash + Equivalent<K>,
    {
        let hash = self.raw.router().primary_hash(k);
        self.raw.remove_entry(hash, equivalent_key(k))
    }
}

impl<K, V, S, Q: ?Sized> Index<&Q> for CuckooMap<K, V, S>
where
    K: Eq + Hash,
    Q: Hash + Equivalent<K>,
    S: BuildHasher,
{
    type Output = V;

    /// Same as [`CuckooMap::lookup`].
    ///
    /// # Panics
    ///
    /// Panics if the key is not present in the map.
    #[inline]
    fn index(&self, key: &Q) -> &V {
        self.lookup(key)
    }
}

impl<K, V, S> PartialEq for CuckooMap<K, V, S>
where
    K: Eq + Hash,
    V: PartialEq,
    S: BuildHasher,
{
    fn eq(&self, other: &Self) -> bool {
        if self.len() != other.len() {
            return false;
        }
        self.iter()
            .all(|(key, value)| other.get(key).map_or(false, |v| *value == *v))
    }
}

impl<K, V, S> Eq for CuckooMap<K, V, S>
where
    K: Eq + Hash,
    V: Eq,
    S: BuildHasher,
{
}

impl<K, V, S> Extend<(K, V)> for CuckooMap<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    /// Inserts every pair whose key is not present yet. Earlier pairs win.
    #[inline]
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}

impl<K, V, S> FromIterator<(K, V)> for CuckooMap<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher + Default,
{
    #[inline]
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut map = Self::new();
        map.extend(iter);
        map
    }
}

pub struct Iter<'a, K, V> {
    inner: RawIter<'a, K, V>,
}

impl<K, V> Clone for Iter<'_, K, V> {
    #[inline]
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    #[inline]
    fn next(&mut self) -> Option<(&'a K, &'a V)> {
        match self.inner.next() {
            Some(kv) => Some((&kv.0, &kv.1)),
            None => None,
        }
    }
    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {
    #[inline]
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<K, V> FusedIterator for Iter<'_, K, V> {}

pub struct IterMut<'a, K, V> {
    inner: RawIterMut<'a, K, V>,
}

impl<'a, K, V> Iterator for IterMut<'a, K, V> {
    type Item = (&'a K, &'a mut V);

    #[inline]
    fn next(&mut self) -> Option<(&'a K, &'a mut V)> {
        match self.inner.next() {
            Some((k, v)) => Some((&*k, v)),
            None => None,
        }
    }
    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for IterMut<'_, K, V> {}
impl<K, V> FusedIterator for IterMut<'_, K, V> {}

pub struct Keys<'a, K, V> {
    inner: Iter<'a, K, V>,
}

impl<'a, K, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;

    #[inline]
    fn next(&mut self) -> Option<&'a K> {
        match self.inner.next() {
            Some((k, _)) => Some(k),
            None => None,
        }
    }
    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Keys<'_, K, V> {}
impl<K, V> FusedIterator for Keys<'_, K, V> {}

pub struct Values<'a, K, V> {
    inner: Iter<'a, K, V>,
}

impl<'a, K, V> Iterator for Values<'a, K, V> {
    type Item = &'a V;

    #[inline]
    fn next(&mut self) -> Option<&'a V> {
        match self.inner.next() {
            Some((_, v)) => Some(v),
            None => None,
        }
    }
    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Values<'_, K, V> {}
impl<K, V> FusedIterator for Values<'_, K, V> {}

pub struct ValuesMut<'a, K, V> {
    inner: IterMut<'a, K, V>,
}

impl<'a, K, V> Iterator for ValuesMut<'a, K, V> {
    type Item = &'a mut V;

    #[inline]
    fn next(&mut self) -> Option<&'a mut V> {
        match self.inner.next() {
            Some((_, v)) => Some(v),
            None => None,
        }
    }
    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for ValuesMut<'_, K, V> {}
impl<K, V> FusedIterator for ValuesMut<'_, K, V> {}

pub struct IntoIter<K, V> {
    inner: RawIntoIter<K, V>,
}

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);

    #[inline]
    fn next(&mut self) -> Option<(K, V)> {
        self.inner.next()
    }
    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for IntoIter<K, V> {}
impl<K, V> FusedIterator for IntoIter<K, V> {}

impl<K, V, S> IntoIterator for CuckooMap<K, V, S> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;

    /// Creates a consuming iterator, that is, one that moves each key-value
    /// pair out of the map in table order. The map cannot be used after
    /// calling this.
    #[inline]
    fn into_iter(self) -> IntoIter<K, V> {
        let len = self.raw.len();
        IntoIter {
            inner: RawIntoIter::new(self.raw.into_tables(), len),
        }
    }
}

impl<'a, K, V, S> IntoIterator for &'a CuckooMap<K, V, S> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    #[inline]
    fn into_iter(self) -> Iter<'a, K, V> {
        self.iter()
    }
}

impl<'a, K, V, S> IntoIterator for &'a mut CuckooMap<K, V, S> {
    type Item = (&'a K, &'a mut V);
    type IntoIter = IterMut<'a, K, V>;

    #[inline]
    fn into_iter(self) -> IterMut<'a, K, V> {
        self.iter_mut()
    }
}
