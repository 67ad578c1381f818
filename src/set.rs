//! Set variant: the same two-table engine with no value in the slots.

use core::{
    fmt::{self, Debug},
    hash::{BuildHasher, Hash},
    iter::FusedIterator,
};
use std::collections::hash_map::RandomState;

use crate::{CuckooMap, Dump, Equivalent, Params};

#[cfg(feature = "ahash")]
pub type ACuckooSet<T> = CuckooSet<T, ahash::RandomState>;

/// A hash set using two-table cuckoo hashing.
///
/// # Examples
///
/// ```
/// use cuckoo_map::CuckooSet;
///
/// let mut set: CuckooSet<String> = CuckooSet::new();
/// assert!(set.insert("a".to_string()));
/// assert!(!set.insert("a".to_string()));
/// assert!(set.contains("a"));
/// assert_eq!(set.len(), 1);
/// assert!(set.remove("a"));
/// assert!(set.is_empty());
/// ```
pub struct CuckooSet<T, S = RandomState> {
    map: CuckooMap<T, (), S>,
}

impl<T: Clone, S: Clone> Clone for CuckooSet<T, S> {
    #[inline]
    fn clone(&self) -> Self {
        Self {
            map: self.map.clone(),
        }
    }
}

impl<T: Debug, S> Debug for CuckooSet<T, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<T, S: Default> Default for CuckooSet<T, S> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<T, S: Default> CuckooSet<T, S> {
    #[inline]
    pub fn new() -> Self {
        Self {
            map: CuckooMap::new(),
        }
    }

    #[inline]
    pub fn with_params(params: Params) -> Self {
        Self {
            map: CuckooMap::with_params(params),
        }
    }
}

impl<T, S: Clone> CuckooSet<T, S> {
    #[inline]
    pub fn with_hasher(hash_builder: S) -> Self {
        Self {
            map: CuckooMap::with_hasher(hash_builder),
        }
    }
}

impl<T, S> CuckooSet<T, S> {
    #[inline]
    pub fn with_hashers(primary: S, secondary: S) -> Self {
        Self {
            map: CuckooMap::with_hashers(primary, secondary),
        }
    }

    #[inline]
    pub fn with_params_and_hashers(params: Params, primary: S, secondary: S) -> Self {
        Self {
            map: CuckooMap::with_params_and_hashers(params, primary, secondary),
        }
    }

    /// Number of elements in the set.
    #[inline]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    #[inline]
    pub fn num_buckets(&self) -> usize {
        self.map.num_buckets()
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.map.capacity()
    }

    #[inline]
    pub fn load_factor(&self) -> f64 {
        self.map.load_factor()
    }

    #[inline]
    pub fn max_displacement(&self) -> usize {
        self.map.max_displacement()
    }

    #[inline]
    pub fn params(&self) -> Params {
        self.map.params()
    }

    #[inline]
    pub fn hasher(&self) -> &S {
        self.map.hasher()
    }

    #[inline]
    pub fn clear(&mut self) {
        self.map.clear();
    }

    /// Iterates over the elements of table A, then table B.
    #[inline]
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            inner: self.map.keys(),
        }
    }

    /// Displays every slot of both tables and the current counters.
    #[inline]
    pub fn dump(&self) -> Dump<'_, T, (), S>
    where
        T: fmt::Display,
    {
        fn entry<T: fmt::Display>(t: &T, _: &(), f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "({t})")
        }
        Dump::new(&self.map.raw, "(-)", entry::<T>)
    }
}

impl<T, S> CuckooSet<T, S>
where
    T: Eq + Hash,
    S: BuildHasher,
{
    #[inline]
    pub fn contains<Q: ?Sized>(&self, value: &Q) -> bool
    where
        Q: Hash + Equivalent<T>,
    {
        self.map.contains(value)
    }

    /// Returns the stored element equal to `value`.
    #[inline]
    pub fn get<Q: ?Sized>(&self, value: &Q) -> Option<&T>
    where
        Q: Hash + Equivalent<T>,
    {
        match self.map.get_key_value(value) {
            Some((k, _)) => Some(k),
            None => None,
        }
    }

    /// Adds `value` if absent. Returns whether it was added; an equal element
    /// already in the set is kept as is.
    #[inline]
    pub fn insert(&mut self, value: T) -> bool {
        self.map.insert(value, ())
    }

    /// Removes `value`, returning whether it was present.
    #[inline]
    pub fn erase<Q: ?Sized>(&mut self, value: &Q) -> bool
    where
        Q: Hash + Equivalent<T>,
    {
        self.map.erase(value)
    }

    #[inline]
    pub fn remove<Q: ?Sized>(&mut self, value: &Q) -> bool
    where
        Q: Hash + Equivalent<T>,
    {
        self.map.erase(value)
    }

    /// Removes and returns the element equal to `value`.
    #[inline]
    pub fn take<Q: ?Sized>(&mut self, value: &Q) -> Option<T>
    where
        Q: Hash + Equivalent<T>,
    {
        match self.map.remove_entry(value) {
            Some((k, ())) => Some(k),
            None => None,
        }
    }
}

impl<T, S> PartialEq for CuckooSet<T, S>
where
    T: Eq + Hash,
    S: BuildHasher,
{
    fn eq(&self, other: &Self) -> bool {
        self.map == other.map
    }
}

impl<T, S> Eq for CuckooSet<T, S>
where
    T: Eq + Hash,
    S: BuildHasher,
{
}

impl<T, S> Extend<T> for CuckooSet<T, S>
where
    T: Eq + Hash,
    S: BuildHasher,
{
    #[inline]
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.map.extend(iter.into_iter().map(|t| (t, ())));
    }
}

impl<T, S> FromIterator<T> for CuckooSet<T, S>
where
    T: Eq + Hash,
    S: BuildHasher + Default,
{
    #[inline]
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

pub struct Iter<'a, T> {
    inner: crate::Keys<'a, T, ()>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    #[inline]
    fn next(&mut self) -> Option<&'a T> {
        self.inner.next()
    }
    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}
impl<T> FusedIterator for Iter<'_, T> {}

pub struct IntoIter<T> {
    inner: crate::IntoIter<T, ()>,
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    #[inline]
    fn next(&mut self) -> Option<T> {
        match self.inner.next() {
            Some((k, ())) => Some(k),
            None => None,
        }
    }
    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}
impl<T> FusedIterator for IntoIter<T> {}

impl<T, S> IntoIterator for CuckooSet<T, S> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    #[inline]
    fn into_iter(self) -> IntoIter<T> {
        IntoIter {
            inner: self.map.into_iter(),
        }
    }
}

impl<'a, T, S> IntoIterator for &'a CuckooSet<T, S> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    #[inline]
    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use rand::Rng;

    use super::CuckooSet;
    use crate::Params;

    const KEYS: [&str; 30] = [
        "a", "z", "c", "d", "e", "g", "s", "f", "h", "k", "j", "i", "b", "l", "t", "p", "n", "o",
        "r", "q", "ab", "ac", "ad", "ae", "aq", "aa", "ag", "ah", "ai", "aj",
    ];

    #[test]
    fn len_is_the_element_count() {
        let mut set = CuckooSet::<u32>::new();
        assert_eq!(set.len(), 0);
        for i in 0..10 {
            set.insert(i);
        }
        assert_eq!(set.len(), 10);
        set.insert(3);
        assert_eq!(set.len(), 10);
    }

    #[test]
    fn insert_erase_clear_reinsert() {
        let params = Params::new(0.3, 0.2).unwrap();
        let mut set = CuckooSet::<String>::with_params(params);
        for key in KEYS {
            assert!(set.insert(key.to_string()));
        }
        assert_eq!(set.len(), 30);
        assert!(set.num_buckets() > 2);

        for key in &KEYS[..25] {
            assert!(set.erase(*key));
        }
        assert_eq!(set.len(), 5);
        for key in &KEYS[25..] {
            assert!(set.contains(*key));
        }

        set.clear();
        assert!(set.is_empty());
        assert_eq!(set.num_buckets(), 2);
        assert_eq!(set.iter().next(), None);

        for key in &KEYS[10..15] {
            set.insert(key.to_string());
        }
        let mut seen: Vec<&str> = set.iter().map(String::as_str).collect();
        seen.sort_unstable();
        let mut expected = KEYS[10..15].to_vec();
        expected.sort_unstable();
        assert_eq!(seen, expected);
    }

    #[test]
    fn get_and_take() {
        let mut set: CuckooSet<String> = ["x", "y"].iter().map(|s| s.to_string()).collect();
        assert_eq!(set.get("x").map(String::as_str), Some("x"));
        assert_eq!(set.take("x"), Some("x".to_string()));
        assert_eq!(set.take("x"), None);
        assert!(!set.remove("x"));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn matches_std_set() {
        let mut rng = rand::thread_rng();
        let mut cuckoo = CuckooSet::<u16>::new();
        let mut std_set = HashSet::new();
        for _ in 0..50_000 {
            let value = rng.gen_range(0..256);
            if rng.gen_bool(0.6) {
                assert_eq!(cuckoo.insert(value), std_set.insert(value));
            } else {
                assert_eq!(cuckoo.remove(&value), std_set.remove(&value));
            }
            assert_eq!(cuckoo.len(), std_set.len());
        }
        let collected: HashSet<u16> = cuckoo.into_iter().collect();
        assert_eq!(collected, std_set);
    }

    #[test]
    fn dump_shows_elements() {
        let mut set = CuckooSet::<u8>::new();
        set.insert(9);
        let dump = set.dump().to_string();
        assert_eq!(dump.matches("(9)").count(), 1);
        assert_eq!(dump.matches("(-)").count(), 3);
    }

    #[test]
    fn debug_and_eq() {
        let a: CuckooSet<u8> = [1, 2, 3].into_iter().collect();
        let b: CuckooSet<u8> = [3, 2, 1].into_iter().collect();
        assert_eq!(a, b);
        assert_eq!(format!("{:?}", CuckooSet::<u8>::new()), "{}");
        let single: CuckooSet<u8> = [7].into_iter().collect();
        assert_eq!(format!("{single:?}"), "{7}");
    }
}
