use core::hash::{BuildHasher, Hash};

use super::util::{bucket_index, make_bytes_hash, make_hash};

/// Addresses entries in the two tables.
///
/// The primary bucket comes from hashing the key. The secondary bucket comes
/// from hashing the little-endian bytes of the primary hash with a second,
/// independently built hasher. The secondary hash is therefore a function of
/// the primary hash rather than of the key: keys whose primary hashes collide
/// collide in both tables.
#[derive(Clone)]
pub(crate) struct HashRouter<S> {
    primary: S,
    secondary: S,
}

impl<S> HashRouter<S> {
    #[inline]
    pub(crate) const fn new(primary: S, secondary: S) -> Self {
        Self { primary, secondary }
    }

    #[inline]
    pub(crate) fn hasher(&self) -> &S {
        &self.primary
    }
}

impl<S: BuildHasher> HashRouter<S> {
    #[inline]
    pub(crate) fn primary_hash<Q: Hash + ?Sized>(&self, key: &Q) -> u64 {
        make_hash(&self.primary, key)
    }

    #[inline]
    pub(crate) fn secondary_hash(&self, primary_hash: u64) -> u64 {
        make_bytes_hash(&self.secondary, &primary_hash.to_le_bytes())
    }

    #[inline]
    pub(crate) fn primary_bucket(&self, primary_hash: u64, num_buckets: usize) -> usize {
        bucket_index(primary_hash, num_buckets)
    }

    #[inline]
    pub(crate) fn secondary_bucket(&self, primary_hash: u64, num_buckets: usize) -> usize {
        bucket_index(self.secondary_hash(primary_hash), num_buckets)
    }
}
