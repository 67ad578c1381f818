// Branch prediction hints. Kept as identity functions on stable so the hot
// paths read the same way they would with the intrinsics.
pub(crate) use core::convert::identity as likely;
pub(crate) use core::convert::identity as unlikely;
use core::hash::{BuildHasher, Hash, Hasher};

use crate::Equivalent;

/// Smallest bucket count of each table. Shrinking never goes below it.
pub(crate) const MIN_BUCKETS: usize = 2;

/// Displacement bound of an empty or single-entry table, and of a fresh one.
pub(crate) const MIN_DISPLACEMENT: usize = 1;

/// Ensures that a single closure type across uses of this which, in turn prevents multiple
/// instances of the probing functions from being generated.
#[inline]
pub(crate) fn equivalent_key<Q, K, V>(k: &Q) -> impl Fn(&(K, V)) -> bool + '_
where
    Q: ?Sized + Equivalent<K>,
{
    move |x| k.equivalent(&x.0)
}

#[inline]
pub(crate) fn make_hash<Q, S>(hash_builder: &S, val: &Q) -> u64
where
    Q: Hash + ?Sized,
    S: BuildHasher,
{
    let mut state = hash_builder.build_hasher();
    val.hash(&mut state);
    state.finish()
}

/// Hashes a raw byte string, without the length prefix `Hash for [u8]` adds.
#[inline]
pub(crate) fn make_bytes_hash<S: BuildHasher>(hash_builder: &S, bytes: &[u8]) -> u64 {
    let mut state = hash_builder.build_hasher();
    state.write(bytes);
    state.finish()
}

/// Maps a hash onto one of `num_buckets` buckets.
///
/// `num_buckets` is always a power of two, so the modulo is a mask. On 32-bit
/// targets the truncation keeps the low bits, which is exactly what the mask
/// would keep anyway.
#[inline]
#[allow(clippy::cast_possible_truncation)]
pub(crate) fn bucket_index(hash: u64, num_buckets: usize) -> usize {
    debug_assert!(num_buckets.is_power_of_two());
    (hash as usize) & (num_buckets - 1)
}

/// Number of eviction rounds an insertion may spend before the tables grow:
/// `3 * ceil(ln(len) / ln(1 + epsilon)) + 1`.
///
/// `ln` is undefined at zero and zero at one, so tiny tables get the fixed
/// minimum instead.
#[inline]
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
pub(crate) fn displacement_bound(len: usize, epsilon: f64) -> usize {
    if len <= 1 {
        return MIN_DISPLACEMENT;
    }
    let rounds = ((len as f64).ln() / epsilon.ln_1p()).ceil() as usize;
    rounds.saturating_mul(3).saturating_add(1)
}
