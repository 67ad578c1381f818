// Every public way of choosing hashers, fed with sequential keys and with keys
// spaced by a power of two. Buckets are the low bits of the hashes, so a
// hasher that leaves those bits unmixed blows the tables up on strided keys.
use core::hash::BuildHasher;
use std::collections::hash_map::RandomState;

use cuckoo_map::{CuckooMap, CuckooSet};

const SHIFTS: [u32; 4] = [0, 12, 20, 40];

fn check_map<S: BuildHasher>(make: impl Fn() -> CuckooMap<u64, u64, S>) {
    let mut map = make();
    for i in 0..3_u64 {
        assert!(map.insert(i << 20, i));
    }
    assert!(map.num_buckets() <= 16, "{} buckets for 3 keys", map.num_buckets());

    for shift in SHIFTS {
        let mut map = make();
        for i in 0..200_u64 {
            assert!(map.insert(i << shift, i));
        }
        assert_eq!(map.len(), 200);
        assert!(
            map.num_buckets() <= 2048,
            "{} buckets for 200 keys with stride 2^{shift}",
            map.num_buckets()
        );
        for i in 0..200_u64 {
            assert_eq!(map.get(&(i << shift)), Some(&i));
        }

        for i in 0..190_u64 {
            assert!(map.erase(&(i << shift)));
        }
        assert_eq!(map.len(), 10);
        assert!(map.num_buckets() <= 128, "{} buckets for 10 keys", map.num_buckets());
        for i in 190..200_u64 {
            assert_eq!(map[&(i << shift)], i);
        }
    }
}

fn check_set<S: BuildHasher>(make: impl Fn() -> CuckooSet<u64, S>) {
    for shift in SHIFTS {
        let mut set = make();
        set.extend((0..200_u64).map(|i| i << shift));
        assert_eq!(set.len(), 200);
        assert!(set.num_buckets() <= 2048, "{} buckets", set.num_buckets());
        assert!((0..200_u64).all(|i| set.contains(&(i << shift))));
    }
}

#[test]
fn default_hashers() {
    check_map(CuckooMap::<u64, u64>::new);
    check_set(CuckooSet::<u64>::new);
}

#[test]
fn one_hasher_cloned() {
    check_map(|| CuckooMap::with_hasher(RandomState::new()));
    check_set(|| CuckooSet::with_hasher(RandomState::new()));
}

#[test]
fn two_injected_hashers() {
    check_map(|| CuckooMap::with_hashers(RandomState::new(), RandomState::new()));
    check_map(|| CuckooMap::with_hashers(ahash::RandomState::new(), ahash::RandomState::new()));
    check_set(|| CuckooSet::with_hashers(RandomState::new(), RandomState::new()));
}

#[cfg(feature = "ahash")]
#[test]
fn ahash_aliases() {
    check_map(cuckoo_map::ACuckooMap::<u64, u64>::default);
    check_set(cuckoo_map::ACuckooSet::<u64>::default);
}
