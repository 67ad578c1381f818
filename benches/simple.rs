use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};

fn cuckoo(n: u32) {
    let mut map = cuckoo_map::CuckooMap::<_, _>::default();
    for i in 0..n {
        map.insert(i, i);
    }
    for i in 0..n {
        black_box(map.get(&i));
    }
}

fn cuckoo_ahash(n: u32) {
    let mut map = cuckoo_map::ACuckooMap::default();
    for i in 0..n {
        map.insert(i, i);
    }
    for i in 0..n {
        black_box(map.get(&i));
    }
}

fn hashbrown(n: u32) {
    use std::collections::hash_map::RandomState;
    let mut map = hashbrown::HashMap::<_, _, RandomState>::with_hasher(RandomState::default());
    for i in 0..n {
        map.insert(i, i);
    }
    for i in 0..n {
        black_box(map.get(&i));
    }
}

fn std_hashmap(n: u32) {
    let mut map = std::collections::HashMap::new();
    for i in 0..n {
        map.insert(i, i);
    }
    for i in 0..n {
        black_box(map.get(&i));
    }
}

fn churn(n: u32) {
    let mut map = cuckoo_map::CuckooMap::<_, _>::default();
    for i in 0..n {
        map.insert(i, i);
    }
    // Erasing most entries walks the tables back down through shrink rehashes.
    for i in 0..n - n / 8 {
        black_box(map.erase(&i));
    }
}

fn criterion_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert-then-get");
    for n in [16, 256, 4096] {
        group.bench_with_input(BenchmarkId::new("cuckoo", n), &n, |b, &n| b.iter(|| cuckoo(n)));
        group.bench_with_input(BenchmarkId::new("cuckoo-ahash", n), &n, |b, &n| {
            b.iter(|| cuckoo_ahash(n))
        });
        group.bench_with_input(BenchmarkId::new("hashbrown", n), &n, |b, &n| {
            b.iter(|| hashbrown(n))
        });
        group.bench_with_input(BenchmarkId::new("stdhashmap", n), &n, |b, &n| {
            b.iter(|| std_hashmap(n))
        });
    }
    group.finish();

    c.bench_function("cuckoo-churn-4096", |b| b.iter(|| churn(4096)));
}

criterion_main!(benches);
criterion_group!(benches, criterion_benchmark);
