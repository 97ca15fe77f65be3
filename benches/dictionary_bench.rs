use chained_dict::{Dictionary, FixedState};
use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use std::time::Duration;

fn lcg(mut s: u64) -> impl Iterator<Item = u64> {
    std::iter::from_fn(move || {
        s = s.wrapping_mul(6364136223846793005).wrapping_add(1);
        Some(s)
    })
}

fn key(n: u64) -> String {
    format!("k{:016x}", n)
}

fn filled(seed: u64, n: usize) -> (Dictionary<String, u64, FixedState>, Vec<String>) {
    let mut d = Dictionary::with_hasher(FixedState::default());
    let keys: Vec<_> = lcg(seed).take(n).map(key).collect();
    for (i, k) in keys.iter().enumerate() {
        d.associate(k.clone(), i as u64);
    }
    (d, keys)
}

fn bench_associate(c: &mut Criterion) {
    c.bench_function("dictionary_associate_10k", |b| {
        let keys: Vec<_> = lcg(1).take(10_000).map(key).collect();
        b.iter_batched(
            || (Dictionary::with_hasher(FixedState::default()), keys.clone()),
            |(mut d, keys)| {
                for (i, k) in keys.into_iter().enumerate() {
                    d.associate(k, i as u64);
                }
                black_box(d)
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_get_hit(c: &mut Criterion) {
    c.bench_function("dictionary_get_hit", |b| {
        let (d, keys) = filled(7, 20_000);
        let mut it = keys.iter().cycle();
        b.iter(|| {
            let k = it.next().unwrap();
            black_box(d.get(k.as_str()));
        })
    });
}

fn bench_get_miss(c: &mut Criterion) {
    c.bench_function("dictionary_get_miss", |b| {
        let (d, _) = filled(11, 10_000);
        let mut miss = lcg(0xdead_beef);
        b.iter(|| {
            // generate keys unlikely in the dictionary
            let k = key(miss.next().unwrap());
            black_box(d.get(k.as_str()));
        })
    });
}

// Fill past several doublings then drain through the matching halvings.
fn bench_grow_shrink_churn(c: &mut Criterion) {
    c.bench_function("dictionary_grow_shrink_5k", |b| {
        let keys: Vec<_> = lcg(3).take(5_000).map(key).collect();
        b.iter(|| {
            let mut d = Dictionary::with_hasher(FixedState::default());
            for (i, k) in keys.iter().enumerate() {
                d.associate(k.as_str(), i as u64);
            }
            for k in &keys {
                d.remove(k.as_str());
            }
            black_box(d.capacity())
        })
    });
}

fn bench_config() -> Criterion {
    Criterion::default()
        .sample_size(50)
        .measurement_time(Duration::from_secs(8))
        .warm_up_time(Duration::from_secs(2))
}

criterion_group! {
    name = benches;
    config = bench_config();
    targets = bench_associate, bench_get_hit, bench_get_miss, bench_grow_shrink_churn
}
criterion_main!(benches);
