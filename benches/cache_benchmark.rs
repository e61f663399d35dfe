use criterion::{black_box, criterion_group, criterion_main, Criterion};
use furia_esports_bot::cache::TtlCache;
use furia_esports_bot::engine::LookupKey;
use furia_esports_bot::{DataKind, Game};
use std::time::Duration;

fn key(team: usize) -> LookupKey {
    LookupKey {
        game: Game::Valorant,
        team: format!("Team {}", team),
        kind: DataKind::Players,
    }
}

fn setup_cache() -> TtlCache<LookupKey, Vec<String>> {
    let cache = TtlCache::new(32, Duration::from_secs(300));

    // Populate with test data
    for i in 0..32 {
        let lines = (0..10).map(|p| format!("player{} - (Duelist)", p)).collect();
        cache.insert(key(i), lines);
    }

    cache
}

fn bench_cache_get(c: &mut Criterion) {
    let cache = setup_cache();

    c.bench_function("cache_get_hit", |b| {
        b.iter(|| black_box(cache.get(&key(16))));
    });

    c.bench_function("cache_get_miss", |b| {
        b.iter(|| black_box(cache.get(&key(99))));
    });
}

fn bench_cache_get_or_compute(c: &mut Criterion) {
    let runtime = tokio::runtime::Runtime::new().unwrap();
    let cache = setup_cache();

    c.bench_function("cache_get_or_compute_hit", |b| {
        b.to_async(&runtime).iter(|| async {
            black_box(cache.get_or_compute(key(16), || async { Vec::new() }).await)
        });
    });
}

fn bench_cache_insert_evict(c: &mut Criterion) {
    let cache = setup_cache();
    let mut next = 32;

    c.bench_function("cache_insert_with_eviction", |b| {
        b.iter(|| {
            next += 1;
            cache.insert(key(next), vec!["x".to_string()]);
        });
    });
}

criterion_group!(
    benches,
    bench_cache_get,
    bench_cache_get_or_compute,
    bench_cache_insert_evict
);
criterion_main!(benches);
