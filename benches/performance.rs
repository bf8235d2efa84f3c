//! Performance benchmarks for Encore.
//!
//! Run with: cargo bench
//!
//! Target performance:
//! - Classification of a full gateway page: < 1ms
//! - Recents insert with eviction: < 10us

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use encore::core::search::{MediaKind, RawResult};
use encore::{CommandCatalog, RecencyStore, SearchEngine, SearchResult};

fn raw_results(count: usize) -> Vec<RawResult> {
    let kinds = [
        MediaKind::Track,
        MediaKind::Album,
        MediaKind::Artist,
        MediaKind::Playlist,
    ];
    (0..count)
        .map(|i| RawResult {
            id: format!("item-{}", i),
            kind: kinds[i % kinds.len()],
            title: format!("Arctic Session {} - Benchmark Entry", i),
            subtitle: format!("Artist {}", i % 17),
            image: None,
            related: i % 9 == 0,
            payload: serde_json::Value::Null,
        })
        .collect()
}

/// Benchmark bucket classification for typical queries.
fn bench_classify(c: &mut Criterion) {
    let engine = SearchEngine::default();
    let catalog = CommandCatalog::builtin();
    let raw = raw_results(200);

    let queries = ["a", "arctic", "session 50", "toggle", "zzz"];

    let mut group = c.benchmark_group("classify");

    for query in queries {
        group.bench_with_input(BenchmarkId::from_parameter(query), &query, |b, query| {
            b.iter(|| {
                black_box(engine.classify(
                    black_box(query),
                    &raw,
                    catalog.commands(),
                    &[],
                ))
            })
        });
    }

    group.finish();
}

/// Benchmark recording into a full recents list.
fn bench_recents(c: &mut Criterion) {
    let results: Vec<SearchResult> = raw_results(50)
        .into_iter()
        .map(SearchResult::from_media)
        .collect();

    let mut group = c.benchmark_group("recents");

    group.bench_function("record_with_eviction", |b| {
        let mut store = RecencyStore::in_memory(10);
        let mut i = 0usize;
        b.iter(|| {
            store.record_at(&results[i % results.len()], i as u64);
            i += 1;
        })
    });

    group.bench_function("empty_query_listing", |b| {
        let engine = SearchEngine::default();
        let mut store = RecencyStore::in_memory(10);
        for (i, result) in results.iter().take(10).enumerate() {
            store.record_at(result, i as u64);
        }
        b.iter(|| black_box(engine.classify("", &[], &[], store.entries())))
    });

    group.finish();
}

criterion_group!(benches, bench_classify, bench_recents);

criterion_main!(benches);
