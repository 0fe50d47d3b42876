// Cost of a single-key mutation, which re-encodes and rewrites the whole map

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use persistmap::{BincodeCodec, JsonCodec, MapConfig, PersistentMap, SyncMode};
use tempfile::tempdir;

fn bench_set(c: &mut Criterion) {
    let mut group = c.benchmark_group("set");
    group.sample_size(20);

    for size in [10usize, 1_000] {
        let dir = tempdir().unwrap();
        let config = MapConfig::new().with_sync_mode(SyncMode::Data);

        let json: PersistentMap<String, String> =
            PersistentMap::open_with_config(dir.path().join("map.json"), JsonCodec::new(), config.clone())
                .unwrap();
        let bin: PersistentMap<String, String> =
            PersistentMap::open_with_config(dir.path().join("map.bin"), BincodeCodec::new(), config)
                .unwrap();
        for i in 0..size {
            json.set(format!("key{}", i), format!("value{}", i)).unwrap();
            bin.set(format!("key{}", i), format!("value{}", i)).unwrap();
        }

        group.bench_with_input(BenchmarkId::new("json", size), &size, |b, _| {
            b.iter(|| json.set("hot".to_string(), "value".to_string()).unwrap())
        });
        group.bench_with_input(BenchmarkId::new("bincode", size), &size, |b, _| {
            b.iter(|| bin.set("hot".to_string(), "value".to_string()).unwrap())
        });
    }

    group.finish();
}

fn bench_get(c: &mut Criterion) {
    let dir = tempdir().unwrap();
    let map: PersistentMap<String, String> =
        PersistentMap::open(dir.path().join("map.json"), JsonCodec::new()).unwrap();
    map.set("key".to_string(), "value".to_string()).unwrap();

    c.bench_function("get", |b| b.iter(|| map.get("key").unwrap()));
}

criterion_group!(benches, bench_set, bench_get);
criterion_main!(benches);
