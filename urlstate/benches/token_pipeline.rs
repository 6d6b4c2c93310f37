use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use history::HistoryEntry;
use urlstate::{StateLimits, UrlStateManager, WalletConfig};

fn history(len: usize) -> Vec<HistoryEntry> {
    (0..len)
        .map(|i| HistoryEntry::plain(format!("https://github.com/user{i}/repo-{}", i * 7)))
        .collect()
}

fn manager() -> UrlStateManager {
    let config = WalletConfig {
        limits: StateLimits::unlimited(),
        ..WalletConfig::default()
    };
    UrlStateManager::new(&config).expect("default config is valid")
}

fn bench_save(c: &mut Criterion) {
    let manager = manager();
    let mut group = c.benchmark_group("save_to_token");
    for len in [1, 16, 128] {
        let entries = history(len);
        group.throughput(Throughput::Elements(len as u64));
        group.bench_with_input(BenchmarkId::from_parameter(len), &entries, |b, entries| {
            b.iter(|| manager.save_to_token(black_box(entries)));
        });
    }
    group.finish();
}

fn bench_load(c: &mut Criterion) {
    let manager = manager();
    let mut group = c.benchmark_group("load_from_token");
    for len in [1, 16, 128] {
        let token = manager
            .save_to_token(&history(len))
            .expect("history encodes");
        group.throughput(Throughput::Bytes(token.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(len), &token, |b, token| {
            b.iter(|| manager.load_from_token(black_box(token)));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_save, bench_load);
criterion_main!(benches);
