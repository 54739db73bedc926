use criterion::{black_box, criterion_group, criterion_main, Criterion};

use yz_core::{simulate, SimConfig};

fn bench_greedy_games(c: &mut Criterion) {
    let mut g = c.benchmark_group("yz_core_engine");
    g.sample_size(20);
    g.bench_function("greedy_game_1p", |b| {
        let mut seed = 0u64;
        b.iter(|| {
            seed += 1;
            black_box(simulate(SimConfig {
                games: 1,
                players: 1,
                seed,
            }))
        })
    });
    g.bench_function("greedy_game_2p", |b| {
        b.iter(|| {
            black_box(simulate(SimConfig {
                games: 1,
                players: 2,
                seed: 7,
            }))
        })
    });
    g.finish();
}

criterion_group!(benches, bench_greedy_games);
criterion_main!(benches);
