use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use yz_core::{score, scores_for_dice, Category, Hand};

fn gen_hands(n: usize) -> Vec<Hand> {
    let mut rng = ChaCha8Rng::seed_from_u64(0x1234_5678);
    (0..n)
        .map(|_| std::array::from_fn(|_| rng.gen_range(1..=6)))
        .collect()
}

fn bench_scores_for_dice(c: &mut Criterion) {
    let mut g = c.benchmark_group("yz_core_scoring");
    for &n in &[256usize, 4096usize] {
        let hands = gen_hands(n);
        g.bench_with_input(BenchmarkId::new("scores_for_dice_batch", n), &hands, |b, hs| {
            b.iter(|| {
                for &h in hs.iter() {
                    black_box(scores_for_dice(black_box(h)));
                }
            })
        });
        g.bench_with_input(BenchmarkId::new("full_house_batch", n), &hands, |b, hs| {
            b.iter(|| {
                for &h in hs.iter() {
                    black_box(score(Category::FullHouse, black_box(h)));
                }
            })
        });
    }
    g.finish();
}

criterion_group!(benches, bench_scores_for_dice);
criterion_main!(benches);
