//! Criterion benchmarks for page and window sampling.
//!
//! Measures the draw-correction arithmetic across page lengths to keep the
//! per-search overhead visible; the functions sit on the pipeline's hot path
//! between the two network calls.
//!
//! Run benchmarks with:
//! ```bash
//! cargo bench --package pinlens-core
//! ```

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use pinlens_core::sampling::{select_page, select_window, window_for_draw};
use pinlens_core::{MAX_PAGE_DEPTH, MAX_WINDOW_LEN};

/// Page lengths to benchmark: short page, hazard band, deep page.
const PAGE_LENGTHS: &[usize] = &[10, 30, 250];

/// Fixed seed so runs measure the same draw sequence.
const BENCHMARK_SEED: u64 = 0x5eed;

/// Benchmark the deterministic window correction for each page length.
fn bench_window_for_draw(c: &mut Criterion) {
    let mut group = c.benchmark_group("window_for_draw");

    for &count in PAGE_LENGTHS {
        group.bench_with_input(BenchmarkId::new("page_len", count), &count, |b, &count| {
            b.iter(|| {
                for draw in 0..count {
                    std::hint::black_box(window_for_draw(count, MAX_WINDOW_LEN, draw));
                }
            });
        });
    }

    group.finish();
}

/// Benchmark a full seeded draw pair as the pipeline performs it.
fn bench_seeded_draws(c: &mut Criterion) {
    c.bench_function("seeded_page_and_window", |b| {
        b.iter(|| {
            let mut rng = ChaCha8Rng::seed_from_u64(BENCHMARK_SEED);
            let page = select_page(100, MAX_PAGE_DEPTH, &mut rng);
            let window = select_window(250, MAX_WINDOW_LEN, &mut rng);
            std::hint::black_box((page, window));
        });
    });
}

criterion_group!(benches, bench_window_for_draw, bench_seeded_draws);
criterion_main!(benches);
