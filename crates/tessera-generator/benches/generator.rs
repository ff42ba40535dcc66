//! Benchmarks for board generation.
//!
//! # Benchmarks
//!
//! - **`generator_9x9`**: Generates a 9×9 board with 5 kinds, the default
//!   game shape.
//! - **`generator_3_kinds`**: Generates a 9×9 board with only 3 kinds, where
//!   forbidden-kind checks reject the most draws.
//!
//! # Test Data
//!
//! Uses three fixed seeds to ensure reproducibility while testing multiple cases:
//!
//! - **`seed_0`**: `c1d44bd6afaf8af64f126546884e19298acbdc33c3924a28136715de946ef3f1`
//! - **`seed_1`**: `a2b3c4d5e6f7a8b9c0d1e2f3a4b5c6d7e8f9a0b1c2d3e4f5a6b7c8d9e0f1a2b3`
//! - **`seed_2`**: `1234567890abcdef1234567890abcdef1234567890abcdef1234567890abcdef`
//!
//! # Running
//!
//! ```sh
//! cargo bench --bench generator
//! ```

use std::{hint, str::FromStr as _, time::Duration};

use criterion::{
    BatchSize, BenchmarkId, Criterion, PlottingBackend, criterion_group, criterion_main,
};
use tessera_generator::{BoardGenerator, BoardSeed};

const SEEDS: [&str; 3] = [
    "c1d44bd6afaf8af64f126546884e19298acbdc33c3924a28136715de946ef3f1",
    "a2b3c4d5e6f7a8b9c0d1e2f3a4b5c6d7e8f9a0b1c2d3e4f5a6b7c8d9e0f1a2b3",
    "1234567890abcdef1234567890abcdef1234567890abcdef1234567890abcdef",
];

fn bench_generator(c: &mut Criterion, name: &str, generator: BoardGenerator) {
    for (i, seed) in SEEDS.into_iter().enumerate() {
        let seed = BoardSeed::from_str(seed).unwrap();
        c.bench_with_input(
            BenchmarkId::new(name, format!("seed_{i}")),
            &seed,
            |b, seed| {
                b.iter_batched(
                    || hint::black_box(*seed),
                    |seed| generator.generate_with_seed(seed),
                    BatchSize::SmallInput,
                );
            },
        );
    }
}

fn bench_generator_9x9(c: &mut Criterion) {
    bench_generator(c, "generator_9x9", BoardGenerator::new(9, 9, 5));
}

fn bench_generator_3_kinds(c: &mut Criterion) {
    bench_generator(c, "generator_3_kinds", BoardGenerator::new(9, 9, 3));
}

criterion_group!(
    name = benches;
    config =
        Criterion::default()
            .plotting_backend(PlottingBackend::Plotters)
            .measurement_time(Duration::from_secs(5));
    targets =
        bench_generator_9x9,
        bench_generator_3_kinds
);
criterion_main!(benches);
