//! Benchmarks for one generation step of each strategy.
//!
//! Run with: cargo bench --bench step_bench

use std::hint::black_box;
use std::time::Duration;

use criterion::{BatchSize, Criterion, criterion_group, criterion_main};
use life_strategies::{Algorithm, LifeStrategy, Point, Simulation, SimulationConfig};
use rand::{Rng, SeedableRng};

fn board(side: i32, density: f64, seed: u64) -> Vec<Point> {
    let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
    let offset = side / 2;
    let mut cells = Vec::new();
    for y in 0..side {
        for x in 0..side {
            if rng.random::<f64>() < density {
                cells.push(Point::new(x + offset, y + offset));
            }
        }
    }
    cells
}

fn bench_steps(c: &mut Criterion) {
    let mut group = c.benchmark_group("step");
    group.sample_size(20);
    group.measurement_time(Duration::from_secs(5));

    // Steps per bench iteration, overridable via LIFE_BENCH_STEPS.
    let steps: u64 = std::env::var("LIFE_BENCH_STEPS")
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .filter(|v| *v > 0)
        .unwrap_or(16);

    for &(side, density) in &[(64, 0.35), (256, 0.35)] {
        let cells = board(side, density, 0xBEEF);
        let config = SimulationConfig::default()
            .width(side as usize * 2)
            .height(side as usize * 2);
        for algorithm in Algorithm::ALL {
            group.bench_function(format!("{algorithm}_{side}x{side}_steps{steps}"), |b| {
                b.iter_batched(
                    || {
                        Simulation::new(algorithm, cells.iter().copied(), &config)
                            .expect("benchmark grid dimensions are valid")
                    },
                    |mut sim| {
                        sim.step_n(steps);
                        black_box(sim.population())
                    },
                    BatchSize::LargeInput,
                );
            });
        }
    }
    group.finish();
}

criterion_group!(benches, bench_steps);
criterion_main!(benches);
