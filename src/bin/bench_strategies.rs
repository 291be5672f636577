//! Timing comparison of the stepping strategies.
//!
//! Runs every algorithm over the same seeded boards and reports timing. Use
//! with `--release` for meaningful results.

#[cfg(feature = "mimalloc-global")]
#[global_allocator]
static GLOBAL_ALLOCATOR: mimalloc::MiMalloc = mimalloc::MiMalloc;

use std::time::Instant;

use anyhow::Result;
use life_strategies::{Algorithm, LifeStrategy, Point, Simulation, SimulationConfig};
use rand::RngCore;
use rand::SeedableRng;

struct Scenario {
    name: &'static str,
    size: i32,
    density: f64,
    warmup: u64,
    iters: u64,
    seed: u64,
}

fn seed_board(size: i32, density: f64, seed: u64) -> Vec<Point> {
    let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
    let threshold = (u64::MAX as f64 * density) as u64;
    let mut cells = Vec::new();
    for y in 0..size {
        for x in 0..size {
            if rng.next_u64() <= threshold {
                cells.push(Point::new(x, y));
            }
        }
    }
    cells
}

fn run_scenario(s: &Scenario, algorithm: Algorithm) -> Result<(f64, usize)> {
    // Leave room for the pattern to spread before it meets the grid edge.
    let side = (s.size as usize) * 2;
    let config = SimulationConfig::default().width(side).height(side);
    let offset = s.size / 2;
    let board = seed_board(s.size, s.density, s.seed)
        .into_iter()
        .map(|p| Point::new(p.x + offset, p.y + offset));
    let mut sim = Simulation::new(algorithm, board, &config)?;

    sim.step_n(s.warmup);

    let start = Instant::now();
    sim.step_n(s.iters);
    let total_ms = start.elapsed().as_secs_f64() * 1000.0;
    Ok((total_ms, sim.population()))
}

fn main() -> Result<()> {
    let scenarios = [
        Scenario {
            name: "small-sparse",
            size: 128,
            density: 0.10,
            warmup: 3,
            iters: 200,
            seed: 0xA1,
        },
        Scenario {
            name: "small-dense",
            size: 128,
            density: 0.42,
            warmup: 3,
            iters: 200,
            seed: 0xB2,
        },
        Scenario {
            name: "medium-sparse",
            size: 512,
            density: 0.10,
            warmup: 3,
            iters: 50,
            seed: 0xC3,
        },
        Scenario {
            name: "medium-dense",
            size: 512,
            density: 0.42,
            warmup: 3,
            iters: 50,
            seed: 0xD4,
        },
        Scenario {
            name: "large-dense",
            size: 1000,
            density: 0.20,
            warmup: 2,
            iters: 20,
            seed: 0xE5,
        },
    ];

    println!(
        "{:<16} {:>14} {:>8} {:>12} {:>12} {:>10}",
        "Scenario", "Algorithm", "Iters", "Total(ms)", "Avg(ms)", "Pop"
    );
    println!("{}", "-".repeat(78));

    for s in &scenarios {
        let mut populations = Vec::with_capacity(Algorithm::ALL.len());
        for algorithm in Algorithm::ALL {
            let (total_ms, pop) = run_scenario(s, algorithm)?;
            let avg_ms = total_ms / s.iters as f64;
            println!(
                "{:<16} {:>14} {:>8} {:>12.3} {:>12.6} {:>10}",
                s.name,
                algorithm.name(),
                s.iters,
                total_ms,
                avg_ms,
                pop
            );
            populations.push(pop);
        }
        if populations.windows(2).any(|w| w[0] != w[1]) {
            println!("{:<16} population MISMATCH: {populations:?}", s.name);
        }
    }
    Ok(())
}
