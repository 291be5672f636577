//! Cross-checks every strategy against the others over many random seeds.
//!
//! Each seed runs independently on the rayon pool; the live sets of all
//! algorithms are compared after every step.

use std::collections::HashSet;

use anyhow::{Result, bail};
use life_strategies::{Algorithm, LifeStrategy, Point, Simulation, SimulationConfig};
use rand::RngCore;
use rand::SeedableRng;
use rayon::prelude::*;
use tracing::{info, warn};

const BOARD_SIDE: i32 = 48;
const GRID_SIDE: usize = 256;
const STEPS: u64 = 64;
const SEEDS: u64 = 256;

struct Mismatch {
    seed: u64,
    density: f64,
    step: u64,
    algorithm: Algorithm,
}

fn seed_board(seed: u64, density: f64) -> Vec<Point> {
    let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
    let threshold = (u64::MAX as f64 * density) as u64;
    let offset = (GRID_SIDE as i32 - BOARD_SIDE) / 2;
    let mut cells = Vec::new();
    for y in 0..BOARD_SIDE {
        for x in 0..BOARD_SIDE {
            if rng.next_u64() <= threshold {
                cells.push(Point::new(x + offset, y + offset));
            }
        }
    }
    cells
}

fn live_set(sim: &Simulation) -> HashSet<Point> {
    sim.live_cells().collect()
}

fn check_seed(seed: u64, density: f64) -> Result<Option<Mismatch>> {
    let config = SimulationConfig::default().width(GRID_SIDE).height(GRID_SIDE);
    let board = seed_board(seed, density);
    let mut sims = Algorithm::ALL
        .iter()
        .map(|&algorithm| Simulation::new(algorithm, board.iter().copied(), &config))
        .collect::<Result<Vec<_>, _>>()?;

    for step in 1..=STEPS {
        for sim in &mut sims {
            sim.next_step();
        }
        let reference = live_set(&sims[0]);
        for sim in &sims[1..] {
            if live_set(sim) != reference {
                return Ok(Some(Mismatch {
                    seed,
                    density,
                    step,
                    algorithm: sim.algorithm(),
                }));
            }
        }
    }
    Ok(None)
}

fn main() -> Result<()> {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();

    let cases: Vec<(u64, f64)> = (0..SEEDS)
        .flat_map(|seed| [0.15, 0.35, 0.6].map(|density| (seed, density)))
        .collect();
    info!(cases = cases.len(), steps = STEPS, "running parity sweep");

    let results = cases
        .par_iter()
        .map(|&(seed, density)| check_seed(seed, density))
        .collect::<Result<Vec<_>>>()?;

    let mismatches: Vec<Mismatch> = results.into_iter().flatten().collect();
    for m in &mismatches {
        warn!(
            seed = m.seed,
            density = m.density,
            step = m.step,
            algorithm = %m.algorithm,
            "live-set mismatch against {}",
            Algorithm::ALL[0]
        );
    }
    if !mismatches.is_empty() {
        bail!("{} of {} cases diverged", mismatches.len(), cases.len());
    }
    info!(cases = cases.len(), "all strategies agree");
    Ok(())
}
