//! Algorithm selection by name.
//!
//! [`Simulation`] is a closed set of the concrete strategies. It implements
//! [`LifeStrategy`] by matching on the variant, so drivers stay generic
//! without paying for dynamic dispatch in the step loop.

use std::fmt;
use std::str::FromStr;

use tracing::debug;

use crate::dense::{DEFAULT_HEIGHT, DEFAULT_WIDTH, DenseCells, DenseGrid};
use crate::error::{LifeError, LifeResult};
use crate::sparse::{IncrementalCells, IncrementalMap, RecomputeCells, RecomputeSet};
use crate::strategy::{LifeStrategy, Point, StepStats};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Algorithm {
    /// Sparse map with incrementally maintained neighbor counts.
    Incremental,
    /// Sparse live set, neighbor counts rebuilt every step.
    Recompute,
    /// Fixed-size double-buffered grid scanned within a bounding box.
    Dense,
}

impl Algorithm {
    pub const ALL: [Algorithm; 3] = [Algorithm::Incremental, Algorithm::Recompute, Algorithm::Dense];

    /// Registry name used on the command line.
    pub const fn name(self) -> &'static str {
        match self {
            Algorithm::Incremental => "map-diff",
            Algorithm::Recompute => "map-set",
            Algorithm::Dense => "bounded-grid",
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = LifeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "map-diff" | "incremental" => Ok(Algorithm::Incremental),
            "map-set" | "recompute" => Ok(Algorithm::Recompute),
            "bounded-grid" | "dense" => Ok(Algorithm::Dense),
            _ => Err(LifeError::UnknownAlgorithm(s.to_string())),
        }
    }
}

/// Construction parameters shared by every algorithm.
///
/// Width and height only matter for [`Algorithm::Dense`]; the sparse
/// strategies ignore them.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SimulationConfig {
    pub width: usize,
    pub height: usize,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
        }
    }
}

impl SimulationConfig {
    pub fn width(mut self, width: usize) -> Self {
        self.width = width;
        self
    }

    pub fn height(mut self, height: usize) -> Self {
        self.height = height;
        self
    }
}

pub enum Simulation {
    Incremental(IncrementalMap),
    Recompute(RecomputeSet),
    Dense(DenseGrid),
}

impl Simulation {
    pub fn new<I>(algorithm: Algorithm, points: I, config: &SimulationConfig) -> LifeResult<Self>
    where
        I: IntoIterator<Item = Point>,
    {
        debug!(%algorithm, width = config.width, height = config.height, "building simulation");
        Ok(match algorithm {
            Algorithm::Incremental => Simulation::Incremental(IncrementalMap::new(points)),
            Algorithm::Recompute => Simulation::Recompute(RecomputeSet::new(points)),
            Algorithm::Dense => {
                Simulation::Dense(DenseGrid::new(points, config.width, config.height)?)
            }
        })
    }

    pub fn algorithm(&self) -> Algorithm {
        match self {
            Simulation::Incremental(_) => Algorithm::Incremental,
            Simulation::Recompute(_) => Algorithm::Recompute,
            Simulation::Dense(_) => Algorithm::Dense,
        }
    }

    /// A new simulation of `algorithm` seeded with the current generation.
    ///
    /// The generation counter restarts at zero. Switching to the dense grid
    /// drops cells that fall outside its bounds.
    pub fn switch_to(&self, algorithm: Algorithm, config: &SimulationConfig) -> LifeResult<Self> {
        debug!(
            from = %self.algorithm(),
            to = %algorithm,
            population = self.population(),
            "switching algorithm"
        );
        Simulation::new(algorithm, self.cells(), config)
    }

    pub fn cells(&self) -> LiveCells<'_> {
        match self {
            Simulation::Incremental(s) => LiveCells::Incremental(s.cells()),
            Simulation::Recompute(s) => LiveCells::Recompute(s.cells()),
            Simulation::Dense(s) => LiveCells::Dense(s.cells()),
        }
    }
}

impl LifeStrategy for Simulation {
    #[inline]
    fn next_step(&mut self) {
        match self {
            Simulation::Incremental(s) => s.next_step(),
            Simulation::Recompute(s) => s.next_step(),
            Simulation::Dense(s) => s.next_step(),
        }
    }

    fn live_cells(&self) -> impl Iterator<Item = Point> + '_ {
        self.cells()
    }

    fn population(&self) -> usize {
        match self {
            Simulation::Incremental(s) => s.population(),
            Simulation::Recompute(s) => s.population(),
            Simulation::Dense(s) => s.population(),
        }
    }

    fn generation(&self) -> u64 {
        match self {
            Simulation::Incremental(s) => s.generation(),
            Simulation::Recompute(s) => s.generation(),
            Simulation::Dense(s) => s.generation(),
        }
    }

    fn stats(&self) -> StepStats {
        match self {
            Simulation::Incremental(s) => s.stats(),
            Simulation::Recompute(s) => s.stats(),
            Simulation::Dense(s) => s.stats(),
        }
    }

    fn step_n(&mut self, n: u64) {
        match self {
            Simulation::Incremental(s) => s.step_n(n),
            Simulation::Recompute(s) => s.step_n(n),
            Simulation::Dense(s) => s.step_n(n),
        }
    }
}

/// Live cells of a [`Simulation`].
pub enum LiveCells<'a> {
    Incremental(IncrementalCells<'a>),
    Recompute(RecomputeCells<'a>),
    Dense(DenseCells<'a>),
}

impl Iterator for LiveCells<'_> {
    type Item = Point;

    #[inline]
    fn next(&mut self) -> Option<Point> {
        match self {
            LiveCells::Incremental(it) => it.next(),
            LiveCells::Recompute(it) => it.next(),
            LiveCells::Dense(it) => it.next(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::{Algorithm, Simulation, SimulationConfig};
    use crate::error::LifeError;
    use crate::strategy::{LifeStrategy, Point};

    const BLINKER: [(i32, i32); 3] = [(1, 0), (1, 1), (1, 2)];

    fn live_set(sim: &Simulation) -> HashSet<(i32, i32)> {
        sim.live_cells().map(Into::into).collect()
    }

    #[test]
    fn names_round_trip_through_from_str() {
        for algorithm in Algorithm::ALL {
            assert_eq!(algorithm.name().parse::<Algorithm>(), Ok(algorithm));
            assert_eq!(algorithm.to_string(), algorithm.name());
        }
        assert_eq!("DENSE".parse::<Algorithm>(), Ok(Algorithm::Dense));
        assert_eq!("Incremental".parse::<Algorithm>(), Ok(Algorithm::Incremental));
        assert_eq!(
            "hashlife".parse::<Algorithm>(),
            Err(LifeError::UnknownAlgorithm("hashlife".to_string()))
        );
    }

    #[test]
    fn config_builder_sets_dimensions() {
        let config = SimulationConfig::default().width(64).height(32);
        assert_eq!((config.width, config.height), (64, 32));
        assert_eq!(SimulationConfig::default().width, 2000);
    }

    #[test]
    fn factory_builds_requested_variant() {
        let config = SimulationConfig::default().width(8).height(8);
        for algorithm in Algorithm::ALL {
            let sim = Simulation::new(algorithm, BLINKER.map(Point::from), &config).unwrap();
            assert_eq!(sim.algorithm(), algorithm);
            assert_eq!(sim.population(), 3);
        }
    }

    #[test]
    fn factory_reports_bad_dense_dimensions() {
        let config = SimulationConfig::default().width(0);
        let err = Simulation::new(Algorithm::Dense, std::iter::empty(), &config).err();
        assert!(matches!(err, Some(LifeError::InvalidDimensions { width: 0, .. })));
        // Sparse strategies ignore the dimensions.
        assert!(Simulation::new(Algorithm::Recompute, std::iter::empty(), &config).is_ok());
    }

    #[test]
    fn switching_carries_the_current_generation() {
        let config = SimulationConfig::default().width(8).height(8);
        let mut sim =
            Simulation::new(Algorithm::Incremental, BLINKER.map(Point::from), &config).unwrap();
        sim.next_step();
        let before = live_set(&sim);

        for target in Algorithm::ALL {
            let mut switched = sim.switch_to(target, &config).unwrap();
            assert_eq!(switched.algorithm(), target);
            assert_eq!(switched.generation(), 0);
            assert_eq!(live_set(&switched), before);
            switched.next_step();
            assert_eq!(
                live_set(&switched),
                BLINKER.into_iter().collect::<HashSet<_>>()
            );
        }
    }
}
