//! Time-budgeted frame driver.
//!
//! A frame steps the simulation repeatedly until the frame budget is spent,
//! then hands control back so the caller can read the generation once. The
//! driver keeps running totals that a status display can drain periodically.

use std::time::{Duration, Instant};

use tracing::trace;

use crate::strategy::LifeStrategy;

/// 60 frames per second.
pub const DEFAULT_FRAME_BUDGET: Duration = Duration::from_nanos(1_000_000_000 / 60);

/// Configuration for a [`FrameDriver`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DriverConfig {
    /// Wall time a frame may spend stepping. At least one step runs per
    /// frame regardless.
    pub frame_budget: Duration,
    /// Optional cap on steps per frame, for reproducible headless runs.
    pub max_steps_per_frame: Option<u64>,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            frame_budget: DEFAULT_FRAME_BUDGET,
            max_steps_per_frame: None,
        }
    }
}

impl DriverConfig {
    pub fn frame_budget(mut self, budget: Duration) -> Self {
        self.frame_budget = budget;
        self
    }

    /// Budget for `fps` frames per second.
    pub fn fps(mut self, fps: u32) -> Self {
        self.frame_budget = Duration::from_secs(1) / fps.max(1);
        self
    }

    pub fn max_steps_per_frame(mut self, n: u64) -> Self {
        self.max_steps_per_frame = Some(n.max(1));
        self
    }
}

/// Outcome of one [`FrameDriver::run_frame`] call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameReport {
    pub steps: u64,
    pub elapsed: Duration,
    pub generation: u64,
    pub population: usize,
}

/// Counters accumulated across frames.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DriverTotals {
    pub frames: u64,
    pub steps: u64,
    pub step_time: Duration,
}

impl DriverTotals {
    /// Mean wall time per step in milliseconds, zero when nothing ran.
    pub fn mean_step_ms(&self) -> f64 {
        if self.steps == 0 {
            0.0
        } else {
            self.step_time.as_secs_f64() * 1000.0 / self.steps as f64
        }
    }
}

#[derive(Debug, Default)]
pub struct FrameDriver {
    config: DriverConfig,
    totals: DriverTotals,
}

impl FrameDriver {
    pub fn new(config: DriverConfig) -> Self {
        Self {
            config,
            totals: DriverTotals::default(),
        }
    }

    pub fn config(&self) -> &DriverConfig {
        &self.config
    }

    /// Step `sim` until the frame budget or the step cap is reached.
    pub fn run_frame<S: LifeStrategy>(&mut self, sim: &mut S) -> FrameReport {
        let cap = self.config.max_steps_per_frame.unwrap_or(u64::MAX);
        let start = Instant::now();
        let mut steps = 0u64;
        loop {
            sim.next_step();
            steps += 1;
            if steps >= cap || start.elapsed() >= self.config.frame_budget {
                break;
            }
        }
        let elapsed = start.elapsed();

        self.totals.frames += 1;
        self.totals.steps += steps;
        self.totals.step_time += elapsed;

        let report = FrameReport {
            steps,
            elapsed,
            generation: sim.generation(),
            population: sim.population(),
        };
        trace!(?report, "frame finished");
        report
    }

    pub fn totals(&self) -> DriverTotals {
        self.totals
    }

    /// Return the totals and reset them to zero.
    pub fn take_totals(&mut self) -> DriverTotals {
        std::mem::take(&mut self.totals)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::{DEFAULT_FRAME_BUDGET, DriverConfig, FrameDriver};
    use crate::sparse::IncrementalMap;
    use crate::strategy::{LifeStrategy, Point};

    fn blinker() -> IncrementalMap {
        IncrementalMap::new([(1, 0), (1, 1), (1, 2)].map(Point::from))
    }

    #[test]
    fn zero_budget_still_steps_once() {
        let mut driver = FrameDriver::new(DriverConfig::default().frame_budget(Duration::ZERO));
        let mut sim = blinker();
        let report = driver.run_frame(&mut sim);
        assert_eq!(report.steps, 1);
        assert_eq!(report.generation, 1);
        assert_eq!(report.population, 3);
    }

    #[test]
    fn step_cap_bounds_each_frame() {
        let config = DriverConfig::default()
            .frame_budget(Duration::from_secs(60))
            .max_steps_per_frame(4);
        let mut driver = FrameDriver::new(config);
        let mut sim = blinker();
        for frame in 1..=3u64 {
            let report = driver.run_frame(&mut sim);
            assert_eq!(report.steps, 4);
            assert_eq!(report.generation, frame * 4);
        }
        assert_eq!(sim.generation(), 12);
    }

    #[test]
    fn totals_accumulate_and_drain() {
        let config = DriverConfig::default()
            .frame_budget(Duration::from_secs(60))
            .max_steps_per_frame(2);
        let mut driver = FrameDriver::new(config);
        let mut sim = blinker();
        driver.run_frame(&mut sim);
        driver.run_frame(&mut sim);

        let totals = driver.take_totals();
        assert_eq!(totals.frames, 2);
        assert_eq!(totals.steps, 4);
        assert!(totals.mean_step_ms() >= 0.0);
        assert_eq!(driver.totals().frames, 0);
        assert_eq!(driver.totals().mean_step_ms(), 0.0);
    }

    #[test]
    fn fps_sets_budget() {
        assert_eq!(DriverConfig::default().frame_budget, DEFAULT_FRAME_BUDGET);
        assert_eq!(DriverConfig::default().fps(10).frame_budget, Duration::from_millis(100));
        assert_eq!(DriverConfig::default().fps(0).frame_budget, Duration::from_secs(1));
    }
}
