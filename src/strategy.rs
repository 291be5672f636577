//! The contract every stepping algorithm satisfies.
//!
//! Callers drive a strategy with [`LifeStrategy::next_step`] and read the
//! current generation back through [`LifeStrategy::live_cells`]. The
//! iterator borrows the strategy, so a generation must be fully consumed
//! (or copied) before the next step can run.

use std::time::Duration;

/// A cell coordinate.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl From<(i32, i32)> for Point {
    #[inline]
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

impl From<Point> for (i32, i32) {
    #[inline]
    fn from(p: Point) -> Self {
        (p.x, p.y)
    }
}

/// Instrumentation snapshot returned by [`LifeStrategy::stats`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StepStats {
    /// Wall time spent in the most recent `next_step`.
    pub step_time: Duration,
    /// Exact live-cell count of the current generation.
    pub population: usize,
}

impl StepStats {
    pub fn step_time_ms(&self) -> f64 {
        self.step_time.as_secs_f64() * 1000.0
    }
}

pub trait LifeStrategy {
    /// Advance exactly one generation in place.
    fn next_step(&mut self);

    /// Live cells of the current generation, without duplicates, in no
    /// particular order.
    fn live_cells(&self) -> impl Iterator<Item = Point> + '_;

    /// Exact live-cell count of the current generation.
    fn population(&self) -> usize;

    /// Number of steps taken since construction.
    fn generation(&self) -> u64;

    fn stats(&self) -> StepStats;

    /// Advance `n` generations.
    fn step_n(&mut self, n: u64) {
        for _ in 0..n {
            self.next_step();
        }
    }
}
