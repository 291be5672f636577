//! Full-recompute sparse strategy.
//!
//! Only the set of live keys survives between steps. Each step counts the
//! neighbors of every live cell from scratch, which visits exactly the cells
//! with at least one live neighbor, and then rebuilds the live set.

use std::collections::hash_set;
use std::time::{Duration, Instant};

use ahash::AHashSet;
use tracing::{debug, trace};

use super::neighbor_counts::NeighborCounts;
use crate::packing::{PackedKey, neighbor_keys, pack, unpack};
use crate::strategy::{LifeStrategy, Point, StepStats};

pub struct RecomputeSet {
    live: AHashSet<PackedKey>,
    /// Spare set that receives the next generation, then swaps with `live`.
    next: AHashSet<PackedKey>,
    counts: NeighborCounts,
    generation: u64,
    last_step: Duration,
}

impl RecomputeSet {
    pub fn new<I>(points: I) -> Self
    where
        I: IntoIterator<Item = Point>,
    {
        let live: AHashSet<PackedKey> = points.into_iter().map(|p| pack(p.x, p.y)).collect();
        debug!(population = live.len(), "seeded recompute set");
        Self {
            counts: NeighborCounts::with_capacity(live.len().saturating_mul(4)),
            next: AHashSet::with_capacity(live.len()),
            live,
            generation: 0,
            last_step: Duration::ZERO,
        }
    }

    pub fn cells(&self) -> RecomputeCells<'_> {
        RecomputeCells {
            inner: self.live.iter(),
        }
    }

    pub fn is_alive(&self, x: i32, y: i32) -> bool {
        self.live.contains(&pack(x, y))
    }

    fn step_impl(&mut self) {
        self.counts.begin_step();
        self.counts.reserve_for(self.live.len().saturating_mul(3));
        for &key in &self.live {
            for nk in neighbor_keys(key) {
                self.counts.increment(nk);
            }
        }

        self.next.clear();
        for (key, count) in self.counts.iter() {
            if count == 3 || (count == 2 && self.live.contains(&key)) {
                self.next.insert(key);
            }
        }
        std::mem::swap(&mut self.live, &mut self.next);
    }
}

impl LifeStrategy for RecomputeSet {
    fn next_step(&mut self) {
        let start = Instant::now();
        self.step_impl();
        self.generation += 1;
        self.last_step = start.elapsed();
        trace!(
            generation = self.generation,
            population = self.live.len(),
            candidates = self.counts.len(),
            "recompute set stepped"
        );
    }

    fn live_cells(&self) -> impl Iterator<Item = Point> + '_ {
        self.cells()
    }

    fn population(&self) -> usize {
        self.live.len()
    }

    fn generation(&self) -> u64 {
        self.generation
    }

    fn stats(&self) -> StepStats {
        StepStats {
            step_time: self.last_step,
            population: self.live.len(),
        }
    }
}

/// Live cells of a [`RecomputeSet`].
pub struct RecomputeCells<'a> {
    inner: hash_set::Iter<'a, PackedKey>,
}

impl Iterator for RecomputeCells<'_> {
    type Item = Point;

    #[inline]
    fn next(&mut self) -> Option<Point> {
        self.inner.next().map(|&key| unpack(key).into())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for RecomputeCells<'_> {}
