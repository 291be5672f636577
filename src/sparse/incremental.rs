//! Incremental-diff sparse strategy.
//!
//! Every live cell and every dead cell touching at least one live cell has an
//! entry holding its live-neighbor count. Births and deaths patch the counts
//! of the 8 surrounding entries, so a step only does work proportional to the
//! live cells and their one-cell halo. Dead entries whose count has dropped to
//! zero are pruned lazily during the next classification scan.

use std::collections::hash_map;
use std::time::{Duration, Instant};

use ahash::AHashMap;
use tracing::{debug, trace};

use crate::packing::{PackedKey, neighbor_keys, pack, unpack};
use crate::strategy::{LifeStrategy, Point, StepStats};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct CellEntry {
    x: i16,
    y: i16,
    alive: bool,
    neighbors: u8,
}

impl CellEntry {
    #[inline]
    fn dead(key: PackedKey) -> Self {
        let (x, y) = unpack(key);
        Self {
            x: x as i16,
            y: y as i16,
            alive: false,
            neighbors: 0,
        }
    }
}

type CellMap = AHashMap<PackedKey, CellEntry>;

#[inline]
fn birth(cells: &mut CellMap, key: PackedKey) {
    if let Some(cell) = cells.get_mut(&key) {
        cell.alive = true;
    }
    for nk in neighbor_keys(key) {
        cells.entry(nk).or_insert_with(|| CellEntry::dead(nk)).neighbors += 1;
    }
}

#[inline]
fn death(cells: &mut CellMap, key: PackedKey) {
    if let Some(cell) = cells.get_mut(&key) {
        cell.alive = false;
    }
    for nk in neighbor_keys(key) {
        if let Some(cell) = cells.get_mut(&nk) {
            debug_assert!(cell.neighbors > 0, "neighbor count underflow at {:?}", unpack(nk));
            cell.neighbors -= 1;
        }
    }
}

pub struct IncrementalMap {
    cells: CellMap,
    /// Per-step scratch, kept to reuse their allocations.
    to_death: Vec<PackedKey>,
    to_birth: Vec<PackedKey>,
    population: usize,
    generation: u64,
    last_step: Duration,
}

impl IncrementalMap {
    /// Build the map from an initial generation. Duplicate points collapse
    /// into one live cell.
    pub fn new<I>(points: I) -> Self
    where
        I: IntoIterator<Item = Point>,
    {
        let mut cells = CellMap::new();
        let mut seeded = Vec::new();
        for p in points {
            let key = pack(p.x, p.y);
            let entry = cells.entry(key).or_insert_with(|| CellEntry::dead(key));
            if !entry.alive {
                entry.alive = true;
                seeded.push(key);
            }
        }
        for &key in &seeded {
            birth(&mut cells, key);
        }

        debug!(
            population = seeded.len(),
            entries = cells.len(),
            "seeded incremental map"
        );

        Self {
            cells,
            to_death: Vec::new(),
            to_birth: Vec::new(),
            population: seeded.len(),
            generation: 0,
            last_step: Duration::ZERO,
        }
    }

    pub fn cells(&self) -> IncrementalCells<'_> {
        IncrementalCells {
            inner: self.cells.values(),
        }
    }

    /// Whether the cell at (x, y) is alive.
    pub fn is_alive(&self, x: i32, y: i32) -> bool {
        self.cells.get(&pack(x, y)).is_some_and(|c| c.alive)
    }

    /// Number of tracked entries, live cells and their dead halo included.
    pub fn entry_count(&self) -> usize {
        self.cells.len()
    }

    fn step_impl(&mut self) {
        let mut to_death = std::mem::take(&mut self.to_death);
        let mut to_birth = std::mem::take(&mut self.to_birth);
        to_death.clear();
        to_birth.clear();

        self.cells.retain(|&key, cell| {
            if cell.alive {
                if cell.neighbors < 2 || cell.neighbors > 3 {
                    to_death.push(key);
                }
                true
            } else if cell.neighbors == 3 {
                to_birth.push(key);
                true
            } else {
                cell.neighbors >= 1
            }
        });

        // Deaths first: births may land next to a dying cell.
        for &key in &to_death {
            death(&mut self.cells, key);
        }
        for &key in &to_birth {
            birth(&mut self.cells, key);
        }

        self.population = self.population - to_death.len() + to_birth.len();
        self.to_death = to_death;
        self.to_birth = to_birth;
    }
}

impl LifeStrategy for IncrementalMap {
    fn next_step(&mut self) {
        let start = Instant::now();
        self.step_impl();
        self.generation += 1;
        self.last_step = start.elapsed();
        trace!(
            generation = self.generation,
            population = self.population,
            entries = self.cells.len(),
            "incremental map stepped"
        );
    }

    fn live_cells(&self) -> impl Iterator<Item = Point> + '_ {
        self.cells()
    }

    fn population(&self) -> usize {
        self.population
    }

    fn generation(&self) -> u64 {
        self.generation
    }

    fn stats(&self) -> StepStats {
        StepStats {
            step_time: self.last_step,
            population: self.population,
        }
    }
}

/// Live cells of an [`IncrementalMap`].
pub struct IncrementalCells<'a> {
    inner: hash_map::Values<'a, PackedKey, CellEntry>,
}

impl Iterator for IncrementalCells<'_> {
    type Item = Point;

    #[inline]
    fn next(&mut self) -> Option<Point> {
        self.inner
            .by_ref()
            .find(|c| c.alive)
            .map(|c| Point::new(c.x.into(), c.y.into()))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, self.inner.size_hint().1)
    }
}
