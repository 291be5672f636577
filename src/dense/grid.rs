//! Dense bounded-grid strategy.
//!
//! Storage is two flat byte buffers of `width * height` cells, one byte per
//! cell. `cell_phase` selects the buffer holding the current generation; a
//! step writes the other one and flips the phase, so buffers are never
//! copied or reallocated.
//!
//! Each buffer remembers the bounding box of the generation it holds. A step
//! only evaluates the current box dilated by one cell, since births can only
//! happen next to existing life.

use std::time::{Duration, Instant};

use tracing::{debug, trace};

use super::bounds::Bounds;
use crate::error::{LifeError, LifeResult};
use crate::rules::next_alive;
use crate::strategy::{LifeStrategy, Point, StepStats};

pub const DEFAULT_WIDTH: usize = 2000;
pub const DEFAULT_HEIGHT: usize = 2000;

/// Live-neighbor count of (x, y) with explicit edge checks; cells beyond the
/// grid edge count as dead.
#[inline(always)]
fn count_neighbors(cells: &[u8], width: usize, height: usize, x: usize, y: usize) -> u8 {
    let row = y * width;
    let has_west = x > 0;
    let has_east = x < width - 1;
    let mut n = 0u8;

    if y > 0 {
        let above = row - width;
        if has_west {
            n += cells[above + x - 1];
        }
        n += cells[above + x];
        if has_east {
            n += cells[above + x + 1];
        }
    }

    if has_west {
        n += cells[row + x - 1];
    }
    if has_east {
        n += cells[row + x + 1];
    }

    if y < height - 1 {
        let below = row + width;
        if has_west {
            n += cells[below + x - 1];
        }
        n += cells[below + x];
        if has_east {
            n += cells[below + x + 1];
        }
    }

    n
}

pub struct DenseGrid {
    width: usize,
    height: usize,
    cell_bufs: [Vec<u8>; 2],
    /// Bounding box of the generation held by each buffer.
    bounds: [Bounds; 2],
    cell_phase: usize,
    population: usize,
    generation: u64,
    last_step: Duration,
}

impl DenseGrid {
    /// Build a `width x height` grid. Points outside the grid are dropped.
    pub fn new<I>(points: I, width: usize, height: usize) -> LifeResult<Self>
    where
        I: IntoIterator<Item = Point>,
    {
        let representable = |n: usize| n > 0 && n <= i32::MAX as usize;
        if !representable(width)
            || !representable(height)
            || width.checked_mul(height).is_none()
        {
            return Err(LifeError::InvalidDimensions { width, height });
        }

        let mut grid = Self::allocate(width, height);
        grid.seed(points);
        Ok(grid)
    }

    /// Build a grid of the default 2000 x 2000 size.
    pub fn with_default_size<I>(points: I) -> Self
    where
        I: IntoIterator<Item = Point>,
    {
        let mut grid = Self::allocate(DEFAULT_WIDTH, DEFAULT_HEIGHT);
        grid.seed(points);
        grid
    }

    fn allocate(width: usize, height: usize) -> Self {
        let size = width * height;
        Self {
            width,
            height,
            cell_bufs: [vec![0; size], vec![0; size]],
            bounds: [Bounds::inverted(width, height); 2],
            cell_phase: 0,
            population: 0,
            generation: 0,
            last_step: Duration::ZERO,
        }
    }

    fn seed<I>(&mut self, points: I)
    where
        I: IntoIterator<Item = Point>,
    {
        let cp = self.cell_phase;
        let mut dropped = 0usize;
        for p in points {
            let (Ok(x), Ok(y)) = (usize::try_from(p.x), usize::try_from(p.y)) else {
                dropped += 1;
                continue;
            };
            if x >= self.width || y >= self.height {
                dropped += 1;
                continue;
            }
            let cell = &mut self.cell_bufs[cp][y * self.width + x];
            if *cell == 0 {
                *cell = 1;
                self.population += 1;
            }
            self.bounds[cp].include(x, y);
        }

        debug!(
            width = self.width,
            height = self.height,
            population = self.population,
            dropped,
            "seeded dense grid"
        );
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Bounding box of the current generation, `None` when it is empty.
    pub fn bounds(&self) -> Option<Bounds> {
        let b = self.bounds[self.cell_phase];
        (!b.is_empty()).then_some(b)
    }

    /// Whether (x, y) is alive. Always false outside the grid.
    pub fn get_cell(&self, x: i32, y: i32) -> bool {
        let (Ok(x), Ok(y)) = (usize::try_from(x), usize::try_from(y)) else {
            return false;
        };
        x < self.width && y < self.height && self.cell_bufs[self.cell_phase][y * self.width + x] != 0
    }

    pub fn cells(&self) -> DenseCells<'_> {
        let bounds = self.bounds[self.cell_phase];
        DenseCells {
            cells: &self.cell_bufs[self.cell_phase],
            width: self.width,
            bounds,
            x: bounds.min_x,
            y: bounds.min_y,
        }
    }

    fn step_impl(&mut self) {
        let (width, height) = (self.width, self.height);
        let cp = self.cell_phase;
        let np = cp ^ 1;
        let window = self.bounds[cp].dilated(width, height);
        let stale = self.bounds[np];

        let [buf0, buf1] = &mut self.cell_bufs;
        let (current, next) = if cp == 0 {
            (&*buf0, buf1)
        } else {
            (&*buf1, buf0)
        };

        // The next buffer still holds generation t-1. Whatever of it the
        // window will not overwrite must be cleared here.
        if !window.is_some_and(|w| w.covers(&stale)) && !stale.is_empty() {
            for y in stale.min_y..=stale.max_y {
                let row = y * width;
                next[row + stale.min_x..=row + stale.max_x].fill(0);
            }
        }

        let mut next_bounds = Bounds::inverted(width, height);
        let mut population = 0usize;
        if let Some(w) = window {
            for y in w.min_y..=w.max_y {
                let row = y * width;
                for x in w.min_x..=w.max_x {
                    let neighbors = count_neighbors(current, width, height, x, y);
                    let alive = current[row + x] != 0;
                    if next_alive(alive, neighbors) {
                        next[row + x] = 1;
                        next_bounds.include(x, y);
                        population += 1;
                    } else {
                        next[row + x] = 0;
                    }
                }
            }
        }

        self.bounds[np] = next_bounds;
        self.cell_phase = np;
        self.population = population;
    }
}

impl LifeStrategy for DenseGrid {
    fn next_step(&mut self) {
        let start = Instant::now();
        self.step_impl();
        self.generation += 1;
        self.last_step = start.elapsed();
        trace!(
            generation = self.generation,
            population = self.population,
            area = self.bounds[self.cell_phase].area(),
            "dense grid stepped"
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

/// Live cells of a [`DenseGrid`], scanned row by row inside the bounding box.
pub struct DenseCells<'a> {
    cells: &'a [u8],
    width: usize,
    bounds: Bounds,
    x: usize,
    y: usize,
}

impl Iterator for DenseCells<'_> {
    type Item = Point;

    fn next(&mut self) -> Option<Point> {
        while self.y <= self.bounds.max_y {
            let row = self.y * self.width;
            while self.x <= self.bounds.max_x {
                let x = self.x;
                self.x += 1;
                if self.cells[row + x] != 0 {
                    return Some(Point::new(x as i32, self.y as i32));
                }
            }
            self.x = self.bounds.min_x;
            self.y += 1;
        }
        None
    }
}
