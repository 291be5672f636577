use std::collections::HashSet;

use life_strategies::{DenseGrid, LifeError, LifeStrategy, Point};
use rand::RngCore;
use rand::SeedableRng;

fn grid_of(cells: &[(i32, i32)], width: usize, height: usize) -> DenseGrid {
    DenseGrid::new(cells.iter().copied().map(Point::from), width, height)
        .expect("test grid dimensions are valid")
}

fn collect_live(grid: &DenseGrid) -> HashSet<(i32, i32)> {
    grid.live_cells().map(Into::into).collect()
}

fn scan_full(grid: &DenseGrid) -> HashSet<(i32, i32)> {
    let mut out = HashSet::new();
    for y in 0..grid.height() as i32 {
        for x in 0..grid.width() as i32 {
            if grid.get_cell(x, y) {
                out.insert((x, y));
            }
        }
    }
    out
}

/// Naive stepper that treats everything outside `width x height` as dead.
fn step_naive_bounded(cells: &HashSet<(i32, i32)>, width: i32, height: i32) -> HashSet<(i32, i32)> {
    let mut next = HashSet::new();
    for y in 0..height {
        for x in 0..width {
            let mut neighbors = 0;
            for dy in -1..=1 {
                for dx in -1..=1 {
                    if (dx != 0 || dy != 0) && cells.contains(&(x + dx, y + dy)) {
                        neighbors += 1;
                    }
                }
            }
            let alive = cells.contains(&(x, y));
            if neighbors == 3 || (alive && neighbors == 2) {
                next.insert((x, y));
            }
        }
    }
    next
}

fn random_cells(width: i32, height: i32, density: f64, seed: u64) -> Vec<(i32, i32)> {
    let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
    let threshold = (u64::MAX as f64 * density) as u64;
    let mut cells = Vec::new();
    for y in 0..height {
        for x in 0..width {
            if rng.next_u64() <= threshold {
                cells.push((x, y));
            }
        }
    }
    cells
}

#[test]
fn bounding_box_scan_matches_full_scan() {
    for seed in [0xA1u64, 0xB2, 0xC3, 0xD4] {
        let cells = random_cells(24, 20, 0.35, seed);
        let mut grid = grid_of(&cells, 24, 20);
        for step in 0..40 {
            let full = scan_full(&grid);
            assert_eq!(collect_live(&grid), full, "seed {seed:#x} step {step}");
            assert_eq!(grid.population(), full.len(), "seed {seed:#x} step {step}");
            if let Some(b) = grid.bounds() {
                for &(x, y) in &full {
                    assert!(b.contains(x as usize, y as usize), "({x},{y}) outside {b:?}");
                }
            } else {
                assert!(full.is_empty());
            }
            grid.next_step();
        }
    }
}

#[test]
fn matches_bounded_naive_at_the_walls() {
    let cells = random_cells(16, 16, 0.45, 0x5EED);
    let mut grid = grid_of(&cells, 16, 16);
    let mut naive: HashSet<(i32, i32)> = cells.into_iter().collect();

    for step in 0..30 {
        assert_eq!(collect_live(&grid), naive, "step {step}");
        grid.next_step();
        naive = step_naive_bounded(&naive, 16, 16);
    }
}

#[test]
fn glider_runs_into_the_corner() {
    let glider = [(1, 0), (2, 1), (0, 2), (1, 2), (2, 2)];
    let mut grid = grid_of(&glider, 8, 8);
    let mut naive: HashSet<(i32, i32)> = glider.into_iter().collect();

    for step in 0..40 {
        assert_eq!(collect_live(&grid), naive, "step {step}");
        assert_eq!(scan_full(&grid), naive, "step {step}");
        grid.next_step();
        naive = step_naive_bounded(&naive, 8, 8);
    }
}

#[test]
fn shrinking_pattern_leaves_no_stale_cells() {
    // A wide row collapses inward; cells from older generations must not
    // survive outside the shrunken box.
    let row: Vec<(i32, i32)> = (2..18).map(|x| (x, 5)).collect();
    let mut grid = grid_of(&row, 20, 11);
    let mut naive: HashSet<(i32, i32)> = row.into_iter().collect();

    for step in 0..60 {
        assert_eq!(scan_full(&grid), naive, "step {step}");
        grid.next_step();
        naive = step_naive_bounded(&naive, 20, 11);
    }
}

#[test]
fn out_of_range_seed_points_are_dropped() {
    let grid = grid_of(&[(-1, 0), (0, -1), (4, 0), (0, 4), (2, 2)], 4, 4);
    assert_eq!(grid.population(), 1);
    assert_eq!(collect_live(&grid), HashSet::from([(2, 2)]));
    assert!(!grid.get_cell(4, 0));
    assert!(!grid.get_cell(-1, 0));
}

#[test]
fn empty_grid_has_no_bounds() {
    let mut grid = grid_of(&[], 10, 10);
    assert!(grid.bounds().is_none());
    grid.step_n(3);
    assert!(grid.bounds().is_none());
    assert_eq!(grid.live_cells().count(), 0);
}

#[test]
fn zero_dimensions_are_rejected() {
    let err = DenseGrid::new(std::iter::empty(), 0, 10).err();
    assert_eq!(err, Some(LifeError::InvalidDimensions { width: 0, height: 10 }));
    assert!(DenseGrid::new(std::iter::empty(), 10, 0).is_err());
}
