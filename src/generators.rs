//! Initial-pattern generators.
//!
//! A generator maps grid dimensions to a starting generation. Points may
//! repeat; every strategy collapses duplicates on construction.

use std::fmt;
use std::str::FromStr;

use rand::Rng;

use crate::error::LifeError;
use crate::strategy::Point;

/// Fraction of `width * height` drawn by [`random`].
pub const RANDOM_FILL: f64 = 0.2;

/// Gosper glider gun, 36 x 9, top-left at the origin.
const GOSPER_GUN: [(i32, i32); 36] = [
    (24, 0),
    (22, 1), (24, 1),
    (12, 2), (13, 2), (20, 2), (21, 2), (34, 2), (35, 2),
    (11, 3), (15, 3), (20, 3), (21, 3), (34, 3), (35, 3),
    (0, 4), (1, 4), (10, 4), (16, 4), (20, 4), (21, 4),
    (0, 5), (1, 5), (10, 5), (14, 5), (16, 5), (17, 5), (22, 5), (24, 5),
    (10, 6), (16, 6), (24, 6),
    (11, 7), (15, 7),
    (12, 8), (13, 8),
];
const GUN_WIDTH: usize = 36;
const GUN_HEIGHT: usize = 9;
const GUN_OFFSET: i32 = 1;

/// `floor(width * height * RANDOM_FILL)` uniformly drawn points in
/// `[0, width) x [0, height)`.
pub fn random<R: Rng + ?Sized>(width: usize, height: usize, rng: &mut R) -> Vec<Point> {
    if width == 0 || height == 0 {
        return Vec::new();
    }
    let count = (width as f64 * height as f64 * RANDOM_FILL) as usize;
    (0..count)
        .map(|_| {
            let x = rng.random_range(0..width);
            let y = rng.random_range(0..height);
            Point::new(x as i32, y as i32)
        })
        .collect()
}

/// A Gosper glider gun one cell in from the top-left corner, or nothing if
/// the grid cannot hold it.
pub fn glider_gun(width: usize, height: usize) -> Vec<Point> {
    let margin = 2 * GUN_OFFSET as usize;
    if width < GUN_WIDTH + margin || height < GUN_HEIGHT + margin {
        return Vec::new();
    }
    GOSPER_GUN
        .iter()
        .map(|&(x, y)| Point::new(x + GUN_OFFSET, y + GUN_OFFSET))
        .collect()
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Generator {
    Random,
    GliderGun,
}

impl Generator {
    pub const ALL: [Generator; 2] = [Generator::Random, Generator::GliderGun];

    pub const fn name(self) -> &'static str {
        match self {
            Generator::Random => "random",
            Generator::GliderGun => "glider-gun",
        }
    }

    pub fn generate<R: Rng + ?Sized>(self, width: usize, height: usize, rng: &mut R) -> Vec<Point> {
        match self {
            Generator::Random => random(width, height, rng),
            Generator::GliderGun => glider_gun(width, height),
        }
    }
}

impl fmt::Display for Generator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Generator {
    type Err = LifeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "random" => Ok(Generator::Random),
            "glider-gun" | "glidergun" => Ok(Generator::GliderGun),
            _ => Err(LifeError::UnknownGenerator(s.to_string())),
        }
    }
}
