//! Dense bounded-grid strategy and its bounding box.

mod bounds;
mod grid;

pub use bounds::Bounds;
pub use grid::{DEFAULT_HEIGHT, DEFAULT_WIDTH, DenseCells, DenseGrid};
