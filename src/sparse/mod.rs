//! Sparse strategies over packed 16-bit coordinates.

pub mod incremental;
mod neighbor_counts;
pub mod recompute;

pub use incremental::{IncrementalCells, IncrementalMap};
pub use recompute::{RecomputeCells, RecomputeSet};
