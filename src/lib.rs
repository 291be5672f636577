//! Conway's Game of Life (B3/S23) with interchangeable stepping strategies.
//!
//! Three algorithms share one [`LifeStrategy`] contract: a sparse map with
//! incrementally maintained neighbor counts, a sparse set that recounts every
//! step, and a fixed-size double-buffered grid scanned within a bounding box.
//! Given the same starting generation they produce the same generations.

pub mod dense;
pub mod driver;
pub mod error;
pub mod generators;
pub mod packing;
pub mod rules;
pub mod simulation;
pub mod sparse;
pub mod strategy;

pub use dense::{Bounds, DenseGrid};
pub use driver::{DriverConfig, FrameDriver, FrameReport};
pub use error::{LifeError, LifeResult};
pub use generators::Generator;
pub use simulation::{Algorithm, Simulation, SimulationConfig};
pub use sparse::{IncrementalMap, RecomputeSet};
pub use strategy::{LifeStrategy, Point, StepStats};
