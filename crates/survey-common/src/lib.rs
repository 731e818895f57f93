//! Common types and utilities shared across the survey terrain engine.
//!
//! - [`ElevationGrid`]: the rectangular grid of optional surveyed elevations
//! - [`GridField`]: per-point derived values (slope, flow direction)
//! - [`ContourConfig`] / [`AnalysisConfig`]: validated engine parameters
//! - Support math: bilinear sampling and elevation statistics

pub mod config;
pub mod error;
pub mod grid;
pub mod interpolation;
pub mod stats;

pub use config::{AnalysisConfig, ContourConfig};
pub use error::{TerrainError, TerrainResult};
pub use grid::{ElevationGrid, GridField, Point};
pub use interpolation::bilinear_interpolate;
pub use stats::{elevation_stats, ElevationStats};
