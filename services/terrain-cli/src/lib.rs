//! Terrain CLI library
//!
//! Loads survey grids and configuration, runs the contour and analysis
//! engines, and shapes their results for JSON output.

pub mod commands;
pub mod config;

pub use config::{CliConfig, ConfigOverrides};
