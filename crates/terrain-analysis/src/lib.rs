//! Terrain analysis passes over an [`ElevationGrid`](survey_common::ElevationGrid).
//!
//! Every pass is a pure function of the grid and its parameters:
//! - [`compute_slope`]: percent grade per point
//! - [`compute_flow_direction`]: steepest-descent direction (8 neighbours)
//! - [`compute_cut_fill`]: earthwork volumes against a datum
//! - [`analyze`]: all three with one validated [`AnalysisConfig`](survey_common::AnalysisConfig)

pub mod cut_fill;
pub mod flow;
pub mod report;
pub mod slope;

pub use cut_fill::{compute_cut_fill, CutFillResult};
pub use flow::{compute_flow_direction, NEIGHBOUR_OFFSETS};
pub use report::{analyze, SlopeSummary, TerrainReport};
pub use slope::compute_slope;
