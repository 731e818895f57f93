//! Combined terrain analysis over one validated configuration.

use serde::{Deserialize, Serialize};
use survey_common::{AnalysisConfig, ElevationGrid, GridField, TerrainResult};
use tracing::debug;

use crate::cut_fill::{compute_cut_fill, CutFillResult};
use crate::flow::compute_flow_direction;
use crate::slope::compute_slope;

/// Summary statistics over a slope field.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SlopeSummary {
    /// Steepest grade in percent.
    pub max_percent: f64,
    /// Mean grade in percent over points with a slope.
    pub mean_percent: f64,
}

impl SlopeSummary {
    fn from_field(field: &GridField) -> Option<Self> {
        Some(Self {
            max_percent: field.max()?,
            mean_percent: field.mean()?,
        })
    }
}

/// All terrain analysis results for one grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TerrainReport {
    pub slope: GridField,
    pub flow_direction: GridField,
    pub cut_fill: CutFillResult,
    /// `None` when no point has a slope.
    pub slope_summary: Option<SlopeSummary>,
}

/// Run slope, flow direction and cut/fill with a single configuration.
pub fn analyze(grid: &ElevationGrid, config: &AnalysisConfig) -> TerrainResult<TerrainReport> {
    config.validate()?;

    let slope = compute_slope(grid, config.spacing)?;
    let flow_direction = compute_flow_direction(grid, config.spacing)?;
    let cut_fill = compute_cut_fill(grid, config.spacing, config.datum)?;
    let slope_summary = SlopeSummary::from_field(&slope);

    debug!(
        rows = grid.rows(),
        cols = grid.cols(),
        max_slope = slope_summary.map(|s| s.max_percent),
        net_volume = cut_fill.net_volume,
        "Terrain analysis complete"
    );

    Ok(TerrainReport {
        slope,
        flow_direction,
        cut_fill,
        slope_summary,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analyze_validates_config() {
        let grid = ElevationGrid::filled(2, 2, 1.0).unwrap();
        let err = analyze(&grid, &AnalysisConfig::new(-1.0, 0.0)).unwrap_err();
        assert!(err.is_configuration_error());
    }

    #[test]
    fn test_flat_grid_summary() {
        let grid = ElevationGrid::filled(3, 3, 1.0).unwrap();
        let report = analyze(&grid, &AnalysisConfig::default()).unwrap();
        let summary = report.slope_summary.unwrap();
        assert_eq!(summary.max_percent, 0.0);
        assert_eq!(summary.mean_percent, 0.0);
        assert_eq!(report.flow_direction.present_count(), 0);
        assert_eq!(report.cut_fill.cut_volume, 4.0);
    }
}
