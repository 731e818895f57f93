//! Earthwork volumes against a datum elevation.

use serde::{Deserialize, Serialize};
use survey_common::config::validate_spacing;
use survey_common::{ElevationGrid, TerrainError, TerrainResult};
use tracing::debug;

/// Cut and fill volumes in cubic grid units.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CutFillResult {
    /// Material above the datum to remove.
    pub cut_volume: f64,
    /// Material below the datum to add.
    pub fill_volume: f64,
    /// `cut_volume - fill_volume`
    pub net_volume: f64,
    /// Number of complete cells integrated.
    pub cell_count: usize,
    /// Plan area of one cell (`spacing²`).
    pub cell_area: f64,
}

impl CutFillResult {
    /// Total plan area covered by integrated cells.
    pub fn covered_area(&self) -> f64 {
        self.cell_count as f64 * self.cell_area
    }
}

/// Compute cut and fill volumes of the surveyed surface against `datum`.
///
/// Each cell with four surveyed corners contributes
/// `|mean(corners) - datum| * spacing²`, to cut when the mean lies above the
/// datum and to fill otherwise. This is a midpoint estimate, not an exact
/// integral of the bilinear surface.
pub fn compute_cut_fill(
    grid: &ElevationGrid,
    spacing: f64,
    datum: f64,
) -> TerrainResult<CutFillResult> {
    validate_spacing(spacing)?;
    if !datum.is_finite() {
        return Err(TerrainError::invalid_parameter(
            "datum",
            format!("must be finite, got {}", datum),
        ));
    }

    let cell_area = spacing * spacing;
    let mut result = CutFillResult {
        cell_area,
        ..Default::default()
    };

    for row in 0..grid.rows().saturating_sub(1) {
        for col in 0..grid.cols().saturating_sub(1) {
            let Some(corners) = grid.cell_corners(row, col) else {
                continue;
            };

            let diff = corners.iter().sum::<f64>() / 4.0 - datum;
            let volume = diff.abs() * cell_area;
            if diff > 0.0 {
                result.cut_volume += volume;
            } else {
                result.fill_volume += volume;
            }
            result.cell_count += 1;
        }
    }

    result.net_volume = result.cut_volume - result.fill_volume;

    debug!(
        datum,
        spacing,
        cells = result.cell_count,
        cut = result.cut_volume,
        fill = result.fill_volume,
        "Computed cut/fill volumes"
    );

    Ok(result)
}
