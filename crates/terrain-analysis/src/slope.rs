//! Slope as percent grade.

use survey_common::config::validate_spacing;
use survey_common::{ElevationGrid, GridField, TerrainResult};
use tracing::debug;

/// Derivative of elevation along one axis at `(row, col)`.
///
/// Central difference when both neighbours are surveyed, one-sided when only
/// one is, `None` otherwise.
fn axis_derivative(
    grid: &ElevationGrid,
    row: usize,
    col: usize,
    center: f64,
    (d_row, d_col): (isize, isize),
    spacing: f64,
) -> Option<f64> {
    let before = grid.get_offset(row, col, -d_row, -d_col);
    let after = grid.get_offset(row, col, d_row, d_col);

    match (before, after) {
        (Some(b), Some(a)) => Some((a - b) / (2.0 * spacing)),
        (None, Some(a)) => Some((a - center) / spacing),
        (Some(b), None) => Some((center - b) / spacing),
        (None, None) => None,
    }
}

/// Compute the slope of every surveyed point as percent grade.
///
/// The value is `sqrt(dz/dx² + dz/dy²) × 100`. A point is present in the
/// output only when it is surveyed and both axes produced a derivative.
pub fn compute_slope(grid: &ElevationGrid, spacing: f64) -> TerrainResult<GridField> {
    validate_spacing(spacing)?;

    let mut field = GridField::empty(grid.rows(), grid.cols());

    for row in 0..grid.rows() {
        for col in 0..grid.cols() {
            let Some(center) = grid.get(row, col) else {
                continue;
            };

            let dzdx = axis_derivative(grid, row, col, center, (0, 1), spacing);
            let dzdy = axis_derivative(grid, row, col, center, (1, 0), spacing);

            if let (Some(dx), Some(dy)) = (dzdx, dzdy) {
                field.set(row, col, Some((dx * dx + dy * dy).sqrt() * 100.0));
            }
        }
    }

    debug!(
        rows = grid.rows(),
        cols = grid.cols(),
        spacing,
        present = field.present_count(),
        "Computed slope field"
    );

    Ok(field)
}
