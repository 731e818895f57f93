//! Steepest-descent flow direction over the 8-neighbourhood.

use survey_common::config::validate_spacing;
use survey_common::{ElevationGrid, GridField, TerrainResult};
use tracing::debug;

/// Neighbour offsets `(d_row, d_col)` in scan order.
pub const NEIGHBOUR_OFFSETS: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Offset of the steepest strictly-positive drop from `(row, col)`.
///
/// Ties keep the neighbour found first in [`NEIGHBOUR_OFFSETS`] order.
fn steepest_descent(
    grid: &ElevationGrid,
    row: usize,
    col: usize,
    center: f64,
    spacing: f64,
) -> Option<(isize, isize)> {
    let mut best: Option<((isize, isize), f64)> = None;

    for &(d_row, d_col) in &NEIGHBOUR_OFFSETS {
        let Some(neighbour) = grid.get_offset(row, col, d_row, d_col) else {
            continue;
        };

        let distance = spacing * ((d_row * d_row + d_col * d_col) as f64).sqrt();
        let drop = (center - neighbour) / distance;

        if drop > best.map_or(0.0, |(_, d)| d) {
            best = Some(((d_row, d_col), drop));
        }
    }

    best.map(|(offset, _)| offset)
}

/// Compute the flow direction of every surveyed point.
///
/// The value is `atan2(d_row, d_col)` in radians of the neighbour with the
/// steepest downhill drop. Points with no lower neighbour (pits and flats)
/// are absent.
pub fn compute_flow_direction(grid: &ElevationGrid, spacing: f64) -> TerrainResult<GridField> {
    validate_spacing(spacing)?;

    let mut field = GridField::empty(grid.rows(), grid.cols());

    for row in 0..grid.rows() {
        for col in 0..grid.cols() {
            let Some(center) = grid.get(row, col) else {
                continue;
            };

            if let Some((d_row, d_col)) = steepest_descent(grid, row, col, center, spacing) {
                field.set(row, col, Some((d_row as f64).atan2(d_col as f64)));
            }
        }
    }

    debug!(
        rows = grid.rows(),
        cols = grid.cols(),
        spacing,
        draining = field.present_count(),
        "Computed flow direction field"
    );

    Ok(field)
}
