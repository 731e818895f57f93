//! Interpolation over elevation grids.

use crate::ElevationGrid;

/// Bilinear interpolation at fractional grid coordinates.
///
/// `x` is the column coordinate and `y` the row coordinate. Returns `None`
/// outside the grid or when any sample with non-zero weight is absent.
pub fn bilinear_interpolate(grid: &ElevationGrid, x: f64, y: f64) -> Option<f64> {
    if grid.is_empty() || !x.is_finite() || !y.is_finite() || x < 0.0 || y < 0.0 {
        return None;
    }

    let max_x = (grid.cols() - 1) as f64;
    let max_y = (grid.rows() - 1) as f64;
    if x > max_x || y > max_y {
        return None;
    }

    let x0 = x.floor() as usize;
    let y0 = y.floor() as usize;
    let xf = x - x0 as f64;
    let yf = y - y0 as f64;

    // Neighbours with zero weight are not read, so exact grid points only
    // need their own sample.
    let x1 = if xf > 0.0 { (x0 + 1).min(grid.cols() - 1) } else { x0 };
    let y1 = if yf > 0.0 { (y0 + 1).min(grid.rows() - 1) } else { y0 };

    let v00 = grid.get(y0, x0)?;
    let v10 = grid.get(y0, x1)?;
    let v01 = grid.get(y1, x0)?;
    let v11 = grid.get(y1, x1)?;

    let top = v00 * (1.0 - xf) + v10 * xf;
    let bottom = v01 * (1.0 - xf) + v11 * xf;
    Some(top * (1.0 - yf) + bottom * yf)
}
