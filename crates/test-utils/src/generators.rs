//! Test data generators for creating synthetic survey grids.
//!
//! These generators create predictable, verifiable elevation patterns
//! that can be used across the test suite. All grids are `width` columns
//! by `height` rows.

use survey_common::ElevationGrid;

/// Builds a fully surveyed grid from a per-point function of `(col, row)`.
pub fn create_grid_with<F>(width: usize, height: usize, f: F) -> ElevationGrid
where
    F: Fn(usize, usize) -> f64,
{
    let mut data = Vec::with_capacity(width * height);
    for row in 0..height {
        for col in 0..width {
            data.push(Some(f(col, row)));
        }
    }
    ElevationGrid::new(height, width, data).expect("generated grid is rectangular and finite")
}

/// Creates an inclined plane: `base + dz_dcol * col + dz_drow * row`.
///
/// # Example
///
/// ```
/// use test_utils::create_planar_grid;
///
/// let grid = create_planar_grid(3, 2, 1.0, 10.0, 100.0);
/// assert_eq!(grid.get(0, 0), Some(100.0));
/// assert_eq!(grid.get(1, 2), Some(112.0));
/// ```
pub fn create_planar_grid(
    width: usize,
    height: usize,
    dz_dcol: f64,
    dz_drow: f64,
    base: f64,
) -> ElevationGrid {
    create_grid_with(width, height, |col, row| {
        base + dz_dcol * col as f64 + dz_drow * row as f64
    })
}

/// Creates a grid filled with a constant elevation.
pub fn create_flat_grid(width: usize, height: usize, value: f64) -> ElevationGrid {
    create_grid_with(width, height, |_, _| value)
}

/// Creates a cone: `peak` at the grid centre falling linearly to `base` at
/// the corners.
pub fn create_cone_grid(width: usize, height: usize, peak: f64, base: f64) -> ElevationGrid {
    let center_x = (width as f64 - 1.0) / 2.0;
    let center_y = (height as f64 - 1.0) / 2.0;
    let max_dist = (center_x * center_x + center_y * center_y).sqrt().max(1.0);

    create_grid_with(width, height, |col, row| {
        let dx = col as f64 - center_x;
        let dy = row as f64 - center_y;
        let dist = (dx * dx + dy * dy).sqrt();
        peak - (peak - base) * dist / max_dist
    })
}

/// Creates a smooth rolling field of overlapping sine waves.
///
/// Produces many closed and open contours; used for benchmarks.
pub fn create_rolling_grid(width: usize, height: usize) -> ElevationGrid {
    create_grid_with(width, height, |col, row| {
        let fx = col as f64 / width.max(1) as f64;
        let fy = row as f64 / height.max(1) as f64;

        let v1 = (fx * std::f64::consts::PI * 4.0).sin() * 20.0;
        let v2 = (fy * std::f64::consts::PI * 4.0).sin() * 20.0;
        let v3 = ((fx + fy) * std::f64::consts::PI * 2.0).sin() * 10.0;

        50.0 + v1 + v2 + v3
    })
}

/// Creates a grid with unsurveyed points at the given `(col, row)` positions.
///
/// Surveyed points follow `col + 10 * row`.
pub fn create_sparse_grid(width: usize, height: usize, holes: &[(usize, usize)]) -> ElevationGrid {
    let mut data = Vec::with_capacity(width * height);
    for row in 0..height {
        for col in 0..width {
            if holes.contains(&(col, row)) {
                data.push(None);
            } else {
                data.push(Some(col as f64 + 10.0 * row as f64));
            }
        }
    }
    ElevationGrid::new(height, width, data).expect("generated grid is rectangular and finite")
}

/// Creates a grid from nested literal rows, `f64::NAN` marking absent points.
pub fn grid_from_rows<const W: usize>(rows: &[[f64; W]]) -> ElevationGrid {
    let data: Vec<f64> = rows.iter().flat_map(|r| r.iter().copied()).collect();
    ElevationGrid::from_nan_sentinel(rows.len(), W, &data)
        .expect("literal grid is rectangular and finite")
}
