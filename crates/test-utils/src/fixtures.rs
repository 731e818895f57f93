//! Common survey fixtures.
//!
//! Small hand-written grids that exercise specific cases of the contour and
//! analysis engines.

use survey_common::ElevationGrid;

use crate::generators::grid_from_rows;

/// 3×3 grid with a single raised point in the centre.
pub fn center_peak() -> ElevationGrid {
    grid_from_rows(&[
        [10.0, 10.0, 10.0],
        [10.0, 15.0, 10.0],
        [10.0, 10.0, 10.0],
    ])
}

/// 3×3 grid with a single depressed point in the centre (a pit).
pub fn center_pit() -> ElevationGrid {
    grid_from_rows(&[
        [10.0, 10.0, 10.0],
        [10.0, 5.0, 10.0],
        [10.0, 10.0, 10.0],
    ])
}

/// Single cell with top-left and bottom-right high (saddle case 10 at level 5).
pub fn saddle_main_diagonal() -> ElevationGrid {
    grid_from_rows(&[[10.0, 0.0], [0.0, 10.0]])
}

/// Single cell with top-right and bottom-left high (saddle case 5 at level 5).
pub fn saddle_anti_diagonal() -> ElevationGrid {
    grid_from_rows(&[[0.0, 10.0], [10.0, 0.0]])
}

/// 4×4 survey where the whole second row is unsurveyed.
pub fn missing_row() -> ElevationGrid {
    let n = f64::NAN;
    grid_from_rows(&[
        [0.0, 1.0, 2.0, 3.0],
        [n, n, n, n],
        [0.0, 1.0, 2.0, 3.0],
        [0.0, 1.0, 2.0, 3.0],
    ])
}

/// Construction pad survey: a 3×3 grid between 100 and 104 units.
pub fn building_pad() -> ElevationGrid {
    grid_from_rows(&[
        [100.0, 101.0, 102.0],
        [101.0, 102.0, 103.0],
        [102.0, 103.0, 104.0],
    ])
}
