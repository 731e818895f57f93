//! Test support for the survey terrain workspace.
//!
//! - [`generators`]: synthetic grids (planes, cones, rolling hills, holes)
//! - [`fixtures`]: small named grids for specific engine cases
//! - [`paths`]: scratch directories and files
//!
//! Used as a dev-dependency:
//!
//! ```toml
//! [dev-dependencies]
//! test-utils = { path = "../test-utils" }
//! ```

pub mod fixtures;
pub mod generators;
pub mod paths;

pub use generators::*;
pub use paths::*;

/// Assert that two floats differ by at most `tolerance`.
///
/// ```
/// use test_utils::assert_approx_eq;
///
/// assert_approx_eq!(0.1 + 0.2, 0.3, 1e-12);
/// ```
#[macro_export]
macro_rules! assert_approx_eq {
    ($actual:expr, $expected:expr, $tolerance:expr) => {{
        let (actual, expected, tolerance): (f64, f64, f64) =
            ($actual as f64, $expected as f64, $tolerance as f64);
        assert!(
            (actual - expected).abs() <= tolerance,
            "expected {} within {} of {}, off by {}",
            actual,
            tolerance,
            expected,
            (actual - expected).abs()
        );
    }};
}

/// Assert that two `(x, y)` grid coordinates match component-wise.
#[macro_export]
macro_rules! assert_coords_approx_eq {
    (($ax:expr, $ay:expr), ($ex:expr, $ey:expr), $tolerance:expr) => {{
        $crate::assert_approx_eq!($ax, $ex, $tolerance);
        $crate::assert_approx_eq!($ay, $ey, $tolerance);
    }};
}
