//! Summary statistics over surveyed elevations.

use serde::{Deserialize, Serialize};

use crate::ElevationGrid;

/// Summary of the present samples in a grid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ElevationStats {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    /// `max - min`
    pub relief: f64,
    pub valid_count: usize,
    pub total_count: usize,
}

impl ElevationStats {
    /// Map an elevation into `[0, 1]` across this range.
    ///
    /// A flat dataset maps every value to the middle of the range.
    pub fn normalize(&self, value: f64) -> f64 {
        if self.relief.abs() < f64::EPSILON {
            return 0.5;
        }
        ((value - self.min) / self.relief).clamp(0.0, 1.0)
    }

    /// Fraction of grid points that carry an elevation.
    pub fn coverage(&self) -> f64 {
        if self.total_count == 0 {
            return 0.0;
        }
        self.valid_count as f64 / self.total_count as f64
    }
}

/// Compute min/max/mean over present samples; `None` if the grid has none.
pub fn elevation_stats(grid: &ElevationGrid) -> Option<ElevationStats> {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    let mut sum = 0.0;
    let mut count = 0usize;

    for v in grid.values() {
        min = min.min(v);
        max = max.max(v);
        sum += v;
        count += 1;
    }

    if count == 0 {
        return None;
    }

    Some(ElevationStats {
        min,
        max,
        mean: sum / count as f64,
        relief: max - min,
        valid_count: count,
        total_count: grid.len(),
    })
}
