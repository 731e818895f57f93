//! Grid model for surveyed elevation data.

use std::ops::{Add, Mul, Sub};

use serde::{Deserialize, Serialize};

use crate::{TerrainError, TerrainResult};

/// A rectangular `rows × cols` grid of optional elevations in row-major order.
///
/// `None` marks an unsurveyed point. Present values are always finite.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "GridRows", into = "GridRows")]
pub struct ElevationGrid {
    rows: usize,
    cols: usize,
    data: Vec<Option<f64>>,
}

/// Serialized form: a list of rows, `null` for absent samples.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct GridRows {
    elevations: Vec<Vec<Option<f64>>>,
}

impl TryFrom<GridRows> for ElevationGrid {
    type Error = TerrainError;

    fn try_from(value: GridRows) -> Result<Self, Self::Error> {
        ElevationGrid::from_rows(value.elevations)
    }
}

impl From<ElevationGrid> for GridRows {
    fn from(grid: ElevationGrid) -> Self {
        GridRows {
            elevations: grid.to_rows(),
        }
    }
}

/// Number of samples in a `rows × cols` grid, rejecting sizes that overflow.
fn checked_len(rows: usize, cols: usize) -> TerrainResult<usize> {
    rows.checked_mul(cols).ok_or_else(|| {
        TerrainError::invalid_parameter(
            "dimensions",
            format!("{} x {} samples overflows the address space", rows, cols),
        )
    })
}

impl ElevationGrid {
    /// Create a grid from row-major data.
    pub fn new(rows: usize, cols: usize, data: Vec<Option<f64>>) -> TerrainResult<Self> {
        let expected = checked_len(rows, cols)?;
        if data.len() != expected {
            return Err(TerrainError::DimensionMismatch {
                expected,
                found: data.len(),
            });
        }

        for (idx, value) in data.iter().enumerate() {
            if let Some(v) = value {
                if !v.is_finite() {
                    return Err(TerrainError::NonFiniteElevation {
                        row: idx / cols,
                        col: idx % cols,
                    });
                }
            }
        }

        Ok(Self { rows, cols, data })
    }

    /// Create a grid from nested rows. Every row must have the same length.
    pub fn from_rows(rows: Vec<Vec<Option<f64>>>) -> TerrainResult<Self> {
        let cols = rows.first().map(|r| r.len()).unwrap_or(0);
        let mut data = Vec::with_capacity(rows.len() * cols);

        for (row_idx, row) in rows.iter().enumerate() {
            if row.len() != cols {
                return Err(TerrainError::RaggedRow {
                    row: row_idx,
                    expected: cols,
                    found: row.len(),
                });
            }
            data.extend_from_slice(row);
        }

        Self::new(rows.len(), cols, data)
    }

    /// Create a grid from flat data that uses NaN as the "no data" sentinel.
    pub fn from_nan_sentinel(rows: usize, cols: usize, values: &[f64]) -> TerrainResult<Self> {
        let data = values
            .iter()
            .map(|&v| if v.is_nan() { None } else { Some(v) })
            .collect();
        Self::new(rows, cols, data)
    }

    /// Create a fully surveyed grid with a constant elevation.
    pub fn filled(rows: usize, cols: usize, value: f64) -> TerrainResult<Self> {
        let len = checked_len(rows, cols)?;
        Self::new(rows, cols, vec![Some(value); len])
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Elevation at `(row, col)`; `None` when absent or out of bounds.
    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        self.data[row * self.cols + col]
    }

    /// Elevation at a signed offset from `(row, col)`.
    pub fn get_offset(&self, row: usize, col: usize, d_row: isize, d_col: isize) -> Option<f64> {
        let r = row.checked_add_signed(d_row)?;
        let c = col.checked_add_signed(d_col)?;
        self.get(r, c)
    }

    /// The four corners of the cell whose top-left point is `(row, col)`,
    /// ordered `[top-left, top-right, bottom-left, bottom-right]`.
    ///
    /// Returns `None` unless all four corners are present.
    pub fn cell_corners(&self, row: usize, col: usize) -> Option<[f64; 4]> {
        Some([
            self.get(row, col)?,
            self.get(row, col + 1)?,
            self.get(row + 1, col)?,
            self.get(row + 1, col + 1)?,
        ])
    }

    /// Whether the grid is large enough to contain at least one cell.
    pub fn has_cells(&self) -> bool {
        self.rows >= 2 && self.cols >= 2
    }

    /// Number of present samples.
    pub fn valid_count(&self) -> usize {
        self.data.iter().filter(|v| v.is_some()).count()
    }

    /// Total number of grid points.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Iterate over present elevations.
    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.data.iter().filter_map(|v| *v)
    }

    /// Copy out as nested rows.
    pub fn to_rows(&self) -> Vec<Vec<Option<f64>>> {
        if self.cols == 0 {
            return vec![Vec::new(); self.rows];
        }
        self.data.chunks(self.cols).map(|c| c.to_vec()).collect()
    }
}

/// Per-point derived values over an elevation grid (slope, flow direction).
///
/// Deserialization checks that `values` holds exactly `rows * cols` entries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "FieldValues")]
pub struct GridField {
    pub rows: usize,
    pub cols: usize,
    pub values: Vec<Option<f64>>,
}

#[derive(Deserialize)]
struct FieldValues {
    rows: usize,
    cols: usize,
    values: Vec<Option<f64>>,
}

impl TryFrom<FieldValues> for GridField {
    type Error = TerrainError;

    fn try_from(field: FieldValues) -> Result<Self, Self::Error> {
        let expected = checked_len(field.rows, field.cols)?;
        if field.values.len() != expected {
            return Err(TerrainError::DimensionMismatch {
                expected,
                found: field.values.len(),
            });
        }
        Ok(Self {
            rows: field.rows,
            cols: field.cols,
            values: field.values,
        })
    }
}

impl GridField {
    /// A field of the given size with every entry absent.
    pub fn empty(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            values: vec![None; rows * cols],
        }
    }

    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        self.values[row * self.cols + col]
    }

    pub fn set(&mut self, row: usize, col: usize, value: Option<f64>) {
        if row < self.rows && col < self.cols {
            self.values[row * self.cols + col] = value;
        }
    }

    /// Number of present entries.
    pub fn present_count(&self) -> usize {
        self.values.iter().filter(|v| v.is_some()).count()
    }

    pub fn max(&self) -> Option<f64> {
        self.values.iter().filter_map(|v| *v).reduce(f64::max)
    }

    pub fn mean(&self) -> Option<f64> {
        let (sum, count) = self
            .values
            .iter()
            .filter_map(|v| *v)
            .fold((0.0, 0usize), |(s, n), v| (s + v, n + 1));
        (count > 0).then(|| sum / count as f64)
    }
}

/// A point in fractional grid coordinates (`x` = column, `y` = row).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(&self, other: Point) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Point {
    type Output = Point;

    fn mul(self, rhs: f64) -> Point {
        Point::new(self.x * rhs, self.y * rhs)
    }
}
