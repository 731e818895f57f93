//! Contour line (isoline) extraction using the marching squares algorithm.
//!
//! Segments are produced per grid cell, merged into polylines by endpoint
//! matching, and grouped per elevation level. Coordinates are fractional grid
//! coordinates: `x` is the column, `y` is the row.

use std::collections::{HashMap, VecDeque};

use serde::{Deserialize, Serialize};
use survey_common::{elevation_stats, ContourConfig, ElevationGrid, Point, TerrainError, TerrainResult};

/// Default endpoint matching tolerance for [`merge_segments`].
pub const DEFAULT_MERGE_TOLERANCE: f64 = 1e-6;

/// Levels are rounded to this many decimal places to stop drift.
const LEVEL_ROUNDING: f64 = 1e6;

/// Minimum number of surveyed points before contours are attempted.
const MIN_VALID_SAMPLES: usize = 4;

/// A line segment between two points
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub start: Point,
    pub end: Point,
}

impl Segment {
    pub fn new(start: Point, end: Point) -> Self {
        Self { start, end }
    }
}

/// A chain of connected segments
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polyline {
    pub points: Vec<Point>,
    /// First and last points coincide.
    pub closed: bool,
}

impl Polyline {
    /// Total length in grid units.
    pub fn length(&self) -> f64 {
        self.points.windows(2).map(|w| w[0].distance(w[1])).sum()
    }

    /// Split back into the segments between consecutive points.
    pub fn segments(&self) -> Vec<Segment> {
        self.points
            .windows(2)
            .map(|w| Segment::new(w[0], w[1]))
            .collect()
    }
}

/// All polylines at one elevation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContourLevel {
    pub level: f64,
    pub is_major: bool,
    pub polylines: Vec<Polyline>,
}

/// Cell edges, numbered top/right/bottom/left = 0/1/2/3.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Edge {
    Top,
    Right,
    Bottom,
    Left,
}

/// Marching squares lookup table.
///
/// Indexed by `(TL << 3) | (TR << 2) | (BR << 1) | BL` where a bit is set when
/// the corner is `>= level`. Saddle cases 5 and 10 use a fixed pairing that
/// joins the two high corners through the cell.
const CASE_TABLE: [&[(Edge, Edge)]; 16] = [
    &[],
    &[(Edge::Left, Edge::Bottom)],
    &[(Edge::Bottom, Edge::Right)],
    &[(Edge::Left, Edge::Right)],
    &[(Edge::Top, Edge::Right)],
    &[(Edge::Left, Edge::Top), (Edge::Right, Edge::Bottom)],
    &[(Edge::Top, Edge::Bottom)],
    &[(Edge::Left, Edge::Top)],
    &[(Edge::Left, Edge::Top)],
    &[(Edge::Top, Edge::Bottom)],
    &[(Edge::Top, Edge::Right), (Edge::Bottom, Edge::Left)],
    &[(Edge::Top, Edge::Right)],
    &[(Edge::Left, Edge::Right)],
    &[(Edge::Right, Edge::Bottom)],
    &[(Edge::Left, Edge::Bottom)],
    &[],
];

/// Corner values of one cell.
#[derive(Debug, Clone, Copy)]
struct Cell {
    col: f64,
    row: f64,
    tl: f64,
    tr: f64,
    bl: f64,
    br: f64,
}

impl Cell {
    fn case_index(&self, level: f64) -> usize {
        let mut index = 0;
        if self.tl >= level { index |= 8; }
        if self.tr >= level { index |= 4; }
        if self.br >= level { index |= 2; }
        if self.bl >= level { index |= 1; }
        index
    }

    /// Where `level` crosses `edge`, by linear interpolation along it.
    ///
    /// Returns `None` when the interpolation fraction is not finite.
    fn crossing(&self, edge: Edge, level: f64) -> Option<Point> {
        let (x, y) = (self.col, self.row);
        let (va, vb, from, to) = match edge {
            Edge::Top => (self.tl, self.tr, Point::new(x, y), Point::new(x + 1.0, y)),
            Edge::Right => (self.tr, self.br, Point::new(x + 1.0, y), Point::new(x + 1.0, y + 1.0)),
            Edge::Bottom => (self.bl, self.br, Point::new(x, y + 1.0), Point::new(x + 1.0, y + 1.0)),
            Edge::Left => (self.tl, self.bl, Point::new(x, y), Point::new(x, y + 1.0)),
        };

        let t = (level - va) / (vb - va);
        if !t.is_finite() {
            return None;
        }

        Some(from + (to - from) * t)
    }
}

/// Marching squares over every complete cell of the grid at one level.
///
/// Cells with any unsurveyed corner are skipped entirely.
pub fn compute_segments(grid: &ElevationGrid, level: f64) -> Vec<Segment> {
    if !grid.has_cells() {
        return vec![];
    }

    let mut segments = Vec::new();

    for row in 0..grid.rows() - 1 {
        for col in 0..grid.cols() - 1 {
            let Some([tl, tr, bl, br]) = grid.cell_corners(row, col) else {
                continue;
            };

            let cell = Cell {
                col: col as f64,
                row: row as f64,
                tl,
                tr,
                bl,
                br,
            };

            for &(a, b) in CASE_TABLE[cell.case_index(level)] {
                if let (Some(start), Some(end)) = (cell.crossing(a, level), cell.crossing(b, level)) {
                    segments.push(Segment { start, end });
                }
            }
        }
    }

    segments
}

type PointKey = (i64, i64);

fn point_key(p: Point, tolerance: f64) -> PointKey {
    ((p.x / tolerance).round() as i64, (p.y / tolerance).round() as i64)
}

/// Endpoint index over a segment list.
struct Adjacency<'a> {
    segments: &'a [Segment],
    by_endpoint: HashMap<PointKey, Vec<usize>>,
    used: Vec<bool>,
    tolerance: f64,
}

impl<'a> Adjacency<'a> {
    fn new(segments: &'a [Segment], tolerance: f64) -> Self {
        let mut by_endpoint: HashMap<PointKey, Vec<usize>> = HashMap::new();
        for (idx, seg) in segments.iter().enumerate() {
            by_endpoint.entry(point_key(seg.start, tolerance)).or_default().push(idx);
            by_endpoint.entry(point_key(seg.end, tolerance)).or_default().push(idx);
        }

        Self {
            segments,
            by_endpoint,
            used: vec![false; segments.len()],
            tolerance,
        }
    }

    /// Consume an unused segment touching `from` and return its far endpoint.
    fn take_next(&mut self, from: Point) -> Option<Point> {
        let key = point_key(from, self.tolerance);
        let candidates = self.by_endpoint.get(&key)?;

        let idx = candidates.iter().copied().find(|&i| !self.used[i])?;
        self.used[idx] = true;

        let seg = &self.segments[idx];
        if point_key(seg.start, self.tolerance) == key {
            Some(seg.end)
        } else {
            Some(seg.start)
        }
    }
}

/// Connect line segments into continuous polylines
///
/// Each unused segment seeds a polyline that is extended greedily from its
/// tail and then from its head through unused segments sharing an endpoint
/// (matched after rounding coordinates to `tolerance`). Every segment is
/// consumed exactly once. A non-positive or non-finite tolerance falls back
/// to [`DEFAULT_MERGE_TOLERANCE`].
pub fn merge_segments(segments: &[Segment], tolerance: f64) -> Vec<Polyline> {
    if segments.is_empty() {
        return vec![];
    }

    let tolerance = if tolerance.is_finite() && tolerance > 0.0 {
        tolerance
    } else {
        DEFAULT_MERGE_TOLERANCE
    };

    let mut adjacency = Adjacency::new(segments, tolerance);
    let mut polylines = Vec::new();

    for seed in 0..segments.len() {
        if adjacency.used[seed] {
            continue;
        }
        adjacency.used[seed] = true;

        let mut points = VecDeque::from([segments[seed].start, segments[seed].end]);

        while let Some(next) = points.back().copied().and_then(|p| adjacency.take_next(p)) {
            points.push_back(next);
        }
        while let Some(prev) = points.front().copied().and_then(|p| adjacency.take_next(p)) {
            points.push_front(prev);
        }

        let points: Vec<Point> = points.into();
        let closed = points.len() > 2
            && point_key(points[0], tolerance) == point_key(points[points.len() - 1], tolerance);

        polylines.push(Polyline { points, closed });
    }

    polylines
}

fn round_level(level: f64) -> f64 {
    (level * LEVEL_ROUNDING).round() / LEVEL_ROUNDING
}

/// Generate contour levels from the first multiple of `interval` at or above
/// `min_value` up to `max_value`, each rounded to 6 decimal places.
///
/// Generation stops early if rounding stops the levels from advancing, which
/// happens for intervals finer than
/// [`MIN_CONTOUR_INTERVAL`](survey_common::config::MIN_CONTOUR_INTERVAL).
/// [`generate_contours`] rejects such intervals up front.
pub fn generate_levels(min_value: f64, max_value: f64, interval: f64) -> Vec<f64> {
    if !interval.is_finite() || interval <= 0.0 {
        return vec![];
    }
    if min_value.is_nan() || max_value.is_nan() || max_value < min_value {
        return vec![];
    }

    let start = (min_value / interval).ceil() * interval;
    let mut levels = Vec::new();

    for step in 0u64.. {
        let level = round_level(start + step as f64 * interval);
        if level > max_value {
            break;
        }
        if levels.last().is_some_and(|&last| level <= last) {
            tracing::warn!(
                interval,
                stopped_at = level,
                max_value,
                "Contour levels stopped advancing after rounding"
            );
            break;
        }
        levels.push(level);
    }

    levels
}

/// Whether `level` falls on a major contour: every `major_multiplier`-th
/// multiple of `interval`, counted from zero.
pub fn is_major_level(level: f64, interval: f64, major_multiplier: u32) -> bool {
    let index = (level / interval).round() as i64;
    index.rem_euclid(i64::from(major_multiplier.max(1))) == 0
}

/// Generate the full contour set for a grid
///
/// Returns an empty set when the grid is smaller than 2×2 or has fewer than
/// four surveyed points. Levels that produce no polylines are omitted; the
/// remaining levels are in ascending order.
pub fn generate_contours(grid: &ElevationGrid, config: &ContourConfig) -> TerrainResult<Vec<ContourLevel>> {
    config.validate()?;

    let valid_count = grid.valid_count();
    if !grid.has_cells() || valid_count < MIN_VALID_SAMPLES {
        tracing::debug!(
            rows = grid.rows(),
            cols = grid.cols(),
            valid_count,
            "Not enough survey data for contours"
        );
        return Ok(vec![]);
    }

    let Some(stats) = elevation_stats(grid) else {
        return Ok(vec![]);
    };

    let interval = config.interval;
    let estimated = ((stats.max - (stats.min / interval).ceil() * interval) / interval).floor();
    if estimated.is_finite() && estimated >= 0.0 && estimated + 1.0 > config.max_levels as f64 {
        return Err(TerrainError::TooManyLevels {
            count: (estimated as usize).saturating_add(1),
            max: config.max_levels,
        });
    }

    let levels = generate_levels(stats.min, stats.max, interval);

    tracing::debug!(
        rows = grid.rows(),
        cols = grid.cols(),
        valid_count,
        data_min = stats.min,
        data_max = stats.max,
        num_levels = levels.len(),
        "generate_contours input"
    );

    let mut contours = Vec::new();

    for level in levels {
        let segments = compute_segments(grid, level);
        let polylines = merge_segments(&segments, DEFAULT_MERGE_TOLERANCE);

        tracing::trace!(
            level,
            segments = segments.len(),
            polylines = polylines.len(),
            "Contour level"
        );

        if polylines.is_empty() {
            continue;
        }

        contours.push(ContourLevel {
            level,
            is_major: is_major_level(level, interval, config.major_multiplier),
            polylines,
        });
    }

    tracing::debug!(
        num_levels = contours.len(),
        num_polylines = contours.iter().map(|c| c.polylines.len()).sum::<usize>(),
        total_points = contours
            .iter()
            .flat_map(|c| &c.polylines)
            .map(|p| p.points.len())
            .sum::<usize>(),
        "Generated contours"
    );

    Ok(contours)
}
