//! Curve smoothing for contour polylines.
//!
//! Polylines are converted to cubic Bézier paths using Catmull-Rom tangents.
//! The smoothing factor scales the tangents: `0` gives straight segments and
//! `1` gives the canonical Catmull-Rom curve.

use serde::{Deserialize, Serialize};
use survey_common::config::clamp_smoothing;
use survey_common::Point;

use crate::contour::ContourLevel;

/// A single drawing command
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum PathCommand {
    MoveTo(Point),
    LineTo(Point),
    CubicTo { c1: Point, c2: Point, to: Point },
}

impl PathCommand {
    /// The point the pen ends at after this command.
    pub fn end_point(&self) -> Point {
        match *self {
            PathCommand::MoveTo(p) | PathCommand::LineTo(p) => p,
            PathCommand::CubicTo { to, .. } => to,
        }
    }
}

/// A path in grid coordinates
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Path {
    pub commands: Vec<PathCommand>,
}

impl Path {
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// The on-curve points of the path, in order.
    pub fn vertices(&self) -> Vec<Point> {
        self.commands.iter().map(PathCommand::end_point).collect()
    }

    /// Whether every segment is a straight line.
    pub fn is_polyline(&self) -> bool {
        !self
            .commands
            .iter()
            .any(|c| matches!(c, PathCommand::CubicTo { .. }))
    }
}

/// A contour level with its polylines converted to paths
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SmoothedLevel {
    pub level: f64,
    pub is_major: bool,
    pub paths: Vec<Path>,
}

/// Convert a polyline to a path.
///
/// With `smoothing == 0` or fewer than three points the result is a straight
/// path through every point. Otherwise each consecutive pair `p1 → p2` becomes
/// a cubic with control points `p1 + (p2 - p0) * s / 6` and
/// `p2 - (p3 - p1) * s / 6`, where `p0`/`p3` repeat the end points at the
/// sequence boundaries. `smoothing` is clamped into `[0, 1]`.
pub fn polyline_to_path(points: &[Point], smoothing: f64) -> Path {
    let Some(&first) = points.first() else {
        return Path::default();
    };

    let smoothing = clamp_smoothing(smoothing);
    let mut commands = Vec::with_capacity(points.len());
    commands.push(PathCommand::MoveTo(first));

    if smoothing == 0.0 || points.len() < 3 {
        commands.extend(points[1..].iter().map(|&p| PathCommand::LineTo(p)));
        return Path { commands };
    }

    let scale = smoothing / 6.0;
    let last = points.len() - 1;

    for i in 0..last {
        let p0 = points[i.saturating_sub(1)];
        let p1 = points[i];
        let p2 = points[i + 1];
        let p3 = points[(i + 2).min(last)];

        commands.push(PathCommand::CubicTo {
            c1: p1 + (p2 - p0) * scale,
            c2: p2 - (p3 - p1) * scale,
            to: p2,
        });
    }

    Path { commands }
}

/// Convert every polyline of a contour set to a path.
pub fn smooth_contours(levels: &[ContourLevel], smoothing: f64) -> Vec<SmoothedLevel> {
    levels
        .iter()
        .map(|level| SmoothedLevel {
            level: level.level,
            is_major: level.is_major,
            paths: level
                .polylines
                .iter()
                .map(|p| polyline_to_path(&p.points, smoothing))
                .collect(),
        })
        .collect()
}
