//! Contour generation and elevation coloring for surveyed terrain.
//!
//! Implements:
//! - Contour lines (marching squares with segment merging)
//! - Catmull-Rom curve smoothing to cubic Bézier paths
//! - Color ramps and the colored elevation raster

pub mod contour;
pub mod gradient;
pub mod smoothing;

pub use contour::{
    compute_segments, generate_contours, generate_levels, merge_segments, ContourLevel, Polyline,
    Segment, DEFAULT_MERGE_TOLERANCE,
};
pub use gradient::{render_elevation_raster, Color, ColorRamp, ColorStop};
pub use smoothing::{polyline_to_path, smooth_contours, Path, PathCommand, SmoothedLevel};
