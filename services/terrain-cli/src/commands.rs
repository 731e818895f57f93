//! Command implementations.
//!
//! Each command takes a loaded grid plus resolved configuration and returns a
//! serializable report. Printing is left to the binary.

use std::path::Path;

use anyhow::{Context, Result};
use contour_engine::{
    generate_contours, render_elevation_raster, smooth_contours, ColorRamp, ContourLevel,
    SmoothedLevel,
};
use serde::Serialize;
use survey_common::{
    elevation_stats, AnalysisConfig, ContourConfig, ElevationGrid, ElevationStats,
};
use terrain_analysis::{analyze, TerrainReport};
use tracing::info;

/// Load a grid from a JSON file of the form `{"elevations": [[...], ...]}`.
pub fn load_grid(path: &Path) -> Result<ElevationGrid> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read grid file: {}", path.display()))?;

    let grid: ElevationGrid = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse grid file: {}", path.display()))?;

    info!(
        path = %path.display(),
        rows = grid.rows(),
        cols = grid.cols(),
        surveyed = grid.valid_count(),
        "Loaded survey grid"
    );
    Ok(grid)
}

/// Load a color ramp from JSON, or the built-in terrain ramp.
pub fn load_ramp(path: Option<&Path>) -> Result<ColorRamp> {
    let Some(path) = path else {
        return Ok(ColorRamp::terrain());
    };

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read ramp file: {}", path.display()))?;
    ColorRamp::from_json(&content)
        .with_context(|| format!("Failed to parse ramp file: {}", path.display()))
}

/// Contour generation output.
#[derive(Debug, Clone, Serialize)]
pub struct ContourReport {
    pub interval: f64,
    pub level_count: usize,
    pub polyline_count: usize,
    pub closed_count: usize,
    /// Summed polyline length in grid units.
    pub total_length: f64,
    pub levels: Vec<ContourLevel>,
    /// Smoothed paths, one entry per level.
    pub paths: Vec<SmoothedLevel>,
}

pub fn run_contours(grid: &ElevationGrid, config: &ContourConfig) -> Result<ContourReport> {
    let levels = generate_contours(grid, config).context("Contour generation failed")?;
    let paths = smooth_contours(&levels, config.smoothing);

    let polyline_count = levels.iter().map(|l| l.polylines.len()).sum();
    let closed_count = levels
        .iter()
        .flat_map(|l| &l.polylines)
        .filter(|p| p.closed)
        .count();
    let total_length = levels
        .iter()
        .flat_map(|l| &l.polylines)
        .map(|p| p.length())
        .sum();

    info!(
        levels = levels.len(),
        polylines = polyline_count,
        closed = closed_count,
        "Generated contours"
    );

    Ok(ContourReport {
        interval: config.interval,
        level_count: levels.len(),
        polyline_count,
        closed_count,
        total_length,
        levels,
        paths,
    })
}

/// Terrain analysis output.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub config: AnalysisConfig,
    pub elevation: Option<ElevationStats>,
    #[serde(flatten)]
    pub report: TerrainReport,
}

pub fn run_analysis(grid: &ElevationGrid, config: &AnalysisConfig) -> Result<AnalysisReport> {
    let report = analyze(grid, config).context("Terrain analysis failed")?;

    info!(
        cut = report.cut_fill.cut_volume,
        fill = report.cut_fill.fill_volume,
        net = report.cut_fill.net_volume,
        "Analyzed terrain"
    );

    Ok(AnalysisReport {
        config: config.clone(),
        elevation: elevation_stats(grid),
        report,
    })
}

/// Largest RGBA buffer the raster command will allocate (1 GiB).
pub const MAX_RASTER_BYTES: usize = 1 << 30;

/// Colored raster output summary.
#[derive(Debug, Clone, Serialize)]
pub struct RasterReport {
    pub width: usize,
    pub height: usize,
    pub opaque_pixels: usize,
    pub transparent_pixels: usize,
    /// Where the raw RGBA bytes were written, if anywhere.
    pub output: Option<String>,
}

/// Render the colored elevation raster and optionally write raw RGBA bytes.
pub fn run_raster(
    grid: &ElevationGrid,
    ramp: &ColorRamp,
    width: usize,
    height: usize,
    output: Option<&Path>,
) -> Result<RasterReport> {
    anyhow::ensure!(
        width > 0 && height > 0,
        "Raster dimensions must be positive, got {}x{}",
        width,
        height
    );
    let byte_len = width.checked_mul(height).and_then(|n| n.checked_mul(4));
    anyhow::ensure!(
        byte_len.is_some_and(|len| len <= MAX_RASTER_BYTES),
        "Raster {}x{} exceeds the {} byte limit",
        width,
        height,
        MAX_RASTER_BYTES
    );

    let pixels = render_elevation_raster(grid, ramp, width, height);
    let opaque_pixels = pixels.chunks_exact(4).filter(|px| px[3] > 0).count();

    if let Some(path) = output {
        std::fs::write(path, &pixels)
            .with_context(|| format!("Failed to write raster: {}", path.display()))?;
        info!(path = %path.display(), bytes = pixels.len(), "Wrote RGBA raster");
    }

    Ok(RasterReport {
        width,
        height,
        opaque_pixels,
        transparent_pixels: width * height - opaque_pixels,
        output: output.map(|p| p.display().to_string()),
    })
}

/// Elevation statistics, `None` for a grid without surveyed points.
pub fn run_stats(grid: &ElevationGrid) -> Option<ElevationStats> {
    elevation_stats(grid)
}
