//! Color ramps and the colored elevation raster.

use serde::{Deserialize, Serialize};
use survey_common::{
    bilinear_interpolate, elevation_stats, ElevationGrid, ElevationStats, TerrainError,
    TerrainResult,
};

/// Color value in RGBA format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub fn transparent() -> Self {
        Self { r: 0, g: 0, b: 0, a: 0 }
    }

    /// Parse `#RRGGBB` or `#RRGGBBAA` (leading `#` optional).
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim_start_matches('#');
        if !hex.is_ascii() || (hex.len() != 6 && hex.len() != 8) {
            return None;
        }

        let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
        let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
        let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
        let a = if hex.len() == 8 {
            u8::from_str_radix(&hex[6..8], 16).ok()?
        } else {
            255
        };

        Some(Self { r, g, b, a })
    }

    pub fn to_hex(&self) -> String {
        if self.a == 255 {
            format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
        } else {
            format!("#{:02X}{:02X}{:02X}{:02X}", self.r, self.g, self.b, self.a)
        }
    }
}

/// Linear color interpolation
pub fn interpolate_color(color1: Color, color2: Color, t: f64) -> Color {
    let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
    let lerp = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * t).round() as u8;

    Color::new(
        lerp(color1.r, color2.r),
        lerp(color1.g, color2.g),
        lerp(color1.b, color2.b),
        lerp(color1.a, color2.a),
    )
}

/// Color stop at a normalized ramp position in `[0, 1]`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorStop {
    pub position: f64,
    pub color: Color,
}

impl ColorStop {
    pub fn new(position: f64, color: Color) -> Self {
        Self { position, color }
    }
}

/// An ordered set of color stops sampled by linear interpolation.
///
/// Serialized as `{"stops": [{"position": 0.0, "color": "#1A9641"}, ...]}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RampDefinition", into = "RampDefinition")]
pub struct ColorRamp {
    stops: Vec<ColorStop>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct RampDefinition {
    stops: Vec<StopDefinition>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct StopDefinition {
    position: f64,
    color: String,
}

impl TryFrom<RampDefinition> for ColorRamp {
    type Error = TerrainError;

    fn try_from(def: RampDefinition) -> Result<Self, Self::Error> {
        let stops = def
            .stops
            .into_iter()
            .map(|s| {
                Color::from_hex(&s.color)
                    .map(|color| ColorStop::new(s.position, color))
                    .ok_or_else(|| {
                        TerrainError::invalid_parameter("color", format!("not a hex color: {}", s.color))
                    })
            })
            .collect::<TerrainResult<Vec<_>>>()?;
        ColorRamp::new(stops)
    }
}

impl From<ColorRamp> for RampDefinition {
    fn from(ramp: ColorRamp) -> Self {
        RampDefinition {
            stops: ramp
                .stops
                .iter()
                .map(|s| StopDefinition {
                    position: s.position,
                    color: s.color.to_hex(),
                })
                .collect(),
        }
    }
}

impl ColorRamp {
    /// Build a ramp; stops are sorted by position.
    pub fn new(mut stops: Vec<ColorStop>) -> TerrainResult<Self> {
        if stops.is_empty() {
            return Err(TerrainError::invalid_parameter("stops", "ramp needs at least one stop"));
        }
        if let Some(bad) = stops.iter().find(|s| !(0.0..=1.0).contains(&s.position)) {
            return Err(TerrainError::invalid_parameter(
                "position",
                format!("stop position {} is outside [0, 1]", bad.position),
            ));
        }

        stops.sort_by(|a, b| a.position.total_cmp(&b.position));
        Ok(Self { stops })
    }

    /// Load a ramp from a JSON definition.
    pub fn from_json(json: &str) -> TerrainResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Hypsometric tint: lowland green through tan and brown to snow.
    pub fn terrain() -> Self {
        Self {
            stops: vec![
                ColorStop::new(0.0, Color::rgb(0x1A, 0x96, 0x41)),
                ColorStop::new(0.25, Color::rgb(0xA6, 0xD9, 0x6A)),
                ColorStop::new(0.5, Color::rgb(0xFF, 0xFF, 0xBF)),
                ColorStop::new(0.75, Color::rgb(0xFD, 0xAE, 0x61)),
                ColorStop::new(0.9, Color::rgb(0x8C, 0x51, 0x0A)),
                ColorStop::new(1.0, Color::rgb(0xFF, 0xFF, 0xFF)),
            ],
        }
    }

    /// Two-stop grayscale, black at the lowest elevation.
    pub fn grayscale() -> Self {
        Self {
            stops: vec![
                ColorStop::new(0.0, Color::rgb(0, 0, 0)),
                ColorStop::new(1.0, Color::rgb(255, 255, 255)),
            ],
        }
    }

    pub fn stops(&self) -> &[ColorStop] {
        &self.stops
    }

    /// Sample the ramp at `t`, clamped to `[0, 1]`.
    pub fn sample(&self, t: f64) -> Color {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };

        let first = self.stops[0];
        if t <= first.position {
            return first.color;
        }

        for pair in self.stops.windows(2) {
            let (low, high) = (pair[0], pair[1]);
            if t <= high.position {
                let span = high.position - low.position;
                if span <= f64::EPSILON {
                    return high.color;
                }
                return interpolate_color(low.color, high.color, (t - low.position) / span);
            }
        }

        self.stops[self.stops.len() - 1].color
    }

    /// Color for an elevation, normalized against `stats`.
    pub fn color_for(&self, stats: &ElevationStats, elevation: f64) -> Color {
        self.sample(stats.normalize(elevation))
    }
}

/// Render the grid as an RGBA raster of `width × height` pixels.
///
/// Each pixel maps back to fractional grid coordinates (corners to corners),
/// is sampled with bilinear interpolation, normalized against the grid's
/// min/max and colored through `ramp`. Pixels whose surrounding samples are
/// not all surveyed are transparent.
///
/// Returns an empty buffer if `width × height × 4` does not fit in `usize`.
pub fn render_elevation_raster(
    grid: &ElevationGrid,
    ramp: &ColorRamp,
    width: usize,
    height: usize,
) -> Vec<u8> {
    let Some(len) = width.checked_mul(height).and_then(|n| n.checked_mul(4)) else {
        tracing::warn!(width, height, "Raster size overflows, nothing rendered");
        return Vec::new();
    };
    let mut pixels = vec![0u8; len];

    let Some(stats) = elevation_stats(grid) else {
        return pixels;
    };

    // Multiply before dividing so the last pixel lands exactly on the edge.
    let grid_coord = |pixel: usize, count: usize, points: usize| {
        if count > 1 {
            (pixel as u128 * (points - 1) as u128) as f64 / (count - 1) as f64
        } else {
            0.0
        }
    };

    for y in 0..height {
        let gy = grid_coord(y, height, grid.rows());
        for x in 0..width {
            let gx = grid_coord(x, width, grid.cols());
            let color = bilinear_interpolate(grid, gx, gy)
                .map(|v| ramp.color_for(&stats, v))
                .unwrap_or_else(Color::transparent);

            let pixel_idx = (y * width + x) * 4;
            pixels[pixel_idx] = color.r;
            pixels[pixel_idx + 1] = color.g;
            pixels[pixel_idx + 2] = color.b;
            pixels[pixel_idx + 3] = color.a;
        }
    }

    tracing::debug!(
        width,
        height,
        data_min = stats.min,
        data_max = stats.max,
        "Rendered elevation raster"
    );

    pixels
}
