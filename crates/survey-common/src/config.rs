//! Configuration for the contour and terrain-analysis engines.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::{TerrainError, TerrainResult};

/// Finest contour interval accepted; levels are rounded to 6 decimal places.
pub const MIN_CONTOUR_INTERVAL: f64 = 1e-6;

/// Contour generation parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContourConfig {
    /// Elevation step between adjacent contour levels.
    pub interval: f64,

    /// Every Nth level (counted from elevation zero) is a major contour.
    pub major_multiplier: u32,

    /// Curve smoothing factor, `0` = straight segments, `1` = Catmull-Rom.
    pub smoothing: f64,

    /// Upper bound on the number of levels a single generation pass may visit.
    pub max_levels: usize,
}

impl Default for ContourConfig {
    fn default() -> Self {
        Self {
            interval: 1.0,
            major_multiplier: 5,
            smoothing: 0.5,
            max_levels: 10_000,
        }
    }
}

impl ContourConfig {
    pub fn new(interval: f64, major_multiplier: u32) -> Self {
        Self {
            interval,
            major_multiplier,
            ..Self::default()
        }
    }

    pub fn with_smoothing(mut self, smoothing: f64) -> Self {
        self.smoothing = smoothing;
        self
    }

    /// Load configuration from environment variables over the defaults.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        config.apply_env();
        config
    }

    /// Override fields from environment variables that are set and parse.
    pub fn apply_env(&mut self) {
        if let Some(v) = env_parse("CONTOUR_INTERVAL") {
            self.interval = v;
        }
        if let Some(v) = env_parse("CONTOUR_MAJOR_MULTIPLIER") {
            self.major_multiplier = v;
        }
        if let Some(v) = env_parse("CONTOUR_SMOOTHING") {
            self.smoothing = v;
        }
        if let Some(v) = env_parse("CONTOUR_MAX_LEVELS") {
            self.max_levels = v;
        }
    }

    /// Validate the configuration.
    pub fn validate(&self) -> TerrainResult<()> {
        if !self.interval.is_finite() || self.interval <= 0.0 {
            return Err(TerrainError::invalid_parameter(
                "interval",
                format!("must be a finite value > 0, got {}", self.interval),
            ));
        }

        if self.interval < MIN_CONTOUR_INTERVAL {
            return Err(TerrainError::invalid_parameter(
                "interval",
                format!(
                    "{} is finer than the level resolution {}",
                    self.interval, MIN_CONTOUR_INTERVAL
                ),
            ));
        }

        if self.major_multiplier == 0 {
            return Err(TerrainError::invalid_parameter(
                "major_multiplier",
                "must be >= 1",
            ));
        }

        if self.max_levels == 0 {
            return Err(TerrainError::invalid_parameter("max_levels", "must be >= 1"));
        }

        Ok(())
    }

    /// Smoothing factor clamped into `[0, 1]`; NaN counts as no smoothing.
    pub fn clamped_smoothing(&self) -> f64 {
        clamp_smoothing(self.smoothing)
    }
}

/// Clamp a smoothing factor into `[0, 1]`, mapping NaN to `0`.
pub fn clamp_smoothing(smoothing: f64) -> f64 {
    if smoothing.is_nan() {
        0.0
    } else {
        smoothing.clamp(0.0, 1.0)
    }
}

/// Terrain analysis parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Real-world distance between adjacent grid points, in elevation units.
    pub spacing: f64,

    /// Reference elevation for cut/fill volumes.
    pub datum: f64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            spacing: 1.0,
            datum: 0.0,
        }
    }
}

impl AnalysisConfig {
    pub fn new(spacing: f64, datum: f64) -> Self {
        Self { spacing, datum }
    }

    /// Load configuration from environment variables over the defaults.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        config.apply_env();
        config
    }

    /// Override fields from environment variables that are set and parse.
    pub fn apply_env(&mut self) {
        if let Some(v) = env_parse("GRID_SPACING") {
            self.spacing = v;
        }
        if let Some(v) = env_parse("DATUM_ELEVATION") {
            self.datum = v;
        }
    }

    /// Validate the configuration.
    pub fn validate(&self) -> TerrainResult<()> {
        validate_spacing(self.spacing)?;

        if !self.datum.is_finite() {
            return Err(TerrainError::invalid_parameter(
                "datum",
                format!("must be finite, got {}", self.datum),
            ));
        }

        Ok(())
    }
}

/// Check that a grid spacing is finite and positive.
pub fn validate_spacing(spacing: f64) -> TerrainResult<()> {
    if !spacing.is_finite() || spacing <= 0.0 {
        return Err(TerrainError::invalid_parameter(
            "spacing",
            format!("must be a finite value > 0, got {}", spacing),
        ));
    }
    Ok(())
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    let val = std::env::var(key).ok()?;
    match val.trim().parse() {
        Ok(parsed) => Some(parsed),
        Err(_) => {
            warn!(key, value = %val, "Ignoring unparseable environment value");
            None
        }
    }
}
