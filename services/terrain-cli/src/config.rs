//! CLI configuration loading.
//!
//! Precedence, lowest first: built-in defaults, the YAML file, environment
//! variables, then command-line flags.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use survey_common::{AnalysisConfig, ContourConfig};
use tracing::debug;

/// Root configuration loaded from a YAML file.
///
/// ```yaml
/// contour:
///   interval: 0.5
///   major_multiplier: 4
/// analysis:
///   spacing: 2.0
///   datum: 100.0
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    pub contour: ContourConfig,
    pub analysis: AnalysisConfig,
}

/// Command-line overrides for individual parameters.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct ConfigOverrides {
    /// Elevation step between contour levels
    #[arg(long, global = true)]
    pub interval: Option<f64>,

    /// Every Nth level is a major contour
    #[arg(long, global = true)]
    pub major: Option<u32>,

    /// Curve smoothing factor in [0, 1]
    #[arg(long, global = true)]
    pub smoothing: Option<f64>,

    /// Maximum number of contour levels per run
    #[arg(long, global = true)]
    pub max_levels: Option<usize>,

    /// Distance between adjacent grid points
    #[arg(long, global = true)]
    pub spacing: Option<f64>,

    /// Reference elevation for cut/fill
    #[arg(long, global = true)]
    pub datum: Option<f64>,
}

impl CliConfig {
    /// Load a configuration from a YAML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: CliConfig = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        debug!(path = %path.display(), "Loaded terrain config");
        Ok(config)
    }

    /// Load the file if given, otherwise start from defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    /// Build the effective configuration: file, then environment, then flags.
    pub fn resolve(path: Option<&Path>, overrides: &ConfigOverrides) -> Result<Self> {
        let mut config = Self::load_or_default(path)?;
        config.contour.apply_env();
        config.analysis.apply_env();
        config.apply_overrides(overrides);
        config.validate()?;
        Ok(config)
    }

    pub fn apply_overrides(&mut self, overrides: &ConfigOverrides) {
        if let Some(v) = overrides.interval {
            self.contour.interval = v;
        }
        if let Some(v) = overrides.major {
            self.contour.major_multiplier = v;
        }
        if let Some(v) = overrides.smoothing {
            self.contour.smoothing = v;
        }
        if let Some(v) = overrides.max_levels {
            self.contour.max_levels = v;
        }
        if let Some(v) = overrides.spacing {
            self.analysis.spacing = v;
        }
        if let Some(v) = overrides.datum {
            self.analysis.datum = v;
        }
    }

    pub fn validate(&self) -> Result<()> {
        self.contour
            .validate()
            .context("Invalid contour configuration")?;
        self.analysis
            .validate()
            .context("Invalid analysis configuration")?;
        Ok(())
    }
}
