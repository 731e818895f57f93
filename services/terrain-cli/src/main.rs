//! Terrain CLI
//!
//! Runs contour generation and terrain analysis over a surveyed elevation
//! grid and prints the results as JSON.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use terrain_cli::commands;
use terrain_cli::{CliConfig, ConfigOverrides};

#[derive(Parser, Debug)]
#[command(name = "terrain-cli")]
#[command(about = "Contours, slope, flow direction and cut/fill for survey grids")]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// YAML configuration file with `contour` and `analysis` sections
    #[arg(long, global = true, env = "TERRAIN_CONFIG")]
    config: Option<PathBuf>,

    /// Log level (overridden by RUST_LOG)
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    json_logs: bool,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pretty: bool,

    #[command(flatten)]
    overrides: ConfigOverrides,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate contour lines and smoothed paths
    Contours {
        /// Grid JSON file
        grid: PathBuf,
    },

    /// Compute slope, flow direction and cut/fill volumes
    Analyze {
        /// Grid JSON file
        grid: PathBuf,
    },

    /// Render the colored elevation raster
    Raster {
        /// Grid JSON file
        grid: PathBuf,

        /// Output width in pixels
        #[arg(long, default_value = "256")]
        width: usize,

        /// Output height in pixels
        #[arg(long, default_value = "256")]
        height: usize,

        /// Color ramp JSON file (default: built-in terrain ramp)
        #[arg(long)]
        ramp: Option<PathBuf>,

        /// Write raw RGBA bytes to this file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print elevation statistics
    Stats {
        /// Grid JSON file
        grid: PathBuf,
    },
}

fn main() -> Result<()> {
    // Load environment from .env file if present
    dotenvy::dotenv().ok();

    let args = Args::parse();
    init_tracing(&args.log_level, args.json_logs);

    let config = CliConfig::resolve(args.config.as_deref(), &args.overrides)?;
    info!(
        interval = config.contour.interval,
        spacing = config.analysis.spacing,
        datum = config.analysis.datum,
        "Resolved configuration"
    );

    match &args.command {
        Command::Contours { grid } => {
            let grid = commands::load_grid(grid)?;
            let report = commands::run_contours(&grid, &config.contour)?;
            print_json(&report, args.pretty)
        }
        Command::Analyze { grid } => {
            let grid = commands::load_grid(grid)?;
            let report = commands::run_analysis(&grid, &config.analysis)?;
            print_json(&report, args.pretty)
        }
        Command::Raster {
            grid,
            width,
            height,
            ramp,
            output,
        } => {
            let grid = commands::load_grid(grid)?;
            let ramp = commands::load_ramp(ramp.as_deref())?;
            let report = commands::run_raster(&grid, &ramp, *width, *height, output.as_deref())?;
            print_json(&report, args.pretty)
        }
        Command::Stats { grid } => {
            let grid = commands::load_grid(grid)?;
            print_json(&commands::run_stats(&grid), args.pretty)
        }
    }
}

/// Logs go to stderr so stdout carries only the JSON result.
fn init_tracing(log_level: &str, json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    let builder = fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_level(true)
        .with_writer(std::io::stderr);

    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn print_json<T: Serialize>(value: &T, pretty: bool) -> Result<()> {
    let out = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{}", out);
    Ok(())
}
