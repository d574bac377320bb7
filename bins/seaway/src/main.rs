//! seaway: passage refinement and nautical coordinate normalization.

use clap::{Parser, Subcommand};
use seaway_cli::Status;
use seaway_core::{config::Config, error::exit_codes};
use seaway_geo::{BearingMode, Notation};
use seaway_telemetry::TelemetryConfig;
use std::path::PathBuf;
use std::process::ExitCode;

mod commands;
mod input;

use commands::{distance, nearby, normalize, parse, refine};

/// Great-circle passages and coordinate normalization for sailing directions
#[derive(Parser)]
#[command(name = "seaway")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Path to a configuration file
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Distance and initial bearing between two positions
    Distance {
        #[arg(allow_negative_numbers = true)]
        lat1: f64,
        #[arg(allow_negative_numbers = true)]
        lon1: f64,
        #[arg(allow_negative_numbers = true)]
        lat2: f64,
        #[arg(allow_negative_numbers = true)]
        lon2: f64,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Densify a passage given as a JSON array of [lat, lon] pairs
    Refine {
        /// Input file (stdin if omitted or "-")
        file: Option<PathBuf>,

        /// Maximum spacing between output points, in kilometers
        #[arg(short, long)]
        spacing: Option<f64>,

        /// Bearing handling along each leg (fixed, tracking)
        #[arg(short, long)]
        bearing_mode: Option<BearingMode>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Parse a single coordinate pair
    Parse {
        /// Coordinate text, e.g. "442050N 0681800W"
        coord: String,

        /// Coordinate notation (dms, ddm, ddm-hundredths)
        #[arg(short, long)]
        notation: Option<Notation>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Normalize a JSON array of {"name", "coords"} candidates
    Normalize {
        /// Input file (stdin if omitted or "-")
        file: Option<PathBuf>,

        /// Coordinate notation (dms, ddm, ddm-hundredths)
        #[arg(short, long)]
        notation: Option<Notation>,

        /// Fail on the first bad candidate instead of skipping it
        #[arg(long)]
        strict: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List charted features near a position, closest first
    Nearby {
        #[arg(allow_negative_numbers = true)]
        lat: f64,
        #[arg(allow_negative_numbers = true)]
        lon: f64,

        /// JSON array of {"section_id", "candidates"} (stdin if omitted or "-")
        file: Option<PathBuf>,

        /// Search radius in kilometers
        #[arg(short, long)]
        radius: Option<f64>,

        /// Coordinate notation (dms, ddm, ddm-hundredths)
        #[arg(short, long)]
        notation: Option<Notation>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            Status::error(&format!("Error: {e}"));
            let code = e
                .downcast_ref::<seaway_core::Error>()
                .map_or(exit_codes::FAILURE, seaway_core::Error::exit_code);
            ExitCode::from(u8::try_from(code).unwrap_or(1))
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = Config::load(cli.config.as_deref())?;

    let telemetry = if cli.verbose {
        TelemetryConfig::verbose()
    } else {
        TelemetryConfig::from_level(&config.schema.logging.level)
    };
    seaway_telemetry::init_with_config(telemetry)?;

    if let Some(path) = &config.path {
        tracing::debug!(path = %path.display(), "Loaded configuration");
    }

    match cli.command {
        Commands::Distance { lat1, lon1, lat2, lon2, json } => {
            distance::run(lat1, lon1, lat2, lon2, json)?
        }

        Commands::Refine { file, spacing, bearing_mode, json } => {
            if let Some(spacing) = spacing {
                config.schema.passage.spacing_km = spacing;
            }
            if let Some(mode) = bearing_mode {
                config.schema.passage.bearing_mode = mode;
            }
            refine::run(file.as_deref(), &config, json)?
        }

        Commands::Parse { coord, notation, json } => {
            if let Some(notation) = notation {
                config.schema.coordinates.notation = notation;
            }
            parse::run(&coord, &config, json)?
        }

        Commands::Normalize { file, notation, strict, json } => {
            if let Some(notation) = notation {
                config.schema.coordinates.notation = notation;
            }
            config.schema.coordinates.strict |= strict;
            normalize::run(file.as_deref(), &config, json)?
        }

        Commands::Nearby { lat, lon, file, radius, notation, json } => {
            if let Some(radius) = radius {
                config.schema.search.radius_km = radius;
            }
            if let Some(notation) = notation {
                config.schema.coordinates.notation = notation;
            }
            nearby::run(lat, lon, file.as_deref(), &config, json)?
        }
    }

    Ok(())
}
