//! gaze-grid command line
//!
//! Usage:
//!   gaze-grid quantize 0.4 -0.7        # grid cell and asset id for a sample
//!   gaze-grid encode -3 15             # asset id for a grid cell
//!   gaze-grid decode gaze_px0p0_py0p0_256.webp
//!   gaze-grid manifest --paths         # every asset the grid can select
//!   gaze-grid replay session.txt       # run an event script
//!   gaze-grid config                   # print the effective configuration

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use gaze_grid::{
    parse_script, run_command, AssetId, GazeConfig, GazeTracker, NormalizedSample, Rect, ReplayStep,
};

#[derive(Debug, Parser)]
#[command(name = "gaze-grid", version, about = "Map pointer and tilt input onto a pre-rendered gaze grid")]
struct Cli {
    /// Config file (defaults to $GAZE_GRID_CONFIG, then the platform config dir)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Quantize a normalized sample (each axis in [-1, 1])
    #[command(allow_negative_numbers = true)]
    Quantize {
        x: f64,
        y: f64,
        /// Print JSON instead of plain text
        #[arg(long)]
        json: bool,
    },
    /// Print the asset id for a grid coordinate
    #[command(allow_negative_numbers = true)]
    Encode {
        px: i32,
        py: i32,
        /// Image size, defaults to the configured one
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
        size: Option<u32>,
    },
    /// Parse an asset id back into its coordinate and size
    Decode { asset_id: String },
    /// List every asset id of the configured grid
    Manifest {
        /// Prefix each id with the configured base path
        #[arg(long)]
        paths: bool,
    },
    /// Replay an event script from a file, or stdin when omitted
    Replay {
        file: Option<PathBuf>,
        /// Print one JSON frame per line
        #[arg(long)]
        json: bool,
    },
    /// Print the effective configuration as TOML
    Config,
}

fn init_tracing(verbose: bool) {
    let fallback = if verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback)))
        .with_writer(io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    run(cli)
}

/// Config is only loaded by the subcommands that read it
fn run(cli: Cli) -> Result<()> {
    let config_path = cli.config.as_deref();

    match cli.command {
        Command::Quantize { x, y, json } => {
            let quantizer = load_config(config_path)?.quantizer()?;
            let target = quantizer.target(NormalizedSample::new(x, y));
            if json {
                println!("{}", serde_json::to_string(&target)?);
            } else {
                println!("{} {}", target.coordinate, target.asset_id);
            }
        }
        Command::Encode { px, py, size } => {
            let config = load_config(config_path)?;
            let grid = config.grid_spec()?;
            if !grid.contains(px) || !grid.contains(py) {
                tracing::warn!("({}, {}) is not on the {} grid", px, py, grid);
            }
            println!("{}", gaze_grid::encode(px, py, size.unwrap_or(config.image_size)));
        }
        Command::Decode { asset_id } => {
            let (coordinate, size) =
                AssetId::parse(&asset_id).with_context(|| format!("Invalid asset id {}", asset_id))?;
            println!("{} size {}", coordinate, size);
        }
        Command::Manifest { paths } => {
            let config = load_config(config_path)?;
            for asset in config.quantizer()?.manifest() {
                if paths {
                    println!("{}{}", config.asset_base_path, asset);
                } else {
                    println!("{}", asset);
                }
            }
        }
        Command::Replay { file, json } => {
            let reader: Box<dyn BufRead> = match &file {
                Some(path) => Box::new(BufReader::new(
                    File::open(path).with_context(|| format!("Failed to open {}", path.display()))?,
                )),
                None => Box::new(BufReader::new(io::stdin())),
            };
            replay(&load_config(config_path)?, reader, json)?;
        }
        Command::Config => {
            print!("{}", load_config(config_path)?.to_toml_string()?);
        }
    }

    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<GazeConfig> {
    GazeConfig::load(path).context("Failed to load configuration")
}

fn replay(config: &GazeConfig, reader: Box<dyn BufRead>, json: bool) -> Result<()> {
    let commands = parse_script(reader).context("Failed to parse event script")?;

    let size = f64::from(config.image_size);
    let mut tracker = GazeTracker::new(config, Rect::new(0.0, 0.0, size, size), Box::new(|_: &str| {}))?
        .with_overlay(Box::new(|status: &str| eprintln!("{}", status)));

    for command in &commands {
        match run_command(&mut tracker, command) {
            ReplayStep::Frame(frame) if json => println!("{}", serde_json::to_string(&frame)?),
            ReplayStep::Frame(frame) => println!("{}", frame.path),
            ReplayStep::Notice(notice) => eprintln!("{}", notice),
            ReplayStep::Quiet => {}
        }
    }
    Ok(())
}
