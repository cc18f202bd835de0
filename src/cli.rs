//! Command line interface for Orbitdrift

use clap::Parser;
use std::fmt;

use crate::config::SimulationConfig;
use crate::physics::formula::{Formula, FormulaError};

/// CLI-specific errors
#[derive(Debug)]
pub enum CliError {
    /// Configuration file could not be loaded
    ConfigLoad(String),
    /// The formula given with --formula does not parse
    InvalidFormula(FormulaError),
    /// A numeric override is out of range
    InvalidArgument(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::ConfigLoad(msg) => write!(f, "Failed to load configuration: {msg}"),
            CliError::InvalidFormula(err) => write!(f, "Invalid formula: {err}"),
            CliError::InvalidArgument(msg) => write!(f, "Invalid argument: {msg}"),
        }
    }
}

impl std::error::Error for CliError {}

/// Orbitdrift - planetary orbit simulation
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Path to configuration file (TOML format)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<String>,

    /// Force formula over G, m1, m2 and r (overrides config file)
    #[arg(short, long, value_name = "EXPR")]
    pub formula: Option<String>,

    /// Simulated seconds per wall-clock second (overrides config file)
    #[arg(short = 't', long, value_name = "SCALE")]
    pub time_scale: Option<f64>,

    /// Start paused
    #[arg(short = 'p', long)]
    pub paused: bool,

    /// Exit after this many frames
    #[arg(long, value_name = "COUNT")]
    pub frames: Option<u32>,

    /// Frames per second of the headless loop
    #[arg(long, value_name = "FPS", default_value_t = 60.0)]
    pub fps: f64,

    /// Print the effective configuration as TOML and exit
    #[arg(long)]
    pub print_config: bool,

    /// Enable verbose logging
    #[arg(short = 'v', long)]
    pub verbose: bool,
}

/// Loads configuration from file or defaults, then applies command-line overrides
pub fn load_and_apply_config(args: &Args) -> Result<SimulationConfig, CliError> {
    let mut config = if let Some(config_path) = &args.config {
        println!("Loading configuration from: {config_path}");
        SimulationConfig::load(config_path).map_err(|e| CliError::ConfigLoad(e.to_string()))?
    } else {
        SimulationConfig::load_from_user_config()
    };

    if let Some(formula) = &args.formula {
        let formula = Formula::parse(formula).map_err(CliError::InvalidFormula)?;
        println!("Using formula: {formula}");
        config.physics.formula = Some(formula.source().to_owned());
    }

    if let Some(time_scale) = args.time_scale {
        if !time_scale.is_finite() || time_scale <= 0.0 {
            return Err(CliError::InvalidArgument(format!(
                "time scale must be positive, got {time_scale}"
            )));
        }
        println!("Overriding time scale to: {time_scale}");
        config.time.time_scale = time_scale;
    }

    if args.paused {
        config.time.start_paused = true;
    }

    Ok(config)
}
