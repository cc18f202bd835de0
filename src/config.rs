use crate::physics::clock::{DEFAULT_MAX_TIME_SCALE, DEFAULT_MIN_TIME_SCALE};
use crate::physics::math::Scalar;
use crate::physics::orbit::DEFAULT_INCLINATION_SCALE;
use crate::physics::units::{GRAVITATIONAL_CONSTANT, SUN_MASS};
use bevy::prelude::*;
use ::config::{Config, ConfigError, Environment, File, FileFormat};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Prefix for environment overrides, e.g. `ORBITDRIFT__TIME__TIME_SCALE=10`
pub const ENV_PREFIX: &str = "ORBITDRIFT";

#[derive(Resource, Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct SimulationConfig {
    pub physics: PhysicsConfig,
    pub time: TimeConfig,
    pub trails: TrailConfig,
    pub report: ReportConfig,
    pub bodies: Vec<BodyConfig>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            physics: PhysicsConfig::default(),
            time: TimeConfig::default(),
            trails: TrailConfig::default(),
            report: ReportConfig::default(),
            bodies: BodyConfig::solar_system(),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct PhysicsConfig {
    pub gravitational_constant: Scalar,
    /// kg
    pub central_mass: Scalar,
    /// Separations below this (m) are raised to it before the force law sees them
    pub min_separation: Scalar,
    /// Force formula; `None` selects the built-in inverse-square law
    pub formula: Option<String>,
    pub inclination_scale: Scalar,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravitational_constant: GRAVITATIONAL_CONSTANT,
            central_mass: SUN_MASS,
            min_separation: 1.0,
            formula: None,
            inclination_scale: DEFAULT_INCLINATION_SCALE,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct TimeConfig {
    pub time_scale: Scalar,
    pub min_time_scale: Scalar,
    pub max_time_scale: Scalar,
    /// Longest wall-clock delta (s) handed to the engine in one frame
    pub max_frame_delta: Scalar,
    pub start_paused: bool,
}

impl Default for TimeConfig {
    fn default() -> Self {
        Self {
            time_scale: 1.0,
            min_time_scale: DEFAULT_MIN_TIME_SCALE,
            max_time_scale: DEFAULT_MAX_TIME_SCALE,
            max_frame_delta: 0.25,
            start_paused: false,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct TrailConfig {
    pub max_points: usize,
    /// m
    pub min_point_distance: Scalar,
}

impl Default for TrailConfig {
    fn default() -> Self {
        Self {
            max_points: 600,
            min_point_distance: 2.0e7,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct ReportConfig {
    /// Wall-clock seconds between status reports; zero disables reporting
    pub interval_seconds: f32,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            interval_seconds: 1.0,
        }
    }
}

/// One row of the body table used to populate the engine
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct BodyConfig {
    pub name: String,
    /// kg
    pub mass: Scalar,
    pub distance_km: Scalar,
    #[serde(default)]
    pub phase_degrees: Scalar,
    #[serde(default = "BodyConfig::default_inclination_degrees")]
    pub inclination_degrees: Scalar,
}

impl BodyConfig {
    pub fn new(
        name: impl Into<String>,
        mass: Scalar,
        distance_km: Scalar,
        phase_degrees: Scalar,
        inclination_degrees: Scalar,
    ) -> Self {
        Self {
            name: name.into(),
            mass,
            distance_km,
            phase_degrees,
            inclination_degrees,
        }
    }

    fn default_inclination_degrees() -> Scalar {
        5.0
    }

    /// The eight planets, spread out in phase so they start apart
    pub fn solar_system() -> Vec<Self> {
        let inclination = Self::default_inclination_degrees();
        vec![
            Self::new("Mercury", 3.3011e23, 57_909_227.0, 0.0, inclination),
            Self::new("Venus", 4.8675e24, 108_209_475.0, 10.0, inclination),
            Self::new("Earth", 5.97237e24, 149_598_023.0, 20.0, inclination),
            Self::new("Mars", 6.4171e23, 227_939_200.0, 35.0, inclination),
            Self::new("Jupiter", 1.8982e27, 778_299_000.0, 50.0, inclination),
            Self::new("Saturn", 5.6834e26, 1_426_666_422.0, 65.0, inclination),
            Self::new("Uranus", 8.6810e25, 2_870_658_186.0, 80.0, inclination),
            Self::new("Neptune", 1.02413e26, 4_498_396_441.0, 95.0, inclination),
        ]
    }
}

impl SimulationConfig {
    /// Loads `path` (TOML) with `ORBITDRIFT__SECTION__KEY` environment overrides on top.
    ///
    /// A missing file is not an error; every absent key takes its default.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(
                File::from(path.as_ref())
                    .format(FileFormat::Toml)
                    .required(false),
            )
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }

    /// Load configuration from a file, falling back to defaults if it cannot be read
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        if !path.exists() {
            info!("Config file {} not found. Using defaults.", path.display());
        }

        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                warn!(
                    "Failed to load config file {}: {}. Using defaults.",
                    path.display(),
                    e
                );
                Self::default()
            }
        }
    }

    /// Location of `config.toml` in the platform's per-user config directory
    pub fn user_config_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "orbitdrift").map(|dirs| dirs.config_dir().join("config.toml"))
    }

    pub fn load_from_user_config() -> Self {
        match Self::user_config_path() {
            Some(path) => Self::load_or_default(path),
            None => {
                warn!("No user config directory available. Using defaults.");
                Self::default()
            }
        }
    }

    /// Save configuration to a file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), Box<dyn std::error::Error>> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
