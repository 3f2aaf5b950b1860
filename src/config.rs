//! Configuration for the reporting loop
//!
//! Values come from a TOML file (explicit path, or `planetwatch.toml` in the
//! platform config directory) and are then overridden from the command line.

use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::ephemeris::parse_timezone;
use crate::models::{Body, Observer};
use crate::reporter::ReporterConfig;

const CONFIG_FILE_NAME: &str = "planetwatch.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// How each cycle is written to the output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human readable blocks, one per body
    #[default]
    Text,
    /// One JSON document per cycle, one per line
    Json,
}

/// Top-level configuration file contents
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Bodies reported each cycle, in output order
    #[serde(default = "Body::default_set")]
    pub bodies: Vec<Body>,

    /// Observer used for rise/transit/set
    #[serde(default)]
    pub observer: Observer,

    /// Pause between cycles in milliseconds
    #[serde(default = "default_interval_ms")]
    pub interval_ms: u64,

    /// Stop after this many cycles (None = run until interrupted)
    #[serde(default)]
    pub max_iterations: Option<u64>,

    /// IANA time zone for rise/transit/set local times
    #[serde(default = "default_timezone")]
    pub timezone: String,

    #[serde(default)]
    pub format: OutputFormat,

    /// Pin the time reference to this Julian Day instead of the system clock
    #[serde(default)]
    pub julian_day: Option<f64>,

    /// Directory holding Swiss Ephemeris data files
    #[serde(default)]
    pub ephemeris_path: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_interval_ms() -> u64 {
    600
}

fn default_timezone() -> String {
    "Europe/London".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bodies: Body::default_set(),
            observer: Observer::default(),
            interval_ms: default_interval_ms(),
            max_iterations: None,
            timezone: default_timezone(),
            format: OutputFormat::default(),
            julian_day: None,
            ephemeris_path: None,
            log_level: default_log_level(),
        }
    }
}

impl AppConfig {
    /// Platform config file location, e.g. `~/.config/planetwatch/planetwatch.toml`
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("org", "planetwatch", "planetwatch")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }

    /// Load from an explicit file, else the default location if present, else defaults
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }

        match Self::default_path() {
            Some(path) if path.is_file() => Self::from_file(&path),
            _ => Ok(Self::default()),
        }
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let data = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        toml::from_str(&data).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let Observer {
            latitude,
            longitude,
            altitude,
        } = self.observer;

        if !(-90.0..=90.0).contains(&latitude) {
            return Err(ConfigError::Invalid(format!(
                "latitude {} outside -90..90",
                latitude
            )));
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(ConfigError::Invalid(format!(
                "longitude {} outside -180..180",
                longitude
            )));
        }
        if !altitude.is_finite() {
            return Err(ConfigError::Invalid("altitude must be finite".to_string()));
        }

        if self.bodies.is_empty() {
            return Err(ConfigError::Invalid("no bodies configured".to_string()));
        }
        let mut seen = HashSet::new();
        for body in &self.bodies {
            if !seen.insert(body) {
                return Err(ConfigError::Invalid(format!("{} listed twice", body)));
            }
        }

        if let Some(jd) = self.julian_day {
            if !jd.is_finite() {
                return Err(ConfigError::Invalid("julian_day must be finite".to_string()));
            }
        }

        parse_timezone(&self.timezone).map_err(ConfigError::Invalid)?;

        tracing::Level::from_str(&self.log_level)
            .map_err(|_| ConfigError::Invalid(format!("unknown log level: {}", self.log_level)))?;

        Ok(())
    }

    /// Validate and build the runtime settings for the reporting loop
    pub fn reporter_config(&self) -> Result<ReporterConfig, ConfigError> {
        self.validate()?;

        Ok(ReporterConfig {
            bodies: self.bodies.clone(),
            observer: self.observer,
            interval: self.interval(),
            max_iterations: self.max_iterations,
            timezone: parse_timezone(&self.timezone).map_err(ConfigError::Invalid)?,
            format: self.format,
        })
    }
}
