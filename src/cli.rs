//! Command line interface

use std::path::PathBuf;

use clap::Parser;

use crate::config::{AppConfig, OutputFormat};
use crate::models::Body;

#[derive(Debug, Parser)]
#[command(
    name = "planetwatch",
    version,
    about = "Periodically print planetary positions for an observer"
)]
pub struct Cli {
    /// Path to a TOML config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Observer latitude in degrees (South negative)
    #[arg(long, allow_hyphen_values = true)]
    pub latitude: Option<f64>,

    /// Observer longitude in degrees (West negative)
    #[arg(long, allow_hyphen_values = true)]
    pub longitude: Option<f64>,

    /// Observer height above sea level in metres
    #[arg(long, allow_hyphen_values = true)]
    pub altitude: Option<f64>,

    /// Body to report (repeat for several); replaces the configured list
    #[arg(short, long = "body", value_enum)]
    pub bodies: Vec<Body>,

    /// Pause between cycles in milliseconds
    #[arg(short, long)]
    pub interval_ms: Option<u64>,

    /// Stop after this many cycles
    #[arg(short = 'n', long)]
    pub iterations: Option<u64>,

    /// IANA time zone for local times
    #[arg(long)]
    pub timezone: Option<String>,

    /// Output format
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Use a fixed Julian Day instead of the system clock
    #[arg(long)]
    pub julian_day: Option<f64>,

    /// Directory holding Swiss Ephemeris data files
    #[arg(long)]
    pub ephemeris_path: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Override file-based settings with whatever was given on the command line
    pub fn apply(&self, config: &mut AppConfig) {
        if let Some(latitude) = self.latitude {
            config.observer.latitude = latitude;
        }
        if let Some(longitude) = self.longitude {
            config.observer.longitude = longitude;
        }
        if let Some(altitude) = self.altitude {
            config.observer.altitude = altitude;
        }
        if !self.bodies.is_empty() {
            config.bodies = self.bodies.clone();
        }
        if let Some(interval_ms) = self.interval_ms {
            config.interval_ms = interval_ms;
        }
        if self.iterations.is_some() {
            config.max_iterations = self.iterations;
        }
        if let Some(ref timezone) = self.timezone {
            config.timezone = timezone.clone();
        }
        if let Some(format) = self.format {
            config.format = format;
        }
        if self.julian_day.is_some() {
            config.julian_day = self.julian_day;
        }
        if self.ephemeris_path.is_some() {
            config.ephemeris_path = self.ephemeris_path.clone();
        }
        if self.verbose {
            config.log_level = "debug".to_string();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_overrides_config() {
        let cli = Cli::parse_from([
            "planetwatch",
            "--latitude",
            "40.7",
            "--longitude",
            "-74.0",
            "--body",
            "jupiter",
            "--body",
            "saturn",
            "-n",
            "5",
            "--format",
            "json",
            "-v",
        ]);

        let mut config = AppConfig::default();
        cli.apply(&mut config);

        assert_eq!(config.observer.latitude, 40.7);
        assert_eq!(config.observer.longitude, -74.0);
        assert_eq!(config.bodies, vec![Body::Jupiter, Body::Saturn]);
        assert_eq!(config.max_iterations, Some(5));
        assert_eq!(config.format, OutputFormat::Json);
        assert_eq!(config.log_level, "debug");
    }

    #[test]
    fn test_empty_cli_keeps_config() {
        let cli = Cli::parse_from(["planetwatch"]);
        let mut config = AppConfig::default();
        cli.apply(&mut config);
        assert_eq!(config, AppConfig::default());
    }
}
