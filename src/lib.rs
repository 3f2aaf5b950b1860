//! planetwatch - periodic planetary position reporter
//!
//! Queries an ephemeris provider (the Swiss Ephemeris by default) for a set of
//! bodies and an observer location, and prints a report at a fixed interval.

pub mod cli;
pub mod config;
pub mod ephemeris;
pub mod error;
pub mod models;
pub mod reporter;

pub use config::AppConfig;
pub use ephemeris::{EphemerisProvider, SwissEphemeris};
pub use error::EphemerisError;
pub use reporter::Reporter;
