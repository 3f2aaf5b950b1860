//! Error types for ephemeris queries

use thiserror::Error;

use crate::models::Body;

pub type Result<T> = std::result::Result<T, EphemerisError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum EphemerisError {
    /// The provider could not compute a value for this body and time.
    /// Recoverable: the body is skipped for the current cycle.
    #[error("ephemeris unavailable for {body} at JD {julian_day:.6}: {message}")]
    ProviderUnavailable {
        body: Body,
        julian_day: f64,
        message: String,
    },

    /// System time could not be read; the cycle is skipped.
    #[error("system clock unavailable: {0}")]
    ClockFailure(String),

    /// A quantity was requested for a body it is not defined for
    #[error("{quantity} is not defined for {body}")]
    NotApplicable { body: Body, quantity: &'static str },
}

impl EphemerisError {
    pub fn unavailable(body: Body, julian_day: f64, message: impl Into<String>) -> Self {
        EphemerisError::ProviderUnavailable {
            body,
            julian_day,
            message: message.into(),
        }
    }
}
