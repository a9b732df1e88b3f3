// --- File: crates/agenda_booking/src/error.rs ---
use crate::session::SessionState;
use agenda_common::{external_service_error, internal_error, validation_error, AgendaError};
use agenda_config::ConfigurationError;
use std::fmt;
use thiserror::Error;

/// Name used when reporting gateway failures through [`AgendaError`].
pub const GATEWAY_SERVICE_NAME: &str = "calendar_gateway";

/// A field the visitor still has to provide.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingField {
    Name,
    Email,
    Phone,
    Duration,
}

impl MissingField {
    pub fn as_str(self) -> &'static str {
        match self {
            MissingField::Name => "name",
            MissingField::Email => "email",
            MissingField::Phone => "phone",
            MissingField::Duration => "duration",
        }
    }
}

impl fmt::Display for MissingField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Submission rejected locally; names every missing field at once.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error(
    "missing required field(s): {}",
    .missing.iter().map(|field| field.as_str()).collect::<Vec<_>>().join(", ")
)]
pub struct ValidationError {
    pub missing: Vec<MissingField>,
}

impl ValidationError {
    pub fn contains(&self, field: MissingField) -> bool {
        self.missing.contains(&field)
    }
}

#[derive(Error, Debug)]
pub enum BookingError {
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Unsupported session duration: {0} minutes")]
    UnsupportedDuration(u32),

    #[error("Cannot {action} while the session is {from:?}")]
    InvalidTransition {
        from: SessionState,
        action: &'static str,
    },

    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error("Gateway request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Gateway rejected the booking (status {status}): {message}")]
    Gateway { status: u16, message: String },

    #[error("Failed to encode booking link: {0}")]
    Encoding(String),

    #[error("Staging store error: {0}")]
    Staging(String),

    #[error("Staging record is malformed: {0}")]
    StagingFormat(#[from] serde_json::Error),
}

impl From<std::io::Error> for BookingError {
    fn from(err: std::io::Error) -> Self {
        BookingError::Staging(err.to_string())
    }
}

impl From<BookingError> for AgendaError {
    fn from(err: BookingError) -> Self {
        match err {
            BookingError::Validation(e) => validation_error(e),
            BookingError::UnsupportedDuration(_) | BookingError::InvalidTransition { .. } => {
                validation_error(err)
            }
            BookingError::Configuration(e) => e.into(),
            BookingError::Request(e) => e.into(),
            BookingError::Gateway { message, .. } => {
                external_service_error(GATEWAY_SERVICE_NAME, message)
            }
            BookingError::Encoding(message) => internal_error(message),
            BookingError::Staging(message) => internal_error(message),
            BookingError::StagingFormat(e) => e.into(),
        }
    }
}

impl BookingError {
    pub fn not_configured(section: &'static str, missing: Vec<&'static str>) -> Self {
        BookingError::Configuration(ConfigurationError::missing(section, missing))
    }
}
