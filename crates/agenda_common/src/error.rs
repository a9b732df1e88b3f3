// --- File: crates/agenda_common/src/error.rs ---
use agenda_config::ConfigurationError;
use std::fmt;
use thiserror::Error;

/// The base error type shared by the Agenda crates.
///
/// Crate-specific errors convert into it with `From` so handlers and the CLI
/// can report every failure the same way.
#[derive(Error, Debug)]
pub enum AgendaError {
    /// Error occurred during an HTTP request
    #[error("HTTP request failed: {0}")]
    HttpError(String),

    /// Error occurred while parsing data
    #[error("Failed to parse data: {0}")]
    ParseError(String),

    /// Required configuration is missing
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Input failed validation before reaching any external service
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Error occurred during external service call
    #[error("External service error: {service_name} - {message}")]
    ExternalServiceError {
        service_name: String,
        message: String,
    },

    #[error("Not found: {0}")]
    NotFoundError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

/// A trait for converting errors to HTTP status codes.
pub trait HttpStatusCode {
    /// Returns the HTTP status code for this error.
    fn status_code(&self) -> u16;
}

impl HttpStatusCode for AgendaError {
    fn status_code(&self) -> u16 {
        match self {
            AgendaError::HttpError(_) => 502,
            AgendaError::ParseError(_) => 400,
            AgendaError::ConfigError(_) => 503,
            AgendaError::ValidationError(_) => 400,
            // Calendar failures surface as a plain failed request
            AgendaError::ExternalServiceError { .. } => 500,
            AgendaError::NotFoundError(_) => 404,
            AgendaError::InternalError(_) => 500,
        }
    }
}

impl AgendaError {
    /// The message without its category prefix, as reported to API callers.
    pub fn detail(&self) -> String {
        match self {
            AgendaError::HttpError(m)
            | AgendaError::ParseError(m)
            | AgendaError::ConfigError(m)
            | AgendaError::ValidationError(m)
            | AgendaError::NotFoundError(m)
            | AgendaError::InternalError(m) => m.clone(),
            AgendaError::ExternalServiceError { message, .. } => message.clone(),
        }
    }
}

// Common error conversions
impl From<reqwest::Error> for AgendaError {
    fn from(err: reqwest::Error) -> Self {
        AgendaError::HttpError(err.to_string())
    }
}

impl From<serde_json::Error> for AgendaError {
    fn from(err: serde_json::Error) -> Self {
        AgendaError::ParseError(err.to_string())
    }
}

impl From<std::io::Error> for AgendaError {
    fn from(err: std::io::Error) -> Self {
        AgendaError::InternalError(err.to_string())
    }
}

impl From<ConfigurationError> for AgendaError {
    fn from(err: ConfigurationError) -> Self {
        AgendaError::ConfigError(err.to_string())
    }
}

// Utility functions for error handling
pub fn config_error<T: fmt::Display>(message: T) -> AgendaError {
    AgendaError::ConfigError(message.to_string())
}

pub fn validation_error<T: fmt::Display>(message: T) -> AgendaError {
    AgendaError::ValidationError(message.to_string())
}

pub fn not_found<T: fmt::Display>(message: T) -> AgendaError {
    AgendaError::NotFoundError(message.to_string())
}

pub fn external_service_error<T: fmt::Display>(service_name: &str, message: T) -> AgendaError {
    AgendaError::ExternalServiceError {
        service_name: service_name.to_string(),
        message: message.to_string(),
    }
}

pub fn internal_error<T: fmt::Display>(message: T) -> AgendaError {
    AgendaError::InternalError(message.to_string())
}
