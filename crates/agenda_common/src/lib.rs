// --- File: crates/agenda_common/src/lib.rs ---

pub mod duration; // Session lengths and prices
pub mod error; // Error handling
pub mod http; // HTTP error bodies and the shared client
pub mod logging; // Logging utilities
pub mod models; // Wire models shared by the gateway and the booking client
pub mod services; // Service abstractions

// Re-export error types and utilities for easier access
pub use error::{
    config_error, external_service_error, internal_error, not_found, validation_error,
    AgendaError, HttpStatusCode,
};

pub use http::{client::HTTP_CLIENT, ApiFailure};

pub use logging::{init, init_with_level};
