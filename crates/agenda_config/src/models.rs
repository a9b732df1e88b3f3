// --- File: crates/agenda_config/src/models.rs ---

use crate::ConfigurationError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Time zone the practice works in; events are stamped with it.
pub const DEFAULT_TIME_ZONE: &str = "America/Mexico_City";

/// Hours a staged booking stays recoverable on the client.
pub const DEFAULT_STAGING_TTL_HOURS: i64 = 24;

fn is_present(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|v| !v.trim().is_empty())
}

// --- General Server Config ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
        }
    }
}

// --- Google Calendar Config ---
/// Either `key_path` (a downloaded service-account JSON file) or the inline
/// pair `client_email` + `private_key` authenticates the gateway.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct GcalConfig {
    pub calendar_id: Option<String>,
    pub key_path: Option<String>,
    pub client_email: Option<String>,
    // Usually "secret_from_env" -> GCAL_PRIVATE_KEY
    pub private_key: Option<String>,
    pub time_zone: Option<String>,
    /// Mounts the unauthenticated `PATCH /admin/eventos/{id}/estado` route.
    #[serde(default)]
    pub enable_status_hook: bool,
}

/// Where the service-account credentials come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceAccountSource<'a> {
    KeyFile(&'a str),
    Inline {
        client_email: &'a str,
        private_key: &'a str,
    },
}

impl GcalConfig {
    pub fn time_zone(&self) -> &str {
        self.time_zone
            .as_deref()
            .filter(|tz| !tz.trim().is_empty())
            .unwrap_or(DEFAULT_TIME_ZONE)
    }

    /// Checks every key the gateway needs and reports all missing ones at once.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        let mut missing = Vec::new();
        if !is_present(&self.calendar_id) {
            missing.push("gcal.calendar_id");
        }
        if !is_present(&self.key_path) {
            if !is_present(&self.client_email) {
                missing.push("gcal.client_email");
            }
            if !is_present(&self.private_key) {
                missing.push("gcal.private_key");
            }
        }
        if missing.is_empty() {
            Ok(())
        } else {
            Err(ConfigurationError::missing("gcal", missing))
        }
    }

    pub fn calendar_id(&self) -> Result<&str, ConfigurationError> {
        match self.calendar_id.as_deref() {
            Some(id) if !id.trim().is_empty() => Ok(id),
            _ => Err(ConfigurationError::missing("gcal", vec!["gcal.calendar_id"])),
        }
    }

    /// A key file wins over inline credentials when both are set.
    pub fn credentials(&self) -> Result<ServiceAccountSource<'_>, ConfigurationError> {
        if is_present(&self.key_path) {
            if let Some(path) = self.key_path.as_deref() {
                return Ok(ServiceAccountSource::KeyFile(path));
            }
        }
        match (self.client_email.as_deref(), self.private_key.as_deref()) {
            (Some(client_email), Some(private_key))
                if !client_email.trim().is_empty() && !private_key.trim().is_empty() =>
            {
                Ok(ServiceAccountSource::Inline {
                    client_email,
                    private_key,
                })
            }
            _ => Err(ConfigurationError::missing(
                "gcal",
                vec!["gcal.key_path or gcal.client_email + gcal.private_key"],
            )),
        }
    }
}

// --- Booking client Config ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct BookingConfig {
    /// Hosted appointment page used by the deep-link flow.
    pub booking_url: Option<String>,
    /// Base URL of the gateway, e.g. `http://localhost:3000`.
    pub gateway_url: Option<String>,
    pub staging_dir: Option<String>,
    pub staging_ttl_hours: Option<i64>,
}

impl BookingConfig {
    pub fn booking_url(&self) -> Result<&str, ConfigurationError> {
        match self.booking_url.as_deref() {
            Some(url) if !url.trim().is_empty() => Ok(url),
            _ => Err(ConfigurationError::missing(
                "booking",
                vec!["booking.booking_url"],
            )),
        }
    }

    pub fn gateway_url(&self) -> Result<&str, ConfigurationError> {
        match self.gateway_url.as_deref() {
            Some(url) if !url.trim().is_empty() => Ok(url),
            _ => Err(ConfigurationError::missing(
                "booking",
                vec!["booking.gateway_url"],
            )),
        }
    }

    pub fn staging_dir(&self) -> PathBuf {
        self.staging_dir
            .as_deref()
            .filter(|dir| !dir.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(".agenda"))
    }

    pub fn staging_ttl_hours(&self) -> i64 {
        self.staging_ttl_hours
            .filter(|hours| *hours > 0)
            .unwrap_or(DEFAULT_STAGING_TTL_HOURS)
    }
}

// --- Unified App Configuration ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub use_gcal: bool,

    #[serde(default)]
    pub gcal: Option<GcalConfig>,
    #[serde(default)]
    pub booking: Option<BookingConfig>,
}

impl AppConfig {
    /// The gateway section, fully validated.
    pub fn require_gcal(&self) -> Result<&GcalConfig, ConfigurationError> {
        let gcal = self.gcal.as_ref().ok_or_else(|| {
            ConfigurationError::missing("gcal", vec!["gcal.calendar_id", "gcal.key_path"])
        })?;
        gcal.validate()?;
        Ok(gcal)
    }

    /// The booking section; an absent section behaves like an empty one.
    pub fn booking(&self) -> BookingConfig {
        self.booking.clone().unwrap_or_default()
    }
}
