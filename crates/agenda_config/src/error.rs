use thiserror::Error;

/// Configuration could not be loaded, or a section needed by an operation is incomplete.
#[derive(Error, Debug)]
pub enum ConfigurationError {
    #[error("failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("failed to apply environment secrets: {0}")]
    Secrets(#[from] serde_json::Error),

    /// One or more required keys are absent or blank.
    #[error("{section} is not configured: missing {}", .missing.join(", "))]
    Missing {
        section: &'static str,
        missing: Vec<&'static str>,
    },

    #[error("invalid value for {key}: {reason}")]
    Invalid { key: &'static str, reason: String },
}

impl ConfigurationError {
    pub fn missing(section: &'static str, missing: Vec<&'static str>) -> Self {
        ConfigurationError::Missing { section, missing }
    }
}
