use taxguide_core::TaxEngineError;
use thiserror::Error;

/// Errors that can occur when loading engine configuration.
#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("CSV parse error: {0}")]
    Csv(String),

    #[error("TOML parse error: {0}")]
    Toml(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(#[from] TaxEngineError),

    #[error("Invalid schedule '{name}': {source}")]
    InvalidSchedule {
        name: String,
        #[source]
        source: TaxEngineError,
    },

    #[error("Schedule '{name}' not found (available: {available:?})")]
    UnknownSchedule { name: String, available: Vec<String> },
}

impl From<csv::Error> for ConfigLoadError {
    fn from(err: csv::Error) -> Self {
        ConfigLoadError::Csv(err.to_string())
    }
}

impl From<toml::de::Error> for ConfigLoadError {
    fn from(err: toml::de::Error) -> Self {
        ConfigLoadError::Toml(err.to_string())
    }
}
