//! error.rs — Errors of the dataset, config and fitting layers

use thiserror::Error;

use sail_model::DomainError;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Config(#[from] toml::de::Error),

    #[error("{path}: bad header {found:?}, expected {expected:?}")]
    Header {
        path: String,
        found: String,
        expected: String,
    },

    #[error("{path}:{line}: {reason}")]
    Row {
        path: String,
        line: usize,
        reason: String,
    },

    #[error("model domain error: {0}")]
    Domain(#[from] DomainError),

    #[error("fit failed: {0}")]
    Fit(String),

    #[error("invalid parameter {name}: {reason}")]
    Parameter { name: &'static str, reason: String },

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl SimError {
    pub fn io(path: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io { path: path.into(), source }
    }

    pub fn parameter(name: &'static str, reason: impl Into<String>) -> Self {
        Self::Parameter { name, reason: reason.into() }
    }
}

pub type Result<T> = std::result::Result<T, SimError>;
