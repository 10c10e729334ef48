//! Error types for Zenbox.

/// Top-level error type for the service.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Mail source error: {0}")]
    Source(#[from] SourceError),

    #[error("Classification error: {0}")]
    Classify(#[from] ClassifyError),
}

/// Configuration-related errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

/// Mail source errors. Any of these means the whole batch is unavailable.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("Mail backend returned status {code}")]
    Status { code: u16 },

    #[error("Mail backend request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Mail backend response decode failed: {0}")]
    Decode(String),
}

/// Classifier errors. These are scoped to a single email and never fail a batch.
#[derive(Debug, thiserror::Error)]
pub enum ClassifyError {
    #[error("Classifier returned status {code}")]
    Status { code: u16 },

    #[error("Classifier request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Classifier response decode failed: {0}")]
    Decode(String),
}

/// Result type alias for the service.
pub type Result<T> = std::result::Result<T, Error>;
