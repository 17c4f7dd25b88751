//! Error types for Terra Watch
//!
//! Centralized error handling using snafu for ergonomic error definitions.
//! A missing prediction is not an error (`fetch_prediction` yields `Ok(None)`)
//! and malformed readings are filtered, never raised.

use snafu::Snafu;

/// Main error type for the client
#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum Error {
    /// Invalid input or configuration
    #[snafu(display("Invalid: {message}"))]
    Invalid { message: String },

    /// Configuration could not be resolved
    #[snafu(display("Config error: {message}"))]
    Config { message: String },

    /// IO error (settings file, config file)
    #[snafu(display("IO error: {source}"))]
    Io { source: std::io::Error },

    /// JSON serialization/deserialization error
    #[snafu(display("JSON error: {source}"))]
    Json { source: serde_json::Error },

    /// TOML deserialization error
    #[snafu(display("TOML parse error: {source}"))]
    TomlDe { source: toml::de::Error },

    /// Backend unreachable, or its body could not be decoded
    #[snafu(display("Request to {endpoint} failed: {source}"))]
    Transport {
        endpoint: String,
        source: reqwest::Error,
    },

    /// Backend answered with a non-2xx status on a required endpoint
    #[snafu(display("{endpoint} returned HTTP {status}: {body}"))]
    Status {
        endpoint: String,
        status: u16,
        body: String,
    },

    /// Login or registration was refused
    #[snafu(display("{message}"))]
    Auth { message: String },
}

impl From<std::io::Error> for Error {
    fn from(source: std::io::Error) -> Self {
        Error::Io { source }
    }
}

impl From<serde_json::Error> for Error {
    fn from(source: serde_json::Error) -> Self {
        Error::Json { source }
    }
}

impl From<toml::de::Error> for Error {
    fn from(source: toml::de::Error) -> Self {
        Error::TomlDe { source }
    }
}

/// Result type alias for convenience
pub type Result<T, E = Error> = std::result::Result<T, E>;
