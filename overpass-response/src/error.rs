use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for overpass-response operations
pub type Result<T> = std::result::Result<T, OverpassError>;

/// Error types for query submission and configuration.
///
/// Classification itself never fails: unparseable bodies degrade to
/// [`crate::types::DecodedPayload::Unknown`] instead of producing an error.
#[derive(Debug, Error)]
pub enum OverpassError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("Configuration file not found: {path}")]
    ConfigNotFound { path: PathBuf },

    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    #[error("Transport error{}: {message}", .status.map(|s| format!(" ({s})")).unwrap_or_default())]
    Transport {
        status: Option<u16>,
        message: String,
    },

    #[error("General error: {message}")]
    General { message: String },
}

impl OverpassError {
    /// Create a new invalid configuration error
    pub fn invalid_config<S: Into<String>>(message: S) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Create a transport error for a request that never produced a usable response
    pub fn transport<S: Into<String>>(status: Option<u16>, message: S) -> Self {
        Self::Transport {
            status,
            message: message.into(),
        }
    }

    /// Create a new general error
    pub fn general<S: Into<String>>(message: S) -> Self {
        Self::General {
            message: message.into(),
        }
    }

    /// Get a user-friendly message for command line display
    pub fn user_message(&self) -> String {
        match self {
            Self::Http(e) if e.is_timeout() => {
                "The Overpass API did not answer in time (request timed out)".to_string()
            }
            Self::Http(e) if e.is_connect() => format!(
                "Request rejected: could not reach the server ({e})"
            ),
            Self::ConfigNotFound { path } => format!(
                "Configuration file not found: {}. Run `turbo init` to create one",
                path.display()
            ),
            Self::Transport {
                status: Some(status),
                message,
            } => format!("Error-Code: {message} ({status})"),
            _ => self.to_string(),
        }
    }
}
