use thiserror::Error;

/// Unified error type for pocket-translator-core
///
/// This enum encompasses all error cases that can occur in the library:
/// - Translation operations (credentials, upstream failures, unreadable bodies, transport)
/// - Configuration operations (loading, saving, validation)
/// - General I/O operations
///
/// None of these are fatal: the coordinator flattens every variant into a
/// failure value before it reaches the caller.
#[derive(Error, Debug)]
pub enum Error {
    // ==========================================================================
    // Translation Errors
    // ==========================================================================
    /// Provider needs secrets that are not configured
    #[error("{provider} {fields} is missing")]
    MissingCredentials {
        provider: &'static str,
        fields: &'static str,
    },

    /// The remote service answered with an explicit error code
    #[error("{provider} error: {code}{}", message.as_ref().map(|m| format!(" - {m}")).unwrap_or_default())]
    Upstream {
        provider: &'static str,
        code: String,
        message: Option<String>,
    },

    /// The response body could not be interpreted
    #[error("failed to parse {provider} response: {reason}")]
    UpstreamParse {
        provider: &'static str,
        reason: String,
    },

    /// Connection-level failure from the HTTP layer
    #[error("translation request failed: {0}")]
    Transport(String),

    /// Translation request timed out
    #[error("translation request timed out")]
    TranslationTimeout,

    /// Nothing to translate
    #[error("text to translate is empty")]
    EmptyText,

    // ==========================================================================
    // Configuration Errors
    // ==========================================================================
    /// Failed to load configuration file
    #[error("failed to load config: {0}")]
    ConfigLoad(String),

    /// Failed to persist settings
    #[error("failed to save settings: {0}")]
    ConfigSave(String),

    /// Invalid configuration value
    #[error("invalid config value for '{field}': {reason}")]
    ConfigInvalid { field: String, reason: String },

    // ==========================================================================
    // I/O Errors
    // ==========================================================================
    /// General I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Coarse classification of [`Error`], carried by failure results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    MissingCredentials,
    Upstream,
    UpstreamParse,
    Transport,
    InvalidRequest,
    Config,
}

impl Error {
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::MissingCredentials { .. } => ErrorKind::MissingCredentials,
            Self::Upstream { .. } => ErrorKind::Upstream,
            Self::UpstreamParse { .. } => ErrorKind::UpstreamParse,
            Self::Transport(_) | Self::TranslationTimeout => ErrorKind::Transport,
            Self::EmptyText => ErrorKind::InvalidRequest,
            Self::ConfigLoad(_) | Self::ConfigSave(_) | Self::ConfigInvalid { .. } | Self::Io(_) => {
                ErrorKind::Config
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
