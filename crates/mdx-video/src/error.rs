//! Error types for video extension setup

use thiserror::Error;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Errors raised while building a [`crate::VideoConfig`]
///
/// Matching itself never fails: a span that does not match, or whose captures
/// cannot be used, is left as plain text.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Option name has no default
    #[error("unknown option `{0}`")]
    UnknownOption(String),

    /// Option value cannot be rendered as a dimension
    #[error("invalid value for `{key}`: {reason}")]
    InvalidValue { key: String, reason: String },

    /// Extension spec names something other than `video`
    #[error("unknown extension `{0}`")]
    UnknownExtension(String),

    /// Extension spec or `key=value` override could not be parsed
    #[error("malformed option string: {0}")]
    Malformed(String),

    /// TOML parse errors
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// IO errors while reading a config file
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ConfigError {
    pub(crate) fn invalid(key: &str, reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            key: key.to_string(),
            reason: reason.into(),
        }
    }
}
