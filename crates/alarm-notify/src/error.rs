//! Error types for the alarm forwarder.

use thiserror::Error;

/// Errors raised while resolving configuration at cold start.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required variable is unset or empty
    #[error("{0} environment variable not set")]
    Missing(&'static str),

    /// A variable is set but its value cannot be used
    #[error("invalid value for {name}: {reason}")]
    Invalid { name: &'static str, reason: String },
}

/// Errors raised while decoding an alarm payload.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DecodeError {
    /// Not JSON, and not enough comma-separated fields for the positional layout
    #[error("payload is not alarm JSON and has {found} comma-separated field(s), expected at least 2")]
    TooFewFields { found: usize },
}

/// Errors that fail an invocation.
#[derive(Debug, Error)]
pub enum NotifyError {
    /// The SNS envelope carried no records
    #[error("SNS event contained no records")]
    EmptyEnvelope,

    /// The embedded alarm payload could not be decoded
    #[error("failed to decode alarm payload: {0}")]
    Decode(#[from] DecodeError),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Webhook answered with something other than 200
    #[error("Slack returned {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },
}
