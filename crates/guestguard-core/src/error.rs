//! Shared error types across guestguard crates.

use thiserror::Error;

/// Shared result type.
pub type Result<T> = std::result::Result<T, GuestGuardError>;

/// Why a connect-params fetch produced no record.
///
/// Every variant is recovered at the cache boundary: the caller sees "no policy
/// available" and the decision operations fall back to their permissive default.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchFailure {
    /// No local account owns the extension and no default account is configured.
    #[error("no route to a controller for this extension")]
    NoRoute,
    /// Controller answered with a non-success status.
    #[error("controller returned http status {status}")]
    HttpError { status: u16 },
    /// Response body was empty or could not be read.
    #[error("controller returned an empty body")]
    EmptyBody,
    /// Response body is not a well-formed params object.
    #[error("malformed connect params: {0}")]
    ParseError(String),
    /// Well-formed payload lacking one of the mandatory fields.
    #[error("connect params missing field `{name}`")]
    MissingField { name: &'static str },
    /// Connection, TLS or timeout failure below HTTP.
    #[error("transport: {0}")]
    Transport(String),
}

impl FetchFailure {
    /// Stable label used in logs and metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            FetchFailure::NoRoute => "no_route",
            FetchFailure::HttpError { .. } => "http_error",
            FetchFailure::EmptyBody => "empty_body",
            FetchFailure::ParseError(_) => "parse_error",
            FetchFailure::MissingField { .. } => "missing_field",
            FetchFailure::Transport(_) => "transport",
        }
    }
}

/// Construction-time error (config, client setup).
#[derive(Debug, Error)]
pub enum GuestGuardError {
    #[error("config: {0}")]
    Config(String),
    #[error("unsupported config version")]
    UnsupportedVersion,
    #[error("transport: {0}")]
    Transport(String),
}
