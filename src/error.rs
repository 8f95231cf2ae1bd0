//! Error types.
//!
//! - `FetchError` / `TransportError`: typed failures of the listing API core.
//! - `AppError`: the binary boundary, carrying a process exit code.

use thiserror::Error;

use crate::config::ConfigError;
use crate::telemetry::TelemetryError;

/// A single failed HTTP exchange, as observed by the request executor.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    #[error("request timed out: {0}")]
    Timeout(String),

    #[error("connection error: {0}")]
    Connect(String),

    /// The server answered, but not with a 2xx status.
    #[error("HTTP status {status}")]
    Status { status: u16 },

    #[error("failed to read response body: {0}")]
    Body(String),

    #[error("request failed: {0}")]
    Other(String),
}

/// Failures of a registry lookup or an upstream listing request.
#[derive(Debug, Clone, Error)]
pub enum FetchError {
    #[error("unknown listing category: '{id}'")]
    UnknownCategory { id: String },

    #[error("invalid request: {reason}")]
    InvalidRequest { reason: String },

    /// Every retry attempt failed; `last` is the final transport or status failure.
    #[error("{endpoint}: giving up after {attempts} attempts ({last})")]
    RequestExhausted {
        endpoint: String,
        attempts: u32,
        #[source]
        last: TransportError,
    },

    #[error("{endpoint}: malformed response: {reason}")]
    MalformedResponse { endpoint: String, reason: String },
}

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        AppError::new(2, format!("Configuration error: {value}"))
    }
}

impl From<TelemetryError> for AppError {
    fn from(value: TelemetryError) -> Self {
        AppError::new(2, value.to_string())
    }
}

impl From<FetchError> for AppError {
    fn from(value: FetchError) -> Self {
        let exit_code = match value {
            FetchError::UnknownCategory { .. } | FetchError::InvalidRequest { .. } => 2,
            FetchError::RequestExhausted { .. } | FetchError::MalformedResponse { .. } => 4,
        };
        AppError::new(exit_code, value.to_string())
    }
}
