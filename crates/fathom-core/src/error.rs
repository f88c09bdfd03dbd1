use thiserror::Error;

/// Result type alias used across the Fathom crates.
pub type Result<T> = std::result::Result<T, FathomError>;

/// The closed error taxonomy of the client core.
///
/// Every failure a caller can observe is one of these four kinds. The core
/// never retries, suppresses, or downgrades an error internally; retry policy
/// belongs entirely to the caller.
#[derive(Debug, Error)]
pub enum FathomError {
    /// The session could not be established or maintained. May be transient;
    /// retryable at the caller's discretion.
    #[error("connection error: {0}")]
    Connection(String),

    /// An operation was attempted while the connection was closed. Caller
    /// error; open the connection first.
    #[error("not connected: the connection must be open before issuing operations")]
    NotConnected,

    /// The request failed validation before any I/O. The message names the
    /// first missing or invalid field.
    #[error("validation error: {0}")]
    Validation(String),

    /// The endpoint answered with an explicit failure envelope, or the
    /// transport failed mid-operation. The original message is preserved.
    #[error("remote error: {0}")]
    Remote(String),
}

impl FathomError {
    /// Whether retrying the same call unchanged can ever succeed.
    ///
    /// `Connection` and `Remote` failures may be transient; `NotConnected`
    /// and `Validation` require the caller to fix something first.
    pub fn is_retryable(&self) -> bool {
        matches!(self, FathomError::Connection(_) | FathomError::Remote(_))
    }
}
