//! Error types for the voter stake registry client.

use thiserror::Error;

/// Errors raised by the client library itself.
///
/// Failures coming out of the Anchor program binding are carried through
/// [`VsrClientError::Anchor`] without being reinterpreted.
#[derive(Debug, Error)]
pub enum VsrClientError {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("account decode failed: {0}")]
    Decode(String),

    #[error(transparent)]
    Anchor(#[from] anchor_client::ClientError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type VsrResult<T> = Result<T, VsrClientError>;
