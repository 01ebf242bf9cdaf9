use std::time::Duration;

use thiserror::Error;

/// Error for Principal validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PrincipalError {
    #[error("Principal must not be empty")]
    Empty,

    #[error("Principal contains control characters")]
    InvalidCharacters,
}

/// Error for token store operations.
///
/// Never carries credential material.
#[derive(Debug, Clone, Error)]
pub enum TokenStoreError {
    #[error("Token store unavailable: {0}")]
    Unavailable(String),

    #[error("Token store operation timed out after {0:?}")]
    Timeout(Duration),

    #[error("Failed to serialize cached credential: {0}")]
    Serialization(String),
}

/// Error for remote membership lookups
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ResolverError {
    /// Remote provider explicitly rejected the credential.
    #[error("Remote provider rejected the credential")]
    Unauthorized,

    /// Transport failure, timeout, or unexpected status.
    #[error("Remote provider unavailable: {0}")]
    Unavailable(String),

    #[error("Malformed response from remote provider: {0}")]
    MalformedResponse(String),
}
