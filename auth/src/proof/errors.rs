use thiserror::Error;

/// Error type for credential proof operations.
#[derive(Debug, Clone, Error)]
pub enum ProofError {
    #[error("Proof hashing failed: {0}")]
    HashingFailed(String),

    #[error("Invalid hasher parameters: {0}")]
    InvalidParameters(String),
}
