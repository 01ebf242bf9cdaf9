use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::Error as PasswordHashError;
use argon2::password_hash::PasswordHash;
use argon2::password_hash::PasswordHasher as Argon2PasswordHasher;
use argon2::password_hash::PasswordVerifier;
use argon2::password_hash::SaltString;
use argon2::Algorithm;
use argon2::Argon2;
use argon2::Params;
use argon2::Version;

use super::errors::ProofError;
use super::plain::PlainProof;

/// Outcome of comparing a plain proof with a stored one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProofVerification {
    /// Stored proof was derived from the same principal and credential.
    Matched,
    /// Stored proof is well formed but belongs to a different credential.
    Mismatched,
    /// Stored proof could not be parsed or used.
    Malformed,
}

impl ProofVerification {
    pub fn is_match(self) -> bool {
        self == ProofVerification::Matched
    }
}

/// Credential proof hashing implementation.
///
/// Turns a [`PlainProof`] into a salted, one-way PHC string (internally uses Argon2id).
/// Hashing is intentionally expensive; callers on an async runtime should run it on a
/// blocking thread.
#[derive(Clone)]
pub struct ProofHasher {
    argon2: Argon2<'static>,
}

impl ProofHasher {
    /// Create a proof hasher with the Argon2 default parameters.
    pub fn new() -> Self {
        Self {
            argon2: Argon2::default(),
        }
    }

    /// Create a proof hasher with explicit Argon2id cost parameters.
    ///
    /// # Arguments
    /// * `memory_kib` - Memory cost in KiB
    /// * `iterations` - Number of passes
    /// * `parallelism` - Degree of parallelism
    ///
    /// # Errors
    /// * `InvalidParameters` - Parameters are outside the ranges Argon2 accepts
    pub fn with_params(
        memory_kib: u32,
        iterations: u32,
        parallelism: u32,
    ) -> Result<Self, ProofError> {
        let params = Params::new(memory_kib, iterations, parallelism, None)
            .map_err(|e| ProofError::InvalidParameters(e.to_string()))?;

        Ok(Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
        })
    }

    /// Hash a plain proof for storage.
    ///
    /// # Arguments
    /// * `plain_proof` - Encoded principal and credential
    ///
    /// # Returns
    /// PHC string format hash (includes algorithm, parameters, salt, and hash)
    ///
    /// # Errors
    /// * `HashingFailed` - Hashing operation failed
    pub fn hash(&self, plain_proof: &PlainProof) -> Result<String, ProofError> {
        let salt = SaltString::generate(&mut OsRng);

        self.argon2
            .hash_password(plain_proof.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| ProofError::HashingFailed(e.to_string()))
    }

    /// Verify a plain proof against a stored hash.
    ///
    /// Never fails: a stored value that cannot be parsed is reported as `Malformed`.
    /// The parameters embedded in the stored hash are used, so proofs written with other
    /// cost settings still verify. Output comparison is constant time.
    pub fn verify(&self, plain_proof: &PlainProof, stored: &str) -> ProofVerification {
        let parsed_hash = match PasswordHash::new(stored) {
            Ok(parsed_hash) => parsed_hash,
            Err(_) => return ProofVerification::Malformed,
        };

        match self
            .argon2
            .verify_password(plain_proof.as_bytes(), &parsed_hash)
        {
            Ok(()) => ProofVerification::Matched,
            Err(PasswordHashError::Password) => ProofVerification::Mismatched,
            Err(_) => ProofVerification::Malformed,
        }
    }
}

impl Default for ProofHasher {
    fn default() -> Self {
        Self::new()
    }
}
