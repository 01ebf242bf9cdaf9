pub mod argon2;
pub mod errors;
pub mod plain;

pub use argon2::ProofHasher;
pub use argon2::ProofVerification;
pub use errors::ProofError;
pub use plain::PlainProof;
