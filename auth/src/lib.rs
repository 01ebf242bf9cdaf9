//! Authentication utilities library
//!
//! Reusable building blocks for registry authenticator plugins that delegate to a remote
//! identity provider:
//! - Credential proofs (Argon2id) bound to a principal
//! - Credential cache and membership resolver ports
//! - A caching authenticator that only calls the remote provider on a miss or after the
//!   revalidation window
//!
//! Each plugin supplies its own resolver and store implementations.
//!
//! # Examples
//!
//! ## Credential Proofs
//! ```
//! use auth::{PlainProof, ProofHasher};
//! use secrecy::SecretString;
//!
//! let hasher = ProofHasher::new();
//! let proof = PlainProof::new("alice", &SecretString::from("s3cret".to_string()));
//! let hash = hasher.hash(&proof).unwrap();
//! assert!(hasher.verify(&proof, &hash).is_match());
//! ```
//!
//! ## Labels
//! ```
//! use auth::Labels;
//!
//! let labels = Labels::from_groups(vec!["teamA".to_string()]);
//! assert_eq!(labels.groups(), ["teamA".to_string()]);
//! ```

pub mod authenticator;
pub mod credential;
pub mod proof;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::Authenticator;
pub use authenticator::AuthenticatorSettings;
pub use credential::CachedCredential;
pub use credential::Labels;
pub use credential::MembershipResolver;
pub use credential::Principal;
pub use credential::PrincipalError;
pub use credential::ResolverError;
pub use credential::TokenStore;
pub use credential::TokenStoreError;
pub use proof::PlainProof;
pub use proof::ProofError;
pub use proof::ProofHasher;
pub use proof::ProofVerification;
