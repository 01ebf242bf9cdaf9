use async_trait::async_trait;
use secrecy::SecretString;

use super::errors::ResolverError;
use super::errors::TokenStoreError;
use super::models::CachedCredential;
use super::models::Principal;

/// Persistence of validated-credential proofs, keyed by principal.
///
/// Implementations must tolerate concurrent callers. Two writes for the same principal may
/// race; the last writer wins.
#[async_trait]
pub trait TokenStore: Send + Sync + 'static {
    /// Retrieve the cached credential for a principal.
    ///
    /// # Arguments
    /// * `principal` - Cache key
    ///
    /// # Returns
    /// Optional cached credential (None if absent)
    ///
    /// # Errors
    /// * `Unavailable` - Backing store could not be reached
    /// * `Serialization` - Stored record could not be decoded
    async fn get(&self, principal: &Principal) -> Result<Option<CachedCredential>, TokenStoreError>;

    /// Insert or overwrite the cached credential for `record.principal`.
    ///
    /// # Arguments
    /// * `record` - Record to store
    /// * `update_credential_hash` - When false and a record already exists, keep its proof
    ///   hash and only replace labels and expiry
    ///
    /// # Errors
    /// * `Unavailable` - Backing store could not be reached
    /// * `Serialization` - Record could not be encoded
    async fn put(
        &self,
        record: CachedCredential,
        update_credential_hash: bool,
    ) -> Result<(), TokenStoreError>;

    /// Release connections held by the store.
    async fn close(&self);
}

/// Remote lookup of a principal's organization memberships.
#[async_trait]
pub trait MembershipResolver: Send + Sync + 'static {
    /// Short provider name used in logs.
    fn name(&self) -> &'static str;

    /// Authenticate against the remote provider and list the principal's organizations.
    ///
    /// # Arguments
    /// * `principal` - Identity to authenticate
    /// * `credential` - Raw credential, sent as transport-level authentication
    ///
    /// # Returns
    /// Organization names, in the order the provider returned them
    ///
    /// # Errors
    /// * `Unauthorized` - Provider rejected the credential
    /// * `Unavailable` - Transport failure, timeout, or unexpected status
    /// * `MalformedResponse` - Response body could not be parsed
    async fn resolve(
        &self,
        principal: &Principal,
        credential: &SecretString,
    ) -> Result<Vec<String>, ResolverError>;
}
