use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use chrono::DateTime;
use chrono::TimeDelta;
use chrono::Utc;
use secrecy::SecretString;

use crate::credential::CachedCredential;
use crate::credential::Labels;
use crate::credential::MembershipResolver;
use crate::credential::Principal;
use crate::credential::ResolverError;
use crate::credential::TokenStore;
use crate::credential::TokenStoreError;
use crate::proof::PlainProof;
use crate::proof::ProofHasher;
use crate::proof::ProofVerification;

/// Authentication coordinator combining the credential cache and the remote resolver.
///
/// A successful remote authentication is remembered as a salted proof with an expiry, so
/// repeated logins inside the revalidation window never reach the remote provider. Holds no
/// mutable state of its own: every call is independent and may run concurrently.
pub struct Authenticator<TS, MR>
where
    TS: TokenStore,
    MR: MembershipResolver,
{
    token_store: Arc<TS>,
    resolver: Arc<MR>,
    proof_hasher: ProofHasher,
    settings: AuthenticatorSettings,
}

/// Timing knobs for the credential cache.
#[derive(Debug, Clone, Copy)]
pub struct AuthenticatorSettings {
    /// Time after which a cached positive result must be re-checked remotely.
    pub revalidate_after: Duration,
    /// Upper bound for a single token store read or write.
    pub store_timeout: Duration,
}

/// Authentication operation errors.
///
/// Messages never include credentials or stored proofs.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Wrong credential")]
    WrongCredential,

    #[error("Remote provider unavailable: {0}")]
    RemoteUnavailable(String),

    #[error("Malformed remote response: {0}")]
    MalformedRemoteResponse(String),
}

impl AuthenticationError {
    /// Whether the caller may retry the same request later.
    ///
    /// `WrongCredential` is final; operational failures are not.
    pub fn is_retryable(&self) -> bool {
        !matches!(self, AuthenticationError::WrongCredential)
    }
}

impl From<ResolverError> for AuthenticationError {
    fn from(err: ResolverError) -> Self {
        match err {
            ResolverError::Unauthorized => AuthenticationError::WrongCredential,
            ResolverError::Unavailable(detail) => AuthenticationError::RemoteUnavailable(detail),
            ResolverError::MalformedResponse(detail) => {
                AuthenticationError::MalformedRemoteResponse(detail)
            }
        }
    }
}

impl<TS, MR> Authenticator<TS, MR>
where
    TS: TokenStore,
    MR: MembershipResolver,
{
    /// Create a new authenticator with injected collaborators.
    ///
    /// # Arguments
    /// * `token_store` - Credential cache implementation
    /// * `resolver` - Remote membership lookup implementation
    /// * `proof_hasher` - Hasher used for stored proofs
    /// * `settings` - Revalidation window and store timeout
    ///
    /// # Returns
    /// Configured Authenticator instance
    pub fn new(
        token_store: Arc<TS>,
        resolver: Arc<MR>,
        proof_hasher: ProofHasher,
        settings: AuthenticatorSettings,
    ) -> Self {
        Self {
            token_store,
            resolver,
            proof_hasher,
            settings,
        }
    }

    /// Name of the remote provider behind this authenticator.
    pub fn provider_name(&self) -> &'static str {
        self.resolver.name()
    }

    /// Authenticate a principal, from cache when possible.
    ///
    /// A cached proof that does not match the credential is rejected without a remote call,
    /// even once the record has expired. After a credential change upstream the principal stays
    /// rejected until the stale record is removed from the token store by its operator.
    ///
    /// # Arguments
    /// * `principal` - Identity to authenticate
    /// * `credential` - Raw credential
    ///
    /// # Returns
    /// Labels earned by the principal; always includes `group`
    ///
    /// # Errors
    /// * `WrongCredential` - Cached proof mismatch, or the remote provider rejected the credential
    /// * `RemoteUnavailable` - Remote lookup failed or timed out
    /// * `MalformedRemoteResponse` - Remote answer could not be parsed
    pub async fn authenticate(
        &self,
        principal: &Principal,
        credential: &SecretString,
    ) -> Result<Labels, AuthenticationError> {
        let plain_proof = Arc::new(PlainProof::new(principal.as_str(), credential));

        let verified_proof = match self.cached_credential(principal).await {
            Some(record) => match self.verify(&plain_proof, &record.proof_hash).await {
                ProofVerification::Mismatched => {
                    tracing::debug!(principal = %principal, "Cached proof mismatch");
                    return Err(AuthenticationError::WrongCredential);
                }
                ProofVerification::Malformed => {
                    tracing::warn!(
                        principal = %principal,
                        "Cached proof is malformed, treating as cache miss"
                    );
                    None
                }
                ProofVerification::Matched if record.is_valid_at(Utc::now()) => {
                    tracing::debug!(principal = %principal, "Credential cache hit");
                    return Ok(record.labels);
                }
                ProofVerification::Matched => {
                    tracing::debug!(
                        principal = %principal,
                        valid_until = %record.valid_until,
                        "Cached credential expired, revalidating"
                    );
                    Some(record.proof_hash)
                }
            },
            None => {
                tracing::debug!(principal = %principal, "Credential cache miss");
                None
            }
        };

        let groups = self
            .resolver
            .resolve(principal, credential)
            .await
            .map_err(|e| {
                if e != ResolverError::Unauthorized {
                    tracing::warn!(
                        principal = %principal,
                        provider = self.resolver.name(),
                        error = %e,
                        "Remote membership lookup failed"
                    );
                }
                AuthenticationError::from(e)
            })?;

        let labels = Labels::from_groups(groups);
        self.refresh(principal, plain_proof, verified_proof, &labels)
            .await;

        Ok(labels)
    }

    /// Read the cached credential; store failures degrade to a miss.
    async fn cached_credential(&self, principal: &Principal) -> Option<CachedCredential> {
        match self.with_store_timeout(self.token_store.get(principal)).await {
            Ok(record) => record,
            Err(e) => {
                tracing::warn!(
                    principal = %principal,
                    error = %e,
                    "Token store read failed, falling back to remote lookup"
                );
                None
            }
        }
    }

    async fn verify(&self, plain_proof: &Arc<PlainProof>, stored: &str) -> ProofVerification {
        let hasher = self.proof_hasher.clone();
        let plain_proof = Arc::clone(plain_proof);
        let stored = stored.to_owned();

        match tokio::task::spawn_blocking(move || hasher.verify(&plain_proof, &stored)).await {
            Ok(verification) => verification,
            Err(e) => {
                tracing::error!(error = %e, "Proof verification task failed");
                ProofVerification::Malformed
            }
        }
    }

    /// Write-through after a successful remote check. Best effort: failures are logged only.
    async fn refresh(
        &self,
        principal: &Principal,
        plain_proof: Arc<PlainProof>,
        verified_proof: Option<String>,
        labels: &Labels,
    ) {
        let (proof_hash, update_credential_hash) = match verified_proof {
            Some(proof_hash) => (proof_hash, false),
            None => {
                let hasher = self.proof_hasher.clone();
                match tokio::task::spawn_blocking(move || hasher.hash(&plain_proof)).await {
                    Ok(Ok(proof_hash)) => (proof_hash, true),
                    Ok(Err(e)) => {
                        tracing::error!(principal = %principal, error = %e, "Failed to hash proof");
                        return;
                    }
                    Err(e) => {
                        tracing::error!(principal = %principal, error = %e, "Proof hashing task failed");
                        return;
                    }
                }
            }
        };

        let record = CachedCredential {
            principal: principal.clone(),
            proof_hash,
            valid_until: self.valid_until(Utc::now()),
            labels: labels.clone(),
        };

        match self
            .with_store_timeout(self.token_store.put(record, update_credential_hash))
            .await
        {
            Ok(()) => tracing::debug!(principal = %principal, "Credential cache refreshed"),
            Err(e) => tracing::warn!(
                principal = %principal,
                error = %e,
                "Failed to refresh credential cache"
            ),
        }
    }

    fn valid_until(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        let window = TimeDelta::from_std(self.settings.revalidate_after).unwrap_or(TimeDelta::MAX);
        now.checked_add_signed(window)
            .unwrap_or(DateTime::<Utc>::MAX_UTC)
    }

    async fn with_store_timeout<T, F>(&self, operation: F) -> Result<T, TokenStoreError>
    where
        F: Future<Output = Result<T, TokenStoreError>>,
    {
        tokio::time::timeout(self.settings.store_timeout, operation)
            .await
            .map_err(|_| TokenStoreError::Timeout(self.settings.store_timeout))?
    }
}
