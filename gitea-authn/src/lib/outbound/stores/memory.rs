use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use auth::CachedCredential;
use auth::Principal;
use auth::TokenStore;
use auth::TokenStoreError;
use tokio::sync::RwLock;

/// Process-local credential cache.
///
/// Expired records are kept until overwritten; expiry is checked by the authenticator.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTokenStore {
    /// Map of principal -> latest cached credential
    records: Arc<RwLock<HashMap<String, CachedCredential>>>,
}

impl InMemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of principals with a cached record.
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

#[async_trait]
impl TokenStore for InMemoryTokenStore {
    async fn get(&self, principal: &Principal) -> Result<Option<CachedCredential>, TokenStoreError> {
        Ok(self.records.read().await.get(principal.as_str()).cloned())
    }

    async fn put(
        &self,
        mut record: CachedCredential,
        update_credential_hash: bool,
    ) -> Result<(), TokenStoreError> {
        let mut records = self.records.write().await;

        if !update_credential_hash {
            if let Some(existing) = records.get(record.principal.as_str()) {
                record.proof_hash = existing.proof_hash.clone();
            }
        }

        records.insert(record.principal.as_str().to_string(), record);
        Ok(())
    }

    async fn close(&self) {
        self.records.write().await.clear();
    }
}
