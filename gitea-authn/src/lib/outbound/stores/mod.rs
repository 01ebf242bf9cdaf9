pub mod errors;
pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use auth::CachedCredential;
use auth::Principal;
use auth::TokenStore;
use auth::TokenStoreError;
pub use errors::StoreSetupError;
pub use memory::InMemoryTokenStore;
pub use postgres::PostgresTokenStore;
use sqlx::postgres::PgPoolOptions;

use crate::config::TokenStoreConfig;

/// Token store selected at startup from `token_store.url`.
pub enum TokenStoreBackend {
    Memory(InMemoryTokenStore),
    Postgres(PostgresTokenStore),
}

impl TokenStoreBackend {
    /// Connect the backend described by the configuration.
    ///
    /// `memory` selects the in-process store; `postgres://` and `postgresql://` URLs connect a
    /// pool and run pending migrations.
    ///
    /// # Errors
    /// * `UnsupportedUrl` - Neither `memory` nor a Postgres URL
    /// * `Connect` - Pool could not reach the database
    /// * `Migration` - Pending migrations failed to apply
    pub async fn connect(config: &TokenStoreConfig) -> Result<Self, StoreSetupError> {
        if config.url == "memory" {
            return Ok(Self::Memory(InMemoryTokenStore::new()));
        }

        if !(config.url.starts_with("postgres://") || config.url.starts_with("postgresql://")) {
            return Err(StoreSetupError::UnsupportedUrl);
        }

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(config.timeout())
            .connect(&config.url)
            .await?;

        sqlx::migrate!("./migrations").run(&pool).await?;

        Ok(Self::Postgres(PostgresTokenStore::new(pool)))
    }

    pub fn kind(&self) -> &'static str {
        match self {
            TokenStoreBackend::Memory(_) => "memory",
            TokenStoreBackend::Postgres(_) => "postgresql",
        }
    }
}

#[async_trait]
impl TokenStore for TokenStoreBackend {
    async fn get(&self, principal: &Principal) -> Result<Option<CachedCredential>, TokenStoreError> {
        match self {
            TokenStoreBackend::Memory(store) => store.get(principal).await,
            TokenStoreBackend::Postgres(store) => store.get(principal).await,
        }
    }

    async fn put(
        &self,
        record: CachedCredential,
        update_credential_hash: bool,
    ) -> Result<(), TokenStoreError> {
        match self {
            TokenStoreBackend::Memory(store) => store.put(record, update_credential_hash).await,
            TokenStoreBackend::Postgres(store) => store.put(record, update_credential_hash).await,
        }
    }

    async fn close(&self) {
        match self {
            TokenStoreBackend::Memory(store) => store.close().await,
            TokenStoreBackend::Postgres(store) => store.close().await,
        }
    }
}
