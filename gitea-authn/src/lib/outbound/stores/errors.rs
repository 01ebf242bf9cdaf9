use thiserror::Error;

/// Errors raised while opening the configured token store backend.
#[derive(Debug, Error)]
pub enum StoreSetupError {
    #[error("Unsupported token store URL, expected `memory` or a postgres:// URL")]
    UnsupportedUrl,

    #[error("Failed to connect to token store: {0}")]
    Connect(#[from] sqlx::Error),

    #[error("Token store migration failed: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}
