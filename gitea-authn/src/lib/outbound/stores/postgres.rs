use async_trait::async_trait;
use auth::CachedCredential;
use auth::Labels;
use auth::Principal;
use auth::TokenStore;
use auth::TokenStoreError;
use chrono::DateTime;
use chrono::Utc;
use sqlx::types::Json;
use sqlx::PgPool;
use sqlx::Row;

pub struct PostgresTokenStore {
    pool: PgPool,
}

impl PostgresTokenStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TokenStore for PostgresTokenStore {
    async fn get(&self, principal: &Principal) -> Result<Option<CachedCredential>, TokenStoreError> {
        let row = sqlx::query(
            r#"
            SELECT proof_hash, valid_until, labels
            FROM cached_credentials
            WHERE principal = $1
            "#,
        )
        .bind(principal.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| TokenStoreError::Unavailable(e.to_string()))?;

        match row {
            Some(r) => {
                let proof_hash: String = r
                    .try_get("proof_hash")
                    .map_err(|e| TokenStoreError::Serialization(e.to_string()))?;
                let valid_until: DateTime<Utc> = r
                    .try_get("valid_until")
                    .map_err(|e| TokenStoreError::Serialization(e.to_string()))?;
                let Json(labels): Json<Labels> = r
                    .try_get("labels")
                    .map_err(|e| TokenStoreError::Serialization(e.to_string()))?;

                Ok(Some(CachedCredential {
                    principal: principal.clone(),
                    proof_hash,
                    valid_until,
                    labels,
                }))
            }
            None => Ok(None),
        }
    }

    async fn put(
        &self,
        record: CachedCredential,
        update_credential_hash: bool,
    ) -> Result<(), TokenStoreError> {
        let query = if update_credential_hash {
            r#"
            INSERT INTO cached_credentials (principal, proof_hash, valid_until, labels)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (principal) DO UPDATE
            SET proof_hash = EXCLUDED.proof_hash,
                valid_until = EXCLUDED.valid_until,
                labels = EXCLUDED.labels
            "#
        } else {
            r#"
            INSERT INTO cached_credentials (principal, proof_hash, valid_until, labels)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (principal) DO UPDATE
            SET valid_until = EXCLUDED.valid_until,
                labels = EXCLUDED.labels
            "#
        };

        sqlx::query(query)
            .bind(record.principal.as_str())
            .bind(&record.proof_hash)
            .bind(record.valid_until)
            .bind(Json(&record.labels))
            .execute(&self.pool)
            .await
            .map_err(|e| TokenStoreError::Unavailable(e.to_string()))?;

        Ok(())
    }

    async fn close(&self) {
        self.pool.close().await;
    }
}
