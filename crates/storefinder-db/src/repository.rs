use async_trait::async_trait;
use sqlx::PgPool;
use storefinder_core::{NewStore, RepositoryError, StoreRecord, StoreRepository};

use crate::{health_check, stores};

/// [`StoreRepository`] backed by the Postgres `stores` table.
#[derive(Debug, Clone)]
pub struct PgStoreRepository {
    pool: PgPool,
}

impl PgStoreRepository {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl StoreRepository for PgStoreRepository {
    async fn insert(&self, store: &NewStore) -> Result<i64, RepositoryError> {
        let id = stores::insert_store(&self.pool, store)
            .await
            .map_err(RepositoryError::new)?;
        tracing::info!(store_id = id, name = %store.name, "store registered");
        Ok(id)
    }

    async fn list_all(&self) -> Result<Vec<StoreRecord>, RepositoryError> {
        let rows = stores::list_stores(&self.pool)
            .await
            .map_err(RepositoryError::new)?;
        Ok(rows.into_iter().map(StoreRecord::from).collect())
    }

    async fn ping(&self) -> Result<(), RepositoryError> {
        health_check(&self.pool).await.map_err(RepositoryError::new)
    }
}
