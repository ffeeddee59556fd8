use async_trait::async_trait;
use shared::models::Store;
use sqlx::PgPool;

use super::{RepoResult, StoreRepository};

/// `tiendas` table (read-only reference data)
#[derive(Clone)]
pub struct PgStoreRepository {
    pool: PgPool,
}

impl PgStoreRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl StoreRepository for PgStoreRepository {
    async fn list_active(&self) -> RepoResult<Vec<Store>> {
        let stores = sqlx::query_as(
            "SELECT id_tienda, nombre, activo FROM tiendas WHERE activo ORDER BY id_tienda ASC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(stores)
    }

    async fn find_active(&self, id_tienda: i64) -> RepoResult<Option<Store>> {
        let store = sqlx::query_as(
            "SELECT id_tienda, nombre, activo FROM tiendas WHERE id_tienda = $1 AND activo",
        )
        .bind(id_tienda)
        .fetch_optional(&self.pool)
        .await?;
        Ok(store)
    }
}
