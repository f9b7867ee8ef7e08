//! Read operations for the `stores` table.

use sqlx::PgPool;

use super::types::StoreRow;

/// Return every store, ordered by `id ASC` (insertion order).
///
/// This is a full-table scan; proximity search filters the result in memory.
///
/// # Errors
///
/// Returns [`sqlx::Error`] if the query fails.
pub async fn list_stores(pool: &PgPool) -> Result<Vec<StoreRow>, sqlx::Error> {
    sqlx::query_as::<_, StoreRow>(
        "SELECT id, name, street, number, neighborhood, city, state, postal_code, \
                latitude, longitude, created_at \
         FROM stores \
         ORDER BY id ASC",
    )
    .fetch_all(pool)
    .await
}
