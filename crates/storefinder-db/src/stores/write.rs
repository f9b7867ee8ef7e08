//! Write operations for the `stores` table.

use sqlx::PgPool;
use storefinder_core::NewStore;

/// Insert a store and return its generated `id`.
///
/// The caller is expected to have run [`NewStore::validate`]; the table's
/// `NOT NULL` and coordinate `CHECK` constraints are the last line.
///
/// # Errors
///
/// Returns [`sqlx::Error`] if the insert fails.
pub async fn insert_store(pool: &PgPool, store: &NewStore) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar::<_, i64>(
        "INSERT INTO stores \
             (name, street, number, neighborhood, city, state, postal_code, latitude, longitude) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) \
         RETURNING id",
    )
    .bind(&store.name)
    .bind(&store.street)
    .bind(&store.number)
    .bind(&store.neighborhood)
    .bind(&store.city)
    .bind(&store.state)
    .bind(&store.postal_code)
    .bind(store.latitude)
    .bind(store.longitude)
    .fetch_one(pool)
    .await
}
