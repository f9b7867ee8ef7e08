//! Live integration tests for storefinder-db using `#[sqlx::test]`.
//!
//! Each test gets a fresh, fully-migrated Postgres database spun up by the
//! sqlx test harness (`DATABASE_URL` must point at a server the harness can
//! create databases on). The `migrations` path is relative to the crate root
//! (`crates/storefinder-db/`), so `"../../migrations"` resolves to the
//! workspace migration directory.

use storefinder_core::{NewStore, StoreRepository};
use storefinder_db::{insert_store, list_stores, PgStoreRepository};

fn new_store(name: &str, latitude: f64, longitude: f64) -> NewStore {
    NewStore {
        name: name.to_string(),
        street: "Rua das Flores".to_string(),
        number: "42".to_string(),
        neighborhood: "Centro".to_string(),
        city: "Curitiba".to_string(),
        state: "PR".to_string(),
        postal_code: "80020-090".to_string(),
        latitude,
        longitude,
    }
}

#[sqlx::test(migrations = "../../migrations")]
#[ignore = "requires a Postgres DATABASE_URL"]
async fn insert_store_returns_increasing_ids(pool: sqlx::PgPool) {
    let first = insert_store(&pool, &new_store("First", -25.43, -49.27))
        .await
        .expect("insert first");
    let second = insert_store(&pool, &new_store("Second", -25.44, -49.28))
        .await
        .expect("insert second");
    assert!(second > first, "ids must be monotonic: {first} then {second}");
}

#[sqlx::test(migrations = "../../migrations")]
#[ignore = "requires a Postgres DATABASE_URL"]
async fn list_stores_returns_rows_in_insertion_order(pool: sqlx::PgPool) {
    for name in ["Alpha", "Bravo", "Charlie"] {
        insert_store(&pool, &new_store(name, -25.43, -49.27))
            .await
            .unwrap_or_else(|e| panic!("insert {name} failed: {e}"));
    }

    let rows = list_stores(&pool).await.expect("list stores");
    let names: Vec<&str> = rows.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, ["Alpha", "Bravo", "Charlie"]);
}

#[sqlx::test(migrations = "../../migrations")]
#[ignore = "requires a Postgres DATABASE_URL"]
async fn coordinate_check_constraint_rejects_out_of_range_latitude(pool: sqlx::PgPool) {
    let result = insert_store(&pool, &new_store("Nowhere", 91.0, 0.0)).await;
    assert!(result.is_err(), "latitude 91 must violate the CHECK constraint");
}

#[sqlx::test(migrations = "../../migrations")]
#[ignore = "requires a Postgres DATABASE_URL"]
async fn pg_repository_round_trips_through_trait(pool: sqlx::PgPool) {
    let repo = PgStoreRepository::new(pool);
    repo.ping().await.expect("ping");

    let id = repo
        .insert(&new_store("Trait Store", -23.55, -46.63))
        .await
        .expect("insert via trait");
    let all = repo.list_all().await.expect("list via trait");

    assert_eq!(all.len(), 1);
    assert_eq!(all[0].id, id);
    assert_eq!(all[0].name, "Trait Store");
    assert!((all[0].longitude - -46.63).abs() < 1e-9);
}
