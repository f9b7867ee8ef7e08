//! Store catalog command handlers for the CLI.
//!
//! Called from `main` once config is loaded and the pool is connected.

use std::sync::Arc;

use clap::Args;
use storefinder_core::{AppConfig, NewStore, StoreRepository};
use storefinder_db::PgStoreRepository;
use storefinder_geo::ProximityResolver;

/// Arguments for `add-store`. Every field is required.
#[derive(Debug, Args)]
pub struct AddStoreArgs {
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub street: String,
    #[arg(long)]
    pub number: String,
    #[arg(long)]
    pub neighborhood: String,
    #[arg(long)]
    pub city: String,
    /// Two-letter state code (e.g., SP)
    #[arg(long)]
    pub state: String,
    #[arg(long)]
    pub postal_code: String,
    /// Decimal degrees, -90 to 90
    #[arg(long, allow_negative_numbers = true)]
    pub latitude: f64,
    /// Decimal degrees, -180 to 180
    #[arg(long, allow_negative_numbers = true)]
    pub longitude: f64,
}

impl From<AddStoreArgs> for NewStore {
    fn from(args: AddStoreArgs) -> Self {
        Self {
            name: args.name,
            street: args.street,
            number: args.number,
            neighborhood: args.neighborhood,
            city: args.city,
            state: args.state,
            postal_code: args.postal_code,
            latitude: args.latitude,
            longitude: args.longitude,
        }
    }
}

/// Validate and insert a store, printing the assigned id.
///
/// # Errors
///
/// Returns an error if validation fails or the insert fails.
pub(crate) async fn run_add_store(pool: sqlx::PgPool, args: AddStoreArgs) -> anyhow::Result<()> {
    let store = NewStore::from(args).trimmed();
    store.validate()?;

    let repo = PgStoreRepository::new(pool);
    let id = repo.insert(&store).await?;
    println!("added store {id}: {}", store.name);
    Ok(())
}

/// Run a proximity search and print the ranked stores as pretty JSON.
///
/// # Errors
///
/// Returns an error if the search fails, including when no store lies
/// within the radius.
pub(crate) async fn run_nearby(
    config: &AppConfig,
    pool: sqlx::PgPool,
    postal_code: &str,
    radius_km: Option<f64>,
) -> anyhow::Result<()> {
    let stores: Arc<dyn StoreRepository> = Arc::new(PgStoreRepository::new(pool));
    let resolver = ProximityResolver::from_app_config(config, stores)?;

    let ranked = match radius_km {
        Some(radius_km) => resolver.find_nearby(postal_code, radius_km).await?,
        None => resolver.find_nearby_default(postal_code).await?,
    };
    println!("{}", serde_json::to_string_pretty(&ranked)?);
    Ok(())
}
