mod stores;

use clap::{CommandFactory, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "storefinder-cli")]
#[command(about = "Store catalog and proximity search command line interface")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Apply pending database migrations
    Migrate,
    /// Register a store in the catalog
    AddStore(stores::AddStoreArgs),
    /// List stores near a postal code, nearest first
    Nearby {
        /// Brazilian postal code (CEP), with or without punctuation
        postal_code: String,
        /// Search radius in km (defaults to STOREFINDER_DEFAULT_RADIUS_KM)
        #[arg(long, allow_negative_numbers = true)]
        radius_km: Option<f64>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    let config = storefinder_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let pool_config = storefinder_db::PoolConfig::from_app_config(&config);
    let pool = storefinder_db::connect_pool(&config.database_url, pool_config).await?;

    match command {
        Commands::Migrate => {
            let applied = storefinder_db::run_migrations(&pool).await?;
            println!("applied {applied} migration(s)");
        }
        Commands::AddStore(args) => stores::run_add_store(pool, args).await?,
        Commands::Nearby {
            postal_code,
            radius_km,
        } => stores::run_nearby(&config, pool, &postal_code, radius_km).await?,
    }

    Ok(())
}
