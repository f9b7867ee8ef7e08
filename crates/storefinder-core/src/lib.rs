//! Domain types, configuration, and the store repository seam shared by
//! every `storefinder` crate.

pub mod app_config;
pub mod config;
pub mod location;
pub mod repository;
pub mod stores;

use thiserror::Error;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use location::{Coordinates, PostalAddress, RankedStore};
pub use repository::{RepositoryError, StoreRepository};
pub use stores::{NewStore, StoreRecord};

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid {field}: {reason}")]
    Validation { field: &'static str, reason: String },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
