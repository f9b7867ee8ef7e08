//! Persistence seam for store records.

use async_trait::async_trait;
use thiserror::Error;

use crate::stores::{NewStore, StoreRecord};

/// Failure reported by a [`StoreRepository`] backend.
#[derive(Debug, Error)]
#[error("store repository error: {0}")]
pub struct RepositoryError(#[source] pub Box<dyn std::error::Error + Send + Sync>);

impl RepositoryError {
    pub fn new<E>(source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self(Box::new(source))
    }
}

/// Inserts and lists store records.
///
/// Implementations must return `list_all` in insertion order; proximity
/// ranking relies on it to break distance ties.
#[async_trait]
pub trait StoreRepository: Send + Sync {
    /// Persists a validated store and returns its assigned id.
    async fn insert(&self, store: &NewStore) -> Result<i64, RepositoryError>;

    /// Returns every stored record, oldest first.
    async fn list_all(&self) -> Result<Vec<StoreRecord>, RepositoryError>;

    /// Verifies the backend is reachable.
    async fn ping(&self) -> Result<(), RepositoryError> {
        Ok(())
    }
}
