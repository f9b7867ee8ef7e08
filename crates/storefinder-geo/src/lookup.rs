//! Upstream lookup seams injected into the resolver.

use async_trait::async_trait;
use storefinder_core::{Coordinates, PostalAddress};

use crate::error::LookupError;

/// Resolves a postal code to a structured address.
#[async_trait]
pub trait PostalLookup: Send + Sync {
    /// # Errors
    ///
    /// [`LookupError::NotFound`] when the directory has no such code; any
    /// other variant when the directory could not be used.
    async fn resolve(&self, postal_code: &str) -> Result<PostalAddress, LookupError>;
}

/// Resolves a free-text address to coordinates.
#[async_trait]
pub trait Geocoder: Send + Sync {
    /// # Errors
    ///
    /// [`LookupError::NotFound`] when the geocoder returns no candidates; any
    /// other variant when the geocoder could not be used.
    async fn resolve(&self, address: &str) -> Result<Coordinates, LookupError>;
}
