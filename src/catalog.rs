//! The remote catalog seam.
//!
//! [`CatalogClient`] covers the three documents the aggregator needs and
//! [`SpriteResolver`] the best-effort image lookup. [`HttpCatalogClient`]
//! implements both against PokeAPI.

pub mod http;
#[cfg(test)]
pub mod mock;

pub use http::HttpCatalogClient;

use crate::errors::CatalogResult;
use async_trait::async_trait;
use schema::{PokemonRecord, SpeciesRecord, TypeRecord};

#[async_trait]
pub trait CatalogClient: Send + Sync {
    /// Fetch the primary record for a normalized name or numeric id.
    ///
    /// Any non-success status is reported as [`crate::CatalogError::NotFound`].
    async fn fetch_primary(&self, name: &str) -> CatalogResult<PokemonRecord>;

    /// Fetch the species record at `url` (taken from the primary record).
    async fn fetch_species(&self, url: &str) -> CatalogResult<SpeciesRecord>;

    /// Fetch the type record at `url` (taken from one of the primary record's type slots).
    async fn fetch_type_relation(&self, url: &str) -> CatalogResult<TypeRecord>;
}

/// Image enrichment. Never fails: anything that goes wrong is `None`.
#[async_trait]
pub trait SpriteResolver: Send + Sync {
    async fn resolve_image(&self, display_name: &str) -> Option<String>;
}
