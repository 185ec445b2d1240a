use super::{CatalogClient, SpriteResolver};
use crate::config::CatalogConfig;
use crate::errors::{CatalogError, CatalogResult};
use async_trait::async_trait;
use schema::{PokemonRecord, SpeciesRecord, TypeRecord};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

/// [`CatalogClient`] backed by PokeAPI over HTTP.
#[derive(Debug, Clone)]
pub struct HttpCatalogClient {
    client: reqwest::Client,
    config: CatalogConfig,
}

impl HttpCatalogClient {
    pub fn new(config: CatalogConfig) -> CatalogResult<Self> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| CatalogError::transport("client", e))?;

        Ok(Self::with_client(client, config))
    }

    /// Use an already configured `reqwest::Client` (proxy, TLS or pool settings).
    pub fn with_client(client: reqwest::Client, config: CatalogConfig) -> Self {
        Self { client, config }
    }

    pub fn config(&self) -> &CatalogConfig {
        &self.config
    }

    /// One GET round trip. Non-success statuses come back as
    /// [`CatalogError::Status`]; callers decide what that means.
    async fn get_json<T: DeserializeOwned>(&self, url: &str, resource: &str) -> CatalogResult<T> {
        debug!(url, resource, "catalog request");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| CatalogError::transport(resource, e))?;

        let status = response.status();
        if !status.is_success() {
            debug!(url, status = status.as_u16(), "catalog request rejected");
            return Err(CatalogError::Status {
                resource: resource.to_string(),
                status: status.as_u16(),
            });
        }

        response
            .json::<T>()
            .await
            .map_err(|e| CatalogError::decode(resource, e))
    }
}

#[async_trait]
impl CatalogClient for HttpCatalogClient {
    async fn fetch_primary(&self, name: &str) -> CatalogResult<PokemonRecord> {
        let url = self.config.pokemon_url(name);
        match self.get_json(&url, "pokemon").await {
            Err(CatalogError::Status { .. }) => Err(CatalogError::NotFound),
            other => other,
        }
    }

    async fn fetch_species(&self, url: &str) -> CatalogResult<SpeciesRecord> {
        self.get_json(url, "species").await
    }

    async fn fetch_type_relation(&self, url: &str) -> CatalogResult<TypeRecord> {
        self.get_json(url, "type").await
    }
}

#[async_trait]
impl SpriteResolver for HttpCatalogClient {
    async fn resolve_image(&self, display_name: &str) -> Option<String> {
        let url = self.config.pokemon_url(&display_name.to_lowercase());
        match self.get_json::<PokemonRecord>(&url, "sprite").await {
            Ok(record) => record.sprites.front_default,
            Err(CatalogError::Status { .. }) => {
                warn!(display_name, "Pokemon image not found.");
                None
            }
            Err(err) => {
                warn!(display_name, error = %err, "Error fetching Pokemon image");
                None
            }
        }
    }
}
