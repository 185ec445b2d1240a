//! In-memory catalog for tests. Nothing here touches the network.

use super::{CatalogClient, SpriteResolver};
use crate::errors::{CatalogError, CatalogResult};
use async_trait::async_trait;
use schema::{PokemonRecord, SpeciesRecord, TypeRecord};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

/// Canned responses keyed by primary name or by document URL.
#[derive(Debug, Default)]
pub struct MockCatalogClient {
    pub pokemon: HashMap<String, CatalogResult<PokemonRecord>>,
    pub species: HashMap<String, CatalogResult<SpeciesRecord>>,
    pub types: HashMap<String, CatalogResult<TypeRecord>>,
    pub sprites: HashMap<String, String>,
    gates: HashMap<String, Arc<Notify>>,
    calls: Mutex<Vec<String>>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl MockCatalogClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_pokemon(&mut self, record: PokemonRecord) -> &mut Self {
        self.pokemon.insert(record.name.clone(), Ok(record));
        self
    }

    pub fn add_species(&mut self, url: impl Into<String>, record: SpeciesRecord) -> &mut Self {
        self.species.insert(url.into(), Ok(record));
        self
    }

    pub fn add_type(&mut self, url: impl Into<String>, record: TypeRecord) -> &mut Self {
        self.types.insert(url.into(), Ok(record));
        self
    }

    pub fn add_sprite(&mut self, name: impl Into<String>, url: impl Into<String>) -> &mut Self {
        self.sprites.insert(name.into(), url.into());
        self
    }

    /// Make the species fetch at `url` fail.
    pub fn fail_species(&mut self, url: impl Into<String>, err: CatalogError) -> &mut Self {
        self.species.insert(url.into(), Err(err));
        self
    }

    /// Make the type fetch at `url` fail.
    pub fn fail_type(&mut self, url: impl Into<String>, err: CatalogError) -> &mut Self {
        self.types.insert(url.into(), Err(err));
        self
    }

    /// Hold every fetch of `key` (a primary name or a URL) until the returned
    /// handle is notified.
    pub fn gate(&mut self, key: impl Into<String>) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        self.gates.insert(key.into(), gate.clone());
        gate
    }

    /// Every key fetched so far, in call order. Sprite lookups are prefixed
    /// with `sprite:`.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Fetches currently awaiting their response.
    pub fn in_flight(&self) -> usize {
        self.in_flight.load(Ordering::SeqCst)
    }

    /// Highest number of fetches that were awaiting their response at once.
    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    async fn respond<T: Clone>(
        &self,
        key: &str,
        table: &HashMap<String, CatalogResult<T>>,
        missing: CatalogError,
    ) -> CatalogResult<T> {
        self.calls.lock().unwrap().push(key.to_string());

        {
            let _in_flight = InFlight::enter(&self.in_flight, &self.max_in_flight);
            if let Some(gate) = self.gates.get(key) {
                gate.notified().await;
            }
        }

        table.get(key).cloned().unwrap_or(Err(missing))
    }
}

/// Counts a fetch as in flight until dropped, so fetches cancelled by a
/// fail-fast join or an aborted task are released too.
struct InFlight<'a> {
    counter: &'a AtomicUsize,
}

impl<'a> InFlight<'a> {
    fn enter(counter: &'a AtomicUsize, high_water: &AtomicUsize) -> Self {
        let now = counter.fetch_add(1, Ordering::SeqCst) + 1;
        high_water.fetch_max(now, Ordering::SeqCst);
        Self { counter }
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.counter.fetch_sub(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl CatalogClient for MockCatalogClient {
    async fn fetch_primary(&self, name: &str) -> CatalogResult<PokemonRecord> {
        self.respond(name, &self.pokemon, CatalogError::NotFound).await
    }

    async fn fetch_species(&self, url: &str) -> CatalogResult<SpeciesRecord> {
        let missing = CatalogError::Status { resource: "species".into(), status: 404 };
        self.respond(url, &self.species, missing).await
    }

    async fn fetch_type_relation(&self, url: &str) -> CatalogResult<TypeRecord> {
        let missing = CatalogError::Status { resource: "type".into(), status: 404 };
        self.respond(url, &self.types, missing).await
    }
}

#[async_trait]
impl SpriteResolver for MockCatalogClient {
    async fn resolve_image(&self, display_name: &str) -> Option<String> {
        let key = display_name.to_lowercase();
        self.calls.lock().unwrap().push(format!("sprite:{}", key));
        self.sprites.get(&key).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_cancelled_fetch_leaves_in_flight() {
        let mut mock = MockCatalogClient::new();
        let _gate = mock.gate("https://pokeapi.co/api/v2/type/10/");

        let outcome = tokio::time::timeout(
            Duration::from_millis(20),
            mock.fetch_type_relation("https://pokeapi.co/api/v2/type/10/"),
        )
        .await;

        assert!(outcome.is_err(), "gated fetch should still be waiting");
        assert_eq!(mock.in_flight(), 0);
        assert_eq!(mock.max_in_flight(), 1);
    }

    #[tokio::test]
    async fn test_completed_fetch_leaves_in_flight() {
        let mock = MockCatalogClient::new();

        let err = mock.fetch_primary("missingno").await.unwrap_err();

        assert_eq!(err, CatalogError::NotFound);
        assert_eq!(mock.in_flight(), 0);
        assert_eq!(mock.calls(), vec!["missingno".to_string()]);
    }
}
