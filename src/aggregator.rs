//! Turns one query into one [`DexEntry`].
//!
//! The species fetch waits on the primary record (it needs the species URL);
//! the per-type relation fetches then run concurrently behind a single
//! fail-fast barrier. Any failed document fetch fails the whole lookup, while
//! missing localized text inside a fetched document only leaves that field
//! empty.

use crate::catalog::CatalogClient;
use crate::config::DEFAULT_LANGUAGE;
use crate::entry::{DexEntry, GenderCategory};
use crate::errors::{LookupError, LookupResult};
use crate::formatting::{
    format_category, format_description, format_height, format_number, format_weight,
    join_titled, title_case,
};
use futures::future::try_join_all;
use schema::{PokemonRecord, SpeciesRecord, TypeRecord};
use std::sync::Arc;
use tracing::{debug, info};

/// Trims and lower-cases a raw query. `None` if nothing is left.
pub fn normalize_query(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_lowercase())
    }
}

#[derive(Debug)]
pub struct Aggregator<C> {
    client: Arc<C>,
    language: String,
}

impl<C> Clone for Aggregator<C> {
    fn clone(&self) -> Self {
        Self {
            client: Arc::clone(&self.client),
            language: self.language.clone(),
        }
    }
}

impl<C: CatalogClient> Aggregator<C> {
    pub fn new(client: Arc<C>) -> Self {
        Self::with_language(client, DEFAULT_LANGUAGE)
    }

    pub fn with_language(client: Arc<C>, language: impl Into<String>) -> Self {
        Self {
            client,
            language: language.into(),
        }
    }

    pub fn client(&self) -> &Arc<C> {
        &self.client
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    /// Resolve `query` into a finished entry, or the first failure met.
    pub async fn lookup(&self, query: &str) -> LookupResult<DexEntry> {
        let query = normalize_query(query).ok_or(LookupError::EmptyQuery)?;
        info!(query = %query, "lookup started");

        let pokemon = self.client.fetch_primary(&query).await?;
        debug!(id = pokemon.id, name = %pokemon.name, "primary record resolved");

        // Sequential: the species URL only exists once the primary record is in.
        let species = self.client.fetch_species(&pokemon.species.url).await?;
        debug!(gender_rate = species.gender_rate, "species record resolved");

        let relations = self.fetch_type_relations(&pokemon).await?;
        debug!(count = relations.len(), "type relations resolved");

        let entry = build_entry(&pokemon, &species, &relations, &self.language);
        info!(number = %entry.number, name = %entry.name, "lookup finished");
        Ok(entry)
    }

    /// One fetch per type slot, all in flight together. Fails fast: the
    /// first error is returned and the remaining requests are dropped.
    async fn fetch_type_relations(&self, pokemon: &PokemonRecord) -> LookupResult<Vec<TypeRecord>> {
        let fetches = pokemon
            .types
            .iter()
            .map(|slot| self.client.fetch_type_relation(&slot.kind.url));

        Ok(try_join_all(fetches).await?)
    }
}

/// Merges the three documents into an entry. `relations` must be in the
/// primary record's type-slot order.
pub fn build_entry(
    pokemon: &PokemonRecord,
    species: &SpeciesRecord,
    relations: &[TypeRecord],
    language: &str,
) -> DexEntry {
    let description = species
        .flavor_text_in(language)
        .map(format_description)
        .unwrap_or_default();
    let category = species
        .genus_in(language)
        .map(format_category)
        .unwrap_or_default();

    // Duplicates across types are kept.
    let weaknesses = join_titled(relations.iter().flat_map(TypeRecord::weakness_names));

    DexEntry {
        number: format_number(pokemon.id),
        name: title_case(&pokemon.name),
        description,
        height: format_height(pokemon.height),
        weight: format_weight(pokemon.weight),
        gender: GenderCategory::from_rate(species.gender_rate),
        category,
        abilities: join_titled(pokemon.ability_names()),
        types: join_titled(pokemon.type_names()),
        weaknesses,
    }
}
