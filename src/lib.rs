// In: src/lib.rs

//! Pokedex Lookup
//!
//! Resolves one creature name or Pokedex number against PokeAPI and merges the
//! primary, species and per-type documents into a single normalized
//! [`DexEntry`], exposed to a presentation layer through [`QueryController`].

// --- MODULE DECLARATIONS ---
pub mod aggregator;
pub mod catalog;
pub mod config;
pub mod controller;
pub mod entry;
pub mod errors;
pub mod formatting;


// --- PUBLIC API RE-EXPORTS ---

// --- From the `schema` crate ---
// Wire documents as served by the catalog.
pub use schema::{
    AbilitySlot, DamageRelations, FlavorTextEntry, GenusEntry, NamedResource, PokemonRecord,
    SpeciesRecord, Sprites, TypeRecord, TypeSlot,
};

// --- From this crate's modules (`src/`) ---

// The lookup pipeline and the session that drives it.
pub use aggregator::{build_entry, normalize_query, Aggregator};
pub use controller::{QueryController, SessionState, SessionStatus};

// Catalog access.
pub use catalog::{CatalogClient, HttpCatalogClient, SpriteResolver};
pub use config::CatalogConfig;

// Output record.
pub use entry::{DexEntry, GenderCategory};

// Crate-specific error and result types.
pub use errors::{CatalogError, CatalogResult, LookupError, LookupResult};
