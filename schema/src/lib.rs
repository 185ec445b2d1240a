// Pokedex Lookup Schema - Wire definitions
// This crate contains the serde models for the three PokeAPI documents the
// lookup pipeline consumes. Only the fields the pipeline reads are modelled;
// everything else in the upstream JSON is ignored on decode.

// Re-export the main types
pub use pokemon_data::*;
pub use species_data::*;
pub use type_data::*;

pub mod pokemon_data;
pub mod species_data;
pub mod type_data;

use serde::{Deserialize, Serialize};

/// A `{ "name": ..., "url": ... }` pair, the way PokeAPI links one resource
/// to another.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedResource {
    pub name: String,
    pub url: String,
}

impl NamedResource {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }
}
