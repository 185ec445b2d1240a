use crate::NamedResource;
use serde::{Deserialize, Serialize};

/// The species record linked from a [`crate::PokemonRecord`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeciesRecord {
    #[serde(default)]
    pub flavor_text_entries: Vec<FlavorTextEntry>,
    #[serde(default)]
    pub genera: Vec<GenusEntry>,
    pub gender_rate: i8, // -1 genderless, otherwise female eighths
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlavorTextEntry {
    pub flavor_text: String,
    pub language: NamedResource,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenusEntry {
    pub genus: String,
    pub language: NamedResource,
}

impl SpeciesRecord {
    /// First flavor text written in `language`, if any.
    pub fn flavor_text_in(&self, language: &str) -> Option<&str> {
        self.flavor_text_entries
            .iter()
            .find(|entry| entry.language.name == language)
            .map(|entry| entry.flavor_text.as_str())
    }

    /// First genus label written in `language`, if any.
    pub fn genus_in(&self, language: &str) -> Option<&str> {
        self.genera
            .iter()
            .find(|entry| entry.language.name == language)
            .map(|entry| entry.genus.as_str())
    }
}
