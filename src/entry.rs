use serde::{Deserialize, Serialize};
use std::fmt;

/// Which sexes a species can appear as, derived from its gender rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GenderCategory {
    MaleOnly,
    FemaleOnly,
    Both,
    Genderless,
}

impl GenderCategory {
    /// Maps PokeAPI's `gender_rate` (chance of female in eighths, `-1` for
    /// genderless) onto a display category.
    pub fn from_rate(gender_rate: i8) -> Self {
        match gender_rate {
            rate if rate < 0 => GenderCategory::Genderless,
            0 => GenderCategory::MaleOnly,
            8 => GenderCategory::FemaleOnly,
            _ => GenderCategory::Both,
        }
    }
}

impl fmt::Display for GenderCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            GenderCategory::MaleOnly => "Male",
            GenderCategory::FemaleOnly => "Female",
            GenderCategory::Both => "Male, Female",
            GenderCategory::Genderless => "Genderless",
        };
        write!(f, "{}", label)
    }
}

/// The normalized summary of one successful lookup.
///
/// Built only by the aggregator once every upstream document resolved, and
/// shared read-only afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DexEntry {
    pub number: String,      // "#0025"
    pub name: String,        // "Pikachu"
    pub description: String, // may be empty if no entry in the locale
    pub height: String,      // "0.4 m"
    pub weight: String,      // "6 kg"
    pub gender: GenderCategory,
    pub category: String, // may be empty if no entry in the locale
    pub abilities: String,
    pub types: String,
    pub weaknesses: String,
}

impl DexEntry {
    /// Individual type names, for badge-style rendering.
    pub fn type_list(&self) -> Vec<&str> {
        split_joined(&self.types)
    }

    /// Individual weakness names, duplicates included.
    pub fn weakness_list(&self) -> Vec<&str> {
        split_joined(&self.weaknesses)
    }
}

fn split_joined(joined: &str) -> Vec<&str> {
    if joined.is_empty() {
        Vec::new()
    } else {
        joined.split(", ").collect()
    }
}

impl fmt::Display for DexEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const LABEL_WIDTH: usize = 12;

        writeln!(f, "{} {}", self.number, self.name)?;
        writeln!(f, "--------------------")?;
        writeln!(f, "{:<LABEL_WIDTH$} : {}", "Description", self.description)?;
        writeln!(f, "{:<LABEL_WIDTH$} : {}", "Height", self.height)?;
        writeln!(f, "{:<LABEL_WIDTH$} : {}", "Weight", self.weight)?;
        writeln!(f, "{:<LABEL_WIDTH$} : {}", "Gender", self.gender)?;
        writeln!(f, "{:<LABEL_WIDTH$} : {}", "Category", self.category)?;
        writeln!(f, "{:<LABEL_WIDTH$} : {}", "Abilities", self.abilities)?;
        writeln!(f, "{:<LABEL_WIDTH$} : {}", "Type", self.type_list().join(" / "))?;
        write!(f, "{:<LABEL_WIDTH$} : {}", "Weakness", self.weakness_list().join(" / "))
    }
}
