//! Text and number transforms applied to upstream fields before they reach a
//! [`crate::DexEntry`]. Everything here is pure.

use regex::{Captures, Regex};
use std::sync::LazyLock;

static LINE_BREAKS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\n\x0C\r]").expect("line break pattern is valid"));

static POKEMON_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)pokémon").expect("pokemon pattern is valid"));

// ASCII word characters only, so accented letters end a run.
static CAPITALIZED_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[A-Z]+[A-Za-z0-9_]*").expect("capitalized run pattern is valid"));

/// Lower-cases the string, then upper-cases the first character of every
/// space-separated token. Runs of spaces are kept as empty tokens.
pub fn title_case(s: &str) -> String {
    s.to_lowercase()
        .split(' ')
        .map(capitalize_first)
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize_first(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Flattens a flavor text onto one line and normalizes its casing.
///
/// Every line feed, form feed and carriage return becomes a single space
/// (doubled spaces are not collapsed). Any spelling of "pokémon" is written
/// as "Pokémon". Finally every word that starts with a capital letter keeps
/// that letter and has the rest lower-cased, which turns shouted words such
/// as `POISON` into `Poison` and leaves ordinary words alone.
pub fn format_description(text: &str) -> String {
    let flattened = LINE_BREAKS.replace_all(text, " ");
    let branded = POKEMON_WORD.replace_all(&flattened, "Pokémon");
    CAPITALIZED_RUN
        .replace_all(&branded, |caps: &Captures| {
            let word = &caps[0];
            // The run starts with an ASCII capital, so byte 1 is a boundary.
            format!("{}{}", &word[..1], word[1..].to_lowercase())
        })
        .into_owned()
}

/// `#` followed by the id zero-padded to four digits.
pub fn format_number(number: u32) -> String {
    format!("#{:04}", number)
}

/// Decimetres to metres.
pub fn format_height(height: u32) -> String {
    format!("{} m", f64::from(height) / 10.0)
}

/// Hectograms to kilograms.
pub fn format_weight(weight: u32) -> String {
    format!("{} kg", f64::from(weight) / 10.0)
}

/// First space-delimited token of a genus label ("Seed Pokémon" -> "Seed").
pub fn format_category(genus: &str) -> String {
    genus.split(' ').next().unwrap_or_default().to_string()
}

/// Title-cases every name and joins them with ", ".
pub fn join_titled<'a>(names: impl IntoIterator<Item = &'a str>) -> String {
    names
        .into_iter()
        .map(title_case)
        .collect::<Vec<_>>()
        .join(", ")
}
