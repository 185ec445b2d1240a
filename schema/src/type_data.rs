use crate::NamedResource;
use serde::{Deserialize, Serialize};

/// The type record served by `/type/{id}`. Only the incoming double-damage
/// relation is read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeRecord {
    #[serde(default)]
    pub name: String,
    pub damage_relations: DamageRelations,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DamageRelations {
    #[serde(default)]
    pub double_damage_from: Vec<NamedResource>,
}

impl TypeRecord {
    /// Names of the types this type is weak to, in upstream order.
    pub fn weakness_names(&self) -> impl Iterator<Item = &str> {
        self.damage_relations
            .double_damage_from
            .iter()
            .map(|resource| resource.name.as_str())
    }
}
