use serde::{
    Deserialize,
    Serialize,
};
use serde_string_enum::{
    DeserializeLabeledStringEnum,
    SerializeLabeledStringEnum,
};

use crate::SpeciesId;

/// Common evolution methods.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, SerializeLabeledStringEnum, DeserializeLabeledStringEnum,
)]
pub enum EvolutionMethod {
    /// Evolves on level-up.
    #[string = "level-up"]
    #[alias = "Level"]
    Level,
    /// Evolves after being traded.
    #[string = "trade"]
    Trade,
    /// Evolves on item use outside of battle.
    #[string = "use-item"]
    #[alias = "Item"]
    Item,
    /// Evolves in some other custom way.
    #[string = "other"]
    #[alias = "Custom"]
    Custom,
}

/// A single edge of the evolution graph: `from` evolves into `to`.
///
/// A species usually has at most one predecessor, but the graph is not required to be a tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvolutionData {
    /// The species that evolves.
    pub from: SpeciesId,
    /// The species evolved into.
    pub to: SpeciesId,
    /// The evolution method, which determines when the rest of the conditions should be checked.
    pub method: EvolutionMethod,
    /// Minimum level that must be reached for evolution.
    #[serde(default)]
    pub minimum_level: Option<u8>,
    /// Item that must be used on the species.
    #[serde(default)]
    pub item: Option<String>,
    /// Is a trade required?
    #[serde(default)]
    pub trade_required: bool,
}
