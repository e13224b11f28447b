use core::fmt;

use serde::{
    Deserialize,
    Serialize,
};

use crate::{
    StatTable,
    Type,
};

/// Stable identifier of a species, its national Pokédex number.
#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct SpeciesId(pub u16);

impl From<u16> for SpeciesId {
    fn from(value: u16) -> Self {
        Self(value)
    }
}

impl fmt::Display for SpeciesId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Data about a particular species.
///
/// Species data is common to all roster members of a given species. Data about a specific member
/// (such as its level, individual values or moves) does not belong here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpeciesData {
    /// Pokédex number.
    pub id: SpeciesId,
    /// Display name.
    pub name: String,
    /// The primary type of the species.
    pub primary_type: Type,
    /// The secondary type of the species, if it exists.
    pub secondary_type: Option<Type>,
    /// Base stats.
    pub base_stats: StatTable,
    /// Pokédex entry text.
    #[serde(default)]
    pub entry: Option<String>,
}

impl SpeciesData {
    /// Iterates over the types of the species, primary first.
    pub fn types(&self) -> impl Iterator<Item = Type> {
        [Some(self.primary_type), self.secondary_type]
            .into_iter()
            .flatten()
    }

    /// Checks if the species has the given type.
    pub fn has_type(&self, typ: Type) -> bool {
        self.types().any(|t| t == typ)
    }
}
