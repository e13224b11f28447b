use core::fmt;

use serde::{
    Deserialize,
    Serialize,
};

use crate::Type;

/// Stable identifier of a move.
#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct MoveId(pub u16);

impl From<u16> for MoveId {
    fn from(value: u16) -> Self {
        Self(value)
    }
}

impl fmt::Display for MoveId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Data about a particular move.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveData {
    /// Move ID.
    pub id: MoveId,
    /// Name of the move.
    pub name: String,
    /// Move type.
    #[serde(rename = "type")]
    pub primary_type: Type,
    /// Base power, if the move deals direct damage.
    #[serde(default)]
    pub power: Option<u16>,
    /// Accuracy percentage. [`None`] means the move never misses.
    #[serde(default)]
    pub accuracy: Option<u8>,
    /// Power points.
    pub pp: u8,
    /// Effect description.
    #[serde(default)]
    pub effect: String,
}
