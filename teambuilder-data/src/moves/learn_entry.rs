use serde::{
    Deserialize,
    Serialize,
};
use serde_string_enum::{
    DeserializeLabeledStringEnum,
    SerializeLabeledStringEnum,
};

use crate::{
    MoveId,
    SpeciesId,
};

/// How a move is learned.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    SerializeLabeledStringEnum,
    DeserializeLabeledStringEnum,
)]
pub enum LearnMethod {
    /// Learned on reaching a level.
    #[string = "Level-up"]
    #[alias = "levelup"]
    LevelUp,
    /// Taught by a machine or tutor, independent of level.
    #[string = "TM/HM"]
    #[alias = "tm-hm"]
    #[alias = "machine"]
    Machine,
}

impl LearnMethod {
    /// The lowercase form used by movepool query filters.
    pub fn query_key(&self) -> &'static str {
        match self {
            Self::LevelUp => "level-up",
            Self::Machine => "tm-hm",
        }
    }
}

/// A fact that a species can learn a move.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LearnEntry {
    /// The species learning the move.
    pub species: SpeciesId,
    /// The move learned.
    pub move_id: MoveId,
    /// Level the move is learned at.
    ///
    /// Zero means the move is taught by an external method rather than on level-up.
    pub level_learned: u8,
}

impl LearnEntry {
    /// Level value marking a move that is not learned on level-up.
    pub const MACHINE_LEVEL: u8 = 0;

    /// The method the move is learned by.
    pub fn method(&self) -> LearnMethod {
        if self.level_learned == Self::MACHINE_LEVEL {
            LearnMethod::Machine
        } else {
            LearnMethod::LevelUp
        }
    }

    /// Checks if the move is available to a member at the given level.
    ///
    /// Machine moves are available at any level.
    pub fn available_at(&self, level: u8) -> bool {
        self.level_learned <= level
    }
}
