use serde::{
    Deserialize,
    Serialize,
};
use uuid::Uuid;

use crate::teams::RosterMember;

/// The maximum number of members on a team.
pub const MAX_TEAM_SIZE: usize = 6;

/// A trainer's team, made up of up to [`MAX_TEAM_SIZE`] roster members.
///
/// Teams are created empty and then populated. Deleting a team deletes its members.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    pub id: Uuid,
    /// The trainer who owns the team.
    pub owner: String,
    pub name: String,
    #[serde(default)]
    pub members: Vec<RosterMember>,
}

impl Team {
    /// Creates a new empty team.
    pub fn new<O, N>(owner: O, name: N) -> Self
    where
        O: Into<String>,
        N: Into<String>,
    {
        Self {
            id: Uuid::new_v4(),
            owner: owner.into(),
            name: name.into(),
            members: Vec::new(),
        }
    }

    pub fn member(&self, id: Uuid) -> Option<&RosterMember> {
        self.members.iter().find(|member| member.id == id)
    }

    pub fn member_mut(&mut self, id: Uuid) -> Option<&mut RosterMember> {
        self.members.iter_mut().find(|member| member.id == id)
    }

    /// Checks if another member can be added.
    pub fn is_full(&self) -> bool {
        self.members.len() >= MAX_TEAM_SIZE
    }

    /// The number of members, and whether members can be added or removed.
    pub fn capacity(&self) -> TeamCapacity {
        let count = self.members.len();
        TeamCapacity {
            team_id: self.id,
            pokemon_count: count,
            can_add_more: count < MAX_TEAM_SIZE,
            can_remove: count > 1,
        }
    }
}

/// Member count of a team.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamCapacity {
    pub team_id: Uuid,
    pub pokemon_count: usize,
    pub can_add_more: bool,
    pub can_remove: bool,
}
