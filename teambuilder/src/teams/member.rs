use serde::{
    Deserialize,
    Serialize,
};
use teambuilder_calc::PokemonStats;
use teambuilder_data::{
    IvTable,
    MoveId,
    SpeciesData,
    SpeciesId,
    StatTable,
    Type,
};
use uuid::Uuid;

use crate::movepool::MAX_MOVES;

/// A single member of a team.
///
/// Invariants held by [`Roster`][`crate::teams::Roster`]:
/// - `level` is between 1 and 100, and every IV is between 0 and 15.
/// - `current_hp` never exceeds the maximum HP for the member's species, level, IVs and HP EV.
/// - Filled move slots come first, hold distinct moves and were learnable when assigned.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterMember {
    pub id: Uuid,
    pub team_id: Uuid,
    #[serde(rename = "pokemon_id")]
    pub species: SpeciesId,
    pub nickname: Option<String>,
    pub level: u8,
    /// Individual values, which boost stats.
    pub ivs: IvTable,
    /// Effort values, which boost stats.
    pub evs: StatTable,
    pub current_hp: u16,
    pub status: String,
    pub moves: [Option<MoveId>; MAX_MOVES],
}

impl RosterMember {
    /// The moves in filled slots.
    pub fn move_ids(&self) -> impl Iterator<Item = MoveId> + '_ {
        self.moves.iter().flatten().copied()
    }
}

/// Input for creating a new roster member.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterMemberData {
    #[serde(rename = "pokemon_id")]
    pub species: SpeciesId,
    #[serde(default)]
    pub nickname: Option<String>,
    pub level: u8,
    /// Individual values. Missing or all-zero IVs are generated randomly.
    #[serde(default)]
    pub ivs: Option<IvTable>,
    #[serde(default)]
    pub evs: StatTable,
    /// Status. Defaults to the roster's default status.
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub moves: Vec<Option<MoveId>>,
}

/// A partial update of a roster member. Missing fields are left unchanged.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterMemberUpdate {
    #[serde(default, rename = "pokemon_id")]
    pub species: Option<SpeciesId>,
    #[serde(default)]
    pub nickname: Option<String>,
    #[serde(default)]
    pub level: Option<u8>,
    #[serde(default)]
    pub ivs: Option<IvTable>,
    #[serde(default)]
    pub evs: Option<StatTable>,
    #[serde(default)]
    pub current_hp: Option<u16>,
    #[serde(default)]
    pub status: Option<String>,
    /// Replaces all move slots.
    #[serde(default)]
    pub moves: Option<Vec<Option<MoveId>>>,
}

/// A roster member with its species details and calculated stats.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterMemberWithStats {
    #[serde(flatten)]
    pub member: RosterMember,
    pub pokemon_name: String,
    pub type1: Type,
    pub type2: Option<Type>,
    pub calculated_hp: u16,
    pub calculated_attack: u16,
    pub calculated_defense: u16,
    pub calculated_speed: u16,
    pub calculated_special: u16,
}

impl RosterMemberWithStats {
    pub(crate) fn new(member: RosterMember, species: SpeciesData, stats: PokemonStats) -> Self {
        Self {
            member,
            pokemon_name: species.name,
            type1: species.primary_type,
            type2: species.secondary_type,
            calculated_hp: stats.hp,
            calculated_attack: stats.atk,
            calculated_defense: stats.def,
            calculated_speed: stats.spe,
            calculated_special: stats.spc,
        }
    }

    /// The calculated stats as a table.
    pub fn stats(&self) -> PokemonStats {
        StatTable {
            hp: self.calculated_hp,
            atk: self.calculated_attack,
            def: self.calculated_defense,
            spe: self.calculated_speed,
            spc: self.calculated_special,
        }
    }
}

#[cfg(test)]
mod member_test {
    use pretty_assertions::assert_eq;
    use teambuilder_data::{
        IvTable,
        MoveId,
        SpeciesId,
        StatTable,
    };

    use crate::teams::{
        RosterMember,
        RosterMemberData,
        RosterMemberUpdate,
    };

    #[test]
    fn lists_filled_move_slots() {
        let member = RosterMember {
            moves: [Some(MoveId(10)), Some(MoveId(52)), None, None],
            ..Default::default()
        };
        assert_eq!(
            member.move_ids().collect::<Vec<_>>(),
            vec![MoveId(10), MoveId(52)]
        );
    }

    #[test]
    fn deserializes_member_data_with_defaults() {
        let data: RosterMemberData = serde_json::from_str(
            r#"{
                "pokemon_id": 25,
                "level": 12,
                "ivs": { "attack": 15, "defense": 10, "speed": 3, "special": 0 },
                "moves": [84, null, 45]
            }"#,
        )
        .unwrap();
        assert_eq!(
            data,
            RosterMemberData {
                species: SpeciesId(25),
                nickname: None,
                level: 12,
                ivs: Some(IvTable {
                    atk: 15,
                    def: 10,
                    spe: 3,
                    spc: 0,
                }),
                evs: StatTable::default(),
                status: None,
                moves: vec![Some(MoveId(84)), None, Some(MoveId(45))],
            }
        );
    }

    #[test]
    fn deserializes_partial_update() {
        let update: RosterMemberUpdate =
            serde_json::from_str(r#"{ "level": 30, "current_hp": 12 }"#).unwrap();
        assert_eq!(
            update,
            RosterMemberUpdate {
                level: Some(30),
                current_hp: Some(12),
                ..Default::default()
            }
        );
    }
}
