use anyhow::Result;
use log::debug;
use teambuilder_calc::{
    all_stats,
    hp_iv,
    hp_stat,
    random_ivs,
};
use teambuilder_data::{
    DataStore,
    IvTable,
    MAX_IV,
    MAX_LEVEL,
    MIN_LEVEL,
    MoveId,
    SpeciesData,
    SpeciesId,
    StatTable,
};
use teambuilder_prng::PseudoRandomNumberGenerator;
use uuid::Uuid;

use crate::{
    dex::Dex,
    error::{
        WrapOptionError,
        invalid_input_error,
    },
    movepool::{
        MAX_MOVES,
        MovepoolResolver,
        distinct_moves,
    },
    teams::{
        MAX_TEAM_SIZE,
        RosterMember,
        RosterMemberData,
        RosterMemberUpdate,
        RosterMemberWithStats,
        Team,
    },
};

/// Status given to new members that do not specify one.
pub const DEFAULT_STATUS: &str = "Healthy";

fn validate_level(level: u8) -> Result<()> {
    if !(MIN_LEVEL..=MAX_LEVEL).contains(&level) {
        return Err(invalid_input_error(format!(
            "Level must be between {MIN_LEVEL} and {MAX_LEVEL}"
        )));
    }
    Ok(())
}

fn validate_ivs(ivs: &IvTable) -> Result<()> {
    if ivs.entries().any(|(_, iv)| iv > MAX_IV) {
        return Err(invalid_input_error(format!(
            "IVs must be between 0 and {MAX_IV}"
        )));
    }
    Ok(())
}

/// Packs distinct moves into the front of the move slots.
fn compact_moves(moves: &[MoveId]) -> [Option<MoveId>; MAX_MOVES] {
    let mut slots = [None; MAX_MOVES];
    for (slot, mov) in slots.iter_mut().zip(moves) {
        *slot = Some(*mov);
    }
    slots
}

fn max_hp(species: &SpeciesData, level: u8, ivs: &IvTable, evs: &StatTable) -> u16 {
    hp_stat(species.base_stats.hp, level, hp_iv(ivs), evs.hp)
}

/// Applies the rules for creating and changing roster members.
///
/// The roster does not store teams. Callers own the [`Team`] and serialize access to it.
pub struct Roster<'d> {
    dex: Dex<'d>,
    movepool: MovepoolResolver<'d>,
    default_status: String,
}

impl<'d> Roster<'d> {
    /// Creates a new roster, backed by the given [`DataStore`].
    pub fn new(data: &'d dyn DataStore) -> Self {
        Self::with_default_status(data, DEFAULT_STATUS)
    }

    /// Creates a new roster that gives new members the given status.
    pub fn with_default_status<S>(data: &'d dyn DataStore, default_status: S) -> Self
    where
        S: Into<String>,
    {
        Self {
            dex: Dex::new(data),
            movepool: MovepoolResolver::new(data),
            default_status: default_status.into(),
        }
    }

    fn species(&self, id: SpeciesId) -> Result<SpeciesData> {
        self.dex
            .species(id)?
            .wrap_not_found_error(format_args!("species {id}"))
    }

    /// Validates a moveset for the species at the given level and packs it into move slots.
    fn assignable_moves(
        &self,
        species: SpeciesId,
        level: u8,
        moves: &[Option<MoveId>],
    ) -> Result<[Option<MoveId>; MAX_MOVES]> {
        self.movepool
            .validate_moveset(species, level, moves)?
            .into_result()?;
        Ok(compact_moves(&distinct_moves(moves)))
    }

    /// Creates a new member on the team.
    ///
    /// IVs are generated with `prng` when none are given or all given IVs are zero. The member
    /// starts at full HP.
    pub fn create_member(
        &self,
        team: &mut Team,
        data: RosterMemberData,
        prng: &mut dyn PseudoRandomNumberGenerator,
    ) -> Result<RosterMember> {
        if team.is_full() {
            return Err(invalid_input_error(format!(
                "Team cannot have more than {MAX_TEAM_SIZE} Pokemon"
            )));
        }
        validate_level(data.level)?;
        if let Some(ivs) = &data.ivs {
            validate_ivs(ivs)?;
        }
        let species = self.species(data.species)?;
        let moves = self.assignable_moves(species.id, data.level, &data.moves)?;

        let ivs = match data.ivs {
            Some(ivs) if !ivs.is_zero() => ivs,
            _ => random_ivs(prng),
        };
        let current_hp = max_hp(&species, data.level, &ivs, &data.evs);

        let member = RosterMember {
            id: Uuid::new_v4(),
            team_id: team.id,
            species: species.id,
            nickname: data.nickname,
            level: data.level,
            ivs,
            evs: data.evs,
            current_hp,
            status: data.status.unwrap_or_else(|| self.default_status.clone()),
            moves,
        };
        team.members.push(member.clone());
        Ok(member)
    }

    /// Applies a partial update to a member of the team.
    ///
    /// Maximum HP is recomputed when the species, level, IVs or HP EV change. A current HP above
    /// the new maximum is clamped, unless the update sets current HP itself, in which case it is
    /// rejected. New moves are validated against the updated species and level.
    pub fn update_member(
        &self,
        team: &mut Team,
        member: Uuid,
        update: RosterMemberUpdate,
    ) -> Result<RosterMember> {
        let existing = team
            .member(member)
            .wrap_not_found_error(format_args!("member {member}"))?;
        let mut updated = existing.clone();

        if let Some(level) = update.level {
            validate_level(level)?;
            updated.level = level;
        }
        if let Some(ivs) = update.ivs {
            validate_ivs(&ivs)?;
            updated.ivs = ivs;
        }
        if let Some(species) = update.species {
            updated.species = species;
        }
        if let Some(evs) = update.evs {
            updated.evs = evs;
        }
        if let Some(nickname) = update.nickname {
            updated.nickname = Some(nickname);
        }
        if let Some(status) = update.status {
            updated.status = status;
        }

        let species = self.species(updated.species)?;
        if let Some(moves) = &update.moves {
            updated.moves = self.assignable_moves(species.id, updated.level, moves)?;
        }

        let max_hp = max_hp(&species, updated.level, &updated.ivs, &updated.evs);
        match update.current_hp {
            Some(current_hp) if current_hp > max_hp => {
                return Err(invalid_input_error(format!(
                    "Current HP cannot exceed max HP ({max_hp})"
                )));
            }
            Some(current_hp) => updated.current_hp = current_hp,
            None if updated.current_hp > max_hp => {
                debug!(
                    "clamping current HP of member {member} from {} to {max_hp}",
                    updated.current_hp
                );
                updated.current_hp = max_hp;
            }
            None => (),
        }

        if let Some(slot) = team.member_mut(member) {
            *slot = updated.clone();
        }
        Ok(updated)
    }

    /// Replaces the moves of a member of the team.
    pub fn set_moves(
        &self,
        team: &mut Team,
        member: Uuid,
        moves: &[Option<MoveId>],
    ) -> Result<RosterMember> {
        self.update_member(
            team,
            member,
            RosterMemberUpdate {
                moves: Some(moves.to_vec()),
                ..Default::default()
            },
        )
    }

    /// Removes a member from the team. A team's last member cannot be removed.
    pub fn delete_member(&self, team: &mut Team, member: Uuid) -> Result<RosterMember> {
        let index = team
            .members
            .iter()
            .position(|existing| existing.id == member)
            .wrap_not_found_error(format_args!("member {member}"))?;
        if team.members.len() <= 1 {
            return Err(invalid_input_error(
                "Cannot delete the last Pokemon from a team. Teams must have at least 1 Pokemon.",
            ));
        }
        Ok(team.members.remove(index))
    }

    /// Calculates the stats of a species for arbitrary inputs, without creating a member.
    pub fn calculate_stats(
        &self,
        species: SpeciesId,
        level: u8,
        ivs: &IvTable,
        evs: &StatTable,
    ) -> Result<StatTable> {
        validate_level(level)?;
        validate_ivs(ivs)?;
        let species = self.species(species)?;
        Ok(all_stats(&species.base_stats, level, ivs, evs))
    }

    /// The member with its species details and calculated stats.
    pub fn with_stats(&self, member: &RosterMember) -> Result<RosterMemberWithStats> {
        let species = self.species(member.species)?;
        let stats = all_stats(&species.base_stats, member.level, &member.ivs, &member.evs);
        Ok(RosterMemberWithStats::new(member.clone(), species, stats))
    }
}
