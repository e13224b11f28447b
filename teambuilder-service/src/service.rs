use std::collections::{
    BTreeMap,
    BTreeSet,
    hash_map::Entry,
};

use ahash::HashMap;
use anyhow::Result;
use futures_util::lock::Mutex;
use log::info;
use serde::{
    Deserialize,
    Serialize,
};
use teambuilder::{
    dex::Dex,
    error::{
        WrapOptionError,
        WrapResultError,
        invalid_input_error,
        not_found_error,
    },
    movepool::MovepoolResolver,
    teams::{
        DEFAULT_STATUS,
        Roster,
        RosterMember,
        RosterMemberData,
        RosterMemberUpdate,
        RosterMemberWithStats,
        Team,
        TeamCapacity,
    },
};
use teambuilder_data::{
    DataStore,
    IvTable,
    MoveId,
    SpeciesId,
    StatTable,
};
use teambuilder_prng::{
    PseudoRandomNumberGenerator,
    RealPseudoRandomNumberGenerator,
};
use uuid::Uuid;

fn default_status() -> String {
    DEFAULT_STATUS.to_owned()
}

/// Options for configuring [`TeamBuilderService`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamBuilderServiceOptions {
    /// Seed for IV generation. A fixed seed makes member creation replayable.
    #[serde(default)]
    pub prng_seed: Option<u64>,

    /// Status given to new members that do not specify one.
    #[serde(default = "default_status")]
    pub default_status: String,
}

impl Default for TeamBuilderServiceOptions {
    fn default() -> Self {
        Self {
            prng_seed: None,
            default_status: default_status(),
        }
    }
}

/// Service for managing the teams of many trainers in memory.
///
/// Every operation on a team is atomic: the team map is locked for the whole operation, so
/// concurrent writers to the same team are applied one after the other.
///
/// Operations that touch both the team map and the owner index lock the team map first.
pub struct TeamBuilderService<'d> {
    dex: Dex<'d>,
    movepool: MovepoolResolver<'d>,
    roster: Roster<'d>,

    teams: Mutex<BTreeMap<Uuid, Team>>,
    teams_by_owner: Mutex<HashMap<String, BTreeSet<Uuid>>>,

    prng: Mutex<Box<dyn PseudoRandomNumberGenerator>>,
}

impl<'d> TeamBuilderService<'d> {
    /// Creates a new team builder service.
    pub fn new(data: &'d dyn DataStore, options: TeamBuilderServiceOptions) -> Self {
        let prng = RealPseudoRandomNumberGenerator::new(options.prng_seed);
        info!("seeded IV generator with {}", prng.initial_seed());
        Self {
            dex: Dex::new(data),
            movepool: MovepoolResolver::new(data),
            roster: Roster::with_default_status(data, options.default_status),
            teams: Mutex::new(BTreeMap::default()),
            teams_by_owner: Mutex::new(HashMap::default()),
            prng: Mutex::new(Box::new(prng)),
        }
    }

    /// Species and move lookups.
    pub fn dex(&self) -> Dex<'d> {
        self.dex
    }

    /// Movepool resolution and moveset validation.
    pub fn movepool(&self) -> MovepoolResolver<'d> {
        self.movepool
    }

    /// Runs `f` on a team owned by `owner`.
    ///
    /// A team owned by someone else is reported as not found.
    async fn with_team<F, R>(&self, owner: &str, team: Uuid, f: F) -> Result<R>
    where
        F: FnOnce(&mut Team) -> Result<R>,
    {
        let mut teams = self.teams.lock().await;
        let team = teams
            .get_mut(&team)
            .filter(|existing| existing.owner == owner)
            .wrap_not_found_error(format_args!("team {team}"))?;
        f(team)
    }

    /// Creates a new empty team.
    pub async fn create_team(&self, owner: &str, name: &str) -> Result<Team> {
        if name.trim().is_empty() {
            return Err(invalid_input_error("Team name cannot be empty"));
        }
        let team = Team::new(owner, name);
        let uuid = team.id;
        let mut teams = self.teams.lock().await;
        let mut teams_by_owner = self.teams_by_owner.lock().await;
        teams.insert(uuid, team.clone());
        teams_by_owner
            .entry(owner.to_owned())
            .or_default()
            .insert(uuid);
        info!("created team {uuid} for {owner}");
        Ok(team)
    }

    /// Looks up a team.
    pub async fn team(&self, owner: &str, team: Uuid) -> Result<Team> {
        self.with_team(owner, team, |team| Ok(team.clone())).await
    }

    /// Lists the teams of an owner, in UUID order.
    pub async fn teams_for_owner(&self, owner: &str, count: usize, offset: usize) -> Vec<Team> {
        let count = count.min(100);
        let teams = self.teams.lock().await;
        let teams_by_owner = self.teams_by_owner.lock().await;
        match teams_by_owner.get(owner) {
            Some(uuids) => uuids
                .iter()
                .skip(offset)
                .take(count)
                .filter_map(|uuid| teams.get(uuid))
                .cloned()
                .collect(),
            None => Vec::default(),
        }
    }

    /// Renames a team.
    pub async fn rename_team(&self, owner: &str, team: Uuid, name: &str) -> Result<Team> {
        if name.trim().is_empty() {
            return Err(invalid_input_error("Team name cannot be empty"));
        }
        self.with_team(owner, team, |team| {
            team.name = name.to_owned();
            Ok(team.clone())
        })
        .await
    }

    /// Deletes a team, along with all of its members.
    pub async fn delete_team(&self, owner: &str, team: Uuid) -> Result<()> {
        let mut teams = self.teams.lock().await;
        let mut teams_by_owner = self.teams_by_owner.lock().await;
        if !teams
            .get(&team)
            .is_some_and(|existing| existing.owner == owner)
        {
            return Err(not_found_error(format_args!("team {team}")));
        }
        teams.remove(&team);
        if let Entry::Occupied(mut entry) = teams_by_owner.entry(owner.to_owned()) {
            entry.get_mut().remove(&team);
            if entry.get().is_empty() {
                entry.remove_entry();
            }
        }
        info!("deleted team {team} of {owner}");
        Ok(())
    }

    /// Member count of a team, and whether members can be added or removed.
    pub async fn capacity(&self, owner: &str, team: Uuid) -> Result<TeamCapacity> {
        self.with_team(owner, team, |team| Ok(team.capacity()))
            .await
    }

    /// Adds a new member to a team.
    pub async fn add_member(
        &self,
        owner: &str,
        team: Uuid,
        data: RosterMemberData,
    ) -> Result<RosterMemberWithStats> {
        let mut prng = self.prng.lock().await;
        let member = self
            .with_team(owner, team, |team| {
                self.roster.create_member(team, data, &mut **prng)
            })
            .await?;
        info!("added member {} to team {team}", member.id);
        self.roster.with_stats(&member)
    }

    /// Looks up a member of a team.
    pub async fn member(&self, owner: &str, team: Uuid, member: Uuid) -> Result<RosterMember> {
        self.with_team(owner, team, |team| {
            team.member(member)
                .cloned()
                .wrap_not_found_error(format_args!("member {member}"))
        })
        .await
    }

    /// Looks up a member of a team, with calculated stats.
    pub async fn member_with_stats(
        &self,
        owner: &str,
        team: Uuid,
        member: Uuid,
    ) -> Result<RosterMemberWithStats> {
        let member = self.member(owner, team, member).await?;
        self.roster.with_stats(&member)
    }

    /// Lists all members of a team, with calculated stats.
    pub async fn members(&self, owner: &str, team: Uuid) -> Result<Vec<RosterMemberWithStats>> {
        let members = self
            .with_team(owner, team, |team| Ok(team.members.clone()))
            .await?;
        members
            .iter()
            .map(|member| {
                self.roster
                    .with_stats(member)
                    .wrap_error_with_message(format!("failed to calculate stats of {}", member.id))
            })
            .collect()
    }

    /// Applies a partial update to a member of a team.
    pub async fn update_member(
        &self,
        owner: &str,
        team: Uuid,
        member: Uuid,
        update: RosterMemberUpdate,
    ) -> Result<RosterMemberWithStats> {
        let member = self
            .with_team(owner, team, |team| {
                self.roster.update_member(team, member, update)
            })
            .await?;
        self.roster.with_stats(&member)
    }

    /// Replaces the moves of a member of a team.
    pub async fn set_member_moves(
        &self,
        owner: &str,
        team: Uuid,
        member: Uuid,
        moves: &[Option<MoveId>],
    ) -> Result<RosterMemberWithStats> {
        let member = self
            .with_team(owner, team, |team| {
                self.roster.set_moves(team, member, moves)
            })
            .await?;
        self.roster.with_stats(&member)
    }

    /// Removes a member from a team.
    pub async fn delete_member(&self, owner: &str, team: Uuid, member: Uuid) -> Result<()> {
        self.with_team(owner, team, |team| self.roster.delete_member(team, member))
            .await?;
        info!("deleted member {member} from team {team}");
        Ok(())
    }

    /// Calculates the stats of a species for arbitrary inputs.
    pub fn calculate_stats(
        &self,
        species: SpeciesId,
        level: u8,
        ivs: &IvTable,
        evs: &StatTable,
    ) -> Result<StatTable> {
        self.roster.calculate_stats(species, level, ivs, evs)
    }
}
