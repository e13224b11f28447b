use std::{
    collections::{
        BTreeMap,
        hash_map::Entry,
    },
    iter,
};

use ahash::{
    HashMap,
    HashMapExt,
};
use anyhow::Result;
use itertools::Itertools;
use log::debug;
use serde::{
    Deserialize,
    Serialize,
    Serializer,
};
use teambuilder_data::{
    DataStore,
    LearnEntry,
    LearnMethod,
    MoveData,
    MoveId,
    SpeciesId,
    Type,
};

use crate::{
    dex::Dex,
    movepool::evolution_chain,
};

/// A move a species can learn, with details of the move and where it is learned from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    pub move_id: MoveId,
    #[serde(alias = "move_name")]
    pub name: String,
    #[serde(rename = "type", alias = "move_type")]
    pub move_type: Type,
    pub power: Option<u16>,
    pub accuracy: Option<u8>,
    pub pp: u8,
    /// Level the move is learned at. Zero for machine moves.
    pub level_learned: u8,
    #[serde(default)]
    pub effect_description: String,
    pub learn_method: LearnMethod,
    /// The species whose learnset the move came from.
    pub learned_from_id: SpeciesId,
    pub learned_from_pokemon: String,
}

impl MoveRecord {
    fn new(entry: &LearnEntry, mov: MoveData, learned_from_pokemon: String) -> Self {
        Self {
            move_id: mov.id,
            name: mov.name,
            move_type: mov.primary_type,
            power: mov.power,
            accuracy: mov.accuracy,
            pp: mov.pp,
            level_learned: entry.level_learned,
            effect_description: mov.effect,
            learn_method: entry.method(),
            learned_from_id: entry.species,
            learned_from_pokemon,
        }
    }
}

/// Filter applied to learn entries before they are merged into a movepool.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovepoolFilter {
    /// Keeps level-up moves learned at or below this level. Machine moves are always kept.
    #[serde(default)]
    pub max_level: Option<u8>,
    /// Keeps only moves learned by this method. [`None`] keeps all moves.
    ///
    /// Echoed back as `"level-up"` or `"tm-hm"`, the form clients send it in.
    #[serde(
        default,
        rename = "type",
        serialize_with = "serialize_method_query_key"
    )]
    pub method: Option<LearnMethod>,
}

fn serialize_method_query_key<S>(
    method: &Option<LearnMethod>,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error>
where
    S: Serializer,
{
    method.map(|method| method.query_key()).serialize(serializer)
}

impl MovepoolFilter {
    /// A filter that keeps every move.
    pub fn all() -> Self {
        Self::default()
    }

    /// A filter that keeps moves available up to the given level.
    pub fn up_to_level(level: u8) -> Self {
        Self {
            max_level: Some(level),
            method: None,
        }
    }

    /// Restricts the filter to a single learn method.
    pub fn with_method(mut self, method: LearnMethod) -> Self {
        self.method = Some(method);
        self
    }

    /// Checks if the learn entry passes the filter.
    pub fn matches(&self, entry: &LearnEntry) -> bool {
        self.max_level.is_none_or(|max_level| {
            entry.level_learned <= max_level || entry.level_learned == LearnEntry::MACHINE_LEVEL
        }) && self.method.is_none_or(|method| entry.method() == method)
    }
}

/// A member of an evolution chain, as shown to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainMember {
    pub id: SpeciesId,
    pub name: String,
}

/// The movepool of a species merged across its evolution chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovepoolWithEvolutions {
    pub pokemon_id: SpeciesId,
    pub pokemon_name: String,
    pub evolution_chain: Vec<ChainMember>,
    pub filters: MovepoolFilter,
    pub total_moves: usize,
    pub moves: Vec<MoveRecord>,
}

/// Resolves which moves species can learn, including moves inherited from pre-evolutions.
///
/// Holds no state of its own. All data comes from the [`DataStore`].
#[derive(Clone, Copy)]
pub struct MovepoolResolver<'d> {
    pub(crate) dex: Dex<'d>,
}

impl<'d> MovepoolResolver<'d> {
    /// Creates a new resolver, backed by the given [`DataStore`].
    pub fn new(data: &'d dyn DataStore) -> Self {
        Self {
            dex: Dex::new(data),
        }
    }

    /// The evolution chain leading to the species. See [`evolution_chain`].
    pub fn evolution_chain(&self, species: SpeciesId) -> Result<Vec<SpeciesId>> {
        evolution_chain(self.dex.data(), species)
    }

    /// Merges the learnsets of every species in the chain.
    ///
    /// The last species in the chain is the target. Entries are filtered first, then deduplicated
    /// by move: the target's own entry wins, otherwise the first ancestor in chain order. Entries
    /// for moves missing from the data store are skipped.
    ///
    /// Moves are ordered by level learned, then by name.
    pub fn moves_for_chain(
        &self,
        chain: &[SpeciesId],
        filter: &MovepoolFilter,
    ) -> Result<Vec<MoveRecord>> {
        let Some((target, ancestors)) = chain.split_last() else {
            return Ok(Vec::new());
        };

        let mut selected = HashMap::<MoveId, LearnEntry>::new();
        for species in iter::once(target).chain(ancestors) {
            for entry in self.dex.data().get_learn_entries(*species)? {
                if filter.matches(&entry) {
                    selected.entry(entry.move_id).or_insert(entry);
                }
            }
        }

        let mut species_names = HashMap::<SpeciesId, String>::new();
        let mut moves = Vec::with_capacity(selected.len());
        for entry in selected.into_values() {
            let Some(mov) = self.dex.mov(entry.move_id)? else {
                debug!(
                    "skipping learn entry of species {} for unknown move {}",
                    entry.species, entry.move_id
                );
                continue;
            };
            let learned_from = match species_names.entry(entry.species) {
                Entry::Occupied(name) => name.get().clone(),
                Entry::Vacant(slot) => slot.insert(self.dex.species_name(entry.species)?).clone(),
            };
            moves.push(MoveRecord::new(&entry, mov, learned_from));
        }

        moves.sort_by(|a, b| {
            a.level_learned
                .cmp(&b.level_learned)
                .then_with(|| a.name.cmp(&b.name))
                .then_with(|| a.move_id.cmp(&b.move_id))
        });
        Ok(moves)
    }

    /// The species' own movepool, ignoring pre-evolutions.
    pub fn moves_for_species(
        &self,
        species: SpeciesId,
        filter: &MovepoolFilter,
    ) -> Result<Vec<MoveRecord>> {
        self.moves_for_chain(&[species], filter)
    }

    /// The species' movepool merged with the movepools of all of its pre-evolutions.
    pub fn moves_for_species_with_evolutions(
        &self,
        species: SpeciesId,
        filter: &MovepoolFilter,
    ) -> Result<Vec<MoveRecord>> {
        self.moves_for_chain(&self.evolution_chain(species)?, filter)
    }

    /// The merged movepool, along with the named chain it was resolved from.
    pub fn movepool_with_evolutions(
        &self,
        species: SpeciesId,
        filter: &MovepoolFilter,
    ) -> Result<MovepoolWithEvolutions> {
        let chain = self.evolution_chain(species)?;
        let moves = self.moves_for_chain(&chain, filter)?;
        let evolution_chain = chain
            .iter()
            .map(|id| {
                Ok(ChainMember {
                    id: *id,
                    name: self.dex.species_name(*id)?,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(MovepoolWithEvolutions {
            pokemon_id: species,
            pokemon_name: self.dex.species_name(species)?,
            evolution_chain,
            filters: *filter,
            total_moves: moves.len(),
            moves,
        })
    }

    /// Moves the species learns on reaching exactly the given level, ordered by name.
    pub fn moves_learned_at_level(&self, species: SpeciesId, level: u8) -> Result<Vec<MoveRecord>> {
        Ok(self
            .moves_for_species(species, &MovepoolFilter::all())?
            .into_iter()
            .filter(|mov| mov.level_learned == level)
            .collect())
    }

    /// The species' own movepool grouped by level learned. Machine moves are grouped under zero.
    pub fn moves_by_level(&self, species: SpeciesId) -> Result<BTreeMap<u8, Vec<MoveRecord>>> {
        Ok(self
            .moves_for_species(species, &MovepoolFilter::all())?
            .into_iter()
            .into_group_map_by(|mov| mov.level_learned)
            .into_iter()
            .collect())
    }
}
