use anyhow::Result;

use crate::{
    EvolutionData,
    LearnEntry,
    MoveData,
    MoveId,
    SpeciesData,
    SpeciesId,
};

/// Read-only lookup of species reference data.
pub trait SpeciesRepository: Send + Sync {
    /// Gets all species IDs, applying the given filter on the underlying data.
    fn all_species_ids(&self, filter: &dyn Fn(&SpeciesData) -> bool) -> Result<Vec<SpeciesId>>;
    /// Gets a species by ID.
    fn get_species(&self, id: SpeciesId) -> Result<Option<SpeciesData>>;
}

/// Read-only lookup of moves and the learn entries that connect them to species.
pub trait MoveRepository: Send + Sync {
    /// Gets all move IDs, applying the given filter on the underlying data.
    fn all_move_ids(&self, filter: &dyn Fn(&MoveData) -> bool) -> Result<Vec<MoveId>>;
    /// Gets a move by ID.
    fn get_move(&self, id: MoveId) -> Result<Option<MoveData>>;
    /// Gets every learn entry of a single species.
    ///
    /// Only the species' own entries are returned. Entries inherited from pre-evolutions are
    /// resolved by the caller.
    fn get_learn_entries(&self, species: SpeciesId) -> Result<Vec<LearnEntry>>;
}

/// Read-only lookup of the evolution graph.
pub trait EvolutionRepository: Send + Sync {
    /// Gets the IDs of all species that directly evolve into the given species.
    fn get_predecessors(&self, species: SpeciesId) -> Result<Vec<SpeciesId>>;
    /// Gets all evolutions out of the given species.
    fn get_evolutions_from(&self, species: SpeciesId) -> Result<Vec<EvolutionData>>;
}

/// Collection of tables for all reference data.
///
/// This trait can be implemented for different data sources, such as an external database or disk.
/// Lookups of missing resources are not errors: they return [`None`] or an empty list.
pub trait DataStore: SpeciesRepository + MoveRepository + EvolutionRepository {}

impl<T> DataStore for T where T: SpeciesRepository + MoveRepository + EvolutionRepository {}
