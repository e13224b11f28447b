use std::collections::BTreeSet;

use anyhow::Result;
use serde::{
    Deserialize,
    Serialize,
};
use teambuilder_data::{
    DataStore,
    EvolutionData,
    MoveData,
    MoveId,
    SpeciesData,
    SpeciesId,
    Type,
};

/// Name shown for a species missing from the data store.
pub(crate) fn fallback_species_name(id: SpeciesId) -> String {
    format!("Pokemon #{id}")
}

/// Name shown for a move missing from the data store.
pub(crate) fn fallback_move_name(id: MoveId) -> String {
    format!("Move #{id}")
}

/// Page size of species listings that do not ask for one.
pub const DEFAULT_SPECIES_PAGE_SIZE: usize = 20;

/// Query over the species or move catalog.
///
/// Results are always in ID order. `search` matches a case-insensitive substring of the name.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DexQuery {
    #[serde(default, rename = "type")]
    pub typ: Option<Type>,
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default)]
    pub limit: Option<usize>,
    #[serde(default)]
    pub offset: usize,
}

impl DexQuery {
    fn matches_name(&self, name: &str) -> bool {
        match &self.search {
            Some(search) => name.to_lowercase().contains(&search.to_lowercase()),
            None => true,
        }
    }

    fn page<T, I>(&self, ids: I, default_limit: Option<usize>) -> impl Iterator<Item = T>
    where
        I: IntoIterator<Item = T>,
    {
        let limit = self.limit.or(default_limit).unwrap_or(usize::MAX);
        ids.into_iter().skip(self.offset).take(limit)
    }
}

/// Read access to species and moves, backed by a [`DataStore`].
///
/// Lookups of missing resources degrade to [`None`], empty lists or placeholder names.
#[derive(Clone, Copy)]
pub struct Dex<'d> {
    data: &'d dyn DataStore,
}

impl<'d> Dex<'d> {
    /// Creates a new [`Dex`], backed by the given [`DataStore`].
    pub fn new(data: &'d dyn DataStore) -> Self {
        Self { data }
    }

    /// The underlying data store.
    pub fn data(&self) -> &'d dyn DataStore {
        self.data
    }

    /// Looks up a species.
    pub fn species(&self, id: SpeciesId) -> Result<Option<SpeciesData>> {
        self.data.get_species(id)
    }

    /// Looks up a move.
    pub fn mov(&self, id: MoveId) -> Result<Option<MoveData>> {
        self.data.get_move(id)
    }

    /// The display name of a species, or `"Pokemon #<id>"` if it does not exist.
    pub fn species_name(&self, id: SpeciesId) -> Result<String> {
        Ok(self
            .species(id)?
            .map(|species| species.name)
            .unwrap_or_else(|| fallback_species_name(id)))
    }

    /// The display name of a move, or `"Move #<id>"` if it does not exist.
    pub fn move_name(&self, id: MoveId) -> Result<String> {
        Ok(self
            .mov(id)?
            .map(|mov| mov.name)
            .unwrap_or_else(|| fallback_move_name(id)))
    }

    /// Lists species in Pokédex order, optionally only those with the given type.
    pub fn species_by_type(&self, typ: Option<Type>) -> Result<Vec<SpeciesData>> {
        let ids = match typ {
            Some(typ) => self.data.all_species_ids(&|species| species.has_type(typ))?,
            None => self.data.all_species_ids(&|_| true)?,
        };
        let mut species = Vec::with_capacity(ids.len());
        for id in ids {
            if let Some(data) = self.species(id)? {
                species.push(data);
            }
        }
        Ok(species)
    }

    /// Lists a page of species matching the query.
    ///
    /// Without an explicit limit, at most [`DEFAULT_SPECIES_PAGE_SIZE`] species are returned.
    pub fn species_list(&self, query: &DexQuery) -> Result<Vec<SpeciesData>> {
        let ids = self.data.all_species_ids(&|species| {
            query.typ.is_none_or(|typ| species.has_type(typ)) && query.matches_name(&species.name)
        })?;
        let mut species = Vec::new();
        for id in query.page(ids, Some(DEFAULT_SPECIES_PAGE_SIZE)) {
            if let Some(data) = self.species(id)? {
                species.push(data);
            }
        }
        Ok(species)
    }

    /// Lists a page of moves matching the query.
    ///
    /// Without an explicit limit, all matching moves are returned.
    pub fn move_list(&self, query: &DexQuery) -> Result<Vec<MoveData>> {
        let ids = self.data.all_move_ids(&|mov| {
            query.typ.is_none_or(|typ| mov.primary_type == typ) && query.matches_name(&mov.name)
        })?;
        let mut moves = Vec::new();
        for id in query.page(ids, None) {
            if let Some(data) = self.mov(id)? {
                moves.push(data);
            }
        }
        Ok(moves)
    }

    /// Every type held by at least one species, in type order.
    pub fn species_types(&self) -> Result<Vec<Type>> {
        let mut types = BTreeSet::new();
        for species in self.species_by_type(None)? {
            types.insert(species.primary_type);
            types.extend(species.secondary_type);
        }
        Ok(types.into_iter().collect())
    }

    /// Every type held by at least one move, in type order.
    pub fn move_types(&self) -> Result<Vec<Type>> {
        let mut types = BTreeSet::new();
        for id in self.data.all_move_ids(&|_| true)? {
            if let Some(mov) = self.mov(id)? {
                types.insert(mov.primary_type);
            }
        }
        Ok(types.into_iter().collect())
    }

    /// The evolutions out of a species, in data order.
    pub fn evolutions_from(&self, species: SpeciesId) -> Result<Vec<EvolutionData>> {
        self.data.get_evolutions_from(species)
    }
}
