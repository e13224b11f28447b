use std::{
    env,
    fs::File,
    path::Path,
};

use ahash::HashMap;
use anyhow::{
    Context,
    Error,
    Result,
};
use serde::de::DeserializeOwned;

use crate::{
    EvolutionData,
    EvolutionRepository,
    LearnEntry,
    MoveData,
    MoveId,
    MoveRepository,
    SpeciesData,
    SpeciesId,
    SpeciesRepository,
};

/// An implementation of [`DataStore`][`crate::DataStore`] that holds all tables in memory.
///
/// Tables are either read from a directory of JSON files or supplied directly.
#[derive(Debug, Default)]
pub struct LocalDataStore {
    pub species: HashMap<SpeciesId, SpeciesData>,
    pub moves: HashMap<MoveId, MoveData>,
    pub learnsets: HashMap<SpeciesId, Vec<LearnEntry>>,
    pub evolutions: Vec<EvolutionData>,
    predecessors: HashMap<SpeciesId, Vec<SpeciesId>>,
}

impl LocalDataStore {
    /// Species file name.
    pub const SPECIES_FILE: &str = "species.json";
    /// Moves file name.
    pub const MOVES_FILE: &str = "moves.json";
    /// Learn entries file name.
    pub const LEARNSETS_FILE: &str = "learnsets.json";
    /// Evolutions file name.
    pub const EVOLUTIONS_FILE: &str = "evolutions.json";

    /// Creates a new instance of [`LocalDataStore`] that reads from the given root directory.
    ///
    /// Fails if the path does not exist, does not point to a directory, or any table cannot be
    /// read.
    pub fn new(root: String) -> Result<Self> {
        let root = Path::new(&root);
        if !root.is_dir() {
            return Err(Error::msg(format!(
                "Root directory for LocalDataStore ({}) does not exist",
                root.display(),
            )));
        }
        Ok(Self::from_tables(
            Self::read_table(root, Self::SPECIES_FILE)?,
            Self::read_table(root, Self::MOVES_FILE)?,
            Self::read_table(root, Self::LEARNSETS_FILE)?,
            Self::read_table(root, Self::EVOLUTIONS_FILE)?,
        ))
    }

    /// Creates a new instance of [`LocalDataStore`] that reads from the root directory at the given
    /// environment variable.
    pub fn new_from_env(env_var: &str) -> Result<Self> {
        Self::new(env::var(env_var).context(format!("{env_var} not defined"))?)
    }

    /// Creates a new instance of [`LocalDataStore`] from tables already in memory.
    pub fn from_tables<S, M, L, E>(species: S, moves: M, learn_entries: L, evolutions: E) -> Self
    where
        S: IntoIterator<Item = SpeciesData>,
        M: IntoIterator<Item = MoveData>,
        L: IntoIterator<Item = LearnEntry>,
        E: IntoIterator<Item = EvolutionData>,
    {
        let mut store = Self::default();
        store
            .species
            .extend(species.into_iter().map(|species| (species.id, species)));
        store
            .moves
            .extend(moves.into_iter().map(|mov| (mov.id, mov)));
        for entry in learn_entries {
            store.add_learn_entry(entry);
        }
        for evolution in evolutions {
            store.add_evolution(evolution);
        }
        store
    }

    /// Adds a single learn entry.
    pub fn add_learn_entry(&mut self, entry: LearnEntry) {
        self.learnsets.entry(entry.species).or_default().push(entry);
    }

    /// Adds a single evolution edge.
    pub fn add_evolution(&mut self, evolution: EvolutionData) {
        let predecessors = self.predecessors.entry(evolution.to).or_default();
        if !predecessors.contains(&evolution.from) {
            predecessors.push(evolution.from);
        }
        self.evolutions.push(evolution);
    }

    fn read_table<T: DeserializeOwned>(root: &Path, file: &str) -> Result<Vec<T>> {
        let path = root.join(file);
        let path_name = path.to_string_lossy().to_string();
        serde_json::from_reader(
            File::open(&path).context(format!("{path_name} could not be opened"))?,
        )
        .context(format!("failed to parse {path_name}"))
    }
}

impl SpeciesRepository for LocalDataStore {
    fn all_species_ids(&self, filter: &dyn Fn(&SpeciesData) -> bool) -> Result<Vec<SpeciesId>> {
        let mut ids = self
            .species
            .iter()
            .filter(|(_, species)| filter(species))
            .map(|(id, _)| *id)
            .collect::<Vec<_>>();
        ids.sort();
        Ok(ids)
    }

    fn get_species(&self, id: SpeciesId) -> Result<Option<SpeciesData>> {
        Ok(self.species.get(&id).cloned())
    }
}

impl MoveRepository for LocalDataStore {
    fn all_move_ids(&self, filter: &dyn Fn(&MoveData) -> bool) -> Result<Vec<MoveId>> {
        let mut ids = self
            .moves
            .iter()
            .filter(|(_, mov)| filter(mov))
            .map(|(id, _)| *id)
            .collect::<Vec<_>>();
        ids.sort();
        Ok(ids)
    }

    fn get_move(&self, id: MoveId) -> Result<Option<MoveData>> {
        Ok(self.moves.get(&id).cloned())
    }

    fn get_learn_entries(&self, species: SpeciesId) -> Result<Vec<LearnEntry>> {
        Ok(self.learnsets.get(&species).cloned().unwrap_or_default())
    }
}

impl EvolutionRepository for LocalDataStore {
    fn get_predecessors(&self, species: SpeciesId) -> Result<Vec<SpeciesId>> {
        Ok(self
            .predecessors
            .get(&species)
            .cloned()
            .unwrap_or_default())
    }

    fn get_evolutions_from(&self, species: SpeciesId) -> Result<Vec<EvolutionData>> {
        Ok(self
            .evolutions
            .iter()
            .filter(|evolution| evolution.from == species)
            .cloned()
            .collect())
    }
}
