use std::sync::OnceLock;

use ahash::{
    HashMap,
    HashMapExt,
};
use anyhow::Result;
use teambuilder_data::{
    EvolutionData,
    EvolutionMethod,
    EvolutionRepository,
    LearnEntry,
    LocalDataStore,
    MoveData,
    MoveId,
    MoveRepository,
    SpeciesData,
    SpeciesId,
    SpeciesRepository,
    StatTable,
    Type,
};

fn species(
    id: u16,
    name: &str,
    primary_type: Type,
    secondary_type: Option<Type>,
    [hp, atk, def, spe, spc]: [u16; 5],
) -> SpeciesData {
    SpeciesData {
        id: SpeciesId(id),
        name: name.to_owned(),
        primary_type,
        secondary_type,
        base_stats: StatTable {
            hp,
            atk,
            def,
            spe,
            spc,
        },
        entry: None,
    }
}

fn mov(
    id: u16,
    name: &str,
    primary_type: Type,
    power: Option<u16>,
    accuracy: Option<u8>,
    pp: u8,
) -> MoveData {
    MoveData {
        id: MoveId(id),
        name: name.to_owned(),
        primary_type,
        power,
        accuracy,
        pp,
        effect: String::new(),
    }
}

fn learnset(species: u16, moves: &[(u16, u8)]) -> impl Iterator<Item = LearnEntry> + '_ {
    moves.iter().map(move |(move_id, level_learned)| LearnEntry {
        species: SpeciesId(species),
        move_id: MoveId(*move_id),
        level_learned: *level_learned,
    })
}

fn evolution(
    from: u16,
    to: u16,
    method: EvolutionMethod,
    minimum_level: Option<u8>,
    item: Option<&str>,
) -> EvolutionData {
    EvolutionData {
        from: SpeciesId(from),
        to: SpeciesId(to),
        method,
        minimum_level,
        item: item.map(|item| item.to_owned()),
        trade_required: method == EvolutionMethod::Trade,
    }
}

fn fixture_species() -> Vec<SpeciesData> {
    vec![
        species(1, "Bulbasaur", Type::Grass, Some(Type::Poison), [45, 49, 49, 45, 65]),
        species(2, "Ivysaur", Type::Grass, Some(Type::Poison), [60, 62, 63, 60, 80]),
        species(3, "Venusaur", Type::Grass, Some(Type::Poison), [80, 82, 83, 80, 100]),
        species(4, "Charmander", Type::Fire, None, [39, 52, 43, 65, 50]),
        species(5, "Charmeleon", Type::Fire, None, [58, 64, 58, 80, 65]),
        species(6, "Charizard", Type::Fire, Some(Type::Flying), [78, 84, 78, 100, 85]),
        species(25, "Pikachu", Type::Electric, None, [35, 55, 30, 90, 50]),
        species(26, "Raichu", Type::Electric, None, [60, 90, 55, 100, 90]),
        species(133, "Eevee", Type::Normal, None, [55, 55, 50, 55, 65]),
        species(134, "Vaporeon", Type::Water, None, [130, 65, 60, 65, 110]),
        species(135, "Jolteon", Type::Electric, None, [65, 65, 60, 130, 110]),
        species(136, "Flareon", Type::Fire, None, [65, 130, 60, 65, 110]),
        // Broken data: 900 -> 901 -> 902 -> 900.
        species(900, "Loop A", Type::Normal, None, [50, 50, 50, 50, 50]),
        species(901, "Loop B", Type::Normal, None, [50, 50, 50, 50, 50]),
        species(902, "Loop C", Type::Normal, None, [50, 50, 50, 50, 50]),
        // Diamond: 910 -> {911, 912} -> 913.
        species(910, "Diamond Root", Type::Normal, None, [50, 50, 50, 50, 50]),
        species(911, "Diamond Left", Type::Normal, None, [50, 50, 50, 50, 50]),
        species(912, "Diamond Right", Type::Normal, None, [50, 50, 50, 50, 50]),
        species(913, "Diamond Tip", Type::Normal, None, [50, 50, 50, 50, 50]),
    ]
}

fn fixture_moves() -> Vec<MoveData> {
    vec![
        mov(10, "Scratch", Type::Normal, Some(40), Some(100), 35),
        mov(14, "Swords Dance", Type::Normal, None, None, 30),
        mov(17, "Wing Attack", Type::Flying, Some(35), Some(100), 35),
        mov(22, "Vine Whip", Type::Grass, Some(35), Some(100), 10),
        mov(33, "Tackle", Type::Normal, Some(35), Some(95), 35),
        mov(34, "Body Slam", Type::Normal, Some(85), Some(100), 15),
        mov(45, "Growl", Type::Normal, None, Some(100), 40),
        mov(52, "Ember", Type::Fire, Some(40), Some(100), 25),
        mov(53, "Flamethrower", Type::Fire, Some(95), Some(100), 15),
        mov(55, "Water Gun", Type::Water, Some(40), Some(100), 25),
        mov(75, "Razor Leaf", Type::Grass, Some(55), Some(95), 25),
        mov(76, "Solar Beam", Type::Grass, Some(120), Some(100), 10),
        mov(84, "Thunder Shock", Type::Electric, Some(40), Some(100), 30),
        mov(85, "Thunderbolt", Type::Electric, Some(95), Some(100), 15),
        mov(86, "Thunder Wave", Type::Electric, None, Some(100), 20),
        mov(98, "Quick Attack", Type::Normal, Some(40), Some(100), 30),
        mov(129, "Swift", Type::Normal, Some(60), None, 20),
    ]
}

fn fixture_learn_entries() -> Vec<LearnEntry> {
    [
        learnset(1, &[(33, 1), (45, 1), (22, 13), (75, 27), (34, 0), (14, 0)]),
        learnset(2, &[(33, 1), (45, 1), (22, 15), (75, 30), (34, 0), (14, 0)]),
        learnset(3, &[(33, 1), (45, 1), (75, 43), (76, 65), (34, 0)]),
        learnset(4, &[(10, 1), (45, 1), (52, 9), (34, 0)]),
        learnset(5, &[(10, 1), (45, 1), (52, 9), (53, 46)]),
        learnset(6, &[(10, 1), (52, 9), (17, 36), (53, 55)]),
        learnset(25, &[(84, 1), (45, 1), (86, 9), (98, 16), (85, 0), (129, 0)]),
        // Move 999 does not exist.
        learnset(26, &[(84, 1), (45, 1), (86, 1), (85, 0), (999, 20)]),
        learnset(133, &[(33, 1), (98, 27), (129, 0)]),
        learnset(134, &[(33, 1), (55, 31)]),
        learnset(135, &[(33, 1), (84, 31)]),
        learnset(136, &[(33, 1), (52, 31)]),
        learnset(900, &[(33, 1)]),
        learnset(901, &[(45, 5)]),
        learnset(902, &[(52, 10)]),
        learnset(910, &[(33, 1)]),
        learnset(911, &[(45, 5)]),
        learnset(912, &[(10, 5)]),
        learnset(913, &[(52, 10)]),
    ]
    .into_iter()
    .flatten()
    .collect()
}

fn fixture_evolutions() -> Vec<EvolutionData> {
    vec![
        evolution(1, 2, EvolutionMethod::Level, Some(16), None),
        evolution(2, 3, EvolutionMethod::Level, Some(32), None),
        evolution(4, 5, EvolutionMethod::Level, Some(16), None),
        evolution(5, 6, EvolutionMethod::Level, Some(36), None),
        evolution(25, 26, EvolutionMethod::Item, None, Some("Thunder Stone")),
        evolution(133, 134, EvolutionMethod::Item, None, Some("Water Stone")),
        evolution(133, 135, EvolutionMethod::Item, None, Some("Thunder Stone")),
        evolution(133, 136, EvolutionMethod::Item, None, Some("Fire Stone")),
        evolution(900, 901, EvolutionMethod::Level, Some(10), None),
        evolution(901, 902, EvolutionMethod::Level, Some(20), None),
        evolution(902, 900, EvolutionMethod::Level, Some(30), None),
        evolution(910, 911, EvolutionMethod::Level, Some(10), None),
        evolution(910, 912, EvolutionMethod::Level, Some(10), None),
        evolution(911, 913, EvolutionMethod::Level, Some(20), None),
        evolution(912, 913, EvolutionMethod::Level, Some(20), None),
    ]
}

/// Wrapper around a [`LocalDataStore`] for testing.
///
/// [`TestDataStore::new`] loads a small fixture: the Bulbasaur and Charmander lines, Pikachu and
/// Raichu, Eevee with its three branches, a cyclic line (900-902) and a diamond-shaped line
/// (910-913). Fake moves can be layered on top for a single test.
pub struct TestDataStore {
    local: LocalDataStore,
    fake_moves: HashMap<MoveId, MoveData>,
}

impl TestDataStore {
    pub fn new() -> Self {
        Self::wrap(LocalDataStore::from_tables(
            fixture_species(),
            fixture_moves(),
            fixture_learn_entries(),
            fixture_evolutions(),
        ))
    }

    pub fn new_from_env(env_var: &str) -> Result<Self> {
        Ok(Self::wrap(LocalDataStore::new_from_env(env_var)?))
    }

    fn wrap(local: LocalDataStore) -> Self {
        Self {
            local,
            fake_moves: HashMap::new(),
        }
    }

    pub fn add_fake_move(&mut self, move_data: MoveData) {
        self.fake_moves.insert(move_data.id, move_data);
    }

    pub fn add_learn_entry(&mut self, entry: LearnEntry) {
        self.local.add_learn_entry(entry);
    }

    pub fn add_evolution(&mut self, evolution: EvolutionData) {
        self.local.add_evolution(evolution);
    }
}

impl Default for TestDataStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SpeciesRepository for TestDataStore {
    fn all_species_ids(&self, filter: &dyn Fn(&SpeciesData) -> bool) -> Result<Vec<SpeciesId>> {
        self.local.all_species_ids(filter)
    }

    fn get_species(&self, id: SpeciesId) -> Result<Option<SpeciesData>> {
        self.local.get_species(id)
    }
}

impl MoveRepository for TestDataStore {
    fn all_move_ids(&self, filter: &dyn Fn(&MoveData) -> bool) -> Result<Vec<MoveId>> {
        let mut ids = self.local.all_move_ids(&|mov| {
            !self.fake_moves.contains_key(&mov.id) && filter(mov)
        })?;
        ids.extend(
            self.fake_moves
                .values()
                .filter(|mov| filter(mov))
                .map(|mov| mov.id),
        );
        ids.sort();
        Ok(ids)
    }

    fn get_move(&self, id: MoveId) -> Result<Option<MoveData>> {
        match self.fake_moves.get(&id) {
            Some(move_data) => Ok(Some(move_data.clone())),
            None => self.local.get_move(id),
        }
    }

    fn get_learn_entries(&self, species: SpeciesId) -> Result<Vec<LearnEntry>> {
        self.local.get_learn_entries(species)
    }
}

impl EvolutionRepository for TestDataStore {
    fn get_predecessors(&self, species: SpeciesId) -> Result<Vec<SpeciesId>> {
        self.local.get_predecessors(species)
    }

    fn get_evolutions_from(&self, species: SpeciesId) -> Result<Vec<EvolutionData>> {
        self.local.get_evolutions_from(species)
    }
}

/// A fixture [`TestDataStore`] that lives for the rest of the test binary.
///
/// Useful for services that borrow their data store for `'static`.
pub fn static_test_data_store() -> &'static TestDataStore {
    static DATA: OnceLock<TestDataStore> = OnceLock::new();
    DATA.get_or_init(TestDataStore::new)
}
