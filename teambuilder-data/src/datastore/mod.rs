mod data_store;
mod local;

pub use data_store::{
    DataStore,
    EvolutionRepository,
    MoveRepository,
    SpeciesRepository,
};
pub use local::LocalDataStore;
