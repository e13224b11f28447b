mod evolution;
mod species_data;
mod stat;
mod r#type;

pub use evolution::{
    EvolutionData,
    EvolutionMethod,
};
pub use species_data::{
    SpeciesData,
    SpeciesId,
};
pub use stat::{
    IvTable,
    MAX_EV,
    MAX_IV,
    MAX_LEVEL,
    MIN_LEVEL,
    Stat,
    StatTable,
    StatTableEntries,
};
pub use r#type::Type;
