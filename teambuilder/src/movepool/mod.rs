mod chain;
mod movepool;
mod validator;

pub use chain::evolution_chain;
pub use movepool::{
    ChainMember,
    MoveRecord,
    MovepoolFilter,
    MovepoolResolver,
    MovepoolWithEvolutions,
};
pub use validator::{
    MAX_MOVES,
    MovesetValidation,
    distinct_moves,
};
