//! Stat arithmetic for roster members.
//!
//! Every function here is pure and performs no range checking. Level, IV and EV ranges are
//! validated by the roster layer before these functions are called.

mod stats;

pub use stats::{
    PokemonStats,
    all_stats,
    derive_hp_iv,
    hp_iv,
    hp_stat,
    other_stat,
    random_ivs,
    random_ivs_from_entropy,
};
