use teambuilder_data::{
    IvTable,
    MAX_IV,
    Stat,
    StatTable,
};
use teambuilder_prng::{
    PseudoRandomNumberGenerator,
    RealPseudoRandomNumberGenerator,
    rand_util,
};

/// Calculated stats of a roster member.
pub type PokemonStats = StatTable;

/// Derives the HP individual value from the low bit of each of the other four.
///
/// Attack contributes the highest bit, Special the lowest.
pub fn derive_hp_iv(atk: u8, def: u8, spe: u8, spc: u8) -> u8 {
    (atk % 2) * 8 + (def % 2) * 4 + (spe % 2) * 2 + (spc % 2)
}

/// Derives the HP individual value of an IV table.
pub fn hp_iv(ivs: &IvTable) -> u8 {
    derive_hp_iv(ivs.atk, ivs.def, ivs.spe, ivs.spc)
}

fn ev_bonus(ev: u16) -> f64 {
    (ev as f64).sqrt() / 8.0
}

/// Calculates the maximum HP stat.
///
/// `floor((base + iv + sqrt(ev) / 8 + 50) * level / 50) + 10`
///
/// The square root term stays fractional; only the whole bracketed expression is floored.
pub fn hp_stat(base_hp: u16, level: u8, hp_iv: u8, hp_ev: u16) -> u16 {
    let value =
        (base_hp as f64 + hp_iv as f64 + ev_bonus(hp_ev) + 50.0) * level as f64 / 50.0;
    value.floor() as u16 + 10
}

/// Calculates Attack, Defense, Speed or Special.
///
/// `floor((base + iv + sqrt(ev) / 8) * level / 50) + 5`
pub fn other_stat(base: u16, level: u8, iv: u8, ev: u16) -> u16 {
    let value = (base as f64 + iv as f64 + ev_bonus(ev)) * level as f64 / 50.0;
    value.floor() as u16 + 5
}

/// Calculates all five stats.
pub fn all_stats(base_stats: &StatTable, level: u8, ivs: &IvTable, evs: &StatTable) -> PokemonStats {
    base_stats
        .entries()
        .map(|(stat, base)| {
            let value = match ivs.get(stat) {
                Some(iv) => other_stat(base, level, iv, evs.get(stat)),
                None => hp_stat(base, level, hp_iv(ivs), evs.get(Stat::HP)),
            };
            (stat, value)
        })
        .collect()
}

/// Generates random individual values, each uniform over `[0, 15]`.
pub fn random_ivs(prng: &mut dyn PseudoRandomNumberGenerator) -> IvTable {
    let mut roll = || rand_util::range_inclusive(prng, 0, MAX_IV as u64) as u8;
    IvTable {
        atk: roll(),
        def: roll(),
        spe: roll(),
        spc: roll(),
    }
}

/// Generates random individual values from a freshly seeded generator.
pub fn random_ivs_from_entropy() -> IvTable {
    random_ivs(&mut RealPseudoRandomNumberGenerator::new(None))
}
