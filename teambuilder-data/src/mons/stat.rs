use serde::{
    Deserialize,
    Serialize,
};
use serde_string_enum::{
    DeserializeLabeledStringEnum,
    SerializeLabeledStringEnum,
};

/// Lowest level a roster member can be.
pub const MIN_LEVEL: u8 = 1;
/// Highest level a roster member can be.
pub const MAX_LEVEL: u8 = 100;
/// Highest individual value for a single stat.
pub const MAX_IV: u8 = 15;
/// Highest effort value for a single stat.
pub const MAX_EV: u16 = u16::MAX;

/// A single stat.
///
/// The first generation has a single Special stat, used for both special attack and special
/// defense.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    SerializeLabeledStringEnum,
    DeserializeLabeledStringEnum,
)]
pub enum Stat {
    #[string = "hp"]
    HP,
    #[string = "atk"]
    #[alias = "Attack"]
    Atk,
    #[string = "def"]
    #[alias = "Defense"]
    Def,
    #[string = "spe"]
    #[alias = "Speed"]
    Spe,
    #[string = "spc"]
    #[alias = "Special"]
    Spc,
}

fn next_stat_for_iterator(stat: Stat) -> Option<Stat> {
    match stat {
        Stat::HP => Some(Stat::Atk),
        Stat::Atk => Some(Stat::Def),
        Stat::Def => Some(Stat::Spe),
        Stat::Spe => Some(Stat::Spc),
        Stat::Spc => None,
    }
}

/// Iterator over the entries of a [`StatTable`].
pub struct StatTableEntries<'s> {
    table: &'s StatTable,
    next_stat: Option<Stat>,
}

impl<'s> StatTableEntries<'s> {
    fn new(table: &'s StatTable) -> Self {
        Self {
            table,
            next_stat: Some(Stat::HP),
        }
    }
}

impl<'s> Iterator for StatTableEntries<'s> {
    type Item = (Stat, u16);

    fn next(&mut self) -> Option<Self::Item> {
        let stat = self.next_stat?;
        let value = self.table.get(stat);
        self.next_stat = next_stat_for_iterator(stat);
        Some((stat, value))
    }
}

/// A full table of the five stats.
///
/// Used for species base stats and for effort values. Field names serialize to their long form
/// (`attack`, `defense`, ...), which is what clients send.
#[derive(Debug, Default, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StatTable {
    #[serde(default)]
    pub hp: u16,
    #[serde(default, rename = "attack", alias = "atk")]
    pub atk: u16,
    #[serde(default, rename = "defense", alias = "def")]
    pub def: u16,
    #[serde(default, rename = "speed", alias = "spe")]
    pub spe: u16,
    #[serde(default, rename = "special", alias = "spc")]
    pub spc: u16,
}

impl StatTable {
    /// Returns the value for the given stat.
    pub fn get(&self, stat: Stat) -> u16 {
        match stat {
            Stat::HP => self.hp,
            Stat::Atk => self.atk,
            Stat::Def => self.def,
            Stat::Spe => self.spe,
            Stat::Spc => self.spc,
        }
    }

    /// Sets the given value in the stat table.
    pub fn set(&mut self, stat: Stat, value: u16) {
        let stat = match stat {
            Stat::HP => &mut self.hp,
            Stat::Atk => &mut self.atk,
            Stat::Def => &mut self.def,
            Stat::Spe => &mut self.spe,
            Stat::Spc => &mut self.spc,
        };
        *stat = value;
    }

    /// Creates an iterator over all stat entries, in HP, Attack, Defense, Speed, Special order.
    pub fn entries<'s>(&'s self) -> StatTableEntries<'s> {
        StatTableEntries::new(self)
    }
}

impl FromIterator<(Stat, u16)> for StatTable {
    fn from_iter<T: IntoIterator<Item = (Stat, u16)>>(iter: T) -> Self {
        let mut out = StatTable::default();
        for (stat, value) in iter {
            out.set(stat, value);
        }
        out
    }
}

impl<'s> IntoIterator for &'s StatTable {
    type IntoIter = StatTableEntries<'s>;
    type Item = (Stat, u16);
    fn into_iter(self) -> Self::IntoIter {
        self.entries()
    }
}

/// Individual values of a roster member.
///
/// There is no HP entry. The HP individual value is derived from the low bits of the other four.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IvTable {
    #[serde(default, rename = "attack", alias = "atk")]
    pub atk: u8,
    #[serde(default, rename = "defense", alias = "def")]
    pub def: u8,
    #[serde(default, rename = "speed", alias = "spe")]
    pub spe: u8,
    #[serde(default, rename = "special", alias = "spc")]
    pub spc: u8,
}

impl IvTable {
    /// Returns the value for the given stat, or [`None`] for HP.
    pub fn get(&self, stat: Stat) -> Option<u8> {
        match stat {
            Stat::HP => None,
            Stat::Atk => Some(self.atk),
            Stat::Def => Some(self.def),
            Stat::Spe => Some(self.spe),
            Stat::Spc => Some(self.spc),
        }
    }

    /// Checks if every value is zero, which callers treat as "not supplied".
    pub fn is_zero(&self) -> bool {
        self.atk == 0 && self.def == 0 && self.spe == 0 && self.spc == 0
    }

    /// Iterates over all stored entries.
    pub fn entries(&self) -> impl Iterator<Item = (Stat, u8)> {
        [
            (Stat::Atk, self.atk),
            (Stat::Def, self.def),
            (Stat::Spe, self.spe),
            (Stat::Spc, self.spc),
        ]
        .into_iter()
    }
}

#[cfg(test)]
mod stat_test {
    use crate::{
        mons::Stat,
        test_util::{
            test_string_deserialization,
            test_string_serialization,
        },
    };

    #[test]
    fn serializes_to_string() {
        test_string_serialization(Stat::HP, "hp");
        test_string_serialization(Stat::Atk, "atk");
        test_string_serialization(Stat::Def, "def");
        test_string_serialization(Stat::Spe, "spe");
        test_string_serialization(Stat::Spc, "spc");
    }

    #[test]
    fn deserializes_full_names() {
        test_string_deserialization("Attack", Stat::Atk);
        test_string_deserialization("Defense", Stat::Def);
        test_string_deserialization("Speed", Stat::Spe);
        test_string_deserialization("Special", Stat::Spc);
    }
}
