mod dex;

pub use dex::{
    DEFAULT_SPECIES_PAGE_SIZE,
    Dex,
    DexQuery,
};
