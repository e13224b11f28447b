//! Core of the Pokémon team builder.
//!
//! [`movepool::MovepoolResolver`] answers which moves a species can learn across its evolution
//! chain and validates movesets. [`teams::Roster`] applies the rules for creating and changing
//! roster members. Reference data is read through a [`teambuilder_data::DataStore`].

pub mod dex;
pub mod error;
pub mod movepool;
pub mod teams;
