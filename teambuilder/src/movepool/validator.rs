use ahash::{
    HashSet,
    HashSetExt,
};
use anyhow::Result;
use log::debug;
use serde::{
    Deserialize,
    Serialize,
};
use teambuilder_data::{
    MoveId,
    SpeciesId,
};

use crate::{
    error::ValidationError,
    movepool::MovepoolResolver,
};

/// The maximum number of moves a roster member can know.
pub const MAX_MOVES: usize = 4;

/// Result of validating a candidate moveset.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovesetValidation {
    pub valid: bool,
    pub errors: Vec<String>,
}

impl MovesetValidation {
    fn from_errors(errors: Vec<String>) -> Self {
        Self {
            valid: errors.is_empty(),
            errors,
        }
    }

    /// Converts the validation into a [`Result`], failing with every problem found.
    pub fn into_result(self) -> Result<(), ValidationError> {
        if self.valid {
            Ok(())
        } else {
            Err(ValidationError::from_iter(self.errors))
        }
    }
}

/// The distinct moves of a moveset, in order of first appearance. Empty slots are dropped.
pub fn distinct_moves(candidates: &[Option<MoveId>]) -> Vec<MoveId> {
    let mut seen = HashSet::new();
    candidates
        .iter()
        .flatten()
        .copied()
        .filter(|id| seen.insert(*id))
        .collect()
}

impl<'d> MovepoolResolver<'d> {
    /// Validates that a species at the given level can know the candidate moves.
    ///
    /// A moveset with more than [`MAX_MOVES`] distinct moves fails with a single error and no
    /// further checks. Otherwise, every distinct move must be in the species' own learnset at or
    /// below `level`; moves inherited from pre-evolutions do not count here. Each move that is not
    /// learnable produces one error.
    pub fn validate_moveset(
        &self,
        species: SpeciesId,
        level: u8,
        candidates: &[Option<MoveId>],
    ) -> Result<MovesetValidation> {
        let moves = distinct_moves(candidates);
        if moves.len() > MAX_MOVES {
            return Ok(MovesetValidation::from_errors(vec![format!(
                "Pokemon can have at most {MAX_MOVES} moves"
            )]));
        }

        let learnable = self
            .dex
            .data()
            .get_learn_entries(species)?
            .into_iter()
            .filter(|entry| entry.available_at(level))
            .map(|entry| entry.move_id)
            .collect::<HashSet<_>>();

        let mut errors = Vec::new();
        for mov in moves {
            if !learnable.contains(&mov) {
                debug!("species {species} cannot learn move {mov} at level {level}");
                errors.push(format!(
                    "Pokemon cannot learn {} at level {level}",
                    self.dex.move_name(mov)?
                ));
            }
        }
        Ok(MovesetValidation::from_errors(errors))
    }
}

#[cfg(test)]
mod validator_test {
    use pretty_assertions::assert_eq;
    use teambuilder_data::{
        MoveId,
        SpeciesId,
    };
    use teambuilder_test_utils::TestDataStore;

    use crate::movepool::{
        MovepoolResolver,
        MovesetValidation,
        distinct_moves,
    };

    fn moves(ids: &[u16]) -> Vec<Option<MoveId>> {
        ids.iter().map(|id| Some(MoveId(*id))).collect()
    }

    fn valid() -> MovesetValidation {
        MovesetValidation {
            valid: true,
            errors: Vec::new(),
        }
    }

    fn invalid(errors: &[&str]) -> MovesetValidation {
        MovesetValidation {
            valid: false,
            errors: errors.iter().map(|error| error.to_string()).collect(),
        }
    }

    #[test]
    fn keeps_first_occurrence_order() {
        assert_eq!(
            distinct_moves(&[
                None,
                Some(MoveId(52)),
                Some(MoveId(10)),
                None,
                Some(MoveId(52)),
                Some(MoveId(45)),
            ]),
            vec![MoveId(52), MoveId(10), MoveId(45)]
        );
        assert_eq!(distinct_moves(&[None, None]), vec![]);
    }

    #[test]
    fn accepts_learnable_moves() {
        let data = TestDataStore::new();
        let resolver = MovepoolResolver::new(&data);
        assert_eq!(
            resolver
                .validate_moveset(SpeciesId(4), 5, &moves(&[10, 45]))
                .unwrap(),
            valid()
        );
        assert_eq!(
            resolver
                .validate_moveset(SpeciesId(4), 5, &[])
                .unwrap(),
            valid()
        );
    }

    #[test]
    fn rejects_moves_above_level() {
        let data = TestDataStore::new();
        let resolver = MovepoolResolver::new(&data);
        assert_eq!(
            resolver
                .validate_moveset(SpeciesId(4), 5, &moves(&[10, 52]))
                .unwrap(),
            invalid(&["Pokemon cannot learn Ember at level 5"])
        );
        assert_eq!(
            resolver
                .validate_moveset(SpeciesId(4), 9, &moves(&[10, 52]))
                .unwrap(),
            valid()
        );
    }

    #[test]
    fn machine_moves_are_learnable_at_any_level() {
        let data = TestDataStore::new();
        let resolver = MovepoolResolver::new(&data);
        assert_eq!(
            resolver
                .validate_moveset(SpeciesId(4), 1, &moves(&[34]))
                .unwrap(),
            valid()
        );
    }

    #[test]
    fn ignores_moves_from_pre_evolutions() {
        let data = TestDataStore::new();
        let resolver = MovepoolResolver::new(&data);
        assert_eq!(
            resolver
                .validate_moveset(SpeciesId(6), 50, &moves(&[10, 45]))
                .unwrap(),
            invalid(&["Pokemon cannot learn Growl at level 50"])
        );
    }

    #[test]
    fn rejects_more_than_four_distinct_moves_alone() {
        let data = TestDataStore::new();
        let resolver = MovepoolResolver::new(&data);
        assert_eq!(
            resolver
                .validate_moveset(SpeciesId(4), 5, &moves(&[10, 45, 52, 53, 17]))
                .unwrap(),
            invalid(&["Pokemon can have at most 4 moves"])
        );
    }

    #[test]
    fn duplicates_and_empty_slots_do_not_count() {
        let data = TestDataStore::new();
        let resolver = MovepoolResolver::new(&data);
        let mut candidates = moves(&[10, 10, 10, 10, 10, 45]);
        candidates.push(None);
        assert_eq!(
            resolver
                .validate_moveset(SpeciesId(4), 5, &candidates)
                .unwrap(),
            valid()
        );
    }

    #[test]
    fn names_unknown_moves_by_id() {
        let data = TestDataStore::new();
        let resolver = MovepoolResolver::new(&data);
        assert_eq!(
            resolver
                .validate_moveset(SpeciesId(4), 5, &moves(&[777, 52]))
                .unwrap(),
            invalid(&[
                "Pokemon cannot learn Move #777 at level 5",
                "Pokemon cannot learn Ember at level 5",
            ])
        );
    }

    #[test]
    fn unknown_species_learns_nothing() {
        let data = TestDataStore::new();
        let resolver = MovepoolResolver::new(&data);
        assert_eq!(
            resolver
                .validate_moveset(SpeciesId(404), 50, &moves(&[33]))
                .unwrap(),
            invalid(&["Pokemon cannot learn Tackle at level 50"])
        );
    }

    #[test]
    fn converts_to_validation_error() {
        assert!(valid().into_result().is_ok());
        let error = invalid(&["a", "b"]).into_result().unwrap_err();
        assert_eq!(error.problems().collect::<Vec<_>>(), vec!["a", "b"]);
    }
}
