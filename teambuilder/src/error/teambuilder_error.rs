use std::fmt::Display;

use anyhow::Error;
use thiserror::Error;

use crate::error::WrapError;

/// Caller input that violates a roster or team rule.
///
/// Examples are an out-of-range level, a full team or an attempt to delete a team's last member.
#[derive(Error, Debug)]
#[error("{message}")]
pub struct InvalidInputError {
    message: String,
}

impl InvalidInputError {
    /// Constructs a new invalid input error.
    pub fn new<M>(message: M) -> Self
    where
        M: Display,
    {
        Self {
            message: message.to_string(),
        }
    }
}

/// A reference to a team, member or species that does not exist.
#[derive(Error, Debug)]
#[error("{target} not found")]
pub struct NotFoundError {
    target: String,
}

impl NotFoundError {
    /// Constructs a new not found error.
    pub fn new<M>(target: M) -> Self
    where
        M: Display,
    {
        Self {
            target: target.to_string(),
        }
    }
}

/// Helper for an [`struct@Error`] wrapping an [`InvalidInputError`].
#[track_caller]
pub fn invalid_input_error<M>(message: M) -> Error
where
    M: Display,
{
    InvalidInputError::new(message).wrap_error()
}

/// Helper for an [`struct@Error`] wrapping a [`NotFoundError`].
#[track_caller]
pub fn not_found_error<M>(target: M) -> Error
where
    M: Display,
{
    NotFoundError::new(target).wrap_error()
}
