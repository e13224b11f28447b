mod context;
mod error;
mod teambuilder_error;
mod validation_error;

pub use error::{
    WrapError,
    WrapOptionError,
    WrapResultError,
};
pub use teambuilder_error::{
    InvalidInputError,
    NotFoundError,
    invalid_input_error,
    not_found_error,
};
pub use validation_error::ValidationError;
