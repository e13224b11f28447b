use std::fmt::{
    Debug,
    Display,
};

use anyhow::Error;
use pretty_assertions::assert_eq;

/// [`assert`]s that the result is an [`Error`] with the given message.
#[track_caller]
pub fn assert_error_message<T>(result: Result<T, Error>, message: &str)
where
    T: Debug,
{
    match result {
        Ok(value) => panic!("expected error \"{message}\", got {value:?}"),
        Err(err) => assert_eq!(err.to_string(), message),
    }
}

/// [`assert`]s that the result is an [`Error`] wrapping an error of type `E`.
#[track_caller]
pub fn assert_error_is<E, T>(result: Result<T, Error>)
where
    E: Display + Debug + Send + Sync + 'static,
    T: Debug,
{
    match result {
        Ok(value) => panic!(
            "expected {} error, got {value:?}",
            std::any::type_name::<E>()
        ),
        Err(err) => assert!(
            err.downcast_ref::<E>().is_some(),
            "\"{err:#}\" is not a {}",
            std::any::type_name::<E>()
        ),
    }
}
