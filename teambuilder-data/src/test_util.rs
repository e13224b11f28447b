use core::fmt::Debug;

use pretty_assertions::assert_eq;
use serde::{
    Serialize,
    de::DeserializeOwned,
};

/// Asserts that the value serializes to the given JSON string value.
#[track_caller]
pub fn test_string_serialization<T>(value: T, expected: &str)
where
    T: Serialize,
{
    assert_eq!(
        serde_json::to_value(value).unwrap(),
        serde_json::Value::String(expected.to_owned())
    );
}

/// Asserts that the JSON string value deserializes to the given value.
#[track_caller]
pub fn test_string_deserialization<T>(value: &str, expected: T)
where
    T: DeserializeOwned + PartialEq + Debug,
{
    let got: T = serde_json::from_value(serde_json::Value::String(value.to_owned())).unwrap();
    assert_eq!(got, expected);
}
