mod data_store;
mod error_assert;
mod rng;

pub use data_store::{
    TestDataStore,
    static_test_data_store,
};
pub use error_assert::{
    assert_error_is,
    assert_error_message,
};
pub use rng::ControlledRandomNumberGenerator;
