mod service;

pub use service::{
    TeamBuilderService,
    TeamBuilderServiceOptions,
};
