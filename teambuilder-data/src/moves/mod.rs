mod learn_entry;
mod move_data;

pub use learn_entry::{
    LearnEntry,
    LearnMethod,
};
pub use move_data::{
    MoveData,
    MoveId,
};
