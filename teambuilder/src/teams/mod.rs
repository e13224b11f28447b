mod member;
mod roster;
mod team;

pub use member::{
    RosterMember,
    RosterMemberData,
    RosterMemberUpdate,
    RosterMemberWithStats,
};
pub use roster::{
    DEFAULT_STATUS,
    Roster,
};
pub use team::{
    MAX_TEAM_SIZE,
    Team,
    TeamCapacity,
};
