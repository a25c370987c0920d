//! Shared match model for lolstats.
//!
//! Plain serializable data only: the roster, map positions and the canonical event
//! stream that every stats generator consumes. Analysis logic lives in `lolstats-core`.

pub mod canonical;
pub mod config;
pub mod formatting;
mod geometry;
mod roster;

pub use canonical::{
    ActorType, Attack, BuildingKill, CanonicalEvent, CanonicalMatch, Damage, Death, EventKind,
    LevelUp, StateUpdate, WardDeath, WardItemType, WardKind, WardPlaced, match_duration,
};
pub use config::WorkerConfig;
pub use geometry::Position;
pub use roster::{
    BLUE_TEAM, Participant, RED_TEAM, RolePosition, enemy_team_id, is_participant, same_team,
    team_id,
};
