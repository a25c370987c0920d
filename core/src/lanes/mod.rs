//! Laning behavior: who farmed what, who stuck together, and the roles that follow.

mod buddies;
mod minions;
mod roles;


pub use buddies::{BUDDY_DISTANCE, BUDDY_WINDOW_END_SECS, BUDDY_WINDOW_START_SECS, BuddyFinder};
pub use minions::MinionTracker;
pub use roles::{ROLE_LEVEL_CAP, infer_roles};
