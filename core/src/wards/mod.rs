//! Ward lifecycle: placement, the enemies each ward sees, and how it went away.

mod tracker;

#[cfg(test)]
mod tracker_tests;

pub use tracker::{
    CLEAR_ATTACK_WINDOW_SECS, JsonWardLife, LiveWardsAverage, REVEAL_MERGE_SECS, RevealInterval,
    WardAttack, WardEndReason, WardLife, WardTracker, YELLOW_EXPIRY_SECS,
    YELLOW_EXPIRY_WARN_SECS,
};
