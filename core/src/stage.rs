//! Game stages: early (< 10 min), mid (< 25 min), late.

use serde::{Deserialize, Serialize};

pub const EARLY_GAME_END_SECS: f64 = 600.0;
pub const MID_GAME_END_SECS: f64 = 1500.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameStage {
    Early,
    Mid,
    Late,
}

impl GameStage {
    pub fn at(seconds: f64) -> Self {
        let minutes = seconds / 60.0;
        if minutes >= 25.0 {
            Self::Late
        } else if minutes >= 10.0 {
            Self::Mid
        } else {
            Self::Early
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Early => "early",
            Self::Mid => "mid",
            Self::Late => "late",
        }
    }

    /// Length of this stage in a match of the given duration. Late game is
    /// whatever remains after 25 minutes.
    pub fn duration(self, match_duration: f64) -> f64 {
        match self {
            Self::Early => EARLY_GAME_END_SECS,
            Self::Mid => MID_GAME_END_SECS - EARLY_GAME_END_SECS,
            Self::Late => match_duration - MID_GAME_END_SECS,
        }
    }
}
