use serde::{Deserialize, Serialize};

pub const BLUE_TEAM: i64 = 100;
pub const RED_TEAM: i64 = 200;

/// One of the ten champions in a match, numbered 1–10 for its whole duration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Participant {
    pub participant_id: i64,
    pub summoner_id: i64,
    pub summoner_name: String,
    pub champion_id: i64,
    pub tier: String,
    pub division: String,
    /// Summoner spell bound to the first summoner slot
    #[serde(rename = "spell_1")]
    pub spell1: String,
    /// Summoner spell bound to the second summoner slot
    #[serde(rename = "spell_2")]
    pub spell2: String,
}

impl Participant {
    pub fn team_id(&self) -> i64 {
        team_id(self.participant_id)
    }
}

/// Participants 1–5 play for blue, 6–10 for red. Anything else has no team.
pub fn team_id(participant_id: i64) -> i64 {
    match participant_id {
        1..=5 => BLUE_TEAM,
        6..=10 => RED_TEAM,
        _ => 0,
    }
}

pub fn enemy_team_id(participant_id: i64) -> i64 {
    match team_id(participant_id) {
        BLUE_TEAM => RED_TEAM,
        RED_TEAM => BLUE_TEAM,
        _ => 0,
    }
}

#[inline]
pub fn is_participant(id: i64) -> bool {
    (1..=10).contains(&id)
}

#[inline]
pub fn same_team(a: i64, b: i64) -> bool {
    team_id(a) == team_id(b)
}

/// Lane role inferred from early-game behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RolePosition {
    #[serde(rename = "top")]
    Top,
    #[serde(rename = "mid")]
    Mid,
    #[serde(rename = "adc")]
    Adc,
    #[serde(rename = "jng")]
    Jungle,
    #[serde(rename = "sup")]
    Support,
}
