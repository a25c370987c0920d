//! Team fight detection and summaries.
//!
//! A "team fight" here is any engagement between champions of both teams, so a
//! 1v1 counts as well. Fights start when a champion loses a large chunk of health in a
//! short burst, or dies, and end once everyone involved has stopped trading damage and
//! moved apart.
//!
//! Players are split into participants (near the initial target when the fight was
//! detected) and influencers (joined from outside, e.g. teleports or global ults, by
//! damaging a participant).

mod detector;
mod history;
mod significance;


pub use detector::TeamFightDetector;
pub use history::{Snapshot, SnapshotHistory, WINDOW_GRANULARITY_SECS, WINDOW_SECS};
pub use significance::{FightCause, SignificantFights, significant_kills_and_deaths};

use std::collections::{BTreeMap, BTreeSet};

use lolstats_types::{enemy_team_id, team_id};
use serde::{Deserialize, Serialize};

/// Damage events closer together than this form one continuous run.
pub const CONTINUOUS_DAMAGE_SECS: f64 = 3.0;
/// A fight ends once nobody involved has dealt or taken damage for this long.
pub const NO_DAMAGE_END_SECS: f64 = 3.0;
/// About one screen at 1080p.
pub const PARTICIPANT_DISTANCE: f64 = 2000.0;
pub const CHASE_DISTANCE: f64 = 1000.0;
/// Percent of max health lost in one run that starts a fight.
pub const START_DAMAGE_PERCENT: f64 = 30.0;
/// A player lacks vision if unseen between these many seconds before the fight.
pub const VISION_WINDOW_MAX_SECS: f64 = 8.0;
pub const VISION_WINDOW_MIN_SECS: f64 = 4.0;
pub const CHAMPION_VISION_RANGE: f64 = 1200.0;
pub const TURRET_VISION_RANGE: f64 = 1095.0;
/// Net gold swing needed for a kill or death to be significant.
pub const SIGNIFICANT_GOLD_SWING: i64 = 300;

const PARTICIPANT_WEIGHT: f64 = 1.0;
const INFLUENCER_WEIGHT: f64 = 0.5;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TeamFight {
    pub begin: f64,
    pub end: f64,
    pub participant_ids: BTreeSet<i64>,
    pub influencer_ids: BTreeSet<i64>,
    pub initial_target: i64,
    pub team_kills: BTreeSet<i64>,
    pub team_deaths: BTreeSet<i64>,
    pub sum_team_health_percent: f64,
    pub sum_enemy_health_percent: f64,
    pub participant_level: i64,
    pub enemy_level_average: f64,
    pub team_gold_spent: i64,
    pub enemy_gold_spent: i64,
    pub neutral_damage_taken: f64,
    pub enemy_neutral_damage_taken: f64,
    pub team_summoner_spells: usize,
    pub enemy_summoner_spells: usize,
    pub enemies_in_vision: BTreeMap<i64, bool>,
    pub allies_in_vision: BTreeMap<i64, bool>,
    #[serde(rename = "team_gold_start")]
    pub team_gold_at_start: i64,
    #[serde(rename = "enemy_gold_start")]
    pub enemy_gold_at_start: i64,
    pub net_gold_diff: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kill_cause: Option<FightCause>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub death_cause: Option<FightCause>,
    /// Percent of max health the subject took off each victim
    pub damage_dealt: BTreeMap<i64, f64>,
    /// Percent of max health each enemy lost in the fight
    pub enemy_damage_taken: BTreeMap<i64, f64>,
}

impl TeamFight {
    /// Weighted head count of `participant_id`'s side minus the other side.
    pub fn balance(&self, participant_id: i64) -> f64 {
        let mine = team_id(participant_id);
        let theirs = enemy_team_id(participant_id);
        let mut power: BTreeMap<i64, f64> = BTreeMap::new();
        for &id in &self.participant_ids {
            *power.entry(team_id(id)).or_default() += PARTICIPANT_WEIGHT;
        }
        for &id in &self.influencer_ids {
            *power.entry(team_id(id)).or_default() += INFLUENCER_WEIGHT;
        }
        power.get(&mine).copied().unwrap_or(0.0) - power.get(&theirs).copied().unwrap_or(0.0)
    }

    pub fn balance_class(&self, participant_id: i64) -> FightBalance {
        FightBalance::of(self.balance(participant_id))
    }

    pub fn involves(&self, participant_id: i64) -> bool {
        self.participant_ids.contains(&participant_id)
            || self.influencer_ids.contains(&participant_id)
    }

    /// Participants on `team` and on the other side, in id order.
    pub fn split_participants(&self, team: i64) -> (Vec<i64>, Vec<i64>) {
        self.participant_ids
            .iter()
            .copied()
            .partition(|&id| team_id(id) == team)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FightBalance {
    Favorable,
    Balanced,
    Unfavorable,
}

impl FightBalance {
    pub fn of(balance: f64) -> Self {
        if balance > 0.0 {
            Self::Favorable
        } else if balance < 0.0 {
            Self::Unfavorable
        } else {
            Self::Balanced
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TeamFightAggregate {
    pub count: i64,
    pub kills: i64,
    pub deaths: i64,
    /// (kills − deaths) / count
    pub net_kills: f64,
}

impl TeamFightAggregate {
    pub fn recompute_net_kills(&mut self) {
        self.net_kills = (self.kills - self.deaths) as f64 / self.count.max(1) as f64;
    }
}

pub fn aggregate(
    fights: &[TeamFight],
    participant_id: i64,
    class: FightBalance,
) -> TeamFightAggregate {
    let mut agg = TeamFightAggregate::default();
    for fight in fights {
        if fight.balance_class(participant_id) != class {
            continue;
        }
        agg.count += 1;
        agg.kills += fight.team_kills.len() as i64;
        agg.deaths += fight.team_deaths.len() as i64;
    }
    agg.recompute_net_kills();
    agg
}
