//! Advanced per-player statistics for one match.
//!
//! [`compute_advanced`] replays the canonical stream once, feeding every tracker, and
//! assembles the results into an [`AdvancedStats`]. [`average_advanced_stats`] folds
//! several of those into a per-player average.

mod aggregator;
mod average;
mod carry_focus;
mod damage_map;


pub use aggregator::{KILL_CREDIT_SECS, POSITION_SAMPLE_SECS, compute_advanced};
pub use average::average_advanced_stats;
pub use carry_focus::{FIGHTS_FROM_SECS, carry_focus_efficiency};
pub use damage_map::{DamageMap, DamageSummary};

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use lolstats_types::{Position, RolePosition, WorkerConfig};
use serde::{Deserialize, Serialize};

use crate::combos::ComboSummary;
use crate::coverage::DEFAULT_GRID_SIZE;
use crate::team_fights::{SignificantFights, TeamFight, TeamFightAggregate};
use crate::time_management::TimeFrame;
use crate::wards::{JsonWardLife, LiveWardsAverage};

/// Tunables for one analysis run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnalysisOptions {
    /// Cells per side of the map coverage grid
    pub coverage_grid_size: u32,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            coverage_grid_size: DEFAULT_GRID_SIZE,
        }
    }
}

impl From<&WorkerConfig> for AnalysisOptions {
    fn from(config: &WorkerConfig) -> Self {
        Self {
            coverage_grid_size: config.coverage_grid_size,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PositionTime {
    pub seconds: f64,
    pub position: Position,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdvancedStats {
    pub participant_id: i64,
    pub summoner_id: i64,
    pub team_id: i64,
    pub match_id: i64,
    pub platform_id: String,
    /// Stamped by whoever stores the result; never set by the analysis itself.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<DateTime<Utc>>,

    #[serde(rename = "champ_positions", skip_serializing_if = "Vec::is_empty")]
    pub positions: Vec<PositionTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role_position: Option<RolePosition>,

    /// Champion-on-champion only
    #[serde(skip_serializing_if = "DamageMap::is_empty")]
    pub damage_dealt: DamageMap,
    #[serde(skip_serializing_if = "DamageMap::is_empty")]
    pub damage_taken: DamageMap,
    pub damage_taken_percent_per_death: f64,
    pub carry_focus_efficiency: f64,

    pub attacks_per_minute: f64,
    pub ability_counts: BTreeMap<String, i64>,
    pub ability_counts_zero_to_ten: BTreeMap<String, i64>,
    pub map_coverages: BTreeMap<String, f64>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub time_detail: Vec<TimeFrame>,
    pub useful_percent: BTreeMap<String, f64>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub team_fights: Vec<TeamFight>,
    pub favorable_team_fights: TeamFightAggregate,
    pub balanced_team_fights: TeamFightAggregate,
    pub unfavorable_team_fights: TeamFightAggregate,

    /// Creator participant → every ward they placed
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub ward_lives: BTreeMap<i64, Vec<JsonWardLife>>,
    pub reveals_per_ward_average: f64,
    pub live_wards_average: LiveWardsAverage,

    #[serde(rename = "favorable_team_fight_percent")]
    pub favorable_fight_percent: f64,
    pub good_kills: SignificantFights,
    pub bad_deaths: SignificantFights,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub combos: Vec<ComboSummary>,
    pub combo_damage_per_minute: f64,
}

impl AdvancedStats {
    /// Drop the bulky per-event detail, keeping only the numbers.
    pub fn trim_non_stats(&mut self) {
        self.positions = Vec::new();
        self.damage_dealt = DamageMap::new();
        self.damage_taken = DamageMap::new();
        self.time_detail = Vec::new();
        self.team_fights = Vec::new();
        self.ward_lives = BTreeMap::new();
        self.combos = Vec::new();
    }
}

fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}
