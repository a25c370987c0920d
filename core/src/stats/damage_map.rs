use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::stage::GameStage;

/// Champion-on-champion damage and kills against one opponent in one game stage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DamageSummary {
    /// Health removed, in absolute points
    pub damage_total: f64,
    /// Health removed, as percent of the victim's max health at the time
    pub damage_percent: f64,
    #[serde(skip_serializing_if = "is_zero")]
    pub deaths: i64,
}

fn is_zero(v: &i64) -> bool {
    *v == 0
}

/// Opponent champion id → game stage → [`DamageSummary`].
///
/// Champion ids are kept as strings so the map serializes to a plain JSON object.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DamageMap(pub BTreeMap<String, BTreeMap<String, DamageSummary>>);

impl DamageMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, champion_id: i64, stage: GameStage) -> Option<&DamageSummary> {
        self.0.get(&champion_id.to_string())?.get(stage.as_str())
    }

    fn entry(&mut self, champion_id: i64, seconds: f64) -> &mut DamageSummary {
        self.0
            .entry(champion_id.to_string())
            .or_default()
            .entry(GameStage::at(seconds).as_str().to_string())
            .or_default()
    }

    pub fn add_damage(&mut self, champion_id: i64, seconds: f64, total: f64, percent: f64) {
        let summary = self.entry(champion_id, seconds);
        summary.damage_total += total;
        summary.damage_percent += percent;
    }

    pub fn add_death(&mut self, champion_id: i64, seconds: f64) {
        self.entry(champion_id, seconds).deaths += 1;
    }

    pub(crate) fn accumulate(&mut self, other: &DamageMap) {
        for (champion, stages) in &other.0 {
            let ours = self.0.entry(champion.clone()).or_default();
            for (stage, summary) in stages {
                let sum = ours.entry(stage.clone()).or_default();
                sum.damage_total += summary.damage_total;
                sum.damage_percent += summary.damage_percent;
                sum.deaths += summary.deaths;
            }
        }
    }

    /// Divide every entry by `n`, rounding deaths half up.
    pub(crate) fn divide(&mut self, n: f64) {
        for summary in self.0.values_mut().flat_map(|stages| stages.values_mut()) {
            summary.damage_total /= n;
            summary.damage_percent /= n;
            summary.deaths = super::round_half_up(summary.deaths as f64 / n);
        }
    }
}
