//! Why a kill or death that swung gold mattered.
//!
//! Each significant fight gets exactly one cause, taken from the first check that
//! holds: numbers, then health, then gold spent, then neutral damage.

use std::collections::BTreeMap;

use lolstats_types::team_id;
use serde::{Deserialize, Serialize};

use super::{FightBalance, SIGNIFICANT_GOLD_SWING, TeamFight};

pub const HEALTH_DIFF_PER_PERSON: f64 = 20.0;
pub const GOLD_DIFF_PER_PERSON: f64 = 500.0;
/// Past this much gold spent per person everyone is full build.
pub const GOLD_SPENT_CAP: f64 = 20_000.0;
pub const NEUTRAL_DAMAGE_DIFF: f64 = 30.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FightCause {
    NumbersDifference,
    NumbersDifferenceLackingVision,
    HealthDifference,
    GoldSpentDifference,
    NeutralDamageDifference,
    /// Positioning or outplays, which can't be told apart yet
    Other,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SignificantFights {
    pub total: i64,
    pub numbers_difference: i64,
    pub numbers_difference_lacking_vision: i64,
    pub health_difference: i64,
    pub gold_spent_difference: i64,
    pub neutral_damage_difference: i64,
    pub other: i64,
}

impl SignificantFights {
    /// Count one fight and return the cause it was filed under.
    pub fn record(
        &mut self,
        fight: &TeamFight,
        participant_id: i64,
        class: FightBalance,
        vision: &BTreeMap<i64, bool>,
    ) -> FightCause {
        self.total += 1;
        let cause = dominant_cause(fight, participant_id, class, vision);
        *self.counter(cause) += 1;
        cause
    }

    fn counter(&mut self, cause: FightCause) -> &mut i64 {
        match cause {
            FightCause::NumbersDifference => &mut self.numbers_difference,
            FightCause::NumbersDifferenceLackingVision => {
                &mut self.numbers_difference_lacking_vision
            }
            FightCause::HealthDifference => &mut self.health_difference,
            FightCause::GoldSpentDifference => &mut self.gold_spent_difference,
            FightCause::NeutralDamageDifference => &mut self.neutral_damage_difference,
            FightCause::Other => &mut self.other,
        }
    }

    pub fn accumulate(&mut self, other: &Self) {
        self.total += other.total;
        self.numbers_difference += other.numbers_difference;
        self.numbers_difference_lacking_vision += other.numbers_difference_lacking_vision;
        self.health_difference += other.health_difference;
        self.gold_spent_difference += other.gold_spent_difference;
        self.neutral_damage_difference += other.neutral_damage_difference;
        self.other += other.other;
    }
}

fn dominant_cause(
    fight: &TeamFight,
    participant_id: i64,
    class: FightBalance,
    vision: &BTreeMap<i64, bool>,
) -> FightCause {
    if fight.balance_class(participant_id) == class {
        return if vision.values().all(|&seen| seen) {
            FightCause::NumbersDifference
        } else {
            FightCause::NumbersDifferenceLackingVision
        };
    }

    let (team, enemies) = fight.split_participants(team_id(participant_id));
    let on_team = team.len() as f64;
    let on_enemy = enemies.len() as f64;
    let smaller_side = on_team.min(on_enemy);
    let leans =
        |diff: f64, threshold: f64| FightBalance::of(diff) == class && diff.abs() > threshold;

    let health_diff =
        fight.sum_team_health_percent / on_team - fight.sum_enemy_health_percent / on_enemy;
    if leans(health_diff, HEALTH_DIFF_PER_PERSON) {
        return FightCause::HealthDifference;
    }

    let team_gold = (fight.team_gold_spent as f64 / smaller_side).min(GOLD_SPENT_CAP);
    let enemy_gold = (fight.enemy_gold_spent as f64 / smaller_side).min(GOLD_SPENT_CAP);
    if leans(team_gold - enemy_gold, GOLD_DIFF_PER_PERSON) {
        return FightCause::GoldSpentDifference;
    }

    let neutral_diff = fight.enemy_neutral_damage_taken - fight.neutral_damage_taken;
    if leans(neutral_diff, NEUTRAL_DAMAGE_DIFF) {
        return FightCause::NeutralDamageDifference;
    }

    FightCause::Other
}

/// Classify every fight's significant kills and deaths for the subject, tagging each
/// fight with its cause.
///
/// A kill counts when the subject damaged one of the enemies killed and the team
/// came out more than [`SIGNIFICANT_GOLD_SWING`] ahead. A death counts when the
/// subject died and the team fell that far behind.
pub fn significant_kills_and_deaths(
    fights: &mut [TeamFight],
    participant_id: i64,
) -> (SignificantFights, SignificantFights) {
    let mut kills = SignificantFights::default();
    let mut deaths = SignificantFights::default();

    for fight in fights.iter_mut() {
        let contributed = fight
            .team_kills
            .iter()
            .any(|killed| fight.damage_dealt.get(killed).is_some_and(|&d| d > 0.0));
        if contributed && fight.net_gold_diff > SIGNIFICANT_GOLD_SWING {
            let cause = kills.record(
                fight,
                participant_id,
                FightBalance::Favorable,
                &fight.allies_in_vision,
            );
            fight.kill_cause = Some(cause);
        }

        if fight.team_deaths.contains(&participant_id)
            && fight.net_gold_diff < -SIGNIFICANT_GOLD_SWING
        {
            let cause = deaths.record(
                fight,
                participant_id,
                FightBalance::Unfavorable,
                &fight.enemies_in_vision,
            );
            fight.death_cause = Some(cause);
        }
    }

    (kills, deaths)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fight(participants: &[i64], influencers: &[i64]) -> TeamFight {
        TeamFight {
            participant_ids: participants.iter().copied().collect(),
            influencer_ids: influencers.iter().copied().collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_numbers_advantage_wins_over_everything() {
        let mut f = fight(&[1, 2, 6], &[]);
        f.sum_team_health_percent = 10.0;
        f.sum_enemy_health_percent = 100.0;
        f.allies_in_vision = BTreeMap::from([(1, true), (2, true)]);

        let mut sf = SignificantFights::default();
        let cause = sf.record(&f, 1, FightBalance::Favorable, &f.allies_in_vision);
        assert_eq!(cause, FightCause::NumbersDifference);

        f.allies_in_vision.insert(2, false);
        let cause = sf.record(&f, 1, FightBalance::Favorable, &f.allies_in_vision);
        assert_eq!(cause, FightCause::NumbersDifferenceLackingVision);
        assert_eq!(sf.total, 2);
    }

    #[test]
    fn test_single_cause_in_priority_order() {
        // Even fight, ahead on health and on gold: only health counts
        let mut f = fight(&[1, 6], &[]);
        f.sum_team_health_percent = 90.0;
        f.sum_enemy_health_percent = 40.0;
        f.team_gold_spent = 9000;
        f.enemy_gold_spent = 3000;

        let mut sf = SignificantFights::default();
        assert_eq!(
            sf.record(&f, 1, FightBalance::Favorable, &BTreeMap::new()),
            FightCause::HealthDifference
        );

        f.sum_enemy_health_percent = 80.0;
        assert_eq!(
            sf.record(&f, 1, FightBalance::Favorable, &BTreeMap::new()),
            FightCause::GoldSpentDifference
        );

        f.team_gold_spent = 3000;
        f.enemy_neutral_damage_taken = 45.0;
        assert_eq!(
            sf.record(&f, 1, FightBalance::Favorable, &BTreeMap::new()),
            FightCause::NeutralDamageDifference
        );

        f.enemy_neutral_damage_taken = 0.0;
        assert_eq!(
            sf.record(&f, 1, FightBalance::Favorable, &BTreeMap::new()),
            FightCause::Other
        );
        assert_eq!(sf.health_difference, 1);
        assert_eq!(sf.gold_spent_difference, 1);
        assert_eq!(sf.neutral_damage_difference, 1);
        assert_eq!(sf.other, 1);
    }

    #[test]
    fn test_significant_requires_gold_swing_and_contribution() {
        let mut won = fight(&[1, 2, 6], &[]);
        won.team_kills.insert(6);
        won.damage_dealt.insert(6, 40.0);
        won.net_gold_diff = 400;

        let mut no_damage = won.clone();
        no_damage.damage_dealt.clear();

        let mut small_swing = won.clone();
        small_swing.net_gold_diff = 300;

        let mut lost = fight(&[1, 6, 7], &[]);
        lost.team_deaths.insert(1);
        lost.net_gold_diff = -500;

        let mut fights = vec![won, no_damage, small_swing, lost];
        let (kills, deaths) = significant_kills_and_deaths(&mut fights, 1);

        assert_eq!(kills.total, 1);
        assert_eq!(kills.numbers_difference, 1);
        assert_eq!(fights[0].kill_cause, Some(FightCause::NumbersDifference));
        assert_eq!(fights[1].kill_cause, None);
        assert_eq!(deaths.total, 1);
        assert_eq!(fights[3].death_cause, Some(FightCause::NumbersDifference));
    }
}
