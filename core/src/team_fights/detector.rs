//! Team fight detection for one subject participant.

use lolstats_types::{Attack, BuildingKill, Damage, Death, LevelUp, StateUpdate, team_id};

use super::history::{SnapshotHistory, slot};
use super::{
    CHAMPION_VISION_RANGE, CHASE_DISTANCE, CONTINUOUS_DAMAGE_SECS, FightBalance,
    NO_DAMAGE_END_SECS, PARTICIPANT_DISTANCE, SignificantFights, START_DAMAGE_PERCENT,
    TURRET_VISION_RANGE, TeamFight, TeamFightAggregate, VISION_WINDOW_MAX_SECS,
    VISION_WINDOW_MIN_SECS, aggregate, significant_kills_and_deaths,
};
use crate::map::{MapRegion, TURRET_POSITIONS, building_team, region_for};
use crate::wards::WardLife;

/// Damage a champion has been taking without a break.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub(crate) struct DamageRun {
    pub start: f64,
    pub last: f64,
    pub total_percent: f64,
    pub events: u32,
}

impl DamageRun {
    fn add(&mut self, seconds: f64, percent: f64) {
        if seconds - self.last < CONTINUOUS_DAMAGE_SECS {
            self.total_percent += percent;
            // Bursts of same-timestamp hits count once
            if seconds > self.last {
                self.events += 1;
            }
        } else {
            self.total_percent = percent;
            self.events = 1;
            self.start = seconds;
        }
        self.last = seconds;
    }

    fn starts_fight(&self) -> bool {
        self.total_percent > START_DAMAGE_PERCENT && self.events > 1
    }
}

/// Champion damage a champion has been dealing without a break.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub(crate) struct AttackRun {
    pub start: f64,
    pub last: f64,
}

impl AttackRun {
    fn add(&mut self, seconds: f64) {
        if seconds - self.last >= CONTINUOUS_DAMAGE_SECS {
            self.start = seconds;
        }
        self.last = seconds;
    }
}

#[derive(Debug, Clone)]
pub struct TeamFightDetector {
    participant_id: i64,
    match_duration: f64,
    history: SnapshotHistory,
    damage_taken: [DamageRun; 10],
    damage_dealt: [AttackRun; 10],
    fights: Vec<TeamFight>,
}

impl TeamFightDetector {
    pub fn new(participant_id: i64, match_duration: f64) -> Self {
        Self {
            participant_id,
            match_duration,
            history: SnapshotHistory::new(),
            damage_taken: [DamageRun::default(); 10],
            damage_dealt: [AttackRun::default(); 10],
            fights: Vec::new(),
        }
    }

    pub fn fights(&self) -> &[TeamFight] {
        &self.fights
    }

    pub fn into_fights(self) -> Vec<TeamFight> {
        self.fights
    }

    pub fn history(&self) -> &SnapshotHistory {
        &self.history
    }

    /// The fight still in progress: the last one, if its end hasn't been found yet.
    fn current_index(&self) -> Option<usize> {
        let last = self.fights.len().checked_sub(1)?;
        (self.fights[last].end == self.match_duration).then_some(last)
    }

    pub fn in_fight(&self) -> bool {
        self.current_index().is_some()
    }

    // ─── Event intake ────────────────────────────────────────────────────────

    /// Damage to a champion from an enemy champion, a turret or an epic monster.
    pub fn add_damage(&mut self, seconds: f64, damage: &Damage, wards: &[WardLife]) {
        let Some(victim) = slot(damage.victim_id) else {
            return;
        };
        self.damage_taken[victim].add(seconds, damage.percent);

        let attacker_is_champion = team_id(damage.attacker_id) != 0;
        if let Some(attacker) = slot(damage.attacker_id) {
            self.damage_dealt[attacker].add(seconds);
        } else if let Some(index) = self.history.closest_index(seconds) {
            self.history
                .add_neutral_damage(index, damage.victim_id, damage.percent);
        }

        let mut first_damage = false;
        if !self.in_fight() && self.damage_taken[victim].starts_fight() {
            self.start_fight(damage.victim_id, seconds, wards);
            first_damage = true;
        }

        let Some(current) = self.current_index() else {
            return;
        };
        let subject_team = team_id(self.participant_id);
        let fight = &mut self.fights[current];

        if first_damage {
            let lost = (damage.percent + 0.5).floor();
            if team_id(damage.victim_id) == subject_team {
                fight.sum_team_health_percent -= lost;
            } else {
                fight.sum_enemy_health_percent -= lost;
            }
        }

        let attacker_in_fight = fight.participant_ids.contains(&damage.attacker_id);
        let victim_in_fight = fight.participant_ids.contains(&damage.victim_id);

        // Only outsiders hitting participants join; outsiders merely getting hit
        // (e.g. by a global ult) haven't contributed anything
        if !attacker_in_fight && victim_in_fight && attacker_is_champion {
            fight.influencer_ids.insert(damage.attacker_id);
        }

        if damage.attacker_id == self.participant_id {
            *fight.damage_dealt.entry(damage.victim_id).or_default() += damage.percent;
        }

        if team_id(damage.victim_id) != subject_team
            && (victim_in_fight || fight.influencer_ids.contains(&damage.victim_id))
        {
            *fight.enemy_damage_taken.entry(damage.victim_id).or_default() += damage.percent;
        }

        if !attacker_is_champion && victim_in_fight {
            if team_id(damage.victim_id) == subject_team {
                fight.neutral_damage_taken += damage.percent;
            } else {
                fight.enemy_neutral_damage_taken += damage.percent;
            }
        }
    }

    pub fn add_state_update(&mut self, seconds: f64, update: &StateUpdate) {
        self.history.advance(seconds);
        self.history.apply_state_update(seconds, update);

        let Some(current) = self.current_index() else {
            return;
        };
        let Some(state) = self.history.closest(seconds) else {
            return;
        };

        let fight = &self.fights[current];
        let (team_gold, enemy_gold) = state.team_gold(team_id(self.participant_id));
        let net_gold_diff =
            team_gold - fight.team_gold_at_start - (enemy_gold - fight.enemy_gold_at_start);
        let end = self.fight_end(fight, seconds);

        let fight = &mut self.fights[current];
        fight.net_gold_diff = net_gold_diff;
        if let Some(end) = end {
            tracing::debug!(
                begin = fight.begin,
                end,
                participants = fight.participant_ids.len(),
                influencers = fight.influencer_ids.len(),
                "team fight ended"
            );
            fight.end = end;
        }
    }

    pub fn add_death(&mut self, seconds: f64, death: &Death, wards: &[WardLife]) {
        if !self.in_fight() {
            // Only becomes a fight if the subject is alive and close by
            self.start_fight(death.victim_id, seconds, wards);
        }

        if let Some(current) = self.current_index() {
            let subject = self.participant_id;
            let fight = &mut self.fights[current];
            if fight.involves(death.victim_id) {
                if team_id(death.victim_id) == team_id(subject) {
                    fight.team_deaths.insert(death.victim_id);
                } else if team_id(death.victim_id) != 0 {
                    fight.team_kills.insert(death.victim_id);
                }
            }
        }

        // Marked dead last so fights the subject died in are still picked up
        self.history.mark_dead(death.victim_id, seconds);
    }

    pub fn add_level_up(&mut self, level_up: &LevelUp) {
        self.history.level_up(level_up.participant_id);
    }

    pub fn add_attack(&mut self, attack: &Attack) {
        self.history
            .set_summoner_cooldown(attack.attacker_id, &attack.slot, attack.cooldown_expires);
    }

    pub fn add_turret_kill(&mut self, kill: &BuildingKill) {
        self.history.turret_destroyed(kill.building_id);
    }

    // ─── Fight lifecycle ─────────────────────────────────────────────────────

    /// Open a fight around `target`.
    ///
    /// The fight is dated back to the start of the target's damage run, when the
    /// decision to fight was made; a run that already ended doesn't count. Participants
    /// are whoever was near the target at that point. The fight is dropped if the
    /// subject is dead or far from the target when it was noticed, or if no enemy is
    /// nearby.
    fn start_fight(&mut self, target: i64, trigger_time: f64, wards: &[WardLife]) {
        let Some(target_slot) = slot(target) else {
            return;
        };
        let run = self.damage_taken[target_slot];
        let decision_time = if trigger_time - run.last >= CONTINUOUS_DAMAGE_SECS {
            trigger_time
        } else {
            run.start
        };
        let subject = self.participant_id;
        let subject_team = team_id(subject);

        let (Some(decision), Some(trigger)) = (
            self.history.closest(decision_time),
            self.history.closest(trigger_time),
        ) else {
            return;
        };
        if !trigger.is_alive(subject) || !trigger.within(target, subject, PARTICIPANT_DISTANCE) {
            return;
        }

        let (team_gold, enemy_gold) = decision.team_gold(subject_team);
        let mut fight = TeamFight {
            begin: decision_time,
            end: self.match_duration,
            initial_target: target,
            participant_level: decision.level(subject),
            team_gold_at_start: team_gold,
            enemy_gold_at_start: enemy_gold,
            ..Default::default()
        };

        for pid in 1..=10 {
            if decision.is_alive(pid) && decision.within(pid, target, PARTICIPANT_DISTANCE) {
                fight.participant_ids.insert(pid);
            }
        }

        let (friends, enemies) = fight.split_participants(subject_team);
        // Heavy turret or monster damage with nobody around isn't a fight
        if enemies.is_empty() {
            return;
        }

        for &p in &friends {
            fight.sum_team_health_percent += (decision.health_percent(p) + 0.5).floor();
            fight.team_gold_spent += decision.gold_spent(p);
            fight.neutral_damage_taken +=
                self.history
                    .neutral_damage_between(p, decision_time, trigger_time);
            fight.team_summoner_spells += decision.summoners_ready(p, trigger_time);
            fight
                .allies_in_vision
                .insert(p, self.is_in_vision(p, decision_time, wards));
        }

        let mut enemy_levels = 0.0;
        for &p in &enemies {
            fight.sum_enemy_health_percent += (decision.health_percent(p) + 0.5).floor();
            enemy_levels += decision.level(p) as f64;
            fight.enemy_gold_spent += decision.gold_spent(p);
            fight.enemy_neutral_damage_taken +=
                self.history
                    .neutral_damage_between(p, decision_time, trigger_time);
            fight.enemy_summoner_spells += decision.summoners_ready(p, trigger_time);
            fight
                .enemies_in_vision
                .insert(p, self.is_in_vision(p, decision_time, wards));
        }
        fight.enemy_level_average = enemy_levels / enemies.len() as f64;

        tracing::debug!(
            begin = fight.begin,
            trigger_time,
            target,
            allies = friends.len(),
            enemies = enemies.len(),
            "team fight started"
        );
        self.fights.push(fight);
    }

    /// When the fight ended, or `None` while it is still going.
    ///
    /// Still going if anyone involved dealt or took damage in the last few seconds or
    /// is within chase distance of a live enemy. Otherwise it ended at the last
    /// damage any participant took.
    fn fight_end(&self, fight: &TeamFight, seconds: f64) -> Option<f64> {
        let state = self.history.closest(seconds)?;
        let cutoff = seconds - NO_DAMAGE_END_SECS;
        let mut last_damage: f64 = 0.0;

        for &p in &fight.participant_ids {
            let s = slot(p)?;
            if self.damage_taken[s].last > cutoff || self.damage_dealt[s].last > cutoff {
                return None;
            }

            // Chasing doesn't move the end unless damage follows
            let chasing = (1..=10).any(|other| {
                state.is_alive(other)
                    && state.is_alive(p)
                    && team_id(other) != team_id(p)
                    && state.within(other, p, CHASE_DISTANCE)
            });
            if chasing {
                return None;
            }

            last_damage = last_damage.max(self.damage_taken[s].last);
        }

        (last_damage != 0.0).then_some(last_damage)
    }

    /// Whether enemies could see `participant_id` shortly before `seconds`.
    ///
    /// Only snapshots in the vision window count. Anyone outside the jungle is assumed
    /// seen; in the jungle they need a live enemy champion, turret or ward in range.
    /// Minions, terrain and brush are ignored.
    pub fn is_in_vision(&self, participant_id: i64, seconds: f64, wards: &[WardLife]) -> bool {
        let team = team_id(participant_id);

        for st in self.history.iter() {
            if st.seconds < seconds - VISION_WINDOW_MAX_SECS {
                continue;
            }
            if st.seconds > seconds - VISION_WINDOW_MIN_SECS {
                return false;
            }
            let Some(position) = st.position(participant_id) else {
                continue;
            };

            if region_for(&position) != MapRegion::Jungle {
                return true;
            }

            let seen_by_champion = (1..=10).any(|other| {
                other != participant_id
                    && st.is_alive(other)
                    && st.is_alive(participant_id)
                    && team_id(other) != team
                    && st.within(other, participant_id, CHAMPION_VISION_RANGE)
            });
            if seen_by_champion {
                return true;
            }

            let seen_by_turret = TURRET_POSITIONS.iter().any(|(turret_id, turret_position)| {
                building_team(*turret_id) != team
                    && st.turret_live(*turret_id)
                    && position.distance_xy(turret_position) < TURRET_VISION_RANGE
            });
            if seen_by_turret {
                return true;
            }

            let seen_by_ward = wards.iter().any(|ward| {
                team_id(ward.creator) != team
                    && ward.alive_at(st.seconds)
                    && position.distance_xy(&ward.position) < ward.kind.sight_range()
            });
            if seen_by_ward {
                return true;
            }
        }
        false
    }

    // ─── Summaries ───────────────────────────────────────────────────────────

    pub fn aggregate(&self, class: FightBalance) -> TeamFightAggregate {
        aggregate(&self.fights, self.participant_id, class)
    }

    pub fn significant_kills_and_deaths(&mut self) -> (SignificantFights, SignificantFights) {
        significant_kills_and_deaths(&mut self.fights, self.participant_id)
    }
}
