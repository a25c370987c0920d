//! Rolling window of per-participant snapshots.
//!
//! Fights are only recognized after the damage that starts them, so the detector keeps
//! the last [`WINDOW_SECS`] of state to rewind to the moment the fight was decided.
//! Snapshots are taken at most every [`WINDOW_GRANULARITY_SECS`]; updates in between
//! mutate the newest one.

use std::collections::VecDeque;

use lolstats_types::{Position, StateUpdate, team_id};

use crate::map::TURRET_POSITIONS;

pub const WINDOW_SECS: f64 = 30.0;
pub const WINDOW_GRANULARITY_SECS: f64 = 0.25;

/// A revive is only believed this long before the recorded death, to absorb
/// out-of-order events.
const REVIVE_GRACE_SECS: f64 = 2.0;

const TURRET_COUNT: usize = TURRET_POSITIONS.len();
const HISTORY_CAPACITY: usize = (WINDOW_SECS / WINDOW_GRANULARITY_SECS) as usize + 2;

/// Array slot for a participant id, if it is one.
#[inline]
pub(crate) fn slot(participant_id: i64) -> Option<usize> {
    (1..=10)
        .contains(&participant_id)
        .then(|| (participant_id - 1) as usize)
}

#[derive(Debug, Clone)]
pub struct Snapshot {
    pub seconds: f64,
    alive: [bool; 10],
    last_death: [f64; 10],
    positions: [Option<Position>; 10],
    levels: [i64; 10],
    health_percent: [f64; 10],
    gold: [i64; 10],
    gold_spent: [i64; 10],
    /// Cooldown expiry of Summoner1 and Summoner2
    summoner_cooldowns: [[f64; 2]; 10],
    /// Damage taken from turrets and monsters at this snapshot only; never carried over
    neutral_damage: [f64; 10],
    live_turrets: [bool; TURRET_COUNT],
}

impl Snapshot {
    fn initial(seconds: f64) -> Self {
        Self {
            seconds,
            alive: [true; 10],
            last_death: [0.0; 10],
            positions: [None; 10],
            levels: [1; 10],
            health_percent: [0.0; 10],
            gold: [0; 10],
            gold_spent: [0; 10],
            summoner_cooldowns: [[0.0; 2]; 10],
            neutral_damage: [0.0; 10],
            live_turrets: [true; TURRET_COUNT],
        }
    }

    fn following(&self, seconds: f64) -> Self {
        Self {
            seconds,
            neutral_damage: [0.0; 10],
            ..self.clone()
        }
    }

    fn is_complete(&self) -> bool {
        self.positions.iter().all(Option::is_some)
    }

    pub fn is_alive(&self, participant_id: i64) -> bool {
        slot(participant_id).is_some_and(|s| self.alive[s])
    }

    pub fn position(&self, participant_id: i64) -> Option<Position> {
        slot(participant_id).and_then(|s| self.positions[s])
    }

    pub fn level(&self, participant_id: i64) -> i64 {
        slot(participant_id).map_or(0, |s| self.levels[s])
    }

    pub fn health_percent(&self, participant_id: i64) -> f64 {
        slot(participant_id).map_or(0.0, |s| self.health_percent[s])
    }

    pub fn gold_spent(&self, participant_id: i64) -> i64 {
        slot(participant_id).map_or(0, |s| self.gold_spent[s])
    }

    pub fn neutral_damage(&self, participant_id: i64) -> f64 {
        slot(participant_id).map_or(0.0, |s| self.neutral_damage[s])
    }

    /// Summoner spells off cooldown at `seconds`.
    pub fn summoners_ready(&self, participant_id: i64, seconds: f64) -> usize {
        slot(participant_id).map_or(0, |s| {
            self.summoner_cooldowns[s]
                .iter()
                .filter(|&&cd| cd <= seconds)
                .count()
        })
    }

    pub fn turret_live(&self, turret_id: i64) -> bool {
        TURRET_POSITIONS
            .iter()
            .position(|&(id, _)| id == turret_id)
            .is_some_and(|i| self.live_turrets[i])
    }

    /// Strictly closer than `distance`. Unknown positions are never close.
    pub fn within(&self, a: i64, b: i64, distance: f64) -> bool {
        match (self.position(a), self.position(b)) {
            (Some(pa), Some(pb)) => pa.distance_xy(&pb) < distance,
            _ => false,
        }
    }

    /// Total gold earned (held + spent) by the given team and by the other one.
    pub fn team_gold(&self, team: i64) -> (i64, i64) {
        let mut ours = 0;
        let mut theirs = 0;
        for pid in 1..=10 {
            let s = (pid - 1) as usize;
            let earned = self.gold[s] + self.gold_spent[s];
            if team_id(pid) == team {
                ours += earned;
            } else {
                theirs += earned;
            }
        }
        (ours, theirs)
    }
}

#[derive(Debug, Clone)]
pub struct SnapshotHistory {
    states: VecDeque<Snapshot>,
}

impl Default for SnapshotHistory {
    fn default() -> Self {
        Self {
            states: VecDeque::with_capacity(HISTORY_CAPACITY),
        }
    }
}

impl SnapshotHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Snapshot> {
        self.states.iter()
    }

    pub fn get(&self, index: usize) -> Option<&Snapshot> {
        self.states.get(index)
    }

    /// Start a new snapshot at `seconds` unless the newest one is within the
    /// granularity, then drop snapshots that fell out of the window.
    pub fn advance(&mut self, seconds: f64) {
        let next = match self.states.back() {
            Some(last) if seconds - last.seconds < WINDOW_GRANULARITY_SECS => return,
            Some(last) => last.following(seconds),
            None => Snapshot::initial(seconds),
        };
        self.states.push_back(next);

        while self
            .states
            .front()
            .is_some_and(|front| front.seconds < seconds - WINDOW_SECS)
        {
            self.states.pop_front();
        }
    }

    /// Index of the complete snapshot nearest to `seconds`.
    ///
    /// Scans backwards from the newest and stops as soon as the distance stops
    /// shrinking.
    pub fn closest_index(&self, seconds: f64) -> Option<usize> {
        let mut closest = f64::MAX;
        let mut best = None;
        for (index, state) in self.states.iter().enumerate().rev() {
            if !state.is_complete() {
                continue;
            }
            let diff = (seconds - state.seconds).abs();
            if diff < closest {
                closest = diff;
                best = Some(index);
            } else {
                break;
            }
        }
        best
    }

    pub fn closest(&self, seconds: f64) -> Option<&Snapshot> {
        self.closest_index(seconds).and_then(|i| self.states.get(i))
    }

    pub fn add_neutral_damage(&mut self, index: usize, participant_id: i64, percent: f64) {
        if let (Some(state), Some(s)) = (self.states.get_mut(index), slot(participant_id)) {
            state.neutral_damage[s] += percent;
        }
    }

    /// Neutral damage a participant took in snapshots within `[from, to]`.
    pub fn neutral_damage_between(&self, participant_id: i64, from: f64, to: f64) -> f64 {
        self.states
            .iter()
            .filter(|st| st.seconds >= from && st.seconds <= to)
            .map(|st| st.neutral_damage(participant_id))
            .sum()
    }

    // ─── Mutations on the newest snapshot ───────────────────────────────────

    pub fn apply_state_update(&mut self, seconds: f64, update: &StateUpdate) {
        let (Some(st), Some(s)) = (self.states.back_mut(), slot(update.participant_id)) else {
            return;
        };

        st.positions[s] = Some(update.position);

        // Shop undo isn't accounted for
        if update.gold < st.gold[s] {
            st.gold_spent[s] += st.gold[s] - update.gold;
        }
        st.gold[s] = update.gold;

        if !st.alive[s] && update.health > 0.0 && seconds > st.last_death[s] - REVIVE_GRACE_SECS {
            st.alive[s] = true;
        }

        if update.health_max > 0.0 {
            st.health_percent[s] = 100.0 * update.health / update.health_max;
        }
    }

    pub fn mark_dead(&mut self, participant_id: i64, seconds: f64) {
        if let (Some(st), Some(s)) = (self.states.back_mut(), slot(participant_id)) {
            st.alive[s] = false;
            st.last_death[s] = seconds;
        }
    }

    pub fn level_up(&mut self, participant_id: i64) {
        if let (Some(st), Some(s)) = (self.states.back_mut(), slot(participant_id)) {
            st.levels[s] += 1;
        }
    }

    pub fn set_summoner_cooldown(&mut self, participant_id: i64, slot_name: &str, expires: f64) {
        let spell = match slot_name {
            "Summoner1" => 0,
            "Summoner2" => 1,
            _ => return,
        };
        if let (Some(st), Some(s)) = (self.states.back_mut(), slot(participant_id)) {
            st.summoner_cooldowns[s][spell] = expires;
        }
    }

    pub fn turret_destroyed(&mut self, turret_id: i64) {
        let Some(i) = TURRET_POSITIONS.iter().position(|&(id, _)| id == turret_id) else {
            return;
        };
        if let Some(st) = self.states.back_mut() {
            st.live_turrets[i] = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn update(participant_id: i64, x: f64, gold: i64, health: f64) -> StateUpdate {
        StateUpdate {
            participant_id,
            gold,
            health,
            health_max: 1000.0,
            position: Position::xy(x, 0.0),
            ..Default::default()
        }
    }

    fn fill(history: &mut SnapshotHistory, seconds: f64) {
        history.advance(seconds);
        for pid in 1..=10 {
            history.apply_state_update(seconds, &update(pid, 100.0 * pid as f64, 500, 800.0));
        }
    }

    #[test]
    fn test_granularity_and_window() {
        let mut history = SnapshotHistory::new();
        history.advance(10.0);
        history.advance(10.1);
        assert_eq!(history.len(), 1);

        history.advance(10.25);
        assert_eq!(history.len(), 2);

        history.advance(40.3);
        assert_eq!(history.len(), 1);
        assert_eq!(history.get(0).map(|s| s.seconds), Some(40.3));
    }

    #[test]
    fn test_closest_skips_incomplete_snapshots() {
        let mut history = SnapshotHistory::new();
        history.advance(1.0);
        history.apply_state_update(1.0, &update(1, 0.0, 500, 800.0));
        assert!(history.closest(1.0).is_none());

        fill(&mut history, 2.0);
        fill(&mut history, 3.0);
        fill(&mut history, 4.0);
        assert_eq!(history.closest(2.9).map(|s| s.seconds), Some(3.0));
        assert_eq!(history.closest(0.0).map(|s| s.seconds), Some(2.0));
        assert_eq!(history.closest(99.0).map(|s| s.seconds), Some(4.0));
    }

    #[test]
    fn test_gold_spent_and_revive() {
        let mut history = SnapshotHistory::new();
        fill(&mut history, 1.0);
        history.apply_state_update(1.1, &update(3, 0.0, 200, 800.0));
        history.mark_dead(3, 1.1);

        history.advance(2.0);
        history.apply_state_update(2.0, &update(3, 0.0, 250, 0.0));
        let st = history.closest(2.0).unwrap();
        assert_eq!(st.gold_spent(3), 300);
        assert!(!st.is_alive(3));

        history.apply_state_update(2.1, &update(3, 0.0, 250, 500.0));
        let st = history.closest(2.0).unwrap();
        assert!(st.is_alive(3));
        assert_eq!(st.health_percent(3), 50.0);

        let (blue, red) = st.team_gold(100);
        assert_eq!(blue, 4 * 500 + 250 + 300);
        assert_eq!(red, 5 * 500);
    }

    #[test]
    fn test_neutral_damage_is_per_snapshot() {
        let mut history = SnapshotHistory::new();
        fill(&mut history, 1.0);
        history.add_neutral_damage(0, 2, 12.0);
        fill(&mut history, 2.0);
        history.add_neutral_damage(1, 2, 8.0);

        assert_eq!(history.get(1).unwrap().neutral_damage(2), 8.0);
        assert_eq!(history.neutral_damage_between(2, 0.0, 5.0), 20.0);
        assert_eq!(history.neutral_damage_between(2, 1.5, 5.0), 8.0);
    }

    #[test]
    fn test_summoners_and_turrets() {
        let mut history = SnapshotHistory::new();
        fill(&mut history, 1.0);
        history.set_summoner_cooldown(4, "Summoner1", 300.0);
        history.set_summoner_cooldown(4, "Q", 300.0);
        history.turret_destroyed(107);
        history.turret_destroyed(112);

        let st = history.closest(1.0).unwrap();
        assert_eq!(st.summoners_ready(4, 100.0), 1);
        assert_eq!(st.summoners_ready(4, 300.0), 2);
        assert!(!st.turret_live(107));
        assert!(st.turret_live(207));
        assert!(!st.turret_live(112));
    }
}
