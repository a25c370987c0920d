//! Which teammate each champion spent the early game next to.
//!
//! Used to pair each support with its adc.

use std::collections::BTreeMap;

use lolstats_types::{Position, RolePosition, StateUpdate, team_id};

/// Minions haven't reached lane before this.
pub const BUDDY_WINDOW_START_SECS: f64 = 100.0;
pub const BUDDY_WINDOW_END_SECS: f64 = 600.0;
pub const BUDDY_DISTANCE: f64 = 2000.0;

#[derive(Debug, Clone, Default)]
pub struct BuddyFinder {
    last_positions: BTreeMap<i64, Position>,
    /// participant → teammate → state updates spent close together
    scores: BTreeMap<i64, BTreeMap<i64, i64>>,
}

impl BuddyFinder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_state_update(&mut self, seconds: f64, update: &StateUpdate) {
        if !(BUDDY_WINDOW_START_SECS..=BUDDY_WINDOW_END_SECS).contains(&seconds) {
            return;
        }
        let me = update.participant_id;
        self.last_positions.insert(me, update.position);

        // Scoring starts once everyone has been seen
        if self.last_positions.len() != 10 {
            return;
        }

        let team = team_id(me);
        for (&other, position) in &self.last_positions {
            if other == me || team_id(other) != team {
                continue;
            }
            if update.position.distance_xy(position) < BUDDY_DISTANCE {
                *self.scores.entry(me).or_default().entry(other).or_default() += 1;
            }
        }
    }

    pub fn score(&self, participant_id: i64, teammate: i64) -> i64 {
        self.scores
            .get(&participant_id)
            .and_then(|s| s.get(&teammate))
            .copied()
            .unwrap_or(0)
    }

    /// Unassigned teammate with the highest score, lowest id first on ties.
    pub fn buddy_for(
        &self,
        participant_id: i64,
        assigned: &BTreeMap<i64, RolePosition>,
    ) -> Option<i64> {
        let scores = self.scores.get(&participant_id)?;
        let mut best: Option<(i64, i64)> = None;
        for (&teammate, &score) in scores {
            if assigned.contains_key(&teammate) {
                continue;
            }
            if score > best.map_or(0, |(_, s)| s) {
                best = Some((teammate, score));
            }
        }
        best.map(|(teammate, _)| teammate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(participant_id: i64, x: f64, y: f64) -> StateUpdate {
        StateUpdate {
            participant_id,
            position: Position::xy(x, y),
            ..Default::default()
        }
    }

    fn everyone(finder: &mut BuddyFinder, seconds: f64) {
        // 4 and 5 share bot lane; 9 and 10 likewise
        let spots = [
            (1, 1000.0, 12000.0),
            (2, 5000.0, 9000.0),
            (3, 7400.0, 7400.0),
            (4, 12000.0, 1000.0),
            (5, 12200.0, 1200.0),
            (6, 2000.0, 13000.0),
            (7, 9000.0, 5000.0),
            (8, 8000.0, 8000.0),
            (9, 13500.0, 2000.0),
            (10, 13700.0, 2200.0),
        ];
        for (pid, x, y) in spots {
            finder.add_state_update(seconds, &at(pid, x, y));
        }
    }

    #[test]
    fn test_bot_lane_pairs_up() {
        let mut finder = BuddyFinder::new();
        everyone(&mut finder, 50.0);
        assert_eq!(finder.score(4, 5), 0);

        for t in [120.0, 130.0, 140.0] {
            everyone(&mut finder, t);
        }
        everyone(&mut finder, 700.0);

        assert_eq!(finder.score(5, 4), 2);
        assert_eq!(finder.score(4, 5), 2);
        // Only the last update of the first full round scores
        assert_eq!(finder.score(10, 9), 3);
        assert_eq!(finder.score(9, 10), 2);
        assert_eq!(finder.score(4, 9), 0);
        assert_eq!(finder.buddy_for(5, &BTreeMap::new()), Some(4));
        assert_eq!(finder.buddy_for(10, &BTreeMap::new()), Some(9));

        let taken = BTreeMap::from([(4, RolePosition::Jungle)]);
        assert_eq!(finder.buddy_for(5, &taken), None);
        assert_eq!(finder.buddy_for(1, &BTreeMap::new()), None);
    }
}
