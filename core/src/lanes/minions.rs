//! Lane and jungle minion interactions per participant and champion level.
//!
//! Interactions are attacks and damage exchanged with minions, not last hits: the
//! per-player cs counters in state updates are unreliable.

use hashbrown::HashMap;
use lolstats_types::{ActorType, Attack, Damage, LevelUp, Position, is_participant};

use crate::map::{MapRegion, is_jungle_minion, region_for};

#[derive(Debug, Clone)]
pub struct MinionTracker {
    /// participant → level → region → attacks on lane minions
    lane: HashMap<i64, HashMap<i64, HashMap<MapRegion, i64>>>,
    /// participant → level → attacks on or hits from jungle camps
    jungle: HashMap<i64, HashMap<i64, i64>>,
    levels: [i64; 10],
}

impl Default for MinionTracker {
    fn default() -> Self {
        Self {
            lane: HashMap::new(),
            jungle: HashMap::new(),
            // Everyone starts at level 1
            levels: [1; 10],
        }
    }
}

impl MinionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    fn level(&self, participant_id: i64) -> i64 {
        self.levels[(participant_id - 1) as usize]
    }

    pub fn add_attack(&mut self, attack: &Attack) {
        self.add_jungle(attack.attacker_id, attack.target_id);
        if attack.target_type == Some(ActorType::Minion)
            && let Some(position) = &attack.target_position
        {
            self.add_lane(attack.attacker_id, position);
        }
    }

    pub fn add_damage(&mut self, damage: &Damage) {
        self.add_jungle(damage.victim_id, damage.attacker_id);
    }

    pub fn add_level_up(&mut self, level_up: &LevelUp) {
        if is_participant(level_up.participant_id) {
            self.levels[(level_up.participant_id - 1) as usize] += 1;
        }
    }

    fn add_jungle(&mut self, participant_id: i64, other: i64) {
        if !is_participant(participant_id) || !is_jungle_minion(other) {
            return;
        }
        let level = self.level(participant_id);
        *self
            .jungle
            .entry(participant_id)
            .or_default()
            .entry(level)
            .or_default() += 1;
    }

    fn add_lane(&mut self, participant_id: i64, minion_position: &Position) {
        if !is_participant(participant_id) {
            return;
        }
        let level = self.level(participant_id);
        *self
            .lane
            .entry(participant_id)
            .or_default()
            .entry(level)
            .or_default()
            .entry(region_for(minion_position))
            .or_default() += 1;
    }

    /// Lane minion interactions up to and including `max_level`, in one region or
    /// all of them.
    pub fn lane_interactions(
        &self,
        participant_id: i64,
        max_level: i64,
        region: Option<MapRegion>,
    ) -> i64 {
        let Some(by_level) = self.lane.get(&participant_id) else {
            return 0;
        };
        by_level
            .iter()
            .filter(|&(&level, _)| level <= max_level)
            .flat_map(|(_, by_region)| by_region.iter())
            .filter(|&(r, _)| region.is_none_or(|wanted| *r == wanted))
            .map(|(_, count)| count)
            .sum()
    }

    pub fn jungle_interactions(&self, participant_id: i64, max_level: i64) -> i64 {
        self.jungle.get(&participant_id).map_or(0, |by_level| {
            by_level
                .iter()
                .filter(|&(&level, _)| level <= max_level)
                .map(|(_, count)| count)
                .sum()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minion_attack(attacker_id: i64, x: f64, y: f64) -> Attack {
        Attack {
            attacker_id,
            target_id: 5000,
            target_type: Some(ActorType::Minion),
            target_position: Some(Position::xy(x, y)),
            slot: "basic".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_lane_interactions_by_level_and_region() {
        let mut tracker = MinionTracker::new();
        tracker.add_attack(&minion_attack(3, 7400.0, 7400.0));
        tracker.add_attack(&minion_attack(3, 7400.0, 7400.0));
        tracker.add_attack(&minion_attack(3, 1000.0, 8000.0));
        for _ in 0..6 {
            tracker.add_level_up(&LevelUp {
                level: 0,
                participant_id: 3,
            });
        }
        tracker.add_attack(&minion_attack(3, 7400.0, 7400.0));

        assert_eq!(tracker.lane_interactions(3, 6, None), 3);
        assert_eq!(tracker.lane_interactions(3, 6, Some(MapRegion::Mid)), 2);
        assert_eq!(tracker.lane_interactions(3, 18, Some(MapRegion::Mid)), 3);
        assert_eq!(tracker.lane_interactions(4, 18, None), 0);
    }

    #[test]
    fn test_jungle_interactions_both_ways() {
        let mut tracker = MinionTracker::new();
        tracker.add_attack(&Attack {
            attacker_id: 2,
            target_id: 306,
            slot: "Q".to_string(),
            ..Default::default()
        });
        tracker.add_damage(&Damage {
            attacker_id: 313,
            victim_id: 2,
            ..Default::default()
        });
        // Epic monsters aren't camps
        tracker.add_damage(&Damage {
            attacker_id: 301,
            victim_id: 2,
            ..Default::default()
        });
        // Untargeted minion attacks carry no position
        tracker.add_attack(&Attack {
            attacker_id: 2,
            target_type: Some(ActorType::Minion),
            ..Default::default()
        });

        assert_eq!(tracker.jungle_interactions(2, 6), 2);
        assert_eq!(tracker.lane_interactions(2, 6, None), 0);
    }
}
