//! Ward tracking handler
//!
//! Every placed ward gets a [`WardLife`] that stays active until its death event. While
//! active it collects attacks against it and reveal intervals for each enemy champion
//! standing in its sight range. On death the end reason is decided from that history.

use std::collections::BTreeMap;

use lolstats_types::{
    Attack, CanonicalEvent, EventKind, Position, StateUpdate, WardDeath, WardItemType, WardKind,
    WardPlaced, same_team,
};
use serde::{Deserialize, Serialize};

use crate::error::StatsError;
use crate::handlers::EventHandler;

/// An attack this close before a ward's death is what killed it.
pub const CLEAR_ATTACK_WINDOW_SECS: f64 = 5.0;

/// Sightings closer together than this extend one reveal instead of starting another.
pub const REVEAL_MERGE_SECS: f64 = 5.0;

/// Yellow wards last 60s; this allows for a couple of seconds of log jitter.
pub const YELLOW_EXPIRY_SECS: f64 = 58.0;

/// Longer than any yellow ward should live, even with processing pauses.
pub const YELLOW_EXPIRY_WARN_SECS: f64 = 155.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WardEndReason {
    Cleared,
    Replaced,
    Expired,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RevealInterval {
    pub begin: f64,
    pub end: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WardAttack {
    pub seconds: f64,
    pub attacker_id: i64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WardLife {
    pub ward_id: i64,
    pub begin: f64,
    /// Match duration until the ward's death is seen.
    pub end: f64,
    pub position: Position,
    pub creator: i64,
    pub item_type: WardItemType,
    pub kind: WardKind,
    pub end_reason: Option<WardEndReason>,
    /// Participant credited with clearing, 0 if not cleared
    pub cleared_by: i64,
    pub attacks: Vec<WardAttack>,
    /// Enemy participant → reveal intervals, in time order
    pub reveals: BTreeMap<i64, Vec<RevealInterval>>,
}

impl WardLife {
    pub fn duration(&self) -> f64 {
        self.end - self.begin
    }

    /// Whether the ward was on the map at `seconds`.
    pub fn alive_at(&self, seconds: f64) -> bool {
        self.begin <= seconds && seconds <= self.end
    }

    pub fn reveal_count(&self) -> usize {
        self.reveals.values().map(Vec::len).sum()
    }

    fn export(&self) -> JsonWardLife {
        JsonWardLife {
            begin: self.begin,
            end: self.end,
            position: self.position,
            kind: self.kind,
            end_reason: self.end_reason,
            cleared_by: self.cleared_by,
            reveals: self
                .reveals
                .iter()
                .map(|(&pid, intervals)| (pid, intervals.len()))
                .collect(),
        }
    }
}

/// Serializable ward summary: reveal intervals collapse to a count per enemy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonWardLife {
    pub begin: f64,
    pub end: f64,
    pub position: Position,
    #[serde(rename = "type")]
    pub kind: WardKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_reason: Option<WardEndReason>,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub cleared_by: i64,
    #[serde(default)]
    pub reveals: BTreeMap<i64, usize>,
}

fn is_zero(v: &i64) -> bool {
    *v == 0
}

/// Average number of each ward kind a player kept on the map.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LiveWardsAverage {
    pub yellow: f64,
    pub pink: f64,
    pub blue: f64,
    pub yellow_and_blue: f64,
}

#[derive(Debug, Clone, Default)]
pub struct WardTracker {
    match_duration: f64,
    /// Every ward placed, in placement order
    lives: Vec<WardLife>,
    /// Ward id → index into `lives`, for wards still on the map
    active: BTreeMap<i64, usize>,
}

impl WardTracker {
    pub fn new(match_duration: f64) -> Self {
        Self {
            match_duration,
            ..Self::default()
        }
    }

    pub fn lives(&self) -> &[WardLife] {
        &self.lives
    }

    pub fn player_lives(&self, participant_id: i64) -> impl Iterator<Item = &WardLife> {
        self.lives.iter().filter(move |w| w.creator == participant_id)
    }

    pub fn active_count(&self) -> usize {
        self.active.len()
    }

    pub fn add_ward_placed(&mut self, seconds: f64, placed: &WardPlaced) {
        let life = WardLife {
            ward_id: placed.ward_id,
            begin: seconds,
            end: self.match_duration,
            position: placed.position,
            creator: placed.participant_id,
            item_type: placed.item_type,
            kind: placed.item_type.ward_kind(),
            end_reason: None,
            cleared_by: 0,
            attacks: Vec::new(),
            reveals: BTreeMap::new(),
        };
        self.active.insert(placed.ward_id, self.lives.len());
        self.lives.push(life);
    }

    pub fn add_attack(&mut self, seconds: f64, attack: &Attack) {
        if attack.target_id == 0 {
            return;
        }
        // Most attacks are on something other than a ward
        let Some(&index) = self.active.get(&attack.target_id) else {
            return;
        };
        self.lives[index].attacks.push(WardAttack {
            seconds,
            attacker_id: attack.attacker_id,
        });
    }

    pub fn add_ward_death(&mut self, seconds: f64, death: &WardDeath) -> Result<(), StatsError> {
        let Some(&index) = self.active.get(&death.ward_id) else {
            return Err(StatsError::UnknownWard {
                ward_id: death.ward_id,
                seconds,
            });
        };

        let exceeds_limit = self.exceeds_ward_limit(self.lives[index].creator);
        let ward = &mut self.lives[index];
        ward.end = seconds;
        let duration = ward.duration();
        let last_attack = ward.attacks.last().copied();

        match last_attack {
            Some(last) if ward.end - last.seconds < CLEAR_ATTACK_WINDOW_SECS => {
                ward.end_reason = Some(WardEndReason::Cleared);
                ward.cleared_by = last.attacker_id;
            }
            _ if exceeds_limit => {
                ward.end_reason = Some(WardEndReason::Replaced);
            }
            _ if ward.kind == WardKind::Yellow && duration >= YELLOW_EXPIRY_SECS => {
                ward.end_reason = Some(WardEndReason::Expired);
                if duration >= YELLOW_EXPIRY_WARN_SECS {
                    tracing::warn!(
                        ward_id = ward.ward_id,
                        seconds,
                        duration,
                        "yellow ward outlived its expiry"
                    );
                }
            }
            _ => {
                // Some clears never show up as attacks (e.g. bush jumps)
                ward.end_reason = Some(WardEndReason::Cleared);
                ward.cleared_by = likely_clearer(ward);
                tracing::warn!(
                    ward_id = ward.ward_id,
                    seconds,
                    creator = ward.creator,
                    cleared_by = ward.cleared_by,
                    "ward died with no known cause, marking cleared"
                );
            }
        }

        self.active.remove(&death.ward_id);
        Ok(())
    }

    pub fn add_state_update(&mut self, seconds: f64, update: &StateUpdate) {
        if update.health == 0.0 {
            return;
        }

        for &index in self.active.values() {
            let ward = &mut self.lives[index];
            if same_team(ward.creator, update.participant_id) {
                continue;
            }
            // Terrain and brush are ignored, so this over-counts a little
            if ward.position.distance_xy(&update.position) > ward.kind.sight_range() {
                continue;
            }

            let reveals = ward.reveals.entry(update.participant_id).or_default();
            match reveals.last_mut() {
                Some(last) if seconds - last.end < REVEAL_MERGE_SECS => last.end = seconds,
                _ => reveals.push(RevealInterval {
                    begin: seconds,
                    end: seconds,
                }),
            }
        }
    }

    /// Whether a participant holds more active wards of any kind than that kind allows.
    /// The ward being resolved is still active when this runs, so it counts.
    fn exceeds_ward_limit(&self, creator: i64) -> bool {
        let mut per_kind: BTreeMap<WardKind, usize> = BTreeMap::new();
        for &index in self.active.values() {
            let ward = &self.lives[index];
            if ward.creator != creator {
                continue;
            }
            let count = per_kind.entry(ward.kind).or_default();
            *count += 1;
            if *count > ward.kind.max_concurrent() {
                return true;
            }
        }
        false
    }

    // ─── Exports ─────────────────────────────────────────────────────────────

    pub fn export_player_wards(&self) -> BTreeMap<i64, Vec<JsonWardLife>> {
        let mut out: BTreeMap<i64, Vec<JsonWardLife>> = BTreeMap::new();
        for ward in &self.lives {
            out.entry(ward.creator).or_default().push(ward.export());
        }
        out
    }

    pub fn reveals_per_ward_average(&self, participant_id: i64) -> f64 {
        let (reveals, wards) = self
            .player_lives(participant_id)
            .fold((0usize, 0usize), |(r, w), ward| (r + ward.reveal_count(), w + 1));
        reveals as f64 / wards.max(1) as f64
    }

    pub fn live_wards_average(&self, participant_id: i64) -> LiveWardsAverage {
        let mut avg = LiveWardsAverage::default();
        if self.match_duration <= 0.0 {
            return avg;
        }

        for ward in self.player_lives(participant_id) {
            let lifetime = ward.duration();
            match ward.kind {
                WardKind::Yellow => avg.yellow += lifetime,
                WardKind::Pink => avg.pink += lifetime,
                WardKind::Blue => avg.blue += lifetime,
                WardKind::Unknown => continue,
            }
            if matches!(ward.kind, WardKind::Yellow | WardKind::Blue) {
                avg.yellow_and_blue += lifetime;
            }
        }

        avg.yellow /= self.match_duration;
        avg.pink /= self.match_duration;
        avg.blue /= self.match_duration;
        avg.yellow_and_blue /= self.match_duration;
        avg
    }
}

/// Best guess at who cleared a ward with no attack on record: the enemy whose latest
/// reveal ended last, else a fixed champion on the other team.
fn likely_clearer(ward: &WardLife) -> i64 {
    let mut last_reveal_end = 0.0;
    let mut last_reveal_pid = 0;

    for (&pid, intervals) in &ward.reveals {
        if same_team(ward.creator, pid) {
            continue;
        }
        let Some(reveal) = intervals.last() else {
            continue;
        };
        if last_reveal_end < reveal.end {
            last_reveal_end = reveal.end;
            last_reveal_pid = pid;
        }
    }

    if last_reveal_pid > 0 {
        last_reveal_pid
    } else if ward.creator >= 6 {
        1
    } else {
        6
    }
}

impl EventHandler for WardTracker {
    fn handle_event(&mut self, event: &CanonicalEvent) -> Result<(), StatsError> {
        match &event.kind {
            EventKind::WardPlaced(placed) => self.add_ward_placed(event.seconds, placed),
            EventKind::WardDeath(death) => self.add_ward_death(event.seconds, death)?,
            EventKind::Attack(attack) => self.add_attack(event.seconds, attack),
            EventKind::StateUpdate(update) => self.add_state_update(event.seconds, update),
            _ => {}
        }
        Ok(())
    }
}
