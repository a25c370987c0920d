//! Where a champion spent its time, and doing what.
//!
//! Two independent axes are tracked for one participant: the map region it is in and
//! the activity it is busy with. Every change on either axis closes the current
//! [`TimeFrame`] and opens a new one. Activities are inferred from single events and
//! given a nominal duration (a turret attack means five seconds of sieging) that the
//! next event cuts short.

#[cfg(test)]
mod time_management_tests;

use std::collections::BTreeMap;

use lolstats_types::{ActorType, Attack, Damage, StateUpdate, team_id};
use serde::{Deserialize, Serialize};

use crate::map::{MapRegion, is_baron_or_herald, is_dragon, region_for};
use crate::stage::GameStage;
use crate::team_fights::TeamFight;

pub const OBJECTIVE_SECS: f64 = 5.0;
pub const FARM_SECS: f64 = 2.0;
pub const WARD_SECS: f64 = 5.0;
/// Placeholder until the next live state update.
pub const DEAD_SECS: f64 = 120.0;
const REVIVE_SECS: f64 = 0.1;
/// Frames shorter than this are jitter.
pub const MIN_FRAME_SECS: f64 = 1.0;
/// Jungle gaps longer than this become roaming.
pub const ROAM_GAP_SECS: f64 = 8.0;
const ROAM_TRIM_SECS: f64 = 3.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Activity {
    /// Nothing inferred yet, or reset by a recall or revive
    #[default]
    #[serde(rename = "")]
    Idle,
    Farm,
    Fight,
    Baron,
    Dragon,
    Siege,
    Ward,
    Dead,
    Roam,
}

impl Activity {
    pub fn is_useful(self) -> bool {
        match self {
            Self::Baron
            | Self::Dragon
            | Self::Farm
            | Self::Fight
            | Self::Siege
            | Self::Ward => true,
            Self::Idle | Self::Dead | Self::Roam => false,
        }
    }
}

/// Region names as they appear in frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FrameArea {
    /// Before the first position is known
    #[default]
    #[serde(rename = "")]
    Unknown,
    Base,
    Top,
    Mid,
    Bot,
    Jungle,
    Other,
}

impl From<MapRegion> for FrameArea {
    fn from(region: MapRegion) -> Self {
        match region {
            MapRegion::Base => Self::Base,
            MapRegion::Top => Self::Top,
            MapRegion::Mid => Self::Mid,
            MapRegion::Bot => Self::Bot,
            MapRegion::Jungle => Self::Jungle,
            MapRegion::Other => Self::Other,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeFrame {
    pub activity: Activity,
    pub area: FrameArea,
    pub begin: f64,
    pub end: f64,
}

impl TimeFrame {
    pub fn duration(&self) -> f64 {
        self.end - self.begin
    }

    fn can_merge(&self, next: &TimeFrame) -> bool {
        self.activity == next.activity && self.area == next.area && self.end >= next.begin - 1.0
    }

    fn truncate(&mut self, seconds: f64) {
        if seconds < self.end {
            self.end = seconds;
        }
    }
}

#[derive(Debug, Clone)]
pub struct TimeManagement {
    participant_id: i64,
    team_id: i64,
    last_area: FrameArea,
    last_activity: Activity,
    is_dead: bool,
    frames: Vec<TimeFrame>,
}

impl TimeManagement {
    pub fn new(participant_id: i64) -> Self {
        Self {
            participant_id,
            team_id: team_id(participant_id),
            last_area: FrameArea::Unknown,
            last_activity: Activity::Idle,
            is_dead: false,
            frames: Vec::new(),
        }
    }

    /// Frames as recorded, jitter included.
    pub fn raw_frames(&self) -> &[TimeFrame] {
        &self.frames
    }

    /// Frames lasting at least [`MIN_FRAME_SECS`].
    pub fn all_frames(&self) -> Vec<TimeFrame> {
        self.frames
            .iter()
            .filter(|f| f.duration() >= MIN_FRAME_SECS)
            .copied()
            .collect()
    }

    // ─── Event intake ────────────────────────────────────────────────────────

    /// An attack or cast by this participant.
    pub fn add_attack(&mut self, seconds: f64, attack: &Attack) {
        let target_team = team_id(attack.target_id);
        if target_team != 0 && target_team != self.team_id {
            // Fighting comes from detected team fights instead
            return;
        }

        if attack.target_type == Some(ActorType::Turret) {
            self.activity(Activity::Siege, seconds, OBJECTIVE_SECS);
        } else if is_baron_or_herald(attack.target_id) {
            self.activity(Activity::Baron, seconds, OBJECTIVE_SECS);
        } else if is_dragon(attack.target_id) {
            self.activity(Activity::Dragon, seconds, OBJECTIVE_SECS);
        } else if matches!(attack.target_type, None | Some(ActorType::Minion)) {
            // Untargeted casts are mostly wave clear
            self.activity(Activity::Farm, seconds, FARM_SECS);
        }
    }

    /// Damage taken by this participant.
    pub fn add_damage(&mut self, seconds: f64, damage: &Damage) {
        if team_id(damage.attacker_id) != 0 {
            return;
        }
        if is_baron_or_herald(damage.attacker_id) {
            self.activity(Activity::Baron, seconds, OBJECTIVE_SECS);
        } else if is_dragon(damage.attacker_id) {
            self.activity(Activity::Dragon, seconds, OBJECTIVE_SECS);
        } else if damage.attacker_type == Some(ActorType::Turret) {
            self.activity(Activity::Siege, seconds, OBJECTIVE_SECS);
        }
    }

    pub fn add_death(&mut self, seconds: f64) {
        if !self.is_dead {
            self.is_dead = true;
            self.activity(Activity::Dead, seconds, DEAD_SECS);
        }
    }

    pub fn add_state_update(&mut self, seconds: f64, update: &StateUpdate) {
        if self.is_dead && update.health > 0.0 {
            self.is_dead = false;
            // Cuts the death frame short; dropped later as jitter
            self.activity(Activity::Idle, seconds, REVIVE_SECS);
        }
        self.area(region_for(&update.position).into(), seconds);
    }

    pub fn add_ward(&mut self, seconds: f64) {
        self.activity(Activity::Ward, seconds, WARD_SECS);
    }

    // ─── Transitions ─────────────────────────────────────────────────────────

    /// Start a new activity in the current area.
    fn activity(&mut self, activity: Activity, start: f64, duration: f64) {
        if let Some(last) = self.frames.last_mut() {
            last.truncate(start);
        }

        let frame = TimeFrame {
            activity,
            area: self.last_area,
            begin: start,
            end: start + duration,
        };
        match self.frames.last_mut() {
            Some(last) if last.can_merge(&frame) => last.end = frame.end,
            _ => self.frames.push(frame),
        }
        self.last_activity = activity;
    }

    /// Zero-length marker for entering a new area with the current activity.
    ///
    /// Recalling resets the activity but leaves the area as it was.
    fn area(&mut self, area: FrameArea, start: f64) {
        if area == self.last_area {
            return;
        }
        if area == FrameArea::Base {
            self.last_activity = Activity::Idle;
            return;
        }

        if let Some(last) = self.frames.last_mut() {
            last.truncate(start);
        }
        self.frames.push(TimeFrame {
            activity: self.last_activity,
            area,
            begin: start,
            end: start,
        });
        self.last_area = area;
    }

    // ─── Post-processing ─────────────────────────────────────────────────────

    /// Add frames that can only be known after the whole match: fights from the
    /// detector, then roaming.
    pub fn add_supplemental(&mut self, fights: &[TeamFight]) {
        self.add_fighting(fights);
        self.add_roaming();
    }

    /// Insert a "fight" frame for every fight this participant took part in.
    ///
    /// Whatever else was going on during a fight is dropped, except deaths, which
    /// cut the fight short.
    fn add_fighting(&mut self, fights: &[TeamFight]) {
        let participant_id = self.participant_id;
        let mut fights = fights
            .iter()
            .filter(|f| f.participant_ids.contains(&participant_id))
            .peekable();

        let mut merged: Vec<TimeFrame> = Vec::with_capacity(self.frames.len());
        let mut before_first = TimeFrame {
            area: FrameArea::Base,
            ..Default::default()
        };

        for frame in std::mem::take(&mut self.frames) {
            while let Some(fight) = fights.next_if(|f| f.begin <= frame.begin) {
                let last = merged.last_mut().unwrap_or(&mut before_first);
                last.truncate(fight.begin);
                let area = last.area;
                merged.push(TimeFrame {
                    activity: Activity::Fight,
                    area,
                    begin: fight.begin,
                    end: fight.end,
                });
            }

            let last = merged.last_mut().unwrap_or(&mut before_first);
            if frame.activity == Activity::Dead {
                last.truncate(frame.begin);
            } else if frame.begin < last.end {
                continue;
            }
            merged.push(frame);
        }

        self.frames = merged;
    }

    /// Fill long gaps between jungle frames with "roam", minus a few seconds either
    /// side for walking in and out.
    fn add_roaming(&mut self) {
        let mut with_roams = Vec::with_capacity(self.frames.len());
        let mut previous: Option<TimeFrame> = None;

        for frame in std::mem::take(&mut self.frames) {
            if let Some(last) = previous
                && last.area == FrameArea::Jungle
                && frame.area == FrameArea::Jungle
                && frame.begin - last.end > ROAM_GAP_SECS
            {
                with_roams.push(TimeFrame {
                    activity: Activity::Roam,
                    area: FrameArea::Jungle,
                    begin: last.end + ROAM_TRIM_SECS,
                    end: frame.begin - ROAM_TRIM_SECS,
                });
            }
            with_roams.push(frame);
            previous = Some(frame);
        }

        self.frames = with_roams;
    }
}

/// Percent of each game stage spent on useful activities, keyed by stage name and
/// "all". Stages without any useful time are absent.
pub fn useful_percent(frames: &[TimeFrame], match_duration: f64) -> BTreeMap<String, f64> {
    let mut useful: BTreeMap<&'static str, f64> = BTreeMap::new();

    for frame in frames.iter().filter(|f| f.activity.is_useful()) {
        let stage = GameStage::at(frame.begin);
        for key in ["all", stage.as_str()] {
            *useful.entry(key).or_default() += frame.duration();
        }
    }

    useful
        .into_iter()
        .map(|(key, seconds)| {
            let stage_secs = match key {
                "early" => GameStage::Early.duration(match_duration),
                "mid" => GameStage::Mid.duration(match_duration),
                "late" => GameStage::Late.duration(match_duration),
                _ => match_duration,
            };
            (key.to_string(), 100.0 * seconds / stage_secs)
        })
        .collect()
}
