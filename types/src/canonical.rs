//! Canonical, engine-agnostic match events.
//!
//! Whatever produced the data (packet decoding, OCR, manual tagging), downstream stats
//! only ever see this stream. Events are ordered by `seconds`; the one exception is
//! [`WardPlaced`], which is shifted 10ms earlier so it sorts before a ward death in
//! the same second.

use serde::{Deserialize, Serialize};

use crate::{Participant, Position};

/// Kind of in-game entity an id refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActorType {
    Hero,
    /// Lane minions and jungle camps alike
    Minion,
    Monster,
    Turret,
    Inhibitor,
    Ward,
}

/// The item a ward was placed with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WardItemType {
    SightWard,
    BlueTrinket,
    YellowTrinket,
    VisionWard,
}

impl WardItemType {
    pub fn ward_kind(self) -> WardKind {
        match self {
            Self::SightWard | Self::YellowTrinket => WardKind::Yellow,
            Self::BlueTrinket => WardKind::Blue,
            Self::VisionWard => WardKind::Pink,
        }
    }
}

/// Ward behavior class, shared by every item that places that kind of ward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WardKind {
    Yellow,
    Pink,
    Blue,
    Unknown,
}

impl WardKind {
    pub fn sight_range(self) -> f64 {
        match self {
            Self::Yellow | Self::Pink => 1100.0,
            Self::Blue => 500.0,
            Self::Unknown => 0.0,
        }
    }

    /// How many wards of this kind one player may keep on the map.
    pub fn max_concurrent(self) -> usize {
        match self {
            Self::Yellow => 3,
            Self::Pink | Self::Unknown => 1,
            Self::Blue => usize::MAX,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Yellow => "yellow",
            Self::Pink => "pink",
            Self::Blue => "blue",
            Self::Unknown => "unknown",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanonicalEvent {
    pub seconds: f64,
    #[serde(flatten)]
    pub kind: EventKind,
}

impl CanonicalEvent {
    pub fn new(seconds: f64, kind: EventKind) -> Self {
        Self { seconds, kind }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum EventKind {
    Attack(Attack),
    BuildingKill(BuildingKill),
    Damage(Damage),
    Death(Death),
    LevelUp(LevelUp),
    StateUpdate(StateUpdate),
    WardPlaced(WardPlaced),
    WardDeath(WardDeath),
}

/// A basic attack or spell cast.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Attack {
    /// Match seconds at which the used slot comes off cooldown
    #[serde(skip_serializing_if = "is_zero")]
    pub cooldown_expires: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<Position>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end: Option<Position>,
    pub attacker_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attacker_type: Option<ActorType>,
    /// "basic", "Q", "W", "E", "R", "Summoner1", "Summoner2", or an item slot
    pub slot: String,
    pub target_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_type: Option<ActorType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_position: Option<Position>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildingKill {
    pub building_type: ActorType,
    pub building_id: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Damage {
    /// Absolute health removed
    pub total: f64,
    /// Health removed as a percentage of the victim's max health
    pub percent: f64,
    pub attacker_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attacker_type: Option<ActorType>,
    pub victim_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub victim_type: Option<ActorType>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Death {
    pub position: Position,
    pub victim_id: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LevelUp {
    pub level: i64,
    pub participant_id: i64,
}

/// Periodic snapshot of one champion.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StateUpdate {
    pub gold: i64,
    pub health: f64,
    pub health_max: f64,
    pub in_grass: bool,
    pub minions_killed: i64,
    pub neutral_minions_killed: i64,
    pub mana: f64,
    pub mana_max: f64,
    pub participant_id: i64,
    pub position: Position,
    pub under_own_turret: bool,
    pub under_enemy_turret: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WardPlaced {
    #[serde(rename = "type")]
    pub ward_kind: WardKind,
    pub item_type: WardItemType,
    pub participant_id: i64,
    pub position: Position,
    pub team_id: i64,
    pub ward_id: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WardDeath {
    pub ward_id: i64,
}

/// Roster plus canonical events for one match.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CanonicalMatch {
    pub participants: Vec<Participant>,
    pub events: Vec<CanonicalEvent>,
}

impl CanonicalMatch {
    pub fn duration(&self) -> f64 {
        match_duration(&self.events)
    }
}

/// Seconds of the last event that is not a state update.
///
/// State updates keep streaming after the nexus falls, so they don't mark the end of play.
pub fn match_duration(events: &[CanonicalEvent]) -> f64 {
    events
        .iter()
        .rev()
        .find(|e| !matches!(e.kind, EventKind::StateUpdate(_)))
        .map_or(0.0, |e| e.seconds)
}

fn is_zero(v: &f64) -> bool {
    *v == 0.0
}
