//! Raw telemetry events as emitted by the spectator log reader.
//!
//! Field names follow the reader's JSON output. Anything the reader emits that this
//! crate doesn't know about deserializes to [`RawKind::Unknown`] and is skipped.

use lolstats_types::{Position, WardItemType};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawEvent {
    /// Engine clock. Cooldown expiries in pings are measured against this.
    #[serde(default)]
    pub time: f64,
    #[serde(default)]
    pub match_seconds: f64,
    #[serde(flatten)]
    pub kind: RawKind,
}

impl RawEvent {
    pub fn new(time: f64, match_seconds: f64, kind: RawKind) -> Self {
        Self {
            time,
            match_seconds,
            kind,
        }
    }

    pub fn name(&self) -> &'static str {
        self.kind.name()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum RawKind {
    BasicAttack(BasicAttack),
    ChampDie(HandleRef),
    ChampKill(HandleRef),
    Damage(RawDamage),
    Die(HandleRef),
    EpicMonsterDeath(EpicMonsterDeath),
    EpicMonsterKill(EpicMonsterKill),
    GameEnd,
    NetworkIdMapping(NetworkIdMapping),
    Kill(HandleRef),
    LevelUp(RawLevelUp),
    NexusDestroyed(NexusDestroyed),
    OnCreate(EntityLifecycle),
    OnDelete(EntityLifecycle),
    Ping(Ping),
    SpellCast(SpellCast),
    #[serde(other)]
    Unknown,
}

impl RawKind {
    pub fn name(&self) -> &'static str {
        match self {
            Self::BasicAttack(_) => "basic_attack",
            Self::ChampDie(_) => "champ_die",
            Self::ChampKill(_) => "champ_kill",
            Self::Damage(_) => "damage",
            Self::Die(_) => "die",
            Self::EpicMonsterDeath(_) => "epic_monster_death",
            Self::EpicMonsterKill(_) => "epic_monster_kill",
            Self::GameEnd => "game_end",
            Self::NetworkIdMapping(_) => "network_id_mapping",
            Self::Kill(_) => "kill",
            Self::LevelUp(_) => "level_up",
            Self::NexusDestroyed(_) => "nexus_destroyed",
            Self::OnCreate(_) => "on_create",
            Self::OnDelete(_) => "on_delete",
            Self::Ping(_) => "ping",
            Self::SpellCast(_) => "spell_cast",
            Self::Unknown => "unknown",
        }
    }
}

/// Payload for events that only name the entity involved.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HandleRef {
    pub network_id: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BasicAttack {
    pub sender: String,
    pub network_id: i64,
    pub target: String,
    pub target_network_id: i64,
    pub target_position: Position,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawDamage {
    pub damage: f64,
    pub sender: String,
    pub network_id: i64,
    pub target: String,
    pub target_network_id: i64,
    #[serde(rename = "type")]
    pub damage_type: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EpicMonsterDeath {
    /// Monster name
    pub sender: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EpicMonsterKill {
    pub sender_id: i64,
    pub killer_id: i64,
}

/// Declares the name behind a network id. Heroes are tagged `ID_HERO`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkIdMapping {
    pub name: String,
    pub network_id: i64,
    pub elo_type: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawLevelUp {
    pub level: i64,
    pub network_id: i64,
    pub sender: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NexusDestroyed {
    pub nexus: String,
}

/// Payload of `on_create` / `on_delete`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EntityLifecycle {
    pub network_id: i64,
    pub sender: String,
    pub team_id: i64,
    pub position: Position,
}

/// Periodic champion snapshot. The only place cooldowns show up.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Ping {
    pub champion_id: i64,
    pub dead: bool,
    pub gold: i64,
    pub health: f64,
    pub health_max: f64,
    pub in_grass: bool,
    pub network_id: i64,
    pub hero_index: i64,
    pub level: i64,
    pub mana: f64,
    pub mana_max: f64,
    pub minions_killed: i64,
    pub neutral_minions_killed: i64,
    pub name: String,
    pub position: Position,
    pub q_level: i64,
    pub q_exp: f64,
    pub w_level: i64,
    pub w_exp: f64,
    pub e_level: i64,
    pub e_exp: f64,
    pub r_level: i64,
    pub r_exp: f64,
    pub s1_level: i64,
    pub s1_exp: f64,
    pub s2_level: i64,
    pub s2_exp: f64,
    pub under_turret: bool,
    pub under_enemy_turret: bool,
}

impl Ping {
    /// Cooldown expiry (engine clock) for a spell slot, if the slot carries one.
    pub fn cooldown_expiry(&self, slot: &str) -> Option<f64> {
        match slot {
            "Q" => Some(self.q_exp),
            "W" => Some(self.w_exp),
            "E" => Some(self.e_exp),
            "R" => Some(self.r_exp),
            "Summoner1" => Some(self.s1_exp),
            "Summoner2" => Some(self.s2_exp),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpellCast {
    pub start_position: Position,
    pub end_position: Position,
    pub level: i64,
    pub name: String,
    pub sender: String,
    pub network_id: i64,
    pub slot: String,
    pub target: String,
    pub target_network_id: i64,
}

impl SpellCast {
    /// The ward item this cast places, if it is a ward cast at all.
    pub fn ward_item(&self) -> Option<WardItemType> {
        match self.name.to_lowercase().as_str() {
            "itemghostward" => Some(WardItemType::SightWard),
            "trinketorblvl3" => Some(WardItemType::BlueTrinket),
            "trinkettotemlvl1" => Some(WardItemType::YellowTrinket),
            "jammerdevice" => Some(WardItemType::VisionWard),
            _ => None,
        }
    }
}
