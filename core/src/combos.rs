//! Ability combos: bursts of casts and attacks that dealt champion damage.

use lolstats_types::{ActorType, Attack, Damage, Participant};
use serde::{Deserialize, Serialize};

/// Casts further apart than this belong to different combos.
pub const COMBO_TIMEOUT_SECS: f64 = 2.0;
/// A combo ends once this long has passed without champion damage.
pub const DAMAGE_TIMEOUT_SECS: f64 = 2.0;

const BASIC_ATTACK: &str = "aa";

#[derive(Debug, Clone, PartialEq)]
struct ComboItem {
    name: String,
    seconds: f64,
}

impl ComboItem {
    fn is_basic(&self) -> bool {
        self.name == BASIC_ATTACK
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
struct Combo {
    items: Vec<ComboItem>,
    last_damage: Option<f64>,
    damage: f64,
}

impl Combo {
    fn starting_with(item: ComboItem) -> Self {
        Self {
            items: vec![item],
            ..Default::default()
        }
    }

    /// Drop items after the last damage, then collapse runs of basic attacks at
    /// either end to a single one.
    fn trim(&mut self) {
        let cutoff = self.last_damage.unwrap_or(0.0);
        self.items.retain(|item| item.seconds <= cutoff);

        let leading = self.items.iter().take_while(|i| i.is_basic()).count();
        if leading > 1 {
            self.items.drain(..leading - 1);
        }
        let trailing = self.items.iter().rev().take_while(|i| i.is_basic()).count();
        if trailing > 1 {
            self.items.truncate(self.items.len() - (trailing - 1));
        }
    }

    fn ability_count(&self) -> usize {
        self.items
            .iter()
            .filter(|i| matches!(i.name.as_str(), "Q" | "W" | "E" | "R"))
            .count()
    }

    fn is_worth_keeping(&self) -> bool {
        self.items.len() > 1 && self.ability_count() > 1 && self.damage > 0.0
    }

    /// Whether an attack at `seconds` still belongs to this combo.
    fn continues_at(&self, seconds: f64) -> bool {
        let Some(first) = self.items.first() else {
            return false;
        };
        let close_to_last_cast = self
            .items
            .iter()
            .rev()
            .find(|i| !i.is_basic())
            .is_none_or(|cast| seconds <= cast.seconds + COMBO_TIMEOUT_SECS);
        let damage_recent = match self.last_damage {
            None => seconds < first.seconds + DAMAGE_TIMEOUT_SECS,
            Some(last) => seconds <= last + DAMAGE_TIMEOUT_SECS,
        };
        close_to_last_cast && damage_recent
    }

    fn summary(&self) -> Option<ComboSummary> {
        let (first, last) = (self.items.first()?, self.items.last()?);
        Some(ComboSummary {
            name: self
                .items
                .iter()
                .map(|i| i.name.as_str())
                .collect::<Vec<_>>()
                .join(","),
            total_damage_dealt: self.damage,
            begin: first.seconds,
            end: last.seconds,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComboSummary {
    /// Item names joined by commas, e.g. `"aa,Q,E,SummonerDot"`
    pub name: String,
    pub total_damage_dealt: f64,
    pub begin: f64,
    pub end: f64,
}

/// Combo detection for one participant's attacks and the champion damage they deal.
#[derive(Debug, Clone)]
pub struct ComboTracker {
    summoner_spells: [String; 2],
    current: Combo,
    completed: Vec<Combo>,
}

impl ComboTracker {
    pub fn new(participant: &Participant) -> Self {
        Self {
            summoner_spells: [participant.spell1.clone(), participant.spell2.clone()],
            current: Combo::default(),
            completed: Vec::new(),
        }
    }

    fn item_name(&self, slot: &str) -> Option<String> {
        match slot {
            "basic" => Some(BASIC_ATTACK.to_string()),
            "Q" | "W" | "E" | "R" => Some(slot.to_string()),
            "Summoner1" => Some(self.summoner_spells[0].clone()),
            "Summoner2" => Some(self.summoner_spells[1].clone()),
            // Item actives and trinkets aren't named in the stream
            _ => None,
        }
    }

    pub fn add_attack(&mut self, seconds: f64, attack: &Attack) {
        let Some(name) = self.item_name(&attack.slot) else {
            return;
        };
        let item = ComboItem { name, seconds };

        if self.current.continues_at(seconds) {
            self.current.items.push(item);
            return;
        }

        let mut finished = std::mem::replace(&mut self.current, Combo::starting_with(item));
        finished.trim();
        if finished.is_worth_keeping() {
            self.completed.push(finished);
        }
    }

    /// Damage dealt by this participant. Only champion victims count.
    pub fn add_damage(&mut self, seconds: f64, damage: &Damage) {
        if damage.victim_type == Some(ActorType::Hero) {
            self.current.last_damage = Some(seconds);
            self.current.damage += damage.total;
        }
    }

    /// Completed combos, most damaging first. The combo still open at the end of
    /// the match is not included.
    pub fn summaries(&self) -> Vec<ComboSummary> {
        let mut combos: Vec<&Combo> = self.completed.iter().collect();
        combos.sort_by(|a, b| b.damage.total_cmp(&a.damage));
        combos.into_iter().filter_map(Combo::summary).collect()
    }

    pub fn damage_per_minute(&self, match_duration: f64) -> f64 {
        if match_duration <= 0.0 {
            return 0.0;
        }
        let total: f64 = self.completed.iter().map(|c| c.damage).sum();
        total / match_duration * 60.0
    }
}
