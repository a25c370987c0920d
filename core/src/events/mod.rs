mod raw;

pub use raw::{
    BasicAttack, EntityLifecycle, EpicMonsterDeath, EpicMonsterKill, HandleRef, NetworkIdMapping,
    NexusDestroyed, Ping, RawDamage, RawEvent, RawKind, RawLevelUp, SpellCast,
};

use lolstats_types::Participant;
use serde::{Deserialize, Serialize};

/// Everything the normalizer needs for one match: the roster and the raw log, in order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MatchInput {
    #[serde(default)]
    pub match_id: i64,
    #[serde(default)]
    pub platform_id: String,
    pub participants: Vec<Participant>,
    pub events: Vec<RawEvent>,
}
