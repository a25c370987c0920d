//! Raw telemetry → canonical event stream.
//!
//! One linear pass over the raw log. Identities are resolved up front from the whole
//! log plus the roster, then each raw event becomes zero or one canonical events.
//! Ward placements need two raw events and are correlated after the pass; the
//! result is then stable-sorted by match seconds.

mod ward_correlation;


pub use ward_correlation::{
    CORRELATION_WINDOW_SECS, COST_PER_SECOND, WARD_PLACED_LEAD_SECS,
};

use std::cmp::Ordering;

use hashbrown::HashMap;
use lolstats_types::{
    ActorType, Attack, BuildingKill, CanonicalEvent, CanonicalMatch, Damage, Death, EventKind,
    LevelUp, Participant, Position, StateUpdate, WardDeath,
};

use crate::error::NormalizeError;
use crate::events::{MatchInput, Ping, RawEvent, RawKind};
use crate::identity::{IdentityResolver, names};
use ward_correlation::{PendingCast, PendingCreation, correlate_wards};

/// How far ahead (match seconds) to look for a ping reflecting a spell's cooldown.
pub const COOLDOWN_SEARCH_SECS: f64 = 5.0;

/// Max health assumed for a damage target with no later ping.
pub const DEFAULT_MAX_HEALTH: f64 = 1000.0;

pub const BASIC_ATTACK_SLOT: &str = "basic";

pub fn normalize(input: &MatchInput) -> Result<CanonicalMatch, NormalizeError> {
    Ok(CanonicalMatch {
        participants: input.participants.clone(),
        events: normalize_events(&input.events, &input.participants)?,
    })
}

pub fn normalize_events(
    events: &[RawEvent],
    participants: &[Participant],
) -> Result<Vec<CanonicalEvent>, NormalizeError> {
    let mut resolver = IdentityResolver::for_match(events, participants);
    tracing::debug!(
        identities = resolver.len(),
        raw_events = events.len(),
        "normalizing match"
    );

    // Where each network id was last pinged, for events that carry no position
    let mut last_position: HashMap<i64, Position> = HashMap::new();
    let mut ward_casts = Vec::new();
    let mut ward_creations = Vec::new();
    let mut canonical = Vec::with_capacity(events.len());

    for (index, event) in events.iter().enumerate() {
        let seconds = event.match_seconds;
        let mut resolve = |network_id: i64| {
            resolver
                .resolve(network_id)
                .map_err(|source| NormalizeError::Resolution { seconds, source })
        };

        let kind = match &event.kind {
            RawKind::ChampKill(_)
            | RawKind::GameEnd
            | RawKind::NetworkIdMapping(_)
            | RawKind::Kill(_)
            | RawKind::OnDelete(_)
            | RawKind::NexusDestroyed(_)
            | RawKind::EpicMonsterDeath(_)
            | RawKind::EpicMonsterKill(_) => None,

            RawKind::BasicAttack(attack) => {
                let attacker = resolve(attack.network_id)?;
                let target = resolve(attack.target_network_id)?;
                Some(EventKind::Attack(Attack {
                    cooldown_expires: 0.0,
                    start: None,
                    end: None,
                    attacker_id: attacker.id,
                    attacker_type: attacker.kind,
                    slot: BASIC_ATTACK_SLOT.to_string(),
                    target_id: target.id,
                    target_type: target.kind,
                    target_position: Some(attack.target_position),
                }))
            }

            RawKind::ChampDie(died) => {
                let champ = resolve(died.network_id)?;
                Some(EventKind::Death(Death {
                    position: last_position
                        .get(&died.network_id)
                        .copied()
                        .unwrap_or_default(),
                    victim_id: champ.id,
                }))
            }

            RawKind::Damage(damage) => {
                let attacker = resolve(damage.network_id)?;
                let victim = resolve(damage.target_network_id)?;
                let max_health = next_ping(&events[index..], damage.target_network_id)
                    .map_or(DEFAULT_MAX_HEALTH, |p| p.health_max);
                Some(EventKind::Damage(Damage {
                    total: damage.damage,
                    percent: damage.damage * 100.0 / max_health,
                    attacker_id: attacker.id,
                    attacker_type: attacker.kind,
                    victim_id: victim.id,
                    victim_type: victim.kind,
                }))
            }

            RawKind::Die(died) => {
                let victim = resolve(died.network_id)?;
                match victim.kind {
                    Some(building @ (ActorType::Turret | ActorType::Inhibitor)) => {
                        Some(EventKind::BuildingKill(BuildingKill {
                            building_type: building,
                            building_id: victim.id,
                        }))
                    }
                    _ if names::is_ward_name(&victim.name) => {
                        Some(EventKind::WardDeath(WardDeath {
                            ward_id: died.network_id,
                        }))
                    }
                    _ => None,
                }
            }

            RawKind::LevelUp(level_up) if level_up.level > 0 => {
                let champ = resolve(level_up.network_id)?;
                Some(EventKind::LevelUp(LevelUp {
                    level: level_up.level,
                    participant_id: champ.id,
                }))
            }
            RawKind::LevelUp(_) => None,

            RawKind::OnCreate(created) => {
                if names::is_ward_name(&created.sender) {
                    ward_creations.push(PendingCreation { seconds, created });
                }
                None
            }

            RawKind::Ping(ping) => {
                let person = resolve(ping.network_id)?;
                last_position.insert(ping.network_id, ping.position);
                Some(EventKind::StateUpdate(StateUpdate {
                    gold: ping.gold,
                    health: ping.health,
                    health_max: ping.health_max,
                    in_grass: ping.in_grass,
                    minions_killed: ping.minions_killed,
                    neutral_minions_killed: ping.neutral_minions_killed,
                    mana: ping.mana,
                    mana_max: ping.mana_max,
                    participant_id: person.id,
                    position: ping.position,
                    under_own_turret: ping.under_turret && !ping.under_enemy_turret,
                    under_enemy_turret: ping.under_enemy_turret,
                }))
            }

            RawKind::SpellCast(cast) => {
                if let Some(item) = cast.ward_item() {
                    ward_casts.push(PendingCast {
                        seconds,
                        cast,
                        item,
                    });
                    None
                } else {
                    let attacker = resolve(cast.network_id)?;
                    let target = resolve(cast.target_network_id)?;
                    Some(EventKind::Attack(Attack {
                        cooldown_expires: cooldown_expiry(
                            &events[index..],
                            cast.network_id,
                            &cast.slot,
                        ),
                        start: Some(cast.start_position),
                        end: Some(cast.end_position),
                        attacker_id: attacker.id,
                        attacker_type: attacker.kind,
                        slot: cast.slot.clone(),
                        target_id: target.id,
                        target_type: target.kind,
                        target_position: None,
                    }))
                }
            }

            RawKind::Unknown => {
                tracing::warn!(event = event.name(), seconds, "unhandled raw event, skipping");
                None
            }
        };

        if let Some(kind) = kind {
            canonical.push(CanonicalEvent::new(seconds, kind));
        }
    }

    let placed = correlate_wards(&ward_creations, ward_casts, &mut resolver)?;
    canonical.extend(placed);

    // Stable, so same-second events keep their log order
    canonical.sort_by(|a, b| a.seconds.partial_cmp(&b.seconds).unwrap_or(Ordering::Equal));

    Ok(canonical)
}

fn next_ping(events: &[RawEvent], network_id: i64) -> Option<&Ping> {
    events.iter().find_map(|e| match &e.kind {
        RawKind::Ping(p) if p.network_id == network_id => Some(p),
        _ => None,
    })
}

/// Match seconds at which a cast's slot comes off cooldown.
///
/// Cooldowns only appear in pings, and the first ping after a cast doesn't always
/// reflect it yet, so this takes the first ping within the search window whose expiry
/// lies beyond its own engine clock. The expiry is converted from engine clock to
/// match seconds using the cast event's offset. With no such ping the slot is
/// assumed ready immediately.
fn cooldown_expiry(events: &[RawEvent], network_id: i64, slot: &str) -> f64 {
    let Some(first) = events.first() else {
        return 0.0;
    };

    for e in events {
        if e.match_seconds - first.match_seconds > COOLDOWN_SEARCH_SECS {
            break;
        }
        let RawKind::Ping(ping) = &e.kind else {
            continue;
        };
        if ping.network_id != network_id {
            continue;
        }
        if let Some(expiry) = ping.cooldown_expiry(slot)
            && expiry > e.time
        {
            return expiry + first.match_seconds - first.time;
        }
    }

    first.match_seconds
}
