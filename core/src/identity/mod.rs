//! Network identity resolution.
//!
//! Every in-game object gets an ephemeral network id for the match. This module maps
//! those ids to something stable: a participant id for heroes, a fixed map id for
//! buildings and monsters, or the network id itself for minions and wards.
//!
//! Heroes are announced by name before the roster is known to the resolver, so their
//! participant id is filled in lazily on first lookup.

pub mod names;

use hashbrown::HashMap;
use lolstats_types::{ActorType, Participant};

use crate::error::ResolveError;
use crate::events::{RawEvent, RawKind};

const HERO_MAPPING_TYPE: &str = "ID_HERO";

/// What a network id refers to.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Entity {
    pub name: String,
    pub kind: Option<ActorType>,
    /// Participant id for heroes, map id for buildings and monsters, otherwise the
    /// network id. Zero for a hero whose participant hasn't been looked up yet.
    pub id: i64,
}

#[derive(Debug, Clone, Default)]
pub struct IdentityResolver {
    name_to_participant: HashMap<String, i64>,
    entities: HashMap<i64, Entity>,
}

impl IdentityResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the full table for one match: every identity-bearing event first, then
    /// the roster.
    pub fn for_match(events: &[RawEvent], participants: &[Participant]) -> Self {
        let mut resolver = Self::new();
        for event in events {
            resolver.observe(event);
        }
        for p in participants {
            resolver.register_participant(p.participant_id, &p.summoner_name);
        }
        resolver
    }

    pub fn register_participant(&mut self, participant_id: i64, summoner_name: &str) {
        self.name_to_participant
            .insert(summoner_name.to_string(), participant_id);
    }

    /// Record whatever identity information an event carries.
    ///
    /// Explicit mappings overwrite earlier entries; creations only fill gaps.
    pub fn observe(&mut self, event: &RawEvent) {
        match &event.kind {
            RawKind::NetworkIdMapping(mapping) => {
                let entity = if mapping.elo_type == HERO_MAPPING_TYPE {
                    Entity {
                        name: mapping.name.clone(),
                        kind: Some(ActorType::Hero),
                        id: 0,
                    }
                } else {
                    let (kind, id) = names::classify(&mapping.name, mapping.network_id);
                    Entity {
                        name: mapping.name.clone(),
                        kind,
                        id,
                    }
                };
                self.entities.insert(mapping.network_id, entity);
            }
            RawKind::OnCreate(created) => {
                self.entities.entry(created.network_id).or_insert_with(|| {
                    let (kind, id) = names::classify(&created.sender, created.network_id);
                    Entity {
                        name: created.sender.clone(),
                        kind,
                        id,
                    }
                });
            }
            _ => {}
        }
    }

    /// Resolve a network id.
    ///
    /// Id 0 means "no entity" (an untargeted cast) and resolves to an empty entity.
    /// Unknown ids are an error rather than a silent drop so that damage and kills are
    /// never attributed to the wrong champion.
    pub fn resolve(&mut self, network_id: i64) -> Result<Entity, ResolveError> {
        if network_id == 0 {
            return Ok(Entity::default());
        }

        let Some(entity) = self.entities.get_mut(&network_id) else {
            return Err(ResolveError::UnknownNetworkId(network_id));
        };

        if entity.kind == Some(ActorType::Hero) && entity.id == 0 {
            let pid = self
                .name_to_participant
                .get(&entity.name)
                .copied()
                .unwrap_or(0);
            if pid == 0 {
                return Err(ResolveError::UnknownHero(entity.name.clone()));
            }
            entity.id = pid;
        }

        Ok(entity.clone())
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}
