use lolstats_types::{Position, RolePosition};
use std::collections::BTreeMap;
use thiserror::Error;

/// A raw event referenced an entity handle that can't be attributed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ResolveError {
    #[error("network id {0} was never registered")]
    UnknownNetworkId(i64),

    #[error("no roster entry for hero {0:?}")]
    UnknownHero(String),
}

/// Ward spell casts and ward creations could not be paired up.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CorrelationError {
    #[error("found {casts} ward spell casts but {creations} ward creations")]
    CountMismatch { casts: usize, creations: usize },

    #[error(
        "no ward spell cast found for ward created at {seconds:.1}s at ({:.0}, {:.0})",
        .position.x,
        .position.y
    )]
    NoMatch { seconds: f64, position: Position },
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum NormalizeError {
    #[error("resolution failed at {seconds:.2}s: {source}")]
    Resolution {
        seconds: f64,
        #[source]
        source: ResolveError,
    },

    #[error(transparent)]
    Correlation(#[from] CorrelationError),
}

/// Role inference ended without 8 unique non-top assignments. The partial map is
/// still returned alongside this error.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("expected 8 role assignments but resolved {assigned}: {roles:?}")]
pub struct RoleInferenceError {
    pub assigned: usize,
    pub roles: BTreeMap<i64, RolePosition>,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum StatsError {
    #[error("no participant with summoner id {0}")]
    UnknownSubject(i64),

    #[error("ward {ward_id} died at {seconds:.2}s but was never placed")]
    UnknownWard { ward_id: i64, seconds: f64 },

    #[error(transparent)]
    Normalize(#[from] NormalizeError),
}
