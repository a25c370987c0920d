//! Match analysis for League of Legends spectator telemetry.
//!
//! Two stages: [`normalize`] turns a raw event log into a canonical, time-ordered
//! stream with stable participant/map ids, and [`stats::compute_advanced`] replays
//! that stream through a set of trackers to produce one player's advanced stats.
//! Everything here is pure; file IO and timestamps live in the worker binary.

pub mod combos;
pub mod coverage;
pub mod error;
pub mod events;
pub mod handlers;
pub mod identity;
pub mod lanes;
pub mod map;
pub mod normalize;
pub mod stage;
pub mod stats;
pub mod team_fights;
pub mod time_management;
pub mod wards;

pub use error::{
    CorrelationError, NormalizeError, ResolveError, RoleInferenceError, StatsError,
};
pub use events::{MatchInput, RawEvent, RawKind};
pub use handlers::EventHandler;
pub use normalize::{normalize, normalize_events};
pub use stage::GameStage;
pub use stats::{AdvancedStats, AnalysisOptions, average_advanced_stats, compute_advanced};
