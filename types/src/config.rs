//! Worker configuration.
//!
//! Every field has a default so partial TOML files (or none at all) are valid.

use serde::{Deserialize, Serialize};

fn default_coverage_grid_size() -> u32 {
    12
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkerConfig {
    /// Cells per side of the map coverage grid
    pub coverage_grid_size: u32,
    /// Drop bulky per-event detail (positions, fights, ward lives, ...) from stats output
    pub trim_non_stats: bool,
    pub pretty_json: bool,
    /// Tracing filter directive, e.g. "lolstats_core=debug". `RUST_LOG` wins when set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_filter: Option<String>,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            coverage_grid_size: default_coverage_grid_size(),
            trim_non_stats: false,
            pretty_json: false,
            log_filter: None,
        }
    }
}
