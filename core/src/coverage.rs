//! How much of the map a champion visited, per game stage.

use std::collections::BTreeMap;

use hashbrown::HashSet;
use lolstats_types::Position;

use crate::map::{X_MAX, Y_MAX};
use crate::stage::GameStage;

pub const DEFAULT_GRID_SIZE: u32 = 12;
/// Key for coverage over the whole match.
pub const FULL_MATCH: &str = "full";

/// Visited cells of an N×N grid laid over the map. Positions off the map are
/// clamped onto its edge cells.
#[derive(Debug, Clone)]
pub struct CoverageMap {
    grid_size: u32,
    seen: BTreeMap<&'static str, HashSet<(u32, u32)>>,
}

impl CoverageMap {
    pub fn new(grid_size: u32) -> Self {
        Self {
            grid_size: grid_size.max(1),
            seen: BTreeMap::new(),
        }
    }

    fn cell(&self, position: &Position) -> (u32, u32) {
        let n = f64::from(self.grid_size);
        let last = self.grid_size - 1;
        let x = position.x.clamp(0.0, X_MAX);
        let y = position.y.clamp(0.0, Y_MAX);
        (
            ((x / (X_MAX / n)) as u32).min(last),
            ((y / (Y_MAX / n)) as u32).min(last),
        )
    }

    pub fn add(&mut self, seconds: f64, position: &Position) {
        let cell = self.cell(position);
        let stage = GameStage::at(seconds).as_str();
        self.seen.entry(stage).or_default().insert(cell);
        self.seen.entry(FULL_MATCH).or_default().insert(cell);
    }

    /// Percent of grid cells visited, keyed by stage and [`FULL_MATCH`]. Stages
    /// without any position are absent.
    pub fn percents(&self) -> BTreeMap<String, f64> {
        let cells = f64::from(self.grid_size) * f64::from(self.grid_size);
        self.seen
            .iter()
            .map(|(stage, seen)| (stage.to_string(), 100.0 * seen.len() as f64 / cells))
            .collect()
    }
}

impl Default for CoverageMap {
    fn default() -> Self {
        Self::new(DEFAULT_GRID_SIZE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_cell_center_is_full_coverage() {
        let mut coverage = CoverageMap::new(12);
        let (w, h) = (X_MAX / 12.0, Y_MAX / 12.0);
        for i in 0..12 {
            for j in 0..12 {
                let center = Position::xy((i as f64 + 0.5) * w, (j as f64 + 0.5) * h);
                coverage.add(30.0, &center);
            }
        }

        let percents = coverage.percents();
        assert_eq!(percents["full"], 100.0);
        assert_eq!(percents["early"], 100.0);
        assert!(!percents.contains_key("mid"));
    }

    #[test]
    fn test_distinct_cells_per_stage() {
        let mut coverage = CoverageMap::new(12);
        coverage.add(10.0, &Position::xy(100.0, 100.0));
        coverage.add(20.0, &Position::xy(200.0, 200.0));
        coverage.add(30.0, &Position::xy(7000.0, 7000.0));
        coverage.add(700.0, &Position::xy(14000.0, 100.0));
        coverage.add(1600.0, &Position::xy(100.0, 14000.0));
        // Clamped into the corner cells
        coverage.add(1700.0, &Position::xy(-120.0, -120.0));
        coverage.add(1800.0, &Position::xy(20000.0, 20000.0));

        let percents = coverage.percents();
        assert_eq!(percents["full"], 100.0 * 5.0 / 144.0);
        assert_eq!(percents["early"], 100.0 * 2.0 / 144.0);
        assert_eq!(percents["mid"], 100.0 / 144.0);
        assert_eq!(percents["late"], 100.0 * 3.0 / 144.0);
    }
}
