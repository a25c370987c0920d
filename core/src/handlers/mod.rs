//! The seam every per-match tracker plugs into.
//!
//! Trackers are fed the canonical stream one event at a time, in order, by the stats
//! aggregator. Trackers that only care about a few event kinds ignore the rest.

use lolstats_types::CanonicalEvent;

use crate::error::StatsError;

pub trait EventHandler {
    fn handle_event(&mut self, event: &CanonicalEvent) -> Result<(), StatsError>;

    fn handle_events(&mut self, events: &[CanonicalEvent]) -> Result<(), StatsError> {
        for event in events {
            self.handle_event(event)?;
        }
        Ok(())
    }
}
