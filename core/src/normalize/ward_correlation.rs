//! Pairing ward spell casts with ward creations.
//!
//! A placed ward shows up twice in the raw log: a spell cast by the champion and, a
//! little before or after, the creation of the ward object. Neither side names the
//! other, so they are matched after the main pass by team, time and distance.
//!
//! Matching is greedy in creation order and not globally optimal. Downstream numbers
//! depend on this exact pairing, so the iteration order and tie-breaks are fixed.

use lolstats_types::{CanonicalEvent, EventKind, WardItemType, WardPlaced, team_id};

use crate::error::{CorrelationError, NormalizeError};
use crate::events::{EntityLifecycle, SpellCast};
use crate::identity::IdentityResolver;

/// Casts further than this from a creation never match it.
pub const CORRELATION_WINDOW_SECS: f64 = 30.0;

/// One second of time difference costs as much as this many units of distance.
pub const COST_PER_SECOND: f64 = 100.0;

/// Costs at or above this never match.
const MAX_COST: f64 = 100_000.0;

/// Placed events sort this far ahead of their creation so a ward killed in the same
/// second is placed before it dies.
pub const WARD_PLACED_LEAD_SECS: f64 = 0.01;

#[derive(Debug, Clone, Copy)]
pub(crate) struct PendingCast<'a> {
    pub seconds: f64,
    pub cast: &'a SpellCast,
    pub item: WardItemType,
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct PendingCreation<'a> {
    pub seconds: f64,
    pub created: &'a EntityLifecycle,
}

pub(crate) fn correlate_wards(
    creations: &[PendingCreation<'_>],
    mut casts: Vec<PendingCast<'_>>,
    resolver: &mut IdentityResolver,
) -> Result<Vec<CanonicalEvent>, NormalizeError> {
    if casts.len() != creations.len() {
        return Err(CorrelationError::CountMismatch {
            casts: casts.len(),
            creations: creations.len(),
        }
        .into());
    }

    let mut placed = Vec::with_capacity(creations.len());
    for creation in creations {
        let index = lowest_cost_cast(creation, &casts, resolver)?;
        // Move the match to the front and drop it; the displaced front cast takes
        // its slot. This keeps the pool order identical across runs.
        casts.swap(0, index);
        let pending = casts.remove(0);

        let caster = resolver
            .resolve(pending.cast.network_id)
            .map_err(|source| NormalizeError::Resolution {
                seconds: pending.seconds,
                source,
            })?;

        tracing::debug!(
            ward_id = creation.created.network_id,
            caster = caster.id,
            cast_at = pending.seconds,
            created_at = creation.seconds,
            "correlated ward placement"
        );

        placed.push(CanonicalEvent::new(
            creation.seconds - WARD_PLACED_LEAD_SECS,
            EventKind::WardPlaced(WardPlaced {
                ward_kind: pending.item.ward_kind(),
                item_type: pending.item,
                participant_id: caster.id,
                position: creation.created.position,
                team_id: creation.created.team_id,
                ward_id: creation.created.network_id,
            }),
        ));
    }
    Ok(placed)
}

/// Index of the cheapest same-team cast for a creation.
///
/// Casts are scanned in pool order and the scan stops at the first same-team cast
/// outside the window.
fn lowest_cost_cast(
    creation: &PendingCreation<'_>,
    casts: &[PendingCast<'_>],
    resolver: &mut IdentityResolver,
) -> Result<usize, NormalizeError> {
    let mut best = None;
    let mut best_cost = MAX_COST;

    for (i, pending) in casts.iter().enumerate() {
        let caster = resolver
            .resolve(pending.cast.network_id)
            .map_err(|source| NormalizeError::Resolution {
                seconds: pending.seconds,
                source,
            })?;
        if team_id(caster.id) != creation.created.team_id {
            continue;
        }

        let seconds_diff = (creation.seconds - pending.seconds).abs();
        if seconds_diff > CORRELATION_WINDOW_SECS {
            break;
        }

        let cost = pending
            .cast
            .end_position
            .distance_xy(&creation.created.position)
            + seconds_diff * COST_PER_SECOND;
        if cost < best_cost {
            best_cost = cost;
            best = Some(i);
        }
    }

    best.ok_or_else(|| {
        CorrelationError::NoMatch {
            seconds: creation.seconds,
            position: creation.created.position,
        }
        .into()
    })
}
