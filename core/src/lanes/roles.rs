//! Lane role inference from early-game farming and positioning.
//!
//! Greedy and order dependent: junglers first, then supports, mids and adcs, each
//! pick excluding players already assigned. Whoever is left plays top.

use std::collections::BTreeMap;

use lolstats_types::{BLUE_TEAM, RED_TEAM, RolePosition, team_id};

use super::{BuddyFinder, MinionTracker};
use crate::error::RoleInferenceError;
use crate::map::MapRegion;

/// Only interactions up to this champion level count.
pub const ROLE_LEVEL_CAP: i64 = 6;

#[derive(Debug, Clone, Copy)]
enum Pick {
    Most,
    Least,
}

/// Team member not yet assigned with the most (or least) of `value`. Ties go to the
/// higher participant id.
fn pick(
    pick: Pick,
    team: i64,
    assigned: &BTreeMap<i64, RolePosition>,
    value: impl Fn(i64) -> i64,
) -> Option<i64> {
    let mut best: Option<(i64, i64)> = None;
    for pid in 1..=10 {
        if assigned.contains_key(&pid) || team_id(pid) != team {
            continue;
        }
        let v = value(pid);
        let better = match best {
            None => true,
            Some((_, best_v)) => match pick {
                Pick::Most => v >= best_v,
                Pick::Least => v <= best_v,
            },
        };
        if better {
            best = Some((pid, v));
        }
    }
    best.map(|(pid, _)| pid)
}

/// Assign a role to every participant.
///
/// Fails unless junglers, supports, mids and adcs come out as 8 distinct players.
/// The error still carries what could be assigned, without the top fill.
pub fn infer_roles(
    minions: &MinionTracker,
    buddies: &BuddyFinder,
) -> Result<BTreeMap<i64, RolePosition>, RoleInferenceError> {
    let mut roles: BTreeMap<i64, RolePosition> = BTreeMap::new();
    let mut missing = false;
    let mut assign = |roles: &mut BTreeMap<i64, RolePosition>, pid: Option<i64>, role| match pid {
        Some(pid) => {
            roles.insert(pid, role);
        }
        None => missing = true,
    };

    let jungle = |pid| minions.jungle_interactions(pid, ROLE_LEVEL_CAP);
    let lane_total = |pid| minions.lane_interactions(pid, ROLE_LEVEL_CAP, None);
    let mid_lane = |pid| minions.lane_interactions(pid, ROLE_LEVEL_CAP, Some(MapRegion::Mid));

    for team in [BLUE_TEAM, RED_TEAM] {
        let jungler = pick(Pick::Most, team, &roles, jungle);
        assign(&mut roles, jungler, RolePosition::Jungle);
    }

    let mut supports = Vec::with_capacity(2);
    for team in [BLUE_TEAM, RED_TEAM] {
        let support = pick(Pick::Least, team, &roles, lane_total);
        supports.push(support);
    }
    for &support in &supports {
        assign(&mut roles, support, RolePosition::Support);
    }

    for team in [BLUE_TEAM, RED_TEAM] {
        let mid = pick(Pick::Most, team, &roles, mid_lane);
        assign(&mut roles, mid, RolePosition::Mid);
    }

    for support in supports {
        let adc = support.and_then(|s| buddies.buddy_for(s, &roles));
        assign(&mut roles, adc, RolePosition::Adc);
    }

    if missing || roles.len() != 8 {
        tracing::debug!(assigned = roles.len(), "role inference incomplete");
        return Err(RoleInferenceError {
            assigned: roles.len(),
            roles,
        });
    }

    for pid in 1..=10 {
        roles.entry(pid).or_insert(RolePosition::Top);
    }
    Ok(roles)
}
