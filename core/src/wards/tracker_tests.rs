//! Tests for ward tracker
//!
//! End-reason priority, reveal interval merging, and the per-player exports.

use lolstats_types::{
    Attack, CanonicalEvent, EventKind, Position, StateUpdate, WardDeath, WardItemType, WardKind,
    WardPlaced,
};

use super::*;
use crate::error::StatsError;
use crate::handlers::EventHandler;

// ─── Helpers ────────────────────────────────────────────────────────────────

fn placed(
    seconds: f64,
    ward_id: i64,
    creator: i64,
    item: WardItemType,
    x: f64,
    y: f64,
) -> CanonicalEvent {
    CanonicalEvent::new(
        seconds,
        EventKind::WardPlaced(WardPlaced {
            ward_kind: item.ward_kind(),
            item_type: item,
            participant_id: creator,
            position: Position::xy(x, y),
            team_id: lolstats_types::team_id(creator),
            ward_id,
        }),
    )
}

fn attack_on(seconds: f64, attacker_id: i64, target_id: i64) -> CanonicalEvent {
    CanonicalEvent::new(
        seconds,
        EventKind::Attack(Attack {
            attacker_id,
            target_id,
            slot: "basic".to_string(),
            ..Default::default()
        }),
    )
}

fn ward_death(seconds: f64, ward_id: i64) -> CanonicalEvent {
    CanonicalEvent::new(seconds, EventKind::WardDeath(WardDeath { ward_id }))
}

fn state_update(seconds: f64, participant_id: i64, x: f64, y: f64) -> CanonicalEvent {
    CanonicalEvent::new(
        seconds,
        EventKind::StateUpdate(StateUpdate {
            participant_id,
            health: 500.0,
            health_max: 500.0,
            position: Position::xy(x, y),
            ..Default::default()
        }),
    )
}

fn run(events: &[CanonicalEvent], duration: f64) -> WardTracker {
    let mut tracker = WardTracker::new(duration);
    tracker.handle_events(events).unwrap();
    tracker
}

// ─── End reasons ────────────────────────────────────────────────────────────

#[test]
fn test_recent_attack_clears_ward() {
    let tracker = run(
        &[
            placed(1.0, 77, 1, WardItemType::SightWard, 5000.0, 5000.0),
            attack_on(2.5, 6, 77),
            attack_on(3.0, 6, 77),
            ward_death(3.5, 77),
        ],
        1000.0,
    );

    let ward = &tracker.lives()[0];
    assert_eq!(ward.begin, 1.0);
    assert_eq!(ward.end, 3.5);
    assert_eq!(ward.end_reason, Some(WardEndReason::Cleared));
    assert_eq!(ward.cleared_by, 6);
    assert_eq!(tracker.active_count(), 0);
}

#[test]
fn test_stale_attack_does_not_clear() {
    let tracker = run(
        &[
            placed(0.0, 77, 2, WardItemType::YellowTrinket, 5000.0, 5000.0),
            attack_on(10.0, 8, 77),
            ward_death(60.0, 77),
        ],
        1000.0,
    );

    assert_eq!(tracker.lives()[0].end_reason, Some(WardEndReason::Expired));
    assert_eq!(tracker.lives()[0].cleared_by, 0);
}

#[test]
fn test_extra_pink_is_replaced() {
    let tracker = run(
        &[
            placed(10.0, 1, 3, WardItemType::VisionWard, 5000.0, 5000.0),
            placed(40.0, 2, 3, WardItemType::VisionWard, 9000.0, 9000.0),
            ward_death(40.5, 1),
        ],
        1000.0,
    );

    assert_eq!(tracker.lives()[0].end_reason, Some(WardEndReason::Replaced));
    assert_eq!(tracker.lives()[1].end_reason, None);
    assert_eq!(tracker.lives()[1].end, 1000.0);
}

#[test]
fn test_fourth_yellow_replaces() {
    let mut events: Vec<CanonicalEvent> = (0..4)
        .map(|i| placed(10.0 + i as f64, 100 + i, 4, WardItemType::SightWard, 5000.0, 5000.0))
        .collect();
    events.push(ward_death(14.0, 100));

    let tracker = run(&events, 1000.0);
    assert_eq!(tracker.lives()[0].end_reason, Some(WardEndReason::Replaced));
}

#[test]
fn test_unexplained_death_credits_last_revealed_enemy() {
    let tracker = run(
        &[
            placed(0.0, 77, 1, WardItemType::VisionWard, 5000.0, 5000.0),
            state_update(5.0, 7, 5100.0, 5000.0),
            state_update(20.0, 8, 5000.0, 5200.0),
            ward_death(30.0, 77),
        ],
        1000.0,
    );

    let ward = &tracker.lives()[0];
    assert_eq!(ward.end_reason, Some(WardEndReason::Cleared));
    assert_eq!(ward.cleared_by, 8);
}

#[test]
fn test_unexplained_death_without_reveals_falls_back() {
    let tracker = run(
        &[
            placed(0.0, 1, 2, WardItemType::VisionWard, 5000.0, 5000.0),
            placed(0.0, 2, 9, WardItemType::VisionWard, 5000.0, 5000.0),
            ward_death(30.0, 1),
            ward_death(30.0, 2),
        ],
        1000.0,
    );

    assert_eq!(tracker.lives()[0].cleared_by, 6);
    assert_eq!(tracker.lives()[1].cleared_by, 1);
}

#[test]
fn test_unknown_ward_death_is_an_error() {
    let mut tracker = WardTracker::new(100.0);
    let err = tracker.handle_event(&ward_death(12.0, 404)).unwrap_err();
    assert_eq!(
        err,
        StatsError::UnknownWard {
            ward_id: 404,
            seconds: 12.0,
        }
    );
}

// ─── Reveals ────────────────────────────────────────────────────────────────

#[test]
fn test_reveals_merge_within_window() {
    let mut events = vec![placed(1.0, 77, 1, WardItemType::SightWard, 5000.0, 5000.0)];
    for t in [1.2, 2.0, 3.0, 4.0, 5.0] {
        events.push(state_update(t, 6, 5500.0, 5000.0));
    }
    events.push(state_update(6.0, 6, 9000.0, 9000.0));
    events.push(state_update(7.0, 6, 5500.0, 5000.0));
    events.push(state_update(8.0, 6, 9000.0, 9000.0));
    events.push(state_update(20.0, 6, 5500.0, 5000.0));

    let tracker = run(&events, 1000.0);
    let reveals = &tracker.lives()[0].reveals[&6];
    assert_eq!(
        reveals,
        &vec![
            RevealInterval {
                begin: 1.2,
                end: 7.0
            },
            RevealInterval {
                begin: 20.0,
                end: 20.0
            },
        ]
    );
}

#[test]
fn test_no_reveals_for_allies_or_dead_enemies() {
    let dead = CanonicalEvent::new(
        3.0,
        EventKind::StateUpdate(StateUpdate {
            participant_id: 7,
            health: 0.0,
            position: Position::xy(5000.0, 5000.0),
            ..Default::default()
        }),
    );
    let tracker = run(
        &[
            placed(1.0, 77, 1, WardItemType::SightWard, 5000.0, 5000.0),
            state_update(2.0, 2, 5000.0, 5000.0),
            dead,
        ],
        1000.0,
    );
    assert!(tracker.lives()[0].reveals.is_empty());
}

#[test]
fn test_blue_ward_has_short_sight() {
    let tracker = run(
        &[
            placed(1.0, 77, 1, WardItemType::BlueTrinket, 5000.0, 5000.0),
            state_update(2.0, 6, 5600.0, 5000.0),
            state_update(3.0, 7, 5400.0, 5000.0),
        ],
        1000.0,
    );
    let reveals = &tracker.lives()[0].reveals;
    assert!(!reveals.contains_key(&6));
    assert!(reveals.contains_key(&7));
}

#[test]
fn test_reveals_stop_after_death() {
    let tracker = run(
        &[
            placed(1.0, 77, 1, WardItemType::SightWard, 5000.0, 5000.0),
            state_update(2.0, 6, 5000.0, 5000.0),
            attack_on(2.5, 6, 77),
            ward_death(3.0, 77),
            state_update(20.0, 6, 5000.0, 5000.0),
        ],
        1000.0,
    );
    assert_eq!(tracker.lives()[0].reveal_count(), 1);
}

// ─── Exports ────────────────────────────────────────────────────────────────

#[test]
fn test_player_exports() {
    let tracker = run(
        &[
            placed(0.0, 1, 1, WardItemType::SightWard, 5000.0, 5000.0),
            placed(0.0, 2, 1, WardItemType::BlueTrinket, 9000.0, 9000.0),
            placed(100.0, 3, 1, WardItemType::VisionWard, 2000.0, 9000.0),
            state_update(10.0, 6, 5000.0, 5000.0),
            state_update(30.0, 6, 5000.0, 5000.0),
            state_update(30.0, 7, 9000.0, 9000.0),
            ward_death(60.0, 1),
        ],
        200.0,
    );

    // 3 reveal intervals over 3 wards
    assert_eq!(tracker.reveals_per_ward_average(1), 1.0);
    assert_eq!(tracker.reveals_per_ward_average(5), 0.0);

    let live = tracker.live_wards_average(1);
    assert_eq!(live.yellow, 60.0 / 200.0);
    assert_eq!(live.blue, 1.0);
    assert_eq!(live.pink, 0.5);
    assert_eq!(live.yellow_and_blue, 260.0 / 200.0);

    let exported = tracker.export_player_wards();
    let lives = &exported[&1];
    assert_eq!(lives.len(), 3);
    assert_eq!(lives[0].end_reason, Some(WardEndReason::Expired));
    assert_eq!(lives[0].reveals.get(&6), Some(&2));
    assert_eq!(lives[1].kind, WardKind::Blue);
    assert_eq!(lives[1].end_reason, None);
}
