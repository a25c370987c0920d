//! Tests for time management
//!
//! Activity transitions, area markers, and the fight/roam post-processing.

use lolstats_types::{ActorType, Attack, Damage, Position, StateUpdate};

use super::*;

// ─── Helpers ────────────────────────────────────────────────────────────────

const MID: (f64, f64) = (7400.0, 7400.0);
const JUNGLE: (f64, f64) = (7000.0, 3500.0);
const BASE: (f64, f64) = (1000.0, 1500.0);
const TOP: (f64, f64) = (1000.0, 8000.0);

fn attack_on(target_id: i64, target_type: Option<ActorType>) -> Attack {
    Attack {
        attacker_id: 1,
        target_id,
        target_type,
        slot: "basic".to_string(),
        ..Default::default()
    }
}

fn hit_by(attacker_id: i64, attacker_type: Option<ActorType>) -> Damage {
    Damage {
        attacker_id,
        attacker_type,
        victim_id: 1,
        percent: 5.0,
        ..Default::default()
    }
}

fn at(place: (f64, f64), health: f64) -> StateUpdate {
    StateUpdate {
        participant_id: 1,
        health,
        health_max: 1000.0,
        position: Position::xy(place.0, place.1),
        ..Default::default()
    }
}

fn frame(activity: Activity, area: FrameArea, begin: f64, end: f64) -> TimeFrame {
    TimeFrame {
        activity,
        area,
        begin,
        end,
    }
}

fn fight(participants: &[i64], begin: f64, end: f64) -> TeamFight {
    TeamFight {
        begin,
        end,
        participant_ids: participants.iter().copied().collect(),
        ..Default::default()
    }
}

// ─── Transitions ────────────────────────────────────────────────────────────

#[test]
fn test_farm_truncates_siege() {
    let mut tm = TimeManagement::new(1);
    tm.add_attack(100.0, &attack_on(110, Some(ActorType::Turret)));
    assert_eq!(
        tm.raw_frames(),
        &[frame(Activity::Siege, FrameArea::Unknown, 100.0, 105.0)]
    );

    tm.add_attack(103.0, &attack_on(5000, Some(ActorType::Minion)));
    assert_eq!(
        tm.raw_frames(),
        &[
            frame(Activity::Siege, FrameArea::Unknown, 100.0, 103.0),
            frame(Activity::Farm, FrameArea::Unknown, 103.0, 105.0),
        ]
    );
}

#[test]
fn test_repeated_activity_extends_frame() {
    let mut tm = TimeManagement::new(1);
    tm.add_attack(10.0, &attack_on(5000, Some(ActorType::Minion)));
    tm.add_attack(11.0, &attack_on(5001, None));
    assert_eq!(
        tm.raw_frames(),
        &[frame(Activity::Farm, FrameArea::Unknown, 10.0, 13.0)]
    );
}

#[test]
fn test_champion_targets_are_left_to_fights() {
    let mut tm = TimeManagement::new(1);
    tm.add_attack(10.0, &attack_on(6, Some(ActorType::Hero)));
    tm.add_attack(11.0, &attack_on(2, Some(ActorType::Hero)));
    tm.add_damage(12.0, &hit_by(7, Some(ActorType::Hero)));
    assert!(tm.raw_frames().is_empty());
}

#[test]
fn test_objectives() {
    let mut tm = TimeManagement::new(1);
    tm.add_attack(10.0, &attack_on(301, Some(ActorType::Monster)));
    tm.add_damage(20.0, &hit_by(302, Some(ActorType::Monster)));
    tm.add_damage(30.0, &hit_by(207, Some(ActorType::Turret)));
    tm.add_ward(40.0);

    let activities: Vec<Activity> = tm.raw_frames().iter().map(|f| f.activity).collect();
    assert_eq!(
        activities,
        vec![Activity::Baron, Activity::Dragon, Activity::Siege, Activity::Ward]
    );
}

#[test]
fn test_death_lasts_until_revive() {
    let mut tm = TimeManagement::new(1);
    tm.add_state_update(45.0, &at(MID, 500.0));
    tm.add_death(50.0);
    tm.add_death(51.0);
    tm.add_state_update(60.0, &at(MID, 0.0));
    tm.add_state_update(62.0, &at(MID, 500.0));

    assert_eq!(
        tm.all_frames(),
        vec![frame(Activity::Dead, FrameArea::Mid, 50.0, 62.0)]
    );
}

#[test]
fn test_recall_resets_activity_but_not_area() {
    let mut tm = TimeManagement::new(1);
    tm.add_state_update(5.0, &at(MID, 500.0));
    tm.add_attack(10.0, &attack_on(5000, Some(ActorType::Minion)));
    tm.add_state_update(15.0, &at(BASE, 500.0));
    tm.add_state_update(20.0, &at(MID, 500.0));
    assert_eq!(tm.raw_frames().len(), 2);

    tm.add_state_update(30.0, &at(TOP, 500.0));
    let last = tm.raw_frames().last().copied();
    assert_eq!(last, Some(frame(Activity::Idle, FrameArea::Top, 30.0, 30.0)));
}

// ─── Post-processing ────────────────────────────────────────────────────────

fn farming_then_death() -> TimeManagement {
    let mut tm = TimeManagement::new(1);
    for t in [10.0, 20.0, 30.0] {
        tm.add_attack(t, &attack_on(5000, Some(ActorType::Minion)));
    }
    tm.add_death(40.0);
    tm
}

#[test]
fn test_fight_replaces_overlapping_frames() {
    let mut tm = farming_then_death();
    tm.add_supplemental(&[fight(&[2, 7], 5.0, 8.0), fight(&[1, 6], 19.0, 35.0)]);

    assert_eq!(
        tm.all_frames(),
        vec![
            frame(Activity::Farm, FrameArea::Unknown, 10.0, 12.0),
            frame(Activity::Fight, FrameArea::Unknown, 19.0, 35.0),
            frame(Activity::Dead, FrameArea::Unknown, 40.0, 160.0),
        ]
    );
}

#[test]
fn test_death_cuts_fight_short() {
    let mut tm = farming_then_death();
    tm.add_supplemental(&[fight(&[1, 6], 19.0, 50.0)]);

    let fight_frame = tm.all_frames()[1];
    assert_eq!(fight_frame.activity, Activity::Fight);
    assert_eq!(fight_frame.end, 40.0);
}

#[test]
fn test_long_jungle_gap_is_roaming() {
    let mut tm = TimeManagement::new(1);
    tm.add_state_update(10.0, &at(JUNGLE, 500.0));
    tm.add_attack(10.0, &attack_on(305, Some(ActorType::Minion)));
    tm.add_attack(30.0, &attack_on(305, Some(ActorType::Minion)));
    tm.add_supplemental(&[]);

    assert_eq!(
        tm.all_frames(),
        vec![
            frame(Activity::Farm, FrameArea::Jungle, 10.0, 12.0),
            frame(Activity::Roam, FrameArea::Jungle, 15.0, 27.0),
            frame(Activity::Farm, FrameArea::Jungle, 30.0, 32.0),
        ]
    );
}

#[test]
fn test_useful_percent_per_stage() {
    let frames = [
        frame(Activity::Farm, FrameArea::Bot, 0.0, 60.0),
        frame(Activity::Dead, FrameArea::Bot, 60.0, 120.0),
        frame(Activity::Fight, FrameArea::Mid, 700.0, 790.0),
        frame(Activity::Roam, FrameArea::Jungle, 1600.0, 1700.0),
    ];
    let useful = useful_percent(&frames, 2000.0);

    assert_eq!(useful["all"], 7.5);
    assert_eq!(useful["early"], 10.0);
    assert_eq!(useful["mid"], 10.0);
    // Only roaming in the late game
    assert!(!useful.contains_key("late"));
    assert!(useful_percent(&[], 2000.0).is_empty());
}

#[test]
fn test_stage_with_only_death_has_no_useful_entry() {
    let frames = [
        frame(Activity::Dead, FrameArea::Mid, 100.0, 160.0),
        frame(Activity::Roam, FrameArea::Jungle, 200.0, 230.0),
    ];
    assert!(useful_percent(&frames, 2000.0).is_empty());

    let frames = [
        frame(Activity::Dead, FrameArea::Mid, 100.0, 160.0),
        frame(Activity::Ward, FrameArea::Mid, 700.0, 790.0),
    ];
    let useful = useful_percent(&frames, 2000.0);
    assert_eq!(useful.keys().collect::<Vec<_>>(), vec!["all", "mid"]);
    assert_eq!(useful["mid"], 10.0);
}

#[test]
fn test_frame_serialization() {
    let json = serde_json::to_value(frame(Activity::Idle, FrameArea::Jungle, 1.0, 2.0)).unwrap();
    assert_eq!(json["activity"], "");
    assert_eq!(json["area"], "jungle");
}
