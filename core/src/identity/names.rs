//! Engine object names → stable map entity ids.
//!
//! Turret names differ between the two sides: blue has seven `c` turrets and
//! `l`/`r` turrets 02 and 03, red has five `c` turrets and `l`/`r` 01 to 03. Both
//! spellings of the base turrets are kept since patches have flipped between them.

use lolstats_types::ActorType;
use phf::phf_map;

use crate::map::monster;

static TURRET_IDS: phf::Map<&'static str, i64> = phf_map! {
    "t1_l_02_a" => 101,
    "t1_l_03_a" => 102,
    "t1_c_01_a" => 103,
    "t1_c_02_a" => 104,
    "t1_c_03_a" => 105,
    "t1_c_04_a" => 106,
    "t1_c_05_a" => 107,
    "t1_c_06_a" => 108,
    "t1_l_01_a" => 108,
    "t1_c_07_a" => 109,
    "t1_r_01_a" => 109,
    "t1_r_02_a" => 110,
    "t1_r_03_a" => 111,
    "orderturretshrine_a" => 112,
    "t2_l_02_a" => 201,
    "t2_l_03_a" => 202,
    "t2_c_01_a" => 203,
    "t2_c_02_a" => 204,
    "t2_c_03_a" => 205,
    "t2_c_04_a" => 206,
    "t2_c_05_a" => 207,
    "t2_l_01_a" => 208,
    "t2_c_06_a" => 208,
    "t2_r_01_a" => 209,
    "t2_c_07_a" => 209,
    "t2_r_02_a" => 210,
    "t2_r_03_a" => 211,
    "chaosturretshrine_a" => 212,
};

static INHIBITOR_IDS: phf::Map<&'static str, i64> = phf_map! {
    "t1_l1" => 130,
    "t1_c1" => 131,
    "t1_r1" => 132,
    "t2_l1" => 230,
    "t2_c1" => 231,
    "t2_r1" => 232,
};

/// Monster name prefixes in match order. Longer names must precede their prefixes.
const MONSTER_PREFIXES: &[(&str, i64)] = &[
    ("riftherald", monster::RIFT_HERALD),
    ("dragon_elder", monster::DRAGON_ELDER),
    ("dragon", monster::DRAGON_ELEMENTAL),
    ("bluemini", monster::BLUE_SENTINEL_MINI),
    ("blue", monster::BLUE_SENTINEL),
    ("gromp", monster::GROMP),
    ("krugmini", monster::KRUG_MINI),
    ("minikrug", monster::KRUG_MINI),
    ("krug", monster::KRUG),
    ("murkwolfmini", monster::MURKWOLF_MINI),
    ("murkwolf", monster::MURKWOLF),
    ("razorbeakmini", monster::RAZORBEAK_MINI),
    ("razorbeak", monster::RAZORBEAK),
    ("redmini", monster::RED_BRAMBLEBACK_MINI),
    ("red", monster::RED_BRAMBLEBACK),
    ("crab", monster::CRAB),
];

/// Names of the placed ward objects (not the items that place them).
pub fn is_ward_name(name: &str) -> bool {
    matches!(
        name.to_lowercase().as_str(),
        "sightward" | "visionward" | "jammerdevice"
    )
}

fn is_minion_name(name: &str) -> bool {
    name.to_lowercase().starts_with("minion")
}

fn turret_id(name: &str) -> Option<i64> {
    let lower = name.to_lowercase();
    let key = lower.strip_prefix("turret_")?;
    TURRET_IDS.get(key).copied()
}

fn inhibitor_id(name: &str) -> Option<i64> {
    let lower = name.to_lowercase();
    let key = lower.strip_prefix("barracks_")?;
    let id = INHIBITOR_IDS.get(key).copied();
    if id.is_none() {
        tracing::warn!(name, "barracks object with no known inhibitor id");
    }
    id
}

/// Not every camp carries the `sru_` prefix (mini krugs don't), so it is optional.
fn monster_id(name: &str) -> Option<i64> {
    let lower = name.to_lowercase();
    let clean = lower.strip_prefix("sru_").unwrap_or(&lower);

    if clean.starts_with("baron") {
        return (!clean.starts_with("baronspawn")).then_some(monster::BARON);
    }
    MONSTER_PREFIXES
        .iter()
        .find(|(prefix, _)| clean.starts_with(prefix))
        .map(|&(_, id)| id)
}

/// Classify a non-hero entity by its object name.
///
/// Buildings and monsters get their fixed map id; minions, wards and anything
/// unrecognized keep the network id as their id.
pub fn classify(name: &str, network_id: i64) -> (Option<ActorType>, i64) {
    if is_minion_name(name) {
        (Some(ActorType::Minion), network_id)
    } else if is_ward_name(name) {
        (Some(ActorType::Ward), network_id)
    } else if let Some(id) = turret_id(name) {
        (Some(ActorType::Turret), id)
    } else if let Some(id) = monster_id(name) {
        (Some(ActorType::Monster), id)
    } else if let Some(id) = inhibitor_id(name) {
        (Some(ActorType::Inhibitor), id)
    } else {
        (None, network_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_turrets() {
        assert_eq!(classify("Turret_T1_L_02_A", 9), (Some(ActorType::Turret), 101));
        assert_eq!(classify("Turret_T2_C_06_A", 9), (Some(ActorType::Turret), 208));
        assert_eq!(classify("Turret_T2_L_01_A", 9), (Some(ActorType::Turret), 208));
        assert_eq!(classify("Turret_ChaosTurretShrine_A", 9), (Some(ActorType::Turret), 212));
        // Same family without the suffix is not a turret we track
        assert_eq!(classify("Turret_T1_C_01", 9), (None, 9));
    }

    #[test]
    fn test_monsters() {
        assert_eq!(classify("SRU_Baron12.1.1", 5), (Some(ActorType::Monster), 301));
        assert_eq!(classify("SRU_BaronSpawn12.1.2", 5), (None, 5));
        assert_eq!(classify("SRU_Dragon_Elder6.5.1", 5), (Some(ActorType::Monster), 303));
        assert_eq!(classify("SRU_Dragon_Air6.1.1", 5), (Some(ActorType::Monster), 302));
        assert_eq!(classify("SRU_BlueMini1.1.2", 5), (Some(ActorType::Monster), 305));
        assert_eq!(classify("MiniKrug", 5), (Some(ActorType::Monster), 308));
        assert_eq!(classify("SRU_Crab15.1.1", 5), (Some(ActorType::Monster), 315));
        assert_eq!(classify("SRU_RiftHerald17.1.1", 5), (Some(ActorType::Monster), 300));
    }

    #[test]
    fn test_minions_wards_and_inhibitors() {
        assert_eq!(classify("Minion_T100L0S01N0003", 77), (Some(ActorType::Minion), 77));
        assert_eq!(classify("JammerDevice", 78), (Some(ActorType::Ward), 78));
        assert_eq!(classify("Barracks_T2_C1", 79), (Some(ActorType::Inhibitor), 231));
        assert_eq!(classify("HA_AP_Poro", 80), (None, 80));
    }
}
