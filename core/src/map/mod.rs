//! Summoner's Rift geometry and fixed entity ids.

mod area;

pub use area::{Area, MapRegion, area_for, region_for};

use lolstats_types::Position;

/// Map bounds in engine units.
pub const X_MIN: f64 = -120.0;
pub const X_MAX: f64 = 14870.0;
pub const Y_MIN: f64 = -120.0;
pub const Y_MAX: f64 = 14980.0;

/// Neutral monster ids. 300–303 are epic objectives, 304–315 jungle camps.
pub mod monster {
    pub const RIFT_HERALD: i64 = 300;
    pub const BARON: i64 = 301;
    pub const DRAGON_ELEMENTAL: i64 = 302;
    pub const DRAGON_ELDER: i64 = 303;
    pub const BLUE_SENTINEL: i64 = 304;
    pub const BLUE_SENTINEL_MINI: i64 = 305;
    pub const GROMP: i64 = 306;
    pub const KRUG: i64 = 307;
    pub const KRUG_MINI: i64 = 308;
    pub const MURKWOLF: i64 = 309;
    pub const MURKWOLF_MINI: i64 = 310;
    pub const RAZORBEAK: i64 = 311;
    pub const RAZORBEAK_MINI: i64 = 312;
    pub const RED_BRAMBLEBACK: i64 = 313;
    pub const RED_BRAMBLEBACK_MINI: i64 = 314;
    pub const CRAB: i64 = 315;
}

pub fn is_epic_monster(id: i64) -> bool {
    (monster::RIFT_HERALD..=monster::DRAGON_ELDER).contains(&id)
}

pub fn is_baron_or_herald(id: i64) -> bool {
    id == monster::BARON || id == monster::RIFT_HERALD
}

pub fn is_dragon(id: i64) -> bool {
    id == monster::DRAGON_ELEMENTAL || id == monster::DRAGON_ELDER
}

pub fn is_jungle_minion(id: i64) -> bool {
    (monster::BLUE_SENTINEL..=monster::CRAB).contains(&id)
}

/// Team (100 or 200) owning a turret or inhibitor id.
#[inline]
pub fn building_team(building_id: i64) -> i64 {
    (building_id / 100) * 100
}

/// Approximate turret locations. Fountain turrets (112, 212) are not listed and so
/// never count for vision.
pub const TURRET_POSITIONS: &[(i64, Position)] = &[
    (101, Position::new(1364.939, 6837.4, 52.83815)),
    (102, Position::new(994.0, 10434.0, 52.8381)),
    (103, Position::new(1784.683, 2325.73, 95.74805)),
    (104, Position::new(2219.66, 1777.356, 95.74808)),
    (105, Position::new(3649.316, 3670.658, 95.74804)),
    (106, Position::new(5038.548, 4957.532, 50.23169)),
    (107, Position::new(5902.0, 6336.0, 51.79154)),
    (108, Position::new(1198.0, 4278.0, 95.74805)),
    (109, Position::new(4274.0, 1258.0, 95.74808)),
    (110, Position::new(6844.213, 1544.085, 49.4502)),
    (111, Position::new(10420.48, 1048.0, 51.35432)),
    (201, Position::new(7940.0, 13376.0, 52.8381)),
    (202, Position::new(4320.0, 13854.0, 52.8381)),
    (203, Position::new(13078.0, 12584.0, 91.42981)),
    (204, Position::new(12564.0, 13084.0, 91.42981)),
    (205, Position::new(11110.61, 11183.44, 91.42981)),
    (206, Position::new(9012.0, 10066.0, 52.3063)),
    (207, Position::new(8900.0, 8576.0, 54.04472)),
    (208, Position::new(10472.67, 13598.79, 91.79472)),
    (209, Position::new(13604.0, 10578.0, 91.42978)),
    (210, Position::new(13346.0, 8340.0, 52.3063)),
    (211, Position::new(13854.49, 4426.352, 52.80367)),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_monster_classes() {
        assert!(is_epic_monster(monster::BARON));
        assert!(is_epic_monster(monster::DRAGON_ELDER));
        assert!(!is_epic_monster(monster::BLUE_SENTINEL));
        assert!(is_jungle_minion(monster::CRAB));
        assert!(!is_jungle_minion(monster::RIFT_HERALD));
        assert!(is_baron_or_herald(monster::RIFT_HERALD));
        assert!(is_dragon(monster::DRAGON_ELEMENTAL));
    }

    #[test]
    fn test_building_team() {
        assert_eq!(building_team(107), 100);
        assert_eq!(building_team(211), 200);
        assert_eq!(building_team(231), 200);
    }
}
