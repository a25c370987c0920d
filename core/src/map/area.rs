//! Position → area / region lookup.
//!
//! The map is mirrored along its anti-diagonal. Points on the red half are
//! transposed onto the blue half, classified there, and reported as the red
//! counterpart of the blue area.

use lolstats_types::Position;
use serde::{Deserialize, Serialize};

use super::{X_MAX, Y_MAX, Y_MIN};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Area {
    BlueBase = 1,
    BlueTopLane = 2,
    BlueTopJungle = 3,
    BlueMidLane = 4,
    BlueBotJungle = 5,
    BlueBotLane = 6,
    TopRiver = 7,
    BottomRiver = 8,
    RedBase = 9,
    RedTopLane = 10,
    RedTopJungle = 11,
    RedMidLane = 12,
    RedBotJungle = 13,
    RedBotLane = 14,
}

impl Area {
    pub fn id(self) -> i64 {
        self as i64
    }

    pub fn region(self) -> MapRegion {
        match self {
            Self::BlueBase | Self::RedBase => MapRegion::Base,
            Self::BlueTopLane | Self::RedTopLane => MapRegion::Top,
            Self::BlueMidLane | Self::RedMidLane => MapRegion::Mid,
            Self::BlueBotLane | Self::RedBotLane => MapRegion::Bot,
            Self::BlueTopJungle
            | Self::BlueBotJungle
            | Self::RedTopJungle
            | Self::RedBotJungle
            | Self::TopRiver
            | Self::BottomRiver => MapRegion::Jungle,
        }
    }
}

/// Coarse region used by farm stats and vision checks. Rivers count as jungle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum MapRegion {
    Top,
    Mid,
    Bot,
    Jungle,
    Base,
    Other,
}

impl MapRegion {
    /// Lowercase name, as used for time management areas.
    pub fn as_lower_str(self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Mid => "mid",
            Self::Bot => "bot",
            Self::Jungle => "jungle",
            Self::Base => "base",
            Self::Other => "other",
        }
    }
}

/// Which half of the map a point is on.
///
/// The x-min distance is measured against `Y_MIN`; both mins are -120 so it makes
/// no difference, but the comparison must stay strict.
fn is_blue_side(p: &Position) -> bool {
    let dist_x_min = p.x - Y_MIN;
    let dist_x_max = X_MAX - p.x;
    let dist_y_min = p.y - Y_MIN;
    let dist_y_max = Y_MAX - p.y;

    (dist_x_min < dist_x_max && dist_x_min < dist_y_min && dist_x_min < dist_y_max)
        || (dist_y_min < dist_x_min && dist_y_min < dist_x_max && dist_y_min < dist_y_max)
}

pub fn area_for(position: &Position) -> Area {
    let transposed = !is_blue_side(position);
    let p = if transposed {
        Position::new(Y_MAX - position.y, X_MAX - position.x, position.z)
    } else {
        *position
    };

    let (hi, lo) = if p.x >= p.y { (p.x, p.y) } else { (p.y, p.x) };
    let pick = |blue: Area, red: Area| if transposed { red } else { blue };

    if p.x < 4400.0 && p.y < 4400.0 {
        pick(Area::BlueBase, Area::RedBase)
    } else if p.x < 1900.0 || p.y > 11700.0 {
        pick(Area::BlueTopLane, Area::RedTopLane)
    } else if p.y < 1900.0 || p.x > 11700.0 {
        pick(Area::BlueBotLane, Area::RedBotLane)
    } else if lo / hi > 0.86 {
        pick(Area::BlueMidLane, Area::RedMidLane)
    } else if p.x <= p.y {
        pick(Area::BlueTopJungle, Area::RedTopJungle)
    } else {
        pick(Area::BlueBotJungle, Area::RedBotJungle)
    }
}

pub fn region_for(position: &Position) -> MapRegion {
    area_for(position).region()
}
