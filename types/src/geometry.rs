use serde::{Deserialize, Serialize};

/// A point on the map in engine units.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Position {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Position {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Shorthand for a point on the ground plane.
    pub const fn xy(x: f64, y: f64) -> Self {
        Self { x, y, z: 0.0 }
    }

    /// Euclidean distance in three dimensions.
    pub fn distance(&self, other: &Position) -> f64 {
        let (dx, dy, dz) = (self.x - other.x, self.y - other.y, self.z - other.z);
        (dx * dx + dy * dy + dz * dz).sqrt()
    }

    /// Euclidean distance on the XY plane. Height is ignored, which is what
    /// every range check in the game uses.
    pub fn distance_xy(&self, other: &Position) -> f64 {
        let (dx, dy) = (self.x - other.x, self.y - other.y);
        (dx * dx + dy * dy).sqrt()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance_ignores_height_on_plane() {
        let a = Position::new(5000.0, 5000.0, 100.0);
        let b = Position::new(5000.0, 8000.0, -3900.0);

        assert_eq!(a.distance(&b), 5000.0);
        assert_eq!(a.distance_xy(&b), 3000.0);
    }

    #[test]
    fn test_missing_z_defaults_to_zero() {
        let p: Position = serde_json::from_str(r#"{"x": 1.5, "y": 2.0}"#).unwrap();
        assert_eq!(p, Position::xy(1.5, 2.0));
    }
}
