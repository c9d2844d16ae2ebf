use serde::{Deserialize, Serialize};

use super::transform::sign_normalize;

/// A point in the navmesh frame (y is up, x/z span the floor)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Coordinate {
    /// Creates a new coordinate
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Creates a floor-level coordinate (y = 0.0)
    pub fn on_floor(x: f64, z: f64) -> Self {
        Self::new(x, 0.0, z)
    }

    /// Returns the coordinate with z sign-normalized, the form the navmesh service expects
    pub fn normalized(self) -> Self {
        Self {
            z: sign_normalize(self.z),
            ..self
        }
    }
}

/// The point on the navmesh nearest to a requested target
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RestrictedCoordinate {
    pub x: f64,
    #[serde(default)]
    pub y: f64,
    pub z: f64,
}

impl RestrictedCoordinate {
    pub fn new(x: f64, z: f64) -> Self {
        Self { x, y: 0.0, z }
    }
}
