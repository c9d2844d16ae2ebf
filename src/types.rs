//! Records produced by a navmesh probe

use std::fmt;

use crate::projection::{facing_yaw, Coordinate, RestrictedCoordinate};

/// Where the robot should drive: a navmesh point and the yaw to hold there
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NavTarget {
    /// Restricted x, unchanged
    pub x: f64,
    /// Restricted z, sign-normalized back into the robot frame
    pub z: f64,
    /// Yaw in radians, rounded and sign-normalized
    pub yaw: f64,
}

impl NavTarget {
    pub fn new(x: f64, z: f64, yaw: f64) -> Self {
        Self { x, z, yaw }
    }

    /// Yaw turned half a revolution, wrapped into `[-PI, PI]`
    pub fn facing_yaw(&self) -> f64 {
        facing_yaw(self.yaw)
    }
}

impl fmt::Display for NavTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "x={}, z={}, yaw={}", self.x, self.z, self.yaw)
    }
}

/// Everything one probe observed, kept for diagnostics
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Restriction {
    pub input: Coordinate,
    pub sent: Coordinate,
    pub restricted: RestrictedCoordinate,
    pub delta_x: f64,
    pub delta_z: f64,
    pub target: NavTarget,
}

impl Restriction {
    /// Builds the record for a coordinate that was normalized, sent, and restricted
    pub fn new(
        input: Coordinate,
        sent: Coordinate,
        restricted: RestrictedCoordinate,
        target: NavTarget,
    ) -> Self {
        Self {
            input,
            sent,
            restricted,
            delta_x: sent.x - restricted.x,
            delta_z: sent.z - restricted.z,
            target,
        }
    }
}

/// Expected-vs-actual comparison of a navigation target
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Verification {
    pub expected: NavTarget,
    pub actual: NavTarget,
    pub tolerance: f64,
}

impl Verification {
    pub fn new(expected: NavTarget, actual: NavTarget, tolerance: f64) -> Self {
        Self { expected, actual, tolerance }
    }

    /// True when every component is within the tolerance
    pub fn passed(&self) -> bool {
        let close = |a: f64, b: f64| (a - b).abs() <= self.tolerance;
        close(self.expected.x, self.actual.x)
            && close(self.expected.z, self.actual.z)
            && close(self.expected.yaw, self.actual.yaw)
    }
}

impl fmt::Display for Verification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Expected: {}", self.expected)?;
        write!(f, "Got:      {}", self.actual)
    }
}
