//! Coordinates in the navmesh frame and the sign/yaw conventions of the service

pub mod coordinate;
pub mod transform;

pub use coordinate::{Coordinate, RestrictedCoordinate};
pub use transform::{compute_target, facing_yaw, heading, round_to, sign_normalize, YAW_DECIMALS};
