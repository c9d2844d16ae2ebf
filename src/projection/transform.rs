use std::f64::consts::PI;

use crate::projection::coordinate::{Coordinate, RestrictedCoordinate};
use crate::types::NavTarget;

/// Decimal places kept on the yaw reported to the robot
pub const YAW_DECIMALS: i32 = 2;

/// Flips a value into the navmesh service's sign convention.
///
/// Positive values become negative and everything else becomes its absolute
/// value, so `0.0` and `-0.0` both map to `0.0`. The service and the robot
/// disagree on the handedness of the z axis and on the yaw direction; this
/// function is the single place that crossing is encoded.
pub fn sign_normalize(value: f64) -> f64 {
    if value > 0.0 {
        -value.abs()
    } else {
        value.abs()
    }
}

/// Rounds half away from zero to the given number of decimal places
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// Heading of the displacement `(delta_x, delta_z)`, quadrant-correct, in radians
pub fn heading(delta_x: f64, delta_z: f64) -> f64 {
    delta_z.atan2(delta_x)
}

/// Reverses a yaw by half a turn and wraps it back into `[-PI, PI]`
pub fn facing_yaw(yaw: f64) -> f64 {
    let reversed = yaw + PI;
    if reversed > PI {
        reversed - 2.0 * PI
    } else if reversed < -PI {
        reversed + 2.0 * PI
    } else {
        reversed
    }
}

/// Derives the navigation target from the coordinate that was sent and the
/// point the service restricted it to.
///
/// `sent` must be the already normalized coordinate; the deltas are taken in
/// the service's frame and only the outputs are flipped back.
pub fn compute_target(sent: Coordinate, restricted: RestrictedCoordinate) -> NavTarget {
    let delta_x = sent.x - restricted.x;
    let delta_z = sent.z - restricted.z;

    let yaw = round_to(heading(delta_x, delta_z), YAW_DECIMALS);

    NavTarget {
        x: restricted.x,
        z: sign_normalize(restricted.z),
        yaw: sign_normalize(yaw),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-12;

    #[test]
    fn test_sign_normalize_flips_sign() {
        assert_eq!(sign_normalize(0.60), -0.60);
        assert_eq!(sign_normalize(-0.60), 0.60);
        assert_eq!(sign_normalize(f64::MAX), -f64::MAX);
    }

    #[test]
    fn test_sign_normalize_zero() {
        assert_eq!(sign_normalize(0.0), 0.0);
        assert!(sign_normalize(0.0).is_sign_positive());
        assert!(sign_normalize(-0.0).is_sign_positive());
    }

    #[test]
    fn test_sign_normalize_positive_input_is_never_positive() {
        for v in [1e-300, 0.5, 1.0, 3.14, 1e300] {
            assert!(sign_normalize(v) < 0.0);
        }
    }

    #[test]
    fn test_sign_normalize_twice_restores_value() {
        for v in [-7.5, -0.6, 0.0, 0.6, 42.0] {
            assert_eq!(sign_normalize(sign_normalize(v)), v);
        }
    }

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(3.14159, 2), 3.14);
        assert_eq!(round_to(-1.966, 2), -1.97);
        assert_eq!(round_to(2.0, 2), 2.0);
    }

    #[test]
    fn test_heading_is_quadrant_correct() {
        assert!((heading(1.0, 1.0) - PI / 4.0).abs() < EPS);
        assert!((heading(-1.0, 1.0) - 3.0 * PI / 4.0).abs() < EPS);
        assert!((heading(-1.0, -1.0) + 3.0 * PI / 4.0).abs() < EPS);
        assert!((heading(1.0, -1.0) + PI / 4.0).abs() < EPS);
        assert_eq!(heading(-1.0, 0.0), PI);
    }

    #[test]
    fn test_facing_yaw_stays_in_range() {
        for yaw in [-3.14, -1.57, 0.0, 1.57, 3.14, PI, -PI] {
            let facing = facing_yaw(yaw);
            assert!((-PI..=PI).contains(&facing), "{} -> {}", yaw, facing);
        }
        assert!((facing_yaw(-3.14) - (PI - 3.14)).abs() < EPS);
        assert!((facing_yaw(1.0) - (1.0 - PI)).abs() < EPS);
    }

    #[test]
    fn test_compute_target_reference_case() {
        let sent = Coordinate::new(-6.77, 0.0, 0.60).normalized();
        let restricted = RestrictedCoordinate::new(-6.270300406695041, -0.6000000413170843);

        let target = compute_target(sent, restricted);

        assert_eq!(target.x, -6.270300406695041);
        assert!((target.z - 0.6000000413170843).abs() < EPS);
        assert_eq!(target.yaw, -3.14);
    }

    #[test]
    fn test_compute_target_yaw_matches_atan2_before_flip() {
        let sent = Coordinate::new(1.0, 0.0, 2.0);
        let restricted = RestrictedCoordinate::new(0.0, 0.0);

        let target = compute_target(sent, restricted);

        // atan2(2, 1) = 1.1071..., rounded to 1.11, then flipped
        assert_eq!(target.yaw, -1.11);
        assert_eq!(target.z, 0.0);
    }

    #[test]
    fn test_compute_target_negative_yaw_becomes_positive() {
        let sent = Coordinate::new(0.0, 0.0, -1.0);
        let restricted = RestrictedCoordinate::new(0.0, 0.0);

        let target = compute_target(sent, restricted);

        assert_eq!(target.yaw, 1.57);
    }

    #[test]
    fn test_compute_target_same_point() {
        let sent = Coordinate::new(2.0, 0.0, -3.0);
        let restricted = RestrictedCoordinate::new(2.0, -3.0);

        let target = compute_target(sent, restricted);

        assert_eq!(target.yaw, 0.0);
        assert_eq!(target.z, 3.0);
    }
}
