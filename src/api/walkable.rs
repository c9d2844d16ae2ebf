use crate::projection::{Coordinate, RestrictedCoordinate};

/// Axis-aligned walkable rectangle on the x/z floor plane
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WalkableArea {
    pub min_x: f64,
    pub min_z: f64,
    pub max_x: f64,
    pub max_z: f64,
}

impl WalkableArea {
    /// Creates an area from two opposite corners in any order
    pub fn new(x0: f64, z0: f64, x1: f64, z1: f64) -> Self {
        Self {
            min_x: x0.min(x1),
            min_z: z0.min(z1),
            max_x: x0.max(x1),
            max_z: z0.max(z1),
        }
    }

    /// Builds an area from `[min_x, min_z, max_x, max_z]`
    pub fn from_bounds(bounds: [f64; 4]) -> Self {
        Self::new(bounds[0], bounds[1], bounds[2], bounds[3])
    }

    /// Nearest walkable point to `target`, and its floor distance from it
    pub fn nearest(&self, target: &Coordinate) -> (RestrictedCoordinate, f64) {
        let x = target.x.clamp(self.min_x, self.max_x);
        let z = target.z.clamp(self.min_z, self.max_z);
        let distance = (target.x - x).hypot(target.z - z);

        (RestrictedCoordinate::new(x, z), distance)
    }

    /// Restricts `target` to the area, or `None` when nothing walkable is within `radius`
    pub fn restrict(&self, target: &Coordinate, radius: f64) -> Option<RestrictedCoordinate> {
        let (restricted, distance) = self.nearest(target);
        (distance <= radius).then_some(restricted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_corners_in_any_order() {
        let area = WalkableArea::new(2.0, 3.0, -1.0, -4.0);
        assert_eq!(area, WalkableArea::from_bounds([-1.0, -4.0, 2.0, 3.0]));
    }

    #[test]
    fn test_inside_point_is_unchanged() {
        let area = WalkableArea::from_bounds([-10.0, -10.0, 10.0, 10.0]);
        let target = Coordinate::on_floor(1.5, -2.5);

        assert_eq!(area.restrict(&target, 0.5), Some(RestrictedCoordinate::new(1.5, -2.5)));
    }

    #[test]
    fn test_outside_point_snaps_to_edge() {
        let area = WalkableArea::from_bounds([-6.27, -1.0, 0.0, 1.0]);
        let target = Coordinate::on_floor(-6.77, -0.6);

        let (restricted, distance) = area.nearest(&target);

        assert_eq!(restricted, RestrictedCoordinate::new(-6.27, -0.6));
        assert!((distance - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_out_of_radius_is_none() {
        let area = WalkableArea::from_bounds([0.0, 0.0, 1.0, 1.0]);
        assert_eq!(area.restrict(&Coordinate::on_floor(3.0, 3.0), 0.5), None);
    }
}
