//! Rigid rotations about an arbitrary pivot.

use nalgebra::{Isometry3, Point3, Translation3, Unit, UnitQuaternion, Vector3};

/// A principal axis of the joint frame. Z is the stud (primary) axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub fn unit(self) -> Unit<Vector3<f64>> {
        match self {
            Axis::X => Vector3::x_axis(),
            Axis::Y => Vector3::y_axis(),
            Axis::Z => Vector3::z_axis(),
        }
    }
}

/// Rotation by `angle_rad` about the line through `pivot` along `axis`.
///
/// Equivalent to translate(pivot) * rotate * translate(-pivot).
pub fn rotation_about(pivot: &Point3<f64>, axis: &Unit<Vector3<f64>>, angle_rad: f64) -> Isometry3<f64> {
    let rotation = UnitQuaternion::from_axis_angle(axis, angle_rad);
    let translation = pivot.coords - rotation * pivot.coords;
    Isometry3::from_parts(Translation3::from(translation), rotation)
}

/// [`rotation_about`] for a principal axis, angle in degrees.
pub fn axis_rotation_deg(pivot: &Point3<f64>, axis: Axis, angle_deg: f64) -> Isometry3<f64> {
    rotation_about(pivot, &axis.unit(), angle_deg.to_radians())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_pivot_is_fixed_point() {
        let pivot = Point3::new(1.0, 2.0, 3.0);
        let iso = axis_rotation_deg(&pivot, Axis::Y, 37.0);
        assert_relative_eq!(iso * pivot, pivot, epsilon = 1e-12);
    }

    #[test]
    fn test_quarter_turn_about_offset_pivot() {
        let pivot = Point3::new(1.0, 0.0, 0.0);
        let iso = axis_rotation_deg(&pivot, Axis::Z, 90.0);
        let moved = iso * Point3::new(2.0, 0.0, 0.0);
        assert_relative_eq!(moved, Point3::new(1.0, 1.0, 0.0), epsilon = 1e-12);
    }

    #[test]
    fn test_x_rotation_tilts_stud_axis() {
        let iso = axis_rotation_deg(&Point3::origin(), Axis::X, 90.0);
        let tip = iso * Point3::new(0.0, 0.0, 30.0);
        assert_relative_eq!(tip, Point3::new(0.0, -30.0, 0.0), epsilon = 1e-9);
    }
}
