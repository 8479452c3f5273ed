use csg_kernel::transform::{axis_rotation_deg, Axis};
use joint_types::{JointLimits, LimitPolicy};
use nalgebra::{Isometry3, Matrix4, Point3};
use tracing::warn;

/// Where a [`RotationState`] sits in the swing/twist sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Rest,
    Swung,
    Twisted,
}

/// What happened to one requested axis rotation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AxisOutcome {
    /// Within the limit, rotated by the requested angle (degrees).
    Applied(f64),
    /// Over the limit under [`LimitPolicy::Clamp`]; rotated by the limit.
    Clamped { requested: f64, applied: f64 },
    /// Over the limit (or not finite) under [`LimitPolicy::Skip`]; the axis
    /// contributed nothing.
    Skipped { requested: f64 },
}

impl AxisOutcome {
    /// Angle actually rotated, in degrees.
    pub fn applied_deg(&self) -> Option<f64> {
        match *self {
            AxisOutcome::Applied(angle) => Some(angle),
            AxisOutcome::Clamped { applied, .. } => Some(applied),
            AxisOutcome::Skipped { .. } => None,
        }
    }

    pub fn is_applied(&self) -> bool {
        matches!(self, AxisOutcome::Applied(_))
    }
}

/// Per-axis result of a swing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SwingOutcome {
    pub x: AxisOutcome,
    pub y: AxisOutcome,
}

fn resolve(axis: Axis, requested: f64, limit_deg: f64, policy: LimitPolicy) -> AxisOutcome {
    if requested.abs() <= limit_deg {
        return AxisOutcome::Applied(requested);
    }
    if !requested.is_finite() {
        warn!(?axis, requested, "non-finite angle ignored");
        return AxisOutcome::Skipped { requested };
    }
    match policy {
        LimitPolicy::Skip => {
            warn!(?axis, requested, limit_deg, "angle exceeds limit, axis skipped");
            AxisOutcome::Skipped { requested }
        }
        LimitPolicy::Clamp => {
            let applied = limit_deg.copysign(requested);
            warn!(?axis, requested, applied, "angle exceeds limit, clamped");
            AxisOutcome::Clamped { requested, applied }
        }
    }
}

/// Immutable pose of the ball about its pivot.
///
/// Every operation returns a new state; the receiver is left untouched.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotationState {
    pivot: Point3<f64>,
    limits: JointLimits,
    pose: Isometry3<f64>,
    phase: Phase,
}

impl RotationState {
    /// Identity pose.
    pub fn rest(pivot: Point3<f64>, limits: JointLimits) -> Self {
        Self {
            pivot,
            limits,
            pose: Isometry3::identity(),
            phase: Phase::Rest,
        }
    }

    pub fn pivot(&self) -> Point3<f64> {
        self.pivot
    }

    pub fn limits(&self) -> &JointLimits {
        &self.limits
    }

    pub fn pose(&self) -> &Isometry3<f64> {
        &self.pose
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// The pose as a 4x4 homogeneous matrix.
    pub fn homogeneous(&self) -> Matrix4<f64> {
        self.pose.to_homogeneous()
    }

    /// Total rotation angle of the pose, in degrees.
    pub fn rotation_angle_deg(&self) -> f64 {
        self.pose.rotation.angle().to_degrees()
    }

    /// Absolute swing: start again from rest, rotate about X, then about Y.
    /// Each axis is checked against the swing limit on its own.
    pub fn set_swing(&self, x_deg: f64, y_deg: f64, policy: LimitPolicy) -> (Self, SwingOutcome) {
        let limit = self.limits.swing_limit_deg();
        let outcome = SwingOutcome {
            x: resolve(Axis::X, x_deg, limit, policy),
            y: resolve(Axis::Y, y_deg, limit, policy),
        };

        let mut pose = Isometry3::identity();
        if let Some(angle) = outcome.x.applied_deg() {
            pose = axis_rotation_deg(&self.pivot, Axis::X, angle) * pose;
        }
        if let Some(angle) = outcome.y.applied_deg() {
            pose = axis_rotation_deg(&self.pivot, Axis::Y, angle) * pose;
        }

        let next = Self {
            pose,
            phase: Phase::Swung,
            ..*self
        };
        (next, outcome)
    }

    /// Relative twist about Z on top of the current pose.
    pub fn apply_twist(&self, z_deg: f64, policy: LimitPolicy) -> (Self, AxisOutcome) {
        let outcome = resolve(Axis::Z, z_deg, self.limits.twist_limit_deg(), policy);
        let Some(angle) = outcome.applied_deg() else {
            return (*self, outcome);
        };
        let next = Self {
            pose: axis_rotation_deg(&self.pivot, Axis::Z, angle) * self.pose,
            phase: Phase::Twisted,
            ..*self
        };
        (next, outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::{FRAC_PI_4, PI};

    fn limits() -> JointLimits {
        JointLimits::new(FRAC_PI_4, PI)
    }

    #[test]
    fn over_limit_swing_leaves_identity() {
        let rest = RotationState::rest(Point3::origin(), limits());
        let (swung, outcome) = rest.set_swing(50.0, 0.0, LimitPolicy::Skip);
        assert_eq!(outcome.x, AxisOutcome::Skipped { requested: 50.0 });
        assert_eq!(outcome.y, AxisOutcome::Applied(0.0));
        assert_relative_eq!(swung.homogeneous(), Matrix4::identity(), epsilon = 1e-12);
        assert_eq!(swung.phase(), Phase::Swung);
    }

    #[test]
    fn swing_resets_previous_pose() {
        let rest = RotationState::rest(Point3::origin(), limits());
        let (first, _) = rest.set_swing(30.0, 10.0, LimitPolicy::Skip);
        let (second, _) = first.set_swing(30.0, 10.0, LimitPolicy::Skip);
        assert_relative_eq!(first.homogeneous(), second.homogeneous(), epsilon = 1e-12);

        // over the limit on X: previous X rotation must not survive
        let (third, _) = first.set_swing(80.0, 0.0, LimitPolicy::Skip);
        assert_relative_eq!(third.homogeneous(), Matrix4::identity(), epsilon = 1e-12);
    }

    #[test]
    fn axes_are_checked_independently() {
        let rest = RotationState::rest(Point3::origin(), limits());
        let (swung, outcome) = rest.set_swing(60.0, 20.0, LimitPolicy::Skip);
        assert!(!outcome.x.is_applied());
        assert!(outcome.y.is_applied());
        assert_relative_eq!(swung.rotation_angle_deg(), 20.0, epsilon = 1e-9);
    }

    #[test]
    fn clamp_policy_rotates_by_limit() {
        let rest = RotationState::rest(Point3::origin(), limits());
        let (swung, outcome) = rest.set_swing(-50.0, 0.0, LimitPolicy::Clamp);
        let AxisOutcome::Clamped { requested, applied } = outcome.x else {
            panic!("expected clamp, got {:?}", outcome.x);
        };
        assert_eq!(requested, -50.0);
        assert_relative_eq!(applied, -45.0, epsilon = 1e-9);
        assert_relative_eq!(swung.rotation_angle_deg(), 45.0, epsilon = 1e-9);
    }

    #[test]
    fn twist_accumulates() {
        let rest = RotationState::rest(Point3::origin(), limits());
        let (once, _) = rest.apply_twist(10.0, LimitPolicy::Skip);
        let (twice, _) = once.apply_twist(10.0, LimitPolicy::Skip);
        let expected = axis_rotation_deg(&Point3::origin(), Axis::Z, 20.0);
        assert_relative_eq!(twice.homogeneous(), expected.to_homogeneous(), epsilon = 1e-12);
        assert_eq!(twice.phase(), Phase::Twisted);
        // the earlier states are unchanged
        assert_eq!(rest.phase(), Phase::Rest);
        assert_relative_eq!(once.rotation_angle_deg(), 10.0, epsilon = 1e-9);
    }

    #[test]
    fn skipped_twist_keeps_state() {
        let rest = RotationState::rest(Point3::origin(), JointLimits::from_degrees(45.0, 30.0));
        let (after, outcome) = rest.apply_twist(31.0, LimitPolicy::Skip);
        assert_eq!(after, rest);
        assert_eq!(outcome.applied_deg(), None);
    }

    #[test]
    fn nan_is_never_applied() {
        let rest = RotationState::rest(Point3::origin(), limits());
        let (swung, outcome) = rest.set_swing(f64::NAN, 0.0, LimitPolicy::Clamp);
        assert!(matches!(outcome.x, AxisOutcome::Skipped { .. }));
        assert_relative_eq!(swung.homogeneous(), Matrix4::identity(), epsilon = 1e-12);
    }

    #[test]
    fn pivot_is_a_fixed_point() {
        let pivot = Point3::new(1.0, -2.0, 3.0);
        let rest = RotationState::rest(pivot, limits());
        let (swung, _) = rest.set_swing(20.0, -15.0, LimitPolicy::Skip);
        let (twisted, _) = swung.apply_twist(90.0, LimitPolicy::Skip);
        assert_relative_eq!(twisted.pose() * pivot, pivot, epsilon = 1e-12);
    }
}
