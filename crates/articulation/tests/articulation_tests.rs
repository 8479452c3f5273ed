use std::f64::consts::{FRAC_PI_4, PI};
use std::sync::Arc;

use approx::assert_relative_eq;
use csg_kernel::primitives::{make_box, make_sphere};
use csg_kernel::transform::{axis_rotation_deg, Axis};
use csg_kernel::Mesh;
use joint_articulation::{
    AnimationSchedule, AnimationSettings, ArticulationError, ArticulationModel, AxisOutcome, Phase,
};
use joint_types::{JointLimits, LimitPolicy};
use nalgebra::{Matrix4, Point3};
use proptest::prelude::*;

fn ball() -> Arc<Mesh> {
    Arc::new(make_box(Point3::new(-1.0, -1.0, -1.0), Point3::new(1.0, 1.0, 3.0)).to_mesh())
}

fn model(policy: LimitPolicy) -> ArticulationModel {
    ArticulationModel::new(ball(), JointLimits::new(FRAC_PI_4, PI), policy, AnimationSchedule::default())
        .unwrap()
}

#[test]
fn over_limit_swing_returns_to_original_ball() {
    let mut m = model(LimitPolicy::Skip);
    m.set_swing(20.0, 20.0);
    let outcome = m.set_swing(50.0, 0.0);
    assert!(matches!(outcome.x, AxisOutcome::Skipped { .. }));
    assert_relative_eq!(m.state().homogeneous(), Matrix4::identity(), epsilon = 1e-12);
    assert_eq!(m.posed_mesh(), **m.original());
}

#[test]
fn two_twists_make_twenty_degrees() {
    let mut m = model(LimitPolicy::Skip);
    m.apply_twist(10.0);
    m.apply_twist(10.0);
    let expected = axis_rotation_deg(&Point3::origin(), Axis::Z, 20.0).to_homogeneous();
    assert_relative_eq!(m.state().homogeneous(), expected, epsilon = 1e-12);
    assert_eq!(m.state().phase(), Phase::Twisted);
}

#[test]
fn twist_stacks_on_swing() {
    let mut m = model(LimitPolicy::Skip);
    m.set_swing(30.0, 0.0);
    m.apply_twist(90.0);
    let expected = axis_rotation_deg(&Point3::origin(), Axis::Z, 90.0)
        * axis_rotation_deg(&Point3::origin(), Axis::X, 30.0);
    assert_relative_eq!(m.state().homogeneous(), expected.to_homogeneous(), epsilon = 1e-12);
}

#[test]
fn offset_pivot_stays_fixed() {
    let pivot = Point3::new(0.0, 0.0, 2.0);
    let mut m = ArticulationModel::with_pivot(
        ball(),
        pivot,
        JointLimits::new(FRAC_PI_4, PI),
        LimitPolicy::Skip,
        AnimationSchedule::default(),
    )
    .unwrap();
    assert_eq!(m.state().pivot(), pivot);

    m.set_swing(30.0, 0.0);
    let expected = axis_rotation_deg(&pivot, Axis::X, 30.0);
    assert_relative_eq!(m.state().homogeneous(), expected.to_homogeneous(), epsilon = 1e-12);
    assert_relative_eq!(m.state().pose() * pivot, pivot, epsilon = 1e-12);

    let posed = m.posed_mesh();
    for (p, q) in m.original().vertices.iter().zip(&posed.vertices) {
        assert_relative_eq!((p - pivot).norm(), (q - pivot).norm(), epsilon = 1e-9);
    }
    // rotating about an off-origin pivot moves the origin
    assert!((m.state().pose() * Point3::origin() - Point3::origin()).norm() > 0.5);
}

#[test]
fn posed_mesh_leaves_original_alone() {
    let mut m = model(LimitPolicy::Skip);
    let before = (**m.original()).clone();
    m.set_swing(40.0, -40.0);
    let posed = m.posed_mesh();
    assert_eq!(**m.original(), before);
    assert_ne!(posed, before);
    assert_relative_eq!(posed.signed_volume(), before.signed_volume(), max_relative = 1e-9);
}

#[test]
fn tick_swings_by_angle_and_half() {
    let schedule = AnimationSchedule::from_angles(vec![-30.0, 0.0, 30.0]).unwrap();
    let mut m =
        ArticulationModel::new(ball(), JointLimits::default(), LimitPolicy::Skip, schedule).unwrap();

    let frame = m.animation_tick();
    assert_eq!(frame.frame_index, 0);
    assert_eq!(frame.angle_deg, -30.0);
    assert_eq!(frame.swing.x, AxisOutcome::Applied(-30.0));
    assert_eq!(frame.swing.y, AxisOutcome::Applied(-15.0));
    let expected = axis_rotation_deg(&Point3::origin(), Axis::Y, -15.0)
        * axis_rotation_deg(&Point3::origin(), Axis::X, -30.0);
    assert_relative_eq!(frame.state.homogeneous(), expected.to_homogeneous(), epsilon = 1e-12);
    assert_eq!(frame.mesh, m.posed_mesh());

    m.animation_tick();
    m.animation_tick();
    // wraps to the first frame
    assert_eq!(m.animation_tick().frame_index, 0);
}

#[test]
fn clamp_policy_reaches_limit_during_animation() {
    let schedule = AnimationSchedule::from_angles(vec![60.0]).unwrap();
    let limits = JointLimits::from_degrees(45.0, 180.0);
    let mut m = ArticulationModel::new(ball(), limits, LimitPolicy::Clamp, schedule).unwrap();
    let frame = m.animation_tick();
    assert!(matches!(frame.swing.x, AxisOutcome::Clamped { .. }));
    assert_eq!(frame.swing.y, AxisOutcome::Applied(30.0));
}

#[test]
fn reset_restores_rest_and_first_frame() {
    let mut m = model(LimitPolicy::Skip);
    m.animation_tick();
    m.apply_twist(15.0);
    m.reset();
    assert_eq!(m.state().phase(), Phase::Rest);
    assert_eq!(m.schedule().cursor(), 0);
}

#[test]
fn invalid_limits_are_rejected() {
    let err = ArticulationModel::new(
        ball(),
        JointLimits::new(-1.0, 1.0),
        LimitPolicy::Skip,
        AnimationSchedule::default(),
    )
    .unwrap_err();
    assert!(matches!(err, ArticulationError::InvalidLimit { .. }));
}

#[test]
fn settings_build_schedule() {
    let settings: AnimationSettings = serde_json::from_str(r#"{"frames": 5}"#).unwrap();
    let schedule = settings.to_schedule().unwrap();
    assert_eq!(schedule.angles(), &[-30.0, -15.0, 0.0, 15.0, 30.0]);
}

#[test]
fn animated_ball_stays_on_its_sphere() {
    let sphere = Arc::new(make_sphere(10.0, 16, 8).to_mesh());
    let mut m = ArticulationModel::new(
        sphere,
        JointLimits::default(),
        LimitPolicy::Skip,
        AnimationSchedule::default(),
    )
    .unwrap();
    for _ in 0..10 {
        let frame = m.animation_tick();
        for v in &frame.mesh.vertices {
            assert_relative_eq!(v.coords.norm(), 10.0, max_relative = 1e-9);
        }
    }
}

proptest! {
    #[test]
    fn swing_is_idempotent(x in -90.0f64..90.0, y in -90.0f64..90.0) {
        let mut m = model(LimitPolicy::Skip);
        m.set_swing(x, y);
        let first = m.state().homogeneous();
        m.apply_twist(5.0);
        m.set_swing(x, y);
        prop_assert!((m.state().homogeneous() - first).norm() < 1e-12);
    }

    #[test]
    fn clamped_swing_never_exceeds_cone(x in -180.0f64..180.0) {
        let mut m = model(LimitPolicy::Clamp);
        m.set_swing(x, 0.0);
        prop_assert!(m.state().rotation_angle_deg() <= 45.0 + 1e-9);
    }
}
