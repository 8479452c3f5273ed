//! Property-based tests for CSG kernel invariants using the `proptest` crate.

use proptest::prelude::*;

use csg_kernel::boolean::engine::{boolean_op, BoolOp};
use csg_kernel::primitives::{make_box, make_sphere};
use csg_kernel::sampling::sample_surface;
use csg_kernel::transform::{axis_rotation_deg, Axis};
use csg_kernel::Solid;
use nalgebra::Point3;
use rand::rngs::StdRng;
use rand::SeedableRng;

// ---------------------------------------------------------------------------
// Strategy helpers
// ---------------------------------------------------------------------------

/// Arbitrary 3D coordinate tuple in a reasonable floating-point range.
fn arb_point() -> impl Strategy<Value = (f64, f64, f64)> {
    (-100.0f64..100.0, -100.0f64..100.0, -100.0f64..100.0)
}

/// Arbitrary box given as a corner and positive extents.
fn arb_box() -> impl Strategy<Value = ((f64, f64, f64), (f64, f64, f64))> {
    (
        (-5.0f64..5.0, -5.0f64..5.0, -5.0f64..5.0),
        (0.5f64..6.0, 0.5f64..6.0, 0.5f64..6.0),
    )
}

fn arb_angle_deg() -> impl Strategy<Value = f64> {
    -180.0f64..180.0
}

fn to_box(((x, y, z), (dx, dy, dz)): ((f64, f64, f64), (f64, f64, f64))) -> Solid {
    make_box(Point3::new(x, y, z), Point3::new(x + dx, y + dy, z + dz))
}

/// Volume of a boolean result, with an empty result counting as zero.
fn op_volume(a: &Solid, b: &Solid, op: BoolOp) -> f64 {
    boolean_op(a, b, op)
        .map(|s| s.to_mesh().signed_volume())
        .unwrap_or(0.0)
}

const TOL: f64 = 1e-6;

// ---------------------------------------------------------------------------
// 1. Pivot rotation is rigid: distance to the pivot is preserved
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn pivot_rotation_preserves_radius(
        (px, py, pz) in arb_point(),
        (qx, qy, qz) in arb_point(),
        angle in arb_angle_deg(),
    ) {
        let pivot = Point3::new(px, py, pz);
        let q = Point3::new(qx, qy, qz);
        for axis in [Axis::X, Axis::Y, Axis::Z] {
            let moved = axis_rotation_deg(&pivot, axis, angle) * q;
            let before = (q - pivot).norm();
            let after = (moved - pivot).norm();
            prop_assert!((before - after).abs() < TOL * before.max(1.0),
                "radius changed: {} -> {}", before, after);
        }
    }
}

// ---------------------------------------------------------------------------
// 2. Rotations about the same axis compose additively
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn same_axis_rotations_add(
        (px, py, pz) in arb_point(),
        a in arb_angle_deg(),
        b in arb_angle_deg(),
    ) {
        let pivot = Point3::new(px, py, pz);
        let q = Point3::new(1.0, 2.0, 3.0);
        let two_steps = axis_rotation_deg(&pivot, Axis::Z, b) * (axis_rotation_deg(&pivot, Axis::Z, a) * q);
        let one_step = axis_rotation_deg(&pivot, Axis::Z, a + b) * q;
        prop_assert!((two_steps - one_step).norm() < TOL * 100.0);
    }
}

// ---------------------------------------------------------------------------
// 3. Inclusion-exclusion on boxes: vol(A) = vol(A - B) + vol(A ∩ B)
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]
    #[test]
    fn difference_and_intersection_partition_volume(
        a in arb_box(),
        b in arb_box(),
    ) {
        let (sa, sb) = (to_box(a), to_box(b));
        let vol_a = sa.to_mesh().signed_volume();
        let diff = op_volume(&sa, &sb, BoolOp::Difference);
        let inter = op_volume(&sa, &sb, BoolOp::Intersection);
        prop_assert!((vol_a - diff - inter).abs() < 1e-6 * vol_a.max(1.0),
            "vol(A)={} diff={} inter={}", vol_a, diff, inter);
    }
}

// ---------------------------------------------------------------------------
// 4. Union volume identity: vol(A ∪ B) = vol(A) + vol(B) - vol(A ∩ B)
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]
    #[test]
    fn union_volume_identity(
        a in arb_box(),
        b in arb_box(),
    ) {
        let (sa, sb) = (to_box(a), to_box(b));
        let vol_a = sa.to_mesh().signed_volume();
        let vol_b = sb.to_mesh().signed_volume();
        let union = op_volume(&sa, &sb, BoolOp::Union);
        let inter = op_volume(&sa, &sb, BoolOp::Intersection);
        let expected = vol_a + vol_b - inter;
        prop_assert!((union - expected).abs() < 1e-6 * expected.max(1.0),
            "union={} expected={}", union, expected);
    }
}

// ---------------------------------------------------------------------------
// 5. Surface samples stay inside the mesh bounding box
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]
    #[test]
    fn samples_inside_bounding_box(
        radius in 0.5f64..50.0,
        seed in any::<u64>(),
    ) {
        let mesh = make_sphere(radius, 16, 8).to_mesh();
        let bb = mesh.bounding_box().expanded(1e-9 * radius);
        let mut rng = StdRng::seed_from_u64(seed);
        for p in sample_surface(&mesh, 64, &mut rng) {
            prop_assert!(bb.contains_point(&p), "{:?} outside {:?}", p, bb);
        }
    }
}
