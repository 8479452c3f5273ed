pub mod bsp;
pub mod engine;

use crate::solid::Solid;
use engine::{BoolOp, BooleanFailure};

/// Trait for Boolean operations on closed solids.
///
/// Provides `union`, `subtract`, and `intersect` operations. Implement this
/// trait to provide alternative Boolean backends or mock implementations.
pub trait BooleanEngine {
    /// Compute the union of two solids.
    fn union(&self, a: &Solid, b: &Solid) -> Result<Solid, BooleanFailure>;

    /// Subtract solid `b` from solid `a`.
    fn subtract(&self, a: &Solid, b: &Solid) -> Result<Solid, BooleanFailure>;

    /// Compute the intersection of two solids.
    fn intersect(&self, a: &Solid, b: &Solid) -> Result<Solid, BooleanFailure>;
}

/// Default Boolean engine backed by BSP-tree clipping.
#[derive(Debug, Clone, Copy, Default)]
pub struct BspBooleanEngine;

impl BooleanEngine for BspBooleanEngine {
    fn union(&self, a: &Solid, b: &Solid) -> Result<Solid, BooleanFailure> {
        engine::boolean_op(a, b, BoolOp::Union)
    }

    fn subtract(&self, a: &Solid, b: &Solid) -> Result<Solid, BooleanFailure> {
        engine::boolean_op(a, b, BoolOp::Difference)
    }

    fn intersect(&self, a: &Solid, b: &Solid) -> Result<Solid, BooleanFailure> {
        engine::boolean_op(a, b, BoolOp::Intersection)
    }
}

#[cfg(test)]
mod trait_tests {
    use super::*;
    use crate::primitives::{make_box, make_sphere};
    use nalgebra::Point3;

    #[test]
    fn test_boolean_engine_trait_union() {
        let engine = BspBooleanEngine;
        let a = make_box(Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 1.0, 1.0));
        let b = make_box(Point3::new(5.0, 5.0, 5.0), Point3::new(6.0, 6.0, 6.0));
        let result = engine.union(&a, &b).unwrap();
        assert_eq!(result.polygon_count(), 12);
    }

    #[test]
    fn test_boolean_engine_trait_subtract() {
        let engine = BspBooleanEngine;
        let a = make_box(Point3::new(-2.0, -2.0, -2.0), Point3::new(2.0, 2.0, 2.0));
        let b = make_sphere(1.0, 16, 8);
        let result = engine.subtract(&a, &b).unwrap();
        let mesh = result.to_mesh();
        let cavity = b.to_mesh().signed_volume();
        assert!((mesh.signed_volume() - (64.0 - cavity)).abs() < 1e-6);
    }

    #[test]
    fn test_boolean_engine_trait_intersect() {
        let engine = BspBooleanEngine;
        let a = make_box(Point3::new(0.0, 0.0, 0.0), Point3::new(2.0, 2.0, 2.0));
        let b = make_box(Point3::new(1.0, 1.0, 1.0), Point3::new(3.0, 3.0, 3.0));
        assert!(engine.intersect(&a, &b).is_ok());
    }
}
