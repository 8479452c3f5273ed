use thiserror::Error;
use tracing::{debug, instrument};

use crate::solid::Solid;

use super::bsp::BspTree;

/// Boolean operation type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoolOp {
    Union,
    Intersection,
    Difference,
}

/// Structured failure information for Boolean operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BooleanFailure {
    #[error("left operand of {op:?} has no polygons")]
    EmptyOperand { op: BoolOp },

    #[error("{op:?} produced an empty solid")]
    DegenerateResult { op: BoolOp },
}

/// Perform a Boolean operation between two closed solids.
///
/// Strategy:
/// 1. Bounding boxes that do not touch short-circuit (union concatenates,
///    difference returns A, intersection is empty).
/// 2. Otherwise each solid is turned into a BSP tree and clipped against the
///    other; the surviving polygons form the result.
///
/// Inputs must be closed. Open inputs give an unspecified (usually leaky)
/// result rather than an error.
#[instrument(skip_all, fields(op = ?op, a = solid_a.polygon_count(), b = solid_b.polygon_count()))]
pub fn boolean_op(solid_a: &Solid, solid_b: &Solid, op: BoolOp) -> Result<Solid, BooleanFailure> {
    if solid_a.is_empty() {
        return Err(BooleanFailure::EmptyOperand { op });
    }
    if solid_b.is_empty() || !solid_a.bounding_box().intersects(&solid_b.bounding_box()) {
        debug!("operands are disjoint");
        return match op {
            BoolOp::Union => Ok(solid_a.combined(solid_b)),
            BoolOp::Difference => Ok(solid_a.clone()),
            BoolOp::Intersection => Err(BooleanFailure::DegenerateResult { op }),
        };
    }

    let mut a = BspTree::new(solid_a.polygons().to_vec());
    let mut b = BspTree::new(solid_b.polygons().to_vec());

    match op {
        BoolOp::Union => {
            a.clip_to(&b);
            b.clip_to(&a);
            b.invert();
            b.clip_to(&a);
            b.invert();
            a.build(b.all_polygons());
        }
        BoolOp::Difference => {
            a.invert();
            a.clip_to(&b);
            b.clip_to(&a);
            b.invert();
            b.clip_to(&a);
            b.invert();
            a.build(b.all_polygons());
            a.invert();
        }
        BoolOp::Intersection => {
            a.invert();
            b.clip_to(&a);
            b.invert();
            a.clip_to(&b);
            b.clip_to(&a);
            a.build(b.all_polygons());
            a.invert();
        }
    }

    let result = Solid::new(a.all_polygons());
    debug!(
        polygons = result.polygon_count(),
        nodes = a.node_count(),
        "boolean complete"
    );
    if result.is_empty() {
        return Err(BooleanFailure::DegenerateResult { op });
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitives::make_box;
    use nalgebra::Point3;

    fn cube(min: f64, max: f64) -> Solid {
        make_box(Point3::new(min, min, min), Point3::new(max, max, max))
    }

    fn volume(solid: &Solid) -> f64 {
        solid.to_mesh().signed_volume()
    }

    #[test]
    fn test_union_of_overlapping_cubes() {
        let result = boolean_op(&cube(0.0, 2.0), &cube(1.0, 3.0), BoolOp::Union).unwrap();
        assert!((volume(&result) - 15.0).abs() < 1e-9);
    }

    #[test]
    fn test_difference_of_overlapping_cubes() {
        let result = boolean_op(&cube(0.0, 2.0), &cube(1.0, 3.0), BoolOp::Difference).unwrap();
        assert!((volume(&result) - 7.0).abs() < 1e-9);
    }

    #[test]
    fn test_intersection_of_overlapping_cubes() {
        let result = boolean_op(&cube(0.0, 2.0), &cube(1.0, 3.0), BoolOp::Intersection).unwrap();
        assert!((volume(&result) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_disjoint_difference_returns_left() {
        let a = cube(0.0, 1.0);
        let result = boolean_op(&a, &cube(5.0, 6.0), BoolOp::Difference).unwrap();
        assert_eq!(result, a);
    }

    #[test]
    fn test_disjoint_intersection_fails() {
        let err = boolean_op(&cube(0.0, 1.0), &cube(5.0, 6.0), BoolOp::Intersection).unwrap_err();
        assert_eq!(err, BooleanFailure::DegenerateResult { op: BoolOp::Intersection });
    }

    #[test]
    fn test_subtracting_superset_is_degenerate() {
        let err = boolean_op(&cube(1.0, 2.0), &cube(0.0, 3.0), BoolOp::Difference).unwrap_err();
        assert_eq!(err, BooleanFailure::DegenerateResult { op: BoolOp::Difference });
    }

    #[test]
    fn test_empty_left_operand() {
        let err = boolean_op(&Solid::default(), &cube(0.0, 1.0), BoolOp::Union).unwrap_err();
        assert_eq!(err, BooleanFailure::EmptyOperand { op: BoolOp::Union });
    }
}
