pub mod boolean;
pub mod bounds;
pub mod mesh;
pub mod primitives;
pub mod repair;
pub mod sampling;
pub mod solid;
pub mod transform;
pub mod validation;

// Re-export key types at crate root for convenience.
pub use boolean::{BooleanEngine, BspBooleanEngine};
pub use bounds::BoundingBox;
pub use mesh::{Mesh, MeshError};
pub use solid::{Plane, Polygon, Solid};
pub use transform::Axis;

/// Global tolerance configuration for geometric comparisons (millimetres).
#[derive(Debug, Clone, Copy)]
pub struct Tolerance {
    /// Points closer than this to a splitting plane are treated as on it.
    pub plane: f64,
    /// Grid spacing used to weld polygon corners into shared mesh vertices.
    pub weld: f64,
    /// Triangles or polygons with less area than this are degenerate.
    pub degenerate_area: f64,
}

impl Default for Tolerance {
    fn default() -> Self {
        Self {
            plane: 1e-5,
            weld: 1e-6,
            degenerate_area: 1e-12,
        }
    }
}

impl Tolerance {
    pub fn is_degenerate_area(&self, area: f64) -> bool {
        area.abs() < self.degenerate_area
    }
}

pub fn default_tolerance() -> Tolerance {
    Tolerance::default()
}
