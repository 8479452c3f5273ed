//! Area-weighted random sampling of mesh surfaces.

use nalgebra::Point3;
use rand::Rng;
use rand::distributions::{Distribution, WeightedIndex};
use tracing::warn;

use crate::mesh::Mesh;

/// Draw `count` points uniformly distributed over the surface of `mesh`.
///
/// A face is picked with probability proportional to its area, then a point
/// inside it with the square-root barycentric mapping. Returns an empty vector
/// when the mesh has no positive-area face or a face index is out of range.
pub fn sample_surface<R: Rng + ?Sized>(mesh: &Mesh, count: usize, rng: &mut R) -> Vec<Point3<f64>> {
    if let Err(err) = mesh.validate_indices() {
        warn!(%err, "mesh not sampled");
        return Vec::new();
    }
    let areas = mesh.triangle_areas();
    let Ok(faces) = WeightedIndex::new(&areas) else {
        return Vec::new();
    };

    (0..count)
        .map(|_| {
            let [a, b, c] = mesh.triangle(faces.sample(rng));
            let s = rng.gen_range(0.0..1.0f64).sqrt();
            let t = rng.gen_range(0.0..1.0f64);
            Point3::from(a.coords * (1.0 - s) + b.coords * (s * (1.0 - t)) + c.coords * (s * t))
        })
        .collect()
}
