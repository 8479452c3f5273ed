//! Mesh audit: closure, manifoldness and printability of triangle meshes.

use std::collections::HashMap;

use tracing::{info, instrument};

use crate::mesh::Mesh;

/// Result of [`validate_mesh`].
#[derive(Debug, Clone, PartialEq)]
pub struct MeshValidation {
    /// Edges used by exactly one face (holes, or T-junctions left by clipping).
    pub boundary_edges: usize,
    /// Edges shared by more than two faces.
    pub non_manifold_edges: usize,
    /// Faces with (near) zero area or repeated indices.
    pub degenerate_faces: usize,
    /// Faces whose indices point past the vertex list. Always zero for meshes
    /// built by the kernel.
    pub invalid_faces: usize,
    pub signed_volume: f64,
    pub surface_area: f64,
}

impl MeshValidation {
    pub fn is_watertight(&self) -> bool {
        self.boundary_edges == 0 && self.non_manifold_edges == 0 && self.invalid_faces == 0
    }

    /// Watertight, outward facing and enclosing a positive volume.
    pub fn is_printable(&self) -> bool {
        self.is_watertight() && self.signed_volume > 0.0
    }
}

/// Audit a mesh.
///
/// Volume and area only count faces with valid indices.
#[instrument(skip(mesh), fields(faces = mesh.face_count()))]
pub fn validate_mesh(mesh: &Mesh) -> MeshValidation {
    let tol = crate::default_tolerance();
    let vertex_count = mesh.vertex_count();
    let mut edge_uses: HashMap<(u32, u32), u32> = HashMap::new();
    let mut degenerate_faces = 0;
    let mut invalid_faces = 0;
    let mut signed_volume = 0.0;
    let mut surface_area = 0.0;

    for (i, face) in mesh.faces.iter().enumerate() {
        if face.iter().any(|&idx| idx as usize >= vertex_count) {
            invalid_faces += 1;
            continue;
        }
        let [a, b, c] = mesh.triangle(i);
        let area = 0.5 * (b - a).cross(&(c - a)).norm();
        if face[0] == face[1] || face[1] == face[2] || face[0] == face[2] || tol.is_degenerate_area(area) {
            degenerate_faces += 1;
        }
        surface_area += area;
        signed_volume += a.coords.dot(&b.coords.cross(&c.coords)) / 6.0;

        for k in 0..3 {
            let (u, v) = (face[k], face[(k + 1) % 3]);
            let key = if u < v { (u, v) } else { (v, u) };
            *edge_uses.entry(key).or_insert(0) += 1;
        }
    }

    let boundary_edges = edge_uses.values().filter(|&&n| n == 1).count();
    let non_manifold_edges = edge_uses.values().filter(|&&n| n > 2).count();

    info!(
        boundary_edges,
        non_manifold_edges,
        degenerate_faces,
        signed_volume,
        "mesh audit complete"
    );

    MeshValidation {
        boundary_edges,
        non_manifold_edges,
        degenerate_faces,
        invalid_faces,
        signed_volume,
        surface_area,
    }
}
