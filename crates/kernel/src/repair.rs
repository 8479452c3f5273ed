//! Closing T-junctions left behind by polygon clipping.
//!
//! When the BSP clipper cuts a polygon, the new corner lands on an edge that
//! the untouched neighbour still spans in one piece. After welding, such an
//! edge shows up as two boundary edges on one side and one on the other. The
//! fix inserts the stray vertex into the neighbour's outline.

use std::collections::{BTreeSet, HashMap};

use nalgebra::Point3;
use tracing::debug;

use crate::mesh::Mesh;
use crate::Tolerance;

const MAX_PASSES: usize = 4;

fn edge_key(u: u32, v: u32) -> (u32, u32) {
    if u < v { (u, v) } else { (v, u) }
}

fn boundary_edges(faces: &[[u32; 3]]) -> HashMap<(u32, u32), u32> {
    let mut uses: HashMap<(u32, u32), u32> = HashMap::new();
    for f in faces {
        for k in 0..3 {
            *uses.entry(edge_key(f[k], f[(k + 1) % 3])).or_insert(0) += 1;
        }
    }
    uses.retain(|_, n| *n == 1);
    uses
}

/// Vertices from `candidates` lying strictly inside segment `u`→`v`, ordered
/// from `u` to `v`.
fn vertices_on_segment(
    vertices: &[Point3<f64>],
    u: u32,
    v: u32,
    candidates: &BTreeSet<u32>,
    tol: &Tolerance,
) -> Vec<u32> {
    let (a, b) = (vertices[u as usize], vertices[v as usize]);
    let dir = b - a;
    let len_sq = dir.norm_squared();
    if len_sq <= tol.weld * tol.weld {
        return Vec::new();
    }
    let mut hits: Vec<(f64, u32)> = candidates
        .iter()
        .filter(|&&w| w != u && w != v)
        .filter_map(|&w| {
            let p = vertices[w as usize];
            let t = (p - a).dot(&dir) / len_sq;
            if t <= 0.0 || t >= 1.0 {
                return None;
            }
            let off = (a + dir * t - p).norm();
            (off < tol.plane).then_some((t, w))
        })
        .collect();
    hits.sort_by(|x, y| x.0.total_cmp(&y.0));
    hits.into_iter().map(|(_, w)| w).collect()
}

/// Split faces whose boundary edges carry another boundary vertex. Returns the
/// number of faces rewritten.
pub fn repair_t_junctions(mesh: &mut Mesh, tol: &Tolerance) -> usize {
    let mut repaired = 0;
    for _ in 0..MAX_PASSES {
        let boundary = boundary_edges(&mesh.faces);
        if boundary.is_empty() {
            break;
        }
        let candidates: BTreeSet<u32> = boundary.keys().flat_map(|&(u, v)| [u, v]).collect();

        let faces = std::mem::take(&mut mesh.faces);
        let mut rewritten = 0;
        for face in faces {
            let mut ring = Vec::with_capacity(6);
            for k in 0..3 {
                let (u, v) = (face[k], face[(k + 1) % 3]);
                ring.push(u);
                if boundary.contains_key(&edge_key(u, v)) {
                    ring.extend(vertices_on_segment(&mesh.vertices, u, v, &candidates, tol));
                }
            }
            if ring.len() == 3 {
                mesh.faces.push(face);
                continue;
            }

            // Fan from the centroid: every outline point may sit on a
            // straight run, so no corner is a safe fan origin.
            let [a, b, c] = face.map(|i| mesh.vertices[i as usize].coords);
            mesh.vertices.push(Point3::from((a + b + c) / 3.0));
            let centre = (mesh.vertices.len() - 1) as u32;
            for i in 0..ring.len() {
                mesh.faces.push([centre, ring[i], ring[(i + 1) % ring.len()]]);
            }
            rewritten += 1;
        }

        debug!(rewritten, boundary = boundary.len(), "t-junction pass");
        repaired += rewritten;
        if rewritten == 0 {
            break;
        }
    }
    repaired
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::validate_mesh;

    /// Unit square split as one big triangle on the left and two small ones on
    /// the right that share a midpoint on the diagonal.
    fn t_junction_patch() -> Mesh {
        Mesh::from_parts(
            vec![
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(1.0, 0.0, 0.0),
                Point3::new(1.0, 1.0, 0.0),
                Point3::new(0.0, 1.0, 0.0),
                Point3::new(0.5, 0.5, 0.0),
            ],
            vec![[0, 2, 3], [0, 1, 4], [4, 1, 2]],
        )
        .unwrap()
    }

    #[test]
    fn test_midpoint_is_inserted_into_neighbour() {
        let mut mesh = t_junction_patch();
        let before = validate_mesh(&mesh).boundary_edges;
        let fixed = repair_t_junctions(&mut mesh, &Tolerance::default());
        assert_eq!(fixed, 1);
        let after = validate_mesh(&mesh);
        // only the square's own outline remains open
        assert_eq!(after.boundary_edges, 4);
        assert!(before > after.boundary_edges);
        assert!((after.surface_area - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_closed_mesh_is_untouched() {
        let mut mesh = crate::primitives::make_box(Point3::origin(), Point3::new(1.0, 1.0, 1.0)).to_mesh();
        let faces = mesh.faces.clone();
        assert_eq!(repair_t_junctions(&mut mesh, &Tolerance::default()), 0);
        assert_eq!(mesh.faces, faces);
    }
}
