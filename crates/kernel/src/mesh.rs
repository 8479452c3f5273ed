//! Indexed triangle mesh.

use nalgebra::{Isometry3, Point3};

use crate::bounds::BoundingBox;

/// An indexed triangle mesh.
///
/// Faces reference `vertices` by index and use counter-clockwise winding when
/// viewed from outside, so normals point outward by the right-hand rule.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    pub vertices: Vec<Point3<f64>>,
    pub faces: Vec<[u32; 3]>,
}

/// Errors from mesh construction.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MeshError {
    #[error("face {face} references vertex {index} but the mesh has {vertex_count} vertices")]
    IndexOutOfRange {
        face: usize,
        index: u32,
        vertex_count: usize,
    },
}

impl Mesh {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a mesh, rejecting faces that point past the vertex list.
    pub fn from_parts(vertices: Vec<Point3<f64>>, faces: Vec<[u32; 3]>) -> Result<Self, MeshError> {
        let mesh = Self { vertices, faces };
        mesh.validate_indices()?;
        Ok(mesh)
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    pub fn validate_indices(&self) -> Result<(), MeshError> {
        let vertex_count = self.vertices.len();
        for (face, tri) in self.faces.iter().enumerate() {
            if let Some(&index) = tri.iter().find(|&&i| i as usize >= vertex_count) {
                return Err(MeshError::IndexOutOfRange {
                    face,
                    index,
                    vertex_count,
                });
            }
        }
        Ok(())
    }

    /// Corner positions of face `face`.
    ///
    /// Panics if the face index or any of its vertex indices is out of range;
    /// meshes built through [`Mesh::from_parts`] or the kernel never are.
    pub fn triangle(&self, face: usize) -> [Point3<f64>; 3] {
        let [a, b, c] = self.faces[face];
        [
            self.vertices[a as usize],
            self.vertices[b as usize],
            self.vertices[c as usize],
        ]
    }

    pub fn triangles(&self) -> impl Iterator<Item = [Point3<f64>; 3]> + '_ {
        (0..self.faces.len()).map(move |i| self.triangle(i))
    }

    /// Area of every face, in face order.
    pub fn triangle_areas(&self) -> Vec<f64> {
        self.triangles()
            .map(|[a, b, c]| 0.5 * (b - a).cross(&(c - a)).norm())
            .collect()
    }

    pub fn surface_area(&self) -> f64 {
        self.triangle_areas().iter().sum()
    }

    /// Volume enclosed by a closed, outward-wound mesh (divergence theorem).
    pub fn signed_volume(&self) -> f64 {
        self.triangles()
            .map(|[a, b, c]| a.coords.dot(&b.coords.cross(&c.coords)) / 6.0)
            .sum()
    }

    pub fn bounding_box(&self) -> BoundingBox {
        BoundingBox::from_points(&self.vertices)
    }

    /// A copy of this mesh with every vertex moved by `pose`. Topology is shared
    /// unchanged.
    pub fn transformed(&self, pose: &Isometry3<f64>) -> Mesh {
        Mesh {
            vertices: self.vertices.iter().map(|v| pose * v).collect(),
            faces: self.faces.clone(),
        }
    }

    /// Append another mesh, offsetting its indices.
    pub fn merge(&mut self, other: &Mesh) {
        let offset = self.vertices.len() as u32;
        self.vertices.extend_from_slice(&other.vertices);
        self.faces
            .extend(other.faces.iter().map(|f| [f[0] + offset, f[1] + offset, f[2] + offset]));
    }

    /// Vertex positions as plain arrays, the layout viewers and exporters take.
    pub fn vertex_buffer(&self) -> Vec<[f64; 3]> {
        self.vertices.iter().map(|v| [v.x, v.y, v.z]).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::{Translation3, UnitQuaternion, Vector3};

    fn unit_tetra() -> Mesh {
        Mesh::from_parts(
            vec![
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(1.0, 0.0, 0.0),
                Point3::new(0.0, 1.0, 0.0),
                Point3::new(0.0, 0.0, 1.0),
            ],
            vec![[0, 2, 1], [0, 1, 3], [0, 3, 2], [1, 2, 3]],
        )
        .unwrap()
    }

    #[test]
    fn test_rejects_out_of_range_index() {
        let err = Mesh::from_parts(vec![Point3::origin()], vec![[0, 0, 4]]).unwrap_err();
        assert_eq!(
            err,
            MeshError::IndexOutOfRange {
                face: 0,
                index: 4,
                vertex_count: 1
            }
        );
    }

    #[test]
    fn test_tetra_volume_and_area() {
        let mesh = unit_tetra();
        assert!((mesh.signed_volume() - 1.0 / 6.0).abs() < 1e-12);
        let expected_area = 1.5 + 3.0_f64.sqrt() / 2.0;
        assert!((mesh.surface_area() - expected_area).abs() < 1e-12);
    }

    #[test]
    fn test_transformed_leaves_original_untouched() {
        let mesh = unit_tetra();
        let pose = Isometry3::from_parts(
            Translation3::new(5.0, 0.0, 0.0),
            UnitQuaternion::from_axis_angle(&Vector3::z_axis(), 0.3),
        );
        let moved = mesh.transformed(&pose);
        assert_eq!(moved.faces, mesh.faces);
        assert_eq!(mesh.vertices[0], Point3::origin());
        assert!((moved.vertices[0].x - 5.0).abs() < 1e-12);
        // rigid motion preserves volume
        assert!((moved.signed_volume() - mesh.signed_volume()).abs() < 1e-12);
    }

    #[test]
    fn test_merge_offsets_indices() {
        let mut a = unit_tetra();
        let b = unit_tetra();
        a.merge(&b);
        assert_eq!(a.vertex_count(), 8);
        assert_eq!(a.faces[4], [4, 6, 5]);
        assert!(a.validate_indices().is_ok());
    }
}
