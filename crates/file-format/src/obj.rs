//! Wavefront OBJ export.

use std::fmt::Write;

use csg_kernel::Mesh;

use crate::errors::ExportError;
use crate::stl::check_exportable;

/// Write a mesh as one OBJ object: `v` records, then `f` records with 1-based
/// indices.
pub fn write_obj(mesh: &Mesh, name: &str) -> Result<String, ExportError> {
    check_exportable(mesh, name)?;
    let mut out = String::with_capacity(mesh.vertex_count() * 40 + mesh.face_count() * 24);
    // writing into a String cannot fail
    let _ = writeln!(out, "# {} vertices, {} faces", mesh.vertex_count(), mesh.face_count());
    let _ = writeln!(out, "o {}", name);
    for v in &mesh.vertices {
        let _ = writeln!(out, "v {} {} {}", v.x, v.y, v.z);
    }
    for [a, b, c] in &mesh.faces {
        let _ = writeln!(out, "f {} {} {}", a + 1, b + 1, c + 1);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Point3;

    #[test]
    fn indices_are_one_based() {
        let mesh = Mesh::from_parts(
            vec![
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(1.5, 0.0, 0.0),
                Point3::new(0.0, 1.0, -2.0),
            ],
            vec![[0, 1, 2]],
        )
        .unwrap();
        let text = write_obj(&mesh, "part").unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[1], "o part");
        assert_eq!(lines[3], "v 1.5 0 0");
        assert_eq!(lines[5], "f 1 2 3");
    }

    #[test]
    fn empty_mesh_is_rejected() {
        assert!(matches!(write_obj(&Mesh::new(), "none"), Err(ExportError::EmptyMesh { .. })));
    }
}
