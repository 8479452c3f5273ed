//! STL export, binary and ASCII.

use std::fmt::Write;

use csg_kernel::Mesh;
use nalgebra::Vector3;

use crate::errors::ExportError;

/// Reject meshes an STL reader could not make sense of.
pub(crate) fn check_exportable(mesh: &Mesh, name: &str) -> Result<(), ExportError> {
    if mesh.faces.is_empty() {
        return Err(ExportError::EmptyMesh {
            name: name.to_string(),
        });
    }
    let vertex_count = mesh.vertex_count();
    for face in &mesh.faces {
        for &index in face {
            if index as usize >= vertex_count {
                return Err(ExportError::IndexOutOfRange { index, vertex_count });
            }
        }
    }
    Ok(())
}

/// Unit facet normal from the winding, +Z for degenerate triangles.
fn facet_normal(mesh: &Mesh, face: usize) -> Vector3<f32> {
    let [a, b, c] = mesh.triangle(face);
    let n = (b - a).cross(&(c - a)).try_normalize(1e-12).unwrap_or_else(Vector3::z);
    Vector3::new(n.x as f32, n.y as f32, n.z as f32)
}

/// Export a mesh as a binary STL file.
///
/// Binary STL format:
/// - 80-byte header (arbitrary text)
/// - u32 triangle count (little-endian)
/// - For each triangle: 3×f32 normal + 3×(3×f32 vertex) + u16 attribute = 50 bytes
pub fn write_binary_stl(mesh: &Mesh, name: &str) -> Result<Vec<u8>, ExportError> {
    check_exportable(mesh, name)?;
    let tri_count = mesh.face_count();
    let mut buf = Vec::with_capacity(80 + 4 + tri_count * 50);

    let header = format!("binary STL: {}", name);
    let header_bytes = header.as_bytes();
    buf.extend_from_slice(&header_bytes[..header_bytes.len().min(80)]);
    buf.resize(80, 0u8);

    buf.extend_from_slice(&(tri_count as u32).to_le_bytes());

    for (i, face) in mesh.faces.iter().enumerate() {
        let n = facet_normal(mesh, i);
        for c in n.iter() {
            buf.extend_from_slice(&c.to_le_bytes());
        }
        for &idx in face {
            let v = mesh.vertices[idx as usize];
            for c in [v.x, v.y, v.z] {
                buf.extend_from_slice(&(c as f32).to_le_bytes());
            }
        }
        // attribute byte count, unused
        buf.extend_from_slice(&0u16.to_le_bytes());
    }

    Ok(buf)
}

/// Export a mesh as an ASCII STL string.
pub fn write_ascii_stl(mesh: &Mesh, name: &str) -> Result<String, ExportError> {
    check_exportable(mesh, name)?;
    let mut out = String::with_capacity(mesh.face_count() * 300);
    // writing into a String cannot fail
    let _ = writeln!(out, "solid {}", name);

    for (i, face) in mesh.faces.iter().enumerate() {
        let n = facet_normal(mesh, i);
        let _ = writeln!(out, "  facet normal {:e} {:e} {:e}", n.x, n.y, n.z);
        out.push_str("    outer loop\n");
        for &idx in face {
            let v = mesh.vertices[idx as usize];
            let _ = writeln!(out, "      vertex {:e} {:e} {:e}", v.x as f32, v.y as f32, v.z as f32);
        }
        out.push_str("    endloop\n");
        out.push_str("  endfacet\n");
    }

    let _ = writeln!(out, "endsolid {}", name);
    Ok(out)
}
