use std::path::{Path, PathBuf};

use csg_kernel::Mesh;
use tracing::info;

use crate::errors::ExportError;
use crate::obj::write_obj;
use crate::stl::write_binary_stl;

/// Files written for one part.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedPart {
    pub obj: PathBuf,
    pub stl: PathBuf,
}

fn write_file(path: &Path, contents: &[u8]) -> Result<(), ExportError> {
    std::fs::write(path, contents).map_err(|e| ExportError::Io {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

/// Write `dir/stem.obj` and `dir/stem.stl` (binary), creating `dir` if needed.
pub fn export_part(dir: &Path, stem: &str, mesh: &Mesh) -> Result<ExportedPart, ExportError> {
    let obj_text = write_obj(mesh, stem)?;
    let stl_bytes = write_binary_stl(mesh, stem)?;

    std::fs::create_dir_all(dir).map_err(|e| ExportError::Io {
        path: dir.to_path_buf(),
        reason: e.to_string(),
    })?;
    let part = ExportedPart {
        obj: dir.join(format!("{stem}.obj")),
        stl: dir.join(format!("{stem}.stl")),
    };
    write_file(&part.obj, obj_text.as_bytes())?;
    write_file(&part.stl, &stl_bytes)?;

    info!(stem, triangles = mesh.face_count(), dir = %dir.display(), "part exported");
    Ok(part)
}
