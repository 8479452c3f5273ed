use std::collections::BTreeMap;

use joint_types::SurfaceStyle;
use serde::Serialize;

use crate::PresenterError;

/// One named triangle surface as a viewer would receive it.
#[derive(Debug, Clone, PartialEq)]
pub struct Surface {
    pub vertices: Vec<[f64; 3]>,
    pub faces: Vec<[u32; 3]>,
    pub style: SurfaceStyle,
    /// Bumped every time the geometry is replaced.
    pub revision: u64,
}

/// Named surfaces currently on display.
#[derive(Debug, Default)]
pub struct SurfaceRegistry {
    surfaces: BTreeMap<String, Surface>,
}

impl SurfaceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a new surface. Names are unique.
    pub fn register(
        &mut self,
        name: &str,
        vertices: Vec<[f64; 3]>,
        faces: Vec<[u32; 3]>,
        style: SurfaceStyle,
    ) -> Result<(), PresenterError> {
        if self.surfaces.contains_key(name) {
            return Err(PresenterError::DuplicateSurface {
                name: name.to_string(),
            });
        }
        self.surfaces.insert(
            name.to_string(),
            Surface {
                vertices,
                faces,
                style,
                revision: 0,
            },
        );
        Ok(())
    }

    /// Register `name`, or replace its geometry and style if it already
    /// exists.
    pub fn upsert(&mut self, name: &str, vertices: Vec<[f64; 3]>, faces: Vec<[u32; 3]>, style: SurfaceStyle) {
        match self.surfaces.get_mut(name) {
            Some(surface) => {
                surface.vertices = vertices;
                surface.faces = faces;
                surface.style = style;
                surface.revision += 1;
            }
            None => {
                self.surfaces.insert(
                    name.to_string(),
                    Surface {
                        vertices,
                        faces,
                        style,
                        revision: 0,
                    },
                );
            }
        }
    }

    /// Move the vertices of an existing surface, keeping its triangles.
    pub fn update_vertices(&mut self, name: &str, vertices: Vec<[f64; 3]>) -> Result<(), PresenterError> {
        let surface = self
            .surfaces
            .get_mut(name)
            .ok_or_else(|| PresenterError::UnknownSurface {
                name: name.to_string(),
            })?;
        surface.vertices = vertices;
        surface.revision += 1;
        Ok(())
    }

    pub fn remove(&mut self, name: &str) -> Result<Surface, PresenterError> {
        self.surfaces
            .remove(name)
            .ok_or_else(|| PresenterError::UnknownSurface {
                name: name.to_string(),
            })
    }

    pub fn get(&self, name: &str) -> Option<&Surface> {
        self.surfaces.get(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.surfaces.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.surfaces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.surfaces.is_empty()
    }

    pub fn summaries(&self) -> Vec<SurfaceSummary> {
        self.surfaces
            .iter()
            .map(|(name, s)| SurfaceSummary {
                name: name.clone(),
                vertex_count: s.vertices.len(),
                face_count: s.faces.len(),
                revision: s.revision,
            })
            .collect()
    }
}

/// Size and revision of one surface, for reporting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SurfaceSummary {
    pub name: String,
    pub vertex_count: usize,
    pub face_count: usize,
    pub revision: u64,
}
