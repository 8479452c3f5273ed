use joint_types::SurfaceStyle;
use serde::Serialize;
use tracing::{debug, info};

use crate::registry::{SurfaceRegistry, SurfaceSummary};
use crate::PresenterError;

type FrameCallback = Box<dyn FnMut(&mut SurfaceRegistry)>;

/// Headless presenter.
///
/// Created once at startup and consumed by [`shutdown`](Self::shutdown). The
/// frame callback runs synchronously, once per rendered frame, with mutable
/// access to the surface registry.
#[derive(Default)]
pub struct PresenterContext {
    registry: SurfaceRegistry,
    callback: Option<FrameCallback>,
    frames_rendered: u64,
}

impl PresenterContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_surface_mesh(
        &mut self,
        name: &str,
        vertices: Vec<[f64; 3]>,
        faces: Vec<[u32; 3]>,
        style: SurfaceStyle,
    ) -> Result<(), PresenterError> {
        debug!(name, vertices = vertices.len(), faces = faces.len(), "surface registered");
        self.registry.register(name, vertices, faces, style)
    }

    /// Install the per-frame callback, replacing any previous one.
    pub fn set_user_callback<F>(&mut self, callback: F)
    where
        F: FnMut(&mut SurfaceRegistry) + 'static,
    {
        self.callback = Some(Box::new(callback));
    }

    pub fn registry(&self) -> &SurfaceRegistry {
        &self.registry
    }

    pub fn frames_rendered(&self) -> u64 {
        self.frames_rendered
    }

    /// Run `frames` frames. Returns the total frame count so far.
    pub fn render_frames(&mut self, frames: u64) -> Result<u64, PresenterError> {
        let callback = self.callback.as_mut().ok_or(PresenterError::NoCallback)?;
        for _ in 0..frames {
            callback(&mut self.registry);
            self.frames_rendered += 1;
        }
        Ok(self.frames_rendered)
    }

    /// Tear down and report what was shown.
    pub fn shutdown(self) -> PresenterSummary {
        let summary = PresenterSummary {
            frames_rendered: self.frames_rendered,
            surfaces: self.registry.summaries(),
        };
        info!(frames = summary.frames_rendered, surfaces = summary.surfaces.len(), "presenter shut down");
        summary
    }
}

/// Final state of a [`PresenterContext`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PresenterSummary {
    pub frames_rendered: u64,
    pub surfaces: Vec<SurfaceSummary>,
}
