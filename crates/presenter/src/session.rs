//! The ball-and-socket scene: a static socket and an animated ball.

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use csg_kernel::Mesh;
use joint_articulation::{ArticulationModel, RotationState};
use joint_types::SurfaceStyle;

use crate::context::{PresenterContext, PresenterSummary};
use crate::PresenterError;

pub const SOCKET_SURFACE: &str = "socket";
pub const BALL_SURFACE: &str = "ball";

/// Presenter wired to an articulation model.
///
/// Each rendered frame advances the model one animation tick and replaces
/// the ball surface with the posed mesh. The socket never moves.
pub struct JointSession {
    context: PresenterContext,
    model: Rc<RefCell<ArticulationModel>>,
}

impl JointSession {
    pub fn new(socket: &Arc<Mesh>, model: ArticulationModel) -> Result<Self, PresenterError> {
        let mut context = PresenterContext::new();
        context.register_surface_mesh(
            SOCKET_SURFACE,
            socket.vertex_buffer(),
            socket.faces.clone(),
            SurfaceStyle::SOCKET,
        )?;
        let ball = model.posed_mesh();
        context.register_surface_mesh(BALL_SURFACE, ball.vertex_buffer(), ball.faces, SurfaceStyle::BALL)?;

        let model = Rc::new(RefCell::new(model));
        let driver = Rc::clone(&model);
        context.set_user_callback(move |registry| {
            let frame = driver.borrow_mut().animation_tick();
            registry.upsert(
                BALL_SURFACE,
                frame.mesh.vertex_buffer(),
                frame.mesh.faces,
                SurfaceStyle::BALL,
            );
        });

        Ok(Self { context, model })
    }

    pub fn run(&mut self, frames: u64) -> Result<u64, PresenterError> {
        self.context.render_frames(frames)
    }

    pub fn context(&self) -> &PresenterContext {
        &self.context
    }

    /// Pose after the last rendered frame.
    pub fn state(&self) -> RotationState {
        *self.model.borrow().state()
    }

    /// Direct access to the model between frames, e.g. to twist the ball.
    pub fn with_model<R>(&self, f: impl FnOnce(&mut ArticulationModel) -> R) -> R {
        f(&mut self.model.borrow_mut())
    }

    pub fn finish(self) -> PresenterSummary {
        self.context.shutdown()
    }
}
