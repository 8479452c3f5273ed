pub mod context;
pub mod registry;
pub mod session;

pub use context::{PresenterContext, PresenterSummary};
pub use registry::{Surface, SurfaceRegistry, SurfaceSummary};
pub use session::{JointSession, BALL_SURFACE, SOCKET_SURFACE};

/// Errors from the presenter layer.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PresenterError {
    #[error("surface already registered: {name}")]
    DuplicateSurface { name: String },

    #[error("no surface named {name}")]
    UnknownSurface { name: String },

    #[error("no frame callback installed")]
    NoCallback,
}
