//! Constrained rigid-body articulation of the ball part.
//!
//! The ball rotates about a fixed pivot. Swing (about X and Y) is absolute and
//! always starts from rest; twist (about Z) stacks on the current pose. Both
//! are bounded by [`JointLimits`](joint_types::JointLimits).

pub mod model;
pub mod schedule;
pub mod state;

pub use model::{ArticulationError, ArticulationModel, PosedFrame};
pub use schedule::{AnimationSchedule, AnimationSettings};
pub use state::{AxisOutcome, Phase, RotationState, SwingOutcome};
