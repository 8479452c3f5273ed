use std::sync::Arc;

use csg_kernel::Mesh;
use joint_types::{JointLimits, LimitPolicy};
use nalgebra::Point3;
use tracing::debug;

use crate::schedule::AnimationSchedule;
use crate::state::{AxisOutcome, RotationState, SwingOutcome};

/// Errors from setting up an articulation model.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ArticulationError {
    #[error("animation schedule has no frames")]
    EmptySchedule,

    #[error("animation angle must be finite, got {value}")]
    NonFiniteAngle { value: f64 },

    #[error("joint limits must be finite and non-negative (swing {swing_rad} rad, twist {twist_rad} rad)")]
    InvalidLimit { swing_rad: f64, twist_rad: f64 },
}

/// Everything a presenter needs to draw one animation frame.
#[derive(Debug, Clone)]
pub struct PosedFrame {
    pub frame_index: usize,
    pub angle_deg: f64,
    pub swing: SwingOutcome,
    pub state: RotationState,
    /// The ball mesh under `state`'s pose.
    pub mesh: Mesh,
}

/// Drives the ball part through swing, twist and the animation schedule.
///
/// The original mesh is shared and never modified; posed copies are derived
/// from it on demand.
#[derive(Debug, Clone)]
pub struct ArticulationModel {
    original: Arc<Mesh>,
    state: RotationState,
    policy: LimitPolicy,
    schedule: AnimationSchedule,
}

impl ArticulationModel {
    /// Model pivoting about the origin (the ball centre).
    pub fn new(
        ball: Arc<Mesh>,
        limits: JointLimits,
        policy: LimitPolicy,
        schedule: AnimationSchedule,
    ) -> Result<Self, ArticulationError> {
        Self::with_pivot(ball, Point3::origin(), limits, policy, schedule)
    }

    pub fn with_pivot(
        ball: Arc<Mesh>,
        pivot: Point3<f64>,
        limits: JointLimits,
        policy: LimitPolicy,
        schedule: AnimationSchedule,
    ) -> Result<Self, ArticulationError> {
        if !limits.is_valid() {
            return Err(ArticulationError::InvalidLimit {
                swing_rad: limits.swing_limit_rad,
                twist_rad: limits.twist_limit_rad,
            });
        }
        if schedule.is_empty() {
            return Err(ArticulationError::EmptySchedule);
        }
        Ok(Self {
            original: ball,
            state: RotationState::rest(pivot, limits),
            policy,
            schedule,
        })
    }

    pub fn state(&self) -> &RotationState {
        &self.state
    }

    pub fn original(&self) -> &Arc<Mesh> {
        &self.original
    }

    pub fn schedule(&self) -> &AnimationSchedule {
        &self.schedule
    }

    /// Absolute swing; see [`RotationState::set_swing`].
    pub fn set_swing(&mut self, x_deg: f64, y_deg: f64) -> SwingOutcome {
        let (state, outcome) = self.state.set_swing(x_deg, y_deg, self.policy);
        self.state = state;
        outcome
    }

    /// Relative twist; see [`RotationState::apply_twist`].
    pub fn apply_twist(&mut self, z_deg: f64) -> AxisOutcome {
        let (state, outcome) = self.state.apply_twist(z_deg, self.policy);
        self.state = state;
        outcome
    }

    /// Back to the identity pose and the first frame.
    pub fn reset(&mut self) {
        self.state = RotationState::rest(self.state.pivot(), *self.state.limits());
        self.schedule.rewind();
    }

    /// The original ball under the current pose.
    pub fn posed_mesh(&self) -> Mesh {
        self.original.transformed(self.state.pose())
    }

    /// Swing to the next scheduled angle: `angle` about X and half of it
    /// about Y.
    pub fn animation_tick(&mut self) -> PosedFrame {
        let (frame_index, angle_deg) = self.schedule.advance();
        let swing = self.set_swing(angle_deg, angle_deg * 0.5);
        debug!(frame_index, angle_deg, "animation tick");
        PosedFrame {
            frame_index,
            angle_deg,
            swing,
            state: self.state,
            mesh: self.posed_mesh(),
        }
    }
}
