use serde::{Deserialize, Serialize};

/// Dimensional parameters of a ball-and-socket joint, in millimetres.
///
/// Built once from configuration and never mutated afterwards. All derived
/// dimensions are computed on demand so they can never drift from the inputs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JointGeometryParams {
    /// Radius of the ball.
    pub ball_radius: f64,
    /// Radius of the connector stud rising from the top of the ball.
    pub stud_radius: f64,
    /// Length of the stud, measured from the top of the ball.
    pub stud_length: f64,
    /// Wall thickness of the socket shell.
    pub socket_thickness: f64,
    /// Radial air gap between ball and socket.
    pub clearance: f64,
    /// Height of the opening cut as a fraction of `ball_radius`, in (0, 1).
    pub socket_opening_fraction: f64,
}

impl Default for JointGeometryParams {
    fn default() -> Self {
        Self {
            ball_radius: 10.0,
            stud_radius: 3.0,
            stud_length: 20.0,
            socket_thickness: 3.0,
            clearance: 0.4,
            socket_opening_fraction: 0.6,
        }
    }
}

/// A rejected joint parameter set.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ParamError {
    #[error("{name} must be a positive finite length, got {value}")]
    NonPositive { name: &'static str, value: f64 },

    #[error("socket_opening_fraction must lie in (0, 1), got {value}")]
    OpeningFractionOutOfRange { value: f64 },

    #[error("outer radius {outer} must exceed inner radius {inner}")]
    ShellInverted { inner: f64, outer: f64 },
}

fn require_positive(name: &'static str, value: f64) -> Result<(), ParamError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ParamError::NonPositive { name, value })
    }
}

impl JointGeometryParams {
    /// Radius of the socket cavity: `ball_radius + clearance`.
    pub fn inner_radius(&self) -> f64 {
        self.ball_radius + self.clearance
    }

    /// Outer radius of the socket shell: `inner_radius + socket_thickness`.
    pub fn outer_radius(&self) -> f64 {
        self.inner_radius() + self.socket_thickness
    }

    /// Height of the plane above which the socket is cut away.
    pub fn cut_height(&self) -> f64 {
        self.ball_radius * self.socket_opening_fraction
    }

    /// Height of the stud tip above the ball centre.
    pub fn stud_tip_height(&self) -> f64 {
        self.ball_radius + self.stud_length
    }

    /// Whether the stud reaches past the cut plane, i.e. out through the opening.
    pub fn stud_clears_opening(&self) -> bool {
        self.stud_tip_height() > self.cut_height()
    }

    /// Checks the parameters the ball-and-stud part depends on.
    pub fn validate_ball(&self) -> Result<(), ParamError> {
        require_positive("ball_radius", self.ball_radius)?;
        require_positive("stud_radius", self.stud_radius)?;
        require_positive("stud_length", self.stud_length)
    }

    /// Checks the parameters the socket shell depends on.
    pub fn validate_socket(&self) -> Result<(), ParamError> {
        require_positive("ball_radius", self.ball_radius)?;
        let fraction = self.socket_opening_fraction;
        if !(fraction > 0.0 && fraction < 1.0) {
            return Err(ParamError::OpeningFractionOutOfRange { value: fraction });
        }
        let (inner, outer) = (self.inner_radius(), self.outer_radius());
        if !(outer > inner) {
            return Err(ParamError::ShellInverted { inner, outer });
        }
        Ok(())
    }

    /// Full startup validation: every scalar positive, fraction in range,
    /// shell not inverted.
    pub fn validate(&self) -> Result<(), ParamError> {
        self.validate_ball()?;
        require_positive("socket_thickness", self.socket_thickness)?;
        require_positive("clearance", self.clearance)?;
        self.validate_socket()
    }
}
