use serde::{Deserialize, Serialize};

/// Angular limits of a ball joint, in radians.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct JointLimits {
    /// Maximum off-axis rotation about X or Y.
    pub swing_limit_rad: f64,
    /// Maximum rotation about the primary (Z) axis per call.
    pub twist_limit_rad: f64,
}

impl JointLimits {
    pub fn new(swing_limit_rad: f64, twist_limit_rad: f64) -> Self {
        Self {
            swing_limit_rad,
            twist_limit_rad,
        }
    }

    pub fn from_degrees(swing_limit_deg: f64, twist_limit_deg: f64) -> Self {
        Self::new(swing_limit_deg.to_radians(), twist_limit_deg.to_radians())
    }

    pub fn swing_limit_deg(&self) -> f64 {
        self.swing_limit_rad.to_degrees()
    }

    pub fn twist_limit_deg(&self) -> f64 {
        self.twist_limit_rad.to_degrees()
    }

    pub fn is_valid(&self) -> bool {
        self.swing_limit_rad.is_finite()
            && self.twist_limit_rad.is_finite()
            && self.swing_limit_rad >= 0.0
            && self.twist_limit_rad >= 0.0
    }
}

impl Default for JointLimits {
    /// 45 degree swing cone, half-turn twist.
    fn default() -> Self {
        Self::from_degrees(45.0, 180.0)
    }
}

/// What to do with a requested angle that exceeds its limit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LimitPolicy {
    /// Leave the axis out of the pose and report it as skipped.
    #[default]
    Skip,
    /// Rotate by the limit instead, keeping the requested sign.
    Clamp,
}
