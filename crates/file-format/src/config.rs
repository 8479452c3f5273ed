//! JSON run configuration: geometry, tessellation, limits, animation and the
//! clearance check.

use std::path::Path;

use joint_articulation::AnimationSettings;
use joint_ops::{ClearanceCheckConfig, Resolution};
use joint_types::{JointGeometryParams, JointLimits, LimitPolicy};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::ConfigError;

/// Format identifier stored in every file.
pub const FORMAT_NAME: &str = "ball-joint";

/// Current configuration format version.
pub const FORMAT_VERSION: u32 = 1;

/// Articulation limits as written in the file, in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LimitSettings {
    pub swing_limit_deg: f64,
    pub twist_limit_deg: f64,
}

impl Default for LimitSettings {
    fn default() -> Self {
        let limits = JointLimits::default();
        Self {
            swing_limit_deg: limits.swing_limit_deg(),
            twist_limit_deg: limits.twist_limit_deg(),
        }
    }
}

impl LimitSettings {
    pub fn to_limits(&self) -> JointLimits {
        JointLimits::from_degrees(self.swing_limit_deg, self.twist_limit_deg)
    }
}

/// A complete run configuration. Every section falls back to its defaults
/// when missing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JointConfig {
    /// Format identifier, always [`FORMAT_NAME`].
    pub format: String,
    /// Format version number.
    pub version: u32,
    #[serde(default)]
    pub geometry: JointGeometryParams,
    #[serde(default)]
    pub resolution: Resolution,
    #[serde(default)]
    pub limits: LimitSettings,
    #[serde(default)]
    pub limit_policy: LimitPolicy,
    #[serde(default)]
    pub animation: AnimationSettings,
    #[serde(default)]
    pub clearance_check: ClearanceCheckConfig,
}

impl Default for JointConfig {
    fn default() -> Self {
        Self {
            format: FORMAT_NAME.to_string(),
            version: FORMAT_VERSION,
            geometry: JointGeometryParams::default(),
            resolution: Resolution::default(),
            limits: LimitSettings::default(),
            limit_policy: LimitPolicy::default(),
            animation: AnimationSettings::default(),
            clearance_check: ClearanceCheckConfig::default(),
        }
    }
}

impl JointConfig {
    /// Check the values a run cannot start without.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.geometry.validate()?;
        if !self.limits.to_limits().is_valid() {
            return Err(ConfigError::InvalidLimits {
                swing_deg: self.limits.swing_limit_deg,
                twist_deg: self.limits.twist_limit_deg,
            });
        }
        if self.animation.frames == 0 {
            return Err(ConfigError::NoFrames);
        }
        if self.clearance_check.sample_count == 0 {
            return Err(ConfigError::NoSamples);
        }
        Ok(())
    }
}

/// Parse and validate a configuration from a JSON string.
pub fn load_config(json: &str) -> Result<JointConfig, ConfigError> {
    let config: JointConfig =
        serde_json::from_str(json).map_err(|e| ConfigError::ParseError(e.to_string()))?;

    if config.format != FORMAT_NAME {
        return Err(ConfigError::UnknownFormat(config.format));
    }
    if config.version > FORMAT_VERSION {
        return Err(ConfigError::FutureVersion {
            file_version: config.version,
            supported_version: FORMAT_VERSION,
        });
    }

    config.validate()?;
    Ok(config)
}

pub fn load_config_file(path: &Path) -> Result<JointConfig, ConfigError> {
    let json = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    let config = load_config(&json)?;
    info!(path = %path.display(), "configuration loaded");
    Ok(config)
}

/// Serialize a configuration to pretty-printed JSON.
pub fn save_config(config: &JointConfig) -> Result<String, ConfigError> {
    serde_json::to_string_pretty(config).map_err(|e| ConfigError::SerializeError(e.to_string()))
}

pub fn save_config_file(config: &JointConfig, path: &Path) -> Result<(), ConfigError> {
    let json = save_config(config)?;
    std::fs::write(path, json).map_err(|e| ConfigError::Io {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}
