use std::path::PathBuf;

use joint_types::ParamError;

/// Errors while reading or writing a joint configuration.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to parse configuration: {0}")]
    ParseError(String),

    #[error("unknown file format: {0}")]
    UnknownFormat(String),

    #[error("file version {file_version} is newer than supported version {supported_version}")]
    FutureVersion {
        file_version: u32,
        supported_version: u32,
    },

    #[error("invalid geometry: {0}")]
    InvalidGeometry(#[from] ParamError),

    #[error("limits must be finite and non-negative (swing {swing_deg} deg, twist {twist_deg} deg)")]
    InvalidLimits { swing_deg: f64, twist_deg: f64 },

    #[error("animation needs at least one frame")]
    NoFrames,

    #[error("clearance check needs at least one sample per surface")]
    NoSamples,

    #[error("failed to serialize configuration: {0}")]
    SerializeError(String),

    #[error("{path}: {reason}")]
    Io { path: PathBuf, reason: String },
}

/// Errors during mesh export.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExportError {
    #[error("mesh {name} has no triangles")]
    EmptyMesh { name: String },

    #[error("index {index} out of range (vertex count = {vertex_count})")]
    IndexOutOfRange { index: u32, vertex_count: usize },

    #[error("{path}: {reason}")]
    Io { path: PathBuf, reason: String },
}
