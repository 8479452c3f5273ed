use std::fmt;

use csg_kernel::boolean::engine::BooleanFailure;
use csg_kernel::Mesh;
use joint_types::ParamError;
use serde::{Deserialize, Serialize};

/// Tessellation density of the primitives the joint is built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Resolution {
    /// Segments around the sphere's polar axis.
    pub sphere_meridians: usize,
    /// Bands from pole to pole.
    pub sphere_parallels: usize,
    /// Segments around the stud.
    pub cylinder_segments: usize,
}

impl Default for Resolution {
    fn default() -> Self {
        Self {
            sphere_meridians: 32,
            sphere_parallels: 16,
            cylinder_segments: 32,
        }
    }
}

/// Which boolean step of a build was running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildStage {
    /// Ball sphere united with the stud cylinder.
    BallStudUnion,
    /// Inner sphere subtracted from the outer sphere.
    SocketShell,
    /// Opening box subtracted from the shell.
    SocketOpening,
}

impl fmt::Display for BuildStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BuildStage::BallStudUnion => "ball/stud union",
            BuildStage::SocketShell => "socket shell",
            BuildStage::SocketOpening => "socket opening cut",
        };
        f.write_str(name)
    }
}

/// Errors from building joint geometry.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BuildError {
    #[error("invalid joint parameters: {0}")]
    InvalidParams(#[from] ParamError),

    #[error("{stage} failed: {source}")]
    BooleanFailed {
        stage: BuildStage,
        #[source]
        source: BooleanFailure,
    },

    #[error("{stage} produced no triangles")]
    EmptyResult { stage: BuildStage },
}

/// Both printable parts of one joint.
#[derive(Debug, Clone)]
pub struct JointParts {
    pub ball: Mesh,
    pub socket: Mesh,
}
