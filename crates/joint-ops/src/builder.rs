//! Constructive geometry of the two joint parts.

use csg_kernel::primitives::{make_box, make_cylinder, make_sphere};
use csg_kernel::{BooleanEngine, BspBooleanEngine, Mesh, Solid};
use joint_types::JointGeometryParams;
use nalgebra::{Point3, Vector3};
use tracing::{debug, info, instrument};

use crate::types::{BuildError, BuildStage, JointParts, Resolution};

/// Builds ball and socket meshes from joint parameters.
///
/// Generic over the boolean backend so tests can swap it; the default is the
/// kernel's BSP engine.
#[derive(Debug, Clone, Default)]
pub struct GeometryBuilder<E: BooleanEngine = BspBooleanEngine> {
    resolution: Resolution,
    engine: E,
}

impl GeometryBuilder {
    pub fn new(resolution: Resolution) -> Self {
        Self::with_engine(resolution, BspBooleanEngine)
    }
}

impl<E: BooleanEngine> GeometryBuilder<E> {
    pub fn with_engine(resolution: Resolution, engine: E) -> Self {
        Self { resolution, engine }
    }

    /// Sphere of `ball_radius` at the origin united with the stud, a cylinder
    /// standing on the north pole along +Z.
    #[instrument(skip(self, params), fields(ball_radius = params.ball_radius, stud_length = params.stud_length))]
    pub fn build_ball_assembly(&self, params: &JointGeometryParams) -> Result<Mesh, BuildError> {
        params.validate_ball()?;
        let res = &self.resolution;

        let ball = make_sphere(params.ball_radius, res.sphere_meridians, res.sphere_parallels);
        let stud = make_cylinder(params.stud_radius, params.stud_length, res.cylinder_segments)
            .translated(Vector3::new(0.0, 0.0, params.stud_length / 2.0 + params.ball_radius));

        let stage = BuildStage::BallStudUnion;
        let solid = self
            .engine
            .union(&ball, &stud)
            .map_err(|source| BuildError::BooleanFailed { stage, source })?;
        finish(solid, stage)
    }

    /// Hollow shell between `inner_radius` and `outer_radius`, with everything
    /// above `cut_height` removed to form the opening the stud passes through.
    #[instrument(skip(self, params), fields(inner = params.inner_radius(), outer = params.outer_radius()))]
    pub fn build_socket_assembly(&self, params: &JointGeometryParams) -> Result<Mesh, BuildError> {
        params.validate_socket()?;
        let res = &self.resolution;

        let outer = make_sphere(params.outer_radius(), res.sphere_meridians, res.sphere_parallels);
        let inner = make_sphere(params.inner_radius(), res.sphere_meridians, res.sphere_parallels);
        let shell = self
            .engine
            .subtract(&outer, &inner)
            .map_err(|source| BuildError::BooleanFailed {
                stage: BuildStage::SocketShell,
                source,
            })?;
        debug!(polygons = shell.polygon_count(), "socket shell");

        let stage = BuildStage::SocketOpening;
        let cutter = opening_cutter(params, &shell);
        let socket = self
            .engine
            .subtract(&shell, &cutter)
            .map_err(|source| BuildError::BooleanFailed { stage, source })?;
        finish(socket, stage)
    }

    /// Full parameter validation followed by both builds.
    pub fn build_pair(&self, params: &JointGeometryParams) -> Result<JointParts, BuildError> {
        params.validate()?;
        Ok(JointParts {
            ball: self.build_ball_assembly(params)?,
            socket: self.build_socket_assembly(params)?,
        })
    }
}

/// Box covering the half-space above the cut plane, as far as the shell
/// reaches. Its remaining faces sit `outer_radius` beyond the shell's bounds.
pub fn opening_cutter(params: &JointGeometryParams, shell: &Solid) -> Solid {
    let margin = params.outer_radius();
    let bounds = shell.bounding_box().expanded(margin);
    make_box(
        Point3::new(bounds.min.x, bounds.min.y, params.cut_height()),
        Point3::new(bounds.max.x, bounds.max.y, bounds.max.z),
    )
}

fn finish(solid: Solid, stage: BuildStage) -> Result<Mesh, BuildError> {
    let mesh = solid.to_mesh();
    if mesh.is_empty() {
        return Err(BuildError::EmptyResult { stage });
    }
    info!(%stage, vertices = mesh.vertex_count(), triangles = mesh.face_count(), "part built");
    Ok(mesh)
}

/// [`GeometryBuilder::build_ball_assembly`] at the default resolution.
pub fn build_ball_assembly(params: &JointGeometryParams) -> Result<Mesh, BuildError> {
    GeometryBuilder::new(Resolution::default()).build_ball_assembly(params)
}

/// [`GeometryBuilder::build_socket_assembly`] at the default resolution.
pub fn build_socket_assembly(params: &JointGeometryParams) -> Result<Mesh, BuildError> {
    GeometryBuilder::new(Resolution::default()).build_socket_assembly(params)
}

/// [`GeometryBuilder::build_pair`] at the default resolution.
pub fn build_pair(params: &JointGeometryParams) -> Result<JointParts, BuildError> {
    GeometryBuilder::new(Resolution::default()).build_pair(params)
}
