//! Build a ball-and-socket joint, export both parts and run the articulation
//! headless.
//!
//! Usage: `ball-joint [config.json] [--out DIR] [--frames N]`

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use csg_kernel::Mesh;
use csg_kernel::validation::validate_mesh;
use joint_articulation::{ArticulationError, ArticulationModel};
use joint_file_format::{ConfigError, ExportError, JointConfig, export_part, load_config_file};
use joint_ops::{BuildError, GeometryBuilder, check_clearance};
use joint_presenter::{JointSession, PresenterError};

const USAGE: &str = "usage: ball-joint [config.json] [--out DIR] [--frames N]";

#[derive(Debug, Clone, PartialEq)]
struct Args {
    config: Option<PathBuf>,
    out_dir: PathBuf,
    frames: Option<u64>,
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("{0}")]
    Usage(String),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Build(#[from] BuildError),
    #[error(transparent)]
    Export(#[from] ExportError),
    #[error(transparent)]
    Articulation(#[from] ArticulationError),
    #[error(transparent)]
    Presenter(#[from] PresenterError),
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Args, CliError> {
    let mut parsed = Args {
        config: None,
        out_dir: PathBuf::from("exports"),
        frames: None,
    };
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--out" => {
                let dir = args.next().ok_or_else(|| CliError::Usage("--out needs a directory".into()))?;
                parsed.out_dir = PathBuf::from(dir);
            }
            "--frames" => {
                let n = args.next().ok_or_else(|| CliError::Usage("--frames needs a count".into()))?;
                let n = n
                    .parse()
                    .map_err(|_| CliError::Usage(format!("--frames: not a count: {n}")))?;
                parsed.frames = Some(n);
            }
            "-h" | "--help" => return Err(CliError::Usage(USAGE.into())),
            flag if flag.starts_with('-') => {
                return Err(CliError::Usage(format!("unknown option {flag}\n{USAGE}")));
            }
            path if parsed.config.is_none() => parsed.config = Some(PathBuf::from(path)),
            extra => return Err(CliError::Usage(format!("unexpected argument {extra}\n{USAGE}"))),
        }
    }
    Ok(parsed)
}

/// Print mesh quality info.
fn validate_and_report(name: &str, mesh: &Mesh) {
    let val = validate_mesh(mesh);
    let watertight = if val.is_watertight() { "watertight" } else { "open" };
    let printable = if val.is_printable() { "printable" } else { "not printable" };
    println!(
        "  {name}: {tris} tris, {verts} verts, {watertight}, {printable}, vol={vol:.1}",
        tris = mesh.face_count(),
        verts = mesh.vertex_count(),
        vol = val.signed_volume,
    );
    if val.boundary_edges > 0 || val.non_manifold_edges > 0 {
        println!("    boundary_edges={}, non_manifold={}", val.boundary_edges, val.non_manifold_edges);
    }
}

fn run(args: Args) -> Result<(), CliError> {
    let config = match &args.config {
        Some(path) => load_config_file(path)?,
        None => JointConfig::default(),
    };
    let params = config.geometry;

    println!("=== Geometry ===");
    let parts = GeometryBuilder::new(config.resolution).build_pair(&params)?;
    validate_and_report("ball", &parts.ball);
    validate_and_report("socket", &parts.socket);

    println!("=== Export ===");
    for (stem, mesh) in [("ball_joint_ball", &parts.ball), ("ball_joint_socket", &parts.socket)] {
        let written = export_part(&args.out_dir, stem, mesh)?;
        println!("  {}", written.obj.display());
        println!("  {}", written.stl.display());
    }

    println!("=== Clearance ===");
    let report = check_clearance(&parts.ball, &parts.socket, &params, &config.clearance_check);
    println!("  ball radius:    {:.2} mm", params.ball_radius);
    println!("  socket inner:   {:.2} mm", params.inner_radius());
    println!("  socket outer:   {:.2} mm", params.outer_radius());
    println!("  opening cut at: z = {:.2} mm", params.cut_height());
    println!(
        "  stud tip at:    z = {:.2} mm ({})",
        params.stud_tip_height(),
        if params.stud_clears_opening() { "clears opening" } else { "below opening" }
    );
    println!(
        "  min distance:   {:.3} mm over {} samples (design {:.2} mm): {}",
        report.min_distance, report.sample_count, report.design_clearance, report.verdict
    );
    if !report.verdict.is_acceptable() {
        println!("  warning: {}", report.verdict);
    }

    println!("=== Articulation ===");
    let limits = config.limits.to_limits();
    let schedule = config.animation.to_schedule()?;
    let frames = args.frames.unwrap_or(schedule.len() as u64);
    let model = ArticulationModel::new(Arc::new(parts.ball), limits, config.limit_policy, schedule)?;
    let mut session = JointSession::new(&Arc::new(parts.socket), model)?;
    session.run(frames)?;

    let state = session.state();
    println!(
        "  swing limit {:.1} deg, twist limit {:.1} deg, policy {:?}",
        limits.swing_limit_deg(),
        limits.twist_limit_deg(),
        config.limit_policy
    );
    println!("  final rotation {:.2} deg ({:?})", state.rotation_angle_deg(), state.phase());
    let summary = session.finish();
    for s in &summary.surfaces {
        println!(
            "  surface {}: {} verts, {} faces, revision {}",
            s.name, s.vertex_count, s.face_count, s.revision
        );
    }
    println!("  {} frames rendered", summary.frames_rendered);
    Ok(())
}

fn main() -> ExitCode {
    let result = parse_args(std::env::args().skip(1)).and_then(run);
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(CliError::Usage(msg)) => {
            eprintln!("{msg}");
            ExitCode::from(2)
        }
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
