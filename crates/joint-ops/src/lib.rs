pub mod builder;
pub mod clearance;
pub mod types;

pub use builder::{build_ball_assembly, build_pair, build_socket_assembly, GeometryBuilder};
pub use clearance::{
    check_clearance, classify, estimate_minimum_distance, estimate_minimum_distance_with_rng,
    ClearanceCheckConfig, ClearanceReport, ClearanceThresholds, ClearanceVerdict,
};
pub use types::*;
