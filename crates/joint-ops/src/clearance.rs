//! Monte-Carlo clearance check between the two parts.
//!
//! Both surfaces are sampled and the closest pair of samples stands in for the
//! true gap. The estimate can only over-report the real minimum distance, and
//! the brute-force pairing is quadratic in the sample count.

use std::fmt;

use csg_kernel::sampling::sample_surface;
use csg_kernel::Mesh;
use joint_types::JointGeometryParams;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};

/// Outcome of comparing a measured gap with the designed clearance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClearanceVerdict {
    /// The parts touch or overlap.
    Intersecting,
    /// Gap well under the design clearance.
    TooTight,
    /// Geometry is consistent but the design clearance is small for FDM
    /// printing.
    BelowRecommendedForFDM,
    Acceptable,
    /// No samples were drawn, so the gap is unknown.
    Unmeasured,
}

impl ClearanceVerdict {
    pub fn is_acceptable(&self) -> bool {
        matches!(self, ClearanceVerdict::Acceptable)
    }
}

impl fmt::Display for ClearanceVerdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            ClearanceVerdict::Intersecting => "parts intersect",
            ClearanceVerdict::TooTight => "clearance too tight",
            ClearanceVerdict::BelowRecommendedForFDM => "clearance below FDM recommendation",
            ClearanceVerdict::Acceptable => "clearance acceptable",
            ClearanceVerdict::Unmeasured => "clearance not measured",
        };
        f.write_str(text)
    }
}

/// Decision thresholds for [`classify`], in millimetres.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClearanceThresholds {
    /// Gaps under this count as contact.
    pub contact: f64,
    /// Gaps under `design_clearance * too_tight_ratio` are too tight.
    pub too_tight_ratio: f64,
    /// Smallest design clearance that prints reliably on FDM machines.
    pub fdm_minimum: f64,
}

impl Default for ClearanceThresholds {
    fn default() -> Self {
        Self {
            contact: 0.05,
            too_tight_ratio: 0.5,
            fdm_minimum: 0.3,
        }
    }
}

impl ClearanceThresholds {
    /// First matching rule wins: contact, then too tight, then FDM minimum.
    pub fn classify(&self, min_distance: f64, design_clearance: f64) -> ClearanceVerdict {
        if min_distance < self.contact {
            ClearanceVerdict::Intersecting
        } else if min_distance < design_clearance * self.too_tight_ratio {
            ClearanceVerdict::TooTight
        } else if design_clearance < self.fdm_minimum {
            ClearanceVerdict::BelowRecommendedForFDM
        } else {
            ClearanceVerdict::Acceptable
        }
    }
}

/// [`ClearanceThresholds::classify`] with the default thresholds.
pub fn classify(min_distance: f64, design_clearance: f64) -> ClearanceVerdict {
    ClearanceThresholds::default().classify(min_distance, design_clearance)
}

/// Smallest distance between surface samples of `a` and `b`, drawn from the
/// thread-local RNG. Returns `f64::INFINITY` when either mesh has no area.
pub fn estimate_minimum_distance(a: &Mesh, b: &Mesh, sample_count: usize) -> f64 {
    estimate_minimum_distance_with_rng(a, b, sample_count, &mut rand::thread_rng())
}

/// [`estimate_minimum_distance`] with a caller-supplied RNG.
pub fn estimate_minimum_distance_with_rng<R: Rng + ?Sized>(
    a: &Mesh,
    b: &Mesh,
    sample_count: usize,
    rng: &mut R,
) -> f64 {
    let samples_a = sample_surface(a, sample_count, rng);
    let samples_b = sample_surface(b, sample_count, rng);
    if samples_a.is_empty() || samples_b.is_empty() {
        return f64::INFINITY;
    }

    samples_a
        .iter()
        .map(|p| {
            samples_b
                .iter()
                .map(|q| (p - q).norm_squared())
                .fold(f64::INFINITY, f64::min)
        })
        .fold(f64::INFINITY, f64::min)
        .sqrt()
}

/// Settings of the one-shot clearance diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClearanceCheckConfig {
    /// Points drawn from each surface.
    pub sample_count: usize,
    /// Seed for reproducible runs; `None` draws from the thread RNG.
    pub seed: Option<u64>,
    pub thresholds: ClearanceThresholds,
}

impl Default for ClearanceCheckConfig {
    fn default() -> Self {
        Self {
            sample_count: 2000,
            seed: Some(7),
            thresholds: ClearanceThresholds::default(),
        }
    }
}

/// Result of [`check_clearance`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ClearanceReport {
    pub min_distance: f64,
    pub design_clearance: f64,
    pub sample_count: usize,
    pub verdict: ClearanceVerdict,
}

/// Estimate the gap between ball and socket and judge it against the design
/// clearance.
///
/// When either surface yields no samples the distance is infinite and the
/// verdict is [`ClearanceVerdict::Unmeasured`] rather than a threshold match.
#[instrument(skip_all, fields(samples = config.sample_count))]
pub fn check_clearance(
    ball: &Mesh,
    socket: &Mesh,
    params: &JointGeometryParams,
    config: &ClearanceCheckConfig,
) -> ClearanceReport {
    let min_distance = match config.seed {
        Some(seed) => {
            let mut rng = StdRng::seed_from_u64(seed);
            estimate_minimum_distance_with_rng(ball, socket, config.sample_count, &mut rng)
        }
        None => estimate_minimum_distance(ball, socket, config.sample_count),
    };
    let verdict = if min_distance.is_finite() {
        config.thresholds.classify(min_distance, params.clearance)
    } else {
        warn!(samples = config.sample_count, "no surface samples, clearance not measured");
        ClearanceVerdict::Unmeasured
    };
    info!(min_distance, clearance = params.clearance, %verdict, "clearance check");

    ClearanceReport {
        min_distance,
        design_clearance: params.clearance,
        sample_count: config.sample_count,
        verdict,
    }
}
