use serde::{Deserialize, Serialize};

use crate::model::ArticulationError;

/// Sweep of the animation driver, as read from configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationSettings {
    pub min_angle_deg: f64,
    pub max_angle_deg: f64,
    pub frames: usize,
}

impl Default for AnimationSettings {
    fn default() -> Self {
        Self {
            min_angle_deg: -30.0,
            max_angle_deg: 30.0,
            frames: 120,
        }
    }
}

impl AnimationSettings {
    pub fn to_schedule(&self) -> Result<AnimationSchedule, ArticulationError> {
        AnimationSchedule::linspace(self.min_angle_deg, self.max_angle_deg, self.frames)
    }
}

/// Cyclic list of sample angles, in degrees.
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationSchedule {
    angles_deg: Vec<f64>,
    cursor: usize,
}

impl AnimationSchedule {
    /// `frames` evenly spaced angles from `min` to `max`, both included.
    pub fn linspace(min_deg: f64, max_deg: f64, frames: usize) -> Result<Self, ArticulationError> {
        Self::from_angles(evenly_spaced(min_deg, max_deg, frames))
    }

    pub fn from_angles(angles_deg: Vec<f64>) -> Result<Self, ArticulationError> {
        if angles_deg.is_empty() {
            return Err(ArticulationError::EmptySchedule);
        }
        if let Some(&value) = angles_deg.iter().find(|a| !a.is_finite()) {
            return Err(ArticulationError::NonFiniteAngle { value });
        }
        Ok(Self {
            angles_deg,
            cursor: 0,
        })
    }

    pub fn len(&self) -> usize {
        self.angles_deg.len()
    }

    pub fn is_empty(&self) -> bool {
        self.angles_deg.is_empty()
    }

    pub fn angles(&self) -> &[f64] {
        &self.angles_deg
    }

    /// Index of the frame the next [`advance`](Self::advance) returns.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Current frame index and angle; moves the cursor on, wrapping at the end.
    pub fn advance(&mut self) -> (usize, f64) {
        let index = self.cursor;
        self.cursor = (self.cursor + 1) % self.angles_deg.len();
        (index, self.angles_deg[index])
    }

    pub fn rewind(&mut self) {
        self.cursor = 0;
    }
}

impl Default for AnimationSchedule {
    /// -30 to +30 degrees over 120 frames.
    fn default() -> Self {
        let s = AnimationSettings::default();
        Self {
            angles_deg: evenly_spaced(s.min_angle_deg, s.max_angle_deg, s.frames),
            cursor: 0,
        }
    }
}

fn evenly_spaced(min: f64, max: f64, count: usize) -> Vec<f64> {
    match count {
        0 => Vec::new(),
        1 => vec![min],
        n => {
            let step = (max - min) / (n - 1) as f64;
            (0..n).map(|i| min + step * i as f64).collect()
        }
    }
}
