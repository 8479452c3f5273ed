use serde::{Deserialize, Serialize};

/// Linear RGB colour, components in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgb(pub f32, pub f32, pub f32);

/// How a presenter should draw one named surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SurfaceStyle {
    pub color: Rgb,
    /// 0.0 is fully opaque, 1.0 fully transparent.
    pub transparency: f32,
}

impl SurfaceStyle {
    pub const SOCKET: Self = Self {
        color: Rgb(1.0, 0.6, 0.2),
        transparency: 0.5,
    };

    pub const BALL: Self = Self {
        color: Rgb(0.8, 0.8, 0.8),
        transparency: 0.4,
    };
}
