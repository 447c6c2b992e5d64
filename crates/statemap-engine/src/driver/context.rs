use std::time::{Duration, Instant};

use crate::coords::Viewport;
use crate::transform::CameraState;

/// Everything a driver call reads besides its own scene: camera, viewport
/// and the current frame instant.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct RenderContext {
    pub camera: CameraState,
    pub viewport: Viewport,
    pub now: Instant,
    /// Pixel wheel travel not yet turned into a zoom step.
    pub scroll_residual: f32,
}

impl RenderContext {
    pub fn new(viewport: Viewport, now: Instant) -> Self {
        Self {
            camera: CameraState::default(),
            viewport,
            now,
            scroll_residual: 0.0,
        }
    }

    /// Time since `start`, zero if `start` lies in the future.
    pub fn elapsed_since(&self, start: Instant) -> Duration {
        self.now.saturating_duration_since(start)
    }
}
