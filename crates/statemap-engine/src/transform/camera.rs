/// Initial eye distance from the map plane.
pub const DEFAULT_DISTANCE: f32 = 300.0;

/// Distance change per scroll notch.
pub const ZOOM_STEP: f32 = 2.0;

/// Pan, in world units per dragged pixel per unit of eye distance.
pub const PAN_SENSITIVITY: f32 = 0.002;

/// Rotation, in radians per dragged pixel.
pub const ROTATE_SENSITIVITY: f32 = 0.005;

/// Interactive camera parameters.
///
/// Only the input handlers mutate this; the composer reads it once per frame.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct CameraState {
    distance: f32,
    pan_x: f32,
    pan_y: f32,
    angle: f32,
}

impl CameraState {
    pub fn new(distance: f32) -> Self {
        Self {
            distance: distance.max(0.0),
            pan_x: 0.0,
            pan_y: 0.0,
            angle: 0.0,
        }
    }

    /// Eye distance; never negative.
    pub fn distance(&self) -> f32 {
        self.distance
    }

    pub fn pan(&self) -> (f32, f32) {
        (self.pan_x, self.pan_y)
    }

    /// Rotation around Y, in radians.
    pub fn angle(&self) -> f32 {
        self.angle
    }

    pub(crate) fn zoom_in(&mut self) {
        self.distance = (self.distance - ZOOM_STEP).max(0.0);
    }

    pub(crate) fn zoom_out(&mut self) {
        self.distance += ZOOM_STEP;
    }

    /// One zoom step per scroll event: up (`dy > 0`) moves closer.
    pub(crate) fn scroll(&mut self, dy: f32) {
        if dy > 0.0 {
            self.zoom_in();
        } else if dy < 0.0 {
            self.zoom_out();
        }
    }

    /// Moves the look-at target so the map follows a drag of `(dx, dy)` pixels.
    pub(crate) fn pan_by(&mut self, dx: f32, dy: f32) {
        let k = PAN_SENSITIVITY * self.distance.max(1.0);
        self.pan_x -= dx * k;
        self.pan_y += dy * k;
    }

    pub(crate) fn rotate_by(&mut self, dx: f32) {
        self.angle += dx * ROTATE_SENSITIVITY;
    }
}

impl Default for CameraState {
    fn default() -> Self {
        Self::new(DEFAULT_DISTANCE)
    }
}
