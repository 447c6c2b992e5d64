//! Camera state and per-frame model/view/projection composition.
//!
//! Matrices are composed in OpenGL clip convention with `glam`; conversion
//! to wgpu's depth range happens only when they are uploaded.

mod camera;
mod composer;

pub use camera::{CameraState, DEFAULT_DISTANCE, PAN_SENSITIVITY, ROTATE_SENSITIVITY, ZOOM_STEP};
pub use composer::{
    compose, model_angle, Transforms, BACKGROUND_EYE, BACKGROUND_FOV_DEG, BACKGROUND_UP,
    BOUNDARY_FOV_DEG, DEFAULT_SPIN_RATE, FAR_PLANE, GL_TO_WGPU_CLIP, NEAR_PLANE,
};
