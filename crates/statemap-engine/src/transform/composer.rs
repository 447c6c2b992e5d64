use std::f32::consts::PI;

use glam::{Mat4, Vec3};

use crate::coords::Viewport;
use crate::mesh::TransformPolicy;

use super::camera::CameraState;

pub const NEAR_PLANE: f32 = 0.1;

/// Far plane passed to the perspective builder.
///
/// Negative on purpose: the rendered depth range depends on it, so it is kept
/// exactly as the viewer has always used it.
pub const FAR_PLANE: f32 = -1.0;

pub const BOUNDARY_FOV_DEG: f32 = 90.0;
pub const BACKGROUND_FOV_DEG: f32 = 40.0;

pub const BACKGROUND_EYE: Vec3 = Vec3::new(0.0, 1.0, 2.0);
pub const BACKGROUND_UP: Vec3 = Vec3::new(0.0, 100.0, 0.0);

/// Background spin, in radians per second (180°/s).
pub const DEFAULT_SPIN_RATE: f32 = PI;

/// Maps OpenGL clip space (`z ∈ [-w, w]`) to wgpu clip space (`z ∈ [0, w]`).
#[rustfmt::skip]
pub const GL_TO_WGPU_CLIP: Mat4 = Mat4::from_cols_array(&[
    1.0, 0.0, 0.0, 0.0,
    0.0, 1.0, 0.0, 0.0,
    0.0, 0.0, 0.5, 0.0,
    0.0, 0.0, 0.5, 1.0,
]);

/// One entity's model, view and projection for the current frame.
///
/// All three are in OpenGL convention; see [`Transforms::to_wgpu_clip`].
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Transforms {
    pub model: Mat4,
    pub view: Mat4,
    pub projection: Mat4,
}

impl Transforms {
    /// Same transforms with the projection remapped to wgpu's depth range.
    pub fn to_wgpu_clip(self) -> Self {
        Self {
            projection: GL_TO_WGPU_CLIP * self.projection,
            ..self
        }
    }

    /// `projection * view * model`.
    pub fn mvp(&self) -> Mat4 {
        self.projection * self.view * self.model
    }
}

/// Model rotation for an entity at `elapsed` seconds since realize.
pub fn model_angle(
    policy: TransformPolicy,
    camera: &CameraState,
    elapsed: f32,
    spin_rate: f32,
) -> f32 {
    match policy {
        TransformPolicy::Boundary => 0.0,
        TransformPolicy::Background => camera.angle() + spin_rate * elapsed,
    }
}

/// Builds the transforms for one entity.
///
/// A camera at distance 0 with no pan sits on its own target; the view is
/// then undefined (NaN) and nothing is drawn for that frame.
pub fn compose(
    policy: TransformPolicy,
    camera: &CameraState,
    viewport: Viewport,
    angle: f32,
) -> Transforms {
    let aspect = viewport.aspect_ratio();
    let model = Mat4::from_rotation_y(angle);

    match policy {
        TransformPolicy::Boundary => {
            let (pan_x, pan_y) = camera.pan();
            Transforms {
                model,
                view: Mat4::look_at_rh(
                    Vec3::new(0.0, 0.0, camera.distance()),
                    Vec3::new(pan_x, pan_y, 0.0),
                    Vec3::Y,
                ),
                projection: Mat4::perspective_rh_gl(
                    BOUNDARY_FOV_DEG.to_radians(),
                    aspect,
                    NEAR_PLANE,
                    FAR_PLANE,
                ),
            }
        }
        TransformPolicy::Background => Transforms {
            model,
            view: Mat4::look_at_rh(BACKGROUND_EYE, Vec3::ZERO, BACKGROUND_UP),
            projection: Mat4::perspective_rh_gl(
                BACKGROUND_FOV_DEG.to_radians(),
                aspect,
                NEAR_PLANE,
                FAR_PLANE,
            ),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec4;

    fn assert_close(a: f32, b: f32, eps: f32) {
        let diff = (a - b).abs();
        assert!(diff <= eps, "expected {a} ~= {b} (diff {diff})");
    }

    fn assert_mat_close(a: Mat4, b: Mat4, eps: f32) {
        for (x, y) in a.to_cols_array().iter().zip(b.to_cols_array()) {
            assert_close(*x, y, eps);
        }
    }

    #[test]
    fn negative_far_plane_terms_are_pinned() {
        let t = compose(
            TransformPolicy::Boundary,
            &CameraState::default(),
            Viewport::new(800.0, 600.0),
            0.0,
        );
        let p = t.projection;

        // f = 1 / tan(45°) = 1
        assert_close(p.y_axis.y, 1.0, 1e-6);
        assert_close(p.x_axis.x, 600.0 / 800.0, 1e-6);
        // (near + far) / (near - far) and 2·near·far / (near - far)
        assert_close(p.z_axis.z, -0.9 / 1.1, 1e-6);
        assert_close(p.w_axis.z, -0.2 / 1.1, 1e-6);
        assert_eq!(p.z_axis.w, -1.0);
        assert_eq!(p.w_axis.w, 0.0);
    }

    #[test]
    fn background_uses_narrow_fov() {
        let t = compose(
            TransformPolicy::Background,
            &CameraState::default(),
            Viewport::new(100.0, 100.0),
            0.0,
        );
        let f = 1.0 / 20f32.to_radians().tan();
        assert_close(t.projection.y_axis.y, f, 1e-5);
        assert_close(t.projection.x_axis.x, f, 1e-5);
    }

    #[test]
    fn exaggerated_up_matches_unit_up() {
        let a = Mat4::look_at_rh(BACKGROUND_EYE, Vec3::ZERO, BACKGROUND_UP);
        let b = Mat4::look_at_rh(BACKGROUND_EYE, Vec3::ZERO, Vec3::Y);
        assert_mat_close(a, b, 1e-6);
    }

    #[test]
    fn boundary_view_looks_at_pan_target() {
        let mut cam = CameraState::new(50.0);
        cam.pan_by(-100.0, 0.0);
        let (pan_x, _) = cam.pan();

        let t = compose(TransformPolicy::Boundary, &cam, Viewport::new(640.0, 480.0), 0.0);
        let eye = t.view.transform_point3(Vec3::new(0.0, 0.0, 50.0));
        assert_close(eye.length(), 0.0, 1e-4);

        // The target lies straight ahead on -Z in view space.
        let target = t.view.transform_point3(Vec3::new(pan_x, 0.0, 0.0));
        assert_close(target.x, 0.0, 1e-4);
        assert_close(target.y, 0.0, 1e-4);
        assert!(target.z < 0.0);
    }

    #[test]
    fn boundary_model_is_identity() {
        let cam = CameraState::default();
        let angle = model_angle(TransformPolicy::Boundary, &cam, 12.0, DEFAULT_SPIN_RATE);
        assert_eq!(angle, 0.0);
        let t = compose(TransformPolicy::Boundary, &cam, Viewport::new(1.0, 1.0), angle);
        assert_eq!(t.model, Mat4::IDENTITY);
    }

    #[test]
    fn background_spins_with_time_and_camera() {
        let mut cam = CameraState::default();
        cam.rotate_by(100.0);
        let angle = model_angle(TransformPolicy::Background, &cam, 0.5, DEFAULT_SPIN_RATE);
        assert_close(angle, cam.angle() + PI / 2.0, 1e-6);

        let t = compose(TransformPolicy::Background, &cam, Viewport::new(1.0, 1.0), angle);
        assert_mat_close(t.model, Mat4::from_rotation_y(angle), 1e-6);
    }

    #[test]
    fn aspect_uses_float_division() {
        let t = compose(
            TransformPolicy::Boundary,
            &CameraState::default(),
            Viewport::new(1000.0, 600.0),
            0.0,
        );
        assert_close(t.projection.x_axis.x, 0.6, 1e-6);
    }

    #[test]
    fn zero_distance_without_pan_is_degenerate() {
        let t = compose(
            TransformPolicy::Boundary,
            &CameraState::new(0.0),
            Viewport::new(800.0, 600.0),
            0.0,
        );
        assert!(t.view.is_nan());
    }

    #[test]
    fn clip_conversion_remaps_depth_only() {
        let t = compose(
            TransformPolicy::Boundary,
            &CameraState::default(),
            Viewport::new(800.0, 600.0),
            0.0,
        );
        let gl = t.projection * Vec4::new(3.0, -2.0, -5.0, 1.0);
        let wg = t.to_wgpu_clip().projection * Vec4::new(3.0, -2.0, -5.0, 1.0);

        assert_close(wg.x, gl.x, 1e-6);
        assert_close(wg.y, gl.y, 1e-6);
        assert_close(wg.w, gl.w, 1e-6);
        assert_close(wg.z, 0.5 * gl.z + 0.5 * gl.w, 1e-5);
        assert_eq!(t.to_wgpu_clip().view, t.view);
    }
}
