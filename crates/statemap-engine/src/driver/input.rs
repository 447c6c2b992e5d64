use crate::input::{
    InputEvent, KeyState, MouseButton, MouseButtonState, MouseWheelDelta, PointerButtonEvent,
    PointerDragEvent,
};

use super::context::RenderContext;

/// Logical pixels of smooth-scroll travel worth one wheel notch.
pub const SCROLL_PIXELS_PER_STEP: f32 = 20.0;

/// Applies one input event to the camera.
///
/// Scroll zooms: one step per line notch, or per [`SCROLL_PIXELS_PER_STEP`]
/// of accumulated pixel travel. Primary drag pans, secondary drag rotates.
/// Key and button presses are only logged. GPU state is never touched.
pub fn apply_input(ctx: &mut RenderContext, event: &InputEvent) {
    match event {
        InputEvent::MouseWheel { delta, .. } => {
            match *delta {
                MouseWheelDelta::Line { y, .. } => ctx.camera.scroll(y),
                MouseWheelDelta::Pixel { y, .. } => {
                    ctx.scroll_residual += y;
                    while ctx.scroll_residual.abs() >= SCROLL_PIXELS_PER_STEP {
                        let step = SCROLL_PIXELS_PER_STEP.copysign(ctx.scroll_residual);
                        ctx.camera.scroll(step);
                        ctx.scroll_residual -= step;
                    }
                }
            }
            log::trace!("scroll {delta:?}: distance {}", ctx.camera.distance());
        }

        InputEvent::PointerDragged(PointerDragEvent { button, dx, dy }) => match button {
            MouseButton::Left => ctx.camera.pan_by(*dx, *dy),
            MouseButton::Right => ctx.camera.rotate_by(*dx),
            _ => {}
        },

        InputEvent::Key {
            key,
            state: KeyState::Pressed,
            repeat: false,
            ..
        } => log::info!("key pressed: {key}"),

        InputEvent::PointerButton(PointerButtonEvent {
            button,
            state: MouseButtonState::Pressed,
            x,
            y,
            ..
        }) => log::info!("pointer {button:?} pressed at ({x:.1}, {y:.1})"),

        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    use crate::coords::Viewport;
    use crate::input::{Key, Modifiers};

    fn ctx() -> RenderContext {
        RenderContext::new(Viewport::new(800.0, 600.0), Instant::now())
    }

    fn wheel(y: f32) -> InputEvent {
        InputEvent::MouseWheel {
            delta: MouseWheelDelta::Line { x: 0.0, y },
            modifiers: Modifiers::default(),
        }
    }

    #[test]
    fn wheel_up_zooms_in_and_down_zooms_out() {
        let mut c = ctx();
        apply_input(&mut c, &wheel(1.0));
        assert_eq!(c.camera.distance(), 298.0);
        apply_input(&mut c, &wheel(-1.0));
        apply_input(&mut c, &wheel(-1.0));
        assert_eq!(c.camera.distance(), 302.0);
    }

    fn pixel_wheel(y: f32) -> InputEvent {
        InputEvent::MouseWheel {
            delta: MouseWheelDelta::Pixel { x: 0.0, y },
            modifiers: Modifiers::default(),
        }
    }

    #[test]
    fn pixel_scroll_steps_per_accumulated_notch() {
        let mut c = ctx();
        for _ in 0..40 {
            apply_input(&mut c, &pixel_wheel(0.5));
        }
        assert_eq!(c.camera.distance(), 298.0);
        assert_eq!(c.scroll_residual, 0.0);

        apply_input(&mut c, &pixel_wheel(-15.0));
        assert_eq!(c.camera.distance(), 298.0);
        apply_input(&mut c, &pixel_wheel(-45.0));
        assert_eq!(c.camera.distance(), 304.0);
        assert_eq!(c.scroll_residual, 0.0);
    }

    #[test]
    fn thousand_zoom_ins_never_go_negative() {
        let mut c = ctx();
        for _ in 0..1000 {
            apply_input(&mut c, &wheel(1.0));
            assert!(c.camera.distance() >= 0.0);
        }
        assert_eq!(c.camera.distance(), 0.0);
    }

    #[test]
    fn drags_pan_and_rotate_by_button() {
        let mut c = ctx();
        apply_input(
            &mut c,
            &InputEvent::PointerDragged(PointerDragEvent {
                button: MouseButton::Left,
                dx: 10.0,
                dy: 0.0,
            }),
        );
        assert!(c.camera.pan().0 < 0.0);
        assert_eq!(c.camera.angle(), 0.0);

        apply_input(
            &mut c,
            &InputEvent::PointerDragged(PointerDragEvent {
                button: MouseButton::Right,
                dx: 10.0,
                dy: 0.0,
            }),
        );
        assert!(c.camera.angle() > 0.0);

        let before = c.camera;
        apply_input(
            &mut c,
            &InputEvent::PointerDragged(PointerDragEvent {
                button: MouseButton::Middle,
                dx: 10.0,
                dy: 10.0,
            }),
        );
        assert_eq!(c.camera, before);
    }

    #[test]
    fn presses_leave_camera_alone() {
        let mut c = ctx();
        let before = c.camera;
        apply_input(
            &mut c,
            &InputEvent::Key {
                key: Key::Space,
                state: KeyState::Pressed,
                modifiers: Modifiers::default(),
                code: 0,
                repeat: false,
            },
        );
        apply_input(
            &mut c,
            &InputEvent::PointerButton(PointerButtonEvent {
                button: MouseButton::Left,
                state: MouseButtonState::Pressed,
                x: 1.0,
                y: 2.0,
                modifiers: Modifiers::default(),
            }),
        );
        assert_eq!(c.camera, before);
    }
}
