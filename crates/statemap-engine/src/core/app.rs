use anyhow::Result;
use winit::event::WindowEvent;

use super::ctx::{FrameCtx, RealizeCtx};

/// Control directive returned by app callbacks.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AppControl {
    Continue,
    Exit,
}

/// Application contract implemented by higher layers.
///
/// Call order: `on_realize` once after the GPU is ready, then `on_frame`
/// per redraw, then `on_unrealize` once before the GPU is torn down.
pub trait App {
    /// Creates GPU resources. An error stops the runtime and is returned
    /// from [`Runtime::run`](crate::window::Runtime::run).
    fn on_realize(&mut self, ctx: &mut RealizeCtx<'_, '_>) -> Result<()>;

    /// Called for raw window events, before the runtime handles them.
    fn on_window_event(&mut self, event: &WindowEvent) -> AppControl {
        let _ = event;
        AppControl::Continue
    }

    /// Called once per rendered frame.
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl;

    /// Releases GPU resources while the device is still alive.
    fn on_unrealize(&mut self) {}
}
