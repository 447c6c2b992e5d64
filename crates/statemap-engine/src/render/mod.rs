//! Per-frame render handles passed from the runtime to the application.
//!
//! Projection and camera math stay on the CPU (`transform`); this module only
//! carries the wgpu objects a frame is recorded with.

mod ctx;

pub use ctx::{RenderCtx, RenderTarget};
