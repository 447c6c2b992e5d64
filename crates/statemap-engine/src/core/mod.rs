//! Core engine-facing contracts.
//!
//! Defines the interface between the runtime (platform loop) and the
//! application, with one context type per callback.

mod app;
mod ctx;

pub use app::{App, AppControl};
pub use ctx::{FrameCtx, RealizeCtx};
