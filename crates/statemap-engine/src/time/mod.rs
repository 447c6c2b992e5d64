//! Time subsystem.
//!
//! - `FrameClock`: one per rendering context; its epoch is the realize time
//! - `RedrawSchedule`: the fixed-rate redraw request driven by the runtime

mod frame_clock;
mod redraw;

pub use frame_clock::{FrameClock, FrameTime};
pub use redraw::{RedrawSchedule, DEFAULT_REDRAW_RATE};
