//! Frame driver: realize / render / unrealize over a [`RenderBackend`], plus
//! the input handlers that update the camera.
//!
//! Per frame: clear, bind program, compose and upload transforms, draw each
//! entity, flush. Lifecycle errors surface as [`InitError`].

mod backend;
mod context;
mod error;
mod input;
mod scene;

pub use backend::{DrawCall, RenderBackend};
pub use context::RenderContext;
pub use error::InitError;
pub use input::{apply_input, SCROLL_PIXELS_PER_STEP};
pub use scene::{
    FrameDriver, FrameStats, RenderOutcome, Scene, SceneConfig, SceneRequest, ShaderOrigin,
};
