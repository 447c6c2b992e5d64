//! Shader program management.
//!
//! WGSL sources are parsed and validated on the CPU with `naga` (the same
//! front-end wgpu uses), linked by matching inter-stage locations, and
//! reflected to find the attribute and uniform slots the GPU binder needs.

mod builtin;
mod compile;
mod error;
mod program;

pub use builtin::{ShaderSources, FRAGMENT_FILE, FRAGMENT_WGSL, VERTEX_FILE, VERTEX_WGSL};
pub use compile::{compile, CompiledShader};
pub use error::{ShaderError, ShaderStage};
pub use program::{link, ProgramLocations, ShaderProgram, UniformSlot};
