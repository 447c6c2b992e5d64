//! wgpu resources for linked programs and uploaded entities.

mod backend;
mod error;
mod layout;
mod mesh;
mod program;

pub use backend::WgpuBackend;
pub use error::GpuError;
pub use layout::{uniform_slots, vertex_attributes, vertex_format, MATRIX_SIZE};
pub use mesh::{GpuMesh, TransformSlot};
pub use program::{BoundProgram, GpuProgram};
