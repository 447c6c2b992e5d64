//! Vertex packing: projected positions plus per-vertex color into an
//! interleaved, upload-ready buffer.
//!
//! Layout per vertex is `position: vec3<f32>` then `color: vec3<f32>`.

mod color;
mod entity;
mod vertex;

pub use color::{constant, gradient, Rgb};
pub use entity::{pack, pack_parts, DrawableEntity, Topology, TransformPolicy, PRIMITIVE_RESTART};
pub use vertex::{AttributeLayout, Vertex, FLOAT_SIZE};
