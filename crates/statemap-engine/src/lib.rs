//! Statemap engine crate.
//!
//! Projects region boundaries into render space, packs them into vertex
//! streams, and draws them with a linked shader program on wgpu.

pub mod coords;
pub mod core;
pub mod device;
pub mod driver;
pub mod geo;
pub mod gpu;
pub mod input;
pub mod logging;
pub mod mesh;
pub mod render;
pub mod shader;
pub mod time;
pub mod transform;
pub mod window;
