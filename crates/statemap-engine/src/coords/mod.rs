//! Screen-space types shared by the runtime and the transform composer.

mod viewport;

pub use viewport::Viewport;
