use bytemuck::{Pod, Zeroable};

use super::color::Rgb;

/// Size in bytes of one `f32` vertex component.
pub const FLOAT_SIZE: u32 = std::mem::size_of::<f32>() as u32;

/// Interleaved vertex: position then color.
#[repr(C)]
#[derive(Debug, Copy, Clone, Default, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub color: [f32; 3],
}

impl Vertex {
    #[inline]
    pub const fn new(position: [f32; 3], color: Rgb) -> Self {
        Self {
            position,
            color: color.to_array(),
        }
    }
}

/// Component counts of the interleaved attributes, and the byte metrics
/// derived from them.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct AttributeLayout {
    pub position_components: u32,
    pub color_components: u32,
}

impl AttributeLayout {
    /// Layout of [`Vertex`]: 3 position floats then 3 color floats.
    pub const POSITION_COLOR: Self = Self {
        position_components: 3,
        color_components: 3,
    };

    #[inline]
    pub const fn components(&self) -> u32 {
        self.position_components + self.color_components
    }

    /// Bytes between consecutive vertices.
    #[inline]
    pub const fn stride(&self) -> u32 {
        self.components() * FLOAT_SIZE
    }

    #[inline]
    pub const fn position_offset(&self) -> u32 {
        0
    }

    #[inline]
    pub const fn color_offset(&self) -> u32 {
        self.position_components * FLOAT_SIZE
    }
}

impl Default for AttributeLayout {
    fn default() -> Self {
        Self::POSITION_COLOR
    }
}
