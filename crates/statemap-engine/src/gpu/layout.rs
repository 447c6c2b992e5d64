use std::num::NonZeroU64;

use crate::mesh::AttributeLayout;
use crate::shader::{ProgramLocations, UniformSlot};

use super::error::GpuError;

/// Byte size of one `mat4x4<f32>` uniform.
pub const MATRIX_SIZE: u64 = 16 * 4;

/// Vertex format for `components` consecutive `f32`s.
pub fn vertex_format(components: u32) -> Option<wgpu::VertexFormat> {
    match components {
        1 => Some(wgpu::VertexFormat::Float32),
        2 => Some(wgpu::VertexFormat::Float32x2),
        3 => Some(wgpu::VertexFormat::Float32x3),
        4 => Some(wgpu::VertexFormat::Float32x4),
        _ => None,
    }
}

/// Position and color attributes at the program's resolved locations.
pub fn vertex_attributes(
    layout: AttributeLayout,
    locations: &ProgramLocations,
) -> Result<[wgpu::VertexAttribute; 2], GpuError> {
    let format = |components| {
        vertex_format(components).ok_or(GpuError::UnsupportedAttribute { components })
    };

    Ok([
        wgpu::VertexAttribute {
            format: format(layout.position_components)?,
            offset: layout.position_offset() as u64,
            shader_location: locations.position,
        },
        wgpu::VertexAttribute {
            format: format(layout.color_components)?,
            offset: layout.color_offset() as u64,
            shader_location: locations.color,
        },
    ])
}

/// `model`, `view`, `projection` slots, in that order.
pub fn uniform_slots(locations: &ProgramLocations) -> [(&'static str, UniformSlot); 3] {
    [
        ("model", locations.model),
        ("view", locations.view),
        ("projection", locations.projection),
    ]
}

/// Fails unless every transform uniform lives in bind group 0.
pub fn check_uniform_group(locations: &ProgramLocations) -> Result<(), GpuError> {
    for (name, slot) in uniform_slots(locations) {
        if slot.group != 0 {
            return Err(GpuError::UnsupportedUniformGroup {
                name,
                group: slot.group,
            });
        }
    }
    Ok(())
}

pub fn uniform_layout_entries(locations: &ProgramLocations) -> [wgpu::BindGroupLayoutEntry; 3] {
    uniform_slots(locations).map(|(_, slot)| wgpu::BindGroupLayoutEntry {
        binding: slot.binding,
        visibility: wgpu::ShaderStages::VERTEX,
        ty: wgpu::BindingType::Buffer {
            ty: wgpu::BufferBindingType::Uniform,
            has_dynamic_offset: false,
            min_binding_size: NonZeroU64::new(MATRIX_SIZE),
        },
        count: None,
    })
}
