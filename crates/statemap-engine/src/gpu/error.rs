use thiserror::Error;

use crate::mesh::AttributeLayout;

/// Failures while creating GPU-side program state or uploading an entity.
///
/// All of these abort realize.
#[derive(Debug, Error)]
pub enum GpuError {
    #[error("entity `{label}` has {vertex_count} vertices but a zero stride")]
    InvalidLayout { label: String, vertex_count: u32 },

    #[error("entity `{label}` uses {found:?}, the program was built for {expected:?}")]
    LayoutMismatch {
        label: String,
        expected: AttributeLayout,
        found: AttributeLayout,
    },

    #[error("no vertex format holds {components} f32 components")]
    UnsupportedAttribute { components: u32 },

    #[error("uniform `{name}` is bound in group {group}; only group 0 is supported")]
    UnsupportedUniformGroup { name: &'static str, group: u32 },
}
