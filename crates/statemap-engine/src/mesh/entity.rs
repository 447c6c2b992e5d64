use std::ops::Range;

use super::color::Rgb;
use super::vertex::{AttributeLayout, Vertex};

/// Index value that restarts a line strip.
pub const PRIMITIVE_RESTART: u32 = u32::MAX;

/// How an entity's vertices are assembled into primitives.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Topology {
    /// Each part is a closed outline.
    LineLoop,
    /// Independent triangles, three vertices each.
    Triangles,
}

/// Which transform set the composer builds for an entity.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum TransformPolicy {
    /// Camera-driven look-at, no model rotation.
    Boundary,
    /// Fixed eye, model spins around Y.
    Background,
}

/// Packed, immutable geometry ready for upload.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawableEntity {
    label: String,
    topology: Topology,
    policy: TransformPolicy,
    layout: AttributeLayout,
    vertices: Vec<Vertex>,
    parts: Vec<Range<u32>>,
}

impl DrawableEntity {
    /// Builds an entity from vertices and the ranges that split them into parts.
    ///
    /// Empty parts are dropped. Panics if a part lies outside `vertices`.
    pub fn new(
        label: impl Into<String>,
        topology: Topology,
        policy: TransformPolicy,
        vertices: Vec<Vertex>,
        parts: Vec<Range<u32>>,
    ) -> Self {
        let n = vertices.len() as u32;
        assert!(
            parts.iter().all(|p| p.start <= p.end && p.end <= n),
            "entity parts exceed its {n} vertices"
        );

        Self {
            label: label.into(),
            topology,
            policy,
            layout: AttributeLayout::POSITION_COLOR,
            vertices,
            parts: parts.into_iter().filter(|p| !p.is_empty()).collect(),
        }
    }

    /// Outline of one region: every ring becomes a closed line loop.
    pub fn boundary_outline(
        label: impl Into<String>,
        rings: &[Vec<[f32; 3]>],
        color: impl Fn(usize) -> Rgb,
    ) -> Self {
        pack_parts(rings, color).with_label(label)
    }

    /// The fixed RGB triangle drawn behind the outline.
    pub fn background_mesh() -> Self {
        let vertices = vec![
            Vertex::new([0.0, 0.5, 0.0], Rgb::RED),
            Vertex::new([0.5, -0.5, 0.0], Rgb::GREEN),
            Vertex::new([-0.5, -0.5, 0.0], Rgb::BLUE),
        ];
        Self::new(
            "background",
            Topology::Triangles,
            TransformPolicy::Background,
            vertices,
            vec![0..3],
        )
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn topology(&self) -> Topology {
        self.topology
    }

    pub fn policy(&self) -> TransformPolicy {
        self.policy
    }

    pub fn layout(&self) -> AttributeLayout {
        self.layout
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn parts(&self) -> &[Range<u32>] {
        &self.parts
    }

    pub fn vertex_count(&self) -> u32 {
        self.vertices.len() as u32
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn stride(&self) -> u32 {
        self.layout.stride()
    }

    /// Total byte size of the packed buffer.
    pub fn size(&self) -> u64 {
        self.vertex_count() as u64 * self.stride() as u64
    }

    /// Byte view of the interleaved vertex buffer.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// Strip indices that close every part: `start..end, start, RESTART`.
    ///
    /// Only meaningful for [`Topology::LineLoop`]; a trailing restart is omitted.
    pub fn loop_indices(&self) -> Vec<u32> {
        let mut out = Vec::with_capacity(self.vertices.len() + 2 * self.parts.len());
        for (i, part) in self.parts.iter().enumerate() {
            if i > 0 {
                out.push(PRIMITIVE_RESTART);
            }
            out.extend(part.clone());
            out.push(part.start);
        }
        out
    }
}

/// Packs one projected ring into a single-part boundary outline.
pub fn pack(projected: &[[f32; 3]], color: impl Fn(usize) -> Rgb) -> DrawableEntity {
    pack_parts(&[projected], color)
}

/// Packs several rings into one boundary outline, one part per ring.
///
/// The color assigner sees the global vertex index; order is preserved.
pub fn pack_parts<R>(rings: &[R], color: impl Fn(usize) -> Rgb) -> DrawableEntity
where
    R: AsRef<[[f32; 3]]>,
{
    let total: usize = rings.iter().map(|r| r.as_ref().len()).sum();
    let mut vertices = Vec::with_capacity(total);
    let mut parts = Vec::with_capacity(rings.len());

    for ring in rings {
        let start = vertices.len() as u32;
        for &position in ring.as_ref() {
            let c = color(vertices.len());
            vertices.push(Vertex::new(position, c));
        }
        parts.push(start..vertices.len() as u32);
    }

    DrawableEntity::new(
        "boundary",
        Topology::LineLoop,
        TransformPolicy::Boundary,
        vertices,
        parts,
    )
}
