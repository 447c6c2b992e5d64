use wgpu::util::DeviceExt;

use crate::mesh::{DrawableEntity, Topology};
use crate::transform::Transforms;

use super::error::GpuError;
use super::layout::{uniform_slots, MATRIX_SIZE};
use super::program::{BoundProgram, GpuProgram};

/// One entity's GPU resources.
///
/// Entities without vertices upload nothing and draw nothing.
pub struct GpuMesh {
    label: String,
    topology: Topology,
    resident: Option<Resident>,
}

struct Resident {
    vertices: wgpu::Buffer,
    vertex_count: u32,
    indices: Option<(wgpu::Buffer, u32)>,
    transforms: TransformSlot,
}

/// Per-entity `model`/`view`/`projection` uniform buffers and their bind group.
pub struct TransformSlot {
    model: wgpu::Buffer,
    view: wgpu::Buffer,
    projection: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
}

impl TransformSlot {
    pub fn new(device: &wgpu::Device, program: &GpuProgram, label: &str) -> Self {
        let buffer = |name: &str| {
            device.create_buffer(&wgpu::BufferDescriptor {
                label: Some(&format!("statemap {label} {name} ubo")),
                size: MATRIX_SIZE,
                usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
                mapped_at_creation: false,
            })
        };

        let model = buffer("model");
        let view = buffer("view");
        let projection = buffer("projection");

        let [m, v, p] = uniform_slots(program.locations()).map(|(_, slot)| slot.binding);
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(&format!("statemap {label} transforms")),
            layout: program.bind_group_layout(),
            entries: &[
                wgpu::BindGroupEntry {
                    binding: m,
                    resource: model.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: v,
                    resource: view.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: p,
                    resource: projection.as_entire_binding(),
                },
            ],
        });

        Self {
            model,
            view,
            projection,
            bind_group,
        }
    }

    /// Writes `transforms`, converting the projection to wgpu clip space.
    pub fn write(&self, queue: &wgpu::Queue, _bound: &BoundProgram<'_>, transforms: &Transforms) {
        let t = transforms.to_wgpu_clip();
        queue.write_buffer(&self.model, 0, bytemuck::bytes_of(&t.model.to_cols_array()));
        queue.write_buffer(&self.view, 0, bytemuck::bytes_of(&t.view.to_cols_array()));
        queue.write_buffer(
            &self.projection,
            0,
            bytemuck::bytes_of(&t.projection.to_cols_array()),
        );
    }

    fn destroy(&self) {
        self.model.destroy();
        self.view.destroy();
        self.projection.destroy();
    }
}

impl GpuMesh {
    /// Uploads `entity` for drawing with `program`.
    pub fn upload(
        device: &wgpu::Device,
        program: &GpuProgram,
        entity: &DrawableEntity,
    ) -> Result<Self, GpuError> {
        let label = entity.label().to_owned();
        let topology = entity.topology();

        if entity.is_empty() {
            log::debug!("entity `{label}` has no vertices; nothing uploaded");
            return Ok(Self {
                label,
                topology,
                resident: None,
            });
        }

        if entity.stride() == 0 {
            return Err(GpuError::InvalidLayout {
                label,
                vertex_count: entity.vertex_count(),
            });
        }
        if entity.layout() != program.layout() {
            return Err(GpuError::LayoutMismatch {
                label,
                expected: program.layout(),
                found: entity.layout(),
            });
        }

        let bytes = entity.as_bytes();
        debug_assert_eq!(bytes.len() as u64, entity.size());

        let vertices = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("statemap {label} vbo")),
            contents: bytes,
            usage: wgpu::BufferUsages::VERTEX,
        });

        let indices = match topology {
            Topology::LineLoop => {
                let idx = entity.loop_indices();
                let buf = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                    label: Some(&format!("statemap {label} ibo")),
                    contents: bytemuck::cast_slice(&idx),
                    usage: wgpu::BufferUsages::INDEX,
                });
                Some((buf, idx.len() as u32))
            }
            Topology::Triangles => None,
        };

        let transforms = TransformSlot::new(device, program, &label);

        log::info!(
            "uploaded `{label}`: {} vertices, {} bytes, stride {}",
            entity.vertex_count(),
            entity.size(),
            entity.stride()
        );

        Ok(Self {
            label,
            topology,
            resident: Some(Resident {
                vertices,
                vertex_count: entity.vertex_count(),
                indices,
                transforms,
            }),
        })
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn topology(&self) -> Topology {
        self.topology
    }

    /// Uploads transforms and records the draw. No-op for empty meshes.
    pub fn draw(
        &self,
        queue: &wgpu::Queue,
        pass: &mut wgpu::RenderPass<'_>,
        bound: &BoundProgram<'_>,
        transforms: &Transforms,
    ) {
        let Some(r) = &self.resident else { return };
        debug_assert_eq!(bound.topology(), self.topology);

        r.transforms.write(queue, bound, transforms);

        pass.set_bind_group(0, &r.transforms.bind_group, &[]);
        pass.set_vertex_buffer(0, r.vertices.slice(..));
        match &r.indices {
            Some((ibo, count)) => {
                pass.set_index_buffer(ibo.slice(..), wgpu::IndexFormat::Uint32);
                pass.draw_indexed(0..*count, 0, 0..1);
            }
            None => pass.draw(0..r.vertex_count, 0..1),
        }
    }

    /// Frees the GPU buffers now instead of waiting for drop.
    pub fn release(self) {
        if let Some(r) = self.resident {
            r.vertices.destroy();
            if let Some((ibo, _)) = &r.indices {
                ibo.destroy();
            }
            r.transforms.destroy();
        }
        log::debug!("released `{}`", self.label);
    }
}
