use crate::driver::{DrawCall, RenderBackend};
use crate::mesh::{DrawableEntity, Rgb};
use crate::render::{RenderCtx, RenderTarget};
use crate::shader::ShaderProgram;

use super::error::GpuError;
use super::mesh::GpuMesh;
use super::program::GpuProgram;

/// [`RenderBackend`] backed by a wgpu device.
///
/// Device and queue are reference-counted handles, so the backend can outlive
/// the per-frame [`RenderCtx`] it was created from.
pub struct WgpuBackend {
    device: wgpu::Device,
    queue: wgpu::Queue,
    color_format: wgpu::TextureFormat,
    depth_format: wgpu::TextureFormat,
}

impl WgpuBackend {
    pub fn new(ctx: &RenderCtx<'_>) -> Self {
        Self {
            device: ctx.device.clone(),
            queue: ctx.queue.clone(),
            color_format: ctx.surface_format,
            depth_format: ctx.depth_format,
        }
    }

    pub fn color_format(&self) -> wgpu::TextureFormat {
        self.color_format
    }
}

impl RenderBackend for WgpuBackend {
    type Program = GpuProgram;
    type Mesh = GpuMesh;
    type Target<'t> = RenderTarget<'t>;

    fn create_program(&mut self, program: &ShaderProgram) -> Result<GpuProgram, GpuError> {
        GpuProgram::create(&self.device, program, self.color_format, self.depth_format)
    }

    fn upload(
        &mut self,
        program: &GpuProgram,
        entity: &DrawableEntity,
    ) -> Result<GpuMesh, GpuError> {
        GpuMesh::upload(&self.device, program, entity)
    }

    fn draw_frame(
        &mut self,
        target: &mut RenderTarget<'_>,
        clear: Rgb,
        program: &GpuProgram,
        draws: &[DrawCall<'_, GpuMesh>],
    ) {
        let mut pass = target.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("statemap frame"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target.color_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(wgpu::Color {
                        r: clear.r as f64,
                        g: clear.g as f64,
                        b: clear.b as f64,
                        a: 1.0,
                    }),
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: target.depth_view,
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Clear(1.0),
                    store: wgpu::StoreOp::Store,
                }),
                stencil_ops: None,
            }),
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        for draw in draws {
            let bound = program.bind(&mut pass, draw.mesh.topology());
            draw.mesh.draw(&self.queue, &mut pass, &bound, &draw.transforms);
        }
    }

    fn release_mesh(&mut self, mesh: GpuMesh) {
        mesh.release();
    }

    fn release_program(&mut self, program: GpuProgram) {
        drop(program);
        log::debug!("released GPU program");
    }
}
