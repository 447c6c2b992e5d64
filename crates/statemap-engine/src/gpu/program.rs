use crate::mesh::{AttributeLayout, Topology};
use crate::shader::{ProgramLocations, ShaderProgram};

use super::error::GpuError;
use super::layout::{check_uniform_group, uniform_layout_entries, vertex_attributes};

/// GPU side of a linked [`ShaderProgram`]: shader modules, the transform
/// bind-group layout, and one pipeline per topology.
pub struct GpuProgram {
    locations: ProgramLocations,
    layout: AttributeLayout,
    bind_group_layout: wgpu::BindGroupLayout,
    line_loop: wgpu::RenderPipeline,
    triangles: wgpu::RenderPipeline,
}

/// Proof that a program's pipeline is set on the current render pass.
///
/// Only [`GpuProgram::bind`] creates one; uploading transforms requires it.
pub struct BoundProgram<'p> {
    program: &'p GpuProgram,
    topology: Topology,
}

impl<'p> BoundProgram<'p> {
    pub fn program(&self) -> &'p GpuProgram {
        self.program
    }

    pub fn topology(&self) -> Topology {
        self.topology
    }
}

impl GpuProgram {
    pub fn create(
        device: &wgpu::Device,
        program: &ShaderProgram,
        color_format: wgpu::TextureFormat,
        depth_format: wgpu::TextureFormat,
    ) -> Result<Self, GpuError> {
        let locations = program.locations();
        check_uniform_group(&locations)?;

        let layout = AttributeLayout::POSITION_COLOR;
        let attributes = vertex_attributes(layout, &locations)?;

        let vs = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("statemap vertex shader"),
            source: wgpu::ShaderSource::Wgsl(program.vertex().source().into()),
        });
        let fs = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("statemap fragment shader"),
            source: wgpu::ShaderSource::Wgsl(program.fragment().source().into()),
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("statemap transforms bgl"),
            entries: &uniform_layout_entries(&locations),
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("statemap pipeline layout"),
            bind_group_layouts: &[&bind_group_layout],
            immediate_size: 0,
        });

        let buffers = [wgpu::VertexBufferLayout {
            array_stride: layout.stride() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &attributes,
        }];

        let stages = Stages {
            vs: &vs,
            vs_entry: program.vertex().entry_point(),
            fs: &fs,
            fs_entry: program.fragment().entry_point(),
            buffers: &buffers,
            color_format,
            depth_format,
        };

        let line_loop = stages.pipeline(device, &pipeline_layout, Topology::LineLoop);
        let triangles = stages.pipeline(device, &pipeline_layout, Topology::Triangles);

        log::info!("created GPU program ({color_format:?} color, {depth_format:?} depth)");

        Ok(Self {
            locations,
            layout,
            bind_group_layout,
            line_loop,
            triangles,
        })
    }

    pub fn locations(&self) -> &ProgramLocations {
        &self.locations
    }

    /// Vertex layout every uploaded entity must use.
    pub fn layout(&self) -> AttributeLayout {
        self.layout
    }

    pub fn bind_group_layout(&self) -> &wgpu::BindGroupLayout {
        &self.bind_group_layout
    }

    /// Sets the pipeline for `topology` on `pass`.
    pub fn bind<'p>(
        &'p self,
        pass: &mut wgpu::RenderPass<'_>,
        topology: Topology,
    ) -> BoundProgram<'p> {
        let pipeline = match topology {
            Topology::LineLoop => &self.line_loop,
            Topology::Triangles => &self.triangles,
        };
        pass.set_pipeline(pipeline);
        BoundProgram {
            program: self,
            topology,
        }
    }
}

struct Stages<'a> {
    vs: &'a wgpu::ShaderModule,
    vs_entry: &'a str,
    fs: &'a wgpu::ShaderModule,
    fs_entry: &'a str,
    buffers: &'a [wgpu::VertexBufferLayout<'a>],
    color_format: wgpu::TextureFormat,
    depth_format: wgpu::TextureFormat,
}

impl Stages<'_> {
    fn pipeline(
        &self,
        device: &wgpu::Device,
        layout: &wgpu::PipelineLayout,
        topology: Topology,
    ) -> wgpu::RenderPipeline {
        // Line loops are drawn as indexed strips; the restart index separates parts.
        let (label, topology, strip_index_format) = match topology {
            Topology::LineLoop => (
                "statemap line-loop pipeline",
                wgpu::PrimitiveTopology::LineStrip,
                Some(wgpu::IndexFormat::Uint32),
            ),
            Topology::Triangles => (
                "statemap triangle pipeline",
                wgpu::PrimitiveTopology::TriangleList,
                None,
            ),
        };

        device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some(label),
            layout: Some(layout),

            vertex: wgpu::VertexState {
                module: self.vs,
                entry_point: Some(self.vs_entry),
                compilation_options: Default::default(),
                buffers: self.buffers,
            },

            fragment: Some(wgpu::FragmentState {
                module: self.fs,
                entry_point: Some(self.fs_entry),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: self.color_format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),

            primitive: wgpu::PrimitiveState {
                topology,
                strip_index_format,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },

            depth_stencil: Some(wgpu::DepthStencilState {
                format: self.depth_format,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState::default(),

            multiview_mask: None,
            cache: None,
        })
    }
}
