use crate::gpu::GpuError;
use crate::mesh::{DrawableEntity, Rgb};
use crate::shader::ShaderProgram;
use crate::transform::Transforms;

/// One entity to draw this frame, with its freshly composed transforms.
#[derive(Debug)]
pub struct DrawCall<'a, M> {
    pub label: &'a str,
    pub mesh: &'a M,
    pub transforms: Transforms,
}

/// GPU operations the frame driver needs.
///
/// `WgpuBackend` is the real implementation; keeping this seam lets the
/// driver lifecycle run without a device.
pub trait RenderBackend {
    /// GPU-side program handle.
    type Program;
    /// GPU-side entity handle.
    type Mesh;
    /// Per-frame recording target.
    type Target<'t>;

    fn create_program(&mut self, program: &ShaderProgram) -> Result<Self::Program, GpuError>;

    fn upload(
        &mut self,
        program: &Self::Program,
        entity: &DrawableEntity,
    ) -> Result<Self::Mesh, GpuError>;

    /// Clears color and depth, then draws `draws` in order with `program`.
    fn draw_frame(
        &mut self,
        target: &mut Self::Target<'_>,
        clear: Rgb,
        program: &Self::Program,
        draws: &[DrawCall<'_, Self::Mesh>],
    );

    fn release_mesh(&mut self, mesh: Self::Mesh);

    fn release_program(&mut self, program: Self::Program);
}
