use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::geo::SourceError;
use crate::gpu::GpuError;
use crate::shader::ShaderError;

/// Realize failures. Any of them leaves the driver without render state.
#[derive(Debug, Error)]
pub enum InitError {
    #[error("failed to load region `{code}`")]
    Region {
        code: String,
        #[source]
        source: SourceError,
    },

    #[error("failed to read shader source {}", path.display())]
    ShaderSource {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Shader(#[from] ShaderError),

    #[error(transparent)]
    Gpu(#[from] GpuError),

    #[error("frame driver was already realized")]
    AlreadyRealized,
}
