use std::io;
use std::path::{Path, PathBuf};

/// Built-in vertex stage; the fallback when no shader directory is found.
pub const VERTEX_WGSL: &str = include_str!("shaders/vertex.wgsl");

/// Built-in fragment stage.
pub const FRAGMENT_WGSL: &str = include_str!("shaders/fragment.wgsl");

pub const VERTEX_FILE: &str = "vertex.wgsl";
pub const FRAGMENT_FILE: &str = "fragment.wgsl";

/// Source text of both stages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShaderSources {
    pub vertex: String,
    pub fragment: String,
}

impl ShaderSources {
    pub fn builtin() -> Self {
        Self {
            vertex: VERTEX_WGSL.to_owned(),
            fragment: FRAGMENT_WGSL.to_owned(),
        }
    }

    /// Reads `vertex.wgsl` and `fragment.wgsl` from `dir`.
    ///
    /// The error names the file that could not be read.
    pub fn from_dir(dir: &Path) -> Result<Self, (PathBuf, io::Error)> {
        let read = |name: &str| {
            let path = dir.join(name);
            std::fs::read_to_string(&path).map_err(|e| (path, e))
        };

        Ok(Self {
            vertex: read(VERTEX_FILE)?,
            fragment: read(FRAGMENT_FILE)?,
        })
    }
}

impl Default for ShaderSources {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_dir_names_vertex_file() {
        let dir = std::env::temp_dir().join("statemap-no-such-shader-dir");
        let (path, err) = ShaderSources::from_dir(&dir).unwrap_err();
        assert_eq!(path, dir.join(VERTEX_FILE));
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn reads_both_stages_from_dir() {
        let dir = std::env::temp_dir().join(format!("statemap-shaders-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join(VERTEX_FILE), "// v").unwrap();
        std::fs::write(dir.join(FRAGMENT_FILE), "// f").unwrap();

        let src = ShaderSources::from_dir(&dir).unwrap();
        assert_eq!(src.vertex, "// v");
        assert_eq!(src.fragment, "// f");

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
