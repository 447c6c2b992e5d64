use std::collections::BTreeSet;

use naga::valid::{Capabilities, ValidationFlags, Validator};
use naga::{Binding, EntryPoint, Handle, Module, Type, TypeInner};

use super::error::{ShaderError, ShaderStage};

/// A validated single-stage WGSL module.
///
/// Consumed by [`link`](super::link); never shared between programs.
#[derive(Debug)]
pub struct CompiledShader {
    stage: ShaderStage,
    source: String,
    module: Module,
    entry: usize,
}

/// Parses and validates `source` as a `stage` shader.
///
/// The error log is the rendered diagnostic and is never empty.
pub fn compile(source: &str, stage: ShaderStage) -> Result<CompiledShader, ShaderError> {
    let module = naga::front::wgsl::parse_str(source).map_err(|e| ShaderError::Compile {
        stage,
        log: non_empty(e.emit_to_string(source), "WGSL parse error"),
    })?;

    Validator::new(ValidationFlags::all(), Capabilities::default())
        .validate(&module)
        .map_err(|e| ShaderError::Compile {
            stage,
            log: non_empty(e.emit_to_string(source), "WGSL validation error"),
        })?;

    let entry = module
        .entry_points
        .iter()
        .position(|ep| ep.stage == stage.to_naga())
        .ok_or_else(|| ShaderError::Compile {
            stage,
            log: format!("no @{stage} entry point in module"),
        })?;

    log::debug!(
        "compiled {stage} shader (entry `{}`)",
        module.entry_points[entry].name
    );

    Ok(CompiledShader {
        stage,
        source: source.to_owned(),
        module,
        entry,
    })
}

fn non_empty(log: String, fallback: &str) -> String {
    if log.trim().is_empty() {
        fallback.to_owned()
    } else {
        log
    }
}

impl CompiledShader {
    pub fn stage(&self) -> ShaderStage {
        self.stage
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn entry_point(&self) -> &str {
        &self.entry().name
    }

    pub(crate) fn module(&self) -> &Module {
        &self.module
    }

    pub(crate) fn entry(&self) -> &EntryPoint {
        &self.module.entry_points[self.entry]
    }

    /// `@location`s read by the entry point.
    pub(crate) fn input_locations(&self) -> BTreeSet<u32> {
        let mut out = BTreeSet::new();
        for arg in &self.entry().function.arguments {
            collect_locations(&self.module, arg.binding.as_ref(), arg.ty, &mut out);
        }
        out
    }

    /// `@location`s written by the entry point.
    pub(crate) fn output_locations(&self) -> BTreeSet<u32> {
        let mut out = BTreeSet::new();
        if let Some(result) = &self.entry().function.result {
            collect_locations(&self.module, result.binding.as_ref(), result.ty, &mut out);
        }
        out
    }
}

fn collect_locations(
    module: &Module,
    binding: Option<&Binding>,
    ty: Handle<Type>,
    out: &mut BTreeSet<u32>,
) {
    match binding {
        Some(Binding::Location { location, .. }) => {
            out.insert(*location);
        }
        Some(Binding::BuiltIn(_)) => {}
        None => {
            if let TypeInner::Struct { members, .. } = &module.types[ty].inner {
                for m in members {
                    collect_locations(module, m.binding.as_ref(), m.ty, out);
                }
            }
        }
    }
}
