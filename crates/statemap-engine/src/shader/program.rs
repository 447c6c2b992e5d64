use naga::{
    AddressSpace, Binding, Handle, Module, Scalar, ScalarKind, Type, TypeInner, VectorSize,
};

use super::compile::CompiledShader;
use super::error::{ShaderError, ShaderStage};

/// `(group, binding)` of a uniform variable.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct UniformSlot {
    pub group: u32,
    pub binding: u32,
}

/// Attribute and uniform locations resolved after link.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct ProgramLocations {
    pub position: u32,
    pub color: u32,
    pub model: UniformSlot,
    pub view: UniformSlot,
    pub projection: UniformSlot,
}

/// Linked vertex + fragment pair with resolved locations.
#[derive(Debug)]
pub struct ShaderProgram {
    vertex: CompiledShader,
    fragment: CompiledShader,
    locations: ProgramLocations,
}

impl ShaderProgram {
    pub fn vertex(&self) -> &CompiledShader {
        &self.vertex
    }

    pub fn fragment(&self) -> &CompiledShader {
        &self.fragment
    }

    pub fn locations(&self) -> ProgramLocations {
        self.locations
    }
}

/// Links two compiled stages and resolves the program's locations.
///
/// Fails with `Link` when the stages do not fit together and with
/// `MissingLocation` when a required attribute or uniform is absent.
pub fn link(
    vertex: CompiledShader,
    fragment: CompiledShader,
) -> Result<ShaderProgram, ShaderError> {
    let mut problems = Vec::new();

    if vertex.stage() != ShaderStage::Vertex {
        problems.push(format!("first stage is {}, expected vertex", vertex.stage()));
    }
    if fragment.stage() != ShaderStage::Fragment {
        problems.push(format!("second stage is {}, expected fragment", fragment.stage()));
    }

    let produced = vertex.output_locations();
    for loc in fragment.input_locations().difference(&produced) {
        problems.push(format!(
            "fragment input @location({loc}) is not written by `{}`",
            vertex.entry_point()
        ));
    }

    if !problems.is_empty() {
        return Err(ShaderError::Link {
            log: problems.join("\n"),
        });
    }

    let locations = resolve_locations(&vertex)?;
    log::info!(
        "linked shader program `{}` + `{}`: {locations:?}",
        vertex.entry_point(),
        fragment.entry_point()
    );

    Ok(ShaderProgram {
        vertex,
        fragment,
        locations,
    })
}

fn resolve_locations(vertex: &CompiledShader) -> Result<ProgramLocations, ShaderError> {
    let locations = ProgramLocations {
        position: attribute_location(vertex, "position")?,
        color: attribute_location(vertex, "color")?,
        model: uniform_slot(vertex.module(), "model")?,
        view: uniform_slot(vertex.module(), "view")?,
        projection: uniform_slot(vertex.module(), "projection")?,
    };

    let slots = [
        ("model", locations.model),
        ("view", locations.view),
        ("projection", locations.projection),
    ];
    for (i, (a, sa)) in slots.iter().enumerate() {
        for (b, sb) in &slots[i + 1..] {
            if sa == sb {
                return Err(ShaderError::Link {
                    log: format!(
                        "uniforms `{a}` and `{b}` share @group({}) @binding({})",
                        sa.group, sa.binding
                    ),
                });
            }
        }
    }

    Ok(locations)
}

fn missing(name: &str) -> ShaderError {
    ShaderError::MissingLocation {
        name: name.to_owned(),
    }
}

/// Finds a `vec3<f32>` vertex input called `name`, either as a direct entry
/// point argument or as a member of an input struct.
fn attribute_location(vertex: &CompiledShader, name: &str) -> Result<u32, ShaderError> {
    let module = vertex.module();

    let mut found = None;
    for arg in &vertex.entry().function.arguments {
        match (&arg.binding, &module.types[arg.ty].inner) {
            (Some(Binding::Location { location, .. }), _) if arg.name.as_deref() == Some(name) => {
                found = Some((*location, arg.ty));
            }
            (None, TypeInner::Struct { members, .. }) => {
                for m in members {
                    if let (Some(Binding::Location { location, .. }), Some(n)) =
                        (&m.binding, m.name.as_deref())
                    {
                        if n == name {
                            found = Some((*location, m.ty));
                        }
                    }
                }
            }
            _ => {}
        }
    }

    let (location, ty) = found.ok_or_else(|| missing(name))?;
    if !is_vec3_f32(module, ty) {
        return Err(ShaderError::Link {
            log: format!("attribute `{name}` must be vec3<f32>"),
        });
    }
    Ok(location)
}

fn uniform_slot(module: &Module, name: &str) -> Result<UniformSlot, ShaderError> {
    let (_, var) = module
        .global_variables
        .iter()
        .find(|(_, v)| v.name.as_deref() == Some(name) && v.space == AddressSpace::Uniform)
        .ok_or_else(|| missing(name))?;

    let binding = var.binding.as_ref().ok_or_else(|| missing(name))?;
    if !is_mat4_f32(module, var.ty) {
        return Err(ShaderError::Link {
            log: format!("uniform `{name}` must be mat4x4<f32>"),
        });
    }

    Ok(UniformSlot {
        group: binding.group,
        binding: binding.binding,
    })
}

fn is_f32(scalar: Scalar) -> bool {
    scalar.kind == ScalarKind::Float && scalar.width == 4
}

fn is_vec3_f32(module: &Module, ty: Handle<Type>) -> bool {
    match module.types[ty].inner {
        TypeInner::Vector { size, scalar } => size == VectorSize::Tri && is_f32(scalar),
        _ => false,
    }
}

fn is_mat4_f32(module: &Module, ty: Handle<Type>) -> bool {
    match module.types[ty].inner {
        TypeInner::Matrix {
            columns,
            rows,
            scalar,
        } => columns == VectorSize::Quad && rows == VectorSize::Quad && is_f32(scalar),
        _ => false,
    }
}
