use std::path::PathBuf;
use std::time::Instant;

use crate::geo::{project_parts, ProjectionMode, RegionSource};
use crate::mesh::{constant, DrawableEntity, Rgb, TransformPolicy};
use crate::shader::{compile, link, ShaderSources, ShaderStage};
use crate::transform::{compose, model_angle, DEFAULT_SPIN_RATE};

use super::backend::{DrawCall, RenderBackend};
use super::context::RenderContext;
use super::error::InitError;

/// Static scene options.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneConfig {
    pub projection: ProjectionMode,
    /// Outline color; `None` picks the projection's default.
    pub outline_color: Option<Rgb>,
    pub clear_color: Rgb,
    /// Draw the spinning RGB triangle behind the outline.
    pub background: bool,
    /// Background spin in radians per second.
    pub spin_rate: f32,
}

impl SceneConfig {
    pub fn outline_color(&self) -> Rgb {
        self.outline_color.unwrap_or(match self.projection {
            ProjectionMode::PlateCarree => Rgb::YELLOW,
            ProjectionMode::WebMercator { .. } => Rgb::GREEN,
            ProjectionMode::Ecef => Rgb::DARK_BLUE,
        })
    }
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            projection: ProjectionMode::default(),
            outline_color: None,
            clear_color: Rgb::BLACK,
            background: false,
            spin_rate: DEFAULT_SPIN_RATE,
        }
    }
}

/// Where realize reads shader sources from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShaderOrigin {
    Builtin,
    /// Read from this directory; a missing directory falls back to the
    /// built-in sources, an unreadable file is an error.
    Directory(PathBuf),
}

impl ShaderOrigin {
    fn load(&self) -> Result<ShaderSources, InitError> {
        match self {
            ShaderOrigin::Builtin => Ok(ShaderSources::builtin()),
            ShaderOrigin::Directory(dir) if !dir.is_dir() => {
                log::info!(
                    "shader directory {} not found; using built-in shaders",
                    dir.display()
                );
                Ok(ShaderSources::builtin())
            }
            ShaderOrigin::Directory(dir) => {
                log::info!("reading shaders from {}", dir.display());
                ShaderSources::from_dir(dir)
                    .map_err(|(path, source)| InitError::ShaderSource { path, source })
            }
        }
    }
}

/// What to realize: one region code and the shader origin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SceneRequest {
    pub region: String,
    pub shaders: ShaderOrigin,
}

impl SceneRequest {
    pub fn new(region: impl Into<String>) -> Self {
        Self {
            region: region.into(),
            shaders: ShaderOrigin::Builtin,
        }
    }

    pub fn with_shaders(mut self, shaders: ShaderOrigin) -> Self {
        self.shaders = shaders;
        self
    }
}

/// Counts for one rendered frame.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct FrameStats {
    pub draw_calls: u32,
    pub vertices: u32,
}

/// Outcome of a render request.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum RenderOutcome {
    Rendered(FrameStats),
    /// The driver holds no scene (not realized yet, or already unrealized).
    Rejected,
}

struct SceneEntity<M> {
    label: String,
    policy: TransformPolicy,
    vertex_count: u32,
    mesh: M,
}

/// Realized render state: one program and its uploaded entities.
pub struct Scene<B: RenderBackend> {
    program: B::Program,
    entities: Vec<SceneEntity<B::Mesh>>,
    clear_color: Rgb,
    spin_rate: f32,
    started: Instant,
}

impl<B: RenderBackend> Scene<B> {
    /// Loads and projects the region, links the shaders and uploads every entity.
    ///
    /// On failure everything created so far is released before returning.
    pub fn realize(
        backend: &mut B,
        ctx: &RenderContext,
        source: &dyn RegionSource,
        config: &SceneConfig,
        request: &SceneRequest,
    ) -> Result<Self, InitError> {
        let code = request.region.as_str();
        let region = source
            .load_region(code)
            .map_err(|source| InitError::Region {
                code: code.to_owned(),
                source,
            })?;
        log::info!(
            "region `{code}`: {} rings, {} points",
            region.rings.len(),
            region.point_count()
        );

        let rings = project_parts(&region.rings, config.projection);
        let outline =
            DrawableEntity::boundary_outline(code, &rings, constant(config.outline_color()));

        let mut entities = Vec::with_capacity(2);
        if config.background {
            entities.push(DrawableEntity::background_mesh());
        }
        entities.push(outline);

        let sources = request.shaders.load()?;
        let vertex = compile(&sources.vertex, ShaderStage::Vertex)?;
        let fragment = compile(&sources.fragment, ShaderStage::Fragment)?;
        let program = link(vertex, fragment)?;

        let program = backend.create_program(&program)?;

        let mut uploaded = Vec::with_capacity(entities.len());
        for entity in &entities {
            match backend.upload(&program, entity) {
                Ok(mesh) => uploaded.push(SceneEntity {
                    label: entity.label().to_owned(),
                    policy: entity.policy(),
                    vertex_count: entity.vertex_count(),
                    mesh,
                }),
                Err(e) => {
                    for done in uploaded {
                        backend.release_mesh(done.mesh);
                    }
                    backend.release_program(program);
                    return Err(e.into());
                }
            }
        }

        log::info!("realized scene with {} entities", uploaded.len());

        Ok(Self {
            program,
            entities: uploaded,
            clear_color: config.clear_color,
            spin_rate: config.spin_rate,
            started: ctx.now,
        })
    }

    /// Composes transforms for every non-empty entity and draws one frame.
    ///
    /// Entities without vertices, or whose transforms are not finite, are
    /// skipped; the frame is still cleared.
    pub fn render(
        &self,
        backend: &mut B,
        target: &mut B::Target<'_>,
        ctx: &RenderContext,
    ) -> FrameStats {
        let elapsed = ctx.elapsed_since(self.started).as_secs_f32();
        let mut stats = FrameStats::default();

        let draws: Vec<DrawCall<'_, B::Mesh>> = self
            .entities
            .iter()
            .filter(|e| e.vertex_count > 0)
            .filter_map(|e| {
                let angle = model_angle(e.policy, &ctx.camera, elapsed, self.spin_rate);
                let transforms = compose(e.policy, &ctx.camera, ctx.viewport, angle);
                if !transforms.mvp().is_finite() {
                    log::trace!("skipping `{}`: degenerate transforms", e.label);
                    return None;
                }
                stats.draw_calls += 1;
                stats.vertices += e.vertex_count;
                Some(DrawCall {
                    label: &e.label,
                    mesh: &e.mesh,
                    transforms,
                })
            })
            .collect();

        backend.draw_frame(target, self.clear_color, &self.program, &draws);
        log::trace!("frame: {stats:?}");
        stats
    }

    /// Releases every mesh and the program.
    pub fn unrealize(self, backend: &mut B) {
        for e in self.entities {
            backend.release_mesh(e.mesh);
        }
        backend.release_program(self.program);
        log::info!("unrealized scene");
    }

    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }
}

enum DriverState<B: RenderBackend> {
    Uninitialized,
    Realized(Scene<B>),
    Unrealized,
}

/// Frame driver lifecycle: `Uninitialized → Realized → Unrealized`.
///
/// Realize happens once. Rendering outside the realized state is rejected.
pub struct FrameDriver<B: RenderBackend> {
    config: SceneConfig,
    state: DriverState<B>,
}

impl<B: RenderBackend> FrameDriver<B> {
    pub fn new(config: SceneConfig) -> Self {
        Self {
            config,
            state: DriverState::Uninitialized,
        }
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    pub fn realize(
        &mut self,
        backend: &mut B,
        ctx: &RenderContext,
        source: &dyn RegionSource,
        request: &SceneRequest,
    ) -> Result<(), InitError> {
        if !matches!(self.state, DriverState::Uninitialized) {
            return Err(InitError::AlreadyRealized);
        }
        let scene = Scene::realize(backend, ctx, source, &self.config, request)?;
        self.state = DriverState::Realized(scene);
        Ok(())
    }

    pub fn render(
        &self,
        backend: &mut B,
        target: &mut B::Target<'_>,
        ctx: &RenderContext,
    ) -> RenderOutcome {
        match &self.state {
            DriverState::Realized(scene) => {
                RenderOutcome::Rendered(scene.render(backend, target, ctx))
            }
            _ => RenderOutcome::Rejected,
        }
    }

    /// Releases the scene. Later renders are rejected.
    pub fn unrealize(&mut self, backend: &mut B) {
        match std::mem::replace(&mut self.state, DriverState::Unrealized) {
            DriverState::Realized(scene) => scene.unrealize(backend),
            DriverState::Uninitialized | DriverState::Unrealized => {}
        }
    }

    pub fn is_realized(&self) -> bool {
        matches!(self.state, DriverState::Realized(_))
    }

    pub fn scene(&self) -> Option<&Scene<B>> {
        match &self.state {
            DriverState::Realized(scene) => Some(scene),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use crate::coords::Viewport;
    use crate::geo::{GeoPoint, InMemoryRegions, Region, SourceError};
    use crate::gpu::GpuError;
    use crate::mesh::AttributeLayout;
    use crate::shader::{ShaderError, ShaderProgram};
    use crate::transform::Transforms;

    #[derive(Debug, Clone, PartialEq)]
    struct RecordedDraw {
        label: String,
        transforms: Transforms,
    }

    /// Backend that records what the driver asks of it.
    #[derive(Default)]
    struct Recorder {
        programs: u32,
        uploads: Vec<(String, u32)>,
        frames: Vec<Vec<RecordedDraw>>,
        clears: Vec<Rgb>,
        released_meshes: Vec<String>,
        released_programs: u32,
        fail_upload_of: Option<&'static str>,
    }

    impl RenderBackend for Recorder {
        type Program = u32;
        type Mesh = String;
        type Target<'t> = ();

        fn create_program(&mut self, _program: &ShaderProgram) -> Result<u32, GpuError> {
            self.programs += 1;
            Ok(self.programs)
        }

        fn upload(&mut self, _program: &u32, entity: &DrawableEntity) -> Result<String, GpuError> {
            if self.fail_upload_of == Some(entity.label()) {
                return Err(GpuError::LayoutMismatch {
                    label: entity.label().to_owned(),
                    expected: AttributeLayout::POSITION_COLOR,
                    found: entity.layout(),
                });
            }
            self.uploads
                .push((entity.label().to_owned(), entity.vertex_count()));
            Ok(entity.label().to_owned())
        }

        fn draw_frame(
            &mut self,
            _target: &mut (),
            clear: Rgb,
            _program: &u32,
            draws: &[DrawCall<'_, String>],
        ) {
            self.clears.push(clear);
            self.frames.push(
                draws
                    .iter()
                    .map(|d| RecordedDraw {
                        label: d.mesh.clone(),
                        transforms: d.transforms,
                    })
                    .collect(),
            );
        }

        fn release_mesh(&mut self, mesh: String) {
            self.released_meshes.push(mesh);
        }

        fn release_program(&mut self, _program: u32) {
            self.released_programs += 1;
        }
    }

    struct FailingSource;

    impl RegionSource for FailingSource {
        fn load_region(&self, _code: &str) -> Result<Region, SourceError> {
            Err("shapefile is truncated".into())
        }
    }

    fn texas() -> InMemoryRegions {
        InMemoryRegions::new().with_region(
            "TX",
            vec![vec![
                GeoPoint::new(-106.6, 32.0),
                GeoPoint::new(-103.0, 32.0),
                GeoPoint::new(-94.0, 29.5),
                GeoPoint::new(-97.4, 25.8),
            ]],
        )
    }

    fn ctx() -> RenderContext {
        RenderContext::new(Viewport::new(800.0, 600.0), Instant::now())
    }

    #[test]
    fn realized_region_draws_one_outline() {
        let mut backend = Recorder::default();
        let mut driver = FrameDriver::new(SceneConfig::default());
        let c = ctx();

        driver
            .realize(&mut backend, &c, &texas(), &SceneRequest::new("TX"))
            .unwrap();
        assert!(driver.is_realized());
        assert_eq!(backend.uploads, vec![("TX".to_owned(), 4)]);

        let outcome = driver.render(&mut backend, &mut (), &c);
        assert_eq!(
            outcome,
            RenderOutcome::Rendered(FrameStats {
                draw_calls: 1,
                vertices: 4
            })
        );
        assert_eq!(backend.frames.len(), 1);
        assert_eq!(backend.frames[0][0].label, "TX");
        assert_eq!(backend.clears, vec![Rgb::BLACK]);
    }

    #[test]
    fn empty_region_renders_a_no_op_frame() {
        let mut backend = Recorder::default();
        let mut driver = FrameDriver::new(SceneConfig::default());
        let c = ctx();

        driver
            .realize(&mut backend, &c, &texas(), &SceneRequest::new("ZZ"))
            .unwrap();
        assert_eq!(backend.uploads, vec![("ZZ".to_owned(), 0)]);

        let outcome = driver.render(&mut backend, &mut (), &c);
        assert_eq!(outcome, RenderOutcome::Rendered(FrameStats::default()));
        assert_eq!(backend.frames, vec![Vec::new()]);
    }

    #[test]
    fn render_is_rejected_before_realize_and_after_unrealize() {
        let mut backend = Recorder::default();
        let mut driver = FrameDriver::new(SceneConfig::default());
        let c = ctx();

        assert_eq!(driver.render(&mut backend, &mut (), &c), RenderOutcome::Rejected);

        driver
            .realize(&mut backend, &c, &texas(), &SceneRequest::new("TX"))
            .unwrap();
        driver.unrealize(&mut backend);

        assert!(!driver.is_realized());
        assert_eq!(backend.released_meshes, vec!["TX".to_owned()]);
        assert_eq!(backend.released_programs, 1);
        assert_eq!(driver.render(&mut backend, &mut (), &c), RenderOutcome::Rejected);
        assert!(backend.frames.is_empty());

        // A second unrealize is a no-op.
        driver.unrealize(&mut backend);
        assert_eq!(backend.released_programs, 1);
    }

    #[test]
    fn realize_happens_once() {
        let mut backend = Recorder::default();
        let mut driver = FrameDriver::new(SceneConfig::default());
        let c = ctx();
        let req = SceneRequest::new("TX");

        driver.realize(&mut backend, &c, &texas(), &req).unwrap();
        let err = driver.realize(&mut backend, &c, &texas(), &req).unwrap_err();
        assert!(matches!(err, InitError::AlreadyRealized));

        driver.unrealize(&mut backend);
        let err = driver.realize(&mut backend, &c, &texas(), &req).unwrap_err();
        assert!(matches!(err, InitError::AlreadyRealized));
        assert_eq!(backend.programs, 1);
    }

    #[test]
    fn failed_upload_releases_partial_state() {
        let mut backend = Recorder {
            fail_upload_of: Some("TX"),
            ..Default::default()
        };
        let config = SceneConfig {
            background: true,
            ..Default::default()
        };
        let mut driver = FrameDriver::new(config);
        let c = ctx();

        let err = driver
            .realize(&mut backend, &c, &texas(), &SceneRequest::new("TX"))
            .unwrap_err();
        assert!(matches!(err, InitError::Gpu(GpuError::LayoutMismatch { .. })));

        assert_eq!(backend.uploads, vec![("background".to_owned(), 3)]);
        assert_eq!(backend.released_meshes, vec!["background".to_owned()]);
        assert_eq!(backend.released_programs, 1);
        assert!(!driver.is_realized());
        assert_eq!(driver.render(&mut backend, &mut (), &c), RenderOutcome::Rejected);
    }

    #[test]
    fn region_failure_touches_no_gpu_state() {
        let mut backend = Recorder::default();
        let mut driver = FrameDriver::new(SceneConfig::default());

        let err = driver
            .realize(&mut backend, &ctx(), &FailingSource, &SceneRequest::new("TX"))
            .unwrap_err();
        match err {
            InitError::Region { code, source } => {
                assert_eq!(code, "TX");
                assert_eq!(source.to_string(), "shapefile is truncated");
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(backend.programs, 0);
    }

    #[test]
    fn unreadable_shader_file_is_fatal() {
        let dir = std::env::temp_dir()
            .join(format!("statemap-half-shaders-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join(crate::shader::VERTEX_FILE), crate::shader::VERTEX_WGSL).unwrap();

        let mut backend = Recorder::default();
        let mut driver = FrameDriver::new(SceneConfig::default());
        let req = SceneRequest::new("TX").with_shaders(ShaderOrigin::Directory(dir.clone()));
        let err = driver.realize(&mut backend, &ctx(), &texas(), &req).unwrap_err();

        match err {
            InitError::ShaderSource { path, .. } => {
                assert_eq!(path, dir.join(crate::shader::FRAGMENT_FILE))
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(backend.programs, 0);
        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn missing_shader_dir_falls_back_to_builtin() {
        let mut backend = Recorder::default();
        let mut driver = FrameDriver::new(SceneConfig::default());
        let req = SceneRequest::new("TX").with_shaders(ShaderOrigin::Directory(
            std::env::temp_dir().join("statemap-no-such-shader-dir"),
        ));
        driver.realize(&mut backend, &ctx(), &texas(), &req).unwrap();
        assert_eq!(backend.programs, 1);
    }

    #[test]
    fn invalid_shader_aborts_before_gpu_work() {
        let dir = std::env::temp_dir().join(format!("statemap-bad-shaders-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join(crate::shader::VERTEX_FILE), "fn vs_main( {").unwrap();
        std::fs::write(dir.join(crate::shader::FRAGMENT_FILE), crate::shader::FRAGMENT_WGSL)
            .unwrap();

        let mut backend = Recorder::default();
        let mut driver = FrameDriver::new(SceneConfig::default());
        let req = SceneRequest::new("TX").with_shaders(ShaderOrigin::Directory(dir.clone()));
        let err = driver.realize(&mut backend, &ctx(), &texas(), &req).unwrap_err();

        assert!(matches!(
            err,
            InitError::Shader(ShaderError::Compile {
                stage: ShaderStage::Vertex,
                ..
            })
        ));
        assert_eq!(backend.programs, 0);
        assert!(backend.uploads.is_empty());
        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn background_is_drawn_first_and_spins() {
        let mut backend = Recorder::default();
        let config = SceneConfig {
            background: true,
            ..Default::default()
        };
        let mut driver = FrameDriver::new(config);
        let start = ctx();

        driver
            .realize(&mut backend, &start, &texas(), &SceneRequest::new("TX"))
            .unwrap();
        assert_eq!(driver.scene().map(Scene::entity_count), Some(2));

        let later = RenderContext {
            now: start.now + Duration::from_millis(500),
            ..start
        };
        driver.render(&mut backend, &mut (), &start);
        driver.render(&mut backend, &mut (), &later);

        let labels: Vec<&str> = backend.frames[0].iter().map(|d| d.label.as_str()).collect();
        assert_eq!(labels, vec!["background", "TX"]);

        let bg0 = backend.frames[0][0].transforms;
        let bg1 = backend.frames[1][0].transforms;
        assert_ne!(bg0.model, bg1.model);
        assert_eq!(bg0.view, bg1.view);

        // The outline does not spin.
        assert_eq!(backend.frames[0][1].transforms, backend.frames[1][1].transforms);
    }

    #[test]
    fn degenerate_camera_skips_outline() {
        let mut backend = Recorder::default();
        let mut driver = FrameDriver::new(SceneConfig::default());
        let mut c = ctx();
        driver
            .realize(&mut backend, &c, &texas(), &SceneRequest::new("TX"))
            .unwrap();

        for _ in 0..200 {
            c.camera.zoom_in();
        }
        let outcome = driver.render(&mut backend, &mut (), &c);
        assert_eq!(outcome, RenderOutcome::Rendered(FrameStats::default()));
        assert_eq!(backend.frames, vec![Vec::new()]);
    }

    #[test]
    fn outline_color_follows_projection() {
        let mut config = SceneConfig::default();
        assert_eq!(config.outline_color(), Rgb::YELLOW);
        config.projection = ProjectionMode::web_mercator();
        assert_eq!(config.outline_color(), Rgb::GREEN);
        config.projection = ProjectionMode::Ecef;
        assert_eq!(config.outline_color(), Rgb::DARK_BLUE);
        config.outline_color = Some(Rgb::RED);
        assert_eq!(config.outline_color(), Rgb::RED);
    }
}
