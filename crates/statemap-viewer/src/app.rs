use anyhow::{Context, Result};

use statemap_engine::core::{App, AppControl, FrameCtx, RealizeCtx};
use statemap_engine::driver::{
    apply_input, FrameDriver, RenderContext, RenderOutcome, SceneConfig, SceneRequest,
};
use statemap_engine::geo::RegionSource;
use statemap_engine::gpu::WgpuBackend;
use statemap_engine::input::Key;

/// Frames between two frame-stats log lines.
const STATS_INTERVAL: u64 = 300;

/// Viewer state implementing the engine [`App`] contract.
pub struct ViewerApp {
    driver: FrameDriver<WgpuBackend>,
    source: Box<dyn RegionSource>,
    request: SceneRequest,

    // Set by on_realize.
    backend: Option<WgpuBackend>,
    render: Option<RenderContext>,
}

impl ViewerApp {
    pub fn new(config: SceneConfig, source: Box<dyn RegionSource>, request: SceneRequest) -> Self {
        Self {
            driver: FrameDriver::new(config),
            source,
            request,
            backend: None,
            render: None,
        }
    }
}

impl App for ViewerApp {
    fn on_realize(&mut self, ctx: &mut RealizeCtx<'_, '_>) -> Result<()> {
        let rctx = ctx.render_ctx();
        let mut backend = WgpuBackend::new(&rctx);
        let render = RenderContext::new(rctx.viewport, ctx.now);

        self.driver
            .realize(&mut backend, &render, self.source.as_ref(), &self.request)
            .with_context(|| format!("failed to realize region `{}`", self.request.region))?;

        self.backend = Some(backend);
        self.render = Some(render);
        Ok(())
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        if ctx.input_frame.key_pressed(Key::Escape) {
            log::info!("escape pressed, exiting");
            return AppControl::Exit;
        }

        let (Some(backend), Some(render)) = (self.backend.as_mut(), self.render.as_mut()) else {
            return AppControl::Continue;
        };

        for event in &ctx.input_frame.events {
            apply_input(render, event);
        }
        render.viewport = ctx.viewport();
        render.now = ctx.time.now;

        let driver = &self.driver;
        let render = &*render;
        let time = ctx.time;
        ctx.render(|_, target| match driver.render(backend, target, render) {
            RenderOutcome::Rendered(stats) => {
                if time.frame_index % STATS_INTERVAL == 0 {
                    log::debug!(
                        "frame {}: {:.1} ms, {} draws, {} vertices",
                        time.frame_index,
                        time.dt * 1000.0,
                        stats.draw_calls,
                        stats.vertices
                    );
                }
            }
            RenderOutcome::Rejected => log::warn!("frame rejected: scene is not realized"),
        })
    }

    fn on_unrealize(&mut self) {
        if let Some(mut backend) = self.backend.take() {
            self.driver.unrealize(&mut backend);
        }
        self.render = None;
    }
}
