mod app;
mod cli;
mod regions;

use anyhow::Result;
use clap::Parser;
use winit::dpi::LogicalSize;

use statemap_engine::device::GpuInit;
use statemap_engine::driver::{SceneConfig, SceneRequest, ShaderOrigin};
use statemap_engine::geo::RegionSource;
use statemap_engine::logging::{init_logging, LoggingConfig};
use statemap_engine::window::{Runtime, RuntimeConfig};

use app::ViewerApp;
use cli::Args;
use regions::{builtin_regions, ShapefileRegions};

fn main() -> Result<()> {
    let args = Args::parse();

    init_logging(LoggingConfig {
        env_filter: args.log.clone(),
        ..LoggingConfig::default()
    });

    let source: Box<dyn RegionSource> = match &args.shapefile {
        Some(path) => {
            log::info!("reading regions from {}", path.display());
            Box::new(ShapefileRegions::new(path, &args.attribute))
        }
        None => {
            log::info!("no shapefile given; using the built-in Texas outline");
            Box::new(builtin_regions())
        }
    };

    let config = SceneConfig {
        projection: args.projection.into(),
        outline_color: args.color,
        background: args.background,
        ..SceneConfig::default()
    };
    let request = SceneRequest::new(&args.region)
        .with_shaders(ShaderOrigin::Directory(args.shader_dir.clone()));

    let runtime = RuntimeConfig {
        title: format!("statemap: {}", args.region),
        initial_size: LogicalSize::new(args.width, args.height),
        ..RuntimeConfig::default()
    };

    Runtime::run(runtime, GpuInit::default(), ViewerApp::new(config, source, request))
}
