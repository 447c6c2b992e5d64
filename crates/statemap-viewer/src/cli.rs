use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use statemap_engine::geo::ProjectionMode;
use statemap_engine::mesh::Rgb;

#[derive(Parser, Debug)]
#[command(author, version, about = "Draws a region boundary from a shapefile")]
pub struct Args {
    /// Polygon shapefile (.shp with its .dbf alongside). Without it a coarse
    /// built-in Texas outline is drawn.
    #[arg(long)]
    pub shapefile: Option<PathBuf>,

    /// Attribute column holding the region code
    #[arg(long, default_value = "STUSPS")]
    pub attribute: String,

    /// Region code to draw
    #[arg(long, default_value = "TX")]
    pub region: String,

    #[arg(long, value_enum, default_value_t = Projection::PlateCarree)]
    pub projection: Projection,

    /// Outline color as `#rrggbb`; defaults to the projection's color
    #[arg(long, value_parser = parse_color)]
    pub color: Option<Rgb>,

    /// Directory with vertex.wgsl and fragment.wgsl; falls back to the
    /// built-in shaders when missing
    #[arg(long, default_value = "shaders")]
    pub shader_dir: PathBuf,

    /// Draw the spinning RGB triangle behind the outline
    #[arg(long)]
    pub background: bool,

    /// Log filter, env_logger syntax (overrides RUST_LOG)
    #[arg(long)]
    pub log: Option<String>,

    #[arg(long, default_value_t = 800.0)]
    pub width: f64,

    #[arg(long, default_value_t = 600.0)]
    pub height: f64,
}

fn parse_color(s: &str) -> Result<Rgb, String> {
    Rgb::from_hex(s).ok_or_else(|| format!("`{s}` is not a #rrggbb color"))
}

#[derive(ValueEnum, Debug, Copy, Clone, Eq, PartialEq)]
pub enum Projection {
    PlateCarree,
    Mercator,
    Ecef,
}

impl From<Projection> for ProjectionMode {
    fn from(p: Projection) -> Self {
        match p {
            Projection::PlateCarree => ProjectionMode::PlateCarree,
            Projection::Mercator => ProjectionMode::web_mercator(),
            Projection::Ecef => ProjectionMode::Ecef,
        }
    }
}
