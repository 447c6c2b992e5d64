use std::path::PathBuf;

use shapefile::dbase::{FieldValue, Record};
use shapefile::Polygon;

use statemap_engine::geo::{GeoPoint, InMemoryRegions, Region, RegionSource, Ring, SourceError};

/// Region source reading polygons from a shapefile, keyed by one attribute.
///
/// The file is read on every load; every record whose attribute equals the
/// requested code contributes its rings.
#[derive(Debug, Clone)]
pub struct ShapefileRegions {
    path: PathBuf,
    attribute: String,
}

impl ShapefileRegions {
    pub fn new(path: impl Into<PathBuf>, attribute: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            attribute: attribute.into(),
        }
    }
}

impl RegionSource for ShapefileRegions {
    fn load_region(&self, code: &str) -> Result<Region, SourceError> {
        let shapes = shapefile::read_as::<_, Polygon, Record>(&self.path)?;
        log::debug!("{}: {} records", self.path.display(), shapes.len());

        let mut region = Region::empty(code);
        for (polygon, record) in shapes {
            if record_code(&record, &self.attribute) != Some(code) {
                continue;
            }
            region.rings.extend(polygon.rings().iter().map(|ring| {
                ring.points()
                    .iter()
                    .map(|p| GeoPoint::new(p.x, p.y))
                    .collect::<Ring>()
            }));
        }

        if region.is_empty() {
            log::warn!(
                "no `{}` = `{code}` records in {}",
                self.attribute,
                self.path.display()
            );
        }
        Ok(region)
    }
}

fn record_code<'r>(record: &'r Record, attribute: &str) -> Option<&'r str> {
    match record.get(attribute) {
        Some(FieldValue::Character(Some(s))) => Some(s.trim()),
        _ => None,
    }
}

/// Coarse Texas outline, used when no shapefile is given.
pub fn builtin_regions() -> InMemoryRegions {
    const TEXAS: &[(f64, f64)] = &[
        (-106.65, 31.95),
        (-106.62, 32.00),
        (-103.06, 32.00),
        (-103.04, 36.50),
        (-100.00, 36.50),
        (-100.00, 34.56),
        (-99.20, 34.35),
        (-98.10, 34.13),
        (-96.45, 33.78),
        (-95.25, 33.90),
        (-94.04, 33.55),
        (-94.04, 31.99),
        (-93.70, 31.40),
        (-93.84, 29.71),
        (-94.70, 29.33),
        (-96.60, 28.30),
        (-97.40, 27.40),
        (-97.15, 25.95),
        (-97.55, 25.84),
        (-99.10, 26.43),
        (-99.52, 27.55),
        (-100.30, 28.30),
        (-101.40, 29.77),
        (-102.38, 29.76),
        (-103.15, 28.97),
        (-104.45, 29.57),
        (-104.70, 30.20),
        (-106.00, 31.39),
    ];

    let ring: Ring = TEXAS.iter().copied().map(GeoPoint::from).collect();
    InMemoryRegions::new().with_region("TX", vec![ring])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_texas_is_one_ring() {
        let region = builtin_regions().load_region("TX").unwrap();
        assert_eq!(region.rings.len(), 1);
        assert!(region.point_count() > 20);
        assert!(region
            .rings
            .iter()
            .flatten()
            .all(|p| (-107.0..-93.0).contains(&p.lon) && (25.0..37.0).contains(&p.lat)));
    }

    #[test]
    fn builtin_unknown_code_is_empty() {
        let region = builtin_regions().load_region("CA").unwrap();
        assert!(region.is_empty());
    }

    #[test]
    fn missing_shapefile_is_an_error() {
        let source = ShapefileRegions::new("/nonexistent/states.shp", "STUSPS");
        assert!(source.load_region("TX").is_err());
    }
}
