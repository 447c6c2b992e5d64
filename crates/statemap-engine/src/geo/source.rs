use std::collections::HashMap;
use std::error::Error;

use super::point::GeoPoint;

/// One closed ring of geographic points.
pub type Ring = Vec<GeoPoint>;

/// Error type returned by region sources.
pub type SourceError = Box<dyn Error + Send + Sync + 'static>;

/// Boundary geometry of a single region, as ordered rings.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Region {
    pub code: String,
    pub rings: Vec<Ring>,
}

impl Region {
    pub fn new(code: impl Into<String>, rings: Vec<Ring>) -> Self {
        Self {
            code: code.into(),
            rings,
        }
    }

    pub fn empty(code: impl Into<String>) -> Self {
        Self::new(code, Vec::new())
    }

    pub fn point_count(&self) -> usize {
        self.rings.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.point_count() == 0
    }
}

/// Capability to load boundary geometry by region code.
///
/// An unknown code is not an error: implementations return an empty region.
pub trait RegionSource {
    fn load_region(&self, code: &str) -> Result<Region, SourceError>;
}

impl<S: RegionSource + ?Sized> RegionSource for &S {
    fn load_region(&self, code: &str) -> Result<Region, SourceError> {
        (**self).load_region(code)
    }
}

/// Region source backed by a map of pre-loaded rings.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRegions {
    regions: HashMap<String, Vec<Ring>>,
}

impl InMemoryRegions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds rings under `code`, appending to any rings already stored there.
    pub fn insert(&mut self, code: impl Into<String>, rings: Vec<Ring>) {
        self.regions.entry(code.into()).or_default().extend(rings);
    }

    pub fn with_region(mut self, code: impl Into<String>, rings: Vec<Ring>) -> Self {
        self.insert(code, rings);
        self
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }
}

impl RegionSource for InMemoryRegions {
    fn load_region(&self, code: &str) -> Result<Region, SourceError> {
        let rings = self.regions.get(code).cloned().unwrap_or_default();
        if rings.is_empty() {
            log::debug!("region {code:?} not found; returning empty geometry");
        }
        Ok(Region::new(code, rings))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> Ring {
        vec![
            GeoPoint::new(0.0, 0.0),
            GeoPoint::new(1.0, 0.0),
            GeoPoint::new(1.0, 1.0),
            GeoPoint::new(0.0, 1.0),
        ]
    }

    #[test]
    fn known_code_returns_rings_in_order() {
        let src = InMemoryRegions::new().with_region("TX", vec![square()]);
        let region = src.load_region("TX").unwrap();
        assert_eq!(region.code, "TX");
        assert_eq!(region.rings, vec![square()]);
        assert_eq!(region.point_count(), 4);
    }

    #[test]
    fn unknown_code_is_empty_not_error() {
        let src = InMemoryRegions::new().with_region("TX", vec![square()]);
        let region = src.load_region("ZZ").unwrap();
        assert!(region.is_empty());
        assert_eq!(region, Region::empty("ZZ"));
    }

    #[test]
    fn insert_appends_rings() {
        let mut src = InMemoryRegions::new();
        src.insert("HI", vec![square()]);
        src.insert("HI", vec![square()]);
        assert_eq!(src.len(), 1);
        assert_eq!(src.load_region("HI").unwrap().rings.len(), 2);
    }
}
