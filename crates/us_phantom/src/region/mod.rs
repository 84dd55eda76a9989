//! Geometric regions rasterized onto the phantom.
//!
//! A [`RegionSpec`] pairs a [`Region`] shape with a gain. Each shape knows how to check itself
//! against the phantom [`Extent`] and how to fill its footprint on a [`PhantomSlice`]: every
//! covered cell has its scatterer multiplied by the gain and, for k-Wave phantoms, its sound
//! speed and density re-derived from the new amplitude.
//!
//! Footprints are enumerated by brute-force scans over a bounding box. Bounds use the same
//! policy for every shape: a coordinate is valid only in `[0, extent - 1]`.
use std::fmt;
use std::str::FromStr;

use tracing::debug;

use crate::config::Configuration;
use crate::error::{Error, IssueKind, Result, ValidationIssue, ValidationReport};
use crate::geometry::{Point, Point3};
use crate::phantom::PhantomSlice;

pub mod circle;
pub mod physics;
pub mod points;
pub mod polygon;
pub mod rectangle;
pub mod sphere;

pub use circle::Circle;
pub use points::PointSet;
pub use polygon::Polygon;
pub use rectangle::Rectangle;
pub use sphere::Sphere;

/// Phantom extents used for bounds checks.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Extent {
    pub cols: usize,
    pub rows: usize,
    pub depth: usize,
}

impl Extent {
    pub fn new(cols: usize, rows: usize, depth: usize) -> Self {
        Self { cols, rows, depth }
    }

    /// Extent of a configuration.
    pub fn of(config: &Configuration) -> Self {
        Self::new(config.cols, config.rows, config.depth)
    }

    /// Whether `[lo, hi]` leaves the axis `[0, extent - 1]`.
    #[inline]
    pub(crate) fn axis_exceeded(lo: i64, hi: i64, extent: usize) -> bool {
        lo < 0 || hi > extent as i64 - 1
    }

    /// Whether `p` lies inside `[0, cols - 1] × [0, rows - 1]`.
    pub fn contains(&self, p: Point) -> bool {
        !Self::axis_exceeded(p.x as i64, p.x as i64, self.cols)
            && !Self::axis_exceeded(p.y as i64, p.y as i64, self.rows)
    }

    /// Whether `p` lies inside the extent including the slice axis.
    pub fn contains3(&self, p: Point3) -> bool {
        self.contains(p.truncate()) && !Self::axis_exceeded(p.z as i64, p.z as i64, self.depth)
    }
}

/// Supported region type names.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RegionKind {
    Circle,
    Rectangle,
    FreePolygon,
    Points,
    Sphere,
}

impl RegionKind {
    /// Names accepted by [`RegionKind::from_str`]. Validation and generation share this set.
    pub const SUPPORTED: [&'static str; 5] =
        ["circle", "rectangle", "free_polygon", "points", "sphere"];

    pub fn as_str(&self) -> &'static str {
        match self {
            RegionKind::Circle => "circle",
            RegionKind::Rectangle => "rectangle",
            RegionKind::FreePolygon => "free_polygon",
            RegionKind::Points => "points",
            RegionKind::Sphere => "sphere",
        }
    }
}

impl FromStr for RegionKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "circle" => Ok(RegionKind::Circle),
            "rectangle" => Ok(RegionKind::Rectangle),
            "free_polygon" => Ok(RegionKind::FreePolygon),
            "points" => Ok(RegionKind::Points),
            "sphere" => Ok(RegionKind::Sphere),
            _ => Err(Error::UnsupportedRegionType {
                name: s.to_owned(),
                supported: Self::SUPPORTED.join(" "),
            }),
        }
    }
}

impl fmt::Display for RegionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Region geometry.
#[derive(Clone, Debug, PartialEq)]
pub enum Region {
    Circle(Circle),
    Rectangle(Rectangle),
    Polygon(Polygon),
    Points(PointSet),
    Sphere(Sphere),
}

impl Region {
    pub fn kind(&self) -> RegionKind {
        match self {
            Region::Circle(_) => RegionKind::Circle,
            Region::Rectangle(_) => RegionKind::Rectangle,
            Region::Polygon(_) => RegionKind::FreePolygon,
            Region::Points(_) => RegionKind::Points,
            Region::Sphere(_) => RegionKind::Sphere,
        }
    }

    /// Geometry findings against `extent`, with empty context.
    pub fn issues(&self, extent: &Extent) -> Vec<ValidationIssue> {
        match self {
            Region::Circle(c) => c.issues(extent),
            Region::Rectangle(r) => r.issues(extent),
            Region::Polygon(p) => p.issues(extent),
            Region::Points(p) => p.issues(extent),
            Region::Sphere(s) => s.issues(extent),
        }
    }

    /// Fill the footprint on `slice`, returning the number of cells touched.
    pub fn fill(&self, slice: &mut PhantomSlice, gain: f64, config: &Configuration) -> usize {
        match self {
            Region::Circle(c) => c.fill(slice, gain, config),
            Region::Rectangle(r) => r.fill(slice, gain, config),
            Region::Polygon(p) => p.fill(slice, gain, config),
            Region::Points(p) => p.fill(slice, gain, config),
            Region::Sphere(s) => s.fill(slice, gain, config),
        }
    }
}

/// A region together with the gain applied to scatterers inside it.
#[derive(Clone, Debug, PartialEq)]
pub struct RegionSpec {
    pub region: Region,
    /// Scatterer amplitude multiplier, must be `>= 0`.
    pub gain: f64,
}

impl RegionSpec {
    pub fn new(region: Region, gain: f64) -> Self {
        Self { region, gain }
    }

    pub fn circle(center: Point, radius: i32, gain: f64) -> Self {
        Self::new(Region::Circle(Circle::new(center, radius)), gain)
    }

    pub fn rectangle(top_left: Point, width: i32, height: i32, gain: f64) -> Self {
        Self::new(
            Region::Rectangle(Rectangle::new(top_left, width, height)),
            gain,
        )
    }

    pub fn polygon(vertices: Vec<Point>, gain: f64) -> Self {
        Self::new(Region::Polygon(Polygon::new(vertices)), gain)
    }

    pub fn points(points: Vec<Point>, gain: f64) -> Self {
        Self::new(Region::Points(PointSet::new(points)), gain)
    }

    pub fn sphere(center: Point3, radius: i32, gain: f64) -> Self {
        Self::new(Region::Sphere(Sphere::new(center, radius)), gain)
    }

    pub fn kind(&self) -> RegionKind {
        self.region.kind()
    }

    /// Gain and geometry findings against `extent`, with empty context.
    pub fn issues(&self, extent: &Extent) -> Vec<ValidationIssue> {
        let mut issues = Vec::new();
        if !self.gain.is_finite() || self.gain < 0.0 {
            issues.push(ValidationIssue::new(
                IssueKind::InvalidGeometry,
                "",
                "relative amplitude of the scatterers should be finite and >= 0",
            ));
        }
        issues.extend(self.region.issues(extent));
        issues
    }

    /// Check the region against `extent`, aggregating every finding.
    pub fn validate(&self, extent: &Extent) -> Result<()> {
        let issues = self.issues(extent);
        if issues.is_empty() {
            return Ok(());
        }
        let mut report = ValidationReport::new();
        report.extend(issues);
        Err(Error::InvalidConfig(report))
    }

    /// Fill the region on `slice` with its own gain, returning the number of cells touched.
    ///
    /// Fills compound: filling the same region twice multiplies by the gain twice.
    pub fn fill(&self, slice: &mut PhantomSlice, config: &Configuration) -> usize {
        self.region.fill(slice, self.gain, config)
    }
}

/// Log scan progress every tenth column when verbose.
#[inline]
pub(crate) fn log_column_progress(config: &Configuration, x: i32, from: i32, to: i32) {
    if config.verbose && x.rem_euclid(10) == 0 {
        debug!("Filling column {}. Range from {} to {}.", x, from, to);
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_names_round_trip() {
        for name in RegionKind::SUPPORTED {
            assert_eq!(name.parse::<RegionKind>().unwrap().as_str(), name);
        }
        assert_eq!("Circle".parse::<RegionKind>().unwrap(), RegionKind::Circle);
    }

    #[test]
    fn unknown_kind_lists_supported_set() {
        let err = "square".parse::<RegionKind>().unwrap_err();
        assert!(matches!(err, Error::UnsupportedRegionType { ref name, .. } if name == "square"));
        assert!(err
            .to_string()
            .contains("circle rectangle free_polygon points sphere"));
    }

    #[test]
    fn negative_gain_is_reported_independently_of_geometry() {
        let extent = Extent::new(64, 64, 1);
        let spec = RegionSpec::circle(Point::new(30, 30), 5, -1.0);
        let issues = spec.issues(&extent);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].kind, IssueKind::InvalidGeometry);

        let spec = RegionSpec::circle(Point::new(0, 0), 5, -1.0);
        let kinds: Vec<_> = spec.issues(&extent).into_iter().map(|i| i.kind).collect();
        assert_eq!(kinds, vec![IssueKind::InvalidGeometry, IssueKind::OutOfBounds]);
    }

    #[test]
    fn non_finite_gain_is_rejected() {
        let extent = Extent::new(8, 8, 1);
        for gain in [f64::INFINITY, f64::NEG_INFINITY, f64::NAN] {
            let spec = RegionSpec::rectangle(Point::new(1, 1), 4, 4, gain);
            let issues = spec.issues(&extent);
            assert_eq!(issues.len(), 1, "{gain}");
            assert_eq!(issues[0].kind, IssueKind::InvalidGeometry);
            assert!(spec.validate(&extent).is_err());
        }
    }

    #[test]
    fn zero_gain_is_valid() {
        let extent = Extent::new(64, 64, 1);
        assert!(RegionSpec::rectangle(Point::new(1, 1), 4, 4, 0.0)
            .validate(&extent)
            .is_ok());
    }

    #[test]
    fn extent_contains_checks_every_axis() {
        let extent = Extent::new(10, 5, 3);
        assert!(extent.contains(Point::new(9, 4)));
        assert!(!extent.contains(Point::new(10, 4)));
        assert!(!extent.contains(Point::new(9, 5)));
        assert!(!extent.contains(Point::new(-1, 0)));
        assert!(extent.contains3(Point3::new(0, 0, 2)));
        assert!(!extent.contains3(Point3::new(0, 0, 3)));
    }
}
