//! Free polygons rasterized with the even-odd containment test.
use glam::DVec2;

use crate::config::Configuration;
use crate::error::{IssueKind, ValidationIssue};
use crate::geometry::{origin_anchored_bounds, InPolygon, Point};
use crate::phantom::PhantomSlice;
use crate::region::{log_column_progress, Extent};

/// Closed polygon given by its vertices in order.
///
/// The scan box spans from `min(0, vertices)` to `max(0, vertices)` exclusive, so the fill
/// always starts at the origin even for polygons far away from it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Polygon {
    pub vertices: Vec<Point>,
}

impl Polygon {
    pub fn new(vertices: Vec<Point>) -> Self {
        Self { vertices }
    }

    pub fn issues(&self, extent: &Extent) -> Vec<ValidationIssue> {
        if self.vertices.len() < 3 {
            return vec![ValidationIssue::new(
                IssueKind::InvalidGeometry,
                "",
                format!(
                    "a free polygon needs at least 3 vertices, got {}",
                    self.vertices.len()
                ),
            )];
        }

        if self.vertices.iter().all(|v| extent.contains(*v)) {
            Vec::new()
        } else {
            vec![ValidationIssue::new(
                IssueKind::OutOfBounds,
                "",
                "the defined polygon is out of bounds of the phantom",
            )]
        }
    }

    pub fn fill(&self, slice: &mut PhantomSlice, gain: f64, config: &Configuration) -> usize {
        let (lo, hi) = origin_anchored_bounds(&self.vertices);
        let vertices: Vec<DVec2> = self.vertices.iter().map(|v| v.as_dvec2()).collect();

        let mut touched = 0;
        for x in lo.x..hi.x {
            log_column_progress(config, x, lo.x, hi.x);
            for y in lo.y..hi.y {
                let p = DVec2::new(x as f64, y as f64);
                if p.in_polygon(&vertices) && slice.apply_gain(x, y, gain, config.sound_speed_m_s)
                {
                    touched += 1;
                }
            }
        }
        touched
    }
}
