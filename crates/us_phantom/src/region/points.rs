//! Sets of individual cells.
use crate::config::Configuration;
use crate::error::{IssueKind, ValidationIssue};
use crate::geometry::Point;
use crate::phantom::PhantomSlice;
use crate::region::Extent;

/// Individual cells. Empty cells are seeded with amplitude 1 before the gain is applied.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PointSet {
    pub points: Vec<Point>,
}

impl PointSet {
    pub fn new(points: Vec<Point>) -> Self {
        Self { points }
    }

    pub fn issues(&self, extent: &Extent) -> Vec<ValidationIssue> {
        if self.points.iter().all(|p| extent.contains(*p)) {
            Vec::new()
        } else {
            vec![ValidationIssue::new(
                IssueKind::OutOfBounds,
                "",
                "the defined points are out of bounds of the phantom",
            )]
        }
    }

    pub fn fill(&self, slice: &mut PhantomSlice, gain: f64, config: &Configuration) -> usize {
        let mut touched = 0;
        for p in &self.points {
            slice.seed_if_empty(p.x, p.y);
            if slice.apply_gain(p.x, p.y, gain, config.sound_speed_m_s) {
                touched += 1;
            }
        }
        touched
    }
}
