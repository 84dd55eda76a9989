//! Axis-aligned rectangles.
use crate::config::Configuration;
use crate::error::{IssueKind, ValidationIssue};
use crate::geometry::Point;
use crate::phantom::PhantomSlice;
use crate::region::{log_column_progress, Extent};

/// Axis-aligned rectangle covering `[x, x + width) × [y, y + height)`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Rectangle {
    pub top_left: Point,
    pub width: i32,
    pub height: i32,
}

impl Rectangle {
    pub fn new(top_left: Point, width: i32, height: i32) -> Self {
        Self {
            top_left,
            width,
            height,
        }
    }

    pub fn issues(&self, extent: &Extent) -> Vec<ValidationIssue> {
        if self.width <= 0 || self.height <= 0 {
            return vec![ValidationIssue::new(
                IssueKind::InvalidGeometry,
                "",
                "side lengths of the rectangle should be > 0",
            )];
        }

        let p = self.top_left;
        let out = Extent::axis_exceeded(p.x as i64, p.x as i64 + self.width as i64, extent.cols)
            || Extent::axis_exceeded(p.y as i64, p.y as i64 + self.height as i64, extent.rows);
        if out {
            vec![ValidationIssue::new(
                IssueKind::OutOfBounds,
                "",
                "the defined rectangle is out of bounds of the phantom",
            )]
        } else {
            Vec::new()
        }
    }

    pub fn fill(&self, slice: &mut PhantomSlice, gain: f64, config: &Configuration) -> usize {
        let p = self.top_left;
        let (x1, y1) = (p.x + self.width, p.y + self.height);

        let mut touched = 0;
        for x in p.x..x1 {
            log_column_progress(config, x, p.x, x1);
            for y in p.y..y1 {
                if slice.apply_gain(x, y, gain, config.sound_speed_m_s) {
                    touched += 1;
                }
            }
        }
        touched
    }
}
