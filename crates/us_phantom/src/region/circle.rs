//! Discs on a single slice.
use crate::config::Configuration;
use crate::error::{IssueKind, ValidationIssue};
use crate::geometry::Point;
use crate::phantom::PhantomSlice;
use crate::region::{log_column_progress, Extent};

/// Disc of integer radius around `center`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Circle {
    pub center: Point,
    pub radius: i32,
}

impl Circle {
    pub fn new(center: Point, radius: i32) -> Self {
        Self { center, radius }
    }

    pub fn issues(&self, extent: &Extent) -> Vec<ValidationIssue> {
        if self.radius <= 0 {
            return vec![ValidationIssue::new(
                IssueKind::InvalidGeometry,
                "",
                "radius of the circle should be > 0",
            )];
        }

        let (c, r) = (self.center, self.radius as i64);
        let out = Extent::axis_exceeded(c.x as i64 - r, c.x as i64 + r, extent.cols)
            || Extent::axis_exceeded(c.y as i64 - r, c.y as i64 + r, extent.rows);
        if out {
            vec![ValidationIssue::new(
                IssueKind::OutOfBounds,
                "",
                "the defined circle is out of bounds of the phantom",
            )]
        } else {
            Vec::new()
        }
    }

    /// Scans `[c - r, c + r)` on both axes and applies `gain` where `dx² + dy² ≤ r²`.
    pub fn fill(&self, slice: &mut PhantomSlice, gain: f64, config: &Configuration) -> usize {
        let (c, r) = (self.center, self.radius);
        let r2 = (r as i64) * (r as i64);
        let (x0, x1) = (c.x - r, c.x + r);
        let (y0, y1) = (c.y - r, c.y + r);

        let mut touched = 0;
        for x in x0..x1 {
            log_column_progress(config, x, x0, x1);
            let dx = (x - c.x) as i64;
            for y in y0..y1 {
                let dy = (y - c.y) as i64;
                if dx * dx + dy * dy <= r2
                    && slice.apply_gain(x, y, gain, config.sound_speed_m_s)
                {
                    touched += 1;
                }
            }
        }
        touched
    }
}
