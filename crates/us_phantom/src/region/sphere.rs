//! Balls spanning several slices.
use crate::config::Configuration;
use crate::error::{IssueKind, ValidationIssue};
use crate::geometry::Point3;
use crate::phantom::PhantomSlice;
use crate::region::{log_column_progress, Extent};

/// Ball around `center`, intersected with each slice it crosses.
///
/// On slice `z` the footprint is the disc `dx² + dy² + dz² ≤ r²` with `dz = z - center.z`,
/// scanned over the same half-open box as [`crate::region::Circle`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Sphere {
    pub center: Point3,
    pub radius: i32,
}

impl Sphere {
    pub fn new(center: Point3, radius: i32) -> Self {
        Self { center, radius }
    }

    pub fn issues(&self, extent: &Extent) -> Vec<ValidationIssue> {
        if self.radius <= 0 {
            return vec![ValidationIssue::new(
                IssueKind::InvalidGeometry,
                "",
                "radius of the sphere should be > 0",
            )];
        }

        let r = self.radius as i64;
        let (cx, cy, cz) = (
            self.center.x as i64,
            self.center.y as i64,
            self.center.z as i64,
        );
        let out = Extent::axis_exceeded(cx - r, cx + r, extent.cols)
            || Extent::axis_exceeded(cy - r, cy + r, extent.rows)
            || Extent::axis_exceeded(cz - r, cz + r, extent.depth);
        if out {
            vec![ValidationIssue::new(
                IssueKind::OutOfBounds,
                "",
                "the defined sphere is out of bounds of the phantom",
            )]
        } else {
            Vec::new()
        }
    }

    pub fn fill(&self, slice: &mut PhantomSlice, gain: f64, config: &Configuration) -> usize {
        let (c, r) = (self.center, self.radius);
        let dz = slice.index as i64 - c.z as i64;
        let r2 = (r as i64) * (r as i64);
        if dz * dz > r2 {
            return 0;
        }

        let (x0, x1) = (c.x - r, c.x + r);
        let (y0, y1) = (c.y - r, c.y + r);
        let mut touched = 0;
        for x in x0..x1 {
            log_column_progress(config, x, x0, x1);
            let dx = (x - c.x) as i64;
            for y in y0..y1 {
                let dy = (y - c.y) as i64;
                if dx * dx + dy * dy + dz * dz <= r2
                    && slice.apply_gain(x, y, gain, config.sound_speed_m_s)
                {
                    touched += 1;
                }
            }
        }
        touched
    }
}
