//! Integer grid coordinates and polygon containment.
//!
//! Points are plain [`glam`] vectors: `x` indexes columns, `y` indexes rows and `z` indexes
//! slices. [`InPolygon`] implements the even-odd ray-casting test used to rasterize free polygons.
use glam::{DVec2, IVec2, IVec3};

/// A 2-D grid coordinate `(x, y)`.
pub type Point = IVec2;

/// A 3-D grid coordinate `(x, y, z)`.
pub type Point3 = IVec3;

/// Even-odd containment test against a closed polygon.
pub trait InPolygon: Sized {
    /// Returns `true` if `self` lies inside `polygon`.
    ///
    /// Casts a horizontal ray towards `+x` and toggles membership for each edge it crosses,
    /// including the closing edge from the last vertex back to the first. An edge counts when
    /// it straddles the point's `y` (`(y_i > y) != (y_j > y)`) and the point lies strictly left
    /// of the edge's intersection at that `y`. Points exactly on an edge resolve to whatever
    /// that formula yields; they are not guaranteed to be inside.
    fn in_polygon(&self, polygon: &[Self]) -> bool;
}

impl InPolygon for DVec2 {
    fn in_polygon(&self, polygon: &[DVec2]) -> bool {
        if polygon.len() < 3 {
            return false;
        }

        let mut inside = false;
        let mut j = polygon.len() - 1;
        for i in 0..polygon.len() {
            let pi = polygon[i];
            let pj = polygon[j];
            if (pi.y > self.y) != (pj.y > self.y) {
                let x_cross = (pj.x - pi.x) * (self.y - pi.y) / (pj.y - pi.y) + pi.x;
                if self.x < x_cross {
                    inside = !inside;
                }
            }
            j = i;
        }

        inside
    }
}

impl InPolygon for IVec2 {
    fn in_polygon(&self, polygon: &[IVec2]) -> bool {
        let vertices: Vec<DVec2> = polygon.iter().map(|v| v.as_dvec2()).collect();
        self.as_dvec2().in_polygon(&vertices)
    }
}

/// Axis-aligned bounds `(min, max)` of `points`, with both corners seeded at the origin.
///
/// The seeding means the box always contains `(0, 0)`; polygon fills scan from the grid
/// origin up to (but excluding) the largest vertex coordinate.
pub fn origin_anchored_bounds(points: &[Point]) -> (Point, Point) {
    points
        .iter()
        .fold((Point::ZERO, Point::ZERO), |(lo, hi), p| (lo.min(*p), hi.max(*p)))
}
