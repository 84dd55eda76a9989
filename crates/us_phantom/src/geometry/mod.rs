//! Grid storage and integer geometry shared by regions and the scatterer generator.
pub mod grid;
pub mod point;

pub use grid::Grid;
pub use point::{origin_anchored_bounds, InPolygon, Point, Point3};
