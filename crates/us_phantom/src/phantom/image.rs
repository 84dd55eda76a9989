//! Image-seeded phantoms.
//!
//! Pixel decoding lives outside the crate. An [`IntensitySource`] hands over an already decoded
//! grayscale intensity grid, which becomes the scatterer field of the single slice.
use std::path::Path;

use crate::error::Result;
use crate::geometry::Grid;

/// Supplies the decoded intensity grid for an image path.
pub trait IntensitySource {
    fn decode(&self, path: &Path) -> Result<Grid<f64>>;
}

/// A grid that was decoded up front. The path is ignored.
impl IntensitySource for Grid<f64> {
    fn decode(&self, _path: &Path) -> Result<Grid<f64>> {
        Ok(self.clone())
    }
}

/// An intensity source that forwards to a user-provided closure.
pub struct FnSource<F>
where
    F: Fn(&Path) -> Result<Grid<f64>>,
{
    f: F,
}

impl<F> FnSource<F>
where
    F: Fn(&Path) -> Result<Grid<f64>>,
{
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

impl<F> IntensitySource for FnSource<F>
where
    F: Fn(&Path) -> Result<Grid<f64>>,
{
    fn decode(&self, path: &Path) -> Result<Grid<f64>> {
        (self.f)(path)
    }
}

/// What happens to the decoded intensities when an image seeds the field.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ImageSeedPolicy {
    /// Keep the intensities and overlay random scatterers at the drawn positions.
    #[default]
    Overlay,
    /// Keep the intensities untouched; no scatterers are drawn.
    Retain,
}
