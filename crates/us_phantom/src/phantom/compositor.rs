//! Stacking of 2-D slices into 3-D volumes.
use num_complex::Complex64;
use tracing::info;

use crate::config::{Configuration, PhantomFormat};
use crate::error::{Error, Result};
use crate::geometry::Grid;
use crate::phantom::slice::PhantomSlice;
use crate::phantom::store::{slice_key, SliceStore};

/// Dense `rows × cols × depth` volume indexed `(row, col, slice)`.
///
/// Slices are stored contiguously in ascending order, each row-major like [`Grid`].
#[derive(Clone, Debug, PartialEq)]
pub struct Volume<T> {
    rows: usize,
    cols: usize,
    depth: usize,
    data: Vec<T>,
}

impl<T: Clone> Volume<T> {
    /// An empty volume accepting `cols × rows` slices.
    pub fn new(cols: usize, rows: usize) -> Self {
        Self {
            rows,
            cols,
            depth: 0,
            data: Vec::new(),
        }
    }

    /// Append `grid` as the next slice.
    pub fn push_slice(&mut self, grid: &Grid<T>) -> Result<()> {
        if grid.size() != (self.cols, self.rows) {
            return Err(Error::ShapeMismatch {
                index: self.depth,
                expected: (self.cols, self.rows),
                actual: grid.size(),
            });
        }
        self.data.extend_from_slice(grid.as_slice());
        self.depth += 1;
        Ok(())
    }

    /// `(rows, cols, depth)`.
    pub fn dims(&self) -> (usize, usize, usize) {
        (self.rows, self.cols, self.depth)
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn get(&self, row: usize, col: usize, slice: usize) -> Option<&T> {
        if row >= self.rows || col >= self.cols || slice >= self.depth {
            return None;
        }
        self.data
            .get(slice * self.rows * self.cols + row * self.cols + col)
    }

    /// Row-major data of slice `index`.
    pub fn slice(&self, index: usize) -> Option<&[T]> {
        if index >= self.depth {
            return None;
        }
        let n = self.rows * self.cols;
        self.data.get(index * n..(index + 1) * n)
    }

    /// Copy of slice `index` as a grid.
    pub fn slice_grid(&self, index: usize) -> Option<Grid<T>> {
        let data = self.slice(index)?.to_vec();
        Grid::from_vec(self.cols, self.rows, data).ok()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.data
    }
}

/// Composed arrays of a multi-slice phantom.
#[derive(Clone, Debug, PartialEq)]
pub struct PhantomVolume {
    pub field: Volume<Complex64>,
    /// Present for k-Wave phantoms.
    pub sound_speed: Option<Volume<f64>>,
    /// Present for k-Wave phantoms.
    pub density: Option<Volume<f64>>,
}

impl PhantomVolume {
    pub const FIELD_NAME: &'static str = "phantom";
    pub const SOUND_SPEED_NAME: &'static str = "sound_speed_map";
    pub const DENSITY_NAME: &'static str = "density_map";

    fn empty(cols: usize, rows: usize, format: PhantomFormat) -> Self {
        let maps = format.has_physical_maps();
        Self {
            field: Volume::new(cols, rows),
            sound_speed: maps.then(|| Volume::new(cols, rows)),
            density: maps.then(|| Volume::new(cols, rows)),
        }
    }

    fn push(&mut self, slice: &PhantomSlice) -> Result<()> {
        let expected = self.sound_speed.is_some();
        if expected != slice.maps.is_some() {
            return Err(Error::MapsMismatch {
                index: slice.index,
                expected,
            });
        }
        self.field.push_slice(&slice.field)?;
        if let (Some(volume), Some(maps)) = (self.sound_speed.as_mut(), slice.maps.as_ref()) {
            volume.push_slice(&maps.sound_speed)?;
        }
        if let (Some(volume), Some(maps)) = (self.density.as_mut(), slice.maps.as_ref()) {
            volume.push_slice(&maps.density)?;
        }
        Ok(())
    }

    /// `(rows, cols, depth)` of the composed arrays.
    pub fn dims(&self) -> (usize, usize, usize) {
        self.field.dims()
    }

    /// Array names of the volume as handed to a volume consumer.
    pub fn names(&self) -> Vec<&'static str> {
        let mut names = vec![Self::FIELD_NAME];
        if self.sound_speed.is_some() {
            names.push(Self::SOUND_SPEED_NAME);
        }
        if self.density.is_some() {
            names.push(Self::DENSITY_NAME);
        }
        names
    }
}

/// Stacks the slices of a multi-slice phantom in ascending slice order.
///
/// Composition is a no-op for single-slice phantoms.
#[derive(Clone, Copy, Debug)]
pub struct SliceCompositor {
    cols: usize,
    rows: usize,
    depth: usize,
    format: PhantomFormat,
}

impl SliceCompositor {
    pub fn new(config: &Configuration) -> Self {
        Self {
            cols: config.cols,
            rows: config.rows,
            depth: config.depth,
            format: config.format,
        }
    }

    /// Compose in-memory slices. Slice `i` of the iterator must have index `i`.
    pub fn compose<'s>(
        &self,
        slices: impl IntoIterator<Item = &'s PhantomSlice>,
    ) -> Result<Option<PhantomVolume>> {
        if self.depth <= 1 {
            return Ok(None);
        }

        let mut volume = PhantomVolume::empty(self.cols, self.rows, self.format);
        let mut slices = slices.into_iter();
        for index in 0..self.depth {
            match slices.next() {
                Some(slice) if slice.index == index => volume.push(slice)?,
                _ => return Err(Error::MissingSlice { index }),
            }
        }

        info!("Composed volume of {:?} (rows, cols, slices).", volume.dims());
        Ok(Some(volume))
    }

    /// Compose slices previously handed to `store` under `prefix`.
    pub fn compose_from_store(
        &self,
        store: &dyn SliceStore,
        prefix: &str,
    ) -> Result<Option<PhantomVolume>> {
        if self.depth <= 1 {
            return Ok(None);
        }

        let mut volume = PhantomVolume::empty(self.cols, self.rows, self.format);
        for index in 0..self.depth {
            let key = slice_key(prefix, index, self.depth);
            let slice = store.load(&key)?.ok_or(Error::MissingSlice { index })?;
            volume.push(&slice)?;
        }

        info!(
            "Composed volume of {:?} (rows, cols, slices) from stored slices.",
            volume.dims()
        );
        Ok(Some(volume))
    }
}
