//! One assembled 2-D cross-section of the phantom.
use num_complex::Complex64;

use crate::config::Configuration;
use crate::geometry::Grid;
use crate::region::physics::{scattering_density, scattering_sound_speed};

/// Sound-speed and density maps of a k-Wave slice.
#[derive(Clone, Debug, PartialEq)]
pub struct PhysicalMaps {
    /// Speed of sound per cell, in m/s.
    pub sound_speed: Grid<f64>,
    /// Density per cell, in kg/m³.
    pub density: Grid<f64>,
}

impl PhysicalMaps {
    /// Maps of `cols × rows` filled with the baseline values.
    pub fn baseline(cols: usize, rows: usize, sound_speed_m_s: f64, density_kg_m3: f64) -> Self {
        Self {
            sound_speed: Grid::filled(cols, rows, sound_speed_m_s),
            density: Grid::filled(cols, rows, density_kg_m3),
        }
    }
}

/// Scatterer field of one slice plus, for k-Wave phantoms, its physical maps.
///
/// All grids share the same `cols × rows` shape.
#[derive(Clone, Debug, PartialEq)]
pub struct PhantomSlice {
    /// Position along the depth axis.
    pub index: usize,
    pub field: Grid<Complex64>,
    pub maps: Option<PhysicalMaps>,
}

impl PhantomSlice {
    /// A zero field of the configured size with baseline maps when the format needs them.
    pub fn baseline(index: usize, config: &Configuration) -> Self {
        Self::with_field(index, Grid::new(config.cols, config.rows), config)
    }

    /// Wraps an existing field, adding baseline maps of the same shape when the format needs them.
    pub fn with_field(index: usize, field: Grid<Complex64>, config: &Configuration) -> Self {
        let maps = config.format.has_physical_maps().then(|| {
            PhysicalMaps::baseline(
                field.cols(),
                field.rows(),
                config.sound_speed_m_s,
                config.density_kg_m3,
            )
        });
        Self { index, field, maps }
    }

    /// `(cols, rows)` of every grid in the slice.
    pub fn size(&self) -> (usize, usize) {
        self.field.size()
    }

    /// Multiply the scatterer at `(x, y)` by `gain` and, with physical maps, re-derive the
    /// sound speed and density from the new magnitude.
    ///
    /// Returns `false` without touching anything when `(x, y)` lies outside the field.
    pub fn apply_gain(&mut self, x: i32, y: i32, gain: f64, c0: f64) -> bool {
        let Some(cell) = self.field.get_mut(x, y) else {
            return false;
        };
        *cell *= gain;
        let amplitude = cell.norm();

        if let Some(maps) = &mut self.maps {
            let c = scattering_sound_speed(c0, amplitude);
            if let Some(v) = maps.sound_speed.get_mut(x, y) {
                *v = c;
            }
            if let Some(v) = maps.density.get_mut(x, y) {
                *v = scattering_density(c);
            }
        }
        true
    }

    /// Set the scatterer at `(x, y)` to amplitude 1 if it is exactly zero.
    pub fn seed_if_empty(&mut self, x: i32, y: i32) -> bool {
        match self.field.get_mut(x, y) {
            Some(cell) if *cell == Complex64::new(0.0, 0.0) => {
                *cell = Complex64::new(1.0, 0.0);
                true
            }
            _ => false,
        }
    }

    pub fn sound_speed(&self) -> Option<&Grid<f64>> {
        self.maps.as_ref().map(|m| &m.sound_speed)
    }

    pub fn density(&self) -> Option<&Grid<f64>> {
        self.maps.as_ref().map(|m| &m.density)
    }
}
