//! Sound speed and density derived from scatterer amplitude for k-Wave phantoms.

/// Offset added to the baseline sound speed inside a region, in m/s.
pub const SOUND_SPEED_OFFSET_M_S: f64 = 25.0;

/// Sound-speed increase per unit of scatterer amplitude, in m/s.
pub const SOUND_SPEED_PER_AMPLITUDE: f64 = 75.0;

pub const MIN_SOUND_SPEED_M_S: f64 = 1400.0;
pub const MAX_SOUND_SPEED_M_S: f64 = 1600.0;

/// Ratio between sound speed (m/s) and density (kg/m³) inside a region.
pub const SOUND_SPEED_PER_DENSITY: f64 = 1.5;

/// Sound speed of a cell holding a scatterer of magnitude `amplitude`.
///
/// `clamp(c0 + 25 + 75·amplitude, 1400, 1600)`.
#[inline]
pub fn scattering_sound_speed(c0: f64, amplitude: f64) -> f64 {
    (c0 + SOUND_SPEED_OFFSET_M_S + SOUND_SPEED_PER_AMPLITUDE * amplitude)
        .clamp(MIN_SOUND_SPEED_M_S, MAX_SOUND_SPEED_M_S)
}

/// Density of a cell with the given scattering sound speed.
#[inline]
pub fn scattering_density(sound_speed: f64) -> f64 {
    sound_speed / SOUND_SPEED_PER_DENSITY
}
