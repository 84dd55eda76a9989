//! Validated, typed phantom configuration.
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crate::error::{Error, Result, ValidationReport};
use crate::region::RegionSpec;
use crate::sampling::Distribution;

/// Baseline speed of sound in soft tissue, in m/s.
pub const DEFAULT_SOUND_SPEED_M_S: f64 = 1540.0;

/// Baseline tissue density, in kg/m³.
pub const DEFAULT_DENSITY_KG_M3: f64 = 1000.0;

/// Output mode of the phantom.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PhantomFormat {
    /// Scatterer field only. Two-dimensional phantoms only.
    EffectiveScatterers,
    /// Scatterer field plus derived sound-speed and density maps.
    KWave,
}

impl PhantomFormat {
    /// Names accepted by [`PhantomFormat::from_str`] (`effective_scatterers` is also accepted).
    pub const SUPPORTED: [&'static str; 2] = ["effec_scatterers", "k_wave"];

    pub fn as_str(&self) -> &'static str {
        match self {
            PhantomFormat::EffectiveScatterers => "effec_scatterers",
            PhantomFormat::KWave => "k_wave",
        }
    }

    /// Whether fills also derive sound-speed and density maps.
    pub fn has_physical_maps(&self) -> bool {
        matches!(self, PhantomFormat::KWave)
    }
}

impl FromStr for PhantomFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "effec_scatterers" | "effective_scatterers" => Ok(PhantomFormat::EffectiveScatterers),
            "k_wave" => Ok(PhantomFormat::KWave),
            _ => Err(Error::UnsupportedFormat {
                name: s.to_owned(),
                supported: Self::SUPPORTED.join(" "),
            }),
        }
    }
}

impl fmt::Display for PhantomFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Immutable description of one phantom.
///
/// Built once by [`crate::config::validate_configuration`] (or by the `with_*` builders followed
/// by [`Configuration::validate`]) and passed by reference to every generation step.
#[non_exhaustive]
#[derive(Clone, Debug, PartialEq)]
pub struct Configuration {
    /// Number of rows (extent along `y`). Zero in image mode until the image supplies it.
    pub rows: usize,
    /// Number of columns (extent along `x`). Zero in image mode until the image supplies it.
    pub cols: usize,
    /// Number of slices (extent along `z`).
    pub depth: usize,
    pub distribution: Distribution,
    /// Target share of cells holding a scatterer, in `(0, 100]`.
    pub density_percent: f64,
    pub format: PhantomFormat,
    pub sound_speed_m_s: f64,
    pub density_kg_m3: f64,
    /// Regions in declared order; fills are applied in this order.
    pub regions: Vec<RegionSpec>,
    /// Grayscale image used as the field seed instead of regions.
    pub image_path: Option<PathBuf>,
    /// Enables fine-grained progress logging.
    pub verbose: bool,
}

impl Configuration {
    /// Creates a single-slice configuration without regions.
    pub fn new(
        cols: usize,
        rows: usize,
        distribution: Distribution,
        density_percent: f64,
        format: PhantomFormat,
    ) -> Self {
        Self {
            rows,
            cols,
            depth: 1,
            distribution,
            density_percent,
            format,
            sound_speed_m_s: DEFAULT_SOUND_SPEED_M_S,
            density_kg_m3: DEFAULT_DENSITY_KG_M3,
            regions: Vec::new(),
            image_path: None,
            verbose: false,
        }
    }

    /// Sets the number of slices.
    pub fn with_depth(mut self, depth: usize) -> Self {
        self.depth = depth;
        self
    }

    /// Sets the baseline sound speed in m/s.
    pub fn with_sound_speed(mut self, sound_speed_m_s: f64) -> Self {
        self.sound_speed_m_s = sound_speed_m_s;
        self
    }

    /// Sets the baseline density in kg/m³.
    pub fn with_density(mut self, density_kg_m3: f64) -> Self {
        self.density_kg_m3 = density_kg_m3;
        self
    }

    /// Appends a region after the existing ones.
    pub fn with_region(mut self, region: RegionSpec) -> Self {
        self.regions.push(region);
        self
    }

    /// Appends several regions in order.
    pub fn with_regions(mut self, regions: impl IntoIterator<Item = RegionSpec>) -> Self {
        self.regions.extend(regions);
        self
    }

    /// Uses an image as the field seed.
    pub fn with_image_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.image_path = Some(path.into());
        self
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Whether the phantom is seeded from an image instead of regions.
    pub fn is_image_based(&self) -> bool {
        self.image_path.is_some()
    }

    /// Runs the typed checks (ranges, combinations, region bounds), returning any warnings.
    ///
    /// All findings are aggregated into one [`Error::InvalidConfig`] report.
    pub fn validate(&self) -> Result<Vec<String>> {
        let mut report = ValidationReport::new();
        let mut warnings = Vec::new();
        super::validation::check_typed(self, &mut report, &mut warnings);
        if report.is_empty() {
            Ok(warnings)
        } else {
            Err(Error::InvalidConfig(report))
        }
    }
}
