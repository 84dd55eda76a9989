#![forbid(unsafe_code)]
//! us_phantom: Synthetic ultrasound phantoms built from random complex scatterers and geometric
//! regions.
//!
//! Modules:
//! - config: raw configuration documents, the typed configuration and aggregated validation
//! - geometry: grid coordinates, polygon containment and dense grids
//! - region: circle, rectangle, free polygon, point set and sphere regions with bounds checks and
//!   fills
//! - sampling: scatterer position sampling, amplitude/phase distributions, field generation
//! - phantom: slice assembly, image seeding, slice persistence seam, volume composition, runner and
//!   events
//!
//! For an overview, see the README.
pub mod config;
pub mod error;
pub mod geometry;
pub mod phantom;
pub mod region;
pub mod sampling;

/// Convenient re-exports for common types. Import with `use us_phantom::prelude::*;`.
pub mod prelude {
    pub use crate::config::{
        validate_configuration, Configuration, PhantomDocument, PhantomFormat, RegionDocument,
        Validated, DEFAULT_DENSITY_KG_M3, DEFAULT_SOUND_SPEED_M_S,
    };
    pub use crate::error::{Error, IssueKind, Result, ValidationIssue, ValidationReport};
    pub use crate::geometry::{Grid, InPolygon, Point, Point3};
    pub use crate::phantom::{
        generate_phantom, slice_key, EventSink, FnSink, FnSource, ImageSeedPolicy, IntensitySource,
        MemorySliceStore, PhantomAssembler, PhantomEvent, PhantomEventKind, PhantomRunner,
        PhantomSlice, PhantomVolume, PhysicalMaps, RunOptions, RunResult, SliceCompositor,
        SliceStore, VecSink, Volume, DEFAULT_OUTPUT_PREFIX,
    };
    pub use crate::region::{
        Circle, Extent, PointSet, Polygon, Rectangle, Region, RegionKind, RegionSpec, Sphere,
    };
    pub use crate::sampling::{
        AmplitudeLaw, Distribution, NormalizedUniformSampling, PositionSampling,
        ScattererFieldGenerator, UniformRandomSampling,
    };
}
