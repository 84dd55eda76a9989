//! Phantom assembly, persistence and composition.
//!
//! A run validates the configuration, assembles one [`PhantomSlice`] per depth index with the
//! [`PhantomAssembler`], hands every slice to a [`SliceStore`] and, for multi-slice phantoms,
//! stacks the slices into a [`PhantomVolume`] with the [`SliceCompositor`].
pub mod assembler;
pub mod compositor;
pub mod events;
pub mod image;
pub mod run;
pub mod slice;
pub mod store;

pub use assembler::PhantomAssembler;
pub use compositor::{PhantomVolume, SliceCompositor, Volume};
pub use events::{EventSink, FnSink, PhantomEvent, PhantomEventKind, VecSink};
pub use image::{FnSource, ImageSeedPolicy, IntensitySource};
pub use run::{generate_phantom, PhantomRunner, RunOptions, RunResult, DEFAULT_OUTPUT_PREFIX};
pub use slice::{PhantomSlice, PhysicalMaps};
pub use store::{slice_key, MemorySliceStore, SliceStore};
