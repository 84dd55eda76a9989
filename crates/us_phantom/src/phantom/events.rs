//! Event types and sinks for observing phantom generation.
//!
//! This module defines [`PhantomEvent`] and a small set of sinks to ignore, forward or collect
//! events while [`crate::phantom::PhantomRunner`] assembles slices and composes the volume.
use crate::region::RegionKind;

/// Describes events emitted while generating a phantom.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq)]
pub enum PhantomEvent {
    /// Emitted once validation passed and generation begins.
    RunStarted {
        /// Number of slices to assemble.
        depth: usize,
        /// Field size `(cols, rows)`. Zero for image-based runs until the image is decoded.
        size: (usize, usize),
        /// Number of regions applied to each slice.
        region_count: usize,
    },

    /// Emitted when a slice starts assembling.
    SliceStarted { index: usize },

    /// Emitted after the random scatterers of a slice were drawn.
    ScatterersGenerated {
        slice: usize,
        /// Number of scatterers drawn (collisions included).
        count: usize,
    },

    /// Emitted after one region was rasterized onto a slice.
    RegionFilled {
        slice: usize,
        /// Position of the region in the configuration.
        region_index: usize,
        kind: RegionKind,
        /// Cells whose scatterer was multiplied by the gain.
        cells: usize,
    },

    /// Emitted when a slice is fully assembled.
    SliceFinished { index: usize },

    /// Emitted after a slice was handed to the slice store.
    SliceStored { index: usize, key: String },

    /// Emitted after a multi-slice volume was composed.
    VolumeComposed {
        /// Volume dimensions `(rows, cols, depth)`.
        dims: (usize, usize, usize),
    },

    /// Emitted when the run finishes.
    RunFinished { slices_written: usize },

    /// Non-fatal warning, e.g. from validation.
    Warning { context: String, message: String },
}

/// Discriminant of a [`PhantomEvent`], used for filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PhantomEventKind {
    RunStarted,
    SliceStarted,
    ScatterersGenerated,
    RegionFilled,
    SliceFinished,
    SliceStored,
    VolumeComposed,
    RunFinished,
    Warning,
}

impl PhantomEvent {
    pub fn kind(&self) -> PhantomEventKind {
        match self {
            PhantomEvent::RunStarted { .. } => PhantomEventKind::RunStarted,
            PhantomEvent::SliceStarted { .. } => PhantomEventKind::SliceStarted,
            PhantomEvent::ScatterersGenerated { .. } => PhantomEventKind::ScatterersGenerated,
            PhantomEvent::RegionFilled { .. } => PhantomEventKind::RegionFilled,
            PhantomEvent::SliceFinished { .. } => PhantomEventKind::SliceFinished,
            PhantomEvent::SliceStored { .. } => PhantomEventKind::SliceStored,
            PhantomEvent::VolumeComposed { .. } => PhantomEventKind::VolumeComposed,
            PhantomEvent::RunFinished { .. } => PhantomEventKind::RunFinished,
            PhantomEvent::Warning { .. } => PhantomEventKind::Warning,
        }
    }
}

/// A generic event sink that accepts [`PhantomEvent`]s.
pub trait EventSink {
    fn send(&mut self, event: PhantomEvent);

    /// Whether the sink cares about events of `kind`. Emitters skip building unwanted events.
    #[inline]
    fn wants(&self, _kind: PhantomEventKind) -> bool {
        true
    }
}

/// A no-op event sink.
impl EventSink for () {
    #[inline]
    fn send(&mut self, _event: PhantomEvent) {}

    #[inline]
    fn wants(&self, _kind: PhantomEventKind) -> bool {
        false
    }
}

/// An event sink that forwards to a user-provided closure.
pub struct FnSink<F>
where
    F: FnMut(PhantomEvent),
{
    f: F,
}

impl<F> FnSink<F>
where
    F: FnMut(PhantomEvent),
{
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

impl<F> EventSink for FnSink<F>
where
    F: FnMut(PhantomEvent),
{
    #[inline]
    fn send(&mut self, event: PhantomEvent) {
        (self.f)(event);
    }
}

/// An event sink that collects all events in a `Vec`.
#[derive(Default)]
pub struct VecSink {
    events: Vec<PhantomEvent>,
}

impl VecSink {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn into_inner(self) -> Vec<PhantomEvent> {
        self.events
    }

    pub fn as_slice(&self) -> &[PhantomEvent] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Number of collected events of `kind`.
    pub fn count(&self, kind: PhantomEventKind) -> usize {
        self.events.iter().filter(|e| e.kind() == kind).count()
    }
}

impl EventSink for VecSink {
    #[inline]
    fn send(&mut self, event: PhantomEvent) {
        self.events.push(event);
    }
}
