//! Assembly of single slices.
use num_complex::Complex64;
use rand::RngCore;
use tracing::debug;

use crate::config::Configuration;
use crate::error::Result;
use crate::geometry::Grid;
use crate::phantom::events::{EventSink, PhantomEvent, PhantomEventKind};
use crate::phantom::image::ImageSeedPolicy;
use crate::phantom::slice::PhantomSlice;
use crate::sampling::ScattererFieldGenerator;

/// Builds one [`PhantomSlice`] at a time from a validated configuration.
///
/// Region-based slices start from a zero field and baseline maps, receive the random scatterers,
/// then every region of the configuration in declared order. Slices do not depend on each other.
pub struct PhantomAssembler<'a> {
    config: &'a Configuration,
    generator: ScattererFieldGenerator,
}

impl<'a> PhantomAssembler<'a> {
    pub fn new(config: &'a Configuration) -> Self {
        Self {
            config,
            generator: ScattererFieldGenerator::from_config(config),
        }
    }

    /// Replace the scatterer generator, e.g. to change the position sampling.
    pub fn with_generator(mut self, generator: ScattererFieldGenerator) -> Self {
        self.generator = generator;
        self
    }

    pub fn config(&self) -> &Configuration {
        self.config
    }

    /// Assemble slice `index` from the configured regions.
    pub fn assemble_slice(&self, index: usize, rng: &mut dyn RngCore) -> Result<PhantomSlice> {
        self.assemble_slice_with_events(index, rng, &mut ())
    }

    pub fn assemble_slice_with_events(
        &self,
        index: usize,
        rng: &mut dyn RngCore,
        sink: &mut dyn EventSink,
    ) -> Result<PhantomSlice> {
        if sink.wants(PhantomEventKind::SliceStarted) {
            sink.send(PhantomEvent::SliceStarted { index });
        }

        let mut slice = PhantomSlice::baseline(index, self.config);
        let count = self.generator.populate(&mut slice.field, rng)?;
        if sink.wants(PhantomEventKind::ScatterersGenerated) {
            sink.send(PhantomEvent::ScatterersGenerated {
                slice: index,
                count,
            });
        }

        for (i, region) in self.config.regions.iter().enumerate() {
            let cells = region.fill(&mut slice, self.config);
            debug!(
                "Slice {}: filled structure #{} ({}) on {} cells.",
                index,
                i,
                region.kind(),
                cells
            );
            if sink.wants(PhantomEventKind::RegionFilled) {
                sink.send(PhantomEvent::RegionFilled {
                    slice: index,
                    region_index: i,
                    kind: region.kind(),
                    cells,
                });
            }
        }

        if sink.wants(PhantomEventKind::SliceFinished) {
            sink.send(PhantomEvent::SliceFinished { index });
        }
        Ok(slice)
    }

    /// Assemble the single slice of an image-based phantom.
    ///
    /// The decoded intensities become the real part of the field; regions are not applied.
    /// With [`ImageSeedPolicy::Overlay`] random scatterers overwrite the drawn cells.
    pub fn assemble_from_image(
        &self,
        image: &Grid<f64>,
        policy: ImageSeedPolicy,
        rng: &mut dyn RngCore,
    ) -> Result<PhantomSlice> {
        self.assemble_from_image_with_events(image, policy, rng, &mut ())
    }

    pub fn assemble_from_image_with_events(
        &self,
        image: &Grid<f64>,
        policy: ImageSeedPolicy,
        rng: &mut dyn RngCore,
        sink: &mut dyn EventSink,
    ) -> Result<PhantomSlice> {
        if sink.wants(PhantomEventKind::SliceStarted) {
            sink.send(PhantomEvent::SliceStarted { index: 0 });
        }

        let field = image.map(|v| Complex64::new(*v, 0.0));
        let mut slice = PhantomSlice::with_field(0, field, self.config);

        if policy == ImageSeedPolicy::Overlay {
            let count = self.generator.populate(&mut slice.field, rng)?;
            if sink.wants(PhantomEventKind::ScatterersGenerated) {
                sink.send(PhantomEvent::ScatterersGenerated { slice: 0, count });
            }
        }

        if sink.wants(PhantomEventKind::SliceFinished) {
            sink.send(PhantomEvent::SliceFinished { index: 0 });
        }
        Ok(slice)
    }
}
