//! High-level runner that validates, assembles, persists and composes a phantom.
use rand::RngCore;
use tracing::{info, warn};

use crate::config::Configuration;
use crate::error::{Error, Result};
use crate::phantom::assembler::PhantomAssembler;
use crate::phantom::compositor::{PhantomVolume, SliceCompositor};
use crate::phantom::events::{EventSink, PhantomEvent, PhantomEventKind};
use crate::phantom::image::{ImageSeedPolicy, IntensitySource};
use crate::phantom::slice::PhantomSlice;
use crate::phantom::store::{slice_key, SliceStore};

/// Prefix of slice keys when none is configured.
pub const DEFAULT_OUTPUT_PREFIX: &str = "phantom";

/// Options for running a phantom generation.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOptions {
    /// How decoded image intensities are treated in image-based runs.
    pub image_policy: ImageSeedPolicy,
    /// Hand each slice to the store as soon as it is assembled and compose the volume from the
    /// store. When `false` all slices are kept in memory and composed directly.
    pub stream_slices: bool,
    /// Prefix of the slice keys, see [`slice_key`].
    pub output_prefix: String,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            image_policy: ImageSeedPolicy::default(),
            stream_slices: true,
            output_prefix: DEFAULT_OUTPUT_PREFIX.to_owned(),
        }
    }
}

impl RunOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_image_policy(mut self, image_policy: ImageSeedPolicy) -> Self {
        self.image_policy = image_policy;
        self
    }

    pub fn with_stream_slices(mut self, stream_slices: bool) -> Self {
        self.stream_slices = stream_slices;
        self
    }

    pub fn with_output_prefix(mut self, output_prefix: impl Into<String>) -> Self {
        self.output_prefix = output_prefix.into();
        self
    }
}

/// Result of a phantom run.
#[non_exhaustive]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunResult {
    /// Keys of the slices handed to the store, in slice order.
    pub keys: Vec<String>,
    /// Composed volume of a multi-slice phantom.
    pub volume: Option<PhantomVolume>,
    /// Validation warnings.
    pub warnings: Vec<String>,
}

impl RunResult {
    pub fn slices_written(&self) -> usize {
        self.keys.len()
    }
}

pub struct PhantomRunner<'a> {
    /// Validated configuration driving the run.
    pub config: Configuration,
    pub options: RunOptions,
    warnings: Vec<String>,
    image_source: Option<&'a dyn IntensitySource>,
}

impl<'a> PhantomRunner<'a> {
    /// Validate `config` and create a runner. All findings are reported at once.
    pub fn try_new(config: Configuration, options: RunOptions) -> Result<Self> {
        let warnings = config.validate()?;
        Ok(Self {
            config,
            options,
            warnings,
            image_source: None,
        })
    }

    /// Decoder used for image-based configurations.
    pub fn with_image_source(mut self, source: &'a dyn IntensitySource) -> Self {
        self.image_source = Some(source);
        self
    }

    /// Warnings raised while validating the configuration.
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    /// Runs the generation, handing every slice to `store`.
    pub fn run(&self, store: &mut dyn SliceStore, rng: &mut dyn RngCore) -> Result<RunResult> {
        self.run_with_events(store, rng, &mut ())
    }

    pub fn run_with_events(
        &self,
        store: &mut dyn SliceStore,
        rng: &mut dyn RngCore,
        sink: &mut dyn EventSink,
    ) -> Result<RunResult> {
        let config = &self.config;
        info!(
            "Generating {} phantom of {}x{}x{} (cols, rows, slices) with {} scatterers at {} %.",
            config.format,
            config.cols,
            config.rows,
            config.depth,
            config.distribution,
            config.density_percent
        );

        for message in &self.warnings {
            warn!("{}", message);
            if sink.wants(PhantomEventKind::Warning) {
                sink.send(PhantomEvent::Warning {
                    context: "configuration".into(),
                    message: message.clone(),
                });
            }
        }

        if sink.wants(PhantomEventKind::RunStarted) {
            sink.send(PhantomEvent::RunStarted {
                depth: config.depth,
                size: (config.cols, config.rows),
                region_count: config.regions.len(),
            });
        }

        let mut result = RunResult {
            warnings: self.warnings.clone(),
            ..Default::default()
        };

        if config.is_image_based() {
            self.run_image(store, rng, sink, &mut result)?;
        } else {
            self.run_regions(store, rng, sink, &mut result)?;
        }

        info!("Phantom generation finished: {} slice(s) written.", result.slices_written());
        if sink.wants(PhantomEventKind::RunFinished) {
            sink.send(PhantomEvent::RunFinished {
                slices_written: result.slices_written(),
            });
        }
        Ok(result)
    }

    fn run_image(
        &self,
        store: &mut dyn SliceStore,
        rng: &mut dyn RngCore,
        sink: &mut dyn EventSink,
        result: &mut RunResult,
    ) -> Result<()> {
        let path = self
            .config
            .image_path
            .as_deref()
            .ok_or_else(|| Error::Other("configuration has no image path".into()))?;
        let source = self.image_source.ok_or_else(|| {
            Error::Other(format!(
                "no intensity source was provided for image '{}'",
                path.display()
            ))
        })?;

        let image = source.decode(path)?;
        info!(
            "Seeding phantom from image '{}' of {}x{} pixels ({:?}).",
            path.display(),
            image.cols(),
            image.rows(),
            self.options.image_policy
        );

        let assembler = PhantomAssembler::new(&self.config);
        let slice = assembler.assemble_from_image_with_events(
            &image,
            self.options.image_policy,
            rng,
            sink,
        )?;
        self.store_slice(store, &slice, 1, sink, result)
    }

    fn run_regions(
        &self,
        store: &mut dyn SliceStore,
        rng: &mut dyn RngCore,
        sink: &mut dyn EventSink,
        result: &mut RunResult,
    ) -> Result<()> {
        let config = &self.config;
        let assembler = PhantomAssembler::new(config);
        let compositor = SliceCompositor::new(config);
        let prefix = self.options.output_prefix.as_str();

        let volume = if self.options.stream_slices {
            for z in 0..config.depth {
                info!("Assembling slice {}/{}.", z + 1, config.depth);
                let slice = assembler.assemble_slice_with_events(z, rng, sink)?;
                self.store_slice(store, &slice, config.depth, sink, result)?;
            }
            compositor.compose_from_store(store, prefix)?
        } else {
            let mut slices = Vec::with_capacity(config.depth);
            for z in 0..config.depth {
                info!("Assembling slice {}/{}.", z + 1, config.depth);
                slices.push(assembler.assemble_slice_with_events(z, rng, sink)?);
            }
            let volume = compositor.compose(&slices)?;
            for slice in &slices {
                self.store_slice(store, slice, config.depth, sink, result)?;
            }
            volume
        };

        if let Some(volume) = &volume {
            store.put_volume(prefix, volume)?;
            if sink.wants(PhantomEventKind::VolumeComposed) {
                sink.send(PhantomEvent::VolumeComposed {
                    dims: volume.dims(),
                });
            }
        }
        result.volume = volume;
        Ok(())
    }

    fn store_slice(
        &self,
        store: &mut dyn SliceStore,
        slice: &PhantomSlice,
        depth: usize,
        sink: &mut dyn EventSink,
        result: &mut RunResult,
    ) -> Result<()> {
        let key = slice_key(&self.options.output_prefix, slice.index, depth);
        store.put(&key, slice)?;
        if sink.wants(PhantomEventKind::SliceStored) {
            sink.send(PhantomEvent::SliceStored {
                index: slice.index,
                key: key.clone(),
            });
        }
        result.keys.push(key);
        Ok(())
    }
}

/// Validate `config` and generate the phantom into `store`.
///
/// `image_source` is only consulted for image-based configurations.
pub fn generate_phantom(
    config: &Configuration,
    options: &RunOptions,
    image_source: Option<&dyn IntensitySource>,
    store: &mut dyn SliceStore,
    rng: &mut dyn RngCore,
) -> Result<RunResult> {
    let mut runner = PhantomRunner::try_new(config.clone(), options.clone())?;
    if let Some(source) = image_source {
        runner = runner.with_image_source(source);
    }
    runner.run(store, rng)
}
