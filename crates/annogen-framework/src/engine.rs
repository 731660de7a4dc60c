//! Aggregation engine: routes annotation events to per-file generators.
//!
//! ```text
//! ┌──────────────────┐     ┌──────────┐     ┌───────────────────────────────┐
//! │ AnnotationEvent  │────▶│  Engine  │────▶│ FileGenerator  (dir a/)       │
//! │ (ordered stream) │     │ (routes  │────▶│ FileGenerator  (dir b/)       │
//! └──────────────────┘     │ by path) │────▶│ ...                           │
//!                          └──────────┘     └───────────────────────────────┘
//! ```
//!
//! One engine lives for one build. Generators are created on first sight of
//! their output path and receive the build's `@Module` binding whether it
//! arrived before or after them. [`Engine::produce_output`] emits every file
//! once; later calls return an empty map.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use annogen_core::{
    ActionAnnotation, AnnotationEvent, ConfigAnnotation, GenerateError, GenerateResult,
    ModuleAnnotation, Occurrence, PluginAnnotation, SourceLocation, StateAnnotation,
};
use tracing::{debug, info, warn};

use crate::generator::FileGenerator;

/// Generated file contents keyed by output path.
pub type GeneratedFiles = BTreeMap<PathBuf, Vec<u8>>;

/// Build-scoped aggregation of annotation events.
#[derive(Debug, Default)]
pub struct Engine {
    /// Generators keyed by output path.
    generators: BTreeMap<PathBuf, FileGenerator>,
    /// The build's module binding, kept for generators created later.
    module: Option<ModuleAnnotation>,
    /// Whether output has been produced.
    finalized: bool,
}

impl Engine {
    /// Creates an empty engine for one build.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of output files known so far.
    pub fn generator_count(&self) -> usize {
        self.generators.len()
    }

    /// Returns the generator owning `output_path`, if any event routed there.
    pub fn generator(&self, output_path: &Path) -> Option<&FileGenerator> {
        self.generators.get(output_path)
    }

    /// Whether [`Engine::produce_output`] has already emitted the files.
    pub fn is_finalized(&self) -> bool {
        self.finalized
    }

    /// Dispatches one event of the annotation stream.
    pub fn process(&mut self, event: &AnnotationEvent) -> GenerateResult<()> {
        match event {
            AnnotationEvent::Module(occurrence) => self.process_module(occurrence),
            AnnotationEvent::Plugin(occurrence) => self.process_plugin(occurrence),
            AnnotationEvent::State(occurrence) => self.process_state(occurrence),
            AnnotationEvent::Action(occurrence) => self.process_action(occurrence),
            AnnotationEvent::Config(occurrence) => self.process_config(occurrence),
        }
    }

    /// Records the build's `@Module` and hands it to every generator.
    pub fn process_module(
        &mut self,
        occurrence: &Occurrence<ModuleAnnotation>,
    ) -> GenerateResult<()> {
        let module = occurrence.single()?;
        if self.skip_if_finalized() {
            return Ok(());
        }
        if self.module.is_some() {
            return Err(GenerateError::DuplicateModule);
        }

        debug!(
            module = %occurrence.location.module_name(),
            generators = self.generators.len(),
            "Distributing module binding"
        );

        for generator in self.generators.values_mut() {
            generator.process_module_annotation(module);
        }
        self.module = Some(module.clone());
        Ok(())
    }

    /// Routes a `@Plugin` occurrence.
    pub fn process_plugin(
        &mut self,
        occurrence: &Occurrence<PluginAnnotation>,
    ) -> GenerateResult<()> {
        let plugin = occurrence.single()?;
        if self.skip_if_finalized() {
            return Ok(());
        }
        self.generator_for(&occurrence.location)
            .process_plugin_annotation(&occurrence.location, plugin)
    }

    /// Routes a `@State` occurrence.
    pub fn process_state(
        &mut self,
        occurrence: &Occurrence<StateAnnotation>,
    ) -> GenerateResult<()> {
        let state = occurrence.single()?;
        if self.skip_if_finalized() {
            return Ok(());
        }
        self.generator_for(&occurrence.location)
            .process_state_annotation(&occurrence.location, state);
        Ok(())
    }

    /// Routes an `@Action` occurrence.
    pub fn process_action(
        &mut self,
        occurrence: &Occurrence<ActionAnnotation>,
    ) -> GenerateResult<()> {
        let action = occurrence.single()?;
        if self.skip_if_finalized() {
            return Ok(());
        }
        self.generator_for(&occurrence.location)
            .process_action_annotation(&occurrence.location, action);
        Ok(())
    }

    /// Routes a `@Config` occurrence.
    pub fn process_config(
        &mut self,
        occurrence: &Occurrence<ConfigAnnotation>,
    ) -> GenerateResult<()> {
        let config = occurrence.single()?;
        if self.skip_if_finalized() {
            return Ok(());
        }
        self.generator_for(&occurrence.location)
            .process_config_annotation(&occurrence.location, config);
        Ok(())
    }

    /// Renders every generator, once.
    ///
    /// The first successful call returns one entry per output path and
    /// freezes the engine. Every later call returns an empty map.
    pub fn produce_output(&mut self) -> GenerateResult<GeneratedFiles> {
        if self.finalized {
            debug!("Output already produced");
            return Ok(GeneratedFiles::new());
        }

        let mut output = GeneratedFiles::new();
        for (output_path, generator) in &self.generators {
            output.insert(output_path.clone(), generator.output()?);
        }

        self.finalized = true;
        info!(files = output.len(), "Generated plugin registration code");

        Ok(output)
    }

    /// Whether output was already produced. Late events are logged and dropped.
    fn skip_if_finalized(&self) -> bool {
        if self.finalized {
            warn!("Annotation received after output was produced; ignored");
        }
        self.finalized
    }

    fn generator_for(&mut self, location: &SourceLocation) -> &mut FileGenerator {
        let module = &self.module;

        self.generators
            .entry(location.output_path())
            .or_insert_with(|| {
                let mut generator = FileGenerator::for_location(location);
                debug!(
                    output = %generator.output_path().display(),
                    module = %generator.module_name(),
                    "Created file generator"
                );
                if let Some(module) = module {
                    generator.process_module_annotation(module);
                }
                generator
            })
    }
}
