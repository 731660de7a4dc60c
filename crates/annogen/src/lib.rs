//! # Annogen
//!
//! Generates Go plugin registration code from source annotations.
//!
//! ## Overview
//!
//! A source analyzer discovers `@Module`, `@Plugin`, `@State`, `@Action` and
//! `@Config` annotations in a Go plugin tree and streams them as
//! [`AnnotationEvent`](core::AnnotationEvent)s. Annogen groups them by source
//! directory and emits one `zzz_plugins_annotations_generated.go` file per
//! plugin package, whose `init` function registers the plugin type with the
//! host registry.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────┐     ┌────────┐     ┌──────────────────────────────┐     ┌────────┐
//! │   Feed   │────▶│ Engine │────▶│ FileGenerator (one per dir)  │────▶│ Driver │──▶ files
//! │ (JSONL)  │     │        │────▶│ FileGenerator ...            │     │        │
//! └──────────┘     └────────┘     └──────────────────────────────┘     └────────┘
//! ```
//!
//! - **Engine**: routes each event to the generator owning its output path
//! - **FileGenerator**: accumulates one plugin model, renders it via `CodeWriter`
//! - **Driver**: writes, prints (dry run) or checks the produced files
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use annogen::prelude::*;
//!
//! let events = feed::read_events_from_file("annotations.jsonl")?;
//! let mut engine = Engine::new();
//! for event in &events {
//!     engine.process(event)?;
//! }
//! for (path, content) in engine.produce_output()? {
//!     std::fs::write(path, content)?;
//! }
//! ```
//!
//! ## Features
//!
//! - `toml-config`: TOML configuration files (default)
//! - `yaml-config`: YAML configuration files
//! - `json-log`: JSON log output

pub use annogen_core as core;
pub use annogen_framework as framework;
pub use annogen_runtime as runtime;

/// Prelude module for convenient imports.
///
/// ```rust,ignore
/// use annogen::prelude::*;
/// ```
pub mod prelude {
    // Annotation model
    pub use annogen_core::prelude::*;

    // Aggregation and rendering
    pub use annogen_framework::{CodeWriter, Engine, FileGenerator, GeneratedFiles};

    // Build orchestration
    pub use annogen_runtime::{
        AnnogenConfig, ConfigLoader, Driver, GenerationReport, RuntimeError, RuntimeResult, feed,
    };
}
