//! # Annogen Framework
//!
//! Annotation aggregation and code emission.
//!
//! This layer provides:
//! - [`Engine`]: routes the annotation stream to one generator per output file
//! - [`FileGenerator`]: accumulates one file's plugin model and renders it
//! - [`CodeWriter`]: append-only Go source builder with a fixed emission order
//! - [`render`]: literal rendering of the metadata type system
//!
//! ## Example
//!
//! ```rust
//! use annogen_core::{AnnotationEvent, Occurrence, PluginAnnotation, PluginUsage, SourceLocation};
//! use annogen_framework::Engine;
//!
//! let location = SourceLocation::new("/src/plugins-demo/logic", "/src/plugins-demo", "logic");
//! let mut engine = Engine::new();
//! engine
//!     .process(&AnnotationEvent::Plugin(Occurrence::one(
//!         location.clone(),
//!         PluginAnnotation {
//!             plugin_type: "Switch".into(),
//!             name: "switch".into(),
//!             description: String::new(),
//!             usage: PluginUsage::Logic,
//!             version: "1.0.0".into(),
//!         },
//!     )))
//!     .unwrap();
//!
//! let files = engine.produce_output().unwrap();
//! assert!(files.contains_key(&location.output_path()));
//! assert!(engine.produce_output().unwrap().is_empty());
//! ```

pub mod engine;
pub mod generator;
pub mod render;
pub mod writer;

pub use engine::{Engine, GeneratedFiles};
pub use generator::FileGenerator;
pub use writer::{CodeWriter, PluginHeader};
