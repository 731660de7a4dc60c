//! # Annogen Core
//!
//! The data model shared by every layer of the annogen plugin code generator.
//!
//! An external front end walks a source tree and discovers annotated
//! declarations (`@Module`, `@Plugin`, `@State`, `@Action`, `@Config`). Each
//! discovery becomes an [`AnnotationEvent`] carrying a [`SourceLocation`] and
//! the annotation payloads found at that occurrence. The framework layer
//! aggregates those events per output file and emits Go registration code.
//!
//! ## Layers
//!
//! - **Metadata**: the closed type system of the plugin registry
//!   ([`Type`], [`ConfigType`], [`PluginUsage`])
//! - **Annotations**: payloads, occurrences and the tagged event feed
//!   ([`PluginAnnotation`], [`Occurrence`], [`AnnotationEvent`])
//! - **Errors**: the generation error taxonomy ([`GenerateError`])
//!
//! ## Example
//!
//! ```rust
//! use annogen_core::{Occurrence, PluginAnnotation, PluginUsage, SourceLocation};
//!
//! let location = SourceLocation::new("/src/plugins-demo/logic", "/src/plugins-demo", "logic");
//! let occurrence = Occurrence::new(
//!     location,
//!     vec![PluginAnnotation {
//!         plugin_type: "ValueBinary".into(),
//!         name: "value-binary".into(),
//!         description: "Binary value".into(),
//!         usage: PluginUsage::Logic,
//!         version: "1.0.0".into(),
//!     }],
//! );
//!
//! assert_eq!(occurrence.single().unwrap().name, "value-binary");
//! assert_eq!(occurrence.location.module_name(), "plugins-demo");
//! ```

pub mod annotation;
pub mod error;
pub mod metadata;

pub use annotation::{
    ActionAnnotation, Annotation, AnnotationEvent, AnnotationKind, ConfigAnnotation,
    GENERATED_FILE_NAME, ModuleAnnotation, Occurrence, PluginAnnotation, SourceLocation,
    StateAnnotation,
};
pub use error::{GenerateError, GenerateResult};
pub use metadata::{ConfigType, PluginUsage, Type};

/// Prelude for common imports.
pub mod prelude {
    pub use super::annotation::*;
    pub use super::error::{GenerateError, GenerateResult};
    pub use super::metadata::*;
}
