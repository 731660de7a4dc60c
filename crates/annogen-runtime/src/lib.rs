//! Annogen Runtime - build orchestration for the annogen code generator.
//!
//! This crate provides:
//! - Configuration loading and validation (`config`)
//! - Logging setup (`logging`)
//! - Annotation feed decoding (`feed`)
//! - The build driver that turns a feed into generated files (`driver`)
//!
//! # Example
//!
//! ```rust,ignore
//! use annogen_runtime::{Driver, config::ConfigLoader, logging};
//!
//! fn main() -> anyhow::Result<()> {
//!     let config = ConfigLoader::new().load()?;
//!     logging::init_from_config(&config.logging);
//!
//!     let report = Driver::new(config).run()?;
//!     println!("{report}");
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod driver;
pub mod error;
pub mod feed;
pub mod logging;

// Re-exports
pub use config::{AnnogenConfig, ConfigError, ConfigLoader, ConfigResult};
pub use driver::{Driver, GenerationReport};
pub use error::{RuntimeError, RuntimeResult};
pub use logging::{LoggingBuilder, SpanEvents};

pub use tracing;
