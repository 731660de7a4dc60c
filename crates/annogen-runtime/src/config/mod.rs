//! Configuration module for the annogen runtime.
//!
//! This module provides figment-based configuration loading and validation
//! for logging, feed input and output handling.

pub mod error;
pub mod loader;
pub mod schema;
pub mod validation;

pub use error::{ConfigError, ConfigResult};
pub use loader::{ConfigLoader, Profile, load_config, load_config_from_file};
pub use schema::{
    AnnogenConfig, InputConfig, LogFormat, LogLevel, LogOutput, LoggingConfig, OutputConfig,
    SpanEventConfig,
};
pub use validation::validate_config;
