//! Configuration validation utilities.

use super::error::{ConfigError, ConfigResult};
use super::schema::{AnnogenConfig, InputConfig, LogOutput, LoggingConfig, OutputConfig};

/// Validates the entire configuration.
pub fn validate_config(config: &AnnogenConfig) -> ConfigResult<()> {
    validate_logging_config(&config.logging)?;
    validate_input_config(&config.input)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates logging settings.
fn validate_logging_config(logging: &LoggingConfig) -> ConfigResult<()> {
    if logging
        .file_path
        .as_ref()
        .is_some_and(|path| path.as_os_str().is_empty())
    {
        return Err(ConfigError::validation("Log file path must not be empty"));
    }

    if logging.output == LogOutput::File && logging.file_path.is_none() {
        return Err(ConfigError::validation(
            "logging.file_path is required when logging.output = \"file\"",
        ));
    }

    for module in logging.filters.keys() {
        if module.trim().is_empty() {
            return Err(ConfigError::validation("Log filter module must not be empty"));
        }
    }

    Ok(())
}

/// Validates feed settings.
fn validate_input_config(input: &InputConfig) -> ConfigResult<()> {
    if input
        .feed
        .as_ref()
        .is_some_and(|feed| feed.as_os_str().is_empty())
    {
        return Err(ConfigError::validation("input.feed must not be empty"));
    }
    Ok(())
}

/// Validates output settings.
fn validate_output_config(output: &OutputConfig) -> ConfigResult<()> {
    if output.dry_run && output.check {
        return Err(ConfigError::validation(
            "output.dry_run and output.check are mutually exclusive",
        ));
    }

    if output
        .base_dir
        .as_ref()
        .is_some_and(|dir| dir.as_os_str().is_empty())
    {
        return Err(ConfigError::validation("output.base_dir must not be empty"));
    }

    Ok(())
}
