//! Annogen command-line tool.
//!
//! Reads an annotation feed and writes the generated plugin registration
//! files.
//!
//! # Usage
//!
//! ```bash
//! annogen --feed annotations.jsonl
//! annogen --feed annotations.jsonl --dry-run
//! analyzer ./plugins | annogen --check -v
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use annogen_runtime::config::{ConfigLoader, LogLevel, validate_config};
use annogen_runtime::{Driver, logging};
use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use serde::Serialize;
use tracing::{debug, error, info};

/// Generate Go plugin registration code from an annotation feed.
#[derive(Debug, Parser)]
#[command(name = "annogen", version, about)]
struct Cli {
    /// Configuration file (defaults to `annogen.toml` in the current or user config directory).
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Annotation feed to read (JSON Lines). Reads stdin when omitted.
    #[arg(short, long, value_name = "FILE")]
    feed: Option<PathBuf>,

    /// Print generated files to stdout instead of writing them.
    #[arg(long, conflicts_with = "check")]
    dry_run: bool,

    /// Fail if any generated file on disk is out of date.
    #[arg(long)]
    check: bool,

    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

/// Command-line values layered over every configuration source.
#[derive(Debug, Serialize)]
struct Overrides {
    input: InputOverrides,
    output: OutputOverrides,
    #[serde(skip_serializing_if = "Option::is_none")]
    logging: Option<LoggingOverrides>,
}

#[derive(Debug, Serialize)]
struct InputOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    feed: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct OutputOverrides {
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    dry_run: bool,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    check: bool,
}

#[derive(Debug, Serialize)]
struct LoggingOverrides {
    level: LogLevel,
}

impl Cli {
    fn overrides(&self) -> Overrides {
        let level = match self.verbose {
            0 => None,
            1 => Some(LogLevel::Debug),
            _ => Some(LogLevel::Trace),
        };

        Overrides {
            input: InputOverrides {
                feed: self.feed.clone(),
            },
            output: OutputOverrides {
                dry_run: self.dry_run,
                check: self.check,
            },
            logging: level.map(|level| LoggingOverrides { level }),
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let mut loader = ConfigLoader::new();
    if let Some(path) = &cli.config {
        loader = loader.file(path);
    }
    let config = loader
        .merge(cli.overrides())
        .load()
        .context("Failed to load configuration")?;
    validate_config(&config)?;

    logging::init_from_config(&config.logging);
    debug!(?config, "Configuration resolved");

    let report = Driver::new(config).run()?;
    info!(total = report.total(), "Done");
    eprintln!("annogen: {report}");
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e:#}");
            eprintln!("annogen: error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_dry_run_conflicts_with_check() {
        assert!(Cli::try_parse_from(["annogen", "--dry-run", "--check"]).is_err());
    }

    #[test]
    fn test_overrides_layer_over_config() {
        let args = ["annogen", "--feed", "feed.jsonl", "--dry-run", "-vv"];
        let cli = Cli::try_parse_from(args).unwrap();
        let config = ConfigLoader::new()
            .search_path(std::env::temp_dir().join("annogen-no-such-dir"))
            .without_env()
            .merge(cli.overrides())
            .load()
            .unwrap();

        assert_eq!(config.input.feed, Some(PathBuf::from("feed.jsonl")));
        assert!(config.output.dry_run);
        assert!(!config.output.check);
        assert_eq!(config.logging.level, LogLevel::Trace);
    }

    #[test]
    fn test_absent_flags_keep_config() {
        let cli = Cli::try_parse_from(["annogen"]).unwrap();
        let config = ConfigLoader::new()
            .search_path(std::env::temp_dir().join("annogen-no-such-dir"))
            .without_env()
            .merge(cli.overrides())
            .load()
            .unwrap();

        assert_eq!(config.input.feed, None);
        assert_eq!(config.logging.level, LogLevel::Info);
    }
}
