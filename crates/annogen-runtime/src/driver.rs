//! Generation build driver.
//!
//! A [`Driver`] runs one build: it feeds every annotation event to a fresh
//! [`Engine`] in order, produces the output mapping once, then emits each
//! file according to the output settings:
//!
//! - default: write the file unless its content is already identical
//! - `dry_run`: print every file to the given writer, touch nothing
//! - `check`: compare against disk and fail on any stale or missing file

use std::fmt;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use annogen_core::AnnotationEvent;
use annogen_framework::{Engine, GeneratedFiles};
use tracing::{debug, info, info_span};

use crate::config::AnnogenConfig;
use crate::error::{RuntimeError, RuntimeResult};
use crate::feed;

/// Files touched or inspected by one build.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationReport {
    /// Files whose content was (re)written.
    pub written: Vec<PathBuf>,
    /// Files already up to date.
    pub unchanged: Vec<PathBuf>,
    /// Files that differ from the fresh output (check mode).
    pub stale: Vec<PathBuf>,
    /// Files printed instead of written (dry-run mode).
    pub printed: Vec<PathBuf>,
}

impl GenerationReport {
    /// Total number of generated files covered by the report.
    pub fn total(&self) -> usize {
        self.written.len() + self.unchanged.len() + self.stale.len() + self.printed.len()
    }
}

impl fmt::Display for GenerationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.printed.is_empty() {
            return write!(f, "{} file(s) printed (dry run)", self.printed.len());
        }
        write!(
            f,
            "{} written, {} unchanged",
            self.written.len(),
            self.unchanged.len()
        )?;
        if !self.stale.is_empty() {
            write!(f, ", {} stale", self.stale.len())?;
        }
        Ok(())
    }
}

/// Runs generation builds for one configuration.
#[derive(Debug, Clone)]
pub struct Driver {
    config: AnnogenConfig,
}

impl Driver {
    /// Creates a driver for `config`.
    pub fn new(config: AnnogenConfig) -> Self {
        Self { config }
    }

    /// The configuration this driver runs with.
    pub fn config(&self) -> &AnnogenConfig {
        &self.config
    }

    /// Runs a full build: reads the configured feed (stdin when unset) and
    /// emits the result, printing dry-run output to stdout.
    pub fn run(&self) -> RuntimeResult<GenerationReport> {
        let events = match &self.config.input.feed {
            Some(path) => feed::read_events_from_file(path)?,
            None => {
                debug!("Reading annotation feed from stdin");
                feed::read_events(io::stdin().lock())?
            }
        };

        let stdout = io::stdout();
        let mut out = stdout.lock();
        self.run_events(&events, &mut out)
    }

    /// Runs a build over already decoded events.
    ///
    /// In check mode, stale files turn into [`RuntimeError::StaleOutput`].
    pub fn run_events<W: Write>(
        &self,
        events: &[AnnotationEvent],
        out: &mut W,
    ) -> RuntimeResult<GenerationReport> {
        let _span = info_span!("generate", events = events.len()).entered();

        let files = self.generate(events)?;
        let report = self.emit(&files, out)?;

        if !report.stale.is_empty() {
            return Err(RuntimeError::StaleOutput {
                paths: report.stale,
            });
        }

        info!(%report, "Generation finished");
        Ok(report)
    }

    /// Aggregates `events` and renders the output mapping.
    pub fn generate(&self, events: &[AnnotationEvent]) -> RuntimeResult<GeneratedFiles> {
        let mut engine = Engine::new();
        for event in events {
            engine.process(event)?;
        }
        Ok(engine.produce_output()?)
    }

    /// Emits rendered files according to the output settings.
    pub fn emit<W: Write>(
        &self,
        files: &GeneratedFiles,
        out: &mut W,
    ) -> RuntimeResult<GenerationReport> {
        let mut report = GenerationReport::default();

        for (path, content) in files {
            let path = self.resolve_output_path(path);

            if self.config.output.dry_run {
                print_file(out, &path, content)?;
                report.printed.push(path);
            } else if self.config.output.check {
                if is_up_to_date(&path, content)? {
                    report.unchanged.push(path);
                } else {
                    info!(path = %path.display(), "Generated file is stale");
                    report.stale.push(path);
                }
            } else if write_if_changed(&path, content)? {
                report.written.push(path);
            } else {
                report.unchanged.push(path);
            }
        }

        Ok(report)
    }

    /// Resolves a relative output path against `output.base_dir`.
    fn resolve_output_path(&self, path: &Path) -> PathBuf {
        match &self.config.output.base_dir {
            Some(base) if path.is_relative() => base.join(path),
            _ => path.to_path_buf(),
        }
    }
}

fn print_file<W: Write>(out: &mut W, path: &Path, content: &[u8]) -> RuntimeResult<()> {
    let stdout = || PathBuf::from("<stdout>");
    writeln!(out, "// ── {}", path.display()).map_err(|e| RuntimeError::io(stdout(), e))?;
    out.write_all(content)
        .map_err(|e| RuntimeError::io(stdout(), e))?;
    Ok(())
}

/// Whether `path` already holds exactly `content`. A missing file is stale.
fn is_up_to_date(path: &Path, content: &[u8]) -> RuntimeResult<bool> {
    match std::fs::read(path) {
        Ok(existing) => Ok(existing == content),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(RuntimeError::io(path, e)),
    }
}

/// Writes `content` to `path` unless it is already there. Returns whether
/// the file was written.
fn write_if_changed(path: &Path, content: &[u8]) -> RuntimeResult<bool> {
    if is_up_to_date(path, content)? {
        debug!(path = %path.display(), "Generated file unchanged");
        return Ok(false);
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| RuntimeError::io(parent, e))?;
    }
    std::fs::write(path, content).map_err(|e| RuntimeError::io(path, e))?;

    info!(path = %path.display(), bytes = content.len(), "Generated file written");
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use annogen_core::{
        GenerateError, Occurrence, PluginAnnotation, PluginUsage, SourceLocation,
        StateAnnotation, Type,
    };

    fn events(root: &Path) -> Vec<AnnotationEvent> {
        let location = SourceLocation::new(root.join("logic"), root, "logic");
        vec![
            AnnotationEvent::Plugin(Occurrence::one(
                location.clone(),
                PluginAnnotation {
                    plugin_type: "Switch".to_string(),
                    name: "switch".to_string(),
                    description: String::new(),
                    usage: PluginUsage::Logic,
                    version: "1.0.0".to_string(),
                },
            )),
            AnnotationEvent::State(Occurrence::one(
                location,
                StateAnnotation {
                    field: "Value".to_string(),
                    name: "value".to_string(),
                    description: String::new(),
                    value_type: Type::Bool,
                },
            )),
        ]
    }

    fn driver(configure: impl FnOnce(&mut AnnogenConfig)) -> Driver {
        let mut config = AnnogenConfig::default();
        configure(&mut config);
        Driver::new(config)
    }

    #[test]
    fn test_write_then_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        let driver = driver(|_| {});
        let events = events(dir.path());
        let mut out = Vec::new();

        let first = driver.run_events(&events, &mut out).unwrap();
        assert_eq!(first.written.len(), 1);
        let path = &first.written[0];
        assert!(path.ends_with("logic/zzz_plugins_annotations_generated.go"));
        let content = std::fs::read_to_string(path).unwrap();
        assert!(content.starts_with("package logic\n"));
        assert!(content.contains("builder.AddState(\"Value\""));

        let second = driver.run_events(&events, &mut out).unwrap();
        assert!(second.written.is_empty());
        assert_eq!(second.unchanged, first.written);
        assert!(out.is_empty());
    }

    #[test]
    fn test_dry_run_prints_without_writing() {
        let dir = tempfile::tempdir().unwrap();
        let driver = driver(|c| c.output.dry_run = true);
        let mut out = Vec::new();

        let report = driver.run_events(&events(dir.path()), &mut out).unwrap();
        assert_eq!(report.printed.len(), 1);
        assert!(!report.printed[0].exists());

        let printed = String::from_utf8(out).unwrap();
        assert!(printed.starts_with("// ── "));
        assert!(printed.contains("registry.RegisterPlugin(builder.Build())"));
        assert_eq!(report.to_string(), "1 file(s) printed (dry run)");
    }

    #[test]
    fn test_check_reports_stale_files() {
        let dir = tempfile::tempdir().unwrap();
        let events = events(dir.path());
        let mut out = Vec::new();

        let check = driver(|c| c.output.check = true);
        let err = check.run_events(&events, &mut out).unwrap_err();
        assert!(matches!(&err, RuntimeError::StaleOutput { paths } if paths.len() == 1));

        driver(|_| {}).run_events(&events, &mut out).unwrap();
        let report = check.run_events(&events, &mut out).unwrap();
        assert_eq!(report.unchanged.len(), 1);
        assert!(report.stale.is_empty());
    }

    #[test]
    fn test_relative_paths_use_base_dir() {
        let dir = tempfile::tempdir().unwrap();
        let base = dir.path().to_path_buf();
        let driver = driver(|c| c.output.base_dir = Some(base.clone()));

        let mut files = GeneratedFiles::new();
        files.insert(PathBuf::from("nested/out.go"), b"package nested\n".to_vec());

        let report = driver.emit(&files, &mut Vec::new()).unwrap();
        assert_eq!(report.written, [base.join("nested/out.go")]);
        assert_eq!(
            std::fs::read(base.join("nested/out.go")).unwrap(),
            b"package nested\n"
        );
    }

    #[test]
    fn test_generation_errors_propagate() {
        let dir = tempfile::tempdir().unwrap();
        let mut events = events(dir.path());
        events.remove(0);

        let err = driver(|_| {})
            .run_events(&events, &mut Vec::new())
            .unwrap_err();
        assert!(matches!(
            err,
            RuntimeError::Generate(GenerateError::MissingPlugin { .. })
        ));
        assert!(!dir.path().join("logic").exists());
    }

    #[test]
    fn test_empty_feed_generates_nothing() {
        let report = driver(|_| {}).run_events(&[], &mut Vec::new()).unwrap();
        assert_eq!(report.total(), 0);
        assert_eq!(report.to_string(), "0 written, 0 unchanged");
    }
}
