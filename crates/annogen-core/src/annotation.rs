//! Annotation payloads, occurrences and the event feed.
//!
//! The discovery front end reports every annotated declaration as one
//! [`Occurrence`]: where it was found plus the payloads parsed from it. A
//! well-formed occurrence carries exactly one payload; [`Occurrence::single`]
//! is the ingestion-side check of that rule.
//!
//! ```text
//! AnnotationEvent ──▶ Occurrence<T> { location, annotations: [T] }
//!                               │
//!                               ├── location.output_path()  → routing key
//!                               └── location.module_name()  → module binding
//! ```

use std::fmt;
use std::path::{Component, Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{GenerateError, GenerateResult};
use crate::metadata::{ConfigType, PluginUsage, Type};

/// File name of the generated registration unit, one per source directory.
pub const GENERATED_FILE_NAME: &str = "zzz_plugins_annotations_generated.go";

// ============================================================================
// Source Location
// ============================================================================

/// Where an annotation occurrence was discovered.
///
/// The location alone decides which output file an annotation lands in and
/// which module the plugin belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SourceLocation {
    /// Directory holding the annotated source file.
    pub dir: PathBuf,
    /// Root directory of the source tree the file was discovered in.
    pub root: PathBuf,
    /// Package name declared by the annotated source file.
    pub package: String,
}

impl SourceLocation {
    /// Creates a new source location.
    pub fn new(
        dir: impl Into<PathBuf>,
        root: impl Into<PathBuf>,
        package: impl Into<String>,
    ) -> Self {
        Self {
            dir: dir.into(),
            root: root.into(),
            package: package.into(),
        }
    }

    /// Path of the generated file this location contributes to.
    ///
    /// The directory is cleaned lexically first, so spellings of the same
    /// directory such as `a/./b` and `a/c/../b` share one output path.
    pub fn output_path(&self) -> PathBuf {
        clean_path(&self.dir).join(GENERATED_FILE_NAME)
    }

    /// Module name: the base name of the source tree root, unmodified.
    pub fn module_name(&self) -> String {
        base_name(&self.root)
    }
}

/// Lexically normalizes `path`: drops `.` segments and resolves `..`
/// against the preceding segment. `..` directly under the root is dropped.
fn clean_path(path: &Path) -> PathBuf {
    let mut cleaned = PathBuf::new();
    let mut depth = 0usize;

    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir if depth > 0 => {
                cleaned.pop();
                depth -= 1;
            }
            Component::ParentDir if cleaned.has_root() => {}
            Component::ParentDir => cleaned.push(".."),
            Component::Normal(segment) => {
                cleaned.push(segment);
                depth += 1;
            }
            Component::RootDir | Component::Prefix(_) => cleaned.push(component.as_os_str()),
        }
    }

    cleaned
}

fn base_name(path: &Path) -> String {
    match path.file_name() {
        Some(name) => name.to_string_lossy().into_owned(),
        None if path.as_os_str().is_empty() => ".".to_string(),
        None => path.display().to_string(),
    }
}

// ============================================================================
// Annotation Kinds
// ============================================================================

/// The five annotation kinds understood by the generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnnotationKind {
    Module,
    Plugin,
    State,
    Action,
    Config,
}

impl AnnotationKind {
    /// Returns the annotation name as written in source.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Module => "Module",
            Self::Plugin => "Plugin",
            Self::State => "State",
            Self::Action => "Action",
            Self::Config => "Config",
        }
    }
}

impl fmt::Display for AnnotationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Implemented by every annotation payload type.
pub trait Annotation {
    /// Kind reported in cardinality errors.
    const KIND: AnnotationKind;
}

// ============================================================================
// Payloads
// ============================================================================

/// `@Module`: marks the module declaration of a build, once per build.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleAnnotation {
    /// Module version, used for plugins that declare none.
    #[serde(default)]
    pub version: Option<String>,
}

/// `@Plugin`: declares the plugin type of an output file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginAnnotation {
    /// Identifier of the annotated type; the registry builder's type argument.
    pub plugin_type: String,
    /// Registry name of the plugin.
    pub name: String,
    /// Human-readable description.
    #[serde(default)]
    pub description: String,
    /// Functional classification.
    pub usage: PluginUsage,
    /// Plugin version; empty means "use the module version".
    #[serde(default)]
    pub version: String,
}

/// `@State`: exposes a plugin field as an observable state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateAnnotation {
    /// Identifier of the annotated field.
    pub field: String,
    /// Registry name of the state.
    pub name: String,
    /// Human-readable description.
    #[serde(default)]
    pub description: String,
    /// Value type of the state.
    pub value_type: Type,
}

/// `@Action`: exposes a plugin method as an invocable action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionAnnotation {
    /// Identifier of the annotated method.
    pub method: String,
    /// Registry name of the action.
    pub name: String,
    /// Human-readable description.
    #[serde(default)]
    pub description: String,
    /// Value type of the action argument.
    pub value_type: Type,
}

/// `@Config`: exposes a plugin field as a configuration entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigAnnotation {
    /// Identifier of the annotated field.
    pub field: String,
    /// Registry name of the config entry.
    pub name: String,
    /// Human-readable description.
    #[serde(default)]
    pub description: String,
    /// Value kind of the config entry.
    pub value_type: ConfigType,
}

impl Annotation for ModuleAnnotation {
    const KIND: AnnotationKind = AnnotationKind::Module;
}

impl Annotation for PluginAnnotation {
    const KIND: AnnotationKind = AnnotationKind::Plugin;
}

impl Annotation for StateAnnotation {
    const KIND: AnnotationKind = AnnotationKind::State;
}

impl Annotation for ActionAnnotation {
    const KIND: AnnotationKind = AnnotationKind::Action;
}

impl Annotation for ConfigAnnotation {
    const KIND: AnnotationKind = AnnotationKind::Config;
}

// ============================================================================
// Occurrences
// ============================================================================

/// One discovered annotation occurrence and the payloads parsed from it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Occurrence<T> {
    /// Where the occurrence was found.
    pub location: SourceLocation,
    /// Payloads attached to the occurrence; exactly one when well-formed.
    pub annotations: Vec<T>,
}

impl<T: Annotation> Occurrence<T> {
    /// Creates an occurrence.
    pub fn new(location: SourceLocation, annotations: Vec<T>) -> Self {
        Self {
            location,
            annotations,
        }
    }

    /// Creates a well-formed occurrence holding one payload.
    pub fn one(location: SourceLocation, annotation: T) -> Self {
        Self::new(location, vec![annotation])
    }

    /// Returns the single payload, or a cardinality violation.
    pub fn single(&self) -> GenerateResult<&T> {
        match self.annotations.as_slice() {
            [annotation] => Ok(annotation),
            other => Err(GenerateError::cardinality(T::KIND, other.len())),
        }
    }
}

// ============================================================================
// Event Feed
// ============================================================================

/// One entry of the ordered annotation stream.
///
/// Serialized with an internal `kind` tag:
///
/// ```json
/// {"kind":"state","location":{"dir":"/src/m/p","root":"/src/m","package":"p"},
///  "annotations":[{"field":"Value","name":"value","value_type":{"type":"bool"}}]}
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AnnotationEvent {
    Module(Occurrence<ModuleAnnotation>),
    Plugin(Occurrence<PluginAnnotation>),
    State(Occurrence<StateAnnotation>),
    Action(Occurrence<ActionAnnotation>),
    Config(Occurrence<ConfigAnnotation>),
}

impl AnnotationEvent {
    /// Returns the annotation kind of this event.
    pub fn kind(&self) -> AnnotationKind {
        match self {
            Self::Module(_) => AnnotationKind::Module,
            Self::Plugin(_) => AnnotationKind::Plugin,
            Self::State(_) => AnnotationKind::State,
            Self::Action(_) => AnnotationKind::Action,
            Self::Config(_) => AnnotationKind::Config,
        }
    }

    /// Returns the location of the underlying occurrence.
    pub fn location(&self) -> &SourceLocation {
        match self {
            Self::Module(o) => &o.location,
            Self::Plugin(o) => &o.location,
            Self::State(o) => &o.location,
            Self::Action(o) => &o.location,
            Self::Config(o) => &o.location,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn location(dir: &str) -> SourceLocation {
        SourceLocation::new(dir, "/work/plugins-demo", "logic")
    }

    fn state(field: &str) -> StateAnnotation {
        StateAnnotation {
            field: field.to_string(),
            name: field.to_lowercase(),
            description: String::new(),
            value_type: Type::Bool,
        }
    }

    #[test]
    fn test_output_path_is_dir_plus_fixed_name() {
        let loc = location("/work/plugins-demo/logic");
        assert_eq!(
            loc.output_path(),
            PathBuf::from("/work/plugins-demo/logic/zzz_plugins_annotations_generated.go")
        );
    }

    #[test]
    fn test_output_path_cleans_directory() {
        let expected =
            PathBuf::from("/work/plugins-demo/logic/zzz_plugins_annotations_generated.go");
        for dir in [
            "/work/plugins-demo/logic",
            "/work/plugins-demo/other/../logic",
            "/work/./plugins-demo/logic/",
            "/../work/plugins-demo/logic",
        ] {
            assert_eq!(location(dir).output_path(), expected, "dir {dir}");
        }

        assert_eq!(
            location("a/../../b").output_path(),
            PathBuf::from("../b/zzz_plugins_annotations_generated.go")
        );
        assert_eq!(
            location(".").output_path(),
            PathBuf::from("zzz_plugins_annotations_generated.go")
        );
    }

    #[test]
    fn test_module_name_is_root_base_name() {
        assert_eq!(location("/x").module_name(), "plugins-demo");

        let prefixed = SourceLocation::new("/x", "/work/mylife-home-core-plugins-logic", "p");
        assert_eq!(prefixed.module_name(), "mylife-home-core-plugins-logic");

        let trailing = SourceLocation::new("/x", "/work/demo/", "p");
        assert_eq!(trailing.module_name(), "demo");
    }

    #[test]
    fn test_single_accepts_exactly_one() {
        let occ = Occurrence::one(location("/a"), state("Value"));
        assert_eq!(occ.single().unwrap().field, "Value");
    }

    #[test]
    fn test_single_rejects_zero_and_many() {
        let empty: Occurrence<StateAnnotation> = Occurrence::new(location("/a"), Vec::new());
        assert_eq!(
            empty.single(),
            Err(GenerateError::cardinality(AnnotationKind::State, 0))
        );

        let many = Occurrence::new(location("/a"), vec![state("A"), state("B")]);
        assert!(matches!(
            many.single(),
            Err(GenerateError::CardinalityViolation { found: 2, .. })
        ));
    }

    #[test]
    fn test_event_json_shape() {
        let json = r#"{
            "kind": "config",
            "location": {"dir": "/work/plugins-demo/logic", "root": "/work/plugins-demo", "package": "logic"},
            "annotations": [{"field": "InitialValue", "name": "initialValue", "value_type": "bool"}]
        }"#;
        let event: AnnotationEvent = serde_json::from_str(json).unwrap();

        assert_eq!(event.kind(), AnnotationKind::Config);
        assert_eq!(event.location().package, "logic");
        match event {
            AnnotationEvent::Config(occ) => {
                let config = occ.single().unwrap();
                assert_eq!(config.value_type, ConfigType::Bool);
                assert_eq!(config.description, "");
            }
            other => panic!("unexpected event {other:?}"),
        }
    }

    #[test]
    fn test_module_event_without_version() {
        let json = r#"{"kind":"module","location":{"dir":"/m","root":"/m","package":"m"},"annotations":[{}]}"#;
        let event: AnnotationEvent = serde_json::from_str(json).unwrap();
        assert_eq!(
            event,
            AnnotationEvent::Module(Occurrence::one(
                SourceLocation::new("/m", "/m", "m"),
                ModuleAnnotation::default()
            ))
        );
    }
}
