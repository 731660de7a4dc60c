//! Unified error types for annotation aggregation and code emission.
//!
//! Every variant here is fatal for the generation pass: the input is a finite,
//! deterministic annotation stream and nothing can be retried. Callers choose
//! whether to abort immediately or collect the error into a report.

use std::path::PathBuf;

use thiserror::Error;

use crate::annotation::AnnotationKind;

// =============================================================================
// Generation Errors
// =============================================================================

/// Errors that can occur while aggregating annotations or rendering output.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GenerateError {
    /// An annotation occurrence did not carry exactly one payload.
    #[error("expected exactly {expected} @{kind} annotation per occurrence, found {found}")]
    CardinalityViolation {
        /// Annotation kind of the offending occurrence.
        kind: AnnotationKind,
        /// Number of payloads required.
        expected: usize,
        /// Number of payloads received.
        found: usize,
    },

    /// A second `@Module` annotation was seen in the same build.
    #[error("@Module annotation declared more than once in this build")]
    DuplicateModule,

    /// A second `@Plugin` annotation targets an output path that already has one.
    #[error("output '{}' already has a @Plugin annotation", output_path.display())]
    DuplicatePlugin {
        /// The output path both plugins route to.
        output_path: PathBuf,
    },

    /// States, actions or configs were recorded but no `@Plugin` ever arrived.
    #[error("output '{}' has members but no @Plugin annotation", output_path.display())]
    MissingPlugin {
        /// The output path lacking a plugin definition.
        output_path: PathBuf,
    },

    /// An enum type was declared without any value.
    #[error("enum type for '{context}' has no values")]
    EmptyEnum {
        /// Name of the state or action declaring the enum.
        context: String,
    },
}

impl GenerateError {
    /// Creates a cardinality violation for an occurrence of `kind` holding `found` payloads.
    pub fn cardinality(kind: AnnotationKind, found: usize) -> Self {
        Self::CardinalityViolation {
            kind,
            expected: 1,
            found,
        }
    }

    /// Creates an empty-enum error for the named member.
    pub fn empty_enum(context: impl Into<String>) -> Self {
        Self::EmptyEnum {
            context: context.into(),
        }
    }
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for generation operations.
pub type GenerateResult<T> = Result<T, GenerateError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cardinality_message() {
        let err = GenerateError::cardinality(AnnotationKind::State, 2);
        assert_eq!(
            err.to_string(),
            "expected exactly 1 @State annotation per occurrence, found 2"
        );
    }

    #[test]
    fn test_duplicate_plugin_message_names_path() {
        let err = GenerateError::DuplicatePlugin {
            output_path: PathBuf::from("/src/a/zzz_plugins_annotations_generated.go"),
        };
        assert!(err.to_string().contains("/src/a/zzz_plugins_annotations_generated.go"));
    }
}
