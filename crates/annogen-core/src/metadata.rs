//! Metadata type system of the plugin registry.
//!
//! These are the values the generated code hands to the registry builder:
//! the value [`Type`] of states and actions, the [`ConfigType`] of config
//! fields and the [`PluginUsage`] classification of a plugin. The sets are
//! closed; the renderer matches on them exhaustively.

use serde::{Deserialize, Serialize};

// ============================================================================
// Value Types
// ============================================================================

/// Value type of a plugin state or action.
///
/// Serialized with an internal `type` tag:
///
/// ```json
/// { "type": "range", "min": 0, "max": 100 }
/// { "type": "enum", "values": ["off", "on"] }
/// { "type": "bool" }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Type {
    /// Integer within `[min, max]`.
    Range {
        /// Lower bound (inclusive).
        min: i64,
        /// Upper bound (inclusive).
        max: i64,
    },
    /// Free text.
    Text,
    /// Floating point number.
    Float,
    /// Boolean.
    Bool,
    /// One of an ordered list of string values. Must not be empty.
    Enum {
        /// Allowed values, in declaration order.
        values: Vec<String>,
    },
    /// Structured value opaque to the registry.
    Complex,
}

impl Type {
    /// Creates a range type.
    pub fn range(min: i64, max: i64) -> Self {
        Self::Range { min, max }
    }

    /// Creates an enum type from its values, kept in the given order.
    pub fn enumeration<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Enum {
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns the lowercase name of the variant.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Range { .. } => "range",
            Self::Text => "text",
            Self::Float => "float",
            Self::Bool => "bool",
            Self::Enum { .. } => "enum",
            Self::Complex => "complex",
        }
    }
}

// ============================================================================
// Config Types
// ============================================================================

/// Value kind of a plugin configuration field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfigType {
    /// Text setting.
    String,
    /// Boolean setting.
    Bool,
    /// Integer setting.
    Integer,
    /// Floating point setting.
    Float,
}

// ============================================================================
// Plugin Usage
// ============================================================================

/// Functional classification of a plugin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PluginUsage {
    /// Reads the outside world.
    Sensor,
    /// Acts on the outside world.
    Actuator,
    /// Pure computation between components.
    Logic,
    /// Drives user interface state.
    Ui,
}
