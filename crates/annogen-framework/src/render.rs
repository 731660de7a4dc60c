//! Literal rendering for the metadata type system.
//!
//! Pure functions turning [`Type`], [`ConfigType`], [`PluginUsage`] and text
//! into Go expressions understood by the registry's `metadata` package.
//!
//! | Value | Go expression |
//! |-------|---------------|
//! | `Range(min, max)` | `metadata.MakeTypeRange(min, max)` |
//! | `Text` / `Float` / `Bool` / `Complex` | `metadata.MakeTypeText()` … |
//! | `Enum([a, b])` | `metadata.MakeTypeEnum("a", "b")` |
//! | `ConfigType::Integer` | `metadata.Integer` |
//! | `PluginUsage::Logic` | `metadata.Logic` |

use annogen_core::{ConfigType, GenerateError, GenerateResult, PluginUsage, Type};

/// Renders a plugin usage as a reference to its `metadata` constant.
pub fn render_plugin_usage(usage: PluginUsage) -> &'static str {
    match usage {
        PluginUsage::Sensor => "metadata.Sensor",
        PluginUsage::Actuator => "metadata.Actuator",
        PluginUsage::Logic => "metadata.Logic",
        PluginUsage::Ui => "metadata.Ui",
    }
}

/// Renders a config kind as a reference to its `metadata` constant.
pub fn render_config_type(config_type: ConfigType) -> &'static str {
    match config_type {
        ConfigType::String => "metadata.String",
        ConfigType::Bool => "metadata.Bool",
        ConfigType::Integer => "metadata.Integer",
        ConfigType::Float => "metadata.Float",
    }
}

/// Renders a value type as a `metadata.MakeType*` constructor call.
///
/// `context` names the member declaring the type and is only used in errors.
/// An enum without values is rejected: the registry cannot build it.
pub fn render_type(value_type: &Type, context: &str) -> GenerateResult<String> {
    Ok(match value_type {
        Type::Range { min, max } => format!("metadata.MakeTypeRange({min}, {max})"),
        Type::Text => "metadata.MakeTypeText()".to_string(),
        Type::Float => "metadata.MakeTypeFloat()".to_string(),
        Type::Bool => "metadata.MakeTypeBool()".to_string(),
        Type::Enum { values } => {
            if values.is_empty() {
                return Err(GenerateError::empty_enum(context));
            }
            let rendered = values
                .iter()
                .map(|value| render_string_literal(value))
                .collect::<Vec<_>>();
            format!("metadata.MakeTypeEnum({})", rendered.join(", "))
        }
        Type::Complex => "metadata.MakeTypeComplex()".to_string(),
    })
}

/// Renders text as a double-quoted Go string literal.
///
/// JSON string syntax is a subset of Go's interpreted string literals, so the
/// JSON escaping of the decoded text is emitted as-is. Non-ASCII characters
/// pass through unchanged.
pub fn render_string_literal(value: &str) -> String {
    serde_json::Value::from(value).to_string()
}
