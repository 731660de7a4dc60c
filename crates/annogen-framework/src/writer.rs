//! Sequential writer for one generated Go file.
//!
//! The writer only appends. A correct caller emits, per plugin:
//!
//! ```text
//! begin_plugin → add_state* → add_action* → add_config* → end_plugin
//! ```
//!
//! and reads [`CodeWriter::content`] once every block is closed. Reading the
//! content mid-block yields an unterminated `init` function; this is not
//! checked.

use annogen_core::{ConfigType, GenerateResult, PluginUsage, Type};

use crate::render::{
    render_config_type, render_plugin_usage, render_string_literal, render_type,
};

/// Import path of the registry metadata package.
pub const METADATA_IMPORT: &str = "mylife-home-common/components/metadata";

/// Import path of the plugin registry package.
pub const REGISTRY_IMPORT: &str = "mylife-home-core-library/registry";

/// Identity fields opening a plugin block.
#[derive(Debug, Clone, Copy)]
pub struct PluginHeader<'a> {
    /// Go type registered by the block.
    pub plugin_type: &'a str,
    /// Module the plugin ships in.
    pub module: &'a str,
    /// Registry name of the plugin.
    pub name: &'a str,
    /// Human readable description.
    pub description: &'a str,
    /// Usage classification.
    pub usage: PluginUsage,
    /// Plugin version, already resolved against the module.
    pub version: &'a str,
}

/// Append-only text builder for a generated registration unit.
#[derive(Debug, Clone)]
pub struct CodeWriter {
    buffer: String,
}

impl CodeWriter {
    /// Creates a writer with the package clause and import block already emitted.
    pub fn new(package_name: &str) -> Self {
        let mut writer = Self {
            buffer: String::new(),
        };

        writer.line(&format!("package {package_name}"));
        writer.line("");
        writer.line("import (");
        writer.line(&format!("\t\"{METADATA_IMPORT}\""));
        writer.line(&format!("\t\"{REGISTRY_IMPORT}\""));
        writer.line(")");
        writer.line("");

        writer
    }

    fn line(&mut self, text: &str) {
        self.buffer.push_str(text);
        self.buffer.push('\n');
    }

    /// Opens an `init` function and constructs the typed plugin builder.
    pub fn begin_plugin(&mut self, header: &PluginHeader<'_>) {
        let statement = format!(
            "\tbuilder := registry.MakePluginTypeBuilder[{}]({}, {}, {}, {}, {})",
            header.plugin_type,
            render_string_literal(header.module),
            render_string_literal(header.name),
            render_string_literal(header.description),
            render_plugin_usage(header.usage),
            render_string_literal(header.version),
        );

        self.line("func init() {");
        self.line(&statement);
    }

    /// Declares a state backed by `field`.
    pub fn add_state(
        &mut self,
        field: &str,
        name: &str,
        description: &str,
        value_type: &Type,
    ) -> GenerateResult<()> {
        let statement = format!(
            "\tbuilder.AddState({}, {}, {}, {})",
            render_string_literal(field),
            render_string_literal(name),
            render_string_literal(description),
            render_type(value_type, name)?,
        );
        self.line(&statement);
        Ok(())
    }

    /// Declares an action backed by `method`.
    pub fn add_action(
        &mut self,
        method: &str,
        name: &str,
        description: &str,
        value_type: &Type,
    ) -> GenerateResult<()> {
        let statement = format!(
            "\tbuilder.AddAction({}, {}, {}, {})",
            render_string_literal(method),
            render_string_literal(name),
            render_string_literal(description),
            render_type(value_type, name)?,
        );
        self.line(&statement);
        Ok(())
    }

    /// Declares a config entry backed by `field`.
    pub fn add_config(
        &mut self,
        field: &str,
        name: &str,
        description: &str,
        value_type: ConfigType,
    ) {
        let statement = format!(
            "\tbuilder.AddConfig({}, {}, {}, {})",
            render_string_literal(field),
            render_string_literal(name),
            render_string_literal(description),
            render_config_type(value_type),
        );
        self.line(&statement);
    }

    /// Registers the built plugin type and closes the `init` function.
    pub fn end_plugin(&mut self) {
        self.line("\tregistry.RegisterPlugin(builder.Build())");
        self.line("}");
        self.line("");
    }

    /// Consumes the writer and returns the file content.
    pub fn content(self) -> Vec<u8> {
        self.buffer.into_bytes()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header() -> PluginHeader<'static> {
        PluginHeader {
            plugin_type: "ValueBinary",
            module: "logic-base",
            name: "value-binary",
            description: "Binary value",
            usage: PluginUsage::Logic,
            version: "1.0.0",
        }
    }

    #[test]
    fn test_preamble() {
        let content = String::from_utf8(CodeWriter::new("plugin").content()).unwrap();
        assert_eq!(
            content,
            "package plugin\n\
             \n\
             import (\n\
             \t\"mylife-home-common/components/metadata\"\n\
             \t\"mylife-home-core-library/registry\"\n\
             )\n\
             \n"
        );
    }

    #[test]
    fn test_full_block() {
        let mut writer = CodeWriter::new("plugin");
        writer.begin_plugin(&header());
        writer
            .add_state("Value", "value", "Current value", &Type::Bool)
            .unwrap();
        writer
            .add_action("SetValue", "setValue", "Set the value", &Type::Bool)
            .unwrap();
        writer.add_config("InitialValue", "initialValue", "Initial value", ConfigType::Bool);
        writer.end_plugin();

        let content = String::from_utf8(writer.content()).unwrap();
        let body = content.split_once("\n)\n\n").unwrap().1;
        assert_eq!(
            body,
            "func init() {\n\
             \tbuilder := registry.MakePluginTypeBuilder[ValueBinary](\"logic-base\", \"value-binary\", \"Binary value\", metadata.Logic, \"1.0.0\")\n\
             \tbuilder.AddState(\"Value\", \"value\", \"Current value\", metadata.MakeTypeBool())\n\
             \tbuilder.AddAction(\"SetValue\", \"setValue\", \"Set the value\", metadata.MakeTypeBool())\n\
             \tbuilder.AddConfig(\"InitialValue\", \"initialValue\", \"Initial value\", metadata.Bool)\n\
             \tregistry.RegisterPlugin(builder.Build())\n\
             }\n\
             \n"
        );
    }

    #[test]
    fn test_escapes_descriptions() {
        let mut writer = CodeWriter::new("plugin");
        writer
            .add_state("Label", "label", "Zeigt \"Grüße\"", &Type::Text)
            .unwrap();

        let content = String::from_utf8(writer.content()).unwrap();
        assert!(content.contains(
            r#"builder.AddState("Label", "label", "Zeigt \"Grüße\"", metadata.MakeTypeText())"#
        ));
    }

    #[test]
    fn test_empty_enum_reports_member_name() {
        let mut writer = CodeWriter::new("plugin");
        let no_values = Type::enumeration(Vec::<String>::new());
        let result = writer.add_action("SetMode", "setMode", "", &no_values);
        assert!(matches!(
            result,
            Err(annogen_core::GenerateError::EmptyEnum { context }) if context == "setMode"
        ));
    }
}
