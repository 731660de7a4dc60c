//! Per-output-file aggregation of annotations.
//!
//! A [`FileGenerator`] owns the draft model of one generated file. Annotations
//! may arrive in any order: members can precede their `@Plugin`, and the
//! `@Module` binding can arrive first, last or not at all. Nothing is rendered
//! until [`FileGenerator::output`], which turns the draft into text in a single
//! pass.

use std::path::{Path, PathBuf};

use annogen_core::{
    ActionAnnotation, ConfigAnnotation, GenerateError, GenerateResult, ModuleAnnotation,
    PluginAnnotation, SourceLocation, StateAnnotation,
};
use tracing::{debug, trace};

use crate::writer::{CodeWriter, PluginHeader};

/// Accumulated model of one generated registration unit.
#[derive(Debug, Clone)]
pub struct FileGenerator {
    output_path: PathBuf,
    package_name: String,
    module_name: String,
    module: Option<ModuleAnnotation>,
    plugin: Option<PluginAnnotation>,
    states: Vec<StateAnnotation>,
    actions: Vec<ActionAnnotation>,
    configs: Vec<ConfigAnnotation>,
}

impl FileGenerator {
    /// Creates an empty generator for `output_path`.
    pub fn new(
        output_path: impl Into<PathBuf>,
        package_name: impl Into<String>,
        module_name: impl Into<String>,
    ) -> Self {
        Self {
            output_path: output_path.into(),
            package_name: package_name.into(),
            module_name: module_name.into(),
            module: None,
            plugin: None,
            states: Vec::new(),
            actions: Vec::new(),
            configs: Vec::new(),
        }
    }

    /// Creates the generator owning the output of `location`.
    pub fn for_location(location: &SourceLocation) -> Self {
        Self::new(
            location.output_path(),
            location.package.clone(),
            location.module_name(),
        )
    }

    /// Path the generated content is destined for.
    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    /// Module name used in the builder construction call.
    pub fn module_name(&self) -> &str {
        &self.module_name
    }

    /// Registry name of the plugin, once its `@Plugin` has been seen.
    pub fn plugin_name(&self) -> Option<&str> {
        self.plugin.as_ref().map(|plugin| plugin.name.as_str())
    }

    /// Records the build's module binding.
    pub fn process_module_annotation(&mut self, module: &ModuleAnnotation) {
        trace!(output = %self.output_path.display(), "Module binding recorded");
        self.module = Some(module.clone());
    }

    /// Records the plugin identity of this output.
    ///
    /// One output holds one plugin; a second `@Plugin` is rejected.
    pub fn process_plugin_annotation(
        &mut self,
        location: &SourceLocation,
        plugin: &PluginAnnotation,
    ) -> GenerateResult<()> {
        if self.plugin.is_some() {
            return Err(GenerateError::DuplicatePlugin {
                output_path: self.output_path.clone(),
            });
        }

        debug!(
            plugin = %plugin.name,
            plugin_type = %plugin.plugin_type,
            dir = %location.dir.display(),
            "Plugin recorded"
        );
        self.plugin = Some(plugin.clone());
        Ok(())
    }

    /// Appends a state declaration.
    pub fn process_state_annotation(&mut self, location: &SourceLocation, state: &StateAnnotation) {
        trace!(
            state = %state.name,
            value_type = state.value_type.kind_name(),
            dir = %location.dir.display(),
            "State recorded"
        );
        self.states.push(state.clone());
    }

    /// Appends an action declaration.
    pub fn process_action_annotation(
        &mut self,
        location: &SourceLocation,
        action: &ActionAnnotation,
    ) {
        trace!(
            action = %action.name,
            value_type = action.value_type.kind_name(),
            dir = %location.dir.display(),
            "Action recorded"
        );
        self.actions.push(action.clone());
    }

    /// Appends a config declaration.
    pub fn process_config_annotation(
        &mut self,
        location: &SourceLocation,
        config: &ConfigAnnotation,
    ) {
        trace!(config = %config.name, dir = %location.dir.display(), "Config recorded");
        self.configs.push(config.clone());
    }

    /// Renders the generated file.
    ///
    /// Pure function of the accumulated state: calling it again yields the
    /// same bytes.
    pub fn output(&self) -> GenerateResult<Vec<u8>> {
        let plugin = self
            .plugin
            .as_ref()
            .ok_or_else(|| GenerateError::MissingPlugin {
                output_path: self.output_path.clone(),
            })?;

        let mut writer = CodeWriter::new(&self.package_name);

        writer.begin_plugin(&PluginHeader {
            plugin_type: &plugin.plugin_type,
            module: &self.module_name,
            name: &plugin.name,
            description: &plugin.description,
            usage: plugin.usage,
            version: self.resolve_version(plugin),
        });

        for state in &self.states {
            writer.add_state(&state.field, &state.name, &state.description, &state.value_type)?;
        }

        for action in &self.actions {
            writer.add_action(
                &action.method,
                &action.name,
                &action.description,
                &action.value_type,
            )?;
        }

        for config in &self.configs {
            writer.add_config(
                &config.field,
                &config.name,
                &config.description,
                config.value_type,
            );
        }

        writer.end_plugin();

        Ok(writer.content())
    }

    /// The plugin's own version, or the module version when it declares none.
    fn resolve_version<'a>(&'a self, plugin: &'a PluginAnnotation) -> &'a str {
        if !plugin.version.is_empty() {
            return &plugin.version;
        }

        self.module
            .as_ref()
            .and_then(|module| module.version.as_deref())
            .unwrap_or("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use annogen_core::{ConfigType, PluginUsage, Type};

    fn location() -> SourceLocation {
        SourceLocation::new("/work/plugins-demo/logic", "/work/plugins-demo", "logic")
    }

    fn plugin(version: &str) -> PluginAnnotation {
        PluginAnnotation {
            plugin_type: "Switch".to_string(),
            name: "switch".to_string(),
            description: "On/off switch".to_string(),
            usage: PluginUsage::Logic,
            version: version.to_string(),
        }
    }

    fn state(field: &str) -> StateAnnotation {
        StateAnnotation {
            field: field.to_string(),
            name: field.to_lowercase(),
            description: String::new(),
            value_type: Type::Bool,
        }
    }

    fn render(generator: &FileGenerator) -> String {
        String::from_utf8(generator.output().unwrap()).unwrap()
    }

    #[test]
    fn test_members_before_plugin() {
        let loc = location();
        let mut generator = FileGenerator::for_location(&loc);
        generator.process_state_annotation(&loc, &state("Value"));
        generator
            .process_plugin_annotation(&loc, &plugin("1.0.0"))
            .unwrap();

        let content = render(&generator);
        let builder = content.find("MakePluginTypeBuilder[Switch]").unwrap();
        let add_state = content.find("builder.AddState(\"Value\"").unwrap();
        assert!(builder < add_state);
        assert!(content.starts_with("package logic\n"));
    }

    #[test]
    fn test_sections_follow_fixed_order() {
        let loc = location();
        let mut generator = FileGenerator::for_location(&loc);
        generator.process_config_annotation(
            &loc,
            &ConfigAnnotation {
                field: "InitialValue".to_string(),
                name: "initialValue".to_string(),
                description: String::new(),
                value_type: ConfigType::Bool,
            },
        );
        generator.process_action_annotation(
            &loc,
            &ActionAnnotation {
                method: "SetValue".to_string(),
                name: "setValue".to_string(),
                description: String::new(),
                value_type: Type::Bool,
            },
        );
        generator.process_state_annotation(&loc, &state("Value"));
        generator
            .process_plugin_annotation(&loc, &plugin("1.0.0"))
            .unwrap();

        let content = render(&generator);
        let state_at = content.find("AddState").unwrap();
        let action_at = content.find("AddAction").unwrap();
        let config_at = content.find("AddConfig").unwrap();
        let register_at = content.find("registry.RegisterPlugin").unwrap();
        assert!(state_at < action_at && action_at < config_at && config_at < register_at);
    }

    #[test]
    fn test_states_keep_arrival_order() {
        let loc = location();
        let mut generator = FileGenerator::for_location(&loc);
        generator
            .process_plugin_annotation(&loc, &plugin("1.0.0"))
            .unwrap();
        for field in ["Zeta", "Alpha", "Alpha", "Mid"] {
            generator.process_state_annotation(&loc, &state(field));
        }

        let content = render(&generator);
        let fields: Vec<&str> = content
            .lines()
            .filter_map(|line| line.trim().strip_prefix("builder.AddState(\""))
            .map(|rest| rest.split('"').next().unwrap())
            .collect();
        assert_eq!(fields, ["Zeta", "Alpha", "Alpha", "Mid"]);
    }

    #[test]
    fn test_output_is_repeatable() {
        let loc = location();
        let mut generator = FileGenerator::for_location(&loc);
        generator
            .process_plugin_annotation(&loc, &plugin("1.0.0"))
            .unwrap();
        generator.process_state_annotation(&loc, &state("Value"));

        assert_eq!(generator.output().unwrap(), generator.output().unwrap());
    }

    #[test]
    fn test_duplicate_plugin_is_rejected() {
        let loc = location();
        let mut generator = FileGenerator::for_location(&loc);
        generator
            .process_plugin_annotation(&loc, &plugin("1.0.0"))
            .unwrap();

        let err = generator
            .process_plugin_annotation(&loc, &plugin("2.0.0"))
            .unwrap_err();
        assert_eq!(
            err,
            GenerateError::DuplicatePlugin {
                output_path: loc.output_path()
            }
        );
        assert_eq!(generator.plugin_name(), Some("switch"));
    }

    #[test]
    fn test_missing_plugin_is_rejected() {
        let loc = location();
        let mut generator = FileGenerator::for_location(&loc);
        generator.process_state_annotation(&loc, &state("Value"));

        assert!(matches!(
            generator.output(),
            Err(GenerateError::MissingPlugin { .. })
        ));
    }

    #[test]
    fn test_version_falls_back_to_module() {
        let loc = location();
        let mut generator = FileGenerator::for_location(&loc);
        generator.process_plugin_annotation(&loc, &plugin("")).unwrap();
        assert!(render(&generator).contains("metadata.Logic, \"\")"));

        generator.process_module_annotation(&ModuleAnnotation {
            version: Some("3.1.4".to_string()),
        });
        assert!(render(&generator).contains("metadata.Logic, \"3.1.4\")"));
    }

    #[test]
    fn test_plugin_version_wins_over_module() {
        let loc = location();
        let mut generator = FileGenerator::for_location(&loc);
        generator.process_module_annotation(&ModuleAnnotation {
            version: Some("3.1.4".to_string()),
        });
        generator
            .process_plugin_annotation(&loc, &plugin("1.0.0"))
            .unwrap();
        assert!(render(&generator).contains("metadata.Logic, \"1.0.0\")"));
    }

    #[test]
    fn test_module_name_from_root() {
        let generator = FileGenerator::for_location(&location());
        assert_eq!(generator.module_name(), "plugins-demo");
        assert_eq!(
            generator.output_path(),
            Path::new("/work/plugins-demo/logic/zzz_plugins_annotations_generated.go")
        );
    }
}
