//! Output formatting for multiple formats
//!
//! Renders discovered projects and the effective configuration as JSON, YAML
//! or human-readable text.

use aemkit_core::config::AemkitConfig;
use aemkit_maven::Project;
use anyhow::{Context, Result};
use std::collections::BTreeMap;

/// Output format enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// JSON format (machine-readable)
    Json,
    /// YAML format
    Yaml,
    /// Human-readable formatted text
    Human,
}

pub struct OutputFormatter {
    format: OutputFormat,
}

impl OutputFormatter {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Formats a discovered project, root first
    pub fn format_project(&self, project: &Project) -> Result<String> {
        match self.format {
            OutputFormat::Json => serde_json::to_string_pretty(project)
                .context("Failed to serialize project to JSON"),
            OutputFormat::Yaml => {
                serde_yaml::to_string(project).context("Failed to serialize project to YAML")
            }
            OutputFormat::Human => Ok(self.format_project_human(project)),
        }
    }

    /// Formats configuration display
    pub fn format_config(&self, config: &AemkitConfig) -> Result<String> {
        // Sorted so every format lists keys in the same order.
        let config_map: BTreeMap<String, String> = config.to_display_map().into_iter().collect();

        match self.format {
            OutputFormat::Json => serde_json::to_string_pretty(&config_map)
                .context("Failed to serialize config to JSON"),
            OutputFormat::Yaml => {
                serde_yaml::to_string(&config_map).context("Failed to serialize config to YAML")
            }
            OutputFormat::Human => Ok(self.format_config_human(&config_map)),
        }
    }

    fn format_project_human(&self, project: &Project) -> String {
        let mut output = String::new();

        let root = project.root();
        output.push_str(&format!(
            "Project: {} ({})\n",
            root.identifier,
            root.absolute_path.display()
        ));
        output.push_str(&"\u{2501}".repeat(40));
        output.push_str("\n\n");

        let width = project
            .modules()
            .map(|m| m.identifier.len())
            .max()
            .unwrap_or(0);

        for module in project.modules() {
            let marker = if module.is_root { "*" } else { " " };
            let profiles = if module.profiles.is_empty() {
                "(no profile)".to_string()
            } else {
                module
                    .profiles
                    .iter()
                    .map(|p| p.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            };
            output.push_str(&format!(
                "{} {:<width$}  {}\n",
                marker,
                module.identifier,
                profiles,
                width = width
            ));
        }

        output.push_str(&format!("\n{} module(s)\n", project.len()));
        output
    }

    fn format_config_human(&self, config_map: &BTreeMap<String, String>) -> String {
        let mut output = String::new();

        output.push_str("aemkit Configuration\n");
        output.push_str(&"\u{2501}".repeat(40));
        output.push_str("\n\n");

        output.push_str("Maven:\n");
        for (label, key) in [
            ("Executable", "maven_executable"),
            ("Arguments", "maven_arguments"),
            ("Install command", "install_command"),
        ] {
            if let Some(value) = config_map.get(key) {
                output.push_str(&format!("  {}: {}\n", label, value));
            }
        }

        output.push_str("\nBehaviour:\n");
        for (label, key) in [
            ("Skip tests", "skip_tests"),
            ("Dry run", "dry_run"),
            ("Missing profile", "missing_profile"),
            ("Log level", "log_level"),
        ] {
            if let Some(value) = config_map.get(key) {
                output.push_str(&format!("  {}: {}\n", label, value));
            }
        }

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aemkit_core::config::MissingProfilePolicy;
    use aemkit_maven::{Module, ProfileId};
    use std::path::PathBuf;

    fn module(name: &str, is_root: bool, profiles: Vec<ProfileId>) -> Module {
        let root = PathBuf::from("/work/wknd");
        Module {
            absolute_path: if is_root { root } else { root.join(name) },
            name: name.to_string(),
            identifier: name.to_string(),
            is_root,
            profiles,
        }
    }

    fn create_test_project() -> Project {
        Project::new(
            module("wknd", true, vec![ProfileId::AutoInstallSinglePackage]),
            vec![
                module("ui.apps", false, vec![ProfileId::AutoInstallPackage]),
                module("ui.frontend", false, vec![]),
            ],
        )
    }

    fn create_test_config() -> AemkitConfig {
        AemkitConfig {
            maven_executable: "mvn".to_string(),
            maven_arguments: String::new(),
            install_command: "clean install".to_string(),
            skip_tests: false,
            dry_run: true,
            missing_profile: MissingProfilePolicy::Fail,
            log_level: "info".to_string(),
        }
    }

    #[test]
    fn test_project_json_format() {
        let formatter = OutputFormatter::new(OutputFormat::Json);
        let output = formatter.format_project(&create_test_project()).unwrap();

        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["root"]["identifier"], "wknd");
        assert_eq!(value["children"][0]["profiles"][0], "autoInstallPackage");
        assert_eq!(value["children"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_project_yaml_format() {
        let formatter = OutputFormatter::new(OutputFormat::Yaml);
        let output = formatter.format_project(&create_test_project()).unwrap();

        assert!(output.contains("identifier: ui.apps"));
        assert!(output.contains("- autoInstallSinglePackage"));
    }

    #[test]
    fn test_project_human_format() {
        let formatter = OutputFormatter::new(OutputFormat::Human);
        let output = formatter.format_project(&create_test_project()).unwrap();

        assert!(output.starts_with("Project: wknd (/work/wknd)"));
        assert!(output.contains("* wknd"));
        assert!(output.contains("autoInstallPackage"));
        assert!(output.contains("(no profile)"));
        assert!(output.contains("3 module(s)"));
    }

    #[test]
    fn test_config_formats() {
        let config = create_test_config();

        let human = OutputFormatter::new(OutputFormat::Human)
            .format_config(&config)
            .unwrap();
        assert!(human.contains("Executable: mvn"));
        assert!(human.contains("Dry run: true"));
        assert!(human.contains("Missing profile: fail"));

        let json = OutputFormatter::new(OutputFormat::Json)
            .format_config(&config)
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["install_command"], "clean install");
        assert_eq!(value.as_object().unwrap().len(), 7);
    }
}
