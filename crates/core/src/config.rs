use serde::Serialize;
use std::collections::HashMap;
use std::env;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use tracing::warn;

const DEFAULT_MAVEN_EXECUTABLE: &str = "mvn";
const DEFAULT_INSTALL_COMMAND: &str = "clean install";
const DEFAULT_LOG_LEVEL: &str = "info";
const DEFAULT_SKIP_TESTS: bool = false;
const DEFAULT_DRY_RUN: bool = false;

/// What to do when the target module resolves no deployment profile and the
/// plain goal was not requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MissingProfilePolicy {
    /// Report `NoProfileAvailable`.
    #[default]
    Fail,
    /// Fall back to the install goal without a `-P` flag.
    PlainGoal,
}

impl FromStr for MissingProfilePolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "fail" | "error" => Ok(MissingProfilePolicy::Fail),
            "build" | "plain" | "install" => Ok(MissingProfilePolicy::PlainGoal),
            other => Err(ConfigError::ParseError {
                field: "AEM_MAVEN_MISSING_PROFILE".to_string(),
                error: format!("unknown policy '{}', expected fail or build", other),
            }),
        }
    }
}

impl fmt::Display for MissingProfilePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MissingProfilePolicy::Fail => write!(f, "fail"),
            MissingProfilePolicy::PlainGoal => write!(f, "build"),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration validation failed: {0}")]
    ValidationFailed(String),

    #[error("Failed to parse {field}: {error}")]
    ParseError { field: String, error: String },
}

#[derive(Debug, Clone, Serialize)]
pub struct AemkitConfig {
    pub maven_executable: String,
    pub maven_arguments: String,
    pub install_command: String,
    pub skip_tests: bool,
    pub dry_run: bool,
    pub missing_profile: MissingProfilePolicy,
    pub log_level: String,
}

fn env_flag(key: &str, default: bool) -> bool {
    match env::var(key) {
        Ok(raw) => raw.trim().parse::<bool>().unwrap_or_else(|_| {
            warn!("Ignoring {}='{}', expected true or false", key, raw);
            default
        }),
        Err(_) => default,
    }
}

impl Default for AemkitConfig {
    fn default() -> Self {
        let maven_executable = env::var("AEM_MAVEN_EXECUTABLE")
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_MAVEN_EXECUTABLE.to_string());

        let maven_arguments = env::var("AEM_MAVEN_ARGUMENTS")
            .map(|v| v.trim().to_string())
            .unwrap_or_default();

        let install_command = env::var("AEM_MAVEN_INSTALL_COMMAND")
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_INSTALL_COMMAND.to_string());

        let skip_tests = env_flag("AEM_MAVEN_SKIP_TESTS", DEFAULT_SKIP_TESTS);
        let dry_run = env_flag("AEM_MAVEN_DRY_RUN", DEFAULT_DRY_RUN);

        // An unparsable policy keeps the strict default.
        let missing_profile = match env::var("AEM_MAVEN_MISSING_PROFILE") {
            Ok(raw) => raw.parse::<MissingProfilePolicy>().unwrap_or_else(|e| {
                warn!("{}, using '{}'", e, MissingProfilePolicy::default());
                MissingProfilePolicy::default()
            }),
            Err(_) => MissingProfilePolicy::default(),
        };

        let log_level = env::var("AEMKIT_LOG_LEVEL")
            .unwrap_or_else(|_| DEFAULT_LOG_LEVEL.to_string())
            .to_lowercase();

        Self {
            maven_executable,
            maven_arguments,
            install_command,
            skip_tests,
            dry_run,
            missing_profile,
            log_level,
        }
    }
}

impl AemkitConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.maven_executable.trim().is_empty() {
            return Err(ConfigError::ValidationFailed(
                "Maven executable must not be empty".to_string(),
            ));
        }

        if self.install_command.trim().is_empty() {
            return Err(ConfigError::ValidationFailed(
                "Maven install command must not be empty".to_string(),
            ));
        }

        match self.log_level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => {
                return Err(ConfigError::ValidationFailed(format!(
                    "Invalid log level: {}. Valid options: trace, debug, info, warn, error",
                    self.log_level
                )))
            }
        }

        Ok(())
    }

    pub fn to_display_map(&self) -> HashMap<String, String> {
        let mut map = HashMap::new();

        map.insert(
            "maven_executable".to_string(),
            self.maven_executable.clone(),
        );
        map.insert("maven_arguments".to_string(), self.maven_arguments.clone());
        map.insert("install_command".to_string(), self.install_command.clone());
        map.insert("skip_tests".to_string(), self.skip_tests.to_string());
        map.insert("dry_run".to_string(), self.dry_run.to_string());
        map.insert(
            "missing_profile".to_string(),
            self.missing_profile.to_string(),
        );
        map.insert("log_level".to_string(), self.log_level.clone());

        map
    }
}

impl fmt::Display for AemkitConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Aemkit Configuration:")?;
        writeln!(f, "  Maven Executable: {}", self.maven_executable)?;
        writeln!(f, "  Maven Arguments: {}", self.maven_arguments)?;
        writeln!(f, "  Install Command: {}", self.install_command)?;
        writeln!(f, "  Skip Tests: {}", self.skip_tests)?;
        writeln!(f, "  Dry Run: {}", self.dry_run)?;
        writeln!(f, "  Missing Profile: {}", self.missing_profile)?;
        writeln!(f, "  Log Level: {}", self.log_level)?;
        Ok(())
    }
}
