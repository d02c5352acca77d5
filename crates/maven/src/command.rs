//! Maven invocation composition
//!
//! Turns a resolved module into the command line to run and the directory to
//! run it in. Nothing here executes anything; a dry run only changes the text
//! handed back.

use crate::module::Module;
use aemkit_core::config::{AemkitConfig, MissingProfilePolicy};
use aemkit_core::error::ResolveError;
use serde::Serialize;
use std::path::PathBuf;
use tracing::{debug, info};

pub const SKIP_TESTS_FLAG: &str = "-DskipTests";
pub const DRY_RUN_PREFIX: &str = "[DRY RUN] Would run:";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposeOptions {
    /// Executable token, usually `mvn`.
    pub tool: String,
    /// Passed through verbatim before the goal.
    pub extra_arguments: String,
    /// Goal text, e.g. `clean install`.
    pub install_goal: String,
    /// Build the plain goal without a profile.
    pub force_goal: bool,
    pub skip_tests: bool,
    pub dry_run: bool,
    pub missing_profile: MissingProfilePolicy,
}

impl Default for ComposeOptions {
    fn default() -> Self {
        Self {
            tool: "mvn".to_string(),
            extra_arguments: String::new(),
            install_goal: "clean install".to_string(),
            force_goal: false,
            skip_tests: false,
            dry_run: false,
            missing_profile: MissingProfilePolicy::Fail,
        }
    }
}

impl ComposeOptions {
    pub fn from_config(config: &AemkitConfig) -> Self {
        Self {
            tool: config.maven_executable.clone(),
            extra_arguments: config.maven_arguments.clone(),
            install_goal: config.install_command.clone(),
            force_goal: false,
            skip_tests: config.skip_tests,
            dry_run: config.dry_run,
            missing_profile: config.missing_profile,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComposedCommand {
    pub working_directory: PathBuf,
    /// The Maven command line itself.
    pub command: String,
    /// What to hand to a shell: `command`, or an `echo` announcement for dry runs.
    pub invocation: String,
    pub dry_run: bool,
}

impl ComposedCommand {
    /// Human-readable dry-run line, also valid for real runs.
    pub fn announcement(&self) -> String {
        format!(
            "{} {} in {}",
            DRY_RUN_PREFIX,
            self.command,
            self.working_directory.display()
        )
    }
}

pub fn compose(module: &Module, options: &ComposeOptions) -> Result<ComposedCommand, ResolveError> {
    let profile_flag = if options.force_goal {
        None
    } else {
        match module.primary_profile() {
            Some(profile) => Some(format!("-P{}", profile)),
            None => match options.missing_profile {
                MissingProfilePolicy::Fail => {
                    return Err(ResolveError::NoProfileAvailable(module.identifier.clone()))
                }
                MissingProfilePolicy::PlainGoal => {
                    debug!(
                        "No profile for '{}', building the plain goal",
                        module.identifier
                    );
                    None
                }
            },
        }
    };

    let mut parts: Vec<&str> = vec![
        options.tool.trim(),
        options.extra_arguments.trim(),
        options.install_goal.trim(),
    ];
    if let Some(flag) = profile_flag.as_deref() {
        parts.push(flag);
    }
    if options.skip_tests {
        parts.push(SKIP_TESTS_FLAG);
    }
    let command = parts
        .into_iter()
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join(" ");

    let working_directory = module.absolute_path.clone();
    let mut composed = ComposedCommand {
        working_directory,
        invocation: command.clone(),
        command,
        dry_run: options.dry_run,
    };
    if options.dry_run {
        composed.invocation = format!("echo {}", composed.announcement());
    }

    info!(
        "Module '{}' -> {} (in {})",
        module.identifier,
        composed.command,
        composed.working_directory.display()
    );
    Ok(composed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::ProfileId;

    fn module(profiles: Vec<ProfileId>) -> Module {
        Module {
            absolute_path: PathBuf::from("/repo/ui.apps"),
            name: "ui.apps".to_string(),
            identifier: "wknd.ui.apps".to_string(),
            is_root: false,
            profiles,
        }
    }

    #[test]
    fn test_uses_primary_profile_only() {
        let module = module(vec![
            ProfileId::AutoInstallSinglePackage,
            ProfileId::AutoInstallPackage,
        ]);
        let cmd = compose(&module, &ComposeOptions::default()).unwrap();

        assert_eq!(cmd.command, "mvn clean install -PautoInstallSinglePackage");
        assert_eq!(cmd.invocation, cmd.command);
        assert_eq!(cmd.working_directory, PathBuf::from("/repo/ui.apps"));
        assert!(!cmd.dry_run);
    }

    #[test]
    fn test_force_goal_drops_profile() {
        let options = ComposeOptions {
            force_goal: true,
            ..Default::default()
        };
        let cmd = compose(&module(vec![ProfileId::AutoInstallPackage]), &options).unwrap();
        assert_eq!(cmd.command, "mvn clean install");

        // Forcing also works for modules without any profile.
        let cmd = compose(&module(vec![]), &options).unwrap();
        assert_eq!(cmd.command, "mvn clean install");
    }

    #[test]
    fn test_missing_profile_fails_by_default() {
        let err = compose(&module(vec![]), &ComposeOptions::default()).unwrap_err();
        assert_eq!(
            err,
            ResolveError::NoProfileAvailable("wknd.ui.apps".to_string())
        );
    }

    #[test]
    fn test_missing_profile_plain_goal_policy() {
        let options = ComposeOptions {
            missing_profile: MissingProfilePolicy::PlainGoal,
            skip_tests: true,
            ..Default::default()
        };
        let cmd = compose(&module(vec![]), &options).unwrap();
        assert_eq!(cmd.command, "mvn clean install -DskipTests");
    }

    #[test]
    fn test_extra_arguments_and_custom_goal() {
        let options = ComposeOptions {
            extra_arguments: "--debug".to_string(),
            install_goal: "verify".to_string(),
            skip_tests: true,
            ..Default::default()
        };
        let cmd = compose(&module(vec![ProfileId::AutoInstallPackage]), &options).unwrap();
        assert_eq!(
            cmd.command,
            "mvn --debug verify -PautoInstallPackage -DskipTests"
        );
    }

    #[test]
    fn test_dry_run_wraps_invocation() {
        let options = ComposeOptions {
            dry_run: true,
            ..Default::default()
        };
        let cmd = compose(&module(vec![ProfileId::AutoInstallPackage]), &options).unwrap();

        assert!(cmd.dry_run);
        assert_eq!(cmd.command, "mvn clean install -PautoInstallPackage");
        assert_eq!(
            cmd.invocation,
            "echo [DRY RUN] Would run: mvn clean install -PautoInstallPackage in /repo/ui.apps"
        );
    }

    #[test]
    fn test_from_config() {
        let config = AemkitConfig {
            maven_executable: "./mvnw".to_string(),
            maven_arguments: "-T 4".to_string(),
            install_command: "install".to_string(),
            skip_tests: true,
            dry_run: false,
            missing_profile: MissingProfilePolicy::PlainGoal,
            log_level: "info".to_string(),
        };
        let options = ComposeOptions::from_config(&config);

        let cmd = compose(&module(vec![ProfileId::AutoInstallBundle]), &options).unwrap();
        assert_eq!(cmd.command, "./mvnw -T 4 install -PautoInstallBundle -DskipTests");
    }
}
