//! Runs a composed Maven command in its module directory.

use aemkit_maven::ComposedCommand;
use anyhow::{Context, Result};
use std::io::Write;
use std::process::Stdio;
use tokio::process::Command;
use tracing::{debug, info, warn};

#[async_trait::async_trait]
pub trait CommandExecutor: Send + Sync {
    /// Runs `command` to completion and returns its exit code.
    async fn execute(&self, command: &ComposedCommand) -> Result<i32>;
}

/// Hands the command line to the platform shell with inherited stdio.
#[derive(Debug, Default, Clone, Copy)]
pub struct ShellExecutor;

impl ShellExecutor {
    fn shell_command(line: &str) -> Command {
        if cfg!(windows) {
            let mut cmd = Command::new("cmd");
            cmd.arg("/C").arg(line);
            cmd
        } else {
            let mut cmd = Command::new("sh");
            cmd.arg("-c").arg(line);
            cmd
        }
    }
}

#[async_trait::async_trait]
impl CommandExecutor for ShellExecutor {
    async fn execute(&self, command: &ComposedCommand) -> Result<i32> {
        debug!(
            "Spawning '{}' in {}",
            command.invocation,
            command.working_directory.display()
        );

        let status = Self::shell_command(&command.invocation)
            .current_dir(&command.working_directory)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .await
            .with_context(|| {
                format!(
                    "Failed to run '{}' in {}",
                    command.command,
                    command.working_directory.display()
                )
            })?;

        match status.code() {
            Some(code) => Ok(code),
            None => {
                warn!("'{}' was terminated by a signal", command.command);
                Ok(1)
            }
        }
    }
}

/// Announces `command` on `out` and runs it unless it is a dry run.
///
/// Dry runs never reach the executor and always succeed.
pub async fn run_composed(
    command: &ComposedCommand,
    executor: &dyn CommandExecutor,
    out: &mut (dyn Write + Send),
) -> Result<i32> {
    if command.dry_run {
        writeln!(out, "{}", command.announcement()).context("Failed to write dry-run output")?;
        return Ok(0);
    }

    writeln!(
        out,
        "Running {} in {}",
        command.command,
        command.working_directory.display()
    )
    .context("Failed to write command announcement")?;
    out.flush().context("Failed to flush output")?;

    let code = executor.execute(command).await?;
    if code == 0 {
        info!("'{}' finished successfully", command.command);
    } else {
        warn!("'{}' exited with code {}", command.command, code);
    }
    Ok(code)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use std::sync::Mutex;

    struct RecordingExecutor {
        calls: Mutex<Vec<String>>,
        exit_code: i32,
    }

    impl RecordingExecutor {
        fn new(exit_code: i32) -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
                exit_code,
            }
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait::async_trait]
    impl CommandExecutor for RecordingExecutor {
        async fn execute(&self, command: &ComposedCommand) -> Result<i32> {
            self.calls.lock().unwrap().push(command.invocation.clone());
            Ok(self.exit_code)
        }
    }

    fn composed(dry_run: bool, working_directory: PathBuf) -> ComposedCommand {
        let command = "mvn clean install -PautoInstallPackage".to_string();
        let mut composed = ComposedCommand {
            working_directory,
            invocation: command.clone(),
            command,
            dry_run,
        };
        if dry_run {
            composed.invocation = format!("echo {}", composed.announcement());
        }
        composed
    }

    #[tokio::test]
    async fn test_dry_run_skips_executor() {
        let executor = RecordingExecutor::new(7);
        let mut out = Vec::new();

        let code = run_composed(
            &composed(true, PathBuf::from("/work/wknd/ui.apps")),
            &executor,
            &mut out,
        )
        .await
        .unwrap();

        assert_eq!(code, 0);
        assert!(executor.calls().is_empty());
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "[DRY RUN] Would run: mvn clean install -PautoInstallPackage in /work/wknd/ui.apps\n"
        );
    }

    #[tokio::test]
    async fn test_real_run_propagates_exit_code() {
        let executor = RecordingExecutor::new(3);
        let mut out = Vec::new();

        let code = run_composed(
            &composed(false, PathBuf::from("/work/wknd/ui.apps")),
            &executor,
            &mut out,
        )
        .await
        .unwrap();

        assert_eq!(code, 3);
        assert_eq!(
            executor.calls(),
            vec!["mvn clean install -PautoInstallPackage".to_string()]
        );
        assert!(String::from_utf8(out).unwrap().starts_with("Running mvn clean install"));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_shell_executor_runs_in_working_directory() {
        let dir = tempfile::TempDir::new().unwrap();
        let command = ComposedCommand {
            working_directory: dir.path().to_path_buf(),
            command: "touch marker && exit 4".to_string(),
            invocation: "touch marker && exit 4".to_string(),
            dry_run: false,
        };

        let code = ShellExecutor.execute(&command).await.unwrap();

        assert_eq!(code, 4);
        assert!(dir.path().join("marker").exists());
    }

    #[tokio::test]
    async fn test_shell_executor_missing_directory() {
        let command = ComposedCommand {
            working_directory: PathBuf::from("/definitely/not/here/aemkit"),
            command: "mvn".to_string(),
            invocation: "mvn".to_string(),
            dry_run: false,
        };

        assert!(ShellExecutor.execute(&command).await.is_err());
    }
}
