use crate::error::{Result, VerbumpError};
use crate::hooks::{HookContext, DEFAULT_HOOK_TIMEOUT};
use std::path::Path;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tracing::debug;

/// Executes pre-release hook commands
///
/// Commands run through `sh -c` in the module directory with the context
/// exported as environment variables. Each command gets a deadline; on
/// expiry the child process is killed and the hook fails.
pub struct HookExecutor {
    timeout: Duration,
}

impl HookExecutor {
    /// Executor with the default 30 second per-command timeout
    pub fn new() -> Self {
        HookExecutor {
            timeout: DEFAULT_HOOK_TIMEOUT,
        }
    }

    /// Executor with a caller-supplied per-command deadline
    pub fn with_timeout(timeout: Duration) -> Self {
        HookExecutor { timeout }
    }

    /// Execute a single hook command with the given context
    ///
    /// Exit code 0 means success. Any non-zero exit code, a spawn failure,
    /// or an expired deadline is a failure.
    pub async fn execute(&self, command: &str, working_dir: &Path, context: &HookContext) -> Result<()> {
        debug!(command, dir = %working_dir.display(), "running hook");

        let mut cmd = Command::new("sh");
        cmd.arg("-c")
            .arg(command)
            .current_dir(working_dir)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            // A task abort must not leave the child running
            .kill_on_drop(true);

        for (key, value) in context.to_env_vars() {
            cmd.env(key, value);
        }

        let mut child = cmd
            .spawn()
            .map_err(|e| VerbumpError::hook(format!("Failed to start '{}': {}", command, e)))?;

        let output = match tokio::time::timeout(self.timeout, child.wait_with_output()).await {
            Ok(result) => result
                .map_err(|e| VerbumpError::hook(format!("Failed to run '{}': {}", command, e)))?,
            Err(_) => {
                return Err(VerbumpError::hook(format!(
                    "'{}' timed out after {}s and was killed",
                    command,
                    self.timeout.as_secs()
                )));
            }
        };

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let stdout = String::from_utf8_lossy(&output.stdout);
            return Err(VerbumpError::hook(format!(
                "'{}' failed with exit code {}\nStdout: {}\nStderr: {}",
                command,
                output.status.code().unwrap_or(-1),
                stdout,
                stderr
            )));
        }

        Ok(())
    }

    /// Run hook commands in order; the first failure aborts
    pub async fn execute_all(
        &self,
        commands: &[String],
        working_dir: &Path,
        context: &HookContext,
    ) -> Result<()> {
        for command in commands {
            self.execute(command, working_dir, context).await?;
        }
        Ok(())
    }
}

impl Default for HookExecutor {
    fn default() -> Self {
        Self::new()
    }
}
