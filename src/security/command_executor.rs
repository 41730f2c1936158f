//! SafeCommandExecutor: allow-listed child process execution
//!
//! # Security Features
//!
//! - **Allow-list validation**: Only configured programs can execute
//! - **Injection prevention**: Uses `tokio::process::Command`, never a shell
//! - **Argument safety**: Arguments are passed as an argv vector
//! - **Timeout control**: Hanging publishes are killed after the limit
//!
//! # Example
//!
//! ```rust,no_run
//! use batch_publisher::{CommandRunner, Invocation, SafeCommandExecutor};
//! use std::time::Duration;
//!
//! # async fn demo() {
//! let executor = SafeCommandExecutor::new(vec!["wally".to_string()])
//!     .with_timeout(Duration::from_secs(120));
//!
//! let invocation = Invocation {
//!     entry: "Grid".to_string(),
//!     program: "wally".to_string(),
//!     args: vec!["publish".into(), "--project-path".into(), "./libs/Grid".into()],
//!     project_path: "./libs/Grid".into(),
//! };
//! let output = executor.run(&invocation).await;
//! # }
//! ```

use crate::core::error::PublishError;
use crate::core::traits::{CommandOutput, CommandRunner, Invocation};
use async_trait::async_trait;
use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tracing::debug;

/// Safe command executor with security controls
#[derive(Debug, Clone)]
pub struct SafeCommandExecutor {
    /// Programs this executor may spawn
    allowed_commands: Vec<String>,
    /// Working directory for spawned commands (inherit when `None`)
    working_dir: Option<PathBuf>,
    /// Optional timeout for each command
    timeout: Option<Duration>,
}

impl SafeCommandExecutor {
    /// Create an executor that may only run the given programs
    pub fn new(allowed_commands: Vec<String>) -> Self {
        Self {
            allowed_commands,
            working_dir: None,
            timeout: None,
        }
    }

    /// Run commands from `dir` instead of the current directory
    pub fn with_working_dir<P: Into<PathBuf>>(mut self, dir: P) -> Self {
        self.working_dir = Some(dir.into());
        self
    }

    /// Kill commands that run longer than `timeout`
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    pub fn is_allowed(&self, program: &str) -> bool {
        self.allowed_commands.iter().any(|c| c == program)
    }
}

#[async_trait]
impl CommandRunner for SafeCommandExecutor {
    async fn run(&self, invocation: &Invocation) -> Result<CommandOutput, PublishError> {
        if !self.is_allowed(&invocation.program) {
            return Err(PublishError::CommandNotAllowed {
                entry: invocation.entry.clone(),
                command: invocation.program.clone(),
            });
        }

        let mut command = Command::new(&invocation.program);
        command
            .args(&invocation.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        if let Some(dir) = &self.working_dir {
            if !tokio::fs::try_exists(dir).await.unwrap_or(false) {
                return Err(PublishError::InvalidWorkingDirectory {
                    entry: invocation.entry.clone(),
                    path: dir.clone(),
                });
            }
            command.current_dir(dir);
        }

        debug!(entry = %invocation.entry, command = %invocation.display_command(), "spawning");

        let pending = command.output();
        let result = match self.timeout {
            Some(limit) => match tokio::time::timeout(limit, pending).await {
                Ok(result) => result,
                // Dropping the future kills the child
                Err(_) => {
                    return Err(PublishError::Timeout {
                        entry: invocation.entry.clone(),
                        timeout: limit,
                    });
                }
            },
            None => pending.await,
        };

        let output = result.map_err(|e| PublishError::SpawnFailed {
            entry: invocation.entry.clone(),
            message: e.to_string(),
        })?;

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();

        if output.status.success() {
            Ok(CommandOutput {
                exit_code: output.status.code(),
                stdout,
                stderr,
            })
        } else {
            Err(PublishError::NonZeroExit {
                entry: invocation.entry.clone(),
                code: output.status.code(),
                stdout,
                stderr,
            })
        }
    }
}
