//! Core traits and types for batch publishing
//!
//! `CommandRunner` is the process boundary and `PublishReporter` is the
//! console/log boundary. Both are traits so the driver can be exercised
//! with recording fakes.

use crate::core::error::PublishError;
use crate::core::task::PublishTask;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

// ============================================================================
// Process boundary
// ============================================================================

/// One scoped invocation of the publish tool
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invocation {
    /// Entry name the invocation belongs to
    pub entry: String,
    /// Executable name
    pub program: String,
    /// Fully rendered arguments
    pub args: Vec<String>,
    /// `root/entry`
    pub project_path: PathBuf,
}

impl Invocation {
    /// Human readable command line (for logs and dry runs only)
    pub fn display_command(&self) -> String {
        let mut line = self.program.clone();
        for arg in &self.args {
            line.push(' ');
            if arg.is_empty() || arg.contains(char::is_whitespace) {
                line.push_str(&format!("{:?}", arg));
            } else {
                line.push_str(arg);
            }
        }
        line
    }
}

/// Captured output of a process that exited successfully
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandOutput {
    pub exit_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

/// Runs a publish invocation to completion
///
/// Implementations return `Ok` only for a zero exit status; every other
/// outcome (non-zero exit, spawn failure, timeout) is an `Err`.
#[async_trait]
pub trait CommandRunner: Send + Sync {
    async fn run(&self, invocation: &Invocation) -> Result<CommandOutput, PublishError>;
}

// ============================================================================
// Console/log boundary
// ============================================================================

/// Receives progress and results from the batch driver
pub trait PublishReporter: Send + Sync {
    /// Root listing failed; nothing will be attempted
    fn on_fatal(&self, error: &PublishError);

    /// Listing succeeded with `count` publish targets
    fn on_discovered(&self, _count: usize) {}

    /// An entry was excluded by the entry filter
    fn on_skipped(&self, _entry: &str, _reason: &str) {}

    /// A task is about to run
    fn on_start(&self, _invocation: &Invocation) {}

    /// The task succeeded
    fn on_success(&self, task: &PublishTask);

    /// The task succeeded but wrote to stderr
    fn on_warning(&self, task: &PublishTask, stderr: &str);

    /// The task failed
    fn on_failure(&self, task: &PublishTask, error: &PublishError);
}
