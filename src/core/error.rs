//! Error handling for batch publishing
//!
//! Errors fall into two groups: the single fatal condition (the root
//! directory cannot be listed) and per-task failures that are recorded
//! against one entry and never stop the rest of the batch.

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Main error type for batch publishing operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PublishError {
    // Fatal
    #[error("Failed to read directory {}: {message}", root.display())]
    ListingFailed { root: PathBuf, message: String },

    // Per-task errors
    #[error("[{entry}] Command '{command}' is not in the allowed list")]
    CommandNotAllowed { entry: String, command: String },

    #[error("[{entry}] Working directory does not exist: {}", path.display())]
    InvalidWorkingDirectory { entry: String, path: PathBuf },

    #[error("[{entry}] Failed to start command: {message}")]
    SpawnFailed { entry: String, message: String },

    #[error("[{entry}] Command exited with {}: {stderr}", exit_label(*code))]
    NonZeroExit {
        entry: String,
        code: Option<i32>,
        stdout: String,
        stderr: String,
    },

    #[error("[{entry}] Command timed out after {timeout:?}")]
    Timeout { entry: String, timeout: Duration },

    #[error("[{entry}] Task has already completed")]
    AlreadyCompleted { entry: String },

    // Configuration
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

fn exit_label(code: Option<i32>) -> String {
    match code {
        Some(code) => format!("status {}", code),
        None => "no status (terminated by signal)".to_string(),
    }
}

impl PublishError {
    /// Entry name associated with this error, if it belongs to a single task
    pub fn entry(&self) -> Option<&str> {
        match self {
            Self::CommandNotAllowed { entry, .. }
            | Self::InvalidWorkingDirectory { entry, .. }
            | Self::SpawnFailed { entry, .. }
            | Self::NonZeroExit { entry, .. }
            | Self::Timeout { entry, .. }
            | Self::AlreadyCompleted { entry } => Some(entry),
            Self::ListingFailed { .. } | Self::ConfigError(_) => None,
        }
    }

    /// Fatal errors abort the whole batch; everything else is local to one task
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::ListingFailed { .. } | Self::ConfigError(_))
    }

    /// Get suggested actions for this error
    pub fn suggested_actions(&self) -> Vec<&'static str> {
        match self {
            Self::ListingFailed { .. } => vec![
                "Check that the root directory exists",
                "Check read permissions on the root directory",
            ],
            Self::CommandNotAllowed { .. } => {
                vec!["Name the command with --command or BATCH_PUBLISH_COMMAND"]
            }
            Self::InvalidWorkingDirectory { .. } => {
                vec!["Check the workingDir setting"]
            }
            Self::SpawnFailed { .. } => vec![
                "Check that the publish tool is installed",
                "Check that the publish tool is on PATH",
            ],
            Self::NonZeroExit { .. } => vec![
                "Read the command output above",
                "Run the command manually for this entry",
            ],
            Self::Timeout { .. } => vec![
                "Check network connectivity",
                "Raise the limit with --timeout",
            ],
            Self::AlreadyCompleted { .. } => vec![],
            Self::ConfigError(_) => vec!["Check .batch-publish.yaml and BATCH_PUBLISH_* variables"],
        }
    }

    /// Get error code for this error
    pub fn code(&self) -> &'static str {
        match self {
            Self::ListingFailed { .. } => "LISTING_FAILED",
            Self::CommandNotAllowed { .. } => "COMMAND_NOT_ALLOWED",
            Self::InvalidWorkingDirectory { .. } => "INVALID_WORKING_DIRECTORY",
            Self::SpawnFailed { .. } => "SPAWN_FAILED",
            Self::NonZeroExit { .. } => "NON_ZERO_EXIT",
            Self::Timeout { .. } => "TIMEOUT",
            Self::AlreadyCompleted { .. } => "ALREADY_COMPLETED",
            Self::ConfigError(_) => "CONFIG_ERROR",
        }
    }
}
