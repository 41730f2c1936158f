//! Publish task: the unit of work for one entry
//!
//! A task is created `Pending` when its entry is discovered and is
//! completed exactly once, becoming `Succeeded` or `Failed`.

use crate::core::error::PublishError;
use crate::core::manifest::PackageInfo;
use crate::core::traits::{CommandOutput, Invocation};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Task lifecycle state
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskState {
    Pending,
    Succeeded,
    Failed,
}

/// Final outcome of a completed task
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskOutcome {
    Success,
    Failure,
}

/// One attempt to publish one entry
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PublishTask {
    pub entry: String,
    pub project_path: PathBuf,
    pub command: String,
    pub state: TaskState,
    pub stdout: String,
    /// Captured stderr, or the error message when the command failed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stderr: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exit_code: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub package: Option<PackageInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub started_at: Option<DateTime<Utc>>,
    pub duration_ms: u64,
}

impl PublishTask {
    /// Create a pending task for an invocation
    pub fn new(invocation: &Invocation) -> Self {
        Self {
            entry: invocation.entry.clone(),
            project_path: invocation.project_path.clone(),
            command: invocation.display_command(),
            state: TaskState::Pending,
            stdout: String::new(),
            stderr: None,
            error_code: None,
            exit_code: None,
            package: None,
            started_at: None,
            duration_ms: 0,
        }
    }

    /// Record the start time
    pub fn mark_started(&mut self) {
        self.started_at = Some(Utc::now());
    }

    /// Record the command result; a task can only be completed once
    pub fn complete(
        &mut self,
        result: &Result<CommandOutput, PublishError>,
    ) -> Result<(), PublishError> {
        if self.state != TaskState::Pending {
            return Err(PublishError::AlreadyCompleted {
                entry: self.entry.clone(),
            });
        }

        if let Some(started) = self.started_at {
            self.duration_ms = (Utc::now() - started).num_milliseconds().max(0) as u64;
        }

        match result {
            Ok(output) => {
                self.state = TaskState::Succeeded;
                self.exit_code = output.exit_code;
                self.stdout = output.stdout.clone();
                self.stderr = Some(output.stderr.clone()).filter(|s| !s.trim().is_empty());
            }
            Err(error) => {
                self.state = TaskState::Failed;
                self.error_code = Some(error.code().to_string());
                match error {
                    PublishError::NonZeroExit {
                        code,
                        stdout,
                        stderr,
                        ..
                    } => {
                        self.exit_code = *code;
                        self.stdout = stdout.clone();
                        self.stderr = Some(if stderr.trim().is_empty() {
                            error.to_string()
                        } else {
                            stderr.clone()
                        });
                    }
                    other => self.stderr = Some(other.to_string()),
                }
            }
        }

        Ok(())
    }

    /// Outcome once completed
    pub fn outcome(&self) -> Option<TaskOutcome> {
        match self.state {
            TaskState::Pending => None,
            TaskState::Succeeded => Some(TaskOutcome::Success),
            TaskState::Failed => Some(TaskOutcome::Failure),
        }
    }

    pub fn is_success(&self) -> bool {
        self.state == TaskState::Succeeded
    }

    /// Stderr written by a successful run
    pub fn warning(&self) -> Option<&str> {
        match self.state {
            TaskState::Succeeded => self.stderr.as_deref(),
            _ => None,
        }
    }
}
