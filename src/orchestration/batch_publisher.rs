//! Batch Publisher - Publishes every package under a root directory
//!
//! Features:
//! - One publish task per discovered entry, attempted exactly once
//! - Per-task failures are recorded and never stop the batch
//! - Sequential (default) or bounded parallel execution
//! - Dry-run mode that prints commands without running them

use crate::core::config::PublisherConfig;
use crate::core::error::PublishError;
use crate::core::manifest::{WALLY_MANIFEST, read_package_info};
use crate::core::task::PublishTask;
use crate::core::traits::{CommandOutput, CommandRunner, Invocation, PublishReporter};
use crate::orchestration::discovery::{SkippedEntry, discover_entries};
use crate::orchestration::reporter::ConsoleReporter;
use crate::security::command_executor::SafeCommandExecutor;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Semaphore;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

/// Result of one batch run
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchReport {
    pub run_id: Uuid,
    pub root: PathBuf,
    pub dry_run: bool,

    /// Set when the root could not be listed; no tasks were attempted
    #[serde(skip_serializing_if = "Option::is_none")]
    pub listing_error: Option<String>,

    /// Completed tasks in attempt order
    pub tasks: Vec<PublishTask>,

    /// Entries excluded by the entry filter
    pub skipped: Vec<SkippedEntry>,

    pub started_at: DateTime<Utc>,
    pub duration_ms: u64,
}

impl BatchReport {
    fn new(run_id: Uuid, config: &PublisherConfig) -> Self {
        Self {
            run_id,
            root: config.root.clone(),
            dry_run: config.dry_run,
            listing_error: None,
            tasks: Vec::new(),
            skipped: Vec::new(),
            started_at: Utc::now(),
            duration_ms: 0,
        }
    }

    /// Number of publish tasks attempted
    pub fn attempted(&self) -> usize {
        self.tasks.len()
    }

    pub fn succeeded(&self) -> Vec<&PublishTask> {
        self.tasks.iter().filter(|t| t.is_success()).collect()
    }

    pub fn failed(&self) -> Vec<&PublishTask> {
        self.tasks.iter().filter(|t| !t.is_success()).collect()
    }

    /// True when the root was listed and every task succeeded
    pub fn is_success(&self) -> bool {
        self.listing_error.is_none() && self.tasks.iter().all(|t| t.is_success())
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Settings each task needs, cloned into spawned tasks
#[derive(Debug, Clone)]
struct TaskSettings {
    dry_run: bool,
    manifest: Option<String>,
}

/// BatchPublisher - publishes each entry of the root directory
pub struct BatchPublisher {
    config: PublisherConfig,
    runner: Arc<dyn CommandRunner>,
    reporter: Arc<dyn PublishReporter>,
}

impl BatchPublisher {
    /// Create a BatchPublisher with explicit runner and reporter
    pub fn new(
        config: PublisherConfig,
        runner: Arc<dyn CommandRunner>,
        reporter: Arc<dyn PublishReporter>,
    ) -> Self {
        Self {
            config,
            runner,
            reporter,
        }
    }

    /// Create a BatchPublisher that spawns real processes and prints to the console
    pub fn from_config(config: PublisherConfig, reporter: ConsoleReporter) -> Self {
        let mut executor = SafeCommandExecutor::new(config.allowed_commands.clone());
        if let Some(dir) = &config.working_dir {
            executor = executor.with_working_dir(dir.clone());
        }
        if let Some(timeout) = config.timeout() {
            executor = executor.with_timeout(timeout);
        }

        Self::new(config, Arc::new(executor), Arc::new(reporter))
    }

    pub fn config(&self) -> &PublisherConfig {
        &self.config
    }

    /// Build the scoped invocation for one entry
    pub fn invocation_for(&self, entry: &str) -> Invocation {
        let project_path = self.config.project_path(entry);
        Invocation {
            entry: entry.to_string(),
            program: self.config.command.clone(),
            args: self.config.render_args(entry, &project_path),
            project_path,
        }
    }

    /// Publish every entry under the root
    ///
    /// Never fails: a listing failure is reported once and recorded in the
    /// report, and each task failure is recorded against its own entry.
    pub async fn publish_all(&self) -> BatchReport {
        let run_id = Uuid::new_v4();
        let clock = Instant::now();
        let mut report = BatchReport::new(run_id, &self.config);

        info!(%run_id, root = %self.config.root.display(), dry_run = self.config.dry_run, "batch publish started");

        let discovered = match discover_entries(&self.config).await {
            Ok(discovered) => discovered,
            Err(err) => {
                error!(%run_id, "{}", err);
                self.reporter.on_fatal(&err);
                report.listing_error = Some(err.to_string());
                report.duration_ms = clock.elapsed().as_millis() as u64;
                return report;
            }
        };

        for skipped in &discovered.skipped {
            self.reporter
                .on_skipped(&skipped.entry, &skipped.reason.to_string());
        }
        report.skipped = discovered.skipped;

        self.reporter.on_discovered(discovered.targets.len());

        let invocations: Vec<Invocation> = discovered
            .targets
            .iter()
            .map(|entry| self.invocation_for(entry))
            .collect();

        report.tasks = if self.config.concurrency() == 1 {
            self.publish_sequentially(invocations).await
        } else {
            self.publish_in_parallel(invocations).await
        };

        report.duration_ms = clock.elapsed().as_millis() as u64;
        info!(
            %run_id,
            attempted = report.attempted(),
            failed = report.failed().len(),
            duration_ms = report.duration_ms,
            "batch publish finished"
        );

        report
    }

    fn task_settings(&self) -> TaskSettings {
        let manifest = self
            .config
            .required_manifest
            .clone()
            .unwrap_or_else(|| WALLY_MANIFEST.to_string());

        TaskSettings {
            dry_run: self.config.dry_run,
            manifest: manifest.ends_with(".toml").then_some(manifest),
        }
    }

    /// Run tasks one at a time in listing order
    async fn publish_sequentially(&self, invocations: Vec<Invocation>) -> Vec<PublishTask> {
        let settings = self.task_settings();
        let mut tasks = Vec::with_capacity(invocations.len());

        for invocation in invocations {
            self.reporter.on_start(&invocation);
            let (task, err) = Self::run_task(self.runner.as_ref(), &settings, &invocation).await;
            self.report_completion(&task, err.as_ref());
            tasks.push(task);
        }

        tasks
    }

    /// Run tasks concurrently, bounded by `max_concurrency`
    ///
    /// Results are reported and returned in listing order.
    async fn publish_in_parallel(&self, invocations: Vec<Invocation>) -> Vec<PublishTask> {
        let semaphore = Arc::new(Semaphore::new(self.config.concurrency()));
        let settings = self.task_settings();
        let mut handles = Vec::with_capacity(invocations.len());

        for invocation in invocations {
            let semaphore = Arc::clone(&semaphore);
            let runner = Arc::clone(&self.runner);
            let reporter = Arc::clone(&self.reporter);
            let settings = settings.clone();
            let invocation_for_task = invocation.clone();

            let handle = tokio::spawn(async move {
                // The semaphore is never closed, so acquire only fails on shutdown
                let _permit = semaphore.acquire_owned().await.ok();
                reporter.on_start(&invocation_for_task);
                Self::run_task(runner.as_ref(), &settings, &invocation_for_task).await
            });

            handles.push((invocation, handle));
        }

        let mut tasks = Vec::with_capacity(handles.len());
        for (invocation, handle) in handles {
            let (task, err) = match handle.await {
                Ok(finished) => finished,
                Err(join_err) => {
                    let err = PublishError::SpawnFailed {
                        entry: invocation.entry.clone(),
                        message: format!("Task failed: {}", join_err),
                    };
                    let mut task = PublishTask::new(&invocation);
                    let result = Err(err.clone());
                    if let Err(state_err) = task.complete(&result) {
                        warn!("{}", state_err);
                    }
                    (task, Some(err))
                }
            };

            self.report_completion(&task, err.as_ref());
            tasks.push(task);
        }

        tasks
    }

    /// Run one invocation and record its outcome
    async fn run_task(
        runner: &dyn CommandRunner,
        settings: &TaskSettings,
        invocation: &Invocation,
    ) -> (PublishTask, Option<PublishError>) {
        let mut task = PublishTask::new(invocation);

        if let Some(manifest) = &settings.manifest {
            match read_package_info(&invocation.project_path, manifest).await {
                Ok(info) => task.package = info,
                Err(e) => debug!(entry = %invocation.entry, "manifest not read: {}", e),
            }
        }

        task.mark_started();
        let result = if settings.dry_run {
            Ok(CommandOutput {
                exit_code: None,
                stdout: format!("[dry-run] {}", invocation.display_command()),
                stderr: String::new(),
            })
        } else {
            runner.run(invocation).await
        };

        if let Err(state_err) = task.complete(&result) {
            warn!("{}", state_err);
        }

        (task, result.err())
    }

    fn report_completion(&self, task: &PublishTask, err: Option<&PublishError>) {
        match err {
            None => {
                self.reporter.on_success(task);
                if let Some(stderr) = task.warning() {
                    self.reporter.on_warning(task, stderr);
                }
            }
            Some(err) => self.reporter.on_failure(task, err),
        }
    }
}

/// Publish every entry of `root` with the default `wally publish` invocation
pub async fn publish_all<P: Into<PathBuf>>(root: P) -> BatchReport {
    let config = PublisherConfig {
        root: root.into(),
        ..Default::default()
    };
    BatchPublisher::from_config(config, ConsoleReporter::new())
        .publish_all()
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::EntryFilter;
    use crate::core::task::TaskState;
    use async_trait::async_trait;
    use std::collections::HashSet;
    use std::path::Path;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;
    use tempfile::TempDir;

    /// Records every invocation; fails for the configured entry names
    #[derive(Default)]
    struct MockRunner {
        failing: HashSet<String>,
        unspawnable: HashSet<String>,
        timing_out: HashSet<String>,
        warning: HashSet<String>,
        calls: Mutex<Vec<Invocation>>,
        delay: Option<Duration>,
        in_flight: AtomicUsize,
        peak: AtomicUsize,
    }

    impl MockRunner {
        fn failing(names: &[&str]) -> Self {
            Self {
                failing: names.iter().map(|n| n.to_string()).collect(),
                ..Default::default()
            }
        }

        fn calls(&self) -> Vec<Invocation> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl CommandRunner for MockRunner {
        async fn run(&self, invocation: &Invocation) -> Result<CommandOutput, PublishError> {
            self.calls.lock().unwrap().push(invocation.clone());

            let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.peak.fetch_max(now, Ordering::SeqCst);
            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }
            self.in_flight.fetch_sub(1, Ordering::SeqCst);

            if self.unspawnable.contains(&invocation.entry) {
                return Err(PublishError::SpawnFailed {
                    entry: invocation.entry.clone(),
                    message: "No such file or directory (os error 2)".to_string(),
                });
            }

            if self.timing_out.contains(&invocation.entry) {
                return Err(PublishError::Timeout {
                    entry: invocation.entry.clone(),
                    timeout: Duration::from_secs(30),
                });
            }

            if self.failing.contains(&invocation.entry) {
                return Err(PublishError::NonZeroExit {
                    entry: invocation.entry.clone(),
                    code: Some(1),
                    stdout: String::new(),
                    stderr: format!("cannot publish {}", invocation.entry),
                });
            }

            Ok(CommandOutput {
                exit_code: Some(0),
                stdout: format!("published {}", invocation.entry),
                stderr: if self.warning.contains(&invocation.entry) {
                    "warning: package is large".to_string()
                } else {
                    String::new()
                },
            })
        }
    }

    #[derive(Debug, Clone, PartialEq, Eq)]
    enum Event {
        Fatal,
        Skipped(String),
        Success(String),
        Warning(String),
        Failure(String),
    }

    #[derive(Default)]
    struct RecordingReporter {
        events: Mutex<Vec<Event>>,
    }

    impl RecordingReporter {
        fn events(&self) -> Vec<Event> {
            self.events.lock().unwrap().clone()
        }

        fn push(&self, event: Event) {
            self.events.lock().unwrap().push(event);
        }
    }

    impl PublishReporter for RecordingReporter {
        fn on_fatal(&self, _error: &PublishError) {
            self.push(Event::Fatal);
        }

        fn on_skipped(&self, entry: &str, _reason: &str) {
            self.push(Event::Skipped(entry.to_string()));
        }

        fn on_success(&self, task: &PublishTask) {
            self.push(Event::Success(task.entry.clone()));
        }

        fn on_warning(&self, task: &PublishTask, _stderr: &str) {
            self.push(Event::Warning(task.entry.clone()));
        }

        fn on_failure(&self, task: &PublishTask, _error: &PublishError) {
            self.push(Event::Failure(task.entry.clone()));
        }
    }

    fn root_with(entries: &[&str]) -> TempDir {
        let dir = TempDir::new().unwrap();
        for entry in entries {
            std::fs::create_dir(dir.path().join(entry)).unwrap();
        }
        dir
    }

    fn publisher(
        root: &Path,
        runner: Arc<MockRunner>,
        reporter: Arc<RecordingReporter>,
    ) -> BatchPublisher {
        let config = PublisherConfig {
            root: root.to_path_buf(),
            ..Default::default()
        };
        BatchPublisher::new(config, runner, reporter)
    }

    #[tokio::test]
    async fn test_mixed_results_attempt_every_entry() {
        let dir = root_with(&["A", "B", "C"]);
        let runner = Arc::new(MockRunner::failing(&["B"]));
        let reporter = Arc::new(RecordingReporter::default());

        let report = publisher(dir.path(), runner.clone(), reporter.clone())
            .publish_all()
            .await;

        assert_eq!(runner.calls().len(), 3);
        assert_eq!(report.attempted(), 3);
        assert_eq!(
            reporter.events(),
            vec![
                Event::Success("A".to_string()),
                Event::Failure("B".to_string()),
                Event::Success("C".to_string()),
            ]
        );
        assert_eq!(report.succeeded().len(), 2);
        assert_eq!(report.failed()[0].entry, "B");
        assert!(!report.is_success());
        assert!(report.listing_error.is_none());
    }

    #[tokio::test]
    async fn test_first_failure_does_not_stop_later_entries() {
        let dir = root_with(&["Dot", "Grid", "Quest", "State", "Tween"]);
        let runner = Arc::new(MockRunner::failing(&["Dot", "Quest"]));
        let reporter = Arc::new(RecordingReporter::default());

        let report = publisher(dir.path(), runner.clone(), reporter)
            .publish_all()
            .await;

        assert_eq!(report.attempted(), 5);
        let states: Vec<TaskState> = report.tasks.iter().map(|t| t.state).collect();
        assert_eq!(
            states,
            vec![
                TaskState::Failed,
                TaskState::Succeeded,
                TaskState::Failed,
                TaskState::Succeeded,
                TaskState::Succeeded,
            ]
        );
    }

    #[tokio::test]
    async fn test_invocation_targets_root_entry() {
        let dir = root_with(&["Grid", "Tween"]);
        let runner = Arc::new(MockRunner::default());
        let reporter = Arc::new(RecordingReporter::default());

        publisher(dir.path(), runner.clone(), reporter)
            .publish_all()
            .await;

        let calls = runner.calls();
        assert_eq!(calls.len(), 2);
        for call in calls {
            let expected = dir.path().join(&call.entry);
            assert_eq!(call.program, "wally");
            assert_eq!(call.project_path, expected);
            assert_eq!(
                call.args,
                vec![
                    "publish".to_string(),
                    "--project-path".to_string(),
                    expected.to_string_lossy().into_owned(),
                ]
            );
        }
    }

    #[tokio::test]
    async fn test_missing_root_is_single_fatal_report() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("libs");
        let runner = Arc::new(MockRunner::default());
        let reporter = Arc::new(RecordingReporter::default());

        let report = publisher(&missing, runner.clone(), reporter.clone())
            .publish_all()
            .await;

        assert!(runner.calls().is_empty());
        assert_eq!(report.attempted(), 0);
        assert_eq!(reporter.events(), vec![Event::Fatal]);
        assert!(report.listing_error.is_some());
        assert!(!report.is_success());
    }

    #[tokio::test]
    async fn test_empty_root_completes_normally() {
        let dir = root_with(&[]);
        let runner = Arc::new(MockRunner::default());
        let reporter = Arc::new(RecordingReporter::default());

        let report = publisher(dir.path(), runner.clone(), reporter.clone())
            .publish_all()
            .await;

        assert!(runner.calls().is_empty());
        assert!(reporter.events().is_empty());
        assert!(report.is_success());
    }

    #[tokio::test]
    async fn test_spawn_and_timeout_failures_are_recorded_per_task() {
        let dir = root_with(&["Dot", "Grid", "Quest"]);
        let runner = Arc::new(MockRunner {
            unspawnable: ["Dot".to_string()].into_iter().collect(),
            timing_out: ["Grid".to_string()].into_iter().collect(),
            ..Default::default()
        });
        let reporter = Arc::new(RecordingReporter::default());

        let report = publisher(dir.path(), runner.clone(), reporter.clone())
            .publish_all()
            .await;

        assert_eq!(runner.calls().len(), 3);
        assert_eq!(
            reporter.events(),
            vec![
                Event::Failure("Dot".to_string()),
                Event::Failure("Grid".to_string()),
                Event::Success("Quest".to_string()),
            ]
        );

        let dot = &report.tasks[0];
        assert_eq!(dot.state, TaskState::Failed);
        assert_eq!(dot.error_code.as_deref(), Some("SPAWN_FAILED"));
        assert_eq!(dot.exit_code, None);
        assert!(dot.stderr.as_deref().unwrap().contains("os error 2"));

        let grid = &report.tasks[1];
        assert_eq!(grid.state, TaskState::Failed);
        assert_eq!(grid.error_code.as_deref(), Some("TIMEOUT"));
        assert!(grid.stderr.as_deref().unwrap().contains("timed out"));

        assert!(report.tasks[2].is_success());

        let json: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();
        assert_eq!(json["tasks"][0]["errorCode"], "SPAWN_FAILED");
        assert_eq!(json["tasks"][1]["errorCode"], "TIMEOUT");
    }

    #[tokio::test]
    async fn test_stderr_on_success_reports_warning() {
        let dir = root_with(&["Grid"]);
        let runner = Arc::new(MockRunner {
            warning: ["Grid".to_string()].into_iter().collect(),
            ..Default::default()
        });
        let reporter = Arc::new(RecordingReporter::default());

        let report = publisher(dir.path(), runner, reporter.clone())
            .publish_all()
            .await;

        assert_eq!(
            reporter.events(),
            vec![
                Event::Success("Grid".to_string()),
                Event::Warning("Grid".to_string()),
            ]
        );
        assert!(report.is_success());
    }

    #[tokio::test]
    async fn test_files_are_skipped_not_attempted() {
        let dir = root_with(&["State"]);
        std::fs::write(dir.path().join("notes.txt"), "x").unwrap();
        let runner = Arc::new(MockRunner::default());
        let reporter = Arc::new(RecordingReporter::default());

        let report = publisher(dir.path(), runner.clone(), reporter.clone())
            .publish_all()
            .await;

        assert_eq!(runner.calls().len(), 1);
        assert_eq!(report.skipped.len(), 1);
        assert_eq!(
            reporter.events(),
            vec![
                Event::Skipped("notes.txt".to_string()),
                Event::Success("State".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn test_all_filter_attempts_files_too() {
        let dir = root_with(&["State"]);
        std::fs::write(dir.path().join("notes.txt"), "x").unwrap();
        let runner = Arc::new(MockRunner::default());
        let reporter = Arc::new(RecordingReporter::default());
        let config = PublisherConfig {
            root: dir.path().to_path_buf(),
            entry_filter: EntryFilter::All,
            ..Default::default()
        };

        let report = BatchPublisher::new(config, runner.clone(), reporter)
            .publish_all()
            .await;

        assert_eq!(runner.calls().len(), 2);
        assert_eq!(report.attempted(), 2);
    }

    #[tokio::test]
    async fn test_parallel_keeps_independence_and_order() {
        let dir = root_with(&["A", "B", "C", "D", "E", "F"]);
        let runner = Arc::new(MockRunner {
            failing: ["B".to_string(), "E".to_string()].into_iter().collect(),
            delay: Some(Duration::from_millis(20)),
            ..Default::default()
        });
        let reporter = Arc::new(RecordingReporter::default());
        let config = PublisherConfig {
            root: dir.path().to_path_buf(),
            sequential: false,
            max_concurrency: 2,
            ..Default::default()
        };

        let report = BatchPublisher::new(config, runner.clone(), reporter.clone())
            .publish_all()
            .await;

        assert_eq!(runner.calls().len(), 6);
        assert!(runner.peak.load(Ordering::SeqCst) <= 2);
        let entries: Vec<&str> = report.tasks.iter().map(|t| t.entry.as_str()).collect();
        assert_eq!(entries, vec!["A", "B", "C", "D", "E", "F"]);
        let failed: Vec<&str> = report.failed().iter().map(|t| t.entry.as_str()).collect();
        assert_eq!(failed, vec!["B", "E"]);
        assert_eq!(reporter.events()[1], Event::Failure("B".to_string()));
    }

    #[tokio::test]
    async fn test_dry_run_spawns_nothing() {
        let dir = root_with(&["Dot", "Grid"]);
        let runner = Arc::new(MockRunner::failing(&["Dot"]));
        let reporter = Arc::new(RecordingReporter::default());
        let config = PublisherConfig {
            root: dir.path().to_path_buf(),
            dry_run: true,
            ..Default::default()
        };

        let report = BatchPublisher::new(config, runner.clone(), reporter)
            .publish_all()
            .await;

        assert!(runner.calls().is_empty());
        assert_eq!(report.attempted(), 2);
        assert!(report.is_success());
        assert!(report.tasks[0].stdout.starts_with("[dry-run] wally publish"));
    }

    #[tokio::test]
    async fn test_manifest_metadata_is_attached() {
        let dir = root_with(&["Grid"]);
        std::fs::write(
            dir.path().join("Grid").join("wally.toml"),
            "[package]\nname = \"parihsz/grid\"\nversion = \"1.2.0\"\n",
        )
        .unwrap();
        let runner = Arc::new(MockRunner::default());
        let reporter = Arc::new(RecordingReporter::default());

        let report = publisher(dir.path(), runner, reporter).publish_all().await;

        let package = report.tasks[0].package.as_ref().unwrap();
        assert_eq!(package.name, "parihsz/grid");
        assert_eq!(package.version, "1.2.0");
    }

    #[tokio::test]
    async fn test_report_serializes_to_json() {
        let dir = root_with(&["A", "B"]);
        let runner = Arc::new(MockRunner::failing(&["B"]));
        let reporter = Arc::new(RecordingReporter::default());

        let report = publisher(dir.path(), runner, reporter).publish_all().await;
        let json: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();

        assert_eq!(json["tasks"].as_array().unwrap().len(), 2);
        assert_eq!(json["tasks"][0]["state"], "SUCCEEDED");
        assert_eq!(json["tasks"][1]["state"], "FAILED");
        assert_eq!(json["tasks"][1]["errorCode"], "NON_ZERO_EXIT");
        assert!(json.get("listingError").is_none());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_real_processes_through_executor() {
        let dir = root_with(&["Dot", "Grid"]);
        let config = PublisherConfig {
            root: dir.path().to_path_buf(),
            command: "echo".to_string(),
            args: vec!["publishing".to_string(), "{name}".to_string()],
            allowed_commands: vec!["echo".to_string()],
            ..Default::default()
        };

        let report = BatchPublisher::from_config(config, ConsoleReporter::new())
            .publish_all()
            .await;

        assert!(report.is_success());
        assert_eq!(report.tasks[0].stdout.trim(), "publishing Dot");
        assert_eq!(report.tasks[1].stdout.trim(), "publishing Grid");
    }
}
