//! Console reporting for batch runs
//!
//! Progress lines go to stdout (or stderr when stdout is reserved for
//! JSON output); every event is also emitted through `tracing`.

use crate::core::error::PublishError;
use crate::core::task::PublishTask;
use crate::core::traits::{Invocation, PublishReporter};
use crate::orchestration::batch_publisher::BatchReport;
use std::fmt::Write;
use tracing::{error, info, warn};

/// Prints per-entry results to the terminal
#[derive(Debug, Clone, Default)]
pub struct ConsoleReporter {
    /// Send progress lines to stderr instead of stdout
    progress_to_stderr: bool,
}

impl ConsoleReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep stdout free for machine-readable output
    pub fn with_progress_on_stderr(mut self) -> Self {
        self.progress_to_stderr = true;
        self
    }

    fn line(&self, message: &str) {
        if self.progress_to_stderr {
            eprintln!("{}", message);
        } else {
            println!("{}", message);
        }
    }
}

impl PublishReporter for ConsoleReporter {
    fn on_fatal(&self, err: &PublishError) {
        error!(code = err.code(), "{}", err);
        eprintln!("\n❌ {}", err);
        for action in err.suggested_actions() {
            eprintln!("   - {}", action);
        }
    }

    fn on_discovered(&self, count: usize) {
        info!(count, "publish targets discovered");
        self.line(&format!("\n📦 Publishing {} package(s)\n", count));
    }

    fn on_skipped(&self, entry: &str, reason: &str) {
        info!(entry, reason, "skipped");
        self.line(&format!("⏭️  Skipping {}: {}", entry, reason));
    }

    fn on_start(&self, invocation: &Invocation) {
        info!(entry = %invocation.entry, command = %invocation.display_command(), "publishing");
        self.line(&format!("🚀 Publishing {}...", invocation.entry));
    }

    fn on_success(&self, task: &PublishTask) {
        info!(entry = %task.entry, duration_ms = task.duration_ms, "published");
        let package = task
            .package
            .as_ref()
            .map(|p| format!(" [{}@{}]", p.name, p.version))
            .unwrap_or_default();
        self.line(&format!(
            "✅ Success for {}{} ({}ms): {}",
            task.entry,
            package,
            task.duration_ms,
            task.stdout.trim_end()
        ));
    }

    fn on_warning(&self, task: &PublishTask, stderr: &str) {
        warn!(entry = %task.entry, "publish wrote to stderr");
        eprintln!("⚠️  Error output for {}: {}", task.entry, stderr.trim_end());
    }

    fn on_failure(&self, task: &PublishTask, err: &PublishError) {
        error!(entry = %task.entry, code = err.code(), duration_ms = task.duration_ms, "publish failed");
        eprintln!("❌ Execution failed for {}: {}", task.entry, err);
    }
}

/// Print the closing summary for a batch run
pub fn print_summary(report: &BatchReport) {
    print!("{}", format_summary(report));
}

/// Render the closing summary
///
/// A listing failure was already reported by `on_fatal`, so it only shows
/// up here in the status line.
pub fn format_summary(report: &BatchReport) -> String {
    let rule = "=".repeat(60);
    let mut out = String::new();
    let _ = writeln!(out, "\n{}", rule);
    let _ = writeln!(out, "📊 Batch Publish Summary");
    let _ = writeln!(out, "{}", rule);

    let succeeded = report.succeeded();
    let _ = writeln!(out, "\n✅ Succeeded: {}", succeeded.len());
    for task in succeeded {
        let _ = writeln!(out, "   - {} ({}ms)", task.entry, task.duration_ms);
    }

    let failed = report.failed();
    let _ = writeln!(out, "\n❌ Failed: {}", failed.len());
    for task in failed {
        let _ = writeln!(
            out,
            "   - {}: {} ({}ms)",
            task.entry,
            task.error_code.as_deref().unwrap_or("UNKNOWN"),
            task.duration_ms
        );
    }

    if !report.skipped.is_empty() {
        let _ = writeln!(out, "\n⏭️  Skipped: {}", report.skipped.len());
        for skipped in &report.skipped {
            let _ = writeln!(out, "   - {} ({})", skipped.entry, skipped.reason);
        }
    }

    let status = if report.listing_error.is_some() {
        "❌ FAILED (root not listed)"
    } else if report.is_success() {
        "✅ SUCCESS"
    } else {
        "❌ FAILED"
    };

    let _ = writeln!(out, "\n{}", rule);
    let _ = writeln!(
        out,
        "Overall Status: {}{}",
        status,
        if report.dry_run { " (dry run)" } else { "" }
    );
    let _ = writeln!(out, "{}\n", rule);
    out
}
