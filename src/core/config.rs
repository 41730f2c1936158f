//! Configuration structures and types for batch-publisher
//!
//! `PublisherConfig` is the fully-resolved configuration a run uses.
//! `ConfigLayer` is one partially-specified source (file, environment,
//! CLI) that the loader merges on top of the defaults.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Placeholder replaced by `root/entry` in argument templates
pub const PATH_PLACEHOLDER: &str = "{path}";

/// Placeholder replaced by the entry name in argument templates
pub const NAME_PLACEHOLDER: &str = "{name}";

/// Which directory entries become publish targets
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum EntryFilter {
    /// Only directories (default)
    #[default]
    Directories,
    /// Every entry, file or directory
    All,
}

/// Resolved configuration for one batch run
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PublisherConfig {
    /// Directory whose immediate entries are published
    pub root: PathBuf,

    /// Publish tool executable
    pub command: String,

    /// Argument templates (`{path}` and `{name}` are substituted)
    pub args: Vec<String>,

    /// Executables the runner may spawn
    pub allowed_commands: Vec<String>,

    /// Working directory for spawned commands (default: inherit)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub working_dir: Option<PathBuf>,

    /// Per-task timeout in seconds (default: none)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,

    /// Run tasks one at a time (default: true)
    pub sequential: bool,

    /// Maximum concurrent tasks when not sequential
    pub max_concurrency: usize,

    /// Entry type filter
    pub entry_filter: EntryFilter,

    /// Include entries whose name starts with '.'
    pub include_hidden: bool,

    /// Skip directories that do not contain this file (e.g. "wally.toml")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required_manifest: Option<String>,

    /// Sort entry names before publishing (default: true)
    pub sort_entries: bool,

    /// Print the commands without running them
    pub dry_run: bool,
}

impl Default for PublisherConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("./libs"),
            command: "wally".to_string(),
            args: vec![
                "publish".to_string(),
                "--project-path".to_string(),
                PATH_PLACEHOLDER.to_string(),
            ],
            allowed_commands: vec!["wally".to_string()],
            working_dir: None,
            timeout_secs: None,
            sequential: true,
            max_concurrency: 4,
            entry_filter: EntryFilter::Directories,
            include_hidden: false,
            required_manifest: None,
            sort_entries: true,
            dry_run: false,
        }
    }
}

impl PublisherConfig {
    /// Per-task timeout, if configured
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    /// Project path for one entry: `root/entry`
    pub fn project_path(&self, entry: &str) -> PathBuf {
        self.root.join(entry)
    }

    /// Render the argument templates for one entry
    pub fn render_args(&self, entry: &str, project_path: &Path) -> Vec<String> {
        let path = project_path.to_string_lossy();
        self.args
            .iter()
            .map(|arg| {
                arg.replace(PATH_PLACEHOLDER, &path)
                    .replace(NAME_PLACEHOLDER, entry)
            })
            .collect()
    }

    /// Effective number of tasks allowed in flight
    pub fn concurrency(&self) -> usize {
        if self.sequential {
            1
        } else {
            self.max_concurrency.max(1)
        }
    }
}

/// A partial configuration from one source
///
/// Every field is optional; `Some` values override the layer below.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ConfigLayer {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub root: Option<PathBuf>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub args: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub allowed_commands: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub working_dir: Option<PathBuf>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub sequential: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_concurrency: Option<usize>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub entry_filter: Option<EntryFilter>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_hidden: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub required_manifest: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_entries: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub dry_run: Option<bool>,
}

impl ConfigLayer {
    /// Apply this layer on top of `target`
    pub fn apply_to(self, target: &mut PublisherConfig) {
        if let Some(root) = self.root {
            target.root = root;
        }
        if let Some(command) = self.command {
            target.command = command;
        }
        if let Some(args) = self.args {
            target.args = args;
        }
        if let Some(allowed) = self.allowed_commands {
            for command in allowed {
                if !target.allowed_commands.contains(&command) {
                    target.allowed_commands.push(command);
                }
            }
        }
        if self.working_dir.is_some() {
            target.working_dir = self.working_dir;
        }
        if self.timeout_secs.is_some() {
            target.timeout_secs = self.timeout_secs;
        }
        if let Some(sequential) = self.sequential {
            target.sequential = sequential;
        }
        if let Some(max) = self.max_concurrency {
            target.max_concurrency = max;
        }
        if let Some(filter) = self.entry_filter {
            target.entry_filter = filter;
        }
        if let Some(hidden) = self.include_hidden {
            target.include_hidden = hidden;
        }
        if self.required_manifest.is_some() {
            target.required_manifest = self.required_manifest;
        }
        if let Some(sort) = self.sort_entries {
            target.sort_entries = sort;
        }
        if let Some(dry_run) = self.dry_run {
            target.dry_run = dry_run;
        }
    }
}
