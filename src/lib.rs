//! Batch publishing for a directory of packages
//!
//! Every immediate entry of a root directory (by default `./libs`) is
//! published with one invocation of an external publish tool (by default
//! `wally publish --project-path <root>/<entry>`). Each entry succeeds or
//! fails on its own; only an unreadable root stops the run.

pub mod core;
pub mod orchestration;
pub mod security;

pub use crate::core::*;
pub use orchestration::{
    BatchPublisher, BatchReport, ConsoleReporter, DiscoveredEntries, SkipReason, SkippedEntry,
    discover_entries, print_summary, publish_all,
};
pub use security::SafeCommandExecutor;
