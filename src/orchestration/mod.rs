//! Orchestration layer for batch publishing
//!
//! Discovery turns the root directory into publish targets, the batch
//! publisher runs one task per target, and the reporter prints results.

pub mod batch_publisher;
pub mod discovery;
pub mod reporter;

// Re-export main types for convenience
pub use batch_publisher::{BatchPublisher, BatchReport, publish_all};
pub use discovery::{DiscoveredEntries, SkipReason, SkippedEntry, discover_entries};
pub use reporter::{ConsoleReporter, format_summary, print_summary};
