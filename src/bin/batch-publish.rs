//! Batch Publish CLI
//!
//! Publishes every package directory under a root with one command each

use anyhow::Result;
use batch_publisher::{
    BatchPublisher, ConfigLayer, ConfigLoadOptions, ConfigLoader, ConsoleReporter, EntryFilter,
    print_summary,
};
use clap::Parser;
use std::collections::HashMap;
use std::path::PathBuf;
use std::process;
use tracing_subscriber::{EnvFilter, fmt};

/// Publish every package under a directory
#[derive(Parser)]
#[command(name = "batch-publish")]
#[command(version)]
#[command(about = "Publish every package under a directory", long_about = None)]
struct Cli {
    /// Directory whose entries are published (default: ./libs)
    #[arg(value_name = "ROOT")]
    root: Option<PathBuf>,

    /// Publish tool to run for each entry (default: wally)
    #[arg(long)]
    command: Option<String>,

    /// Argument template, repeatable; {path} and {name} are substituted
    #[arg(long = "arg", value_name = "ARG", allow_hyphen_values = true)]
    args: Vec<String>,

    /// Kill a publish that runs longer than this many seconds
    #[arg(long, value_name = "SECS")]
    timeout: Option<u64>,

    /// Publish entries concurrently
    #[arg(long)]
    parallel: bool,

    /// Maximum concurrent publishes (with --parallel)
    #[arg(long)]
    max_concurrency: Option<usize>,

    /// Treat files as publish targets too
    #[arg(long)]
    include_files: bool,

    /// Include entries whose name starts with '.'
    #[arg(long)]
    include_hidden: bool,

    /// Skip directories that do not contain this file
    #[arg(long, value_name = "FILE")]
    require_manifest: Option<String>,

    /// Print the commands without running them
    #[arg(long)]
    dry_run: bool,

    /// Print the batch report as JSON on stdout
    #[arg(long)]
    json: bool,

    /// Config file (default: ./.batch-publish.yaml if present)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    /// Flags given on the command line, as the highest-priority config layer
    fn to_layer(&self) -> ConfigLayer {
        ConfigLayer {
            root: self.root.clone(),
            // A command named explicitly on the command line is trusted
            command: self.command.clone(),
            allowed_commands: self.command.clone().map(|c| vec![c]),
            args: (!self.args.is_empty()).then(|| self.args.clone()),
            timeout_secs: self.timeout,
            sequential: self.parallel.then_some(false),
            max_concurrency: self.max_concurrency,
            entry_filter: self.include_files.then_some(EntryFilter::All),
            include_hidden: self.include_hidden.then_some(true),
            required_manifest: self.require_manifest.clone(),
            dry_run: self.dry_run.then_some(true),
            ..Default::default()
        }
    }
}

#[tokio::main]
async fn main() {
    match run().await {
        Ok(exit_code) => process::exit(exit_code),
        Err(e) => {
            eprintln!("\n❌ Error");
            eprintln!("{}", e);
            process::exit(1);
        }
    }
}

async fn run() -> Result<i32> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("warn")
        }
    });
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let env: HashMap<String, String> = std::env::vars().collect();
    let config = ConfigLoader::load(ConfigLoadOptions {
        base_dir: std::env::current_dir()?,
        config_path: cli.config.clone(),
        cli_args: Some(cli.to_layer()),
        env,
    })
    .await?;

    let reporter = if cli.json {
        ConsoleReporter::new().with_progress_on_stderr()
    } else {
        ConsoleReporter::new()
    };

    if !cli.json {
        println!("\n📦 batch-publish: {}", config.root.display());
    }

    let publisher = BatchPublisher::from_config(config, reporter);
    let report = publisher.publish_all().await;

    if cli.json {
        println!("{}", report.to_json()?);
    } else {
        print_summary(&report);
    }

    Ok(if report.is_success() { 0 } else { 1 })
}
