//! autopush - CLI entry point.

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::warn;
use tracing_subscriber::EnvFilter;

use autopush::config::{
    DEFAULT_DEBOUNCE_SECS, DEFAULT_POLL_INTERVAL_SECS, DEFAULT_PUSH_DELAY_SECS, DEFAULT_REMOTE,
};
use autopush::git::{check_git_installed, find_repo_root, get_timeout};
use autopush::{Autopilot, Config, RunOptions, SystemGit, TokioSleeper};

/// Commit and push working tree changes with a generated message.
#[derive(Parser, Debug)]
#[command(name = "autopush")]
#[command(about = "Commit and push working tree changes with a generated message")]
#[command(version)]
struct Cli {
    /// Commit message to use instead of a generated one
    message: Option<String>,

    /// Print the generated message without committing or pushing
    #[arg(long)]
    dry_run: bool,

    /// Keep polling the working tree and push whenever it changes
    #[arg(long)]
    watch: bool,

    /// Repository path
    #[arg(short = 'C', long, default_value = ".")]
    path: PathBuf,

    /// Remote used when setting an upstream branch
    #[arg(long, default_value = DEFAULT_REMOTE)]
    remote: String,

    /// Seconds to wait after committing before pushing
    #[arg(long, default_value_t = DEFAULT_PUSH_DELAY_SECS)]
    push_delay: u64,

    /// Seconds to wait after detecting changes in watch mode
    #[arg(long, default_value_t = DEFAULT_DEBOUNCE_SECS)]
    debounce: u64,

    /// Seconds between status polls in watch mode
    #[arg(long, default_value_t = DEFAULT_POLL_INTERVAL_SECS)]
    poll_interval: u64,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn config(&self) -> Result<Config> {
        let repo_path = resolve_path(&self.path)
            .with_context(|| format!("Invalid repository path {}", self.path.display()))?;

        Ok(Config {
            repo_path,
            remote: self.remote.clone(),
            command_timeout: get_timeout(),
            push_delay: Duration::from_secs(self.push_delay),
            debounce: Duration::from_secs(self.debounce),
            poll_interval: Duration::from_secs(self.poll_interval),
        })
    }

    fn run_options(&self) -> RunOptions {
        RunOptions {
            message: self.message.clone(),
            dry_run: self.dry_run,
        }
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    check_git_installed().context("git is required")?;

    let config = cli.config()?;
    if find_repo_root(&config.repo_path).is_none() {
        warn!("{} is not inside a git repository", config.repo_path.display());
        println!(
            "⚠️ Warning: {} is not a git repository.",
            config.repo_path.display()
        );
    }

    let git = SystemGit::new(&config.repo_path, config.command_timeout);
    let pilot = Autopilot::new(git, TokioSleeper, config);
    let options = cli.run_options();

    if cli.watch {
        pilot.watch(&options, shutdown_signal()).await;
        return Ok(ExitCode::SUCCESS);
    }

    let outcome = pilot.run_once(&options).await;
    println!("{}", outcome);

    if outcome.is_failure() {
        Ok(ExitCode::FAILURE)
    } else {
        Ok(ExitCode::SUCCESS)
    }
}

/// Log to stderr, honouring RUST_LOG when set.
fn init_tracing(verbose: bool) {
    let default_directive = if verbose {
        "autopush=debug"
    } else {
        "autopush=warn"
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Absolute form of `path`, resolving symlinks when the path exists.
fn resolve_path(path: &Path) -> std::io::Result<PathBuf> {
    std::fs::canonicalize(path).or_else(|_| std::path::absolute(path))
}

/// Resolves on Ctrl-C.
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
}
