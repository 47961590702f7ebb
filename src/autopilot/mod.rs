//! Autopush pipeline: detect changes, commit, and push, once or in a loop.
//!
//! Orchestrates status polling, message generation, staging/commit, the
//! pre-push delay, and push with upstream recovery.

pub mod outcome;

use std::future::Future;

use chrono::Local;
use tracing::{debug, info};

use crate::clock::Sleeper;
use crate::commit::generate_commit_message;
use crate::config::Config;
use crate::git::{CommitOutcome, GitExecutor, PushOutcome, fetch_status, push, stage_and_commit};

pub use outcome::{RunOptions, RunOutcome};

/// Width of the `=` rule framing printed commit messages.
const RULE_WIDTH: usize = 40;

/// Drives the detect → commit → push cycle against one repository.
pub struct Autopilot<G, S> {
    git: G,
    sleeper: S,
    config: Config,
}

impl<G: GitExecutor, S: Sleeper> Autopilot<G, S> {
    pub fn new(git: G, sleeper: S, config: Config) -> Self {
        Self {
            git,
            sleeper,
            config,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Run a single cycle.
    ///
    /// Steps:
    /// 1. `git status --porcelain` - stop with `NoChanges` on a clean tree
    /// 2. Use the custom message or generate one from the change set
    /// 3. Dry run: print the message and stop
    /// 4. Stage and commit
    /// 5. Wait the push delay, then push
    pub async fn run_once(&self, options: &RunOptions) -> RunOutcome {
        let changes = fetch_status(&self.git).await;
        if changes.is_empty() {
            debug!("Working tree is clean");
            return RunOutcome::NoChanges;
        }

        let message = match options.custom_message() {
            Some(custom) => custom.to_string(),
            None => generate_commit_message(&changes, &self.config.scope()).format(),
        };

        if options.dry_run {
            println!("🔍 [DRY RUN] Generated Commit Message:");
            print_framed(&message);
            return RunOutcome::DryRun(message);
        }

        match stage_and_commit(&self.git, &message).await {
            Ok(CommitOutcome::Committed) => {
                println!("📝 Committed with message:");
                print_framed(&message);
            }
            Ok(CommitOutcome::NothingToCommit) => {
                println!("✨ No changes to commit.");
                return RunOutcome::NothingToCommit;
            }
            Err(e) => {
                eprintln!("❌ {}", e);
                return RunOutcome::CommitFailed(e);
            }
        }

        self.push_after_delay().await
    }

    /// Poll for changes until `shutdown` resolves.
    ///
    /// Each iteration checks the status; when changes are present it waits the
    /// debounce interval and runs a cycle. The poll interval is always slept
    /// before the next iteration.
    pub async fn watch<F>(&self, options: &RunOptions, shutdown: F)
    where
        F: Future<Output = ()>,
    {
        println!("👀 Watching for changes... (Ctrl+C to stop)");
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                biased;
                () = &mut shutdown => break,
                () = self.poll(options) => {}
            }
        }

        println!("\n👋 Stopped.");
    }

    async fn poll(&self, options: &RunOptions) {
        let changes = fetch_status(&self.git).await;
        if !changes.is_empty() {
            println!(
                "\n⚡ Changes detected in [{}] at {}",
                self.config.scope(),
                Local::now().format("%H:%M:%S")
            );
            self.sleeper.sleep(self.config.debounce).await;

            let outcome = self.run_once(options).await;
            info!("Cycle finished: {}", outcome);
        }

        self.sleeper.sleep(self.config.poll_interval).await;
    }

    async fn push_after_delay(&self) -> RunOutcome {
        println!(
            "⏳ Waiting {} seconds before pushing...",
            self.config.push_delay.as_secs()
        );
        self.sleeper.sleep(self.config.push_delay).await;

        println!("🚀 Pushing to remote...");
        match push(&self.git, &self.config.remote).await {
            Ok(PushOutcome::Pushed) => {
                println!("✅ Push successful");
                RunOutcome::Pushed
            }
            Ok(PushOutcome::UpstreamSet { branch }) => {
                println!(
                    "✅ Push successful (upstream set to {}/{})",
                    self.config.remote, branch
                );
                RunOutcome::Pushed
            }
            Err(e) => {
                eprintln!("❌ {}", e);
                RunOutcome::PushFailed(e)
            }
        }
    }
}

fn print_framed(message: &str) {
    let rule = "=".repeat(RULE_WIDTH);
    println!("{rule}\n{message}\n{rule}");
}
