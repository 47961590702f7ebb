//! Shared test utilities for integration tests.
//!
//! Not all functions are used by every test file, but they're shared across tests.
#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::path::Path;
use std::process::Command;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use git2::Repository;
use tokio::sync::Notify;

use autopush::{CommandOutput, GitExecutor, Sleeper};

/// Git executor that replays scripted outputs and records every call.
///
/// Responses are keyed by the space-joined argument list. Each key holds a
/// queue; the last response for a key repeats once the queue is drained.
/// Unscripted commands succeed with empty output.
#[derive(Default)]
pub struct ScriptedGit {
    responses: Mutex<HashMap<String, VecDeque<CommandOutput>>>,
    calls: Mutex<Vec<String>>,
}

impl ScriptedGit {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `output` for the command `args` (space-joined).
    pub fn respond(self, args: &str, output: CommandOutput) -> Self {
        self.responses
            .lock()
            .unwrap()
            .entry(args.to_string())
            .or_default()
            .push_back(output);
        self
    }

    /// A repository with pending changes whose index differs from HEAD.
    pub fn dirty(status: &str) -> Self {
        Self::new()
            .respond("status --porcelain", CommandOutput::ok(status))
            .respond("diff --cached --quiet", CommandOutput::failed(""))
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, args: &str) -> usize {
        self.calls().iter().filter(|c| c.as_str() == args).count()
    }

    pub fn count_prefix(&self, prefix: &str) -> usize {
        self.calls().iter().filter(|c| c.starts_with(prefix)).count()
    }
}

#[async_trait]
impl GitExecutor for ScriptedGit {
    async fn run(&self, args: &[&str]) -> CommandOutput {
        let key = args.join(" ");
        self.calls.lock().unwrap().push(key.clone());

        let mut responses = self.responses.lock().unwrap();
        match responses.get_mut(&key) {
            Some(queue) if queue.len() > 1 => queue.pop_front().unwrap_or_default(),
            Some(queue) => queue.front().cloned().unwrap_or_default(),
            None => CommandOutput::ok(""),
        }
    }
}

/// Sleeper that returns immediately and records each requested duration.
///
/// Optionally fires a [`Notify`] once a given number of sleeps has happened,
/// which tests use as the watch loop's shutdown signal.
#[derive(Default)]
pub struct RecordingSleeper {
    slept: Mutex<Vec<Duration>>,
    stop_after: Option<(usize, Arc<Notify>)>,
}

impl RecordingSleeper {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stop_after(count: usize, notify: Arc<Notify>) -> Self {
        Self {
            slept: Mutex::new(Vec::new()),
            stop_after: Some((count, notify)),
        }
    }

    pub fn slept(&self) -> Vec<Duration> {
        self.slept.lock().unwrap().clone()
    }
}

#[async_trait]
impl Sleeper for RecordingSleeper {
    async fn sleep(&self, duration: Duration) {
        let count = {
            let mut slept = self.slept.lock().unwrap();
            slept.push(duration);
            slept.len()
        };

        if let Some((limit, notify)) = &self.stop_after
            && count == *limit
        {
            notify.notify_one();
        }
    }
}

/// A scratch git repository with a bare `origin` remote.
pub struct TestRepo {
    pub dir: tempfile::TempDir,
    pub remote_dir: tempfile::TempDir,
    pub repo: Repository,
}

impl TestRepo {
    /// Create a repository with identity config and an `origin` remote, no commits.
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp directory");
        let repo = Repository::init(dir.path()).expect("Failed to init git repo");

        let mut config = repo.config().expect("Failed to open repo config");
        config
            .set_str("user.name", "Test User")
            .expect("Failed to set user.name");
        config
            .set_str("user.email", "test@example.com")
            .expect("Failed to set user.email");
        config
            .set_bool("commit.gpgsign", false)
            .expect("Failed to disable signing");

        let remote_dir = tempfile::tempdir().expect("Failed to create remote dir");
        Repository::init_bare(remote_dir.path()).expect("Failed to init bare repo");
        repo.remote(
            "origin",
            remote_dir.path().to_str().expect("Invalid remote path"),
        )
        .expect("Failed to add origin remote");

        Self {
            dir,
            remote_dir,
            repo,
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write a file relative to the working tree.
    pub fn write(&self, name: &str, contents: &str) {
        let path = self.dir.path().join(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent dirs");
        }
        std::fs::write(path, contents).expect("Failed to write file");
    }

    /// Subject line of HEAD, read with the git CLI.
    pub fn head_subject(&self) -> Option<String> {
        let output = Command::new("git")
            .args(["log", "-1", "--format=%s"])
            .current_dir(self.dir.path())
            .output()
            .ok()?;
        output
            .status
            .success()
            .then(|| String::from_utf8_lossy(&output.stdout).trim().to_string())
    }

    /// Branch names present on the bare remote.
    pub fn remote_branches(&self) -> Vec<String> {
        let remote = Repository::open_bare(self.remote_dir.path()).expect("Failed to open remote");
        let branches = remote
            .branches(Some(git2::BranchType::Local))
            .expect("Failed to list remote branches");
        branches
            .filter_map(|b| b.ok())
            .filter_map(|(b, _)| b.name().ok().flatten().map(String::from))
            .collect()
    }
}
