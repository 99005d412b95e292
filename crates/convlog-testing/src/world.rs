//! TestWorld pattern for declarative integration test setup.
//!
//! Provides:
//! - An isolated runtime state directory with agent session journals
//! - A separate output directory for the writer
//! - CLI execution with the environment pinned to those directories

use anyhow::Result;
use assert_cmd::Command;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Declarative test environment builder.
///
/// # Example
/// ```no_run
/// use convlog_testing::{JournalBuilder, TestWorld};
///
/// let world = TestWorld::new();
/// world
///     .write_journal("main", "s1", &JournalBuilder::new().user("hi").build())
///     .unwrap();
///
/// let result = world
///     .run(&["extract", "--agent", "main", "--session", "s1"])
///     .unwrap();
/// assert!(result.success());
/// ```
pub struct TestWorld {
    temp_dir: TempDir,
    state_dir: PathBuf,
    output_dir: PathBuf,
    env_vars: HashMap<String, String>,
}

impl Default for TestWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl TestWorld {
    /// Create a new isolated test environment.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let state_dir = temp_dir.path().join(".openclaw");
        let output_dir = temp_dir.path().join("conversations");

        std::fs::create_dir_all(&state_dir).expect("Failed to create state dir");

        Self {
            temp_dir,
            state_dir,
            output_dir,
            env_vars: HashMap::new(),
        }
    }

    /// The runtime state directory (.openclaw).
    pub fn state_dir(&self) -> &Path {
        &self.state_dir
    }

    /// Where extracted conversations are written.
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn temp_dir(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Set an environment variable for CLI execution.
    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env_vars.insert(key.into(), value.into());
        self
    }

    pub fn journal_path(&self, agent_id: &str, session_id: &str) -> PathBuf {
        self.state_dir
            .join("agents")
            .join(agent_id)
            .join("sessions")
            .join(format!("{}.jsonl", session_id))
    }

    /// Replace a session journal.
    pub fn write_journal(&self, agent_id: &str, session_id: &str, text: &str) -> Result<PathBuf> {
        let path = self.journal_path(agent_id, session_id);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&path, text)?;
        Ok(path)
    }

    /// Append to a session journal, the way the runtime grows it.
    pub fn append_journal(&self, agent_id: &str, session_id: &str, text: &str) -> Result<()> {
        use std::io::Write;

        let path = self.journal_path(agent_id, session_id);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let mut file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)?;
        file.write_all(text.as_bytes())?;
        Ok(())
    }

    /// `<output_dir>/<agent>/<session>.<extension>`
    pub fn output_file(&self, agent_id: &str, session_id: &str, extension: &str) -> PathBuf {
        self.output_dir
            .join(agent_id)
            .join(format!("{}.{}", session_id, extension))
    }

    /// Write `convlog.toml` into the state directory.
    pub fn write_config(&self, toml: &str) -> Result<()> {
        std::fs::write(self.state_dir.join("convlog.toml"), toml)?;
        Ok(())
    }

    /// Configure a CLI command with this test environment's settings.
    ///
    /// Directories are pinned through the environment so tests can still
    /// exercise the command-line flags that override them.
    pub fn configure_command<'a>(&self, cmd: &'a mut Command) -> &'a mut Command {
        cmd.env_remove("OPENCLAW_STATE_DIR")
            .env_remove("CONVLOG_OUTPUT_DIR")
            .env_remove("CONVLOG_MODE")
            .env_remove("CONVLOG_VERBOSE")
            .env_remove("RUST_LOG")
            .env("HOME", self.temp_dir.path())
            .env("OPENCLAW_STATE_DIR", &self.state_dir)
            .env("CONVLOG_OUTPUT_DIR", &self.output_dir);

        cmd.current_dir(self.temp_dir.path());

        for (key, value) in &self.env_vars {
            cmd.env(key, value);
        }

        cmd
    }

    /// Execute the convlog binary with `args`.
    ///
    /// Uses `Command::cargo_bin()`, which requires the binary to be built by
    /// the surrounding `cargo test` run.
    pub fn run(&self, args: &[&str]) -> Result<CliResult> {
        self.run_with_stdin(args, "")
    }

    /// Execute the convlog binary with `stdin` piped in.
    #[allow(deprecated)]
    pub fn run_with_stdin(&self, args: &[&str], stdin: &str) -> Result<CliResult> {
        let mut cmd = Command::cargo_bin("convlog")
            .map_err(|e| anyhow::anyhow!("Failed to find convlog binary: {}", e))?;

        self.configure_command(&mut cmd);
        cmd.args(args).write_stdin(stdin.as_bytes().to_vec());

        let output = cmd.output()?;

        Ok(CliResult {
            status: output.status,
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        })
    }
}

/// Result of a CLI command execution.
#[derive(Debug)]
pub struct CliResult {
    pub status: std::process::ExitStatus,
    pub stdout: String,
    pub stderr: String,
}

impl CliResult {
    /// Check if the command succeeded.
    pub fn success(&self) -> bool {
        self.status.success()
    }

    pub fn stdout(&self) -> &str {
        &self.stdout
    }

    pub fn stderr(&self) -> &str {
        &self.stderr
    }
}
