//! Process invocation for the jj executable.
//!
//! One [`JjCommand`] is bound to one repository directory. Every call spawns
//! a fresh process, buffers its output fully, and maps a non-zero exit to
//! [`JjError::Command`]. Failures are never retried: a non-zero exit from jj
//! is caller-semantic ("no such revision"), not transient.

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use tracing::trace;

use crate::error::JjError;

/// Capability interface over the external tool.
///
/// The client facade depends on this trait rather than on [`JjCommand`]
/// directly, so tests can substitute a runner that returns canned text
/// without spawning processes.
pub trait CommandRunner: Send + Sync {
    /// Run a jj subcommand and return trimmed stdout on success.
    fn run(&self, args: &[&str]) -> Result<String, JjError>;

    /// Run a jj subcommand and split stdout into trimmed non-empty lines.
    fn run_lines(&self, args: &[&str]) -> Result<Vec<String>, JjError> {
        let output = self.run(args)?;
        Ok(output
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(String::from)
            .collect())
    }
}

/// Runs `jj` subcommands bound to one repository directory.
pub struct JjCommand {
    program: PathBuf,
    repo_path: PathBuf,
}

impl JjCommand {
    /// Bind a runner to `repo_path`.
    ///
    /// Resolves the executable on PATH and probes `jj --version` once here;
    /// later calls assume the binary stays in place.
    pub fn new(repo_path: impl Into<PathBuf>) -> Result<Self, JjError> {
        let program = which::which("jj").map_err(|_| JjError::NotInstalled)?;

        let probe = Command::new(&program)
            .arg("--version")
            .stdin(Stdio::null())
            .output()
            .map_err(|_| JjError::NotInstalled)?;
        if !probe.status.success() {
            return Err(JjError::NotInstalled);
        }

        Ok(Self {
            program,
            repo_path: repo_path.into(),
        })
    }

    pub fn repo_path(&self) -> &Path {
        &self.repo_path
    }
}

impl CommandRunner for JjCommand {
    fn run(&self, args: &[&str]) -> Result<String, JjError> {
        run_buffered(&self.program, "jj", &self.repo_path, args)
    }
}

/// Spawn `program` in `cwd`, buffer stdout/stderr, and return trimmed stdout.
///
/// `display_name` is what error messages call the program, independent of
/// the resolved path.
pub(crate) fn run_buffered(
    program: &Path,
    display_name: &str,
    cwd: &Path,
    args: &[&str],
) -> Result<String, JjError> {
    trace!(cwd = %cwd.display(), ?args, "running {display_name}");

    let output = Command::new(program)
        .current_dir(cwd)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()?;

    if !output.status.success() {
        return Err(JjError::command_failed(
            format!("{display_name} {}", args.join(" ")),
            output.status.code().unwrap_or(-1),
            String::from_utf8_lossy(&output.stdout).to_string(),
            String::from_utf8_lossy(&output.stderr).to_string(),
        ));
    }

    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
}

/// Clone a git repository with the system `git`, for the colocated
/// initialization path. Goes through the same spawn/buffer/error discipline
/// as jj invocations.
pub(crate) fn git_clone(url: &str, dest: &Path) -> Result<(), JjError> {
    let git = which::which("git").map_err(|err| {
        JjError::command_failed(
            format!("git clone {url}"),
            -1,
            String::new(),
            err.to_string(),
        )
    })?;

    let cwd = dest.parent().unwrap_or_else(|| Path::new("."));
    let dest_str = dest.to_string_lossy();
    run_buffered(&git, "git", cwd, &["clone", url, dest_str.as_ref()])?;
    Ok(())
}
