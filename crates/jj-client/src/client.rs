//! Client facade over the jj command line.
//!
//! Each public operation is a linear pipeline: spawn one or more jj
//! subcommands in sequence, parse their text output, and assemble the typed
//! result. Nothing is cached between operations; the repository on disk is
//! the only source of truth.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::JjError;
use crate::exec::{self, CommandRunner, JjCommand};
use crate::parse;
use crate::types::{
    Branch, BranchTrackingStatus, DiffSummary, LogEntry, WorkspaceStatus, UNRESOLVED_COMMIT_ID,
};

/// Main interface for interacting with a Jujutsu repository.
pub struct JjClient {
    repo_path: PathBuf,
    cmd: Box<dyn CommandRunner>,
}

impl JjClient {
    /// Initialize a new jj repository at `path`, creating the directory
    /// tree if needed.
    ///
    /// With `git_repo` set, the repository is cloned first and jj is
    /// initialized colocated next to it. On failure the directory may be
    /// left partially created; there is no rollback.
    pub fn init(path: impl AsRef<Path>, git_repo: Option<&str>) -> Result<Self, JjError> {
        let path = path.as_ref();
        std::fs::create_dir_all(path)?;

        let cmd = JjCommand::new(path)?;
        let path_str = path.to_string_lossy();

        match git_repo {
            Some(url) => {
                debug!(url, path = %path.display(), "cloning and colocating");
                exec::git_clone(url, path)?;
                cmd.run(&["git", "init", "--git-repo", path_str.as_ref()])?;
            }
            None => {
                debug!(path = %path.display(), "initializing repository");
                cmd.run(&["git", "init", path_str.as_ref()])?;
            }
        }

        Self::open(path)
    }

    /// Bind a client to an existing repository at `path`.
    ///
    /// Validation is a plain `jj status` probe; any failure of the probe is
    /// collapsed into [`JjError::RepositoryNotFound`] since the only
    /// actionable response is "not a valid repository". A missing jj
    /// executable still surfaces as [`JjError::NotInstalled`].
    pub fn open(path: impl AsRef<Path>) -> Result<Self, JjError> {
        let repo_path = path.as_ref().to_path_buf();
        let cmd = JjCommand::new(&repo_path)?;

        let client = Self {
            repo_path: repo_path.clone(),
            cmd: Box::new(cmd),
        };

        if client.cmd.run(&["status"]).is_err() {
            return Err(JjError::repo_not_found(&repo_path));
        }

        Ok(client)
    }

    pub fn repo_path(&self) -> &Path {
        &self.repo_path
    }

    /// Get a fresh snapshot of the working copy.
    ///
    /// Issues three independent queries: the working-copy change ID, the
    /// bookmark pointing at `@` (tolerant of absence), and the raw status
    /// text.
    pub fn status(&self) -> Result<WorkspaceStatus, JjError> {
        let working_copy_change_id =
            self.cmd
                .run(&["log", "-r", "@", "--no-graph", "-T", "change_id"])?;

        // Bookmark listing fails on some repository configurations; that is
        // expected and means "no branch", not an error.
        let current_branch = match self.cmd.run_lines(&[
            "bookmark",
            "list",
            "-r",
            "@",
            "-T",
            "name ++ \"\\n\"",
        ]) {
            Ok(lines) => lines.into_iter().next(),
            Err(err) => {
                warn!(%err, "bookmark lookup failed, treating as no branch");
                None
            }
        };

        let status_output = self.cmd.run(&["status"])?;
        let file_changes = parse::parse_status_files(&status_output);
        let has_conflicts = status_output.to_lowercase().contains("conflict");
        let is_colocated = self.repo_path.join(".git").exists();

        Ok(WorkspaceStatus {
            working_copy_change_id,
            current_branch,
            has_conflicts,
            file_changes,
            is_colocated,
        })
    }

    /// Set the description (commit message) of a revision.
    /// `revision` defaults to the working copy.
    pub fn describe(&self, message: &str, revision: Option<&str>) -> Result<(), JjError> {
        let revision = revision.unwrap_or("@");
        self.cmd.run(&["describe", "-r", revision, "-m", message])?;
        Ok(())
    }

    /// Create a new working-copy change, optionally seeded from `revision`.
    /// Returns the change ID of the new working copy.
    pub fn new_change(&self, revision: Option<&str>) -> Result<String, JjError> {
        match revision {
            Some(rev) => self.cmd.run(&["new", rev])?,
            None => self.cmd.run(&["new"])?,
        };

        self.cmd
            .run(&["log", "-r", "@", "--no-graph", "-T", "change_id"])
    }

    /// Create a bookmark at `revision` (default: working copy) and return
    /// it with both target IDs resolved.
    pub fn bookmark_create(&self, name: &str, revision: Option<&str>) -> Result<Branch, JjError> {
        let revision = revision.unwrap_or("@");
        self.cmd.run(&["bookmark", "create", name, "-r", revision])?;

        let target_change_id = self.resolve_change_id(revision)?;
        let target_commit_id = self.resolve_commit_id(revision)?;

        Ok(Branch {
            name: name.to_string(),
            target_change_id,
            target_commit_id,
            tracking_status: BranchTrackingStatus::Untracked,
            remote_name: None,
        })
    }

    /// List all bookmarks.
    ///
    /// Per-bookmark ID resolution failures degrade to sentinel values (empty
    /// change ID, all-zero commit ID) instead of failing the listing.
    pub fn bookmark_list(&self) -> Result<Vec<Branch>, JjError> {
        let output = self.cmd.run(&["bookmark", "list"])?;
        let mut branches = Vec::new();

        for raw in output.lines() {
            let line = raw.trim();
            if line.is_empty() {
                continue;
            }

            // Expected shape: "name: <short ids and description>"
            let Some((name, _)) = line.split_once(':') else {
                continue;
            };
            let name = name.trim();

            let target_change_id = match self.resolve_change_id(name) {
                Ok(id) => id,
                Err(err) => {
                    warn!(bookmark = name, %err, "could not resolve change id");
                    String::new()
                }
            };
            let target_commit_id = match self.resolve_commit_id(name) {
                Ok(id) => id,
                Err(err) => {
                    warn!(bookmark = name, %err, "could not resolve commit id");
                    UNRESOLVED_COMMIT_ID.to_string()
                }
            };

            branches.push(Branch {
                name: name.to_string(),
                target_change_id,
                target_commit_id,
                tracking_status: BranchTrackingStatus::Untracked,
                remote_name: None,
            });
        }

        Ok(branches)
    }

    /// Delete a bookmark.
    pub fn bookmark_delete(&self, name: &str) -> Result<(), JjError> {
        self.cmd.run(&["bookmark", "delete", name])?;
        Ok(())
    }

    /// Move an existing bookmark to a different revision.
    pub fn bookmark_set(&self, name: &str, revision: &str) -> Result<(), JjError> {
        self.cmd.run(&["bookmark", "set", name, "-r", revision])?;
        Ok(())
    }

    /// Query the change log.
    ///
    /// A `None` (or `"@"`) revset means the entire history, not just the
    /// working copy. Five template queries fetch one field each; rows are
    /// zipped by position and the result truncated to `limit` entries when
    /// one is given.
    pub fn log(&self, revset: Option<&str>, limit: Option<usize>) -> Result<Vec<LogEntry>, JjError> {
        let revset = revset.unwrap_or("@");
        let revset_expr = if revset == "@" { "all()" } else { revset };
        debug!(revset = revset_expr, "querying log");

        let field = |template: &str| {
            self.cmd
                .run_lines(&["log", "-r", revset_expr, "--no-graph", "-T", template])
        };

        let fields = parse::LogFields {
            change_ids: field("change_id")?,
            commit_ids: field("commit_id")?,
            descriptions: field("description.first_line()")?,
            authors: field("author")?,
            timestamps: field("committer.timestamp()")?,
        };

        let mut entries: Vec<LogEntry> = parse::zip_log_fields(fields)
            .into_iter()
            .map(|change| LogEntry {
                change,
                branches: Vec::new(),
                is_working_copy: false,
            })
            .collect();

        if let Some(limit) = limit {
            entries.truncate(limit);
        }

        Ok(entries)
    }

    /// Summarize file-level differences between two revisions.
    /// `from` defaults to the working copy's parents, `to` to the working
    /// copy, matching `jj diff` itself.
    pub fn diff_summary(&self, from: Option<&str>, to: Option<&str>) -> Result<DiffSummary, JjError> {
        let mut args = vec!["diff", "--summary"];
        if let Some(from) = from {
            args.push("--from");
            args.push(from);
        }
        if let Some(to) = to {
            args.push("--to");
            args.push(to);
        }

        let output = self.cmd.run(&args)?;

        Ok(DiffSummary {
            from_revision: from.unwrap_or("@-").to_string(),
            to_revision: to.unwrap_or("@").to_string(),
            files_changed: parse::parse_status_files(&output),
        })
    }

    fn resolve_change_id(&self, revision: &str) -> Result<String, JjError> {
        self.cmd
            .run(&["log", "-r", revision, "--no-graph", "-T", "change_id"])
    }

    fn resolve_commit_id(&self, revision: &str) -> Result<String, JjError> {
        self.cmd
            .run(&["log", "-r", revision, "--no-graph", "-T", "commit_id"])
    }

    #[cfg(test)]
    fn with_runner(repo_path: impl Into<PathBuf>, runner: Box<dyn CommandRunner>) -> Self {
        Self {
            repo_path: repo_path.into(),
            cmd: runner,
        }
    }
}

impl std::fmt::Debug for JjClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JjClient")
            .field("repo_path", &self.repo_path)
            .finish()
    }
}
