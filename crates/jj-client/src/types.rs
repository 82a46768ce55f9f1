use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Placeholder commit hash used when a bookmark's target cannot be resolved.
/// Matches the width of a git SHA-1 so it is recognizable as "no real commit".
pub const UNRESOLVED_COMMIT_ID: &str = "0000000000000000000000000000000000000000";

/// Single-letter file status codes as printed by `jj status` and
/// `jj diff --summary`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileStatus {
    Added,
    Modified,
    Deleted,
    Renamed,
    Copied,
    /// Sentinel for anything that is not a recognized status code. Lines
    /// mapping to this are treated as prose and skipped, never surfaced
    /// as a real [`FileChange`].
    Unknown,
}

impl FileStatus {
    /// Parse a status code from jj output. Case-insensitive, surrounding
    /// whitespace ignored; anything unrecognized (including the empty
    /// string) maps to [`FileStatus::Unknown`].
    pub fn from_code(code: &str) -> Self {
        match code.trim().to_ascii_uppercase().as_str() {
            "A" => Self::Added,
            "M" => Self::Modified,
            "D" => Self::Deleted,
            "R" => Self::Renamed,
            "C" => Self::Copied,
            _ => Self::Unknown,
        }
    }

    /// The single-letter code jj prints for this status.
    pub fn code(&self) -> char {
        match self {
            Self::Added => 'A',
            Self::Modified => 'M',
            Self::Deleted => 'D',
            Self::Renamed => 'R',
            Self::Copied => 'C',
            Self::Unknown => '?',
        }
    }
}

/// Lifecycle state of a change. Informational only; nothing in this layer
/// enforces transitions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeState {
    WorkingCopy,
    Immutable,
    #[default]
    Mutable,
    Abandoned,
}

/// Tracking relationship between a local bookmark and its remote counterpart
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BranchTrackingStatus {
    Ahead,
    Behind,
    Diverged,
    UpToDate,
    #[default]
    Untracked,
}

/// One file's status within a change or the working copy.
///
/// `old_path` is populated when jj reports the entry with a `=>` arrow
/// (renames, and copies in diff summaries), and absent otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileChange {
    pub path: String,
    pub status: FileStatus,
    pub old_path: Option<String>,
}

impl std::fmt::Display for FileChange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.old_path {
            Some(old) => write!(f, "{} {} -> {}", self.status.code(), old, self.path),
            None => write!(f, "{} {}", self.status.code(), self.path),
        }
    }
}

/// A jj change: the stable unit of work, identified independently of the
/// commit hash it currently resolves to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Change {
    /// Stable change ID (persists across rewrites)
    pub change_id: String,
    /// Git-compatible commit hash (changes on rewrite)
    pub commit_id: String,
    /// Commit message
    pub description: String,
    /// Author in display form, `Name <email>`
    pub author: String,
    pub timestamp: DateTime<Utc>,
    pub parent_ids: Vec<String>,
    pub state: ChangeState,
}

impl std::fmt::Display for Change {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let first_line = self.description.lines().next().unwrap_or("");
        let truncated: String = first_line.chars().take(50).collect();
        write!(f, "{} {}", short_id(&self.change_id), truncated)
    }
}

/// A named, movable pointer to a change (jj calls these bookmarks)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Branch {
    pub name: String,
    /// Change ID this branch points to; empty when resolution failed
    pub target_change_id: String,
    /// Commit hash this branch points to; [`UNRESOLVED_COMMIT_ID`] when
    /// resolution failed
    pub target_commit_id: String,
    pub tracking_status: BranchTrackingStatus,
    pub remote_name: Option<String>,
}

impl std::fmt::Display for Branch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}", self.name, short_id(&self.target_change_id))
    }
}

/// Snapshot of the working copy, built fresh on every status query
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkspaceStatus {
    pub working_copy_change_id: String,
    /// Local bookmark pointing at the working copy, if any
    pub current_branch: Option<String>,
    pub has_conflicts: bool,
    pub file_changes: Vec<FileChange>,
    /// Whether a git repository is colocated next to the jj store
    pub is_colocated: bool,
}

impl std::fmt::Display for WorkspaceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", short_id(&self.working_copy_change_id))?;
        if let Some(branch) = &self.current_branch {
            write!(f, " on {branch}")?;
        }
        if !self.file_changes.is_empty() {
            write!(f, " ({} files changed)", self.file_changes.len())?;
        }
        Ok(())
    }
}

/// Single entry from a log query. Ephemeral: built per query, never cached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    pub change: Change,
    /// Bookmarks pointing to this change
    pub branches: Vec<String>,
    pub is_working_copy: bool,
}

impl std::fmt::Display for LogEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.change)?;
        if !self.branches.is_empty() {
            write!(f, " ({})", self.branches.join(", "))?;
        }
        if self.is_working_copy {
            write!(f, " @")?;
        }
        Ok(())
    }
}

/// Summary of file-level differences between two revisions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffSummary {
    pub from_revision: String,
    pub to_revision: String,
    pub files_changed: Vec<FileChange>,
}

impl std::fmt::Display for DiffSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} files changed", self.files_changed.len())
    }
}

fn short_id(id: &str) -> &str {
    &id[..id.len().min(12)]
}
