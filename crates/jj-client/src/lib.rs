//! Typed client for the Jujutsu (jj) command-line tool.
//!
//! This crate wraps the `jj` executable and parses its text output into a
//! stable, typed data model: workspace status, log entries, bookmarks, and
//! file changes.
//!
//! # Design Goals
//!
//! - **Thin integration layer**: version-control semantics live entirely in
//!   jj; this crate only sequences subcommands and parses their output
//! - **Tolerant parsing**: jj interleaves prose with data lines; parsers
//!   skip what they do not recognize instead of erroring
//! - **No caching**: every query goes to the repository on disk
//! - **Testable seams**: the process invoker sits behind [`CommandRunner`]
//!   so facade logic can be exercised with canned output
//!
//! # Example
//!
//! ```no_run
//! use jj_client::JjClient;
//!
//! # fn main() -> Result<(), jj_client::JjError> {
//! let client = JjClient::init("/tmp/my-repo", None)?;
//! client.describe("Initial change", None)?;
//!
//! let status = client.status()?;
//! println!("working copy: {}", status.working_copy_change_id);
//!
//! for entry in client.log(None, Some(10))? {
//!     println!("{}", entry.change);
//! }
//! # Ok(())
//! # }
//! ```

mod client;
mod config;
mod error;
mod exec;
mod parse;
mod types;

pub use client::JjClient;
pub use config::{default_user_config, ensure_user_config};
pub use error::JjError;
pub use exec::{CommandRunner, JjCommand};
pub use types::{
    Branch, BranchTrackingStatus, Change, ChangeState, DiffSummary, FileChange, FileStatus,
    LogEntry, WorkspaceStatus, UNRESOLVED_COMMIT_ID,
};
