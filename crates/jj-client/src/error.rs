use std::path::Path;
use thiserror::Error;

/// Errors that can occur during jj client operations
#[derive(Debug, Error)]
pub enum JjError {
    #[error("jj executable not found or not runnable. Please install Jujutsu:\n\n  • Homebrew (macOS/Linux): brew install jj\n  • Cargo: cargo install --locked jj-cli\n  • Binary downloads: https://github.com/martinvonz/jj/releases")]
    NotInstalled,

    #[error("command `{command}` failed with exit code {exit_code}\nstderr: {stderr}")]
    Command {
        /// The full command line as invoked
        command: String,
        exit_code: i32,
        stdout: String,
        stderr: String,
    },

    #[error("not a jj repository: {0}")]
    RepositoryNotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl JjError {
    /// Create a RepositoryNotFound error from a path
    pub fn repo_not_found(path: &Path) -> Self {
        Self::RepositoryNotFound(path.display().to_string())
    }

    /// Create a Command error for a process that exited non-zero
    pub fn command_failed(command: String, exit_code: i32, stdout: String, stderr: String) -> Self {
        Self::Command {
            command,
            exit_code,
            stdout,
            stderr,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_error_carries_context() {
        let err = JjError::command_failed(
            "jj status".to_string(),
            1,
            String::new(),
            "error message".to_string(),
        );
        let rendered = err.to_string();
        assert!(rendered.contains("jj status"));
        assert!(rendered.contains("exit code 1"));
        assert!(rendered.contains("error message"));
    }

    #[test]
    fn repository_not_found_names_the_path() {
        let err = JjError::repo_not_found(Path::new("/tmp/notrepo"));
        assert!(err.to_string().contains("/tmp/notrepo"));
    }
}
