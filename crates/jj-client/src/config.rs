//! Default jj user configuration.
//!
//! jj refuses to record authored changes until `user.name` and `user.email`
//! are set, and its pager gets in the way of programmatic output capture.
//! This module can seed a commented starter config the first time a machine
//! uses the client.

use std::io::Write;
use std::path::PathBuf;

use crate::error::JjError;

/// The default jj config content written by [`ensure_user_config`]
pub fn default_user_config() -> &'static str {
    r#"# Jujutsu configuration
# For more information: https://docs.jj-vcs.dev/latest/config/

[user]
# name = "Your Name"
# email = "your.email@example.com"

[ui]
# Keep command output clean for programmatic capture
paginate = "never"
# Enable colored output in interactive use
color = "auto"
"#
}

/// Write the default config to the user's jj config directory.
///
/// Only creates the file if it does not exist; an existing config is never
/// touched. Returns the config file path.
pub fn ensure_user_config() -> Result<PathBuf, JjError> {
    let config_dir = dirs::config_dir()
        .ok_or_else(|| {
            JjError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "could not determine config directory",
            ))
        })?
        .join("jj");

    std::fs::create_dir_all(&config_dir)?;

    let config_path = config_dir.join("config.toml");
    if !config_path.exists() {
        let mut file = std::fs::File::create(&config_path)?;
        file.write_all(default_user_config().as_bytes())?;
    }

    Ok(config_path)
}
