//! # Player Launcher
//!
//! Hands the chosen theme directory to an external media player. The default
//! player is VLC, started minimized with looping and shuffle enabled, but any
//! executable that accepts a directory as its last argument works.
//!
//! Launching blocks until the player exits: a Skymuse run lasts as long as
//! the listening session.

use crate::config::ThemeDirectoryMap;
use crate::error::{Error, Result};
use crate::theme::ThemeLabel;
use log::{info, warn};
use serde::Deserialize;
use std::path::Path;
use std::process::{Command, ExitStatus};

#[cfg(windows)]
const DEFAULT_EXECUTABLE: &str = r"C:\Program Files\VideoLAN\VLC\vlc.exe";
#[cfg(not(windows))]
const DEFAULT_EXECUTABLE: &str = "vlc";

/// Which player to run and the flags it gets before the directory.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PlayerConfig {
    pub executable: String,
    pub args: Vec<String>,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            executable: DEFAULT_EXECUTABLE.to_string(),
            args: vec![
                "--qt-start-minimized".to_string(),
                "--loop".to_string(),
                "--random".to_string(),
            ],
        }
    }
}

impl PlayerConfig {
    /// Build the player invocation for `directory` without running it.
    pub fn command(&self, directory: &Path) -> Command {
        let mut command = Command::new(&self.executable);
        command.args(&self.args).arg(directory);
        command
    }

    /// Shell-like rendering of the invocation, for `--dry-run`.
    pub fn command_line(&self, directory: &Path) -> String {
        std::iter::once(self.executable.clone())
            .chain(self.args.iter().cloned())
            .chain(std::iter::once(directory.display().to_string()))
            .map(|part| match part.contains(' ') {
                true => format!("\"{part}\""),
                false => part,
            })
            .collect::<Vec<String>>()
            .join(" ")
    }
}

/// Resolve the directory for `theme`, failing if it is not on disk.
pub fn resolve_directory(theme: ThemeLabel, directories: &ThemeDirectoryMap) -> Result<&Path> {
    let directory = directories.get(theme);
    match directory.exists() {
        true => Ok(directory),
        false => Err(Error::DirectoryNotFound {
            theme,
            path: directory.to_path_buf(),
        }),
    }
}

/// Play `theme` and wait for the player to exit.
///
/// # Errors
///
/// - [`Error::DirectoryNotFound`] if the theme's directory is missing
/// - [`Error::Launch`] if the player executable cannot be started
///
/// A player that exits non-zero is logged, not treated as an error.
pub fn launch(
    theme: ThemeLabel,
    directories: &ThemeDirectoryMap,
    player: &PlayerConfig,
) -> Result<ExitStatus> {
    let directory = resolve_directory(theme, directories)?;

    println!("\n▶ Playing - {}", theme.display_name());
    info!("Launching {} for {theme}", player.command_line(directory));

    let status = player
        .command(directory)
        .status()
        .map_err(|source| Error::Launch {
            executable: player.executable.clone(),
            source,
        })?;

    if !status.success() {
        warn!("Player exited with {status}");
    }
    Ok(status)
}
