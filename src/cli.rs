//! # Command-Line Interface Module
//!
//! Defines the Skymuse command line with Clap derive macros.
//!
//! ## Commands
//!
//! - `play`: pick a theme from time, moon and weather, then play it
//! - `select`: pick and explain a theme without playing anything
//! - `check`: validate the config and every theme directory
//! - `themes`: list theme directories
//! - `init-config`: write a config template
//! - `completion`: generate shell completions
//!
//! ## Examples
//!
//! ```bash
//! skymuse play
//! skymuse select --at "2026-11-03 14:00" --offline
//! SKYMUSE_WEATHER_KEY=... skymuse --city Győr play --dry-run
//! ```

use crate::config::Overrides;
use chrono::NaiveDateTime;
use clap::{Args as ClapArgs, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Shell types supported for completion generation
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug)]
#[allow(clippy::enum_variant_names)]
pub enum Shell {
    /// Bash shell
    Bash,
    /// Zsh shell
    Zsh,
    /// Fish shell
    Fish,
    /// PowerShell
    PowerShell,
    /// Elvish shell
    Elvish,
}

/// Main application arguments structure.
///
/// Global options override values from the config file and may also come
/// from the environment.
#[derive(Parser, Debug)]
#[command(name = "skymuse")]
#[command(about = "Skymuse: plays the playlist that fits the hour, the moon and the weather")]
#[command(version)]
pub struct Args {
    /// Path to the config file
    ///
    /// Defaults to `skymuse/config.toml` in the platform config directory.
    #[arg(long, global = true, env = "SKYMUSE_CONFIG", value_hint = clap::ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// City used for the weather and astronomy lookups
    #[arg(long, global = true, env = "SKYMUSE_CITY")]
    pub city: Option<String>,

    /// OpenWeather API key
    #[arg(long, global = true, env = "SKYMUSE_WEATHER_KEY", hide_env_values = true)]
    pub weather_key: Option<String>,

    /// ipgeolocation API key
    #[arg(long, global = true, env = "SKYMUSE_ASTRONOMY_KEY", hide_env_values = true)]
    pub astronomy_key: Option<String>,

    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl Args {
    pub fn overrides(&self) -> Overrides {
        Overrides {
            city: self.city.clone(),
            weather_key: self.weather_key.clone(),
            astronomy_key: self.astronomy_key.clone(),
        }
    }
}

/// Options shared by commands that pick a theme.
#[derive(ClapArgs, Debug, Clone, Default)]
pub struct SelectArgs {
    /// Pretend it is this local time instead of now
    ///
    /// Accepts `YYYY-MM-DD HH:MM[:SS]` or `YYYY-MM-DDTHH:MM[:SS]`.
    #[arg(long, value_parser = parse_local_time)]
    pub at: Option<NaiveDateTime>,

    /// Skip the weather and astronomy lookups
    ///
    /// Selection then uses only the time of day and the season. API keys
    /// are not required.
    #[arg(long)]
    pub offline: bool,
}

/// Enumeration of all available subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Pick a theme and play it
    ///
    /// Fetches the weather and moon phase, chooses a theme, and starts the
    /// player on the theme's directory. Blocks until the player exits.
    Play {
        #[command(flatten)]
        select: SelectArgs,

        /// Print the player command instead of running it
        #[arg(long)]
        dry_run: bool,
    },

    /// Pick a theme and explain why, without playing
    Select {
        #[command(flatten)]
        select: SelectArgs,
    },

    /// Validate the config and check every theme directory exists
    Check,

    /// List every theme with its directory
    Themes,

    /// Write a config file template
    ///
    /// Usage: skymuse init-config && $EDITOR ~/.config/skymuse/config.toml
    InitConfig {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },

    /// Generate shell completions
    ///
    /// Usage: skymuse completion bash > ~/.local/share/bash-completion/completions/skymuse
    Completion {
        /// Shell to generate completions for
        shell: Shell,
    },
}

/// Parse a local wall-clock time for `--at`.
pub fn parse_local_time(value: &str) -> Result<NaiveDateTime, String> {
    const FORMATS: [&str; 4] = [
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
    ];

    FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value.trim(), format).ok())
        .ok_or_else(|| format!("`{value}` is not a time like 2026-11-03 14:00"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_parse_local_time_formats() {
        for value in ["2026-11-03 14:00", "2026-11-03T14:00", "2026-11-03 14:00:00", "2026-11-03T14:00:00"] {
            let time = parse_local_time(value).unwrap();
            assert_eq!((time.month(), time.day(), time.hour()), (11, 3, 14));
        }
        assert!(parse_local_time("14:00").is_err());
    }

    #[test]
    fn test_play_flags() {
        let args = Args::try_parse_from([
            "skymuse", "--city", "Győr", "play", "--at", "2026-07-01 12:00", "--offline", "--dry-run",
        ])
        .unwrap();

        assert_eq!(args.overrides().city.as_deref(), Some("Győr"));
        match args.command {
            Command::Play { select, dry_run } => {
                assert!(dry_run);
                assert!(select.offline);
                assert_eq!(select.at.map(|t| t.hour()), Some(12));
            }
            other => panic!("parsed wrong command: {other:?}"),
        }
    }
}
