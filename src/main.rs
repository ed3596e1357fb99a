//! # Skymuse
//!
//! Plays the music that fits the moment. Each run looks at the clock, the
//! moon phase and the weather, picks one of ten themes and starts a media
//! player on that theme's directory.
//!
//! ## Usage
//!
//! ```bash
//! # Create and edit the config
//! skymuse init-config
//!
//! # Check that every theme directory exists
//! skymuse check
//!
//! # Pick and play
//! skymuse play
//!
//! # See what would be picked at another time, without network access
//! skymuse select --at "2026-12-24 21:00" --offline
//! ```

use anyhow::Result;
use clap::{CommandFactory, Parser};
use log::{debug, info};
use skymuse::cli::{self, SelectArgs};
use skymuse::config::{self, Config, Overrides};
use skymuse::session::{self, Decision};
use skymuse::{completion, player};
use std::path::PathBuf;

fn config_path(explicit: Option<PathBuf>) -> Result<PathBuf> {
    match explicit {
        Some(path) => Ok(path),
        None => config::get_config_path(),
    }
}

fn load_config(explicit: Option<PathBuf>, overrides: Overrides, require_credentials: bool) -> Result<Config> {
    let path = config_path(explicit)?;
    debug!("Loading config from {}", path.display());
    config::load(&path, overrides, require_credentials)
}

/// Gather conditions, select a theme, and print how it was chosen.
fn decide(config: &Config, select: &SelectArgs) -> Decision {
    let now = select
        .at
        .unwrap_or_else(|| chrono::Local::now().naive_local());
    let source = session::source_for(config, select.offline);
    let decision = session::decide(source.as_deref(), now);

    println!();
    for line in decision.report_lines() {
        println!("{line}");
    }
    decision
}

/// Main entry point for Skymuse.
///
/// # Logging
///
/// Initializes environment logger which can be controlled via `RUST_LOG`:
/// - `RUST_LOG=debug skymuse play` - Enable debug logging
/// - `RUST_LOG=skymuse::conditions=debug skymuse select` - Module-specific logging
fn main() -> Result<()> {
    env_logger::init();

    let args = cli::Args::parse();
    let overrides = args.overrides();

    match args.command {
        cli::Command::Play { select, dry_run } => {
            let config = load_config(args.config, overrides, !select.offline)?;
            let decision = decide(&config, &select);
            let theme = decision.selection.theme;

            if dry_run {
                let directory = player::resolve_directory(theme, &config.themes)?;
                println!("\n▶ Would play - {}", theme.display_name());
                println!("{}", config.player.command_line(directory));
            } else {
                let status = player::launch(theme, &config.themes, &config.player)?;
                info!("Player finished with {status}");
            }
        }
        cli::Command::Select { select } => {
            let config = load_config(args.config, overrides, !select.offline)?;
            let decision = decide(&config, &select);
            let directory = config.themes.get(decision.selection.theme);
            println!(
                "\nTheme: {} (by {})\nDirectory: {}",
                decision.selection.theme,
                decision.selection.rule,
                directory.display()
            );
        }
        cli::Command::Check => {
            let config = load_config(args.config, overrides, true)?;
            let mut missing = 0;
            for (theme, directory) in config.themes.iter() {
                let mark = match directory.exists() {
                    true => "ok",
                    false => {
                        missing += 1;
                        "MISSING"
                    }
                };
                println!("{mark:>7}  {:<10} {}", theme.as_str(), directory.display());
            }
            if missing > 0 {
                anyhow::bail!(
                    "{missing} of {} theme directories are missing",
                    skymuse::theme::ThemeLabel::COUNT
                );
            }
            println!("\nConfiguration for {} is complete.", config.city);
        }
        cli::Command::Themes => {
            let config = load_config(args.config, overrides, false)?;
            for (theme, directory) in config.themes.iter() {
                println!("{:<10} {}", theme.as_str(), directory.display());
            }
        }
        cli::Command::InitConfig { force } => {
            let path = config_path(args.config)?;
            config::write_template(&path, force)?;
            println!("Wrote config template to {}", path.display());
        }
        cli::Command::Completion { shell } => {
            let mut cmd = cli::Args::command();
            completion::generate_completions(completion::shell_to_completion_shell(&shell), &mut cmd);
        }
    }

    Ok(())
}
