//! Picks a playlist from the hour, the moon and the weather, then plays it.
//!
//! Core modules:
//! - [`selector`] - Theme selection rules
//! - [`conditions`] - Weather and astronomy lookups
//! - [`player`] - External media player launch
//! - [`session`] - One decision, from lookups to a chosen theme
//!
//! ### Supporting Modules
//!
//! - [`theme`] - The closed set of theme labels
//! - [`config`] - Config file, overrides and theme directory validation
//! - [`error`] - Error types
//! - [`cli`] - Command-line interface definitions with clap integration
//! - [`completion`] - Shell completion generation
//!
//! ## Quick Start Example
//!
//! ```no_run
//! use skymuse::{config, player, session};
//! use anyhow::Result;
//!
//! # fn main() -> Result<()> {
//! let path = config::get_config_path()?;
//! let config = config::load(&path, config::Overrides::default(), true)?;
//!
//! let source = session::source_for(&config, false);
//! let decision = session::decide(source.as_deref(), chrono::Local::now().naive_local());
//! for line in decision.report_lines() {
//!     println!("{line}");
//! }
//!
//! player::launch(decision.selection.theme, &config.themes, &config.player)?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Selection Rules
//!
//! First match wins:
//!
//! 1. 06:00-07:59 is `morning`, 18:00-19:59 is `evening`
//! 2. a full moon is `full-moon`
//! 3. above 30°C is `heat-wave`, below 0°C is `cold-wave`, rain or storms
//!    are `rainy-day`
//! 4. otherwise the season of the current month
//!
//! Lookups that fail are treated as missing data and their rules are skipped.
//!
//! ## Error Handling
//!
//! Library functions return [`error::Result`]. Network and decode failures
//! are absorbed by the lookups; a missing theme directory, an incomplete
//! theme map or a player that cannot start are returned to the caller.

pub mod cli;
pub mod completion;
pub mod conditions;
pub mod config;
pub mod error;
pub mod player;
pub mod selector;
pub mod session;
pub mod theme;
