//! # Configuration Module
//!
//! Loads the Skymuse config file, applies command-line and environment
//! overrides, and validates the theme directory map before anything runs.
//!
//! ## Location
//!
//! The config file lives in the platform-standard config directory:
//! - Linux: `~/.config/skymuse/config.toml`
//! - macOS: `~/Library/Application Support/skymuse/config.toml`
//! - Windows: `%APPDATA%\skymuse\config.toml`
//!
//! `skymuse init-config` writes a commented template there.
//!
//! ## Theme Paths
//!
//! Theme directories may start with `~/` or be relative; relative paths are
//! resolved against the directory holding the config file.

use crate::error::{Error, Result};
use crate::player::PlayerConfig;
use crate::theme::ThemeLabel;
use anyhow::Context;
use path_absolutize::Absolutize;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_WEATHER_ENDPOINT: &str = "http://api.openweathermap.org/data/2.5/weather";
pub const DEFAULT_ASTRONOMY_ENDPOINT: &str = "https://api.ipgeolocation.io/astronomy";

/// Returns the platform-appropriate config file path.
///
/// Does not create anything; see [`write_template`].
///
/// # Errors
///
/// Fails if the system config directory cannot be determined.
pub fn get_config_path() -> anyhow::Result<PathBuf> {
    let config_dir = dirs::config_dir().ok_or_else(|| {
        anyhow::anyhow!(
            "Could not determine system config directory. Pass --config or set SKYMUSE_CONFIG."
        )
    })?;

    Ok(config_dir.join("skymuse").join("config.toml"))
}

/// The config file as written on disk. Everything is optional here;
/// [`ConfigFile::resolve`] decides what is actually required.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    pub city: Option<String>,
    #[serde(default)]
    pub weather: EndpointFile,
    #[serde(default)]
    pub astronomy: EndpointFile,
    #[serde(default)]
    pub player: PlayerConfig,
    #[serde(default)]
    pub themes: BTreeMap<String, PathBuf>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EndpointFile {
    pub api_key: Option<String>,
    pub endpoint: Option<String>,
}

/// Values from flags or environment that take precedence over the file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub city: Option<String>,
    pub weather_key: Option<String>,
    pub astronomy_key: Option<String>,
}

/// A resolved API endpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct EndpointConfig {
    pub endpoint: String,
    pub api_key: String,
}

/// Fully validated runtime configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub city: String,
    pub weather: EndpointConfig,
    pub astronomy: EndpointConfig,
    pub player: PlayerConfig,
    pub themes: ThemeDirectoryMap,
}

impl ConfigFile {
    /// Parse TOML text.
    pub fn parse(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| Error::Configuration(e.to_string()))
    }

    /// Apply `overrides` and validate.
    ///
    /// With `require_credentials` unset (offline runs) a missing city or API
    /// key is allowed and left empty.
    pub fn resolve(
        self,
        base_dir: &Path,
        overrides: Overrides,
        require_credentials: bool,
    ) -> Result<Config> {
        let city = required(overrides.city.or(self.city), "city", "--city / SKYMUSE_CITY", require_credentials)?;
        let weather = self.weather.resolve(
            overrides.weather_key,
            DEFAULT_WEATHER_ENDPOINT,
            "weather.api_key",
            "--weather-key / SKYMUSE_WEATHER_KEY",
            require_credentials,
        )?;
        let astronomy = self.astronomy.resolve(
            overrides.astronomy_key,
            DEFAULT_ASTRONOMY_ENDPOINT,
            "astronomy.api_key",
            "--astronomy-key / SKYMUSE_ASTRONOMY_KEY",
            require_credentials,
        )?;

        let mut resolved = BTreeMap::new();
        for (label, path) in self.themes {
            resolved.insert(label, resolve_path(&path, base_dir)?);
        }

        Ok(Config {
            city,
            weather,
            astronomy,
            player: self.player,
            themes: ThemeDirectoryMap::from_entries(resolved)?,
        })
    }
}

impl EndpointFile {
    fn resolve(
        self,
        key_override: Option<String>,
        default_endpoint: &str,
        key_name: &str,
        hint: &str,
        require_credentials: bool,
    ) -> Result<EndpointConfig> {
        Ok(EndpointConfig {
            endpoint: self.endpoint.unwrap_or_else(|| default_endpoint.to_string()),
            api_key: required(key_override.or(self.api_key), key_name, hint, require_credentials)?,
        })
    }
}

fn required(value: Option<String>, name: &str, hint: &str, enforce: bool) -> Result<String> {
    match value.filter(|v| !v.trim().is_empty()) {
        Some(v) => Ok(v),
        None if enforce => Err(Error::Configuration(format!(
            "`{name}` is not set; add it to the config file or use {hint}"
        ))),
        None => Ok(String::new()),
    }
}

/// Expand a leading `~/` and absolutize against `base_dir`.
fn resolve_path(path: &Path, base_dir: &Path) -> Result<PathBuf> {
    let expanded = match path.strip_prefix("~") {
        Ok(rest) => dirs::home_dir()
            .ok_or_else(|| Error::Configuration("cannot expand `~`: no home directory".into()))?
            .join(rest),
        Err(_) => path.to_path_buf(),
    };

    expanded
        .absolutize_from(base_dir)
        .map(|p| p.into_owned())
        .map_err(|e| Error::Configuration(format!("bad path {}: {e}", path.display())))
}

/// Directory for every theme. Complete by construction.
#[derive(Debug, Clone, PartialEq)]
pub struct ThemeDirectoryMap {
    directories: [PathBuf; ThemeLabel::COUNT],
}

impl ThemeDirectoryMap {
    /// Build from label-name keys, rejecting missing, unknown and repeated
    /// labels. Keys are matched ignoring case.
    ///
    /// All problems are reported in one error.
    pub fn from_entries(entries: BTreeMap<String, PathBuf>) -> Result<Self> {
        let mut slots: [Option<PathBuf>; ThemeLabel::COUNT] = Default::default();
        let mut unknown = Vec::new();
        let mut repeated = Vec::new();

        for (key, path) in entries {
            match key.parse::<ThemeLabel>() {
                Ok(theme) => match &mut slots[theme.index()] {
                    Some(_) => repeated.push(key),
                    slot => *slot = Some(path),
                },
                Err(_) => unknown.push(key),
            }
        }

        let missing: Vec<&str> = ThemeLabel::ALL
            .into_iter()
            .filter(|theme| slots[theme.index()].is_none())
            .map(ThemeLabel::as_str)
            .collect();

        let mut problems = Vec::new();
        if !missing.is_empty() {
            problems.push(format!("no directory for theme(s): {}", missing.join(", ")));
        }
        if !unknown.is_empty() {
            problems.push(format!("unknown theme(s): {}", unknown.join(", ")));
        }
        if !repeated.is_empty() {
            problems.push(format!("theme(s) given twice: {}", repeated.join(", ")));
        }
        if !problems.is_empty() {
            return Err(Error::Configuration(problems.join("; ")));
        }

        Ok(Self {
            directories: slots.map(Option::unwrap_or_default),
        })
    }

    pub fn get(&self, theme: ThemeLabel) -> &Path {
        &self.directories[theme.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = (ThemeLabel, &Path)> {
        ThemeLabel::ALL.into_iter().map(move |theme| (theme, self.get(theme)))
    }
}

/// Read, parse and validate the config file at `path`.
pub fn load(path: &Path, overrides: Overrides, require_credentials: bool) -> anyhow::Result<Config> {
    let text = fs::read_to_string(path).with_context(|| {
        format!(
            "Failed to read config file {}. Run `skymuse init-config` to create one.",
            path.display()
        )
    })?;

    let base_dir = path
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."));

    let config = ConfigFile::parse(&text)
        .and_then(|file| file.resolve(&base_dir, overrides, require_credentials))
        .with_context(|| format!("Config file {} is invalid", path.display()))?;

    Ok(config)
}

/// Commented starting point for a new config file.
pub fn template() -> String {
    let mut text = String::from(
        "# Skymuse configuration\n\
         city = \"Győr\"\n\
         \n\
         [weather]\n\
         # OpenWeather API key\n\
         api_key = \"\"\n",
    );
    text.push_str(&format!("# endpoint = \"{DEFAULT_WEATHER_ENDPOINT}\"\n\n"));
    text.push_str(
        "[astronomy]\n\
         # ipgeolocation API key\n\
         api_key = \"\"\n",
    );
    text.push_str(&format!("# endpoint = \"{DEFAULT_ASTRONOMY_ENDPOINT}\"\n\n"));

    let player = PlayerConfig::default();
    text.push_str("[player]\n");
    text.push_str(&format!("executable = {:?}\n", player.executable));
    text.push_str(&format!("args = {:?}\n\n", player.args));

    text.push_str("# One directory per theme. Relative paths resolve against this file.\n[themes]\n");
    for theme in ThemeLabel::ALL {
        text.push_str(&format!(
            "{} = \"~/Music/{} Sessions\"\n",
            theme.as_str(),
            theme.display_name()
        ));
    }
    text
}

/// Write [`template`] to `path`, creating parent directories.
///
/// Refuses to overwrite an existing file unless `force` is set.
pub fn write_template(path: &Path, force: bool) -> anyhow::Result<()> {
    if path.exists() && !force {
        anyhow::bail!(
            "Config file {} already exists. Use --force to overwrite it.",
            path.display()
        );
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).with_context(|| {
            format!(
                "Failed to create config directory at {}. Please check file permissions.",
                parent.display()
            )
        })?;
    }

    fs::write(path, template())
        .with_context(|| format!("Failed to write config file {}", path.display()))?;
    Ok(())
}
