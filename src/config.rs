//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/pyrpath/pyrpath.toml`
//! 3. Local config: `<dir>/.pyrpath.toml` (working directory unless given)
//! 4. Environment variables: `PYRPATH_*` prefix, `__` between section and key

use std::path::{Path, PathBuf};
use std::time::Duration;

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::application::ApplicationError;
use crate::domain::Layout;

/// Pyramid construction and search settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SearchSettings {
    /// Reject rows whose length is not one more than the row above
    pub strict_rows: bool,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self { strict_rows: true }
    }
}

/// Trace playback cadence.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ReplaySettings {
    /// Pause before each node step
    pub step_delay_ms: u64,
    /// Pause before each GOOD/BAD marker
    pub marker_delay_ms: u64,
}

impl Default for ReplaySettings {
    fn default() -> Self {
        Self {
            step_delay_ms: 850,
            marker_delay_ms: 0,
        }
    }
}

impl ReplaySettings {
    pub fn step_delay(&self) -> Duration {
        Duration::from_millis(self.step_delay_ms)
    }

    pub fn marker_delay(&self) -> Duration {
        Duration::from_millis(self.marker_delay_ms)
    }
}

/// Node cell size used for edge geometry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LayoutSettings {
    pub cell_width: f64,
    pub cell_height: f64,
}

impl Default for LayoutSettings {
    fn default() -> Self {
        let layout = Layout::default();
        Self {
            cell_width: layout.cell_width,
            cell_height: layout.cell_height,
        }
    }
}

impl From<&LayoutSettings> for Layout {
    fn from(settings: &LayoutSettings) -> Self {
        Layout::new(settings.cell_width, settings.cell_height)
    }
}

/// Raw section values for intermediate parsing (`None` means "not specified").
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSearchSettings {
    pub strict_rows: Option<bool>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawReplaySettings {
    pub step_delay_ms: Option<u64>,
    pub marker_delay_ms: Option<u64>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawLayoutSettings {
    pub cell_width: Option<f64>,
    pub cell_height: Option<f64>,
}

/// Raw settings for layered merging.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub search: RawSearchSettings,
    pub replay: RawReplaySettings,
    pub layout: RawLayoutSettings,
}

/// Unified configuration for pyrpath.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Settings {
    pub search: SearchSettings,
    pub replay: ReplaySettings,
    pub layout: LayoutSettings,
}

/// Get the XDG config directory for pyrpath.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "pyrpath").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("pyrpath.toml"))
}

/// Get the path to the local config file in a directory.
pub fn local_config_path(dir: &Path) -> PathBuf {
    dir.join(".pyrpath.toml")
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

/// Read one env override; absent keys are `None`, unparsable values are errors.
fn env_value<T: DeserializeOwned>(
    config: &Config,
    key: &str,
) -> Result<Option<T>, ApplicationError> {
    match config.get::<T>(key) {
        Ok(val) => Ok(Some(val)),
        Err(ConfigError::NotFound(_)) => Ok(None),
        Err(e) => Err(config_err(e)),
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}

impl Settings {
    pub fn layout(&self) -> Layout {
        Layout::from(&self.layout)
    }

    /// Overlay wins wherever it specifies a value.
    pub fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            search: SearchSettings {
                strict_rows: overlay
                    .search
                    .strict_rows
                    .unwrap_or(self.search.strict_rows),
            },
            replay: ReplaySettings {
                step_delay_ms: overlay
                    .replay
                    .step_delay_ms
                    .unwrap_or(self.replay.step_delay_ms),
                marker_delay_ms: overlay
                    .replay
                    .marker_delay_ms
                    .unwrap_or(self.replay.marker_delay_ms),
            },
            layout: LayoutSettings {
                cell_width: overlay.layout.cell_width.unwrap_or(self.layout.cell_width),
                cell_height: overlay
                    .layout
                    .cell_height
                    .unwrap_or(self.layout.cell_height),
            },
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `local_dir` - Directory holding `.pyrpath.toml`; the working directory when `None`
    #[instrument(level = "debug")]
    pub fn load(local_dir: Option<&Path>) -> Result<Self, ApplicationError> {
        let mut current = Self::default();

        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                debug!(path = %global_path.display(), "applying global config");
                current = current.merge_with(&load_raw_settings(&global_path)?);
            }
        }

        let local_path = match local_dir {
            Some(dir) => local_config_path(dir),
            None => local_config_path(Path::new(".")),
        };
        if local_path.exists() {
            debug!(path = %local_path.display(), "applying local config");
            current = current.merge_with(&load_raw_settings(&local_path)?);
        }

        Self::apply_env_overrides(current)
    }

    /// Load defaults overlaid with a single required file, no env overrides.
    pub fn load_from(path: &Path) -> Result<Self, ApplicationError> {
        if !path.exists() {
            return Err(ApplicationError::Config {
                message: format!("config file not found: {}", path.display()),
            });
        }
        Ok(Self::default().merge_with(&load_raw_settings(path)?))
    }

    /// Apply PYRPATH_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, ApplicationError> {
        let config = Config::builder()
            .add_source(
                Environment::with_prefix("PYRPATH")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()
            .map_err(config_err)?;

        if let Some(val) = env_value(&config, "search.strict_rows")? {
            settings.search.strict_rows = val;
        }
        if let Some(val) = env_value(&config, "replay.step_delay_ms")? {
            settings.replay.step_delay_ms = val;
        }
        if let Some(val) = env_value(&config, "replay.marker_delay_ms")? {
            settings.replay.marker_delay_ms = val;
        }
        if let Some(val) = env_value(&config, "layout.cell_width")? {
            settings.layout.cell_width = val;
        }
        if let Some(val) = env_value(&config, "layout.cell_height")? {
            settings.layout.cell_height = val;
        }

        Ok(settings)
    }

    /// Render effective settings as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: e.to_string(),
        })
    }
}
