//! TOML-based settings persistence for the mosaic planner.
//!
//! Reads and writes [`PlannerConfig`] to the platform-appropriate file:
//! - Windows:  `%APPDATA%\MosaicPlanner\config.toml`
//! - Linux:    `~/.config/mosaicplanner/config.toml`
//! - macOS:    `~/Library/Application Support/MosaicPlanner/config.toml`
//!
//! Example file:
//!
//! ```toml
//! [general]
//! log_level = "info"
//!
//! [mosaic]
//! enabled = true
//! panels_x = 3
//! panels_y = 2
//! overlap_percent = 20.0
//! rotation_deg = 15.0
//!
//! [equipment]
//! selected = "APS-C @ 500mm"
//!
//! [[equipment.entries]]
//! kind = "sensor"
//! name = "APS-C @ 500mm"
//! telescope_focal_mm = 500.0
//! sensor_width_mm = 23.5
//! sensor_height_mm = 15.7
//! ```
//!
//! # Serde default values
//!
//! Every section and field has a default, so an empty or partial file (first
//! run, or a file written by an older version) still loads.  Mosaic values
//! are stored raw here and only normalized when applied through
//! [`MosaicConfig::apply_to`].

use std::path::{Path, PathBuf};

use mosaic_core::{MosaicSettings, MosaicState};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

use crate::application::equipment::{Equipment, EquipmentCatalog};

/// Error type for configuration file operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The platform config directory could not be determined.
    #[error("could not determine platform config directory")]
    NoPlatformConfigDir,

    /// A file system I/O error occurred.
    #[error("I/O error accessing config at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The TOML content could not be parsed.
    #[error("failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),

    /// The config could not be serialized to TOML.
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

// ── Config schema types ───────────────────────────────────────────────────────

/// Top-level settings file.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PlannerConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub mosaic: MosaicConfig,
    #[serde(default)]
    pub equipment: EquipmentConfig,
}

/// Settings that are not specific to the mosaic.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GeneralConfig {
    /// Schema version string – bump when breaking changes are introduced.
    #[serde(default = "default_version")]
    pub version: String,
    /// `tracing` log level: `"error"`, `"warn"`, `"info"`, `"debug"`, `"trace"`.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

/// Persisted mosaic parameters, as written (not yet normalized).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MosaicConfig {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default = "default_panels")]
    pub panels_x: i64,
    #[serde(default = "default_panels")]
    pub panels_y: i64,
    #[serde(default = "default_overlap_percent")]
    pub overlap_percent: f64,
    #[serde(default)]
    pub rotation_deg: f64,
}

/// Known equipment and the current selection.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct EquipmentConfig {
    /// Name of the selected entry; absent when nothing is selected.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected: Option<String>,
    #[serde(default)]
    pub entries: Vec<EquipmentEntry>,
}

/// One persisted piece of equipment, tagged by `kind`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EquipmentEntry {
    Eyepiece {
        name: String,
        telescope_focal_mm: f64,
        eyepiece_focal_mm: f64,
        apparent_fov_deg: f64,
    },
    Sensor {
        name: String,
        telescope_focal_mm: f64,
        sensor_width_mm: f64,
        sensor_height_mm: f64,
    },
    Fixed {
        name: String,
        width_deg: f64,
        height_deg: f64,
    },
}

// ── Default helpers ───────────────────────────────────────────────────────────

fn default_version() -> String {
    "1.0".to_string()
}
fn default_log_level() -> String {
    "info".to_string()
}
fn default_panels() -> i64 {
    MosaicSettings::default().panels_x() as i64
}
fn default_overlap_percent() -> f64 {
    MosaicSettings::default().overlap_percent()
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            version: default_version(),
            log_level: default_log_level(),
        }
    }
}

impl Default for MosaicConfig {
    fn default() -> Self {
        Self::from_settings(&MosaicSettings::default())
    }
}

// ── Conversions ───────────────────────────────────────────────────────────────

impl MosaicConfig {
    /// Captures already-normalized settings for saving.
    pub fn from_settings(settings: &MosaicSettings) -> Self {
        Self {
            enabled: settings.enabled(),
            panels_x: settings.panels_x() as i64,
            panels_y: settings.panels_y() as i64,
            overlap_percent: settings.overlap_percent(),
            rotation_deg: settings.rotation_deg(),
        }
    }

    /// Applies the persisted values through the validated setters.
    ///
    /// Returns `true` if the state changed.
    pub fn apply_to(&self, state: &mut MosaicState) -> bool {
        state.set_enabled(self.enabled)
            | state.set_panels_x(saturate_i32(self.panels_x))
            | state.set_panels_y(saturate_i32(self.panels_y))
            | state.set_overlap_percent(self.overlap_percent)
            | state.set_rotation_deg(self.rotation_deg)
    }
}

/// Narrows a persisted integer without wrapping; the setter clamps the rest.
fn saturate_i32(v: i64) -> i32 {
    v.clamp(i32::MIN as i64, i32::MAX as i64) as i32
}

impl EquipmentEntry {
    pub fn name(&self) -> &str {
        match self {
            EquipmentEntry::Eyepiece { name, .. }
            | EquipmentEntry::Sensor { name, .. }
            | EquipmentEntry::Fixed { name, .. } => name,
        }
    }

    pub fn to_equipment(&self) -> Equipment {
        match *self {
            EquipmentEntry::Eyepiece {
                telescope_focal_mm,
                eyepiece_focal_mm,
                apparent_fov_deg,
                ..
            } => Equipment::Eyepiece {
                telescope_focal_mm,
                eyepiece_focal_mm,
                apparent_fov_deg,
            },
            EquipmentEntry::Sensor {
                telescope_focal_mm,
                sensor_width_mm,
                sensor_height_mm,
                ..
            } => Equipment::Sensor {
                telescope_focal_mm,
                sensor_width_mm,
                sensor_height_mm,
            },
            EquipmentEntry::Fixed {
                width_deg,
                height_deg,
                ..
            } => Equipment::Fixed {
                width_deg,
                height_deg,
            },
        }
    }

    pub fn from_equipment(name: &str, equipment: &Equipment) -> Self {
        let name = name.to_string();
        match *equipment {
            Equipment::Eyepiece {
                telescope_focal_mm,
                eyepiece_focal_mm,
                apparent_fov_deg,
            } => EquipmentEntry::Eyepiece {
                name,
                telescope_focal_mm,
                eyepiece_focal_mm,
                apparent_fov_deg,
            },
            Equipment::Sensor {
                telescope_focal_mm,
                sensor_width_mm,
                sensor_height_mm,
            } => EquipmentEntry::Sensor {
                name,
                telescope_focal_mm,
                sensor_width_mm,
                sensor_height_mm,
            },
            Equipment::Fixed {
                width_deg,
                height_deg,
            } => EquipmentEntry::Fixed {
                name,
                width_deg,
                height_deg,
            },
        }
    }
}

impl EquipmentConfig {
    /// Builds the runtime catalog.
    ///
    /// A selection naming a missing entry is dropped with a warning so a
    /// stale file never prevents start-up.
    pub fn to_catalog(&self) -> EquipmentCatalog {
        let mut catalog = EquipmentCatalog::new();
        for entry in &self.entries {
            catalog.insert(entry.name(), entry.to_equipment());
        }
        if let Some(name) = &self.selected {
            if let Err(e) = catalog.select(name) {
                warn!("ignoring persisted equipment selection: {e}");
            }
        }
        catalog
    }

    pub fn from_catalog(catalog: &EquipmentCatalog) -> Self {
        Self {
            selected: catalog.selected().map(|e| e.name.clone()),
            entries: catalog
                .entries()
                .iter()
                .map(|e| EquipmentEntry::from_equipment(&e.name, &e.equipment))
                .collect(),
        }
    }
}

// ── Config repository ─────────────────────────────────────────────────────────

/// Determines the platform-appropriate directory for the config file.
///
/// # Errors
///
/// Returns [`ConfigError::NoPlatformConfigDir`] when the platform config base
/// directory cannot be determined from the environment.
pub fn config_dir() -> Result<PathBuf, ConfigError> {
    platform_config_dir().ok_or(ConfigError::NoPlatformConfigDir)
}

/// Resolves the full path to the default config file.
///
/// # Errors
///
/// Returns [`ConfigError::NoPlatformConfigDir`] if the base directory cannot be
/// determined.
pub fn config_file_path() -> Result<PathBuf, ConfigError> {
    Ok(config_dir()?.join("config.toml"))
}

/// Loads the config from the default location.
///
/// # Errors
///
/// See [`load_config_from`].
pub fn load_config() -> Result<PlannerConfig, ConfigError> {
    load_config_from(&config_file_path()?)
}

/// Loads `PlannerConfig` from `path`, returning `PlannerConfig::default()` if
/// the file does not yet exist.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] for file-system errors other than "not found",
/// and [`ConfigError::Parse`] if the TOML is malformed.
pub fn load_config_from(path: &Path) -> Result<PlannerConfig, ConfigError> {
    match std::fs::read_to_string(path) {
        Ok(content) => {
            let cfg: PlannerConfig = toml::from_str(&content)?;
            info!(path = %path.display(), "loaded planner settings");
            Ok(cfg)
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            info!(path = %path.display(), "no settings file yet, using defaults");
            Ok(PlannerConfig::default())
        }
        Err(e) => Err(ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        }),
    }
}

/// Persists `config` to the default location.
///
/// # Errors
///
/// See [`save_config_to`].
pub fn save_config(config: &PlannerConfig) -> Result<PathBuf, ConfigError> {
    let path = config_file_path()?;
    save_config_to(&path, config)?;
    Ok(path)
}

/// Persists `config` to `path`, creating parent directories as needed.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] for file-system failures or
/// [`ConfigError::Serialize`] if serialization fails.
pub fn save_config_to(path: &Path, config: &PlannerConfig) -> Result<(), ConfigError> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir).map_err(|source| ConfigError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
    }

    let content = toml::to_string_pretty(config)?;
    std::fs::write(path, content).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    info!(path = %path.display(), "saved planner settings");
    Ok(())
}

/// Resolves the platform config directory including the application subdirectory.
fn platform_config_dir() -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        std::env::var_os("APPDATA").map(|p| PathBuf::from(p).join("MosaicPlanner"))
    }

    #[cfg(target_os = "linux")]
    {
        // XDG_CONFIG_HOME or ~/.config
        let base = std::env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| std::env::var_os("HOME").map(|h| PathBuf::from(h).join(".config")))?;
        Some(base.join("mosaicplanner"))
    }

    #[cfg(target_os = "macos")]
    {
        std::env::var_os("HOME").map(|h| {
            PathBuf::from(h)
                .join("Library")
                .join("Application Support")
                .join("MosaicPlanner")
        })
    }

    #[cfg(not(any(target_os = "windows", target_os = "linux", target_os = "macos")))]
    {
        None
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
