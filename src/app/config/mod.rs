// SPDX-License-Identifier: MPL-2.0
//! Loading and saving user preferences to a `settings.toml` file.
//!
//! The file has three tables: `[general]` (language, theme), `[camera]`
//! (default camera, virtual sensor rotation, preview rate, JPEG quality) and
//! `[storage]` (where photos go). Every key is optional. The directory is
//! resolved by [`paths::get_app_config_dir`].
//!
//! # Examples
//!
//! ```no_run
//! use gowisata::app::config;
//!
//! let (config, warning) = config::load();
//! if let Some(key) = warning {
//!     eprintln!("settings.toml ignored: {key}");
//! }
//! let language = config.general.language.as_deref().unwrap_or("en-US");
//! ```

pub mod defaults;

pub use defaults::*;

use crate::app::paths;
use crate::camera::{CameraFacing, FrameRotation};
use crate::error::Result;
use crate::ui::theming::ThemeMode;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "settings.toml";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct GeneralConfig {
    /// UI language code (e.g., "en-US", "id").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,

    /// Light, dark, or follow the desktop.
    #[serde(default)]
    pub theme_mode: ThemeMode,
}

/// Camera and capture settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CameraConfig {
    /// Camera selected when the capture screen opens for the first time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_facing: Option<CameraFacing>,

    /// Rotation (degrees) the virtual camera attaches to every capture.
    #[serde(
        default = "default_sensor_rotation",
        skip_serializing_if = "Option::is_none"
    )]
    pub sensor_rotation: Option<i32>,

    /// Preview refresh interval in milliseconds.
    #[serde(
        default = "default_preview_interval_ms",
        skip_serializing_if = "Option::is_none"
    )]
    pub preview_interval_ms: Option<u64>,

    /// JPEG quality for captured photos (1-100).
    #[serde(
        default = "default_jpeg_quality",
        skip_serializing_if = "Option::is_none"
    )]
    pub jpeg_quality: Option<u8>,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            default_facing: Some(CameraFacing::default()),
            sensor_rotation: default_sensor_rotation(),
            preview_interval_ms: default_preview_interval_ms(),
            jpeg_quality: default_jpeg_quality(),
        }
    }
}

impl CameraConfig {
    /// JPEG quality clamped to the supported range.
    #[must_use]
    pub fn effective_jpeg_quality(&self) -> u8 {
        self.jpeg_quality
            .unwrap_or(DEFAULT_JPEG_QUALITY)
            .clamp(MIN_JPEG_QUALITY, MAX_JPEG_QUALITY)
    }

    /// Resets a `sensor_rotation` that is not a right angle to the default.
    ///
    /// Returns the i18n key of the warning to show when a value was dropped.
    pub fn discard_invalid_rotation(&mut self) -> Option<String> {
        let configured = self.sensor_rotation?;
        if FrameRotation::try_from(configured).is_ok() {
            return None;
        }
        tracing::warn!(sensor_rotation = configured, "sensor_rotation must be a multiple of 90");
        self.sensor_rotation = default_sensor_rotation();
        Some("notification-config-invalid-rotation".to_string())
    }

    /// Preview interval clamped to the supported range.
    #[must_use]
    pub fn effective_preview_interval_ms(&self) -> u64 {
        self.preview_interval_ms
            .unwrap_or(DEFAULT_PREVIEW_INTERVAL_MS)
            .clamp(MIN_PREVIEW_INTERVAL_MS, MAX_PREVIEW_INTERVAL_MS)
    }
}

/// Storage settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct StorageConfig {
    /// Directory for captured photos. Defaults to `<data dir>/Pictures`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pictures_dir: Option<PathBuf>,
}

/// Contents of `settings.toml`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,

    #[serde(default)]
    pub camera: CameraConfig,

    #[serde(default)]
    pub storage: StorageConfig,
}

fn default_sensor_rotation() -> Option<i32> {
    Some(DEFAULT_SENSOR_ROTATION)
}

fn default_preview_interval_ms() -> Option<u64> {
    Some(DEFAULT_PREVIEW_INTERVAL_MS)
}

fn default_jpeg_quality() -> Option<u8> {
    Some(DEFAULT_JPEG_QUALITY)
}

fn config_file(base_dir: Option<PathBuf>) -> Option<PathBuf> {
    paths::get_app_config_dir_with_override(base_dir).map(|dir| dir.join(CONFIG_FILE))
}

/// Reads `settings.toml` from the resolved config directory.
///
/// Never fails: a broken file yields the defaults together with the i18n key
/// of a warning to show the user.
pub fn load() -> (Config, Option<String>) {
    load_with_override(None)
}

/// [`load`] with an explicit config directory.
pub fn load_with_override(base_dir: Option<PathBuf>) -> (Config, Option<String>) {
    let Some(path) = config_file(base_dir).filter(|path| path.exists()) else {
        return (Config::default(), None);
    };

    load_from_path(&path).map_or_else(
        |err| {
            tracing::warn!(path = %path.display(), %err, "falling back to default config");
            (
                Config::default(),
                Some("notification-config-load-error".to_string()),
            )
        },
        |mut config| {
            let warning = config.camera.discard_invalid_rotation();
            (config, warning)
        },
    )
}

/// Parses the file at `path`.
///
/// # Errors
///
/// [`crate::error::Error::Io`] when the file cannot be read,
/// [`crate::error::Error::Config`] when it is
/// not valid TOML for [`Config`].
pub fn load_from_path(path: &Path) -> Result<Config> {
    let raw = fs::read_to_string(path)?;
    Ok(toml::from_str(&raw)?)
}

/// Serializes `config` as pretty TOML at `path`, creating parent folders.
///
/// # Errors
///
/// Fails on serialization or I/O errors.
pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    let serialized = toml::to_string_pretty(config)?;
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }
    fs::write(path, serialized)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use tempfile::tempdir;

    #[test]
    fn save_and_load_round_trip_preserves_settings() {
        let config = Config {
            general: GeneralConfig {
                language: Some("id".to_string()),
                theme_mode: ThemeMode::Light,
            },
            camera: CameraConfig {
                default_facing: Some(CameraFacing::Front),
                sensor_rotation: Some(270),
                preview_interval_ms: Some(250),
                jpeg_quality: Some(90),
            },
            storage: StorageConfig {
                pictures_dir: Some(PathBuf::from("/srv/captures")),
            },
        };
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join(CONFIG_FILE);

        save_to_path(&config, &path).expect("save should succeed");
        let loaded = load_from_path(&path).expect("load should succeed");

        assert_eq!(loaded, config);
    }

    #[test]
    fn missing_sections_fall_back_to_defaults() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, "[general]\nlanguage = \"en-US\"\n").expect("write config");

        let loaded = load_from_path(&path).expect("load should succeed");

        assert_eq!(loaded.general.language.as_deref(), Some("en-US"));
        assert_eq!(loaded.camera.jpeg_quality, Some(DEFAULT_JPEG_QUALITY));
        assert_eq!(loaded.camera.sensor_rotation, Some(DEFAULT_SENSOR_ROTATION));
        assert!(loaded.storage.pictures_dir.is_none());
    }

    #[test]
    fn facing_is_written_in_kebab_case() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join(CONFIG_FILE);
        let mut config = Config::default();
        config.camera.default_facing = Some(CameraFacing::Front);

        save_to_path(&config, &path).expect("save should succeed");
        let content = fs::read_to_string(&path).expect("read config");

        assert!(content.contains("default_facing = \"front\""));
    }

    #[test]
    fn invalid_toml_returns_config_error() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, "this is = not [valid").expect("write config");

        let result = load_from_path(&path);
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn load_with_override_reports_warning_for_broken_file() {
        let dir = tempdir().expect("temp dir");
        fs::write(dir.path().join(CONFIG_FILE), "[camera\n").expect("write config");

        let (config, warning) = load_with_override(Some(dir.path().to_path_buf()));

        assert_eq!(config, Config::default());
        assert_eq!(warning.as_deref(), Some("notification-config-load-error"));
    }

    #[test]
    fn skewed_sensor_rotation_is_reset_with_warning() {
        let dir = tempdir().expect("temp dir");
        fs::write(
            dir.path().join(CONFIG_FILE),
            "[camera]\nsensor_rotation = 45\njpeg_quality = 80\n",
        )
        .expect("write config");

        let (config, warning) = load_with_override(Some(dir.path().to_path_buf()));

        assert_eq!(warning.as_deref(), Some("notification-config-invalid-rotation"));
        assert_eq!(config.camera.sensor_rotation, Some(DEFAULT_SENSOR_ROTATION));
        assert_eq!(config.camera.jpeg_quality, Some(80));
    }

    #[test]
    fn right_angle_sensor_rotations_are_kept() {
        for degrees in [0, 90, 180, 270, -90] {
            let mut camera = CameraConfig {
                sensor_rotation: Some(degrees),
                ..CameraConfig::default()
            };
            assert_eq!(camera.discard_invalid_rotation(), None);
            assert_eq!(camera.sensor_rotation, Some(degrees));
        }
    }

    #[test]
    fn load_with_override_without_file_is_silent() {
        let dir = tempdir().expect("temp dir");
        let (config, warning) = load_with_override(Some(dir.path().to_path_buf()));
        assert_eq!(config, Config::default());
        assert!(warning.is_none());
    }

    #[test]
    fn out_of_range_values_are_clamped() {
        let camera = CameraConfig {
            jpeg_quality: Some(0),
            preview_interval_ms: Some(1),
            ..CameraConfig::default()
        };
        assert_eq!(camera.effective_jpeg_quality(), MIN_JPEG_QUALITY);
        assert_eq!(camera.effective_preview_interval_ms(), MIN_PREVIEW_INTERVAL_MS);
    }
}
