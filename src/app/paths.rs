// SPDX-License-Identifier: MPL-2.0
//! Centralized path management for application directories.
//!
//! Every directory is resolved in the same priority order:
//! 1. the argument of a `_with_override()` function
//! 2. `--data-dir` / `--config-dir`, recorded by [`init_cli_overrides`]
//! 3. `GOWISATA_DATA_DIR` / `GOWISATA_CONFIG_DIR`
//! 4. the platform directory from `dirs`, plus [`APP_NAME`]
//!
//! Captured photos live in a `Pictures` folder below the data directory. It is
//! private to the application, in the same way a mobile app keeps its
//! captures in its own scoped picture storage.

use std::path::PathBuf;
use std::sync::OnceLock;

/// Application name used for directory naming.
pub const APP_NAME: &str = "GoWisata";

/// Sub-directory of the data directory holding captured photos.
const PICTURES_DIR: &str = "Pictures";

/// Environment variable to override the data directory.
pub const ENV_DATA_DIR: &str = "GOWISATA_DATA_DIR";

/// Environment variable to override the config directory.
pub const ENV_CONFIG_DIR: &str = "GOWISATA_CONFIG_DIR";

static CLI_DATA_DIR: OnceLock<Option<PathBuf>> = OnceLock::new();
static CLI_CONFIG_DIR: OnceLock<Option<PathBuf>> = OnceLock::new();

/// Records the `--data-dir` / `--config-dir` CLI values.
///
/// Only the first call has an effect; later calls are ignored with a warning.
pub fn init_cli_overrides(data_dir: Option<String>, config_dir: Option<String>) {
    if CLI_DATA_DIR.set(data_dir.map(PathBuf::from)).is_err()
        || CLI_CONFIG_DIR.set(config_dir.map(PathBuf::from)).is_err()
    {
        tracing::warn!("CLI directory overrides were already initialized");
    }
}

/// Walks the resolution order for one kind of directory.
fn resolve_dir(
    override_path: Option<PathBuf>,
    cli: &OnceLock<Option<PathBuf>>,
    env_var: &str,
    platform_base: Option<PathBuf>,
) -> Option<PathBuf> {
    override_path
        .or_else(|| cli.get().cloned().flatten())
        .or_else(|| env_dir(env_var))
        .or_else(|| platform_base.map(|base| base.join(APP_NAME)))
}

fn env_dir(var: &str) -> Option<PathBuf> {
    std::env::var_os(var)
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
}

/// Data directory: `state.cbor` and, by default, the `Pictures` folder.
///
/// Platform defaults are `~/.local/share/GoWisata` on Linux,
/// `~/Library/Application Support/GoWisata` on macOS and
/// `%APPDATA%\GoWisata` on Windows.
pub fn get_app_data_dir() -> Option<PathBuf> {
    get_app_data_dir_with_override(None)
}

pub fn get_app_data_dir_with_override(override_path: Option<PathBuf>) -> Option<PathBuf> {
    resolve_dir(override_path, &CLI_DATA_DIR, ENV_DATA_DIR, dirs::data_dir())
}

/// Config directory holding `settings.toml`.
pub fn get_app_config_dir() -> Option<PathBuf> {
    get_app_config_dir_with_override(None)
}

pub fn get_app_config_dir_with_override(override_path: Option<PathBuf>) -> Option<PathBuf> {
    resolve_dir(override_path, &CLI_CONFIG_DIR, ENV_CONFIG_DIR, dirs::config_dir())
}

/// Returns the directory captured photos are written to.
///
/// `configured` is the `[storage] pictures_dir` setting; when absent the
/// directory is `<data dir>/Pictures`. The directory is not created here,
/// the capture pipeline creates it on first write.
pub fn get_pictures_dir(configured: Option<PathBuf>) -> Option<PathBuf> {
    get_pictures_dir_with_override(configured, None)
}

/// Like [`get_pictures_dir`], with an explicit data directory override.
pub fn get_pictures_dir_with_override(
    configured: Option<PathBuf>,
    data_dir_override: Option<PathBuf>,
) -> Option<PathBuf> {
    configured.or_else(|| {
        get_app_data_dir_with_override(data_dir_override).map(|dir| dir.join(PICTURES_DIR))
    })
}
