// SPDX-License-Identifier: MPL-2.0
//! Remembered answers and choices that outlive a single run.
//!
//! Kept apart from `settings.toml`: nothing here is meant to be edited by
//! hand, so it is written as CBOR to `state.cbor` in the data directory
//! (`--data-dir`, then `GOWISATA_DATA_DIR`, then the platform default).
//! Failures never abort startup; they surface as i18n warning keys.

use super::paths;
use crate::camera::{CameraFacing, PermissionStatus};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

const STATE_FILE: &str = "state.cbor";

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AppState {
    /// Answer to the last camera permission prompt.
    #[serde(default)]
    pub camera_permission: PermissionStatus,

    /// Camera that was active when the capture screen was last closed.
    #[serde(default)]
    pub last_facing: Option<CameraFacing>,

    /// Folder the gallery dialog opens in.
    #[serde(default)]
    pub last_open_directory: Option<PathBuf>,
}

/// Why reading or writing the state file failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StateFileError {
    NoLocation,
    Parse,
    Read,
    CreateDir,
    Create,
    Encode,
}

impl StateFileError {
    fn i18n_key(self) -> &'static str {
        match self {
            StateFileError::NoLocation => "notification-state-path-error",
            StateFileError::Parse => "notification-state-parse-error",
            StateFileError::Read => "notification-state-read-error",
            StateFileError::CreateDir => "notification-state-dir-error",
            StateFileError::Create => "notification-state-create-error",
            StateFileError::Encode => "notification-state-write-error",
        }
    }
}

impl AppState {
    /// Loads the state from the resolved data directory.
    pub fn load() -> (Self, Option<String>) {
        Self::load_from(None)
    }

    /// Loads the state from `base_dir`, or the resolved data directory.
    ///
    /// A missing file is a first run and yields the defaults silently; an
    /// unreadable one yields the defaults plus a warning key.
    pub fn load_from(base_dir: Option<PathBuf>) -> (Self, Option<String>) {
        match state_file(base_dir) {
            Some(path) if path.exists() => match read_state(&path) {
                Ok(state) => (state, None),
                Err(err) => {
                    tracing::warn!(path = %path.display(), ?err, "discarding saved state");
                    (Self::default(), Some(err.i18n_key().to_string()))
                }
            },
            _ => (Self::default(), None),
        }
    }

    /// Writes the state, creating the data directory when needed.
    ///
    /// Returns the i18n key of a warning on failure.
    pub fn save_to(&self, base_dir: Option<PathBuf>) -> Option<String> {
        let result = state_file(base_dir)
            .ok_or(StateFileError::NoLocation)
            .and_then(|path| write_state(self, &path));
        result.err().map(|err| err.i18n_key().to_string())
    }

    /// Remembers the folder containing `file_path`; paths without a parent
    /// leave the previous value in place.
    pub fn set_last_open_directory_from_file(&mut self, file_path: &Path) {
        if let Some(parent) = file_path.parent() {
            self.last_open_directory = Some(parent.to_path_buf());
        }
    }
}

fn state_file(base_dir: Option<PathBuf>) -> Option<PathBuf> {
    paths::get_app_data_dir_with_override(base_dir).map(|dir| dir.join(STATE_FILE))
}

fn read_state(path: &Path) -> Result<AppState, StateFileError> {
    let file = fs::File::open(path).map_err(|_| StateFileError::Read)?;
    ciborium::from_reader(BufReader::new(file)).map_err(|_| StateFileError::Parse)
}

fn write_state(state: &AppState, path: &Path) -> Result<(), StateFileError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|_| StateFileError::CreateDir)?;
    }
    let file = fs::File::create(path).map_err(|_| StateFileError::Create)?;
    ciborium::into_writer(state, BufWriter::new(file)).map_err(|_| StateFileError::Encode)
}
