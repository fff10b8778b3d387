// SPDX-License-Identifier: MPL-2.0
//! Top-level messages and runtime flags for the application.

use crate::camera::{CaptureOutcome, PreviewFrame};
use crate::ui::{bottom_bar, camera_screen, home, result_screen};
use std::path::PathBuf;
use std::time::Instant;

/// Top-level messages consumed by `App::update`. The variants forward
/// lower-level component messages while keeping a single update entrypoint.
#[derive(Debug, Clone)]
pub enum Message {
    Home(home::Message),
    Camera(camera_screen::Message),
    Result(result_screen::Message),
    BottomBar(bottom_bar::Message),
    /// A capture future resolved.
    CaptureFinished(CaptureOutcome),
    /// Answer from the camera permission prompt.
    PermissionAnswered(bool),
    /// Result from the gallery file dialog.
    GalleryPicked(Option<PathBuf>),
    /// Periodic tick that pulls a new preview frame.
    PreviewTick(Instant),
    /// A preview read finished on the blocking pool.
    PreviewFrame(PreviewFrame),
}

/// Runtime flags passed in from the CLI or launcher to tweak startup behavior.
#[derive(Debug, Default)]
pub struct Flags {
    /// Optional locale override in BCP-47 form (e.g. `id`, `en-US`).
    pub lang: Option<String>,
    /// Optional image path (or URL) to open directly on the result screen.
    pub file_path: Option<String>,
    /// Optional data directory override (for state files and photos).
    /// Takes precedence over `GOWISATA_DATA_DIR` environment variable.
    pub data_dir: Option<String>,
    /// Optional config directory override (for settings.toml).
    /// Takes precedence over `GOWISATA_CONFIG_DIR` environment variable.
    pub config_dir: Option<String>,
}
