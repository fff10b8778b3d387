// SPDX-License-Identifier: MPL-2.0
//! Camera capture: device seam, live session, permission gating and the
//! capture-to-file pipeline.
//!
//! The hardware itself sits behind [`CameraDevice`]. Everything above it
//! (session lifetime, switching cameras, single in-flight capture,
//! orientation correction, JPEG persistence) lives in this module.

pub mod controller;
pub mod permission;
pub mod rotation;
pub mod session;
pub mod storage;
pub mod virtual_device;

pub use controller::{AttemptId, CaptureController, CaptureOutcome, PreviewFrame};
pub use permission::PermissionStatus;
pub use rotation::FrameRotation;
pub use session::{CaptureSession, SessionId};
pub use virtual_device::VirtualCamera;

use crate::error::CaptureError;
use image_rs::RgbaImage;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which physical camera is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CameraFacing {
    Front,
    #[default]
    Back,
}

impl CameraFacing {
    /// Returns the other camera.
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            CameraFacing::Front => CameraFacing::Back,
            CameraFacing::Back => CameraFacing::Front,
        }
    }
}

/// Error reported by a camera device.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HardwareError(String);

impl HardwareError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }

    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for HardwareError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<HardwareError> for CaptureError {
    fn from(err: HardwareError) -> Self {
        CaptureError::HardwareCapture(err.0)
    }
}

/// A raw frame as delivered by the device.
///
/// `rotation_degrees` is the clockwise rotation the frame needs to be shown
/// upright, as reported by the device for this particular capture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedFrame {
    pub width: u32,
    pub height: u32,
    /// Tightly packed RGBA8 pixels, row-major.
    pub pixels: Vec<u8>,
    pub rotation_degrees: i32,
}

impl CapturedFrame {
    /// Converts the raw buffer into an image.
    ///
    /// # Errors
    ///
    /// Fails when the buffer length does not match `width * height * 4`.
    pub fn into_image(self) -> Result<RgbaImage, HardwareError> {
        let (width, height) = (self.width, self.height);
        let len = self.pixels.len();
        RgbaImage::from_raw(width, height, self.pixels).ok_or_else(|| {
            HardwareError::new(format!(
                "frame buffer of {} bytes does not match {}x{}",
                len, width, height
            ))
        })
    }
}

/// Seam to the camera hardware.
///
/// `start_preview`, `preview_frame` and `capture` may block and are only
/// called from the blocking pool. `stop_preview` is called on the UI thread
/// and must return without waiting for the stream to wind down.
pub trait CameraDevice: Send + Sync + fmt::Debug {
    /// Starts (or restarts) the preview stream on the given camera.
    fn start_preview(&self, facing: CameraFacing) -> Result<(), HardwareError>;

    /// Signals the preview stream to stop. Stopping an idle device is a no-op.
    fn stop_preview(&self);

    /// Returns the latest preview frame of the given camera.
    fn preview_frame(&self, facing: CameraFacing) -> Result<CapturedFrame, HardwareError>;

    /// Captures a full-resolution still on the given camera.
    fn capture(&self, facing: CameraFacing) -> Result<CapturedFrame, HardwareError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggled_is_an_involution() {
        assert_eq!(CameraFacing::Back.toggled(), CameraFacing::Front);
        assert_eq!(CameraFacing::Front.toggled().toggled(), CameraFacing::Front);
    }

    #[test]
    fn default_facing_is_back() {
        assert_eq!(CameraFacing::default(), CameraFacing::Back);
    }

    #[test]
    fn into_image_rejects_short_buffer() {
        let frame = CapturedFrame {
            width: 4,
            height: 4,
            pixels: vec![0; 10],
            rotation_degrees: 0,
        };
        let err = frame.into_image().unwrap_err();
        assert!(err.message().contains("4x4"));
    }

    #[test]
    fn hardware_error_maps_to_capture_error() {
        let err: CaptureError = HardwareError::new("sensor timeout").into();
        assert_eq!(err, CaptureError::HardwareCapture("sensor timeout".into()));
    }
}
