// SPDX-License-Identifier: MPL-2.0
//! The live camera session owned by the capture screen.

use super::{CameraDevice, CameraFacing, CapturedFrame, HardwareError};
use std::sync::Arc;

/// Identifies one capture-screen lifetime.
///
/// Outcomes of captures started in an earlier session are recognised by
/// their id and dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionId(u64);

impl SessionId {
    /// Creates a new unique session ID.
    pub fn new() -> Self {
        use std::sync::atomic::{AtomicU64, Ordering};
        static COUNTER: AtomicU64 = AtomicU64::new(0);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

/// A stateful handle to the camera while the capture screen is active.
///
/// Exactly one camera is active at any time. The session only records
/// whether a preview is wanted; the stream itself is (re)started lazily by
/// [`read_preview`] on the blocking pool. The preview is stopped when the
/// session is dropped.
#[derive(Debug)]
pub struct CaptureSession {
    id: SessionId,
    device: Arc<dyn CameraDevice>,
    facing: CameraFacing,
    previewing: bool,
}

impl CaptureSession {
    /// Opens a session on `facing`. The preview is not started yet.
    pub fn new(device: Arc<dyn CameraDevice>, facing: CameraFacing) -> Self {
        Self {
            id: SessionId::new(),
            device,
            facing,
            previewing: false,
        }
    }

    #[must_use]
    pub fn id(&self) -> SessionId {
        self.id
    }

    #[must_use]
    pub fn facing(&self) -> CameraFacing {
        self.facing
    }

    #[must_use]
    pub fn device(&self) -> &Arc<dyn CameraDevice> {
        &self.device
    }

    /// Whether preview frames should be requested for this session.
    #[must_use]
    pub fn is_previewing(&self) -> bool {
        self.previewing
    }

    /// Turns the preview on or off. Turning it off stops the stream.
    pub fn set_previewing(&mut self, previewing: bool) {
        if self.previewing && !previewing {
            self.device.stop_preview();
        }
        self.previewing = previewing;
    }

    /// Toggles between front and back camera.
    ///
    /// The selection always flips. A running stream is stopped; the next
    /// preview read restarts it on the new camera.
    pub fn switch_camera(&mut self) {
        self.facing = self.facing.toggled();
        tracing::debug!(facing = ?self.facing, "switching camera");

        if self.previewing {
            self.device.stop_preview();
        }
    }
}

impl Drop for CaptureSession {
    fn drop(&mut self) {
        if self.previewing {
            self.device.stop_preview();
        }
    }
}

/// Reads a preview frame of `facing`, starting the stream when it is not
/// running on that camera.
///
/// Blocks on the device; call it from the blocking pool.
pub fn read_preview(
    device: &dyn CameraDevice,
    facing: CameraFacing,
) -> Result<CapturedFrame, HardwareError> {
    device.preview_frame(facing).or_else(|_| {
        device.start_preview(facing)?;
        device.preview_frame(facing)
    })
}
