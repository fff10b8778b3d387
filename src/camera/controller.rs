// SPDX-License-Identifier: MPL-2.0
//! Capture controller for the camera screen.
//!
//! Owns the [`CaptureSession`] for as long as the camera screen is shown,
//! gates everything on the camera permission, and turns a capture request
//! into a future that resolves exactly once to a [`CaptureOutcome`].
//!
//! # Duplicate requests
//!
//! Only one capture may be in flight per session. A second request while
//! one is pending is rejected with [`CaptureError::Busy`]. Preview reads
//! follow the same rule: a tick that arrives while a read is pending is
//! skipped.
//!
//! # Stale outcomes
//!
//! There is no cancellation. If the screen is left while a capture or a
//! preview read runs, the result still arrives later but carries an old
//! [`SessionId`] and is dropped by [`CaptureController::complete`] or
//! [`CaptureController::accept_preview`].

use super::session::read_preview;
use super::{
    storage, CameraDevice, CameraFacing, CaptureSession, CapturedFrame, HardwareError,
    PermissionStatus, SessionId,
};
use crate::error::CaptureError;
use crate::media::ImageLocator;
use std::future::Future;
use std::path::PathBuf;
use std::sync::Arc;

/// Identifies one capture request within a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AttemptId(u64);

/// The single result of a capture attempt.
#[derive(Debug, Clone, PartialEq)]
pub struct CaptureOutcome {
    pub session: SessionId,
    pub attempt: AttemptId,
    pub result: Result<ImageLocator, CaptureError>,
}

/// A preview read, tagged with the session and camera it was taken for.
#[derive(Debug, Clone, PartialEq)]
pub struct PreviewFrame {
    pub session: SessionId,
    pub facing: CameraFacing,
    pub result: Result<CapturedFrame, HardwareError>,
}

#[derive(Debug)]
pub struct CaptureController {
    session: CaptureSession,
    permission: PermissionStatus,
    in_flight: Option<AttemptId>,
    preview_pending: bool,
    next_attempt: u64,
    pictures_dir: PathBuf,
    jpeg_quality: u8,
}

impl CaptureController {
    /// Opens a capture session. The preview starts once permission is granted.
    pub fn new(
        device: Arc<dyn CameraDevice>,
        facing: CameraFacing,
        permission: PermissionStatus,
        pictures_dir: PathBuf,
        jpeg_quality: u8,
    ) -> Self {
        let mut controller = Self {
            session: CaptureSession::new(device, facing),
            permission: PermissionStatus::NotDetermined,
            in_flight: None,
            preview_pending: false,
            next_attempt: 0,
            pictures_dir,
            jpeg_quality,
        };
        controller.set_permission(permission);
        controller
    }

    #[must_use]
    pub fn session_id(&self) -> SessionId {
        self.session.id()
    }

    #[must_use]
    pub fn facing(&self) -> CameraFacing {
        self.session.facing()
    }

    #[must_use]
    pub fn permission(&self) -> PermissionStatus {
        self.permission
    }

    /// Whether the screen can preview and capture.
    #[must_use]
    pub fn is_functional(&self) -> bool {
        self.permission.is_granted()
    }

    #[must_use]
    pub fn is_capturing(&self) -> bool {
        self.in_flight.is_some()
    }

    #[must_use]
    pub fn pictures_dir(&self) -> &PathBuf {
        &self.pictures_dir
    }

    /// Updates the cached permission. The preview is wanted only while
    /// access is granted.
    pub fn set_permission(&mut self, status: PermissionStatus) {
        self.permission = status;
        self.session.set_previewing(status.is_granted());
    }

    /// Toggles between front and back camera.
    pub fn switch_camera(&mut self) {
        self.session.switch_camera();
    }

    /// Starts reading the next preview frame on the blocking pool.
    ///
    /// Returns `None` when the session is not functional or a read is
    /// already pending. Feed the output to
    /// [`accept_preview`](Self::accept_preview).
    pub fn request_preview(
        &mut self,
    ) -> Option<impl Future<Output = PreviewFrame> + Send + 'static> {
        if !self.is_functional() || self.preview_pending {
            return None;
        }
        self.preview_pending = true;

        let session = self.session.id();
        let facing = self.session.facing();
        let device = Arc::clone(self.session.device());

        Some(async move {
            let result = tokio::task::spawn_blocking(move || read_preview(&*device, facing))
                .await
                .unwrap_or_else(|join_err| {
                    Err(HardwareError::new(format!(
                        "preview task failed: {}",
                        join_err
                    )))
                });

            PreviewFrame {
                session,
                facing,
                result,
            }
        })
    }

    /// Consumes a preview read started by [`request_preview`](Self::request_preview).
    ///
    /// Frames of another session or of the camera that was switched away
    /// from are dropped.
    pub fn accept_preview(&mut self, frame: PreviewFrame) -> Option<CapturedFrame> {
        if frame.session != self.session.id() {
            tracing::debug!(session = ?frame.session, "ignoring preview frame of a closed session");
            // the stale read may have restarted a stream nobody wants
            if !self.session.is_previewing() {
                self.session.device().stop_preview();
            }
            return None;
        }
        self.preview_pending = false;

        if frame.facing != self.session.facing() || !self.is_functional() {
            return None;
        }
        match frame.result {
            Ok(captured) => Some(captured),
            Err(err) => {
                tracing::debug!(%err, "no preview frame");
                None
            }
        }
    }

    /// Starts an asynchronous capture.
    ///
    /// The returned future runs the device capture and the save pipeline on
    /// the blocking pool and must be polled inside a Tokio runtime. Feed its
    /// output to [`complete`](Self::complete).
    ///
    /// # Errors
    ///
    /// - [`CaptureError::PermissionDenied`] if camera access is not granted
    /// - [`CaptureError::Busy`] if a capture is already in flight
    pub fn capture_photo(
        &mut self,
    ) -> Result<impl Future<Output = CaptureOutcome> + Send + 'static, CaptureError> {
        if !self.is_functional() {
            return Err(CaptureError::PermissionDenied);
        }
        if self.in_flight.is_some() {
            return Err(CaptureError::Busy);
        }

        let attempt = AttemptId(self.next_attempt);
        self.next_attempt += 1;
        self.in_flight = Some(attempt);

        let session = self.session.id();
        let facing = self.session.facing();
        let device = Arc::clone(self.session.device());
        let pictures_dir = self.pictures_dir.clone();
        let quality = self.jpeg_quality;

        tracing::debug!(?attempt, ?facing, "capture requested");

        Ok(async move {
            let result = tokio::task::spawn_blocking(move || {
                let frame = device.capture(facing)?;
                storage::process_capture(frame, &pictures_dir, quality)
            })
            .await
            .unwrap_or_else(|join_err| {
                Err(CaptureError::HardwareCapture(format!(
                    "capture task failed: {}",
                    join_err
                )))
            });

            CaptureOutcome {
                session,
                attempt,
                result,
            }
        })
    }

    /// Consumes the outcome of a capture started by this controller.
    ///
    /// Returns `None` for outcomes that belong to another session or to an
    /// attempt that is no longer pending. Errors are logged here.
    pub fn complete(
        &mut self,
        outcome: CaptureOutcome,
    ) -> Option<Result<ImageLocator, CaptureError>> {
        if outcome.session != self.session.id() || self.in_flight != Some(outcome.attempt) {
            tracing::debug!(attempt = ?outcome.attempt, "ignoring stale capture outcome");
            return None;
        }
        self.in_flight = None;

        match &outcome.result {
            Ok(locator) => tracing::info!(%locator, "capture succeeded"),
            Err(err) => tracing::error!(%err, "capture failed"),
        }
        Some(outcome.result)
    }
}
