// SPDX-License-Identifier: MPL-2.0
//! Discrete events recorded along the capture → result flow.

use crate::camera::PermissionStatus;
use crate::error::{CaptureError, ImageResolutionError};
use crate::media::ImageLocator;
use chrono::{DateTime, Utc};

/// What happened.
#[derive(Debug, Clone, PartialEq)]
pub enum EventKind {
    /// A photo was written and navigation to the result screen followed.
    CaptureSaved { locator: ImageLocator },
    /// A capture attempt ended without a photo.
    CaptureFailed { error: CaptureError },
    /// The permission prompt was answered.
    PermissionAnswered { status: PermissionStatus },
    /// The result screen could not load its image.
    ImageUnavailable {
        locator: ImageLocator,
        error: ImageResolutionError,
    },
    /// Settings or persisted state could not be read or written.
    StorageWarning { key: String },
}

impl EventKind {
    /// Whether this event represents a failure.
    #[must_use]
    pub fn is_error(&self) -> bool {
        matches!(
            self,
            EventKind::CaptureFailed { .. } | EventKind::ImageUnavailable { .. }
        )
    }
}

/// A timestamped [`EventKind`].
#[derive(Debug, Clone, PartialEq)]
pub struct DiagnosticEvent {
    pub at: DateTime<Utc>,
    pub kind: EventKind,
}

impl DiagnosticEvent {
    #[must_use]
    pub fn now(kind: EventKind) -> Self {
        Self {
            at: Utc::now(),
            kind,
        }
    }
}
