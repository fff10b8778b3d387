// SPDX-License-Identifier: MPL-2.0
//! Camera access permission.
//!
//! The operating environment owns the real answer. The capture controller
//! only caches it and is re-seeded every time the capture screen is entered.

use serde::{Deserialize, Serialize};

/// Capability state for camera access.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PermissionStatus {
    /// The user has not been asked yet.
    #[default]
    NotDetermined,
    Granted,
    Denied,
}

impl PermissionStatus {
    #[must_use]
    pub fn is_granted(self) -> bool {
        self == PermissionStatus::Granted
    }

    /// Whether entering the capture screen should prompt the user.
    ///
    /// Mirrors a mobile OS: the prompt is shown whenever access is not
    /// granted, including after an earlier refusal.
    #[must_use]
    pub fn needs_request(self) -> bool {
        !self.is_granted()
    }

    /// Maps a yes/no answer from a permission prompt.
    #[must_use]
    pub fn from_answer(granted: bool) -> Self {
        if granted {
            PermissionStatus::Granted
        } else {
            PermissionStatus::Denied
        }
    }
}
