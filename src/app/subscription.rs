// SPDX-License-Identifier: MPL-2.0
//! Time-based subscriptions for the application.

use super::Message;
use iced::{time, Subscription};
use std::time::Duration;

/// Polls the camera for preview frames while a functional session exists.
///
/// No subscription runs on other screens or before permission is granted,
/// so the device is left idle.
pub fn create_preview_subscription(previewing: bool, interval_ms: u64) -> Subscription<Message> {
    if previewing {
        time::every(Duration::from_millis(interval_ms)).map(Message::PreviewTick)
    } else {
        Subscription::none()
    }
}
