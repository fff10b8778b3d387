// SPDX-License-Identifier: MPL-2.0
//! In-memory record of what happened during the session.
//!
//! Log lines go through `tracing`; the [`EventLog`] additionally keeps the
//! latest capture, permission and image-loading events in a bounded ring
//! buffer so the UI can show the last failure and tests can assert on it.

mod buffer;
mod events;

pub use buffer::CircularBuffer;
pub use events::{DiagnosticEvent, EventKind};

use crate::app::config::DEFAULT_EVENT_LOG_CAPACITY;

#[derive(Debug, Clone)]
pub struct EventLog {
    events: CircularBuffer<DiagnosticEvent>,
}

impl Default for EventLog {
    fn default() -> Self {
        Self::new(DEFAULT_EVENT_LOG_CAPACITY)
    }
}

impl EventLog {
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            events: CircularBuffer::new(capacity),
        }
    }

    pub fn record(&mut self, kind: EventKind) {
        self.events.push(DiagnosticEvent::now(kind));
    }

    /// Events in chronological order (oldest first).
    pub fn iter(&self) -> impl Iterator<Item = &DiagnosticEvent> {
        self.events.iter()
    }

    #[must_use]
    pub fn latest(&self) -> Option<&DiagnosticEvent> {
        self.events.last()
    }

    /// Most recent failure, if any.
    #[must_use]
    pub fn latest_error(&self) -> Option<&DiagnosticEvent> {
        self.events.iter().rev().find(|event| event.kind.is_error())
    }

    /// i18n key of the most recent settings or state storage warning.
    #[must_use]
    pub fn latest_warning(&self) -> Option<&str> {
        self.events.iter().rev().find_map(|event| match &event.kind {
            EventKind::StorageWarning { key } => Some(key.as_str()),
            _ => None,
        })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::PermissionStatus;
    use crate::error::CaptureError;

    #[test]
    fn latest_error_skips_non_errors() {
        let mut log = EventLog::new(10);
        log.record(EventKind::CaptureFailed {
            error: CaptureError::Persistence("disk full".into()),
        });
        log.record(EventKind::PermissionAnswered {
            status: PermissionStatus::Granted,
        });

        let latest = log.latest_error().expect("an error was recorded");
        assert!(matches!(latest.kind, EventKind::CaptureFailed { .. }));
        assert!(matches!(
            log.latest().unwrap().kind,
            EventKind::PermissionAnswered { .. }
        ));
    }

    #[test]
    fn latest_warning_returns_newest_storage_key() {
        let mut log = EventLog::new(10);
        assert!(log.latest_warning().is_none());

        log.record(EventKind::StorageWarning {
            key: "notification-config-load-error".into(),
        });
        log.record(EventKind::StorageWarning {
            key: "notification-state-write-error".into(),
        });
        log.record(EventKind::PermissionAnswered {
            status: PermissionStatus::Denied,
        });

        assert_eq!(log.latest_warning(), Some("notification-state-write-error"));
    }

    #[test]
    fn log_is_bounded() {
        let mut log = EventLog::new(2);
        for _ in 0..5 {
            log.record(EventKind::StorageWarning { key: "x".into() });
        }
        assert_eq!(log.len(), 2);
    }
}
