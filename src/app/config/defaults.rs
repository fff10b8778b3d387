// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! # Categories
//!
//! - **Capture**: JPEG encoding and virtual sensor orientation
//! - **Preview**: Live preview polling interval
//! - **Diagnostics**: Event log capacity

// ==========================================================================
// Capture Defaults
// ==========================================================================

/// JPEG quality used for captured photos (maximum).
pub const DEFAULT_JPEG_QUALITY: u8 = 100;

/// Lowest JPEG quality accepted from the config file.
pub const MIN_JPEG_QUALITY: u8 = 1;

/// Highest JPEG quality accepted from the config file.
pub const MAX_JPEG_QUALITY: u8 = 100;

/// Rotation reported by the built-in virtual camera for each capture.
///
/// Phone sensors are typically mounted in landscape, so portrait captures
/// come with a 90° rotation attached.
pub const DEFAULT_SENSOR_ROTATION: i32 = 90;

// ==========================================================================
// Preview Defaults
// ==========================================================================

/// Interval between two preview frame refreshes (in milliseconds).
pub const DEFAULT_PREVIEW_INTERVAL_MS: u64 = 100;

/// Minimum preview interval (in milliseconds).
pub const MIN_PREVIEW_INTERVAL_MS: u64 = 16;

/// Maximum preview interval (in milliseconds).
pub const MAX_PREVIEW_INTERVAL_MS: u64 = 2_000;

// ==========================================================================
// Diagnostics Defaults
// ==========================================================================

/// Number of capture/permission/resolution events kept in memory.
pub const DEFAULT_EVENT_LOG_CAPACITY: usize = 200;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn jpeg_quality_default_is_within_bounds() {
        assert!(DEFAULT_JPEG_QUALITY >= MIN_JPEG_QUALITY);
        assert!(DEFAULT_JPEG_QUALITY <= MAX_JPEG_QUALITY);
    }

    #[test]
    fn preview_interval_default_is_within_bounds() {
        assert!(DEFAULT_PREVIEW_INTERVAL_MS >= MIN_PREVIEW_INTERVAL_MS);
        assert!(DEFAULT_PREVIEW_INTERVAL_MS <= MAX_PREVIEW_INTERVAL_MS);
    }

    #[test]
    fn sensor_rotation_default_is_a_right_angle() {
        assert_eq!(DEFAULT_SENSOR_ROTATION % 90, 0);
    }
}
