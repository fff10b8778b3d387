// SPDX-License-Identifier: MPL-2.0
//! Orientation correction for captured frames.
//!
//! Devices attach the clockwise rotation a frame needs to appear upright.
//! The value is applied exactly: right angles only, anything else is
//! rejected instead of being rounded to a guess.

use super::HardwareError;
use image_rs::DynamicImage;

/// Clockwise rotation in right-angle steps (0°, 90°, 180° or 270°).
///
/// # Example
///
/// ```
/// use gowisata::camera::FrameRotation;
///
/// let rotation = FrameRotation::try_from(-90).unwrap();
/// assert_eq!(rotation.degrees(), 270);
/// assert!(FrameRotation::try_from(45).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct FrameRotation(u16);

impl FrameRotation {
    /// No rotation (0°).
    pub const ZERO: Self = Self(0);

    /// Returns the angle in degrees, in `0..360`.
    #[must_use]
    pub fn degrees(self) -> u16 {
        self.0
    }

    /// Rotates the image clockwise by this angle.
    #[must_use]
    pub fn apply(self, image: DynamicImage) -> DynamicImage {
        match self.0 {
            90 => image.rotate90(),
            180 => image.rotate180(),
            270 => image.rotate270(),
            _ => image,
        }
    }
}

impl TryFrom<i32> for FrameRotation {
    type Error = HardwareError;

    fn try_from(degrees: i32) -> Result<Self, Self::Error> {
        if degrees % 90 != 0 {
            return Err(HardwareError::new(format!(
                "unsupported frame rotation of {}°",
                degrees
            )));
        }
        // rem_euclid keeps the result in 0..360 for negative inputs too
        let normalized = degrees.rem_euclid(360) as u16;
        Ok(Self(normalized))
    }
}
