// SPDX-License-Identifier: MPL-2.0
//! Decoded images ready to be rendered.

use crate::camera::CapturedFrame;
use crate::error::ImageResolutionError;
use iced::widget::image;
use image_rs::{DynamicImage, GenericImageView};

#[derive(Debug, Clone)]
pub struct ImageData {
    pub handle: image::Handle,
    pub width: u32,
    pub height: u32,
}

impl ImageData {
    /// Creates a new `ImageData` from RGBA pixels.
    #[must_use]
    pub fn from_rgba(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        let handle = image::Handle::from_rgba(width, height, pixels);
        Self {
            handle,
            width,
            height,
        }
    }

    /// Creates a new `ImageData` from an already decoded image.
    #[must_use]
    pub fn from_dynamic(img: &DynamicImage) -> Self {
        let (width, height) = img.dimensions();
        Self::from_rgba(width, height, img.to_rgba8().into_vec())
    }

    /// Wraps a preview frame as delivered by the camera.
    ///
    /// Preview frames are shown as-is; orientation is only corrected on
    /// the captured photo.
    #[must_use]
    pub fn from_frame(frame: CapturedFrame) -> Self {
        Self::from_rgba(frame.width, frame.height, frame.pixels)
    }

    /// Decodes encoded bytes (JPEG, PNG, ...).
    ///
    /// # Errors
    ///
    /// Returns [`ImageResolutionError::Decode`] if the bytes are not a
    /// supported image.
    pub fn decode(bytes: &[u8]) -> Result<Self, ImageResolutionError> {
        let img = image_rs::load_from_memory(bytes)
            .map_err(|e| ImageResolutionError::Decode(e.to_string()))?;
        Ok(Self::from_dynamic(&img))
    }
}
