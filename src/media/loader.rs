// SPDX-License-Identifier: MPL-2.0
//! Resolving image locators into decoded images.
//!
//! Local `file://` locators are read and decoded on the blocking pool;
//! `http(s)://` locators are fetched with `reqwest` first. Must be awaited
//! inside a Tokio runtime.

use super::{ImageData, ImageLocator};
use crate::error::ImageResolutionError;
use std::fs;
use std::io;
use std::path::Path;

/// Loads the image behind `locator`.
///
/// # Errors
///
/// See [`ImageResolutionError`] for the possible failure categories.
pub async fn resolve(locator: ImageLocator) -> Result<ImageData, ImageResolutionError> {
    match locator.scheme() {
        "file" => {
            let path = locator.to_file_path().ok_or_else(|| {
                ImageResolutionError::NotFound(locator.as_str().to_string())
            })?;
            tokio::task::spawn_blocking(move || load_file(&path))
                .await
                .map_err(|e| ImageResolutionError::Io(format!("load task failed: {}", e)))?
        }
        "http" | "https" => fetch_remote(&locator).await,
        other => Err(ImageResolutionError::UnsupportedScheme(other.to_string())),
    }
}

/// Reads and decodes a local image file.
///
/// # Errors
///
/// [`ImageResolutionError::NotFound`] for missing files,
/// [`ImageResolutionError::Io`] for other read failures and
/// [`ImageResolutionError::Decode`] for unreadable image data.
pub fn load_file(path: &Path) -> Result<ImageData, ImageResolutionError> {
    let bytes = fs::read(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => ImageResolutionError::NotFound(path.display().to_string()),
        _ => ImageResolutionError::Io(format!("{}: {}", path.display(), e)),
    })?;
    ImageData::decode(&bytes)
}

async fn fetch_remote(locator: &ImageLocator) -> Result<ImageData, ImageResolutionError> {
    let network = |e: reqwest::Error| ImageResolutionError::Network(e.to_string());

    let response = reqwest::get(locator.as_url().clone())
        .await
        .map_err(network)?
        .error_for_status()
        .map_err(network)?;
    let bytes = response.bytes().await.map_err(network)?;

    tokio::task::spawn_blocking(move || ImageData::decode(&bytes))
        .await
        .map_err(|e| ImageResolutionError::Io(format!("decode task failed: {}", e)))?
}

#[cfg(test)]
mod tests {
    use super::*;
    use image_rs::{Rgba, RgbaImage};
    use tempfile::tempdir;

    #[tokio::test]
    async fn resolve_reads_local_file() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("turtle.png");
        RgbaImage::from_pixel(5, 3, Rgba([0, 128, 0, 255]))
            .save(&path)
            .expect("write png");

        let data = resolve(ImageLocator::from_path(&path).unwrap())
            .await
            .expect("file resolves");

        assert_eq!((data.width, data.height), (5, 3));
    }

    #[tokio::test]
    async fn resolve_missing_file_is_not_found() {
        let dir = tempdir().expect("temp dir");
        let locator = ImageLocator::from_path(&dir.path().join("gone.jpg")).unwrap();

        let result = resolve(locator).await;

        assert!(matches!(result, Err(ImageResolutionError::NotFound(_))));
    }

    #[tokio::test]
    async fn resolve_rejects_unknown_scheme() {
        let locator = ImageLocator::parse("content://media/external/images/1").unwrap();

        let result = resolve(locator).await;

        assert_eq!(
            result.unwrap_err(),
            ImageResolutionError::UnsupportedScheme("content".into())
        );
    }

    #[test]
    fn load_file_reports_corrupt_data() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("broken.jpg");
        fs::write(&path, b"\xFF\xD8 definitely not a jpeg").unwrap();

        assert!(matches!(load_file(&path), Err(ImageResolutionError::Decode(_))));
    }
}
