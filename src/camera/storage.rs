// SPDX-License-Identifier: MPL-2.0
//! Turning a raw capture into a JPEG file on disk.
//!
//! Files are named `<epoch-millis>.jpg`. When that name is already taken
//! (two captures in the same millisecond) the next free millisecond is used,
//! and the file is opened with `create_new` so an existing photo is never
//! overwritten.

use super::{CapturedFrame, FrameRotation};
use crate::error::CaptureError;
use crate::media::ImageLocator;
use chrono::Utc;
use image_rs::codecs::jpeg::JpegEncoder;
use image_rs::DynamicImage;
use std::fs::{self, File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

/// How many successive millisecond names are tried before giving up.
const MAX_NAME_ATTEMPTS: i64 = 1_000;

/// Runs the whole post-capture pipeline: orientation, encoding, persistence.
///
/// Returns a `file://` locator for the written photo.
///
/// # Errors
///
/// - [`CaptureError::HardwareCapture`] when the frame is malformed or carries
///   an unsupported rotation
/// - [`CaptureError::Persistence`] when encoding or writing fails
pub fn process_capture(
    frame: CapturedFrame,
    pictures_dir: &Path,
    jpeg_quality: u8,
) -> Result<ImageLocator, CaptureError> {
    let rotation = FrameRotation::try_from(frame.rotation_degrees)?;
    let image = frame.into_image()?;
    let upright = rotation.apply(DynamicImage::ImageRgba8(image));

    let path = persist_jpeg(
        &upright,
        pictures_dir,
        jpeg_quality,
        Utc::now().timestamp_millis(),
    )?;

    tracing::info!(
        path = %path.display(),
        rotation = rotation.degrees(),
        "photo saved"
    );

    ImageLocator::from_path(&path).map_err(|e| CaptureError::Persistence(e.to_string()))
}

/// Encodes `image` as JPEG into `dir`, named after `timestamp_millis`.
///
/// # Errors
///
/// Returns [`CaptureError::Persistence`] on any I/O or encoding failure.
/// A partially written file is removed before returning.
pub fn persist_jpeg(
    image: &DynamicImage,
    dir: &Path,
    quality: u8,
    timestamp_millis: i64,
) -> Result<PathBuf, CaptureError> {
    fs::create_dir_all(dir).map_err(|e| persistence_error(dir, &e))?;

    let (path, file) = create_unique_file(dir, timestamp_millis)?;

    if let Err(err) = write_jpeg(image, file, quality) {
        // no truncated JPEG may stay behind
        let _ = fs::remove_file(&path);
        return Err(err);
    }

    let written = fs::metadata(&path)
        .map(|meta| meta.len())
        .map_err(|e| persistence_error(&path, &e))?;
    if written == 0 {
        let _ = fs::remove_file(&path);
        return Err(CaptureError::Persistence(format!(
            "{} is empty after writing",
            path.display()
        )));
    }

    Ok(path)
}

fn create_unique_file(dir: &Path, timestamp_millis: i64) -> Result<(PathBuf, File), CaptureError> {
    for offset in 0..MAX_NAME_ATTEMPTS {
        let path = dir.join(format!("{}.jpg", timestamp_millis + offset));
        match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(file) => return Ok((path, file)),
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => continue,
            Err(e) => return Err(persistence_error(&path, &e)),
        }
    }
    Err(CaptureError::Persistence(format!(
        "no free file name in {} near {}",
        dir.display(),
        timestamp_millis
    )))
}

fn write_jpeg(image: &DynamicImage, file: File, quality: u8) -> Result<(), CaptureError> {
    let mut writer = BufWriter::new(file);
    // JPEG has no alpha channel
    let rgb = image.to_rgb8();
    rgb.write_with_encoder(JpegEncoder::new_with_quality(&mut writer, quality))
        .map_err(|e| CaptureError::Persistence(format!("JPEG encoding failed: {}", e)))?;
    writer
        .flush()
        .map_err(|e| CaptureError::Persistence(format!("flush failed: {}", e)))?;
    Ok(())
}

fn persistence_error(path: &Path, err: &io::Error) -> CaptureError {
    CaptureError::Persistence(format!("{}: {}", path.display(), err))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image_rs::{GenericImageView, RgbaImage};
    use tempfile::tempdir;

    fn frame(width: u32, height: u32, rotation_degrees: i32) -> CapturedFrame {
        CapturedFrame {
            width,
            height,
            pixels: vec![128; (width * height * 4) as usize],
            rotation_degrees,
        }
    }

    #[test]
    fn persist_jpeg_names_file_after_timestamp() {
        let dir = tempdir().expect("temp dir");
        let image = DynamicImage::ImageRgba8(RgbaImage::new(8, 8));

        let path = persist_jpeg(&image, dir.path(), 100, 1_700_000_000_000).expect("persist");

        assert_eq!(path, dir.path().join("1700000000000.jpg"));
        assert!(fs::metadata(&path).unwrap().len() > 0);
    }

    #[test]
    fn persist_jpeg_never_overwrites_existing_file() {
        let dir = tempdir().expect("temp dir");
        let image = DynamicImage::ImageRgba8(RgbaImage::new(8, 8));
        fs::write(dir.path().join("42.jpg"), b"existing").unwrap();

        let path = persist_jpeg(&image, dir.path(), 100, 42).expect("persist");

        assert_eq!(path, dir.path().join("43.jpg"));
        assert_eq!(fs::read(dir.path().join("42.jpg")).unwrap(), b"existing");
    }

    #[test]
    fn persist_jpeg_creates_missing_directory() {
        let dir = tempdir().expect("temp dir");
        let nested = dir.path().join("Pictures").join("nested");
        let image = DynamicImage::ImageRgba8(RgbaImage::new(4, 4));

        let path = persist_jpeg(&image, &nested, 100, 1).expect("persist");

        assert!(path.starts_with(&nested));
    }

    #[test]
    fn persist_jpeg_reports_unwritable_directory() {
        let dir = tempdir().expect("temp dir");
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, b"a file, not a directory").unwrap();
        let image = DynamicImage::ImageRgba8(RgbaImage::new(4, 4));

        let result = persist_jpeg(&image, &blocker.join("Pictures"), 100, 1);

        assert!(matches!(result, Err(CaptureError::Persistence(_))));
    }

    #[test]
    fn process_capture_applies_reported_rotation() {
        let dir = tempdir().expect("temp dir");

        let locator = process_capture(frame(64, 32, 90), dir.path(), 100).expect("capture");

        let path = locator.to_file_path().expect("file locator");
        let saved = image_rs::open(&path).expect("decodable jpeg");
        assert_eq!(saved.dimensions(), (32, 64));
    }

    #[test]
    fn process_capture_rejects_unsupported_rotation() {
        let dir = tempdir().expect("temp dir");

        let result = process_capture(frame(8, 8, 45), dir.path(), 100);

        assert!(matches!(result, Err(CaptureError::HardwareCapture(_))));
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn process_capture_rejects_malformed_frame() {
        let dir = tempdir().expect("temp dir");
        let mut broken = frame(8, 8, 0);
        broken.pixels.truncate(3);

        let result = process_capture(broken, dir.path(), 100);

        assert!(matches!(result, Err(CaptureError::HardwareCapture(_))));
    }
}
