// SPDX-License-Identifier: MPL-2.0
//! Image locators, decoded image data and the loader that connects them.

pub mod image;
pub mod loader;
pub mod locator;

pub use image::ImageData;
pub use locator::ImageLocator;

/// File extensions offered by the gallery picker.
pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp", "bmp", "gif"];

/// Returns true if the path has one of the [`IMAGE_EXTENSIONS`].
#[must_use]
pub fn is_supported_image(path: &std::path::Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            IMAGE_EXTENSIONS
                .iter()
                .any(|candidate| candidate.eq_ignore_ascii_case(ext))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn supported_extensions_are_case_insensitive() {
        assert!(is_supported_image(Path::new("/tmp/a.JPG")));
        assert!(is_supported_image(Path::new("/tmp/a.webp")));
        assert!(!is_supported_image(Path::new("/tmp/a.txt")));
        assert!(!is_supported_image(Path::new("/tmp/noext")));
    }
}
