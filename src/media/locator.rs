// SPDX-License-Identifier: MPL-2.0
//! Image locators: URI references to captured or picked images.

use crate::error::RouteError;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use url::Url;

/// A non-empty URI pointing at an image (`file://`, `http://` or `https://`).
///
/// Locators are created once (at capture or pick time) and never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ImageLocator(Url);

impl ImageLocator {
    /// Builds a `file://` locator for an absolute path.
    ///
    /// # Errors
    ///
    /// Fails for relative paths, which cannot be expressed as file URLs.
    pub fn from_path(path: &Path) -> Result<Self, RouteError> {
        Url::from_file_path(path).map(Self).map_err(|()| {
            RouteError::InvalidLocator(format!("not an absolute path: {}", path.display()))
        })
    }

    /// Parses a locator string.
    ///
    /// # Errors
    ///
    /// Fails for empty strings and strings that are not absolute URLs.
    pub fn parse(raw: &str) -> Result<Self, RouteError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(RouteError::InvalidLocator("empty locator".into()));
        }
        Url::parse(trimmed)
            .map(Self)
            .map_err(|e| RouteError::InvalidLocator(format!("{}: {}", trimmed, e)))
    }

    /// The URI scheme, lowercase (`file`, `https`, ...).
    #[must_use]
    pub fn scheme(&self) -> &str {
        self.0.scheme()
    }

    /// The local path behind a `file://` locator.
    #[must_use]
    pub fn to_file_path(&self) -> Option<PathBuf> {
        if self.scheme() == "file" {
            self.0.to_file_path().ok()
        } else {
            None
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    #[must_use]
    pub fn as_url(&self) -> &Url {
        &self.0
    }
}

impl fmt::Display for ImageLocator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0.as_str())
    }
}

impl FromStr for ImageLocator {
    type Err = RouteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_path_produces_file_url() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("1700000000000.jpg");

        let locator = ImageLocator::from_path(&path).expect("absolute path");

        assert_eq!(locator.scheme(), "file");
        assert!(locator.as_str().ends_with("1700000000000.jpg"));
        assert_eq!(locator.to_file_path(), Some(path));
    }

    #[test]
    fn from_path_rejects_relative_paths() {
        let result = ImageLocator::from_path(Path::new("relative/photo.jpg"));
        assert!(matches!(result, Err(RouteError::InvalidLocator(_))));
    }

    #[test]
    fn parse_rejects_empty_input() {
        assert!(ImageLocator::parse("").is_err());
        assert!(ImageLocator::parse("   ").is_err());
    }

    #[test]
    fn parse_rejects_non_urls() {
        assert!(ImageLocator::parse("not a uri").is_err());
    }

    #[test]
    fn network_locator_has_no_file_path() {
        let locator: ImageLocator = "https://www.unikom.ac.id/img/logo_unikom_kuning.png"
            .parse()
            .expect("valid url");
        assert_eq!(locator.scheme(), "https");
        assert!(locator.to_file_path().is_none());
    }

    #[test]
    fn path_with_spaces_is_percent_encoded() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("my photos").join("a b.jpg");

        let locator = ImageLocator::from_path(&path).expect("absolute path");

        assert!(locator.as_str().contains("my%20photos"));
        assert_eq!(locator.to_file_path(), Some(path));
    }
}
