// SPDX-License-Identifier: MPL-2.0
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    Io(String),
    Config(String),
    Image(String),
    Capture(CaptureError),
    Route(RouteError),
}

/// Failures of a single capture attempt.
///
/// None of these are fatal: the capture screen stays on screen and the user
/// can retry with the same control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaptureError {
    /// Camera access has not been granted (yet).
    PermissionDenied,

    /// A capture is already in flight for this session.
    Busy,

    /// The camera failed to deliver a usable frame.
    HardwareCapture(String),

    /// The frame could not be encoded or written to disk.
    Persistence(String),
}

impl CaptureError {
    /// Returns the i18n message key for this error type.
    pub fn i18n_key(&self) -> &'static str {
        match self {
            CaptureError::PermissionDenied => "error-capture-permission-denied",
            CaptureError::Busy => "error-capture-busy",
            CaptureError::HardwareCapture(_) => "error-capture-hardware",
            CaptureError::Persistence(_) => "error-capture-persistence",
        }
    }

    /// Underlying cause, passed as `$details` to the translated message.
    pub fn details(&self) -> Option<&str> {
        match self {
            CaptureError::HardwareCapture(msg) | CaptureError::Persistence(msg) => Some(msg),
            CaptureError::PermissionDenied | CaptureError::Busy => None,
        }
    }
}

impl fmt::Display for CaptureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CaptureError::PermissionDenied => write!(f, "Camera permission denied"),
            CaptureError::Busy => write!(f, "A capture is already in progress"),
            CaptureError::HardwareCapture(msg) => write!(f, "Couldn't take photo: {}", msg),
            CaptureError::Persistence(msg) => write!(f, "Couldn't save photo: {}", msg),
        }
    }
}

/// Failures while turning a locator into a renderable image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageResolutionError {
    /// The locator uses a scheme the loader cannot fetch.
    UnsupportedScheme(String),

    /// The file behind a `file://` locator does not exist.
    NotFound(String),

    /// Reading the source failed.
    Io(String),

    /// Fetching a remote source failed.
    Network(String),

    /// The bytes are not a decodable image.
    Decode(String),
}

impl ImageResolutionError {
    /// Returns the i18n message key for this error type.
    pub fn i18n_key(&self) -> &'static str {
        match self {
            ImageResolutionError::UnsupportedScheme(_) => "error-image-unsupported-source",
            ImageResolutionError::NotFound(_) => "error-image-not-found",
            ImageResolutionError::Io(_) => "error-image-io",
            ImageResolutionError::Network(_) => "error-image-network",
            ImageResolutionError::Decode(_) => "error-image-decode",
        }
    }
}

impl fmt::Display for ImageResolutionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImageResolutionError::UnsupportedScheme(scheme) => {
                write!(f, "Unsupported image source: {}", scheme)
            }
            ImageResolutionError::NotFound(path) => write!(f, "Image not found: {}", path),
            ImageResolutionError::Io(msg) => write!(f, "I/O error: {}", msg),
            ImageResolutionError::Network(msg) => write!(f, "Network error: {}", msg),
            ImageResolutionError::Decode(msg) => write!(f, "Decoding failed: {}", msg),
        }
    }
}

/// Failures while parsing a navigation route string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteError {
    /// The route does not name a known screen.
    UnknownRoute(String),

    /// `result-detection` without a `uri` parameter.
    MissingLocator,

    /// The `uri` parameter is not a valid locator.
    InvalidLocator(String),
}

impl fmt::Display for RouteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RouteError::UnknownRoute(route) => write!(f, "Unknown route: {}", route),
            RouteError::MissingLocator => write!(f, "Route is missing the uri parameter"),
            RouteError::InvalidLocator(msg) => write!(f, "Invalid image locator: {}", msg),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "I/O Error: {}", e),
            Error::Config(e) => write!(f, "Config Error: {}", e),
            Error::Image(e) => write!(f, "Image Error: {}", e),
            Error::Capture(e) => write!(f, "Capture Error: {}", e),
            Error::Route(e) => write!(f, "Route Error: {}", e),
        }
    }
}

impl std::error::Error for Error {}

impl From<CaptureError> for Error {
    fn from(err: CaptureError) -> Self {
        Error::Capture(err)
    }
}

impl From<RouteError> for Error {
    fn from(err: RouteError) -> Self {
        Error::Route(err)
    }
}

impl From<ImageResolutionError> for Error {
    fn from(err: ImageResolutionError) -> Self {
        Error::Image(err.to_string())
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
