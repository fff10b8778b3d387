// SPDX-License-Identifier: MPL-2.0
//! Screen enumeration and route strings for application navigation.
//!
//! Routes are URL-like: `home`, `camera` and
//! `result-detection?uri=<form-urlencoded locator>`.

use crate::error::RouteError;
use crate::media::ImageLocator;
use std::fmt;
use url::form_urlencoded;

const HOME_ROUTE: &str = "home";
const CAMERA_ROUTE: &str = "camera";
const RESULT_DETECTION_ROUTE: &str = "result-detection";
const LOCATOR_PARAM: &str = "uri";

/// Screens the user can navigate between.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Screen {
    Home,
    Camera,
    ResultDetection { locator: ImageLocator },
}

impl Screen {
    /// Serializes this screen to its route string.
    #[must_use]
    pub fn route(&self) -> String {
        match self {
            Screen::Home => HOME_ROUTE.to_string(),
            Screen::Camera => CAMERA_ROUTE.to_string(),
            Screen::ResultDetection { locator } => {
                let encoded: String =
                    form_urlencoded::byte_serialize(locator.as_str().as_bytes()).collect();
                format!("{}?{}={}", RESULT_DETECTION_ROUTE, LOCATOR_PARAM, encoded)
            }
        }
    }

    /// Parses a route string back into a screen.
    ///
    /// # Errors
    ///
    /// Fails for unknown routes, and for result routes whose `uri`
    /// parameter is missing or not a valid locator.
    pub fn from_route(route: &str) -> Result<Self, RouteError> {
        let (path, query) = match route.split_once('?') {
            Some((path, query)) => (path, Some(query)),
            None => (route, None),
        };

        match path {
            HOME_ROUTE => Ok(Screen::Home),
            CAMERA_ROUTE => Ok(Screen::Camera),
            RESULT_DETECTION_ROUTE => {
                let raw = query
                    .and_then(|q| {
                        form_urlencoded::parse(q.as_bytes())
                            .find(|(key, _)| key == LOCATOR_PARAM)
                            .map(|(_, value)| value.into_owned())
                    })
                    .ok_or(RouteError::MissingLocator)?;
                let locator = ImageLocator::parse(&raw)?;
                Ok(Screen::ResultDetection { locator })
            }
            other => Err(RouteError::UnknownRoute(other.to_string())),
        }
    }

    /// Whether the bottom navigation bar belongs on this screen.
    #[must_use]
    pub fn shows_bottom_bar(&self) -> bool {
        matches!(self, Screen::Home)
    }

    /// The image locator carried by this screen, if any.
    #[must_use]
    pub fn locator(&self) -> Option<&ImageLocator> {
        match self {
            Screen::ResultDetection { locator } => Some(locator),
            Screen::Home | Screen::Camera => None,
        }
    }
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.route())
    }
}
