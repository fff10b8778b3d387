// SPDX-License-Identifier: MPL-2.0
//! User interface components.
//!
//! Every screen follows the same "state down, messages up" shape: a
//! `ViewContext` (or the component state itself) renders an `Element`, user
//! input comes back as a `Message`, and `update` turns it into an `Event`
//! the application acts on.
//!
//! # Screens
//!
//! - [`home`] - Start destination
//! - [`camera_screen`] - Live preview, capture, camera switch and gallery pick
//! - [`result_screen`] - Captured or picked image with the detection label
//!
//! # Shared Infrastructure
//!
//! - [`bottom_bar`] - Bottom navigation bar on top-level screens
//! - [`design_tokens`] - Colors, spacing, sizing and typography constants
//! - [`theming`] - Light/Dark/System theme mode

pub mod bottom_bar;
pub mod camera_screen;
pub mod design_tokens;
pub mod home;
pub mod result_screen;
pub mod theming;
