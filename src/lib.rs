// SPDX-License-Identifier: MPL-2.0
//! `gowisata` photographs sea turtles and shows the detection result,
//! built with the Iced GUI framework.
//!
//! The interesting part is the capture flow: a live camera session gated on
//! permission, a frame captured, rotated upright and persisted as a JPEG,
//! and the resulting file locator carried by navigation to the result
//! screen.

pub mod app;
pub mod camera;
pub mod diagnostics;
pub mod error;
pub mod i18n;
pub mod media;
pub mod ui;
