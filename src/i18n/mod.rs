// SPDX-License-Identifier: MPL-2.0
//! Internationalization (i18n) support for the application.
//!
//! Translations are Fluent `.ftl` files embedded at build time from
//! `assets/i18n/`. The active locale comes from the `--lang` flag, then the
//! `[general] language` setting, then the OS locale, and finally `en-US`.

pub mod fluent;

pub use fluent::I18n;
