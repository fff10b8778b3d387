// SPDX-License-Identifier: MPL-2.0
//! Light/Dark/System theme selection.

use crate::ui::design_tokens::palette;
use iced::theme::Palette;
use iced::Theme;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    Light,
    Dark,
    #[default]
    System,
}

impl ThemeMode {
    /// Returns true if the effective theme is dark.
    /// For System mode, detects the actual system theme.
    #[must_use]
    pub fn is_dark(self) -> bool {
        match self {
            ThemeMode::Light => false,
            ThemeMode::Dark => true,
            ThemeMode::System => {
                // default to dark on detection error
                !matches!(dark_light::detect(), Ok(dark_light::Mode::Light))
            }
        }
    }

    /// The iced theme to render with, built on the sea-green brand colors.
    #[must_use]
    pub fn theme(self) -> Theme {
        if self.is_dark() {
            Theme::custom(
                "GoWisata Dark".to_string(),
                Palette {
                    background: palette::GRAY_900,
                    text: palette::GRAY_100,
                    primary: palette::SEA_400,
                    danger: palette::ERROR_500,
                    ..Palette::DARK
                },
            )
        } else {
            Theme::custom(
                "GoWisata Light".to_string(),
                Palette {
                    background: palette::WHITE,
                    text: palette::BLACK,
                    primary: palette::SEA_500,
                    danger: palette::ERROR_500,
                    ..Palette::LIGHT
                },
            )
        }
    }
}
