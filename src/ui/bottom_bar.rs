// SPDX-License-Identifier: MPL-2.0
//! Bottom navigation bar shown on top-level screens.
//!
//! There is a single destination, Home. Selecting it pops everything above
//! the start destination; selecting it while already there does nothing.

use crate::app::Screen;
use crate::i18n::fluent::I18n;
use crate::ui::design_tokens::{radius, sizing, spacing, typography};
use iced::{
    alignment::{Horizontal, Vertical},
    widget::{button, container, Container, Row, Text},
    Border, Element, Length, Theme,
};

/// Contextual data needed to render the bottom bar.
pub struct ViewContext<'a> {
    pub i18n: &'a I18n,
    pub current: &'a Screen,
}

/// Messages emitted by the bottom bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    SelectHome,
}

/// Events propagated to the parent application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    None,
    /// Navigate to a top-level destination (single-top).
    NavigateTopLevel(Screen),
}

/// Process a bottom bar message and return the corresponding event.
#[must_use]
pub fn update(message: &Message, current: &Screen) -> Event {
    match message {
        Message::SelectHome if *current == Screen::Home => Event::None,
        Message::SelectHome => Event::NavigateTopLevel(Screen::Home),
    }
}

/// Render the bottom bar.
#[must_use]
#[allow(clippy::needless_pass_by_value)] // ViewContext is small and consumed
pub fn view(ctx: ViewContext<'_>) -> Element<'_, Message> {
    let selected = *ctx.current == Screen::Home;
    let home = button(
        Text::new(ctx.i18n.tr("menu-home")).size(typography::BODY),
    )
    .on_press(Message::SelectHome)
    .padding([spacing::XS, spacing::LG])
    .style(move |theme: &Theme, status| item_style(theme, status, selected));

    let row = Row::new()
        .spacing(spacing::SM)
        .align_y(Vertical::Center)
        .push(home);

    Container::new(row)
        .width(Length::Fill)
        .height(Length::Fixed(sizing::BOTTOM_BAR_HEIGHT))
        .align_x(Horizontal::Center)
        .align_y(Vertical::Center)
        .style(|theme: &Theme| container::Style {
            background: Some(theme.extended_palette().background.weak.color.into()),
            ..Default::default()
        })
        .into()
}

fn item_style(theme: &Theme, status: button::Status, selected: bool) -> button::Style {
    let palette = theme.extended_palette();
    let background = match (status, selected) {
        (button::Status::Pressed, _) => Some(palette.primary.strong.color.into()),
        (button::Status::Hovered, _) | (_, true) => Some(palette.primary.weak.color.into()),
        _ => None,
    };

    button::Style {
        background,
        text_color: palette.background.base.text,
        border: Border {
            radius: radius::FULL.into(),
            ..Default::default()
        },
        ..Default::default()
    }
}
