// SPDX-License-Identifier: MPL-2.0
//! Home screen: the start destination.

use crate::i18n::fluent::I18n;
use crate::ui::design_tokens::{palette, spacing, typography};
use iced::{
    alignment::Horizontal,
    widget::{button, text, Column, Container},
    Element, Length,
};

pub struct ViewContext<'a> {
    pub i18n: &'a I18n,
    /// i18n key of a settings/state problem met at startup or while saving.
    pub warning: Option<&'a str>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    OpenCamera,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    OpenCamera,
}

#[must_use]
pub fn update(message: &Message) -> Event {
    match message {
        Message::OpenCamera => Event::OpenCamera,
    }
}

#[must_use]
#[allow(clippy::needless_pass_by_value)] // ViewContext is small and consumed
pub fn view(ctx: ViewContext<'_>) -> Element<'_, Message> {
    let mut content = Column::new()
        .spacing(spacing::MD)
        .align_x(Horizontal::Center)
        .push(text(ctx.i18n.tr("home-title")).size(typography::TITLE_LG))
        .push(text(ctx.i18n.tr("home-subtitle")).size(typography::BODY_LG))
        .push(
            button(text(ctx.i18n.tr("home-open-camera")).size(typography::BODY_LG))
                .padding([spacing::SM, spacing::XL])
                .on_press(Message::OpenCamera),
        );

    if let Some(key) = ctx.warning {
        content = content.push(
            text(ctx.i18n.tr(key))
                .size(typography::CAPTION)
                .color(palette::ERROR_500),
        );
    }

    Container::new(content)
        .center_x(Length::Fill)
        .center_y(Length::Fill)
        .padding(spacing::LG)
        .into()
}
