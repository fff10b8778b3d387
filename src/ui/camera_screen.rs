// SPDX-License-Identifier: MPL-2.0
//! Camera capture screen.
//!
//! Stateless view over the [`CaptureController`](crate::camera::CaptureController)
//! owned by the application. User intents are returned as [`Event`]s; the
//! application decides what they do.

use crate::camera::{CameraFacing, PermissionStatus};
use crate::error::CaptureError;
use crate::i18n::fluent::I18n;
use crate::media::ImageData;
use crate::ui::design_tokens::{palette, radius, sizing, spacing, typography};
use iced::{
    alignment::{Horizontal, Vertical},
    widget::{button, container, image, text, Column, Container, Row, Space},
    Border, Element, Length, Theme,
};

/// Contextual data needed to render the camera screen.
pub struct ViewContext<'a> {
    pub i18n: &'a I18n,
    pub permission: PermissionStatus,
    pub facing: CameraFacing,
    pub capturing: bool,
    pub preview: Option<&'a ImageData>,
    /// Last failed capture on this screen, shown until the next attempt.
    pub last_error: Option<&'a CaptureError>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    SwitchCamera,
    TakePhoto,
    OpenGallery,
    RequestPermission,
    Back,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    SwitchCamera,
    CapturePhoto,
    OpenGallery,
    RequestPermission,
    Back,
}

#[must_use]
pub fn update(message: &Message) -> Event {
    match message {
        Message::SwitchCamera => Event::SwitchCamera,
        Message::TakePhoto => Event::CapturePhoto,
        Message::OpenGallery => Event::OpenGallery,
        Message::RequestPermission => Event::RequestPermission,
        Message::Back => Event::Back,
    }
}

#[must_use]
#[allow(clippy::needless_pass_by_value)] // ViewContext is small and consumed
pub fn view(ctx: ViewContext<'_>) -> Element<'_, Message> {
    let top = Row::new()
        .padding(spacing::SM)
        .push(button(text(format!("← {}", ctx.i18n.tr("camera-back")))).on_press(Message::Back));

    let body: Element<'_, Message> = if ctx.permission.is_granted() {
        build_preview(&ctx)
    } else {
        build_permission_panel(&ctx)
    };

    let mut content = Column::new()
        .width(Length::Fill)
        .height(Length::Fill)
        .push(top)
        .push(body);

    if let Some(error) = ctx.last_error {
        content = content.push(build_error_banner(ctx.i18n, error));
    }

    content.push(build_controls(&ctx)).into()
}

fn build_preview<'a>(ctx: &ViewContext<'a>) -> Element<'a, Message> {
    let inner: Element<'a, Message> = match ctx.preview {
        Some(frame) => image(frame.handle.clone())
            .width(Length::Fill)
            .height(Length::Fill)
            .into(),
        None => text(ctx.i18n.tr("camera-preview-unavailable"))
            .size(typography::BODY)
            .into(),
    };

    Container::new(inner)
        .center_x(Length::Fill)
        .center_y(Length::Fill)
        .style(|_theme: &Theme| container::Style {
            background: Some(palette::BLACK.into()),
            text_color: Some(palette::WHITE),
            ..Default::default()
        })
        .into()
}

fn build_permission_panel<'a>(ctx: &ViewContext<'a>) -> Element<'a, Message> {
    let column = Column::new()
        .spacing(spacing::MD)
        .align_x(Horizontal::Center)
        .push(text(ctx.i18n.tr("camera-permission-required")).size(typography::BODY_LG))
        .push(
            button(text(ctx.i18n.tr("camera-permission-request")))
                .on_press(Message::RequestPermission),
        );

    Container::new(column)
        .center_x(Length::Fill)
        .center_y(Length::Fill)
        .padding(spacing::LG)
        .into()
}

fn build_error_banner<'a>(i18n: &I18n, error: &CaptureError) -> Element<'a, Message> {
    let message = match error.details() {
        Some(details) => i18n.tr_with_args(error.i18n_key(), &[("details", details)]),
        None => i18n.tr(error.i18n_key()),
    };

    Container::new(text(message).size(typography::BODY))
        .width(Length::Fill)
        .padding(spacing::SM)
        .style(|_theme: &Theme| container::Style {
            background: Some(palette::ERROR_500.into()),
            text_color: Some(palette::WHITE),
            ..Default::default()
        })
        .into()
}

fn build_controls<'a>(ctx: &ViewContext<'a>) -> Element<'a, Message> {
    let functional = ctx.permission.is_granted();

    let gallery = button(text(ctx.i18n.tr("camera-gallery"))).on_press(Message::OpenGallery);

    let shutter_label = if ctx.capturing {
        ctx.i18n.tr("camera-capturing")
    } else {
        ctx.i18n.tr("camera-take-photo")
    };
    let shutter = button(
        Container::new(text(shutter_label).size(typography::CAPTION))
            .center_x(Length::Fill)
            .center_y(Length::Fill),
    )
    .width(Length::Fixed(sizing::SHUTTER))
    .height(Length::Fixed(sizing::SHUTTER))
    .on_press_maybe((functional && !ctx.capturing).then_some(Message::TakePhoto))
    .style(shutter_style);

    let switch = button(text(ctx.i18n.tr("camera-switch")))
        .on_press_maybe(functional.then_some(Message::SwitchCamera));

    let facing = text(ctx.i18n.tr(match ctx.facing {
        CameraFacing::Front => "camera-facing-front",
        CameraFacing::Back => "camera-facing-back",
    }))
    .size(typography::CAPTION);

    Row::new()
        .padding(spacing::MD)
        .spacing(spacing::LG)
        .align_y(Vertical::Center)
        .push(gallery)
        .push(Space::new().width(Length::Fill))
        .push(shutter)
        .push(Space::new().width(Length::Fill))
        .push(Column::new().align_x(Horizontal::Center).push(switch).push(facing))
        .into()
}

fn shutter_style(theme: &Theme, status: button::Status) -> button::Style {
    let palette = theme.extended_palette();
    let background = match status {
        button::Status::Disabled => palette.background.strong.color,
        button::Status::Pressed => palette.primary.strong.color,
        _ => palette.primary.base.color,
    };

    button::Style {
        background: Some(background.into()),
        text_color: palette.primary.base.text,
        border: Border {
            radius: radius::FULL.into(),
            width: 3.0,
            color: palette.background.base.color,
        },
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx<'a>(i18n: &'a I18n, permission: PermissionStatus) -> ViewContext<'a> {
        ViewContext {
            i18n,
            permission,
            facing: CameraFacing::Back,
            capturing: false,
            preview: None,
            last_error: None,
        }
    }

    #[test]
    fn camera_view_renders_without_permission() {
        let i18n = I18n::default();
        let _element = view(ctx(&i18n, PermissionStatus::Denied));
    }

    #[test]
    fn camera_view_renders_with_preview_and_error() {
        let i18n = I18n::default();
        let frame = ImageData::from_rgba(2, 2, vec![0; 16]);
        let error = CaptureError::Persistence("disk full".into());
        let _element = view(ViewContext {
            preview: Some(&frame),
            last_error: Some(&error),
            capturing: true,
            ..ctx(&i18n, PermissionStatus::Granted)
        });
    }

    #[test]
    fn messages_map_to_events() {
        assert_eq!(update(&Message::TakePhoto), Event::CapturePhoto);
        assert_eq!(update(&Message::SwitchCamera), Event::SwitchCamera);
        assert_eq!(update(&Message::Back), Event::Back);
    }
}
