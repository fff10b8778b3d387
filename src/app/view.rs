// SPDX-License-Identifier: MPL-2.0
//! View rendering for the application.
//!
//! The screen identity is matched exhaustively here; the bottom bar is
//! appended only on screens that show it.

use super::{Message, Screen};
use crate::camera::{CameraFacing, CaptureController, PermissionStatus};
use crate::diagnostics::EventLog;
use crate::error::CaptureError;
use crate::i18n::fluent::I18n;
use crate::media::ImageData;
use crate::ui::result_screen::ResultPresenter;
use crate::ui::{bottom_bar, camera_screen, home};
use iced::{
    widget::{Column, Container},
    Element, Length,
};

/// Context required to render the application view.
pub struct ViewContext<'a> {
    pub i18n: &'a I18n,
    pub screen: &'a Screen,
    pub capture: Option<&'a CaptureController>,
    pub preview: Option<&'a ImageData>,
    pub last_capture_error: Option<&'a CaptureError>,
    pub presenter: &'a ResultPresenter,
    pub events: &'a EventLog,
}

/// Renders the current application view based on the active screen.
pub fn view(ctx: ViewContext<'_>) -> Element<'_, Message> {
    let current_view: Element<'_, Message> = match ctx.screen {
        Screen::Home => home::view(home::ViewContext {
            i18n: ctx.i18n,
            warning: ctx.events.latest_warning(),
        })
        .map(Message::Home),
        Screen::Camera => view_camera(&ctx),
        Screen::ResultDetection { .. } => ctx.presenter.view(ctx.i18n).map(Message::Result),
    };

    let mut column = Column::new().push(
        Container::new(current_view)
            .width(Length::Fill)
            .height(Length::Fill),
    );

    if ctx.screen.shows_bottom_bar() {
        column = column.push(
            bottom_bar::view(bottom_bar::ViewContext {
                i18n: ctx.i18n,
                current: ctx.screen,
            })
            .map(Message::BottomBar),
        );
    }

    Container::new(column.width(Length::Fill).height(Length::Fill))
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}

fn view_camera<'a>(ctx: &ViewContext<'a>) -> Element<'a, Message> {
    let (permission, facing, capturing) = match ctx.capture {
        Some(controller) => (
            controller.permission(),
            controller.facing(),
            controller.is_capturing(),
        ),
        None => (PermissionStatus::NotDetermined, CameraFacing::default(), false),
    };

    camera_screen::view(camera_screen::ViewContext {
        i18n: ctx.i18n,
        permission,
        facing,
        capturing,
        preview: ctx.preview,
        last_error: ctx.last_capture_error,
    })
    .map(Message::Camera)
}
