// SPDX-License-Identifier: MPL-2.0
//! Update logic and message handlers for the application.
//!
//! Screen components only report intents; everything with a side effect
//! (navigation, opening and closing the capture session, dialogs, saving
//! state) happens here.

use super::config::Config;
use super::persisted_state::AppState;
use super::{Message, Navigator, Screen};
use crate::camera::{CameraDevice, CaptureController, CaptureOutcome, PermissionStatus, PreviewFrame};
use crate::diagnostics::{EventKind, EventLog};
use crate::error::CaptureError;
use crate::i18n::fluent::I18n;
use crate::media::{self, ImageData, ImageLocator};
use crate::ui::bottom_bar::{self, Event as BottomBarEvent};
use crate::ui::camera_screen::{self, Event as CameraEvent};
use crate::ui::home::{self, Event as HomeEvent};
use crate::ui::result_screen::{self, Event as ResultEvent, ResultPresenter};
use iced::Task;
use std::future::Future;
use std::path::PathBuf;
use std::sync::Arc;

/// Mutable view of the application state handed to the handlers.
pub struct UpdateContext<'a> {
    pub navigator: &'a mut Navigator,
    pub config: &'a Config,
    pub app_state: &'a mut AppState,
    pub data_dir: Option<&'a PathBuf>,
    pub pictures_dir: &'a PathBuf,
    pub device: &'a Arc<dyn CameraDevice>,
    pub capture: &'a mut Option<CaptureController>,
    pub preview: &'a mut Option<ImageData>,
    pub last_capture_error: &'a mut Option<CaptureError>,
    pub presenter: &'a mut ResultPresenter,
    pub events: &'a mut EventLog,
    pub i18n: &'a I18n,
}

impl UpdateContext<'_> {
    fn persist_state(&mut self) {
        if let Some(key) = self.app_state.save_to(self.data_dir.cloned()) {
            tracing::warn!(key, "app state could not be saved");
            self.events.record(EventKind::StorageWarning { key });
        }
    }
}

pub fn handle_home_message(ctx: &mut UpdateContext<'_>, message: &home::Message) -> Task<Message> {
    match home::update(message) {
        HomeEvent::OpenCamera => {
            ctx.navigator.navigate_to(Screen::Camera);
            on_screen_changed(ctx)
        }
    }
}

pub fn handle_camera_message(
    ctx: &mut UpdateContext<'_>,
    message: &camera_screen::Message,
) -> Task<Message> {
    match camera_screen::update(message) {
        CameraEvent::SwitchCamera => {
            if let Some(controller) = ctx.capture.as_mut() {
                controller.switch_camera();
            }
            *ctx.preview = None;
            Task::none()
        }
        CameraEvent::CapturePhoto => start_capture(ctx),
        CameraEvent::OpenGallery => open_gallery_dialog(ctx.app_state.last_open_directory.clone()),
        CameraEvent::RequestPermission => request_permission(ctx.i18n),
        CameraEvent::Back => {
            ctx.navigator.navigate_back();
            on_screen_changed(ctx)
        }
    }
}

pub fn handle_result_message(
    ctx: &mut UpdateContext<'_>,
    message: result_screen::Message,
) -> Task<Message> {
    match ctx.presenter.update(message) {
        ResultEvent::None => Task::none(),
        ResultEvent::Back => {
            ctx.navigator.navigate_back();
            on_screen_changed(ctx)
        }
        ResultEvent::ImageUnavailable { locator, error } => {
            ctx.events
                .record(EventKind::ImageUnavailable { locator, error });
            Task::none()
        }
    }
}

pub fn handle_bottom_bar_message(
    ctx: &mut UpdateContext<'_>,
    message: &bottom_bar::Message,
) -> Task<Message> {
    match bottom_bar::update(message, ctx.navigator.current()) {
        BottomBarEvent::None => Task::none(),
        BottomBarEvent::NavigateTopLevel(screen) => {
            ctx.navigator.navigate_top_level(screen);
            on_screen_changed(ctx)
        }
    }
}

/// Starts a capture if the controller accepts it.
///
/// Rejections are logged, recorded and shown on the camera screen.
pub fn begin_capture(
    ctx: &mut UpdateContext<'_>,
) -> Result<impl Future<Output = CaptureOutcome> + Send + 'static, CaptureError> {
    let result = match ctx.capture.as_mut() {
        Some(controller) => controller.capture_photo(),
        None => Err(CaptureError::HardwareCapture(
            "camera is not open".to_string(),
        )),
    };

    match result {
        Ok(future) => {
            *ctx.last_capture_error = None;
            Ok(future)
        }
        Err(err) => {
            tracing::warn!(%err, "capture rejected");
            ctx.events
                .record(EventKind::CaptureFailed { error: err.clone() });
            *ctx.last_capture_error = Some(err.clone());
            Err(err)
        }
    }
}

fn start_capture(ctx: &mut UpdateContext<'_>) -> Task<Message> {
    match begin_capture(ctx) {
        Ok(future) => Task::perform(future, Message::CaptureFinished),
        Err(CaptureError::PermissionDenied) => request_permission(ctx.i18n),
        Err(_) => Task::none(),
    }
}

/// Consumes a capture outcome; navigates only once the photo is on disk.
pub fn handle_capture_finished(
    ctx: &mut UpdateContext<'_>,
    outcome: CaptureOutcome,
) -> Task<Message> {
    let Some(controller) = ctx.capture.as_mut() else {
        tracing::debug!(attempt = ?outcome.attempt, "capture finished after leaving the camera");
        return Task::none();
    };

    match controller.complete(outcome) {
        None => Task::none(),
        Some(Ok(locator)) => {
            ctx.events.record(EventKind::CaptureSaved {
                locator: locator.clone(),
            });
            *ctx.last_capture_error = None;
            show_result(ctx, locator)
        }
        Some(Err(err)) => {
            ctx.events
                .record(EventKind::CaptureFailed { error: err.clone() });
            *ctx.last_capture_error = Some(err);
            Task::none()
        }
    }
}

pub fn handle_permission_answered(ctx: &mut UpdateContext<'_>, granted: bool) -> Task<Message> {
    let status = PermissionStatus::from_answer(granted);
    tracing::info!(?status, "camera permission answered");

    ctx.app_state.camera_permission = status;
    ctx.persist_state();
    ctx.events.record(EventKind::PermissionAnswered { status });

    if let Some(controller) = ctx.capture.as_mut() {
        controller.set_permission(status);
    }
    if granted && *ctx.last_capture_error == Some(CaptureError::PermissionDenied) {
        *ctx.last_capture_error = None;
    }
    Task::none()
}

pub fn handle_gallery_picked(ctx: &mut UpdateContext<'_>, path: Option<PathBuf>) -> Task<Message> {
    let Some(path) = path else {
        // dialog cancelled
        return Task::none();
    };

    if !media::is_supported_image(&path) {
        tracing::warn!(path = %path.display(), "picked file is not a supported image");
        return Task::none();
    }

    ctx.app_state.set_last_open_directory_from_file(&path);
    ctx.persist_state();

    match ImageLocator::from_path(&path) {
        Ok(locator) => show_result(ctx, locator),
        Err(err) => {
            tracing::warn!(%err, path = %path.display(), "picked file has no locator");
            Task::none()
        }
    }
}

/// Starts a preview read off the UI thread.
pub fn handle_preview_tick(ctx: &mut UpdateContext<'_>) -> Task<Message> {
    ctx.capture
        .as_mut()
        .and_then(CaptureController::request_preview)
        .map_or_else(Task::none, |read| Task::perform(read, Message::PreviewFrame))
}

pub fn handle_preview_frame(ctx: &mut UpdateContext<'_>, frame: PreviewFrame) -> Task<Message> {
    match ctx.capture.as_mut() {
        Some(controller) => {
            if let Some(captured) = controller.accept_preview(frame) {
                *ctx.preview = Some(ImageData::from_frame(captured));
            }
        }
        None => {
            tracing::debug!(session = ?frame.session, "preview frame after leaving the camera");
            if frame.result.is_ok() {
                // the read restarted the stream after the session closed
                ctx.device.stop_preview();
            }
        }
    }
    Task::none()
}

/// Navigates to the result screen for `locator`.
pub fn show_result(ctx: &mut UpdateContext<'_>, locator: ImageLocator) -> Task<Message> {
    ctx.navigator
        .navigate_to(Screen::ResultDetection { locator });
    on_screen_changed(ctx)
}

/// Opens or closes the capture session and starts or drops image
/// resolution to match the current screen.
fn on_screen_changed(ctx: &mut UpdateContext<'_>) -> Task<Message> {
    let current = ctx.navigator.current().clone();

    if current != Screen::Camera {
        close_capture_session(ctx);
    }
    if !matches!(current, Screen::ResultDetection { .. }) {
        ctx.presenter.clear();
    }

    match current {
        Screen::Home => Task::none(),
        Screen::Camera => open_capture_session(ctx),
        Screen::ResultDetection { locator } => ctx
            .presenter
            .present(&locator)
            .map_or_else(Task::none, |task| task.map(Message::Result)),
    }
}

fn open_capture_session(ctx: &mut UpdateContext<'_>) -> Task<Message> {
    if ctx.capture.is_some() {
        return Task::none();
    }

    let facing = ctx
        .app_state
        .last_facing
        .or(ctx.config.camera.default_facing)
        .unwrap_or_default();
    // re-read on every entry: the answer may have changed since last time
    let permission = ctx.app_state.camera_permission;

    let controller = CaptureController::new(
        Arc::clone(ctx.device),
        facing,
        permission,
        ctx.pictures_dir.clone(),
        ctx.config.camera.effective_jpeg_quality(),
    );
    tracing::info!(session = ?controller.session_id(), ?facing, ?permission, "camera opened");
    *ctx.capture = Some(controller);

    if permission.needs_request() {
        request_permission(ctx.i18n)
    } else {
        Task::none()
    }
}

fn close_capture_session(ctx: &mut UpdateContext<'_>) {
    let Some(controller) = ctx.capture.take() else {
        return;
    };
    tracing::info!(session = ?controller.session_id(), "camera closed");

    if ctx.app_state.last_facing != Some(controller.facing()) {
        ctx.app_state.last_facing = Some(controller.facing());
        ctx.persist_state();
    }
    *ctx.preview = None;
    *ctx.last_capture_error = None;
}

/// Asks for camera access with a native yes/no dialog.
fn request_permission(i18n: &I18n) -> Task<Message> {
    let title = i18n.tr("camera-permission-dialog-title");
    let description = i18n.tr("camera-permission-dialog-description");

    Task::perform(
        async move {
            let answer = rfd::AsyncMessageDialog::new()
                .set_level(rfd::MessageLevel::Info)
                .set_title(title)
                .set_description(description)
                .set_buttons(rfd::MessageButtons::YesNo)
                .show()
                .await;
            matches!(answer, rfd::MessageDialogResult::Yes)
        },
        Message::PermissionAnswered,
    )
}

/// Opens the gallery file dialog, starting in the last used directory.
fn open_gallery_dialog(last_directory: Option<PathBuf>) -> Task<Message> {
    Task::perform(
        async move {
            let mut dialog =
                rfd::AsyncFileDialog::new().add_filter("Images", media::IMAGE_EXTENSIONS);

            if let Some(dir) = last_directory {
                if dir.exists() {
                    dialog = dialog.set_directory(&dir);
                }
            }

            dialog.pick_file().await.map(|h| h.path().to_path_buf())
        },
        Message::GalleryPicked,
    )
}
