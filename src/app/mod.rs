// SPDX-License-Identifier: MPL-2.0
//! Application root state and orchestration between the screens.
//!
//! The `App` struct wires together navigation, the capture controller, the
//! result presenter, localization and persisted preferences, and translates
//! messages into side effects like starting a capture, prompting for camera
//! access or resolving an image.

pub mod config;
mod message;
mod navigator;
pub mod paths;
pub mod persisted_state;
mod screen;
mod subscription;
mod update;
mod view;

pub use message::{Flags, Message};
pub use navigator::Navigator;
pub use screen::Screen;

use crate::camera::{CameraDevice, CaptureController, CaptureOutcome, VirtualCamera};
use crate::diagnostics::EventLog;
use crate::error::CaptureError;
use crate::i18n::fluent::I18n;
use crate::media::ImageData;
use crate::ui::result_screen::ResultPresenter;
use crate::ui::theming::ThemeMode;
use config::Config;
use iced::{window, Element, Subscription, Task, Theme};
use persisted_state::AppState;
use std::future::Future;
use std::path::PathBuf;
use std::sync::Arc;

/// Root Iced application state.
pub struct App {
    pub i18n: I18n,
    navigator: Navigator,
    config: Config,
    app_state: AppState,
    /// Data directory override; `None` uses the standard resolution.
    data_dir: Option<PathBuf>,
    pictures_dir: PathBuf,
    device: Arc<dyn CameraDevice>,
    /// Present exactly while the camera screen is the current screen.
    capture: Option<CaptureController>,
    preview: Option<ImageData>,
    last_capture_error: Option<CaptureError>,
    presenter: ResultPresenter,
    events: EventLog,
    theme_mode: ThemeMode,
}

impl std::fmt::Debug for App {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("App")
            .field("screen", self.navigator.current())
            .field("capture", &self.capture)
            .finish_non_exhaustive()
    }
}

pub const WINDOW_DEFAULT_WIDTH: f32 = 480.0;
pub const WINDOW_DEFAULT_HEIGHT: f32 = 800.0;
pub const MIN_WINDOW_WIDTH: f32 = 360.0;
pub const MIN_WINDOW_HEIGHT: f32 = 560.0;

fn window_settings() -> window::Settings {
    window::Settings {
        size: iced::Size::new(WINDOW_DEFAULT_WIDTH, WINDOW_DEFAULT_HEIGHT),
        min_size: Some(iced::Size::new(MIN_WINDOW_WIDTH, MIN_WINDOW_HEIGHT)),
        ..window::Settings::default()
    }
}

/// Entry point used by `main.rs` to launch the Iced application loop.
pub fn run(flags: Flags) -> iced::Result {
    use std::cell::RefCell;

    // iced 0.14 requires an `Fn` boot closure; flags are consumed once
    let boot_state = RefCell::new(Some(flags));
    let boot = move || {
        let flags = boot_state.borrow_mut().take().unwrap_or_default();
        App::new(flags)
    };

    iced::application(boot, App::update, App::view)
        .title(App::title)
        .theme(App::theme)
        .window(window_settings())
        .subscription(App::subscription)
        .run()
}

impl Default for App {
    fn default() -> Self {
        Self::from_parts(
            I18n::default(),
            Config::default(),
            AppState::default(),
            None,
            Arc::new(VirtualCamera::default()),
        )
    }
}

impl App {
    /// Initializes application state from CLI flags and persisted settings.
    fn new(flags: Flags) -> (Self, Task<Message>) {
        let (config, config_warning) = config::load();
        let i18n = I18n::new(flags.lang.clone(), config.general.language.as_deref());
        let (app_state, state_warning) = AppState::load();

        let device = Arc::new(VirtualCamera::with_sensor_rotation(
            config
                .camera
                .sensor_rotation
                .unwrap_or(config::DEFAULT_SENSOR_ROTATION),
        ));

        let mut app = Self::from_parts(i18n, config, app_state, None, device);

        for key in [config_warning, state_warning].into_iter().flatten() {
            tracing::warn!(key, "startup warning");
            app.events
                .record(crate::diagnostics::EventKind::StorageWarning { key });
        }

        let task = match flags.file_path {
            Some(raw) => app.open_startup_image(&raw),
            None => Task::none(),
        };

        (app, task)
    }

    /// Builds an app around an explicit camera device and data directory.
    ///
    /// Settings are defaults and `state.cbor` is read from and written to
    /// `data_dir`, so nothing outside it is touched.
    pub fn with_device(device: Arc<dyn CameraDevice>, data_dir: PathBuf) -> Self {
        let (app_state, warning) = AppState::load_from(Some(data_dir.clone()));
        let mut app = Self::from_parts(
            I18n::default(),
            Config::default(),
            app_state,
            Some(data_dir),
            device,
        );
        if let Some(key) = warning {
            tracing::warn!(key, "state could not be loaded");
            app.events
                .record(crate::diagnostics::EventKind::StorageWarning { key });
        }
        app
    }

    fn from_parts(
        i18n: I18n,
        config: Config,
        app_state: AppState,
        data_dir: Option<PathBuf>,
        device: Arc<dyn CameraDevice>,
    ) -> Self {
        let pictures_dir =
            paths::get_pictures_dir_with_override(config.storage.pictures_dir.clone(), data_dir.clone())
                .unwrap_or_else(|| {
                    let fallback = std::env::temp_dir().join(paths::APP_NAME).join("Pictures");
                    tracing::warn!(dir = %fallback.display(), "no data directory, photos go to temp");
                    fallback
                });
        let theme_mode = config.general.theme_mode;

        Self {
            i18n,
            navigator: Navigator::new(),
            config,
            app_state,
            data_dir,
            pictures_dir,
            device,
            capture: None,
            preview: None,
            last_capture_error: None,
            presenter: ResultPresenter::new(),
            events: EventLog::default(),
            theme_mode,
        }
    }

    /// Opens an image given on the command line directly on the result screen.
    fn open_startup_image(&mut self, raw: &str) -> Task<Message> {
        let locator = if raw.contains("://") {
            crate::media::ImageLocator::parse(raw)
        } else {
            let path = std::path::Path::new(raw);
            let absolute = std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
            crate::media::ImageLocator::from_path(&absolute)
        };

        match locator {
            Ok(locator) => update::show_result(&mut self.update_context(), locator),
            Err(err) => {
                tracing::warn!(%err, input = raw, "ignoring startup image");
                Task::none()
            }
        }
    }

    /// The active screen.
    #[must_use]
    pub fn screen(&self) -> &Screen {
        self.navigator.current()
    }

    #[must_use]
    pub fn navigator(&self) -> &Navigator {
        &self.navigator
    }

    /// Whether the bottom navigation bar is shown.
    #[must_use]
    pub fn shows_bottom_bar(&self) -> bool {
        self.navigator.shows_bottom_bar()
    }

    /// The capture controller, present while the camera screen is shown.
    #[must_use]
    pub fn capture(&self) -> Option<&CaptureController> {
        self.capture.as_ref()
    }

    #[must_use]
    pub fn presenter(&self) -> &ResultPresenter {
        &self.presenter
    }

    #[must_use]
    pub fn events(&self) -> &EventLog {
        &self.events
    }

    #[must_use]
    pub fn app_state(&self) -> &AppState {
        &self.app_state
    }

    #[must_use]
    pub fn pictures_dir(&self) -> &PathBuf {
        &self.pictures_dir
    }

    /// The error shown on the camera screen after a failed capture.
    #[must_use]
    pub fn last_capture_error(&self) -> Option<&CaptureError> {
        self.last_capture_error.as_ref()
    }

    /// Starts a capture on the camera screen.
    ///
    /// The returned future must be driven to completion and its output fed
    /// back as [`Message::CaptureFinished`]. `update` does this through a
    /// task when the shutter is pressed.
    ///
    /// # Errors
    ///
    /// Returns the rejection when no capture could be started; it is logged
    /// and recorded like any other capture failure.
    pub fn begin_capture(
        &mut self,
    ) -> Result<impl Future<Output = CaptureOutcome> + Send + 'static, CaptureError> {
        update::begin_capture(&mut self.update_context())
    }

    fn update_context(&mut self) -> update::UpdateContext<'_> {
        update::UpdateContext {
            navigator: &mut self.navigator,
            config: &self.config,
            app_state: &mut self.app_state,
            data_dir: self.data_dir.as_ref(),
            pictures_dir: &self.pictures_dir,
            device: &self.device,
            capture: &mut self.capture,
            preview: &mut self.preview,
            last_capture_error: &mut self.last_capture_error,
            presenter: &mut self.presenter,
            events: &mut self.events,
            i18n: &self.i18n,
        }
    }

    fn title(&self) -> String {
        let app_name = self.i18n.tr("window-title");
        match self.navigator.current() {
            Screen::Home => app_name,
            Screen::Camera => format!("{} - {}", self.i18n.tr("camera-take-photo"), app_name),
            Screen::ResultDetection { .. } => {
                format!("{} - {}", self.i18n.tr("result-title"), app_name)
            }
        }
    }

    fn theme(&self) -> Theme {
        self.theme_mode.theme()
    }

    fn subscription(&self) -> Subscription<Message> {
        subscription::create_preview_subscription(
            self.capture.as_ref().is_some_and(CaptureController::is_functional),
            self.config.camera.effective_preview_interval_ms(),
        )
    }

    /// Routes a message to its handler.
    pub fn update(&mut self, message: Message) -> Task<Message> {
        let mut ctx = self.update_context();

        match message {
            Message::Home(home_message) => update::handle_home_message(&mut ctx, &home_message),
            Message::Camera(camera_message) => {
                update::handle_camera_message(&mut ctx, &camera_message)
            }
            Message::Result(result_message) => {
                update::handle_result_message(&mut ctx, result_message)
            }
            Message::BottomBar(bar_message) => {
                update::handle_bottom_bar_message(&mut ctx, &bar_message)
            }
            Message::CaptureFinished(outcome) => update::handle_capture_finished(&mut ctx, outcome),
            Message::PermissionAnswered(granted) => {
                update::handle_permission_answered(&mut ctx, granted)
            }
            Message::GalleryPicked(path) => update::handle_gallery_picked(&mut ctx, path),
            Message::PreviewTick(_instant) => update::handle_preview_tick(&mut ctx),
            Message::PreviewFrame(frame) => update::handle_preview_frame(&mut ctx, frame),
        }
    }

    fn view(&self) -> Element<'_, Message> {
        view::view(view::ViewContext {
            i18n: &self.i18n,
            screen: self.navigator.current(),
            capture: self.capture.as_ref(),
            preview: self.preview.as_ref(),
            last_capture_error: self.last_capture_error.as_ref(),
            presenter: &self.presenter,
            events: &self.events,
        })
    }
}
