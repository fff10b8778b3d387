// SPDX-License-Identifier: MPL-2.0
//! End-to-end scenarios across navigation, capture and result display.

use gowisata::app::{App, Message, Screen};
use gowisata::camera::{CameraDevice, VirtualCamera};
use gowisata::diagnostics::EventKind;
use gowisata::error::{CaptureError, ImageResolutionError};
use gowisata::media::{loader, ImageLocator};
use gowisata::ui::result_screen::{self, ImageArea};
use gowisata::ui::{camera_screen, home};
use std::path::Path;
use std::sync::Arc;
use tempfile::tempdir;
use tracing_test::traced_test;

fn camera_app(dir: &Path, device: Arc<dyn CameraDevice>) -> App {
    let mut app = App::with_device(device, dir.to_path_buf());
    let _ = app.update(Message::Home(home::Message::OpenCamera));
    let _ = app.update(Message::PermissionAnswered(true));
    app
}

async fn capture(app: &mut App) {
    let outcome = app.begin_capture().expect("capture starts").await;
    let _ = app.update(Message::CaptureFinished(outcome));
}

#[tokio::test]
async fn capture_with_rotation_lands_on_result_screen() {
    let dir = tempdir().expect("temp dir");
    let device = Arc::new(VirtualCamera::new(64, 48, 90));
    let mut app = camera_app(dir.path(), device);

    capture(&mut app).await;

    let Screen::ResultDetection { locator } = app.screen().clone() else {
        panic!("expected result screen, got {:?}", app.screen());
    };
    assert!(!app.shows_bottom_bar());

    let path = locator.to_file_path().expect("file locator");
    assert!(path.starts_with(app.pictures_dir()));
    assert!(std::fs::metadata(&path).expect("photo exists").len() > 0);
    assert_eq!(path.extension().and_then(|e| e.to_str()), Some("jpg"));

    // rotated upright: 64x48 sensor frame becomes 48x64
    let (width, height) = image_rs::image_dimensions(&path).expect("decodable jpeg");
    assert_eq!((width, height), (48, 64));

    assert_eq!(app.presenter().locator(), Some(&locator));
    assert!(matches!(
        app.events().latest().map(|e| &e.kind),
        Some(EventKind::CaptureSaved { .. })
    ));
}

#[tokio::test]
async fn route_of_result_screen_round_trips() {
    let dir = tempdir().expect("temp dir");
    let mut app = camera_app(dir.path(), Arc::new(VirtualCamera::default()));

    capture(&mut app).await;

    let route = app.screen().route();
    assert!(route.starts_with("result-detection?uri=file%3A%2F%2F"));
    assert_eq!(Screen::from_route(&route).as_ref(), Ok(app.screen()));
}

#[tokio::test]
#[traced_test]
async fn persistence_failure_stays_on_camera() {
    let dir = tempdir().expect("temp dir");
    // a file where the pictures directory should be
    std::fs::write(dir.path().join("Pictures"), b"blocker").expect("write blocker");
    let mut app = camera_app(dir.path(), Arc::new(VirtualCamera::default()));

    capture(&mut app).await;

    assert_eq!(app.screen(), &Screen::Camera);
    assert!(matches!(
        app.last_capture_error(),
        Some(CaptureError::Persistence(_))
    ));
    assert!(app.presenter().locator().is_none());
    assert!(app
        .events()
        .latest_error()
        .is_some_and(|e| matches!(e.kind, EventKind::CaptureFailed { .. })));
    assert!(logs_contain("capture failed"));
}

#[tokio::test]
async fn hardware_failure_is_retryable() {
    let dir = tempdir().expect("temp dir");
    let device = Arc::new(VirtualCamera::default());
    device.fail_next_capture("sensor timeout");
    let mut app = camera_app(dir.path(), device);

    capture(&mut app).await;
    assert_eq!(app.screen(), &Screen::Camera);
    assert!(matches!(
        app.last_capture_error(),
        Some(CaptureError::HardwareCapture(msg)) if msg.contains("sensor timeout")
    ));

    capture(&mut app).await;
    assert!(matches!(app.screen(), Screen::ResultDetection { .. }));
}

#[tokio::test]
async fn second_capture_while_busy_is_rejected() {
    let dir = tempdir().expect("temp dir");
    let mut app = camera_app(dir.path(), Arc::new(VirtualCamera::default()));

    let first = app.begin_capture().expect("first capture starts");
    let second = app.begin_capture();
    assert!(matches!(second, Err(CaptureError::Busy)));

    let outcome = first.await;
    let _ = app.update(Message::CaptureFinished(outcome));
    assert!(matches!(app.screen(), Screen::ResultDetection { .. }));
}

#[tokio::test]
async fn outcome_after_leaving_camera_is_ignored() {
    let dir = tempdir().expect("temp dir");
    let mut app = camera_app(dir.path(), Arc::new(VirtualCamera::default()));

    let pending = app.begin_capture().expect("capture starts");
    let _ = app.update(Message::Camera(camera_screen::Message::Back));
    let _ = app.update(Message::Home(home::Message::OpenCamera));

    let _ = app.update(Message::CaptureFinished(pending.await));

    assert_eq!(app.screen(), &Screen::Camera);
    assert!(app.last_capture_error().is_none());
}

#[tokio::test]
async fn missing_image_shows_placeholder_and_back_works() {
    let dir = tempdir().expect("temp dir");
    let mut app = camera_app(dir.path(), Arc::new(VirtualCamera::default()));
    capture(&mut app).await;

    let Screen::ResultDetection { locator } = app.screen().clone() else {
        panic!("expected result screen");
    };
    std::fs::remove_file(locator.to_file_path().expect("file path")).expect("remove photo");

    let result = loader::resolve(locator.clone()).await;
    assert!(matches!(result, Err(ImageResolutionError::NotFound(_))));
    let _ = app.update(Message::Result(result_screen::Message::ImageResolved {
        locator,
        result,
    }));

    assert!(matches!(
        app.presenter().image(),
        Some(ImageArea::Unavailable(ImageResolutionError::NotFound(_)))
    ));

    let _ = app.update(Message::Result(result_screen::Message::Back));
    assert_eq!(app.screen(), &Screen::Camera);
    let _ = app.update(Message::Camera(camera_screen::Message::Back));
    assert_eq!(app.screen(), &Screen::Home);
    assert!(app.shows_bottom_bar());
}

#[tokio::test]
async fn resolved_capture_is_ready() {
    let dir = tempdir().expect("temp dir");
    let mut app = camera_app(dir.path(), Arc::new(VirtualCamera::new(32, 16, 0)));
    capture(&mut app).await;

    let locator = app.presenter().locator().cloned().expect("presented");
    let result = loader::resolve(locator.clone()).await;
    let _ = app.update(Message::Result(result_screen::Message::ImageResolved {
        locator,
        result,
    }));

    match app.presenter().image() {
        Some(ImageArea::Ready(data)) => assert_eq!((data.width, data.height), (32, 16)),
        other => panic!("expected ready image, got {other:?}"),
    }
}

#[tokio::test]
async fn unsupported_locator_scheme_is_reported() {
    let locator = ImageLocator::parse("content://media/external/images/1").expect("locator");
    let result = loader::resolve(locator).await;
    assert_eq!(
        result.err(),
        Some(ImageResolutionError::UnsupportedScheme("content".into()))
    );
}
