// SPDX-License-Identifier: MPL-2.0
//! A built-in camera device producing test-pattern frames.
//!
//! Lets the application run on machines without camera bindings. Front and
//! back cameras render different tints, and every capture carries the
//! configured sensor rotation so orientation correction is exercised end to
//! end. Faults can be injected for the next capture.

use super::{CameraDevice, CameraFacing, CapturedFrame, HardwareError};
use crate::app::config::DEFAULT_SENSOR_ROTATION;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

const DEFAULT_CAPTURE_WIDTH: u32 = 640;
const DEFAULT_CAPTURE_HEIGHT: u32 = 480;
const PREVIEW_DIVISOR: u32 = 2;

#[derive(Debug)]
pub struct VirtualCamera {
    width: u32,
    height: u32,
    sensor_rotation: i32,
    active_preview: Mutex<Option<CameraFacing>>,
    pending_fault: Mutex<Option<String>>,
    frame_counter: AtomicU32,
}

impl Default for VirtualCamera {
    fn default() -> Self {
        Self::new(DEFAULT_CAPTURE_WIDTH, DEFAULT_CAPTURE_HEIGHT, DEFAULT_SENSOR_ROTATION)
    }
}

impl VirtualCamera {
    /// Creates a device capturing `width`x`height` stills in sensor
    /// orientation, each tagged with `sensor_rotation` degrees.
    #[must_use]
    pub fn new(width: u32, height: u32, sensor_rotation: i32) -> Self {
        Self {
            width: width.max(1),
            height: height.max(1),
            sensor_rotation,
            active_preview: Mutex::new(None),
            pending_fault: Mutex::new(None),
            frame_counter: AtomicU32::new(0),
        }
    }

    /// Default resolution with a custom sensor rotation.
    #[must_use]
    pub fn with_sensor_rotation(sensor_rotation: i32) -> Self {
        Self::new(DEFAULT_CAPTURE_WIDTH, DEFAULT_CAPTURE_HEIGHT, sensor_rotation)
    }

    /// Makes the next `capture` call fail with `message`.
    pub fn fail_next_capture(&self, message: impl Into<String>) {
        if let Ok(mut fault) = self.pending_fault.lock() {
            *fault = Some(message.into());
        }
    }

    /// Camera whose preview stream is currently running.
    #[must_use]
    pub fn active_preview(&self) -> Option<CameraFacing> {
        self.active_preview.lock().ok().and_then(|guard| *guard)
    }

    fn render(&self, facing: CameraFacing, width: u32, height: u32) -> CapturedFrame {
        let tick = self.frame_counter.fetch_add(1, Ordering::Relaxed);
        let bar_x = tick % width;
        let (tint_r, tint_b) = match facing {
            CameraFacing::Front => (200u32, 60u32),
            CameraFacing::Back => (40u32, 190u32),
        };

        let mut pixels = Vec::with_capacity((width * height * 4) as usize);
        for y in 0..height {
            for x in 0..width {
                if x == bar_x {
                    pixels.extend_from_slice(&[255, 255, 255, 255]);
                    continue;
                }
                let r = (tint_r * x / width) as u8;
                let g = (255 * y / height) as u8;
                let b = tint_b as u8;
                pixels.extend_from_slice(&[r, g, b, 255]);
            }
        }

        CapturedFrame {
            width,
            height,
            pixels,
            rotation_degrees: self.sensor_rotation,
        }
    }
}

impl CameraDevice for VirtualCamera {
    fn start_preview(&self, facing: CameraFacing) -> Result<(), HardwareError> {
        let mut active = self
            .active_preview
            .lock()
            .map_err(|_| HardwareError::new("preview state poisoned"))?;
        *active = Some(facing);
        Ok(())
    }

    fn stop_preview(&self) {
        if let Ok(mut active) = self.active_preview.lock() {
            *active = None;
        }
    }

    fn preview_frame(&self, facing: CameraFacing) -> Result<CapturedFrame, HardwareError> {
        if self.active_preview() != Some(facing) {
            return Err(HardwareError::new("preview is not running"));
        }
        Ok(self.render(
            facing,
            (self.width / PREVIEW_DIVISOR).max(1),
            (self.height / PREVIEW_DIVISOR).max(1),
        ))
    }

    fn capture(&self, facing: CameraFacing) -> Result<CapturedFrame, HardwareError> {
        let fault = self
            .pending_fault
            .lock()
            .map_err(|_| HardwareError::new("fault state poisoned"))?
            .take();
        if let Some(message) = fault {
            return Err(HardwareError::new(message));
        }
        Ok(self.render(facing, self.width, self.height))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capture_carries_sensor_rotation() {
        let camera = VirtualCamera::new(16, 8, 270);
        let frame = camera.capture(CameraFacing::Back).expect("capture");
        assert_eq!(frame.rotation_degrees, 270);
        assert_eq!((frame.width, frame.height), (16, 8));
        assert_eq!(frame.pixels.len(), 16 * 8 * 4);
    }

    #[test]
    fn injected_fault_fails_only_next_capture() {
        let camera = VirtualCamera::new(4, 4, 0);
        camera.fail_next_capture("shutter jammed");

        let err = camera.capture(CameraFacing::Back).unwrap_err();
        assert_eq!(err.message(), "shutter jammed");
        assert!(camera.capture(CameraFacing::Back).is_ok());
    }

    #[test]
    fn preview_requires_running_stream() {
        let camera = VirtualCamera::new(8, 8, 0);
        assert!(camera.preview_frame(CameraFacing::Back).is_err());

        camera.start_preview(CameraFacing::Back).unwrap();
        let frame = camera.preview_frame(CameraFacing::Back).expect("preview");
        assert_eq!((frame.width, frame.height), (4, 4));
        assert!(camera.preview_frame(CameraFacing::Front).is_err());
    }

    #[test]
    fn front_and_back_render_differently() {
        let camera = VirtualCamera::new(8, 8, 0);
        let front = camera.capture(CameraFacing::Front).unwrap();
        let back = camera.capture(CameraFacing::Back).unwrap();
        assert_ne!(front.pixels, back.pixels);
    }
}
