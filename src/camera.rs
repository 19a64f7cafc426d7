use anyhow::{anyhow, Context, Result};
use colored::*;
use image::{ImageBuffer, Rgb};
use nokhwa::{
    pixel_format::RgbFormat,
    utils::{CameraIndex, RequestedFormat, RequestedFormatType},
    Camera,
};
use thiserror::Error;

/// Consecutive failed reads tolerated before the camera is declared gone.
const MAX_READ_RETRIES: u32 = 30;

#[derive(Debug, Error)]
pub enum CameraError {
    #[error("camera stopped delivering frames after {0} consecutive failed reads")]
    Unavailable(u32),
}

pub struct CameraSource {
    camera: Camera,
    consecutive_failures: u32,
}

impl CameraSource {
    pub fn new(index: u32) -> Result<Self> {
        let cam_index = CameraIndex::Index(index);
        let requested =
            RequestedFormat::new::<RgbFormat>(RequestedFormatType::AbsoluteHighestFrameRate);
        let mut camera =
            Camera::new(cam_index, requested).context("Failed to create camera instance")?;

        camera
            .open_stream()
            .map_err(|e| anyhow!(e))
            .context("Failed to open camera stream")?;

        println!(
            "{}",
            format!("Opened camera: {}", camera.info().human_name()).green()
        );
        println!("Format: {}", camera.camera_format());

        Ok(Self {
            camera,
            consecutive_failures: 0,
        })
    }

    /// Grab and decode one frame.
    ///
    /// A single failed read returns `Ok(None)` so the loop can skip the
    /// iteration, but failures are counted: once `MAX_READ_RETRIES` reads
    /// fail in a row the camera is treated as unavailable and an error is
    /// surfaced instead of spinning forever.
    pub fn capture(&mut self) -> Result<Option<ImageBuffer<Rgb<u8>, Vec<u8>>>> {
        let frame = match self.camera.frame() {
            Ok(f) => f,
            Err(e) => {
                self.consecutive_failures += 1;
                if self.consecutive_failures >= MAX_READ_RETRIES {
                    return Err(CameraError::Unavailable(self.consecutive_failures))
                        .context(format!("last read error: {}", e));
                }
                return Ok(None);
            }
        };

        let decoded = frame
            .decode_image::<RgbFormat>()
            .map_err(|e| anyhow!(e))
            .context("Failed to decode frame")?;
        self.consecutive_failures = 0;
        Ok(Some(decoded))
    }

    pub fn width(&self) -> u32 {
        self.camera.resolution().width()
    }

    pub fn height(&self) -> u32 {
        self.camera.resolution().height()
    }

    pub fn name(&self) -> String {
        self.camera.info().human_name()
    }
}

impl Drop for CameraSource {
    fn drop(&mut self) {
        // nokhwa closes the device on drop; stopping the stream first avoids
        // a v4l warning on some backends.
        let _ = self.camera.stop_stream();
    }
}
