use crate::types::{HandLandmarks, Point3D, LANDMARK_COUNT};
use anyhow::Result;
use image::{ImageBuffer, Rgb};

pub trait Pipeline {
    fn name(&self) -> String;
    /// Run inference on one frame. At most one hand is reported.
    /// Landmarks come back in normalized frame coordinates.
    fn process(&mut self, frame: &ImageBuffer<Rgb<u8>, Vec<u8>>) -> Result<Option<HandLandmarks>>;
}

// Synthetic pipeline when the ONNX models are not available.
// Produces a hand that slowly opens/closes and drifts in a circle, which is
// enough to exercise the gesture value, scroll bands and movement detection.
pub struct DummyPipeline {
    frame_count: u32,
}

impl DummyPipeline {
    pub fn new() -> Self {
        Self { frame_count: 0 }
    }
}

impl Pipeline for DummyPipeline {
    fn name(&self) -> String {
        "No ONNX (Simulated Hand)".to_string()
    }

    fn process(&mut self, _frame: &ImageBuffer<Rgb<u8>, Vec<u8>>) -> Result<Option<HandLandmarks>> {
        self.frame_count += 1;
        let t = (self.frame_count as f32) * 0.05;

        // Wrist drifts in a slow circle around frame center
        let cx = 0.5 + t.cos() * 0.1;
        let cy = 0.5 + t.sin() * 0.1;

        // Openness oscillates between a closed fist and a spread hand
        let spread = 0.15 + 0.15 * (t * 0.5).sin().abs();

        // Fan 21 points out from the wrist. Fingertips (indices 4, 8, 12,
        // 16, 20) sit at full spread, intermediate joints proportionally in.
        let mut points = Vec::with_capacity(LANDMARK_COUNT);
        points.push(Point3D::new(cx, cy, 0.0));
        for finger in 0..5 {
            let angle = -1.2 + finger as f32 * 0.6;
            for joint in 1..=4 {
                let r = spread * joint as f32 / 4.0;
                points.push(Point3D::new(
                    cx + angle.sin() * r,
                    cy - angle.cos() * r,
                    0.0,
                ));
            }
        }

        Ok(Some(HandLandmarks::new(points)))
    }
}
