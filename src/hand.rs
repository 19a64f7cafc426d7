use anyhow::Result;
use image::{imageops::FilterType, ImageBuffer, Rgb};
use ort::session::{builder::GraphOptimizationLevel, Session};
use ort::value::Tensor;
use std::path::Path;

use crate::detector::PalmDetector;
use crate::pipeline::Pipeline;
use crate::types::{HandLandmarks, Point3D, Rect, LANDMARK_COUNT};

const INPUT_SIZE: u32 = 224;

/// Hand landmark pipeline (MediaPipe 21-point convention), streaming mode.
///
/// Frame flow: palm detection proposes an ROI, the landmark model refines it.
/// While the model's presence score stays above the tracking threshold the
/// next ROI is derived from the previous frame's landmarks and palm detection
/// is skipped, which is what keeps this usable at webcam rates.
pub struct HandLandmarkPipeline {
    landmark_session: Session,
    palm_detector: Option<PalmDetector>,
    tracking_confidence: f32,
    tracked_roi: Option<Rect>,
}

impl HandLandmarkPipeline {
    pub fn new(
        landmark_model: &str,
        palm_model: &str,
        detection_confidence: f32,
        tracking_confidence: f32,
    ) -> Result<Self> {
        let palm_detector = if Path::new(palm_model).exists() {
            println!("Loading Palm Detector...");
            Some(PalmDetector::new(palm_model, detection_confidence)?)
        } else {
            println!("Palm Detector not found. Running landmark model on full frames.");
            None
        };

        println!("Loading Hand Landmarks from {}...", landmark_model);
        let landmark_session = Session::builder()?
            .with_optimization_level(GraphOptimizationLevel::Level3)?
            .with_intra_threads(4)?
            .with_execution_providers([
                ort::execution_providers::CPUExecutionProvider::default().build(),
            ])?
            .commit_from_file(landmark_model)?;

        Ok(Self {
            landmark_session,
            palm_detector,
            tracking_confidence,
            tracked_roi: None,
        })
    }

    /// Expand a palm box into a hand ROI: the palm is roughly the lower third
    /// of the hand, so scale up and shift toward the fingers.
    fn palm_to_hand_roi(palm: Rect) -> Rect {
        let cx = palm.x + palm.width / 2.0;
        let cy = palm.y + palm.height / 2.0 - palm.height * 0.5;
        let size = palm.width.max(palm.height) * 2.6;
        Rect::new(cx - size / 2.0, cy - size / 2.0, size, size)
    }

    /// ROI for the next frame from this frame's landmarks: their bounding
    /// box, squared and padded.
    fn landmarks_to_roi(landmarks: &HandLandmarks) -> Rect {
        let mut min_x = f32::MAX;
        let mut min_y = f32::MAX;
        let mut max_x = f32::MIN;
        let mut max_y = f32::MIN;
        for p in &landmarks.points {
            min_x = min_x.min(p.x);
            min_y = min_y.min(p.y);
            max_x = max_x.max(p.x);
            max_y = max_y.max(p.y);
        }
        let cx = (min_x + max_x) / 2.0;
        let cy = (min_y + max_y) / 2.0;
        let size = (max_x - min_x).max(max_y - min_y) * 1.6;
        Rect::new(cx - size / 2.0, cy - size / 2.0, size, size)
    }

    /// Clip a normalized ROI to the frame and return pixel crop bounds.
    fn clip_to_frame(roi: Rect, width: u32, height: u32) -> Option<(u32, u32, u32, u32)> {
        let w = width as f32;
        let h = height as f32;
        let x0 = (roi.x * w).max(0.0);
        let y0 = (roi.y * h).max(0.0);
        let x1 = ((roi.x + roi.width) * w).min(w);
        let y1 = ((roi.y + roi.height) * h).min(h);
        if x1 - x0 < 8.0 || y1 - y0 < 8.0 {
            return None;
        }
        Some((x0 as u32, y0 as u32, (x1 - x0) as u32, (y1 - y0) as u32))
    }

    fn infer_crop(
        &mut self,
        crop: &ImageBuffer<Rgb<u8>, Vec<u8>>,
    ) -> Result<(Vec<Point3D>, f32)> {
        let resized = image::imageops::resize(crop, INPUT_SIZE, INPUT_SIZE, FilterType::Triangle);

        // NCHW, pixels scaled to [0, 1]
        let mut input_data = Vec::with_capacity(3 * (INPUT_SIZE * INPUT_SIZE) as usize);
        for c in 0..3 {
            for y in 0..INPUT_SIZE {
                for x in 0..INPUT_SIZE {
                    input_data.push(resized.get_pixel(x, y)[c] as f32 / 255.0);
                }
            }
        }

        let input_tensor = Tensor::from_array((
            vec![1, 3, INPUT_SIZE as usize, INPUT_SIZE as usize],
            input_data,
        ))?;
        let outputs = self.landmark_session.run(ort::inputs![input_tensor]?)?;

        // Output 0: 63 floats (21 x [x, y, z] in input pixels)
        // Output 1: hand presence score
        let (_lm_shape, lm_data) = outputs[0].try_extract_raw_tensor::<f32>()?;
        let (_score_shape, score_data) = outputs[1].try_extract_raw_tensor::<f32>()?;

        let presence = score_data.first().copied().unwrap_or(0.0);

        let mut points = Vec::with_capacity(LANDMARK_COUNT);
        for i in 0..LANDMARK_COUNT {
            if (i + 1) * 3 > lm_data.len() {
                break;
            }
            points.push(Point3D::new(
                lm_data[i * 3] / INPUT_SIZE as f32,
                lm_data[i * 3 + 1] / INPUT_SIZE as f32,
                lm_data[i * 3 + 2] / INPUT_SIZE as f32,
            ));
        }

        Ok((points, presence))
    }
}

impl Pipeline for HandLandmarkPipeline {
    fn name(&self) -> String {
        "Hand Landmarks (21 pts)".to_string()
    }

    fn process(&mut self, frame: &ImageBuffer<Rgb<u8>, Vec<u8>>) -> Result<Option<HandLandmarks>> {
        // 1. Choose an ROI: tracked from last frame, else palm detection,
        //    else the full frame when no detector model is present.
        let roi = match self.tracked_roi {
            Some(r) => Some(r),
            None => {
                if let Some(det) = &mut self.palm_detector {
                    det.detect(frame)?.map(Self::palm_to_hand_roi)
                } else {
                    Some(Rect::new(0.0, 0.0, 1.0, 1.0))
                }
            }
        };

        let Some(roi) = roi else {
            // No palm in frame
            self.tracked_roi = None;
            return Ok(None);
        };

        let Some((px, py, pw, ph)) = Self::clip_to_frame(roi, frame.width(), frame.height())
        else {
            self.tracked_roi = None;
            return Ok(None);
        };

        // 2. Crop and run the landmark model
        let crop = image::imageops::crop_imm(frame, px, py, pw, ph).to_image();
        let (crop_points, presence) = self.infer_crop(&crop)?;

        if presence < self.tracking_confidence || crop_points.len() < LANDMARK_COUNT {
            // Lost the hand; next frame re-runs palm detection
            self.tracked_roi = None;
            return Ok(None);
        }

        // 3. Map crop-normalized points back to frame-normalized coords
        let fw = frame.width() as f32;
        let fh = frame.height() as f32;
        let points: Vec<Point3D> = crop_points
            .iter()
            .map(|p| {
                Point3D::new(
                    (px as f32 + p.x * pw as f32) / fw,
                    (py as f32 + p.y * ph as f32) / fh,
                    p.z,
                )
            })
            .collect();

        let landmarks = HandLandmarks::new(points);
        self.tracked_roi = Some(Self::landmarks_to_roi(&landmarks));

        Ok(Some(landmarks))
    }
}
