use crate::types::Rect;
use anyhow::Result;
use image::{imageops::FilterType, ImageBuffer, Rgb};
use ort::session::{builder::GraphOptimizationLevel, Session};
use ort::value::Tensor;

const INPUT_W: u32 = 192;
const INPUT_H: u32 = 192;

/// Palm detector (MediaPipe palm_detection, SSD-style).
///
/// Finds the strongest palm box in a frame; the landmark pipeline expands it
/// into a hand ROI. Returns coordinates normalized to the frame.
pub struct PalmDetector {
    session: Session,
    anchors: Vec<(f32, f32)>, // cx, cy (all anchors are 1.0 x 1.0)
    score_threshold: f32,
}

impl PalmDetector {
    pub fn new(model_path: &str, score_threshold: f32) -> Result<Self> {
        let session = Session::builder()?
            .with_optimization_level(GraphOptimizationLevel::Level3)?
            .with_intra_threads(4)?
            .with_execution_providers([
                ort::execution_providers::CPUExecutionProvider::default().build(),
            ])?
            .commit_from_file(model_path)?;

        let anchors = generate_anchors();
        Ok(Self {
            session,
            anchors,
            score_threshold,
        })
    }

    pub fn detect(&mut self, frame: &ImageBuffer<Rgb<u8>, Vec<u8>>) -> Result<Option<Rect>> {
        // Preprocess: resize to 192x192, NCHW, pixels scaled to [-1, 1]
        let resized = image::imageops::resize(frame, INPUT_W, INPUT_H, FilterType::Triangle);

        let mut input_data = Vec::with_capacity(3 * (INPUT_W * INPUT_H) as usize);
        for c in 0..3 {
            for y in 0..INPUT_H {
                for x in 0..INPUT_W {
                    let p = resized.get_pixel(x, y)[c];
                    input_data.push((p as f32 - 127.5) / 127.5);
                }
            }
        }

        let input_tensor = Tensor::from_array((
            vec![1, 3, INPUT_H as usize, INPUT_W as usize],
            input_data,
        ))?;
        let outputs = self.session.run(ort::inputs![input_tensor]?)?;

        let (_scores_shape, scores_data) =
            outputs["classificators"].try_extract_raw_tensor::<f32>()?;
        let (_boxes_shape, boxes_data) = outputs["regressors"].try_extract_raw_tensor::<f32>()?;

        Ok(self.post_process(scores_data, boxes_data))
    }

    /// Picks the single best box above the threshold. With max one hand there
    /// is no need for full NMS.
    fn post_process(&self, scores_raw: &[f32], boxes_raw: &[f32]) -> Option<Rect> {
        let mut best_score = self.score_threshold;
        let mut best_rect = None;

        for (i, &(ax, ay)) in self.anchors.iter().enumerate() {
            if i >= scores_raw.len() || (i + 1) * 18 > boxes_raw.len() {
                break;
            }
            let score = sigmoid(scores_raw[i].clamp(-100.0, 100.0));
            if score > best_score {
                // Offsets are in input pixels relative to the anchor center
                let dx = boxes_raw[i * 18] / INPUT_W as f32;
                let dy = boxes_raw[i * 18 + 1] / INPUT_H as f32;
                let w = boxes_raw[i * 18 + 2] / INPUT_W as f32;
                let h = boxes_raw[i * 18 + 3] / INPUT_H as f32;

                let cx = ax + dx;
                let cy = ay + dy;

                best_score = score;
                best_rect = Some(Rect::new(cx - w / 2.0, cy - h / 2.0, w, h));
            }
        }

        best_rect
    }
}

fn sigmoid(x: f32) -> f32 {
    1.0 / (1.0 + (-x).exp())
}

/// SSD anchor grid for the 192x192 palm model: 24x24 cells with 2 anchors
/// (stride 8) plus 12x12 cells with 6 anchors (stride 16), 2016 total.
fn generate_anchors() -> Vec<(f32, f32)> {
    let layers = [(8usize, 2usize), (16, 6)];
    let mut anchors = Vec::new();

    for &(stride, anchors_per_cell) in &layers {
        let cells = INPUT_W as usize / stride;
        for v in 0..cells {
            for u in 0..cells {
                let cx = (u as f32 + 0.5) * stride as f32 / INPUT_W as f32;
                let cy = (v as f32 + 0.5) * stride as f32 / INPUT_H as f32;
                for _ in 0..anchors_per_cell {
                    anchors.push((cx, cy));
                }
            }
        }
    }
    anchors
}
