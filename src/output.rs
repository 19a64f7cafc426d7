use anyhow::Result;
use image::{ImageBuffer, Rgb};

use crate::config::UiConfig;
use crate::types::{HandLandmarks, HAND_CONNECTIONS};

pub struct WindowOutput {
    window: minifb::Window,
    buffer: Vec<u32>,
    width: usize,
    height: usize,
}

impl WindowOutput {
    pub fn new(title: &str, width: usize, height: usize) -> Result<Self> {
        let mut window = minifb::Window::new(
            title,
            width,
            height,
            minifb::WindowOptions {
                resize: true,
                ..minifb::WindowOptions::default()
            },
        )
        .map_err(|e| anyhow::anyhow!("Failed to create window: {}", e))?;

        window.limit_update_rate(Some(std::time::Duration::from_micros(16600))); // ~60 FPS

        Ok(Self {
            window,
            buffer: vec![0; width * height],
            width,
            height,
        })
    }

    pub fn is_open(&self) -> bool {
        self.window.is_open()
    }

    pub fn is_key_down(&self, key: minifb::Key) -> bool {
        self.window.is_key_down(key)
    }

    /// Copy the frame into the window buffer, draw the hand overlay on top
    /// and present.
    pub fn handle_frame(
        &mut self,
        frame: &ImageBuffer<Rgb<u8>, Vec<u8>>,
        landmarks: Option<&HandLandmarks>,
        ui: &UiConfig,
        color: (u8, u8, u8),
    ) -> Result<()> {
        let target_w = frame.width() as usize;
        let target_h = frame.height() as usize;

        if target_w != self.width || target_h != self.height {
            self.width = target_w;
            self.height = target_h;
        }
        if self.buffer.len() != self.width * self.height {
            self.buffer.resize(self.width * self.height, 0);
        }

        // Copy frame to buffer (RGB8 -> 0RGB)
        for (i, pixel) in frame.pixels().enumerate() {
            if i >= self.buffer.len() {
                break;
            }
            let r = pixel[0] as u32;
            let g = pixel[1] as u32;
            let b = pixel[2] as u32;
            self.buffer[i] = (r << 16) | (g << 8) | b;
        }

        if let Some(lm) = landmarks {
            let rgb = ((color.0 as u32) << 16) | ((color.1 as u32) << 8) | color.2 as u32;

            // Landmarks are normalized; scale to window pixels
            let (win_w, win_h) = (self.width, self.height);
            let to_px = move |nx: f32, ny: f32| -> (i32, i32) {
                ((nx * win_w as f32) as i32, (ny * win_h as f32) as i32)
            };

            if ui.draw_connections {
                for &(a, b) in HAND_CONNECTIONS.iter() {
                    if let (Some(pa), Some(pb)) = (lm.points.get(a), lm.points.get(b)) {
                        let (x0, y0) = to_px(pa.x, pa.y);
                        let (x1, y1) = to_px(pb.x, pb.y);
                        self.draw_line(x0, y0, x1, y1, rgb);
                    }
                }
            }

            let dot = ui.landmark_dot_size.max(1);
            for p in &lm.points {
                let (px, py) = to_px(p.x, p.y);
                for dy in 0..dot {
                    for dx in 0..dot {
                        self.draw_point(px + dx as i32, py + dy as i32, rgb);
                    }
                }
            }
        }

        self.window
            .update_with_buffer(&self.buffer, self.width, self.height)
            .map_err(|e| anyhow::anyhow!("Window update failed: {}", e))?;

        Ok(())
    }

    fn draw_point(&mut self, x: i32, y: i32, color: u32) {
        if x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height {
            let idx = y as usize * self.width + x as usize;
            if idx < self.buffer.len() {
                self.buffer[idx] = color;
            }
        }
    }

    // Bresenham
    fn draw_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: u32) {
        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;
        let (mut x, mut y) = (x0, y0);

        loop {
            self.draw_point(x, y, color);
            if x == x1 && y == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }
}
