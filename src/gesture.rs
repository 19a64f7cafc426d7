use crate::types::{HandLandmarks, PINKY_TIP, THUMB_TIP};

/// Span of the raw thumb-pinky L1 distance that maps to a fully open hand.
pub const OPENNESS_SPAN: f32 = 0.6;

/// Hand openness in [0,1], quantized to one decimal.
///
/// L1 distance between thumb tip and pinky tip (x/y only, landmarks are
/// normalized frame coords), divided by the span, rounded to one decimal
/// and then clamped. Round-before-clamp matters: a raw ratio of 1.04
/// rounds to 1.0 and stays in band, it is not truncated first.
#[allow(dead_code)]
pub fn gesture_value(landmarks: &HandLandmarks) -> Option<f32> {
    gesture_value_with_span(landmarks, OPENNESS_SPAN)
}

pub fn gesture_value_with_span(landmarks: &HandLandmarks, span: f32) -> Option<f32> {
    if !landmarks.is_complete() {
        return None;
    }
    let thumb = landmarks.points[THUMB_TIP];
    let pinky = landmarks.points[PINKY_TIP];

    let distance = (thumb.x - pinky.x).abs() + (thumb.y - pinky.y).abs();
    let value = ((distance / span) * 10.0).round() / 10.0;

    Some(value.clamp(0.0, 1.0))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollDirection {
    Up,
    Down,
}

/// Static threshold table mapping gesture value to a scroll action.
///
/// Open hand [0.8, 1.0] scrolls up, half-closed [0.4, 0.6] scrolls down.
/// Both band edges are inclusive. The gaps are dead zones so that
/// landmark jitter around a band edge doesn't fire spurious scrolls.
pub fn scroll_for_gesture(value: f32) -> Option<ScrollDirection> {
    if (0.8..=1.0).contains(&value) {
        Some(ScrollDirection::Up)
    } else if (0.4..=0.6).contains(&value) {
        Some(ScrollDirection::Down)
    } else {
        None
    }
}
