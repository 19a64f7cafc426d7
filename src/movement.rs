use crate::types::{HandLandmarks, MovementDirection, Point3D};

/// Default wrist displacement (normalized coords) below which movement is ignored.
pub const DEFAULT_MOVEMENT_THRESHOLD: f32 = 0.005;

/// Tracks the previous frame's landmarks and classifies wrist movement.
///
/// Holds the single piece of cross-frame state in the app. `update` both
/// classifies and advances the state, so the main loop stays stateless.
pub struct MovementTracker {
    previous: Option<HandLandmarks>,
    threshold: f32,
}

impl MovementTracker {
    pub fn new(threshold: f32) -> Self {
        Self {
            previous: None,
            threshold,
        }
    }

    /// Classify movement of `current` relative to the stored previous frame,
    /// then store `current` as the new reference.
    ///
    /// A frame with no hand leaves the stored reference untouched, so a brief
    /// detection dropout doesn't reset the comparison baseline.
    pub fn update(&mut self, current: Option<&HandLandmarks>) -> MovementDirection {
        let Some(current) = current else {
            return MovementDirection::Unknown;
        };
        let direction = match (current.wrist(), self.wrist()) {
            (Some(cur), Some(prev)) => classify(cur, prev, self.threshold),
            _ => MovementDirection::Unknown,
        };
        self.previous = Some(current.clone());
        direction
    }

    fn wrist(&self) -> Option<&Point3D> {
        self.previous.as_ref().and_then(|p| p.wrist())
    }
}

/// Image coordinate convention: x grows right, y grows down.
/// Horizontal wins exact |dx| == |dy| ties.
fn classify(current: &Point3D, previous: &Point3D, threshold: f32) -> MovementDirection {
    let dx = current.x - previous.x;
    let dy = current.y - previous.y;

    if dx.abs() <= threshold && dy.abs() <= threshold {
        return MovementDirection::None;
    }

    if dx.abs() >= dy.abs() {
        if dx > 0.0 {
            MovementDirection::Right
        } else {
            MovementDirection::Left
        }
    } else if dy > 0.0 {
        MovementDirection::Down
    } else {
        MovementDirection::Up
    }
}
