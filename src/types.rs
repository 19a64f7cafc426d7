/// Represents a single 3D point in normalized frame coordinates ([0,1] on x/y).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point3D {
    pub x: f32,
    pub y: f32,
    #[allow(dead_code)]
    pub z: f32,
}

impl Point3D {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
}

// MediaPipe hand landmark indices (21 points per hand)
pub const WRIST: usize = 0;
pub const THUMB_TIP: usize = 4;
#[allow(dead_code)]
pub const INDEX_TIP: usize = 8;
#[allow(dead_code)]
pub const MIDDLE_TIP: usize = 12;
#[allow(dead_code)]
pub const RING_TIP: usize = 16;
pub const PINKY_TIP: usize = 20;

pub const LANDMARK_COUNT: usize = 21;

/// Skeleton edges for drawing the hand overlay (MediaPipe convention).
pub const HAND_CONNECTIONS: [(usize, usize); 21] = [
    // Thumb
    (0, 1),
    (1, 2),
    (2, 3),
    (3, 4),
    // Index
    (0, 5),
    (5, 6),
    (6, 7),
    (7, 8),
    // Middle
    (5, 9),
    (9, 10),
    (10, 11),
    (11, 12),
    // Ring
    (9, 13),
    (13, 14),
    (14, 15),
    (15, 16),
    // Pinky + palm edge
    (13, 17),
    (0, 17),
    (17, 18),
    (18, 19),
    (19, 20),
];

/// Result of a hand landmark inference for one frame.
#[derive(Debug, Clone, Default)]
pub struct HandLandmarks {
    pub points: Vec<Point3D>,
}

impl HandLandmarks {
    pub fn new(points: Vec<Point3D>) -> Self {
        Self { points }
    }

    pub fn is_complete(&self) -> bool {
        self.points.len() >= LANDMARK_COUNT
    }

    pub fn wrist(&self) -> Option<&Point3D> {
        self.points.get(WRIST)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }
}

/// Coarse wrist movement between two consecutive frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MovementDirection {
    Right,
    Left,
    Up,
    Down,
    /// Hand seen in both frames but displacement below the threshold.
    None,
    /// No previous (or current) landmarks to compare against.
    Unknown,
}

impl std::fmt::Display for MovementDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            MovementDirection::Right => "Hand is moving right",
            MovementDirection::Left => "Hand is moving left",
            MovementDirection::Up => "Hand is moving up",
            MovementDirection::Down => "Hand is moving down",
            MovementDirection::None => "No significant hand movement",
            MovementDirection::Unknown => "No hand movement",
        };
        write!(f, "{}", s)
    }
}
