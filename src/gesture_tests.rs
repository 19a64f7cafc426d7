#[cfg(test)]
mod tests {
    use crate::gesture::{gesture_value, scroll_for_gesture, ScrollDirection};
    use crate::movement::MovementTracker;
    use crate::types::{
        HandLandmarks, MovementDirection, Point3D, LANDMARK_COUNT, PINKY_TIP, THUMB_TIP, WRIST,
    };

    fn hand_with(wrist: (f32, f32), thumb: (f32, f32), pinky: (f32, f32)) -> HandLandmarks {
        let mut points = vec![Point3D::new(0.5, 0.5, 0.0); LANDMARK_COUNT];
        points[WRIST] = Point3D::new(wrist.0, wrist.1, 0.0);
        points[THUMB_TIP] = Point3D::new(thumb.0, thumb.1, 0.0);
        points[PINKY_TIP] = Point3D::new(pinky.0, pinky.1, 0.0);
        HandLandmarks::new(points)
    }

    // =========================================================================
    // Gesture Value
    // =========================================================================

    #[test]
    fn closed_hand_is_zero() {
        // Thumb tip and pinky tip at the same spot -> zero openness
        let hand = hand_with((0.5, 0.5), (0.42, 0.61), (0.42, 0.61));
        assert_eq!(gesture_value(&hand), Some(0.0));
    }

    #[test]
    fn value_is_always_clamped() {
        // Raw L1 distance 1.6 / 0.6 is well above 1, must clamp
        let hand = hand_with((0.5, 0.5), (0.1, 0.1), (0.9, 0.9));
        let v = gesture_value(&hand).unwrap();
        assert!((0.0..=1.0).contains(&v), "value {} escaped [0,1]", v);
        assert_eq!(v, 1.0);
    }

    #[test]
    fn value_is_translation_invariant() {
        // Only the thumb-pinky difference matters, not where the hand is
        let a = hand_with((0.5, 0.5), (0.30, 0.40), (0.45, 0.55));
        let b = hand_with((0.7, 0.2), (0.50, 0.10), (0.65, 0.25));
        assert_eq!(gesture_value(&a), gesture_value(&b));
    }

    #[test]
    fn value_is_quantized_to_one_decimal() {
        // L1 distance 0.25 -> 0.25/0.6 = 0.4166 -> rounds to 0.4
        let hand = hand_with((0.5, 0.5), (0.40, 0.50), (0.50, 0.65));
        assert_eq!(gesture_value(&hand), Some(0.4));
    }

    #[test]
    fn incomplete_landmarks_give_no_value() {
        let hand = HandLandmarks::new(vec![Point3D::default(); 5]);
        assert_eq!(gesture_value(&hand), None);
    }

    // =========================================================================
    // Scroll Mapping
    // Open hand [0.8, 1.0] -> Up, half-closed [0.4, 0.6] -> Down,
    // everything else is a dead zone. Band edges are inclusive.
    // =========================================================================

    #[test]
    fn scroll_bands() {
        assert_eq!(scroll_for_gesture(0.9), Some(ScrollDirection::Up));
        assert_eq!(scroll_for_gesture(0.5), Some(ScrollDirection::Down));
        assert_eq!(scroll_for_gesture(0.7), None);
        assert_eq!(scroll_for_gesture(0.0), None);
    }

    #[test]
    fn scroll_band_edges_are_inclusive() {
        assert_eq!(scroll_for_gesture(0.8), Some(ScrollDirection::Up));
        assert_eq!(scroll_for_gesture(1.0), Some(ScrollDirection::Up));
        assert_eq!(scroll_for_gesture(0.4), Some(ScrollDirection::Down));
        assert_eq!(scroll_for_gesture(0.6), Some(ScrollDirection::Down));
    }

    #[test]
    fn dead_zones_between_bands() {
        assert_eq!(scroll_for_gesture(0.3), None);
        assert_eq!(scroll_for_gesture(0.61), None);
        assert_eq!(scroll_for_gesture(0.79), None);
    }

    // =========================================================================
    // Movement Detection
    // Image coords: x grows right, y grows down. Horizontal wins exact ties.
    // =========================================================================

    fn hand_at(x: f32, y: f32) -> HandLandmarks {
        hand_with((x, y), (x, y), (x, y))
    }

    #[test]
    fn first_frame_is_unknown() {
        let mut tracker = MovementTracker::new(0.005);
        let dir = tracker.update(Some(&hand_at(0.5, 0.5)));
        assert_eq!(dir, MovementDirection::Unknown);
    }

    #[test]
    fn no_hand_is_unknown_and_keeps_baseline() {
        let mut tracker = MovementTracker::new(0.005);
        tracker.update(Some(&hand_at(0.5, 0.5)));
        assert_eq!(tracker.update(None), MovementDirection::Unknown);
        // Baseline survived the dropout: next hand still compares to 0.5,0.5
        assert_eq!(
            tracker.update(Some(&hand_at(0.6, 0.5))),
            MovementDirection::Right
        );
    }

    #[test]
    fn wrist_rising_is_up() {
        let mut tracker = MovementTracker::new(0.005);
        tracker.update(Some(&hand_at(0.50, 0.50)));
        // dy = -0.10, |dy| > |dx| = 0
        assert_eq!(
            tracker.update(Some(&hand_at(0.50, 0.40))),
            MovementDirection::Up
        );
    }

    #[test]
    fn sub_threshold_jitter_is_no_movement() {
        let mut tracker = MovementTracker::new(0.005);
        tracker.update(Some(&hand_at(0.500, 0.500)));
        assert_eq!(
            tracker.update(Some(&hand_at(0.503, 0.503))),
            MovementDirection::None
        );
    }

    #[test]
    fn displacement_exactly_at_threshold_is_no_movement() {
        // Powers of two are exact in f32, so dx/dy land precisely on the
        // threshold and actually exercise the <= rule.
        let mut tracker = MovementTracker::new(0.25);
        tracker.update(Some(&hand_at(0.5, 0.5)));
        assert_eq!(
            tracker.update(Some(&hand_at(0.75, 0.75))),
            MovementDirection::None
        );
        // One axis exactly at threshold, the other idle
        assert_eq!(
            tracker.update(Some(&hand_at(1.0, 0.75))),
            MovementDirection::None
        );
    }

    #[test]
    fn wrist_moving_right() {
        let mut tracker = MovementTracker::new(0.005);
        tracker.update(Some(&hand_at(0.50, 0.50)));
        assert_eq!(
            tracker.update(Some(&hand_at(0.60, 0.50))),
            MovementDirection::Right
        );
    }

    #[test]
    fn wrist_sinking_is_down() {
        let mut tracker = MovementTracker::new(0.005);
        tracker.update(Some(&hand_at(0.50, 0.50)));
        assert_eq!(
            tracker.update(Some(&hand_at(0.50, 0.60))),
            MovementDirection::Down
        );
    }

    #[test]
    fn exact_tie_goes_horizontal() {
        let mut tracker = MovementTracker::new(0.005);
        tracker.update(Some(&hand_at(0.50, 0.50)));
        // |dx| == |dy| == 0.1: horizontal wins the tie
        assert_eq!(
            tracker.update(Some(&hand_at(0.40, 0.40))),
            MovementDirection::Left
        );
    }

    #[test]
    fn update_advances_the_baseline() {
        let mut tracker = MovementTracker::new(0.005);
        tracker.update(Some(&hand_at(0.50, 0.50)));
        tracker.update(Some(&hand_at(0.60, 0.50)));
        // Now the baseline is 0.60; staying put reads as no movement
        assert_eq!(
            tracker.update(Some(&hand_at(0.60, 0.50))),
            MovementDirection::None
        );
    }
}
