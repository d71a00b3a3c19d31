use blinkscroll_common::config::DetectionConfig;
use blinkscroll_gesture_core::ratio::{eye_aspect_ratio, mouth_aspect_ratio};
use blinkscroll_gesture_core::{DebouncedTrigger, GestureCoordinator, TriggerState};
use blinkscroll_landmark_model::face::FaceLandmarks;
use blinkscroll_landmark_model::point::Point2D;
use blinkscroll_landmark_model::scroll::{ScrollDirection, ScrollEvent};
use proptest::prelude::*;

/// Eye landmarks sampled from an ellipse with semi-axes `a` (horizontal)
/// and `b` (vertical), symmetric top/bottom.
fn ellipse_eye(a: f64, b: f64) -> Vec<Point2D> {
    let vertical = b * (0.75_f64).sqrt();
    vec![
        Point2D::new(-a, 0.0),
        Point2D::new(-a / 2.0, -vertical),
        Point2D::new(a / 2.0, -vertical),
        Point2D::new(a, 0.0),
        Point2D::new(a / 2.0, vertical),
        Point2D::new(-a / 2.0, vertical),
    ]
}

fn eye_with_ratio(ratio: f64) -> Vec<Point2D> {
    let h = ratio / 2.0;
    vec![
        Point2D::new(10.0, 20.0),
        Point2D::new(10.3, 20.0 - h),
        Point2D::new(10.7, 20.0 - h),
        Point2D::new(11.0, 20.0),
        Point2D::new(10.7, 20.0 + h),
        Point2D::new(10.3, 20.0 + h),
    ]
}

fn mouth_with_ratio(ratio: f64) -> Vec<Point2D> {
    vec![
        Point2D::new(0.0, 0.5 * ratio),
        Point2D::new(0.5, 0.0),
        Point2D::new(1.0, 0.5 * ratio),
        Point2D::new(0.5, ratio),
    ]
}

fn face(ear: f64, mar: f64) -> FaceLandmarks {
    FaceLandmarks::new(eye_with_ratio(ear), eye_with_ratio(ear), mouth_with_ratio(mar))
}

#[test]
fn blink_sequence_scrolls_down_once_on_third_frame() {
    let config = DetectionConfig {
        eye_threshold: 0.19,
        min_consecutive_frames: 2,
        ..Default::default()
    };
    let mut coordinator = GestureCoordinator::new(config);

    let reports: Vec<_> = [0.15, 0.15, 0.25]
        .iter()
        .map(|&ear| coordinator.process_frame(&[face(ear, 1.0)]))
        .collect();

    assert!(reports[0].events.is_empty());
    assert!(reports[1].events.is_empty());
    assert_eq!(
        reports[2].events,
        vec![ScrollEvent {
            direction: ScrollDirection::Down,
            magnitude: 100
        }]
    );
}

#[test]
fn single_frame_mouth_closure_never_scrolls_up() {
    let config = DetectionConfig {
        mouth_threshold: 0.7,
        min_consecutive_frames: 2,
        ..Default::default()
    };
    let mut coordinator = GestureCoordinator::new(config);

    let up_events = [0.5, 0.9]
        .iter()
        .flat_map(|&mar| coordinator.process_frame(&[face(0.3, mar)]).events)
        .filter(|e| e.direction == ScrollDirection::Up)
        .count();

    assert_eq!(up_events, 0);
}

#[test]
fn measurements_report_the_ratios_fed_to_triggers() {
    let mut coordinator = GestureCoordinator::with_defaults();
    let report = coordinator.process_frame(&[face(0.2, 0.5)]);

    let m = report.measurements[0];
    assert!((m.ear.unwrap() - 0.2).abs() < 1e-9);
    assert!((m.mar.unwrap() - 0.5).abs() < 1e-9);
}

#[test]
fn dlib68_shape_feeds_the_coordinator() {
    let mut shape = vec![Point2D::new(0.0, 0.0); 68];
    shape[36..42].copy_from_slice(&eye_with_ratio(0.1));
    shape[42..48].copy_from_slice(&eye_with_ratio(0.1));
    for (i, p) in mouth_with_ratio(1.0).into_iter().enumerate() {
        shape[48 + i] = p;
    }
    let closed = FaceLandmarks::from_dlib68(&shape).unwrap();

    shape[36..42].copy_from_slice(&eye_with_ratio(0.3));
    shape[42..48].copy_from_slice(&eye_with_ratio(0.3));
    let open = FaceLandmarks::from_dlib68(&shape).unwrap();

    let mut coordinator = GestureCoordinator::with_defaults();
    coordinator.process_frame(&[closed.clone()]);
    coordinator.process_frame(&[closed]);
    let report = coordinator.process_frame(&[open]);

    assert!(report.warnings.is_empty());
    assert_eq!(report.events, vec![ScrollEvent::down(100)]);
}

proptest! {
    #[test]
    fn eye_ratio_is_scale_invariant(
        a in 0.5f64..50.0,
        b in 0.0f64..25.0,
        scale in 0.01f64..100.0,
    ) {
        let eye = ellipse_eye(a, b);
        let scaled: Vec<Point2D> = eye.iter().map(|p| p.scaled(scale)).collect();

        let base = eye_aspect_ratio(&eye).unwrap();
        let after = eye_aspect_ratio(&scaled).unwrap();
        prop_assert!((base - after).abs() <= 1e-9 * base.max(1.0));
    }

    #[test]
    fn mouth_ratio_is_scale_invariant(
        w in 0.5f64..50.0,
        h in 0.0f64..50.0,
        scale in 0.01f64..100.0,
    ) {
        let mouth = vec![
            Point2D::new(0.0, h / 2.0),
            Point2D::new(w / 2.0, 0.0),
            Point2D::new(w, h / 2.0),
            Point2D::new(w / 2.0, h),
        ];
        let scaled: Vec<Point2D> = mouth.iter().map(|p| p.scaled(scale)).collect();

        let base = mouth_aspect_ratio(&mouth).unwrap();
        let after = mouth_aspect_ratio(&scaled).unwrap();
        prop_assert!((base - after).abs() <= 1e-9 * base.max(1.0));
    }

    #[test]
    fn trigger_pulses_only_after_long_enough_closures(
        active in proptest::collection::vec(any::<bool>(), 0..200),
        min_frames in 1u32..6,
    ) {
        let mut trigger = DebouncedTrigger::new(0.5, min_frames);
        let mut run = 0u32;

        for &is_active in &active {
            let pulse = trigger.update(if is_active { 0.1 } else { 0.9 });
            if is_active {
                run += 1;
                prop_assert!(!pulse);
                prop_assert_eq!(trigger.state(), TriggerState::Accumulating);
            } else {
                prop_assert_eq!(pulse, run >= min_frames);
                prop_assert_eq!(trigger.state(), TriggerState::Idle);
                run = 0;
            }
            prop_assert_eq!(trigger.counter(), run);
        }
    }

    #[test]
    fn empty_frames_never_change_state(
        ears in proptest::collection::vec(0.0f64..0.4, 1..20),
        empties in 1usize..10,
    ) {
        let mut coordinator = GestureCoordinator::with_defaults();
        for &ear in &ears {
            coordinator.process_frame(&[face(ear, 0.9)]);
        }
        let before = coordinator.blink_trigger(0).unwrap().counter();

        for _ in 0..empties {
            let report = coordinator.process_frame(&[]);
            prop_assert!(report.events.is_empty());
            prop_assert!(report.warnings.is_empty());
        }
        prop_assert_eq!(coordinator.blink_trigger(0).unwrap().counter(), before);
    }
}
