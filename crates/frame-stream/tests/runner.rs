use std::io::Cursor;

use blinkscroll_common::config::{DetectionConfig, FacePolicy};
use blinkscroll_frame_stream::{GestureRunner, JsonlFrameSource, RunStats, VecSink};
use blinkscroll_gesture_core::GestureCoordinator;
use blinkscroll_landmark_model::face::FaceLandmarks;
use blinkscroll_landmark_model::frame::{serialize_frames, LandmarkFrame};
use blinkscroll_landmark_model::point::Point2D;
use blinkscroll_landmark_model::scroll::ScrollEvent;

const FRAME_NS: u64 = 33_000_000;

fn eye(ratio: f64) -> Vec<Point2D> {
    let h = ratio / 2.0;
    vec![
        Point2D::new(0.0, 0.0),
        Point2D::new(0.3, -h),
        Point2D::new(0.7, -h),
        Point2D::new(1.0, 0.0),
        Point2D::new(0.7, h),
        Point2D::new(0.3, h),
    ]
}

fn mouth(ratio: f64) -> Vec<Point2D> {
    vec![
        Point2D::new(0.0, 0.0),
        Point2D::new(1.0, 0.0),
        Point2D::new(1.0, ratio),
        Point2D::new(0.0, ratio),
    ]
}

fn stream(samples: &[(f64, f64)]) -> String {
    let frames: Vec<LandmarkFrame> = samples
        .iter()
        .enumerate()
        .map(|(i, &(ear, mar))| {
            LandmarkFrame::new(
                i as u64 * FRAME_NS,
                vec![FaceLandmarks::new(eye(ear), eye(ear), mouth(mar))],
            )
        })
        .collect();
    let body = serialize_frames(&frames).unwrap();
    format!("# {{\"schema_version\":\"1.0\",\"source\":\"test\"}}\n{body}")
}

fn runner_for(content: String, sink: VecSink) -> GestureRunner {
    let source = JsonlFrameSource::new(Cursor::new(content.into_bytes()), "test");
    GestureRunner::new(
        Box::new(source),
        Box::new(sink),
        GestureCoordinator::new(DetectionConfig::default()),
    )
}

#[test]
fn blink_then_mouth_produce_down_then_up() {
    let content = stream(&[
        (0.30, 0.9),
        (0.10, 0.9),
        (0.10, 0.9),
        (0.30, 0.9), // blink released
        (0.30, 0.3),
        (0.30, 0.3),
        (0.30, 0.3),
        (0.30, 0.9), // mouth released
    ]);
    let sink = VecSink::new();
    let events = sink.events();

    let stats = runner_for(content, sink).run().unwrap();

    assert_eq!(
        *events.lock().unwrap(),
        vec![
            (3 * FRAME_NS, ScrollEvent::down(100)),
            (7 * FRAME_NS, ScrollEvent::up(100)),
        ]
    );
    assert_eq!(
        stats,
        RunStats {
            frames: 8,
            faces: 8,
            scrolls_up: 1,
            scrolls_down: 1,
            ..Default::default()
        }
    );
}

#[test]
fn malformed_lines_and_bad_faces_are_skipped() {
    let mut content = stream(&[(0.1, 0.9), (0.1, 0.9)]);
    content.push_str("{\"t\": oops}\n");
    content.push_str("{\"t\":99,\"faces\":[{\"dlib68\":[{\"x\":0.0,\"y\":0.0}]}]}\n");
    content.push_str(&stream(&[(0.3, 0.9)]));

    let sink = VecSink::new();
    let events = sink.events();
    let stats = runner_for(content, sink).run().unwrap();

    assert_eq!(stats.skipped_lines, 1);
    assert_eq!(stats.rejected_faces, 1);
    // The frame whose only face was rejected counts as an empty frame.
    assert_eq!(stats.frames, 4);
    assert_eq!(events.lock().unwrap().len(), 1);
}

#[test]
fn geometry_warnings_are_counted() {
    let content = stream(&[(0.3, 0.9)]).replace(
        "\"mouth\":[",
        "\"mouth\":[{\"x\":5.0,\"y\":5.0}],\"unused\":[",
    );
    let sink = VecSink::new();
    let stats = runner_for(content, sink).run().unwrap();
    assert_eq!(stats.warnings, 1);
}

#[test]
fn stop_flag_ends_the_loop_before_reading() {
    let sink = VecSink::new();
    let mut runner = runner_for(stream(&[(0.1, 0.9), (0.3, 0.9)]), sink);
    runner
        .stop_flag()
        .store(true, std::sync::atomic::Ordering::SeqCst);

    let stats = runner.run().unwrap();
    assert_eq!(stats.frames, 0);
}

#[test]
fn rejected_face_keeps_its_slot_under_per_face_policy() {
    let face = |ear: f64| {
        serde_json::to_string(&FaceLandmarks::new(eye(ear), eye(ear), mouth(0.9))).unwrap()
    };
    let bad = "{\"dlib68\":[{\"x\":0.0,\"y\":0.0}]}";
    let content = format!(
        "{{\"t\":0,\"faces\":[{bad},{b}]}}\n\
         {{\"t\":1,\"faces\":[{bad},{b}]}}\n\
         {{\"t\":2,\"faces\":[{a},{b}]}}\n",
        a = face(0.3),
        b = face(0.1),
    );

    let sink = VecSink::new();
    let events = sink.events();
    let source = JsonlFrameSource::new(Cursor::new(content.into_bytes()), "test");
    let config = DetectionConfig {
        face_policy: FacePolicy::PerFace,
        ..Default::default()
    };
    let mut runner = GestureRunner::new(
        Box::new(source),
        Box::new(sink),
        GestureCoordinator::new(config),
    );
    let stats = runner.run().unwrap();

    // The second face never released and the first never closed its eyes.
    assert!(events.lock().unwrap().is_empty());
    assert_eq!(stats.rejected_faces, 2);
    assert_eq!(stats.faces, 4);
}

#[test]
fn invalid_utf8_line_is_skipped() {
    let mut content = stream(&[(0.1, 0.9)]).into_bytes();
    content.extend_from_slice(b"\xff\xfe\n");
    content.extend_from_slice(stream(&[(0.1, 0.9), (0.3, 0.9)]).as_bytes());

    let sink = VecSink::new();
    let events = sink.events();
    let source = JsonlFrameSource::new(Cursor::new(content), "test");
    let mut runner = GestureRunner::new(
        Box::new(source),
        Box::new(sink),
        GestureCoordinator::new(DetectionConfig::default()),
    );
    let stats = runner.run().unwrap();

    assert_eq!(stats.skipped_lines, 1);
    assert_eq!(stats.frames, 3);
    assert_eq!(events.lock().unwrap().len(), 1);
}
