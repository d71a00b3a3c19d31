//! Print per-frame aspect ratios, useful for picking thresholds.

use std::path::PathBuf;

use blinkscroll_common::config::AppConfig;
use blinkscroll_frame_stream::{GestureRunner, VecSink};
use blinkscroll_gesture_core::GestureCoordinator;
use blinkscroll_landmark_model::frame::timestamp_secs;

use super::{open_source, DetectionOverrides};

pub fn run(config: AppConfig, input: PathBuf, overrides: DetectionOverrides) -> anyhow::Result<()> {
    let detection = overrides.apply(config.detection)?;
    let source = open_source(&input)?;
    let mut runner = GestureRunner::new(
        source,
        Box::new(VecSink::new()),
        GestureCoordinator::new(detection.clone()),
    );

    println!(
        "{:>10}  {:>4}  {:>7}  {:>7}  events",
        "time_s", "face", "ear", "mar"
    );

    while let Some(frame) = runner.step()? {
        let secs = timestamp_secs(frame.timestamp_ns);
        if frame.report.measurements.is_empty() {
            println!("{secs:>10.3}  {:>4}  {:>7}  {:>7}", "-", "-", "-");
            continue;
        }

        let events = frame
            .report
            .events
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ");

        for (face, m) in frame.report.measurements.iter().enumerate() {
            let ear = format_ratio(m.ear, detection.eye_threshold);
            let mar = format_ratio(m.mar, detection.mouth_threshold);
            let events = if face == 0 { events.as_str() } else { "" };
            println!("{secs:>10.3}  {face:>4}  {ear:>7}  {mar:>7}  {events}");
        }
    }

    let stats = runner.stats();
    println!();
    println!(
        "{} frames, {} down, {} up",
        stats.frames, stats.scrolls_down, stats.scrolls_up
    );
    Ok(())
}

/// Ratio with a `*` marker when it is below its threshold.
fn format_ratio(ratio: Option<f64>, threshold: f64) -> String {
    match ratio {
        Some(r) if r < threshold => format!("{r:.3}*"),
        Some(r) => format!("{r:.3}"),
        None => "err".to_string(),
    }
}
