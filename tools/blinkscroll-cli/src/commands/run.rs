//! Run gesture detection over a landmark stream.

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use blinkscroll_common::config::AppConfig;
use blinkscroll_frame_stream::{GestureRunner, ScrollEventWriter, ScrollSink, TextSink};
use blinkscroll_gesture_core::GestureCoordinator;

use super::{open_source, DetectionOverrides};

pub fn run(
    config: AppConfig,
    input: PathBuf,
    output: Option<PathBuf>,
    overrides: DetectionOverrides,
) -> anyhow::Result<()> {
    let detection = overrides.apply(config.detection)?;
    tracing::info!(
        eye_threshold = detection.eye_threshold,
        mouth_threshold = detection.mouth_threshold,
        min_frames = detection.min_consecutive_frames,
        face_policy = ?detection.face_policy,
        "Starting gesture detection"
    );

    let source = open_source(&input)?;
    let sink: Box<dyn ScrollSink> = match &output {
        Some(path) => Box::new(
            ScrollEventWriter::new(path.clone(), &detection)
                .map_err(|e| anyhow::anyhow!("Failed to create event log: {e}"))?,
        ),
        None => Box::new(TextSink::new(std::io::stdout())),
    };

    let mut runner = GestureRunner::new(source, sink, GestureCoordinator::new(detection));
    stop_on_ctrl_c(runner.stop_flag())?;
    let stats = runner.run()?;

    eprintln!();
    eprintln!("Frames processed: {}", stats.frames);
    eprintln!("Faces processed:  {}", stats.faces);
    eprintln!(
        "Scroll events:    {} down, {} up",
        stats.scrolls_down, stats.scrolls_up
    );
    if stats.warnings + stats.rejected_faces + stats.skipped_lines > 0 {
        eprintln!(
            "Skipped:          {} measurements, {} faces, {} lines",
            stats.warnings, stats.rejected_faces, stats.skipped_lines
        );
    }
    if let Some(path) = output {
        eprintln!("Events written to: {}", path.display());
    }

    Ok(())
}

/// Set `stop` on Ctrl+C so the runner flushes its sink and returns at the
/// next frame boundary.
fn stop_on_ctrl_c(stop: Arc<AtomicBool>) -> anyhow::Result<()> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    std::thread::Builder::new()
        .name("ctrl-c".to_string())
        .spawn(move || {
            runtime.block_on(async {
                match tokio::signal::ctrl_c().await {
                    Ok(()) => {
                        tracing::info!("Ctrl+C received, stopping after the current frame");
                        stop.store(true, Ordering::SeqCst);
                    }
                    Err(e) => tracing::warn!(error = %e, "Could not listen for Ctrl+C"),
                }
            });
        })?;
    Ok(())
}
