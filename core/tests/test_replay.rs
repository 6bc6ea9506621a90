// core/tests/test_replay.rs
// Replay fra disk: bildemappe + landemerke-JSON, som posture_replay-binæren bruker.
mod common;

use std::fs;
use std::path::PathBuf;

use image::{Rgb, RgbImage};
use posture_core::cli::session_report;
use posture_core::{
    CameraSession, Config, FrameOutcome, ImageSequenceSource, LandmarkSet, PostureContext,
    RecordedPoseExtractor,
};

use common::{bad_landmarks, good_landmarks};

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("posture_core_{name}_{}", std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn replays_directory_in_name_order() {
    let dir = scratch_dir("replay");
    for i in 0..4 {
        RgbImage::from_pixel(250, 250, Rgb([i * 40, 0, 0]))
            .save(dir.join(format!("f{i:02}.png")))
            .unwrap();
    }
    fs::write(dir.join("notes.txt"), "ignored").unwrap();

    let poses: Vec<Option<LandmarkSet>> =
        vec![Some(good_landmarks()), None, Some(bad_landmarks()), Some(good_landmarks())];
    let json = serde_json::to_string(&poses).unwrap();
    let extractor = RecordedPoseExtractor::from_json_str(&json).unwrap();

    let source = ImageSequenceSource::from_dir(&dir, 2.0).unwrap();
    assert_eq!(source.len(), 4);

    let mut cam = CameraSession::open(source);
    let mut ctx = PostureContext::new(extractor, Config::default()).unwrap();

    let mut kinds = Vec::new();
    for _ in 0..5 {
        kinds.push(match ctx.process_frame(&mut cam).unwrap() {
            FrameOutcome::NoFrame => "none",
            FrameOutcome::NoPose { .. } => "miss",
            FrameOutcome::Analyzed(_) => "ok",
        });
    }
    assert_eq!(kinds, ["ok", "miss", "ok", "ok", "none"]);
    cam.close().unwrap();

    let summary = ctx.session().summary();
    assert_eq!((summary.good_frames, summary.bad_frames), (2, 1));
    assert!((summary.elapsed.total_time - 1.5).abs() < 1e-9);

    let report = session_report(&summary);
    assert!(report.contains("Good Posture Duration: 1.0 seconds"), "{report}");
    assert!(report.contains("Bad Posture Duration: 0.5 seconds"), "{report}");
    assert!(report.contains("66.67 %"), "{report}");

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn unreadable_frame_is_a_capture_miss() {
    let dir = scratch_dir("broken");
    fs::write(dir.join("a.jpg"), b"not a jpeg").unwrap();

    let mut cam = CameraSession::open(ImageSequenceSource::from_dir(&dir, 30.0).unwrap());
    let mut ctx = PostureContext::new(RecordedPoseExtractor::default(), Config::default()).unwrap();

    assert!(matches!(ctx.process_frame(&mut cam).unwrap(), FrameOutcome::NoFrame));
    assert_eq!(ctx.session().accumulator().total_frames(), 0);

    let _ = fs::remove_dir_all(&dir);
}
