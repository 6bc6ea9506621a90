//! Replay: kjør en mappe med bilder + innspilte landemerker gjennom hele pipelinen.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::LevelFilter;

use posture_core::cli::print_session_report;
use posture_core::{
    load_config, CameraSession, FrameOutcome, ImageSequenceSource, PostureContext,
    RecordedPoseExtractor, ThresholdProfile,
};

#[derive(Parser, Debug)]
#[command(name = "posture_replay")]
#[command(author, version, about = "Replay recorded frames through the posture pipeline", long_about = None)]
struct Args {
    /// Directory with frames (jpg/png/bmp), processed in file-name order
    #[arg(short, long)]
    frames: PathBuf,

    /// JSON array with one landmark set (or null) per frame
    #[arg(short, long)]
    landmarks: PathBuf,

    /// Where annotated JPEGs are written
    #[arg(short, long)]
    out: Option<PathBuf>,

    /// Config file (JSON); defaults are used when missing
    #[arg(short, long, default_value = "posture.json")]
    config: PathBuf,

    /// Override threshold profile (strict|relaxed)
    #[arg(short, long)]
    profile: Option<String>,

    /// Override replay fps
    #[arg(long)]
    fps: Option<f64>,

    /// Print per-frame debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    env_logger::Builder::new()
        .filter_level(if args.verbose { LevelFilter::Debug } else { LevelFilter::Info })
        .parse_default_env()
        .init();

    let mut cfg = load_config(&args.config).context("loading config")?;
    if let Some(p) = &args.profile {
        cfg.profile = ThresholdProfile::parse(p)
            .with_context(|| format!("unknown profile {p:?}, expected strict|relaxed"))?;
    }
    if let Some(fps) = args.fps {
        cfg.replay_fps = fps;
    }
    cfg.validate().context("invalid settings")?;

    let source = ImageSequenceSource::from_dir(&args.frames, cfg.replay_fps)
        .with_context(|| format!("reading frames from {}", args.frames.display()))?;
    let frame_count = source.len();
    let extractor = RecordedPoseExtractor::from_file(&args.landmarks)
        .with_context(|| format!("reading landmarks from {}", args.landmarks.display()))?;

    if let Some(dir) = &args.out {
        std::fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    }

    let mut camera = CameraSession::open(source);
    let mut ctx = PostureContext::new(extractor, cfg)?;

    for i in 0..frame_count {
        let outcome = ctx.process_frame(&mut camera)?;
        if let FrameOutcome::NoFrame = outcome {
            log::warn!("frame {i}: no image");
            continue;
        }
        if let (Some(dir), Some(jpeg)) = (&args.out, outcome.jpeg()) {
            let path = dir.join(format!("frame_{i:05}.jpg"));
            std::fs::write(&path, jpeg).with_context(|| format!("writing {}", path.display()))?;
        }
    }

    camera.close().context("releasing frame source")?;
    print_session_report(&ctx.session().summary());
    Ok(())
}
