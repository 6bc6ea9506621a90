pub mod camera;
pub mod classifier;
pub mod cli;
pub mod config;
pub mod encode;
pub mod error;
pub mod geometry;
pub mod metrics;
pub mod models;
pub mod overlay;
pub mod pipeline;
pub mod pose;
pub mod session;

#[cfg(feature = "python")]
mod py;

// Re-eksporter det meste brukte på crate-roten
pub use camera::{CameraSession, FrameSource, ImageSequenceSource};
pub use classifier::{FrameClassifier, ThresholdProfile};
pub use config::{load_config, save_config, Config};
pub use error::{CaptureError, ConfigError, GeometryError, PipelineError, PoseError};
pub use geometry::{angle_between, euclidean_distance};
pub use models::{
    Alignment, AngleMeasurement, ElapsedTimes, FrameAnalysis, LandmarkSet, NormalizedLandmark,
    PixelLandmarks, PixelPoint, PostureVerdict,
};
pub use pipeline::{FrameOutcome, FrameReport, MissReason, PostureContext, PostureSession, SessionSummary};
pub use pose::{PoseExtractor, RecordedPoseExtractor};
pub use session::{AlertPolicy, NoopNotifier, PostureNotifier, SessionAccumulator};
