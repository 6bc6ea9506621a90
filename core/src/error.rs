use thiserror::Error;

#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum GeometryError {
    /// Formelen deler på origin.y; et punkt på øverste bildekant gir ingen vinkel.
    #[error("origin lies on the top image edge (y == 0)")]
    OriginOnTopEdge,
    #[error("point coincides with origin")]
    ZeroLength,
    /// Normalisert koordinat er ikke endelig eller ligger langt utenfor bildet.
    #[error("landmark coordinate out of range: {0}")]
    LandmarkOutOfRange(f64),
}

#[derive(Debug, Error)]
pub enum CaptureError {
    #[error("frame source already released")]
    Released,
    #[error("failed to read frame {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: image::ImageError,
    },
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("frame source error: {0}")]
    Backend(String),
}

#[derive(Debug, Error)]
pub enum PoseError {
    #[error("parse error at {path}: {message}")]
    Parse { path: String, message: String },
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("pose backend error: {0}")]
    Backend(String),
}

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("pose extraction failed: {0}")]
    Pose(#[from] PoseError),
    #[error("jpeg encoding failed: {0}")]
    Encode(#[from] image::ImageError),
    #[error("invalid frame buffer: {0}")]
    InvalidFrame(String),
    #[error("config: {0}")]
    Config(#[from] ConfigError),
    #[error("metrics registry: {0}")]
    Metrics(#[from] prometheus::Error),
    #[error("overlay font {path}: {message}")]
    Font { path: String, message: String },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("config parse error at {path}: {message}")]
    Parse { path: String, message: String },
    #[error("config serialize error: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}
