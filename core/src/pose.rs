// core/src/pose.rs
use std::collections::VecDeque;
use std::path::Path;

use image::RgbImage;
use serde_json as json;
use serde_path_to_error as spte;

use crate::error::PoseError;
use crate::models::LandmarkSet;

/// Ekstern pose-modell. Ok(None) = ingen person funnet i bildet.
pub trait PoseExtractor {
    fn extract_landmarks(&mut self, image: &RgbImage) -> Result<Option<LandmarkSet>, PoseError>;
}

impl<P: PoseExtractor + ?Sized> PoseExtractor for Box<P> {
    fn extract_landmarks(&mut self, image: &RgbImage) -> Result<Option<LandmarkSet>, PoseError> {
        (**self).extract_landmarks(image)
    }
}

/// Forhåndsinnspilte landemerker, én oppføring per frame (`null` = bom).
/// Når lista er tom returneres None.
#[derive(Debug, Clone, Default)]
pub struct RecordedPoseExtractor {
    frames: VecDeque<Option<LandmarkSet>>,
}

impl RecordedPoseExtractor {
    pub fn new(frames: impl IntoIterator<Item = Option<LandmarkSet>>) -> Self {
        Self { frames: frames.into_iter().collect() }
    }

    /// JSON-array: `[{"left_shoulder": {"x":..,"y":..}, ...}, null, ...]`
    pub fn from_json_str(s: &str) -> Result<Self, PoseError> {
        let mut de = json::Deserializer::from_str(s);
        let frames: Vec<Option<LandmarkSet>> = spte::deserialize(&mut de).map_err(|e| PoseError::Parse {
            path: e.path().to_string(),
            message: e.inner().to_string(),
        })?;
        Ok(Self::new(frames))
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, PoseError> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        let out = Self::from_json_str(&contents)?;
        log::info!(
            "📂 recorded landmarks loaded from {} ({} frames)",
            path.as_ref().display(),
            out.remaining()
        );
        Ok(out)
    }

    pub fn remaining(&self) -> usize {
        self.frames.len()
    }
}

impl PoseExtractor for RecordedPoseExtractor {
    fn extract_landmarks(&mut self, _image: &RgbImage) -> Result<Option<LandmarkSet>, PoseError> {
        Ok(self.frames.pop_front().flatten())
    }
}
