use serde::{Deserialize, Serialize};

use crate::error::GeometryError;
use crate::geometry::{angle_between, euclidean_distance, ALIGNMENT_OFFSET_PX};
use crate::models::{
    Alignment, AngleMeasurement, FrameAnalysis, PixelLandmarks, PostureVerdict,
};

// Terskler funnet ved prøving og feiling. Streng ulikhet: 35.0 er allerede "Bad".
pub const STRICT_NECK_MAX_DEG: f64 = 35.0;
pub const RELAXED_NECK_MAX_DEG: f64 = 40.0;
pub const BACK_MAX_DEG: f64 = 10.0;

pub const STRICT_RESIZE_RATIO: f64 = 4.0 / 5.0;
pub const RELAXED_RESIZE_RATIO: f64 = 1.0 / 2.0;

/// De to terskelvariantene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThresholdProfile {
    /// nakke < 35°, rygg < 10°, resize 4/5
    #[default]
    Strict,
    /// nakke < 40°, rygg < 10°, resize 1/2, med skulder-alignment
    Relaxed,
}

impl ThresholdProfile {
    pub fn neck_max_deg(self) -> f64 {
        match self {
            ThresholdProfile::Strict => STRICT_NECK_MAX_DEG,
            ThresholdProfile::Relaxed => RELAXED_NECK_MAX_DEG,
        }
    }

    pub fn back_max_deg(self) -> f64 {
        BACK_MAX_DEG
    }

    pub fn resize_ratio(self) -> f64 {
        match self {
            ThresholdProfile::Strict => STRICT_RESIZE_RATIO,
            ThresholdProfile::Relaxed => RELAXED_RESIZE_RATIO,
        }
    }

    pub fn checks_alignment(self) -> bool {
        matches!(self, ThresholdProfile::Relaxed)
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "strict" | "a" => Some(ThresholdProfile::Strict),
            "relaxed" | "b" => Some(ThresholdProfile::Relaxed),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct FrameClassifier {
    profile: ThresholdProfile,
}

impl FrameClassifier {
    pub fn new(profile: ThresholdProfile) -> Self {
        Self { profile }
    }

    pub fn profile(&self) -> ThresholdProfile {
        self.profile
    }

    /// Ren funksjon av vinklene; ingen hysterese mellom frames.
    pub fn classify(&self, neck_angle: f64, back_angle: f64) -> PostureVerdict {
        if neck_angle < self.profile.neck_max_deg() && back_angle < self.profile.back_max_deg() {
            PostureVerdict::Good
        } else {
            PostureVerdict::Bad
        }
    }

    pub fn measure_angles(&self, lm: &PixelLandmarks) -> Result<AngleMeasurement, GeometryError> {
        Ok(AngleMeasurement {
            neck_angle: angle_between(lm.left_shoulder, lm.left_ear)?,
            back_angle: angle_between(lm.left_hip, lm.left_shoulder)?,
        })
    }

    pub fn measure(&self, lm: &PixelLandmarks) -> Result<FrameAnalysis, GeometryError> {
        let angles = self.measure_angles(lm)?;
        let verdict = self.classify(angles.neck_angle, angles.back_angle);
        let alignment = if self.profile.checks_alignment() {
            Some(shoulder_alignment(lm))
        } else {
            None
        };

        Ok(FrameAnalysis {
            landmarks: *lm,
            angles,
            verdict,
            alignment,
        })
    }
}

/// Kun til visning; påvirker aldri verdict.
pub fn shoulder_alignment(lm: &PixelLandmarks) -> Alignment {
    let distance_px = euclidean_distance(lm.left_shoulder, lm.right_shoulder);
    if distance_px < ALIGNMENT_OFFSET_PX {
        Alignment::Aligned { distance_px }
    } else {
        Alignment::NotAligned { distance_px }
    }
}
