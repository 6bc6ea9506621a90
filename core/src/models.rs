use serde::{Deserialize, Serialize};

use crate::error::GeometryError;

/// Pose-modeller kan gi punkter litt utenfor [0, 1]; alt utover dette avvises.
pub const MAX_LANDMARK_COORD: f64 = 10.0;

/// Normalisert landemerke fra pose-modellen, x/y i [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NormalizedLandmark {
    pub x: f64,
    pub y: f64,
    #[serde(default = "default_visibility")]
    pub visibility: f64,
}

fn default_visibility() -> f64 {
    1.0
}

impl NormalizedLandmark {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y, visibility: 1.0 }
    }

    fn check_range(&self) -> Result<(), GeometryError> {
        for v in [self.x, self.y] {
            if !(v.is_finite() && v.abs() <= MAX_LANDMARK_COORD) {
                return Err(GeometryError::LandmarkOutOfRange(v));
            }
        }
        Ok(())
    }

    /// Pikselkoordinat, trunkert mot null.
    pub fn to_pixel(&self, width: u32, height: u32) -> PixelPoint {
        PixelPoint {
            x: (self.x * width as f64) as i32,
            y: (self.y * height as f64) as i32,
        }
    }
}

/// Punktene vi trenger fra én frame. Resten av skjelettet brukes ikke.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LandmarkSet {
    #[serde(alias = "LEFT_SHOULDER")]
    pub left_shoulder: NormalizedLandmark,
    #[serde(alias = "RIGHT_SHOULDER")]
    pub right_shoulder: NormalizedLandmark,
    #[serde(alias = "LEFT_EAR")]
    pub left_ear: NormalizedLandmark,
    #[serde(alias = "LEFT_HIP")]
    pub left_hip: NormalizedLandmark,
}

impl LandmarkSet {
    pub fn to_pixels(&self, width: u32, height: u32) -> PixelLandmarks {
        PixelLandmarks {
            left_shoulder: self.left_shoulder.to_pixel(width, height),
            right_shoulder: self.right_shoulder.to_pixel(width, height),
            left_ear: self.left_ear.to_pixel(width, height),
            left_hip: self.left_hip.to_pixel(width, height),
        }
    }

    /// Som `to_pixels`, men avviser NaN/inf og koordinater utenfor ±MAX_LANDMARK_COORD.
    pub fn checked_pixels(&self, width: u32, height: u32) -> Result<PixelLandmarks, GeometryError> {
        for lm in [&self.left_shoulder, &self.right_shoulder, &self.left_ear, &self.left_hip] {
            lm.check_range()?;
        }
        Ok(self.to_pixels(width, height))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PixelPoint {
    pub x: i32,
    pub y: i32,
}

impl PixelPoint {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Referansepunkt rett over (bildekoordinater: y vokser nedover).
    pub fn above(&self, dy: i32) -> Self {
        Self { x: self.x, y: self.y.saturating_sub(dy) }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PixelLandmarks {
    pub left_shoulder: PixelPoint,
    pub right_shoulder: PixelPoint,
    pub left_ear: PixelPoint,
    pub left_hip: PixelPoint,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AngleMeasurement {
    pub neck_angle: f64, // grader
    pub back_angle: f64, // grader
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostureVerdict {
    Good,
    Bad,
}

impl PostureVerdict {
    pub fn is_good(self) -> bool {
        matches!(self, PostureVerdict::Good)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Alignment {
    Aligned { distance_px: f64 },
    NotAligned { distance_px: f64 },
}

impl Alignment {
    pub fn distance_px(&self) -> f64 {
        match *self {
            Alignment::Aligned { distance_px } | Alignment::NotAligned { distance_px } => {
                distance_px
            }
        }
    }

    pub fn is_aligned(&self) -> bool {
        matches!(self, Alignment::Aligned { .. })
    }
}

/// Resultatet av én klassifisert frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrameAnalysis {
    pub landmarks: PixelLandmarks,
    pub angles: AngleMeasurement,
    pub verdict: PostureVerdict,
    /// Kun satt for `ThresholdProfile::Relaxed`.
    pub alignment: Option<Alignment>,
}

/// Avledede varigheter. Lagres aldri, regnes ut fra tellerne ved behov.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ElapsedTimes {
    pub good_time: f64,  // sek
    pub bad_time: f64,   // sek
    pub total_time: f64, // sek
    /// None når total_time == 0 (første frame eller fps == 0)
    pub good_percent: Option<f64>,
}
