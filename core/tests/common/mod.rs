// Felles hjelpere for integrasjonstestene
#![allow(dead_code)]

use std::cell::Cell;
use std::collections::VecDeque;
use std::rc::Rc;

use image::{Rgb, RgbImage};
use posture_core::{CaptureError, FrameSource, LandmarkSet, NormalizedLandmark};

/// Rett rygg, hodet litt foran skulder (≈13.5° nakke, 0° rygg på 200x200).
pub fn good_landmarks() -> LandmarkSet {
    LandmarkSet {
        left_shoulder: NormalizedLandmark::new(0.5, 0.5),
        right_shoulder: NormalizedLandmark::new(0.625, 0.5),
        left_ear: NormalizedLandmark::new(0.5625, 0.25),
        left_hip: NormalizedLandmark::new(0.5, 0.875),
    }
}

/// Hodet langt fram (≈63° nakke).
pub fn bad_landmarks() -> LandmarkSet {
    LandmarkSet {
        left_ear: NormalizedLandmark::new(0.75, 0.375),
        ..good_landmarks()
    }
}

/// Frame-kilde i minnet. `None` i køen = kamera uten bilde.
pub struct FakeCamera {
    frames: VecDeque<Option<RgbImage>>,
    fps: f64,
    pub released: Rc<Cell<u32>>,
}

impl FakeCamera {
    pub fn new(frames: Vec<Option<RgbImage>>, fps: f64) -> Self {
        Self {
            frames: frames.into(),
            fps,
            released: Rc::new(Cell::new(0)),
        }
    }

    pub fn solid(n: usize, size: u32, fps: f64) -> Self {
        let frames = (0..n)
            .map(|_| Some(RgbImage::from_pixel(size, size, Rgb([40, 40, 40]))))
            .collect();
        Self::new(frames, fps)
    }
}

impl FrameSource for FakeCamera {
    fn read_frame(&mut self) -> Result<Option<RgbImage>, CaptureError> {
        Ok(self.frames.pop_front().flatten())
    }

    fn fps(&self) -> f64 {
        self.fps
    }

    fn release(&mut self) -> Result<(), CaptureError> {
        self.released.set(self.released.get() + 1);
        if self.released.get() > 1 {
            return Err(CaptureError::Released);
        }
        Ok(())
    }
}
