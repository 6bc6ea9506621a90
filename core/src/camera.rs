// core/src/camera.rs
use std::path::{Path, PathBuf};

use image::RgbImage;

use crate::error::CaptureError;

/// Bildekilde (kamera, video, replay). Leverer RGB-frames og rapportert fps.
pub trait FrameSource {
    /// Ok(None) = ingen frame tilgjengelig nå.
    fn read_frame(&mut self) -> Result<Option<RgbImage>, CaptureError>;

    /// Rapportert fps. Kan være 0 hvis ukjent.
    fn fps(&self) -> f64;

    /// Frigjør enheten. Kalles nøyaktig én gang av `CameraSession`.
    fn release(&mut self) -> Result<(), CaptureError>;
}

/// Eier en `FrameSource` for hele økten og frigjør den på alle utganger.
pub struct CameraSession<S: FrameSource> {
    source: Option<S>,
}

impl<S: FrameSource> CameraSession<S> {
    pub fn open(source: S) -> Self {
        log::info!("📷 camera session opened (fps={})", source.fps());
        Self { source: Some(source) }
    }

    pub fn fps(&self) -> f64 {
        self.source.as_ref().map(|s| s.fps()).unwrap_or(0.0)
    }

    pub fn read_frame(&mut self) -> Result<Option<RgbImage>, CaptureError> {
        match self.source.as_mut() {
            Some(s) => s.read_frame(),
            None => Err(CaptureError::Released),
        }
    }

    pub fn is_open(&self) -> bool {
        self.source.is_some()
    }

    /// Eksplisitt lukking; feil fra release returneres.
    pub fn close(mut self) -> Result<(), CaptureError> {
        match self.source.take() {
            Some(mut s) => {
                log::info!("📷 camera session closed");
                s.release()
            }
            None => Ok(()),
        }
    }
}

impl<S: FrameSource> Drop for CameraSession<S> {
    fn drop(&mut self) {
        if let Some(mut s) = self.source.take() {
            // allerede frigjort / enhet borte: svelges
            if let Err(e) = s.release() {
                log::debug!("release on drop ignored: {e}");
            }
        }
    }
}

const IMAGE_EXTENSIONS: [&str; 4] = ["jpg", "jpeg", "png", "bmp"];

/// Replay av en mappe med bilder i sortert rekkefølge, med fast fps.
#[derive(Debug)]
pub struct ImageSequenceSource {
    frames: Vec<PathBuf>,
    next: usize,
    fps: f64,
    released: bool,
}

impl ImageSequenceSource {
    pub fn from_dir(dir: impl AsRef<Path>, fps: f64) -> Result<Self, CaptureError> {
        let mut frames = Vec::new();
        for entry in std::fs::read_dir(dir.as_ref())? {
            let path = entry?.path();
            let is_image = path
                .extension()
                .and_then(|e| e.to_str())
                .map(|e| IMAGE_EXTENSIONS.contains(&e.to_lowercase().as_str()))
                .unwrap_or(false);
            if is_image {
                frames.push(path);
            }
        }
        frames.sort();
        log::debug!("image sequence: {} frames from {}", frames.len(), dir.as_ref().display());
        Ok(Self::from_paths(frames, fps))
    }

    pub fn from_paths(frames: Vec<PathBuf>, fps: f64) -> Self {
        Self { frames, next: 0, fps, released: false }
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

impl FrameSource for ImageSequenceSource {
    fn read_frame(&mut self) -> Result<Option<RgbImage>, CaptureError> {
        if self.released {
            return Err(CaptureError::Released);
        }
        let Some(path) = self.frames.get(self.next) else {
            return Ok(None);
        };
        self.next += 1;
        let img = image::open(path).map_err(|source| CaptureError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Ok(Some(img.to_rgb8()))
    }

    fn fps(&self) -> f64 {
        self.fps
    }

    fn release(&mut self) -> Result<(), CaptureError> {
        if self.released {
            return Err(CaptureError::Released);
        }
        self.released = true;
        Ok(())
    }
}
