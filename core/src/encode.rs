use image::codecs::jpeg::JpegEncoder;
use image::imageops::{self, FilterType};
use image::RgbImage;

use crate::error::PipelineError;

pub const DEFAULT_JPEG_QUALITY: u8 = 95;

/// Skaler frame med `ratio` (bredde/høyde trunkeres), bilineært.
pub fn resize_frame(frame: &RgbImage, ratio: f64) -> RgbImage {
    let w = ((frame.width() as f64 * ratio) as u32).max(1);
    let h = ((frame.height() as f64 * ratio) as u32).max(1);
    if (w, h) == frame.dimensions() {
        return frame.clone();
    }
    imageops::resize(frame, w, h, FilterType::Triangle)
}

pub fn encode_jpeg(frame: &RgbImage, quality: u8) -> Result<Vec<u8>, PipelineError> {
    let mut buf = Vec::new();
    let mut encoder = JpegEncoder::new_with_quality(&mut buf, quality.clamp(1, 100));
    encoder.encode_image(frame)?;
    Ok(buf)
}

/// Rå RGB8-buffer (f.eks. fra Python) → RgbImage.
pub fn frame_from_rgb(rgb: Vec<u8>, width: u32, height: u32) -> Result<RgbImage, PipelineError> {
    let expected = width as usize * height as usize * 3;
    if rgb.len() != expected {
        return Err(PipelineError::InvalidFrame(format!(
            "expected {expected} bytes for {width}x{height} RGB, got {}",
            rgb.len()
        )));
    }
    RgbImage::from_raw(width, height, rgb)
        .ok_or_else(|| PipelineError::InvalidFrame("buffer too small".into()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resize_truncates_like_int() {
        let img = RgbImage::new(641, 481);
        let out = resize_frame(&img, 4.0 / 5.0);
        assert_eq!(out.dimensions(), (512, 384));
        let half = resize_frame(&img, 0.5);
        assert_eq!(half.dimensions(), (320, 240));
    }

    #[test]
    fn jpeg_has_soi_marker() {
        let img = RgbImage::from_pixel(16, 16, image::Rgb([10, 200, 30]));
        let bytes = encode_jpeg(&img, 90).unwrap();
        assert_eq!(&bytes[..2], &[0xFF, 0xD8]);
    }

    #[test]
    fn raw_buffer_length_is_checked() {
        assert!(frame_from_rgb(vec![0; 11], 2, 2).is_err());
        assert!(frame_from_rgb(vec![0; 12], 2, 2).is_ok());
    }
}
