//! Diagnostisk overlay: landemerker, skjelettlinjer, vinkler og varigheter.
//! Ren funksjon av bildet + målingen + akkumulatorens øyeblikksbilde.

pub mod font;

use ab_glyph::{Font, FontVec, PxScale, ScaleFont};
use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_filled_circle_mut, draw_line_segment_mut, draw_text_mut, text_size};

use crate::models::{Alignment, ElapsedTimes, FrameAnalysis, PixelPoint, PostureVerdict};

// Farger (RGB)
pub const RED: Rgb<u8> = Rgb([255, 50, 50]);
pub const GREEN: Rgb<u8> = Rgb([0, 255, 127]);
pub const DARK_BLUE: Rgb<u8> = Rgb([0, 20, 127]);
pub const YELLOW: Rgb<u8> = Rgb([255, 255, 0]);
pub const WHITE: Rgb<u8> = Rgb([255, 255, 255]);

pub const DOT_RADIUS: i32 = 7;
pub const LINE_THICKNESS: i32 = 4;
/// Lengde (px) på loddrett referanselinje over skulder og hofte.
pub const VERTICAL_REF_PX: i32 = 100;

const LABEL_PX: f32 = 24.0;
const PERCENT_PX: f32 = 32.0;

pub fn fill_circle(img: &mut RgbImage, center: PixelPoint, radius: i32, color: Rgb<u8>) {
    draw_filled_circle_mut(img, (center.x, center.y), radius, color);
}

/// Tykk linje: forskjøvne segmenter pluss runde ender.
pub fn draw_line(img: &mut RgbImage, from: PixelPoint, to: PixelPoint, thickness: i32, color: Rgb<u8>) {
    let r = (thickness / 2).max(0);
    let (x0, y0, x1, y1) = (from.x as f32, from.y as f32, to.x as f32, to.y as f32);
    for o in -r..=r {
        let o = o as f32;
        draw_line_segment_mut(img, (x0 + o, y0), (x1 + o, y1), color);
        draw_line_segment_mut(img, (x0, y0 + o), (x1, y1 + o), color);
    }
    if r > 0 {
        fill_circle(img, from, r, color);
        fill_circle(img, to, r, color);
    }
}

pub fn verdict_color(verdict: PostureVerdict) -> Rgb<u8> {
    match verdict {
        PostureVerdict::Good => GREEN,
        PostureVerdict::Bad => RED,
    }
}

pub fn percent_label(elapsed: &ElapsedTimes) -> String {
    match elapsed.good_percent {
        Some(p) => format!("{p:.2} %"),
        None => "-- %".to_string(),
    }
}

/// Tegner overlay. Uten font blir bare geometrien tegnet.
pub struct OverlayRenderer {
    font: Option<FontVec>,
}

impl std::fmt::Debug for OverlayRenderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OverlayRenderer")
            .field("has_font", &self.font.is_some())
            .finish()
    }
}

impl OverlayRenderer {
    pub fn new(font: Option<FontVec>) -> Self {
        Self { font }
    }

    pub fn has_font(&self) -> bool {
        self.font.is_some()
    }

    /// Tekst med venstre baseline i (x, y), som cv2.putText.
    fn text(&self, img: &mut RgbImage, text: &str, (x, y): (i32, i32), px: f32, color: Rgb<u8>) {
        let Some(font) = &self.font else { return };
        let scale = PxScale::from(px);
        let ascent = font.as_scaled(scale).ascent().round() as i32;
        draw_text_mut(img, color, x, y - ascent, scale, font, text);
    }

    fn text_width(&self, text: &str, px: f32) -> i32 {
        match &self.font {
            Some(font) => text_size(PxScale::from(px), font, text).0 as i32,
            None => 0,
        }
    }

    /// Full overlay for en klassifisert frame.
    pub fn render(&self, img: &mut RgbImage, analysis: &FrameAnalysis, elapsed: &ElapsedTimes) {
        let lm = &analysis.landmarks;
        let color = verdict_color(analysis.verdict);
        let shoulder = lm.left_shoulder;
        let hip = lm.left_hip;

        // Skjelett: nakke og rygg, pluss loddrette referanser
        draw_line(img, shoulder, lm.left_ear, LINE_THICKNESS, color);
        draw_line(img, shoulder, shoulder.above(VERTICAL_REF_PX), LINE_THICKNESS, color);
        draw_line(img, hip, shoulder, LINE_THICKNESS, color);
        draw_line(img, hip, hip.above(VERTICAL_REF_PX), LINE_THICKNESS, color);

        for p in [
            shoulder,
            lm.left_ear,
            shoulder.above(VERTICAL_REF_PX),
            hip,
            hip.above(VERTICAL_REF_PX),
        ] {
            fill_circle(img, p, DOT_RADIUS, YELLOW);
        }

        let neck = analysis.angles.neck_angle as i64;
        let back = analysis.angles.back_angle as i64;
        self.text(img, &format!("Neck : {neck}  Back : {back}"), (10, 30), LABEL_PX, color);
        self.text(img, &neck.to_string(), (shoulder.x + 10, shoulder.y), LABEL_PX, color);
        self.text(img, &back.to_string(), (hip.x + 10, hip.y), LABEL_PX, color);

        if let Some(alignment) = analysis.alignment {
            self.render_alignment(img, &alignment);
        }

        self.render_durations(img, elapsed);
    }

    /// Varighetslinjer og prosent nederst i bildet.
    pub fn render_durations(&self, img: &mut RgbImage, elapsed: &ElapsedTimes) {
        let w = img.width() as i32;
        let h = img.height() as i32;

        let total = format!("Total Duration: {:.1} seconds", elapsed.total_time);
        let good = format!("Good Posture Duration: {:.1} seconds", elapsed.good_time);
        let bad = format!("Bad Posture Duration: {:.1} seconds", elapsed.bad_time);
        self.text(img, &total, (10, h - 75), LABEL_PX, WHITE);
        self.text(img, &good, (10, h - 45), LABEL_PX, WHITE);
        self.text(img, &bad, (10, h - 15), LABEL_PX, WHITE);

        let pct = percent_label(elapsed);
        let x = w - self.text_width(&pct, PERCENT_PX) - 10;
        self.text(img, &pct, (x, h - 75), PERCENT_PX, DARK_BLUE);
    }

    pub fn render_alignment(&self, img: &mut RgbImage, alignment: &Alignment) {
        let w = img.width() as i32;
        let (label, color) = if alignment.is_aligned() {
            (format!("{} Aligned", alignment.distance_px() as i64), GREEN)
        } else {
            (format!("{} Not Aligned", alignment.distance_px() as i64), RED)
        };
        let x = w - self.text_width(&label, LABEL_PX) - 10;
        self.text(img, &label, (x, 30), LABEL_PX, color);
    }

    /// Frame uten brukbare landemerker: kun varigheter og en markør.
    pub fn render_miss(&self, img: &mut RgbImage, elapsed: &ElapsedTimes) {
        self.text(img, "No pose detected", (10, 30), LABEL_PX, RED);
        self.render_durations(img, elapsed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thick_line_covers_endpoints() {
        let mut img = RgbImage::new(50, 50);
        draw_line(&mut img, PixelPoint::new(5, 5), PixelPoint::new(40, 30), 4, GREEN);
        assert_eq!(*img.get_pixel(5, 5), GREEN);
        assert_eq!(*img.get_pixel(40, 30), GREEN);
        assert_eq!(*img.get_pixel(6, 5), GREEN); // tykkelse
    }

    #[test]
    fn shapes_outside_frame_do_not_panic() {
        let mut img = RgbImage::new(10, 10);
        fill_circle(&mut img, PixelPoint::new(-20, -20), 7, YELLOW);
        draw_line(&mut img, PixelPoint::new(-50, 5), PixelPoint::new(60, 5), 4, RED);
        assert_eq!(*img.get_pixel(5, 5), RED);
    }

    #[test]
    fn far_endpoints_are_clipped() {
        let mut img = RgbImage::new(20, 20);
        draw_line(&mut img, PixelPoint::new(10, 10), PixelPoint::new(2_000, -3_000), 4, RED);
        fill_circle(&mut img, PixelPoint::new(10, -2_000), DOT_RADIUS, YELLOW);
        assert_eq!(*img.get_pixel(10, 10), RED);
    }

    #[test]
    fn text_without_font_is_skipped() {
        let mut img = RgbImage::new(300, 120);
        let r = OverlayRenderer::new(None);
        r.render_miss(&mut img, &ElapsedTimes::default());
        assert!(img.pixels().all(|p| *p == Rgb([0, 0, 0])));
    }

    #[test]
    fn system_font_draws_mixed_case_text() {
        let Some(path) = font::find_system_font() else { return };
        let r = OverlayRenderer::new(Some(font::load_font(&path).unwrap()));
        let mut img = RgbImage::new(300, 120);
        r.render_miss(&mut img, &ElapsedTimes::default());
        // "No pose detected" øverst til venstre
        let inked = (0..300)
            .flat_map(|x| (0..40).map(move |y| (x, y)))
            .filter(|&(x, y)| *img.get_pixel(x, y) != Rgb([0, 0, 0]))
            .count();
        assert!(inked > 20, "{inked}");
    }

    #[test]
    fn percent_label_sentinel() {
        assert_eq!(percent_label(&ElapsedTimes::default()), "-- %");
        let e = ElapsedTimes { good_time: 1.0, bad_time: 2.0, total_time: 3.0, good_percent: Some(33.3333) };
        assert_eq!(percent_label(&e), "33.33 %");
    }
}
