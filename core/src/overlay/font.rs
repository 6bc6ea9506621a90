//! Fontlasting for overlay-teksten (TTF/OTF via ab_glyph).

use std::path::{Path, PathBuf};

use ab_glyph::FontVec;
use once_cell::sync::Lazy;

use crate::error::PipelineError;

/// Vanlige plasseringer for en sans-serif; første treff brukes.
const SYSTEM_FONT_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "/Library/Fonts/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

pub fn load_font(path: &Path) -> Result<FontVec, PipelineError> {
    let font_err = |message: String| PipelineError::Font {
        path: path.display().to_string(),
        message,
    };
    let bytes = std::fs::read(path).map_err(|e| font_err(e.to_string()))?;
    FontVec::try_from_vec(bytes).map_err(|e| font_err(e.to_string()))
}

/// Slås opp én gang per prosess.
static SYSTEM_FONT: Lazy<Option<PathBuf>> = Lazy::new(|| {
    SYSTEM_FONT_CANDIDATES
        .iter()
        .map(PathBuf::from)
        .find(|p| p.is_file())
});

pub fn find_system_font() -> Option<PathBuf> {
    (*SYSTEM_FONT).clone()
}

/// Eksplisitt sti må kunne lastes. Uten sti prøves systemfontene;
/// finnes ingen, tegnes overlay uten tekst.
pub fn resolve_font(explicit: Option<&Path>) -> Result<Option<FontVec>, PipelineError> {
    if let Some(path) = explicit {
        let font = load_font(path)?;
        log::info!("🔤 overlay font loaded from {}", path.display());
        return Ok(Some(font));
    }
    match find_system_font() {
        Some(path) => match load_font(&path) {
            Ok(font) => {
                log::debug!("overlay font: {}", path.display());
                Ok(Some(font))
            }
            Err(e) => {
                log::warn!("⚠️ {e}; overlay text disabled");
                Ok(None)
            }
        },
        None => {
            log::warn!("⚠️ no system font found; overlay text disabled (set font_path)");
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_explicit_font_is_an_error() {
        let err = resolve_font(Some(Path::new("/definitely/not/here.ttf"))).unwrap_err();
        assert!(matches!(err, PipelineError::Font { .. }), "{err}");
    }

    #[test]
    fn garbage_font_file_is_rejected() {
        let path = std::env::temp_dir().join(format!("posture_core_bad_font_{}.ttf", std::process::id()));
        std::fs::write(&path, b"not a font").unwrap();
        assert!(load_font(&path).is_err());
        let _ = std::fs::remove_file(&path);
    }
}
