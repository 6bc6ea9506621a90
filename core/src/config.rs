use serde::{Deserialize, Serialize};
use serde_json as json;
use serde_path_to_error as spte;
use std::path::{Path, PathBuf};

use crate::classifier::ThresholdProfile;
use crate::encode::DEFAULT_JPEG_QUALITY;
use crate::error::ConfigError;
use crate::session::{AlertPolicy, DEFAULT_ALERT_AFTER_SECS};

/// Innstillinger for en økt. Standardverdiene er de faste konstantene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub profile: ThresholdProfile,
    /// None => profilens resize (4/5 for strict, 1/2 for relaxed)
    pub resize_ratio: Option<f64>,
    pub jpeg_quality: u8,
    pub alert_after_secs: f64,
    pub alert_policy: AlertPolicy,
    /// fps for replay-kilder uten egen fps
    pub replay_fps: f64,
    /// TTF/OTF for overlay-tekst. None => første systemfont som finnes.
    pub font_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            profile: ThresholdProfile::Strict,
            resize_ratio: None,
            jpeg_quality: DEFAULT_JPEG_QUALITY,
            alert_after_secs: DEFAULT_ALERT_AFTER_SECS,
            alert_policy: AlertPolicy::OncePerCrossing,
            replay_fps: 30.0,
            font_path: None,
        }
    }
}

impl Config {
    pub fn for_profile(profile: ThresholdProfile) -> Self {
        Self { profile, ..Self::default() }
    }

    pub fn effective_resize_ratio(&self) -> f64 {
        self.resize_ratio.unwrap_or_else(|| self.profile.resize_ratio())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(r) = self.resize_ratio {
            if !(r.is_finite() && r > 0.0 && r <= 4.0) {
                return Err(ConfigError::Invalid(format!("resize_ratio out of range: {r}")));
            }
        }
        if self.jpeg_quality == 0 || self.jpeg_quality > 100 {
            return Err(ConfigError::Invalid(format!("jpeg_quality must be 1..=100, got {}", self.jpeg_quality)));
        }
        if !(self.alert_after_secs.is_finite() && self.alert_after_secs >= 0.0) {
            return Err(ConfigError::Invalid("alert_after_secs must be >= 0".into()));
        }
        if !(self.replay_fps.is_finite() && self.replay_fps >= 0.0) {
            return Err(ConfigError::Invalid("replay_fps must be >= 0".into()));
        }
        Ok(())
    }

    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        let mut de = json::Deserializer::from_str(s);
        let cfg: Config = spte::deserialize(&mut de).map_err(|e| ConfigError::Parse {
            path: e.path().to_string(),
            message: e.inner().to_string(),
        })?;
        cfg.validate()?;
        Ok(cfg)
    }
}

/// Leser config fra disk (JSON).
/// Hvis filen ikke finnes, returneres default.
pub fn load_config(path: impl AsRef<Path>) -> Result<Config, ConfigError> {
    let path = path.as_ref();
    if path.exists() {
        let contents = std::fs::read_to_string(path)?;
        let cfg = Config::from_json_str(&contents)?;
        log::info!("📂 config loaded from {} (profile={:?})", path.display(), cfg.profile);
        Ok(cfg)
    } else {
        log::info!("⚠️ no config at {}, using defaults", path.display());
        Ok(Config::default())
    }
}

/// Lagrer config som JSON (pretty-print).
pub fn save_config(cfg: &Config, path: impl AsRef<Path>) -> Result<(), ConfigError> {
    cfg.validate()?;
    let json = serde_json::to_string_pretty(cfg)?;
    std::fs::write(path.as_ref(), json)?;
    log::info!("✅ config saved to {}", path.as_ref().display());
    Ok(())
}
