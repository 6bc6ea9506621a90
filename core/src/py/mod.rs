// Python-binding (feature "python"). Python-siden eier kamera og pose-modell
// (cv2 + mediapipe); Rust klassifiserer, teller, tegner og koder JPEG.

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use pyo3::types::PyBytes;
use pyo3::wrap_pyfunction;

use serde::{Deserialize, Serialize};
use serde_json as json;
use serde_path_to_error as spte;

use crate::classifier::{FrameClassifier, ThresholdProfile};
use crate::config::Config;
use crate::encode::frame_from_rgb;
use crate::models::{LandmarkSet, PostureVerdict};
use crate::pipeline::{FrameOutcome, PostureSession};

fn parse_json<'de, T: Deserialize<'de>>(what: &str, s: &'de str) -> PyResult<T> {
    let mut de = json::Deserializer::from_str(s);
    spte::deserialize(&mut de).map_err(|e| {
        let path = e.path().to_string();
        PyValueError::new_err(format!("parse error ({what}) at {path}: {}", e.inner()))
    })
}

fn parse_profile(s: &str) -> PyResult<ThresholdProfile> {
    ThresholdProfile::parse(s)
        .ok_or_else(|| PyValueError::new_err(format!("unknown profile {s:?} (strict|relaxed)")))
}

#[pyclass(name = "PostureSession", unsendable)]
struct PyPostureSession {
    inner: PostureSession,
}

#[pymethods]
impl PyPostureSession {
    #[new]
    #[pyo3(signature = (profile = "strict", config_json = None))]
    fn new(profile: &str, config_json: Option<&str>) -> PyResult<Self> {
        let mut cfg = match config_json {
            Some(s) => Config::from_json_str(s).map_err(|e| PyValueError::new_err(e.to_string()))?,
            None => Config::default(),
        };
        cfg.profile = parse_profile(profile)?;
        let inner = PostureSession::new(cfg).map_err(|e| PyValueError::new_err(e.to_string()))?;
        Ok(Self { inner })
    }

    /// Resize-faktoren Python-siden skal bruke før pose-modellen.
    #[getter]
    fn resize_ratio(&self) -> f64 {
        self.inner.config().effective_resize_ratio()
    }

    /// rgb: RGB8-bytes (allerede skalert). Returnerer (jpeg, good_time, bad_time).
    #[pyo3(signature = (rgb, width, height, fps, landmarks_json = None))]
    fn process(
        &mut self,
        py: Python<'_>,
        rgb: &[u8],
        width: u32,
        height: u32,
        fps: f64,
        landmarks_json: Option<&str>,
    ) -> PyResult<(PyObject, f64, f64)> {
        let frame = frame_from_rgb(rgb.to_vec(), width, height)
            .map_err(|e| PyValueError::new_err(e.to_string()))?;
        let landmarks: Option<LandmarkSet> = match landmarks_json {
            Some(s) => parse_json("LandmarkSet", s)?,
            None => None,
        };

        let outcome = self
            .inner
            .evaluate(frame, landmarks, fps)
            .map_err(|e| PyValueError::new_err(e.to_string()))?;

        let jpeg = outcome.jpeg().unwrap_or_default();
        let (good, bad) = outcome.good_bad_secs().unwrap_or((0.0, 0.0));
        if let FrameOutcome::NoPose { reason, .. } = &outcome {
            log::debug!("python frame without pose: {reason:?}");
        }
        Ok((PyBytes::new(py, jpeg).into_py(py), good, bad))
    }

    fn summary_json(&self) -> PyResult<String> {
        json::to_string(&self.inner.summary()).map_err(|e| PyValueError::new_err(e.to_string()))
    }

    fn metrics_text(&self) -> String {
        self.inner.metrics().render_text()
    }
}

#[derive(Deserialize)]
struct ClassifyIn {
    neck_angle: f64,
    back_angle: f64,
    #[serde(default)]
    profile: ThresholdProfile,
}

#[derive(Serialize)]
struct ClassifyOut {
    verdict: PostureVerdict,
    neck_max_deg: f64,
    back_max_deg: f64,
}

/// {"neck_angle":..,"back_angle":..,"profile":"strict"} → {"verdict":"good",...}
#[pyfunction]
fn classify_angles_json(json_in: &str) -> PyResult<String> {
    let parsed: ClassifyIn = parse_json("ClassifyIn", json_in)?;
    let classifier = FrameClassifier::new(parsed.profile);
    let out = ClassifyOut {
        verdict: classifier.classify(parsed.neck_angle, parsed.back_angle),
        neck_max_deg: parsed.profile.neck_max_deg(),
        back_max_deg: parsed.profile.back_max_deg(),
    };
    json::to_string(&out).map_err(|e| PyValueError::new_err(e.to_string()))
}

// ──────────────────────────────────────────────────────────────────────────────
// PyO3-MODUL
// ──────────────────────────────────────────────────────────────────────────────

#[pymodule]
fn posture_core(_py: Python, m: &PyModule) -> PyResult<()> {
    m.add_class::<PyPostureSession>()?;
    m.add_function(wrap_pyfunction!(classify_angles_json, m)?)?;
    Ok(())
}
