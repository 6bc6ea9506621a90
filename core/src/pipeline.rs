use chrono::{DateTime, Utc};
use image::RgbImage;
use serde::Serialize;

use crate::camera::{CameraSession, FrameSource};
use crate::classifier::{FrameClassifier, ThresholdProfile};
use crate::config::Config;
use crate::encode::{encode_jpeg, resize_frame};
use crate::error::{GeometryError, PipelineError};
use crate::metrics::PostureMetrics;
use crate::models::{ElapsedTimes, FrameAnalysis, LandmarkSet};
use crate::overlay::font::resolve_font;
use crate::overlay::OverlayRenderer;
use crate::pose::PoseExtractor;
use crate::session::{AlertHook, PostureNotifier, SessionAccumulator};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MissReason {
    /// Pose-modellen fant ingen person.
    NotDetected,
    /// Landemerker funnet, men vinkelen er udefinert (f.eks. punkt på øverste kant).
    DegenerateGeometry,
}

/// Klassifisert frame, klar for visning.
#[derive(Debug, Clone)]
pub struct FrameReport {
    pub jpeg: Vec<u8>,
    pub analysis: FrameAnalysis,
    pub elapsed: ElapsedTimes,
    pub alert_fired: bool,
}

#[derive(Debug, Clone)]
pub enum FrameOutcome {
    /// Kilden ga ingen frame. Ingenting er klassifisert eller telt.
    NoFrame,
    /// Frame uten brukbare landemerker. Akkumulatoren er uendret.
    NoPose {
        jpeg: Vec<u8>,
        elapsed: ElapsedTimes,
        reason: MissReason,
    },
    Analyzed(FrameReport),
}

impl FrameOutcome {
    pub fn jpeg(&self) -> Option<&[u8]> {
        match self {
            FrameOutcome::NoFrame => None,
            FrameOutcome::NoPose { jpeg, .. } => Some(jpeg),
            FrameOutcome::Analyzed(r) => Some(&r.jpeg),
        }
    }

    pub fn elapsed(&self) -> Option<&ElapsedTimes> {
        match self {
            FrameOutcome::NoFrame => None,
            FrameOutcome::NoPose { elapsed, .. } => Some(elapsed),
            FrameOutcome::Analyzed(r) => Some(&r.elapsed),
        }
    }

    /// (good_time, bad_time) slik den gamle get_frame returnerte dem.
    pub fn good_bad_secs(&self) -> Option<(f64, f64)> {
        self.elapsed().map(|e| (e.good_time, e.bad_time))
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SessionSummary {
    pub started_at: DateTime<Utc>,
    pub profile: ThresholdProfile,
    pub fps: f64,
    pub good_frames: u64,
    pub bad_frames: u64,
    pub elapsed: ElapsedTimes,
}

/// Alt som tilhører én kameraøkt: teller, klassifiserer, overlay, varsling og metrics.
#[derive(Debug)]
pub struct PostureSession {
    config: Config,
    classifier: FrameClassifier,
    accumulator: SessionAccumulator,
    renderer: OverlayRenderer,
    alert: AlertHook,
    metrics: PostureMetrics,
    started_at: DateTime<Utc>,
    last_fps: f64,
}

impl PostureSession {
    pub fn new(config: Config) -> Result<Self, PipelineError> {
        config.validate()?;
        let metrics = PostureMetrics::new()?;
        let alert = AlertHook::noop(config.alert_policy, config.alert_after_secs);
        let renderer = OverlayRenderer::new(resolve_font(config.font_path.as_deref())?);
        log::info!("posture session started (profile={:?})", config.profile);

        Ok(Self {
            classifier: FrameClassifier::new(config.profile),
            accumulator: SessionAccumulator::new(),
            renderer,
            alert,
            metrics,
            started_at: Utc::now(),
            last_fps: 0.0,
            config,
        })
    }

    pub fn with_notifier(mut self, notifier: Box<dyn PostureNotifier>) -> Self {
        self.alert.set_notifier(notifier);
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn accumulator(&self) -> &SessionAccumulator {
        &self.accumulator
    }

    pub fn metrics(&self) -> &PostureMetrics {
        &self.metrics
    }

    pub fn elapsed(&self, fps: f64) -> ElapsedTimes {
        self.accumulator.elapsed(fps)
    }

    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            started_at: self.started_at,
            profile: self.config.profile,
            fps: self.last_fps,
            good_frames: self.accumulator.good_frame_count(),
            bad_frames: self.accumulator.bad_frame_count(),
            elapsed: self.accumulator.elapsed(self.last_fps),
        }
    }

    /// Kilden ga ingen frame.
    pub fn record_capture_miss(&mut self) -> FrameOutcome {
        self.metrics.frames_no_capture_total.inc();
        FrameOutcome::NoFrame
    }

    /// Klassifiser, tell, tegn og kod én (allerede skalert) frame.
    pub fn evaluate(
        &mut self,
        mut frame: RgbImage,
        landmarks: Option<LandmarkSet>,
        fps: f64,
    ) -> Result<FrameOutcome, PipelineError> {
        self.last_fps = fps;
        let (w, h) = frame.dimensions();

        let measured = match landmarks {
            None => Err(MissReason::NotDetected),
            Some(set) => set
                .checked_pixels(w, h)
                .and_then(|px| self.classifier.measure(&px))
                .map_err(|e: GeometryError| {
                    log::debug!("degenerate landmarks: {e}");
                    MissReason::DegenerateGeometry
                }),
        };

        let analysis = match measured {
            Ok(a) => a,
            Err(reason) => {
                self.metrics.frames_no_pose_total.inc();
                let elapsed = self.accumulator.elapsed(fps);
                self.renderer.render_miss(&mut frame, &elapsed);
                let jpeg = encode_jpeg(&frame, self.config.jpeg_quality)?;
                log::debug!("frame skipped: {reason:?}");
                return Ok(FrameOutcome::NoPose { jpeg, elapsed, reason });
            }
        };

        self.accumulator.record(analysis.verdict);
        if analysis.verdict.is_good() {
            self.metrics.frames_good_total.inc();
        } else {
            self.metrics.frames_bad_total.inc();
        }

        let elapsed = self.accumulator.elapsed(fps);
        let alert_fired = self.alert.check(&elapsed);
        if alert_fired {
            self.metrics.alerts_total.inc();
        }

        log::debug!(
            "neck={:.1} back={:.1} verdict={:?} good={:.1}s bad={:.1}s",
            analysis.angles.neck_angle,
            analysis.angles.back_angle,
            analysis.verdict,
            elapsed.good_time,
            elapsed.bad_time
        );

        self.renderer.render(&mut frame, &analysis, &elapsed);
        let jpeg = encode_jpeg(&frame, self.config.jpeg_quality)?;

        Ok(FrameOutcome::Analyzed(FrameReport {
            jpeg,
            analysis,
            elapsed,
            alert_fired,
        }))
    }
}

/// Eksplisitt kontekst: pose-modell + økt. Ingen globale singletons.
pub struct PostureContext<P: PoseExtractor> {
    extractor: P,
    session: PostureSession,
}

impl<P: PoseExtractor> PostureContext<P> {
    pub fn new(extractor: P, config: Config) -> Result<Self, PipelineError> {
        Ok(Self {
            extractor,
            session: PostureSession::new(config)?,
        })
    }

    pub fn with_notifier(mut self, notifier: Box<dyn PostureNotifier>) -> Self {
        self.session = self.session.with_notifier(notifier);
        self
    }

    pub fn session(&self) -> &PostureSession {
        &self.session
    }

    /// capture → resize → pose → klassifiser → tell → overlay → JPEG
    pub fn process_frame<S: FrameSource>(
        &mut self,
        camera: &mut CameraSession<S>,
    ) -> Result<FrameOutcome, PipelineError> {
        let raw = match camera.read_frame() {
            Ok(Some(img)) => img,
            Ok(None) => return Ok(self.session.record_capture_miss()),
            Err(e) => {
                log::warn!("capture failed: {e}");
                return Ok(self.session.record_capture_miss());
            }
        };

        let fps = camera.fps();
        let frame = resize_frame(&raw, self.session.config().effective_resize_ratio());
        let landmarks = self.extractor.extract_landmarks(&frame)?;
        self.session.evaluate(frame, landmarks, fps)
    }
}
