use prometheus::{Encoder, IntCounter, Opts, Registry, TextEncoder};

/// Tellere per økt. Eget Registry, ingen globale singletons.
#[derive(Clone)]
pub struct PostureMetrics {
    registry: Registry,
    pub frames_good_total: IntCounter,
    pub frames_bad_total: IntCounter,
    pub frames_no_pose_total: IntCounter,
    pub frames_no_capture_total: IntCounter,
    pub alerts_total: IntCounter,
}

fn counter(registry: &Registry, name: &str, help: &str) -> prometheus::Result<IntCounter> {
    let c = IntCounter::with_opts(Opts::new(name, help).namespace("posture"))?;
    registry.register(Box::new(c.clone()))?;
    Ok(c)
}

impl PostureMetrics {
    pub fn new() -> prometheus::Result<Self> {
        let registry = Registry::new();
        Ok(Self {
            frames_good_total: counter(&registry, "frames_good_total", "Frames classified good")?,
            frames_bad_total: counter(&registry, "frames_bad_total", "Frames classified bad")?,
            frames_no_pose_total: counter(
                &registry,
                "frames_no_pose_total",
                "Frames without usable landmarks",
            )?,
            frames_no_capture_total: counter(
                &registry,
                "frames_no_capture_total",
                "Reads where the frame source returned no image",
            )?,
            alerts_total: counter(&registry, "alerts_total", "Sustained bad posture alerts")?,
            registry,
        })
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Prometheus tekstformat.
    pub fn render_text(&self) -> String {
        let mut buf = Vec::new();
        let encoder = TextEncoder::new();
        if let Err(e) = encoder.encode(&self.registry.gather(), &mut buf) {
            log::debug!("metrics encode failed: {e}");
            return String::new();
        }
        String::from_utf8(buf).unwrap_or_default()
    }
}

impl std::fmt::Debug for PostureMetrics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PostureMetrics")
            .field("frames_good_total", &self.frames_good_total.get())
            .field("frames_bad_total", &self.frames_bad_total.get())
            .field("frames_no_pose_total", &self.frames_no_pose_total.get())
            .field("frames_no_capture_total", &self.frames_no_capture_total.get())
            .field("alerts_total", &self.alerts_total.get())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_show_up_in_text_output() {
        let m = PostureMetrics::new().unwrap();
        m.frames_good_total.inc();
        m.frames_good_total.inc();
        m.alerts_total.inc();
        let text = m.render_text();
        assert!(text.contains("posture_frames_good_total 2"), "{text}");
        assert!(text.contains("posture_alerts_total 1"), "{text}");
    }

    #[test]
    fn two_sessions_do_not_share_counters() {
        let a = PostureMetrics::new().unwrap();
        let b = PostureMetrics::new().unwrap();
        a.frames_bad_total.inc();
        assert_eq!(a.frames_bad_total.get(), 1);
        assert_eq!(b.frames_bad_total.get(), 0);
    }
}
