use serde::{Deserialize, Serialize};

use crate::models::{ElapsedTimes, PostureVerdict};

/// Dårlig holdning lenger enn dette (sek) utløser varsling.
pub const DEFAULT_ALERT_AFTER_SECS: f64 = 10.0;

/// Løpende telling av gode/dårlige frames for én kameraøkt.
/// Tellerne økes med nøyaktig én per frame og nullstilles aldri.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionAccumulator {
    good_frame_count: u64,
    bad_frame_count: u64,
}

impl SessionAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, verdict: PostureVerdict) {
        match verdict {
            PostureVerdict::Good => self.good_frame_count += 1,
            PostureVerdict::Bad => self.bad_frame_count += 1,
        }
    }

    pub fn good_frame_count(&self) -> u64 {
        self.good_frame_count
    }

    pub fn bad_frame_count(&self) -> u64 {
        self.bad_frame_count
    }

    pub fn total_frames(&self) -> u64 {
        self.good_frame_count + self.bad_frame_count
    }

    /// Frames → sekunder. fps <= 0 (eller ikke-endelig) gir 0 s og prosent = None.
    pub fn elapsed(&self, fps: f64) -> ElapsedTimes {
        if !(fps.is_finite() && fps > 0.0) {
            return ElapsedTimes::default();
        }
        let good_time = self.good_frame_count as f64 / fps;
        let bad_time = self.bad_frame_count as f64 / fps;
        let total_time = good_time + bad_time;
        let good_percent = if total_time > 0.0 {
            Some(100.0 * good_time / total_time)
        } else {
            None
        };

        ElapsedTimes {
            good_time,
            bad_time,
            total_time,
            good_percent,
        }
    }
}

/// Varslingskrok for vedvarende dårlig holdning.
pub trait PostureNotifier {
    fn notify_sustained_bad_posture(&self, elapsed: &ElapsedTimes);
}

/// Standard: gjør ingenting.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopNotifier;

impl PostureNotifier for NoopNotifier {
    fn notify_sustained_bad_posture(&self, _elapsed: &ElapsedTimes) {}
}

impl<F> PostureNotifier for F
where
    F: Fn(&ElapsedTimes),
{
    fn notify_sustained_bad_posture(&self, elapsed: &ElapsedTimes) {
        self(elapsed)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertPolicy {
    /// Fyr på hver frame så lenge bad_time er over terskelen.
    EveryFrame,
    /// Fyr én gang når terskelen krysses.
    #[default]
    OncePerCrossing,
}

/// Holder styr på terskelkryssing og kaller notifier.
pub struct AlertHook {
    notifier: Box<dyn PostureNotifier>,
    policy: AlertPolicy,
    threshold_secs: f64,
    above: bool,
}

impl AlertHook {
    pub fn new(notifier: Box<dyn PostureNotifier>, policy: AlertPolicy, threshold_secs: f64) -> Self {
        Self {
            notifier,
            policy,
            threshold_secs,
            above: false,
        }
    }

    /// Teller kryssinger uten å varsle noen. Utgangspunkt for en ny økt.
    pub fn noop(policy: AlertPolicy, threshold_secs: f64) -> Self {
        Self::new(Box::new(NoopNotifier), policy, threshold_secs)
    }

    pub fn set_notifier(&mut self, notifier: Box<dyn PostureNotifier>) {
        self.notifier = notifier;
    }

    /// Returnerer true hvis notifier ble kalt.
    pub fn check(&mut self, elapsed: &ElapsedTimes) -> bool {
        let over = elapsed.bad_time > self.threshold_secs;
        let fire = match self.policy {
            AlertPolicy::EveryFrame => over,
            AlertPolicy::OncePerCrossing => over && !self.above,
        };
        self.above = over;

        if fire {
            log::warn!(
                "⚠️ sustained bad posture: {:.1} s over {:.1} s limit",
                elapsed.bad_time,
                self.threshold_secs
            );
            self.notifier.notify_sustained_bad_posture(elapsed);
        }
        fire
    }
}

impl std::fmt::Debug for AlertHook {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AlertHook")
            .field("policy", &self.policy)
            .field("threshold_secs", &self.threshold_secs)
            .field("above", &self.above)
            .finish()
    }
}
