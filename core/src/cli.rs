use crate::overlay::percent_label;
use crate::pipeline::SessionSummary;

pub fn session_report(summary: &SessionSummary) -> String {
    let e = &summary.elapsed;
    let mut out = String::new();
    out.push_str("--- Posture Report ---\n");
    out.push_str(&format!("Started: {}\n", summary.started_at.to_rfc3339()));
    out.push_str(&format!("Profile: {:?} @ {} fps\n", summary.profile, summary.fps));
    out.push_str(&format!("Frames good/bad: {}/{}\n", summary.good_frames, summary.bad_frames));
    out.push_str(&format!("Good Posture Duration: {:.1} seconds\n", e.good_time));
    out.push_str(&format!("Bad Posture Duration: {:.1} seconds\n", e.bad_time));
    out.push_str(&format!("Total Duration: {:.1} seconds\n", e.total_time));
    out.push_str(&format!("Good: {}\n", percent_label(e)));
    out
}

pub fn print_session_report(summary: &SessionSummary) {
    print!("{}", session_report(summary));
}
