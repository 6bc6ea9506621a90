// core/tests/test_session.rs
use std::cell::Cell;
use std::rc::Rc;

use posture_core::session::{AlertHook, AlertPolicy, SessionAccumulator};
use posture_core::{ElapsedTimes, PostureVerdict};

const EPS: f64 = 1e-9;

#[test]
fn record_is_monotonic_and_counts_every_frame() {
    let mut acc = SessionAccumulator::new();
    let pattern = [PostureVerdict::Good, PostureVerdict::Bad, PostureVerdict::Bad];
    let (mut prev_g, mut prev_b) = (0, 0);

    for n in 1..=300u64 {
        acc.record(pattern[(n as usize * 7) % 3]);
        assert_eq!(acc.good_frame_count() + acc.bad_frame_count(), n);
        assert!(acc.good_frame_count() >= prev_g);
        assert!(acc.bad_frame_count() >= prev_b);
        prev_g = acc.good_frame_count();
        prev_b = acc.bad_frame_count();
    }
    assert_eq!(acc.total_frames(), 300);
}

#[test]
fn five_good_five_bad_at_10_fps() {
    let mut acc = SessionAccumulator::new();
    for _ in 0..5 {
        acc.record(PostureVerdict::Good);
    }
    for _ in 0..5 {
        acc.record(PostureVerdict::Bad);
    }
    let e = acc.elapsed(10.0);
    assert!((e.good_time - 0.5).abs() < EPS);
    assert!((e.bad_time - 0.5).abs() < EPS);
    assert!((e.total_time - 1.0).abs() < EPS);
    assert!((e.good_percent.unwrap() - 50.0).abs() < EPS);
}

#[test]
fn elapsed_matches_counts_over_fps() {
    let mut acc = SessionAccumulator::new();
    let (g, b) = (17u64, 4u64);
    (0..g).for_each(|_| acc.record(PostureVerdict::Good));
    (0..b).for_each(|_| acc.record(PostureVerdict::Bad));
    let f = 29.97;
    let e = acc.elapsed(f);
    assert!((e.good_time - g as f64 / f).abs() < EPS);
    assert!((e.bad_time - b as f64 / f).abs() < EPS);
    assert!((e.good_percent.unwrap() - 100.0 * g as f64 / (g + b) as f64).abs() < 1e-6);
}

#[test]
fn zero_fps_and_empty_session_use_sentinel() {
    let mut acc = SessionAccumulator::new();
    assert_eq!(acc.elapsed(30.0).good_percent, None); // ingen frames ennå

    acc.record(PostureVerdict::Good);
    let e = acc.elapsed(0.0);
    assert_eq!(e, ElapsedTimes::default());
    assert_eq!(e.good_percent, None);
    assert_eq!(acc.elapsed(f64::NAN).good_percent, None);
    assert_eq!(acc.elapsed(-5.0).total_time, 0.0);
}

fn bad_secs(secs: f64) -> ElapsedTimes {
    ElapsedTimes {
        good_time: 0.0,
        bad_time: secs,
        total_time: secs,
        good_percent: Some(0.0),
    }
}

fn counting_hook(policy: AlertPolicy) -> (AlertHook, Rc<Cell<u32>>) {
    let calls = Rc::new(Cell::new(0));
    let c = calls.clone();
    let hook = AlertHook::new(
        Box::new(move |_e: &ElapsedTimes| c.set(c.get() + 1)),
        policy,
        10.0,
    );
    (hook, calls)
}

#[test]
fn alert_fires_once_per_crossing_by_default() {
    let (mut hook, calls) = counting_hook(AlertPolicy::OncePerCrossing);
    assert!(!hook.check(&bad_secs(10.0))); // ikke strengt over
    assert!(hook.check(&bad_secs(10.1)));
    assert!(!hook.check(&bad_secs(10.2)));
    assert!(!hook.check(&bad_secs(25.0)));
    assert_eq!(calls.get(), 1);
}

#[test]
fn alert_every_frame_matches_legacy_behaviour() {
    let (mut hook, calls) = counting_hook(AlertPolicy::EveryFrame);
    for s in [9.0, 10.5, 11.0, 12.0] {
        hook.check(&bad_secs(s));
    }
    assert_eq!(calls.get(), 3);
}

#[test]
fn noop_hook_still_tracks_the_crossing() {
    let mut hook = AlertHook::noop(AlertPolicy::OncePerCrossing, 5.0);
    assert!(!hook.check(&bad_secs(5.0)));
    assert!(hook.check(&bad_secs(5.5)));
    assert!(!hook.check(&bad_secs(6.0)));
}
