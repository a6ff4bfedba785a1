use super::*;

fn playing_at(t: f64) -> PlaybackState {
    toggle_play(PlaybackState::new(), t)
}

#[test]
fn toggle_records_baseline() {
    let p = playing_at(1234.0);
    assert!(p.is_playing);
    assert_eq!(p.last_tick_ms, 1234.0);
    let p = toggle_play(p, 2000.0);
    assert!(!p.is_playing);
    assert_eq!(p.last_tick_ms, 1234.0);
}

#[test]
fn paused_ticks_do_nothing() {
    let p = PlaybackState::new();
    assert_eq!(tick(p, 10_000.0, 30.0, 10), p);
}

#[test]
fn less_than_a_frame_does_not_advance() {
    let p = playing_at(0.0);
    let q = tick(p, 20.0, 30.0, 10);
    assert_eq!(q, p);
}

#[test]
fn hundred_ms_at_30fps_advances_three_frames() {
    let p = playing_at(1000.0);
    let q = tick(p, 1100.0, 30.0, 10);
    assert_eq!(q.current_frame, 3);
    let frame_duration: f64 = 1000.0 / 30.0;
    let expected_carry = (100.0 - 3.0 * frame_duration).max(0.0);
    assert!((q.carry_ms - expected_carry).abs() < 1e-9);
    assert!((q.last_tick_ms - (1100.0 - q.carry_ms)).abs() < 1e-9);
}

#[test]
fn remainder_is_carried_not_dropped() {
    let p = playing_at(0.0);
    let q = tick(p, 110.0, 30.0, 10);
    assert_eq!(q.current_frame, 3);
    assert!((q.carry_ms - 10.0).abs() < 1e-6);
    assert!((q.last_tick_ms - 100.0).abs() < 1e-6);

    // 24ms later only 34ms have accumulated since the baseline: one more frame.
    let r = tick(q, 134.0, 30.0, 10);
    assert_eq!(r.current_frame, 4);
}

#[test]
fn irregular_ticks_do_not_drift() {
    let fps = 24.0f32;
    let mut p = playing_at(0.0);
    let mut t = 0.0;
    let steps = [7.0, 13.0, 41.0, 3.0, 29.0, 55.0, 16.0, 8.0];
    for i in 0..200 {
        t += steps[i % steps.len()];
        p = tick(p, t, fps, 1_000_000);
    }
    let expected = (t * f64::from(fps) / 1000.0).floor() as u32;
    assert!(p.current_frame.abs_diff(expected) <= 1, "{} vs {expected}", p.current_frame);
}

#[test]
fn wraps_at_frame_count() {
    let p = PlaybackState {
        current_frame: 8,
        ..playing_at(0.0)
    };
    let q = tick(p, 100.0, 30.0, 10);
    assert_eq!(q.current_frame, 1);

    // A long stall wraps many times but lands in range.
    let r = tick(q, 1.0e9, 30.0, 10);
    assert!(r.current_frame < 10);
}

#[test]
fn backwards_clock_rebaselines() {
    let p = playing_at(500.0);
    let q = tick(p, 100.0, 30.0, 10);
    assert_eq!(q.current_frame, 0);
    assert_eq!(q.last_tick_ms, 100.0);
}

#[test]
fn scrub_clamps_and_pauses() {
    let p = playing_at(0.0);
    let q = scrub(p, 7, 10);
    assert_eq!(q.current_frame, 7);
    assert!(!q.is_playing);
    assert_eq!(scrub(p, 99, 10).current_frame, 9);
    assert_eq!(tick(q, 10_000.0, 30.0, 10), q);
}

#[test]
fn reset_keeps_play_state() {
    let p = PlaybackState {
        current_frame: 5,
        carry_ms: 3.0,
        ..playing_at(0.0)
    };
    let r = p.reset();
    assert_eq!(r.current_frame, 0);
    assert_eq!(r.carry_ms, 0.0);
    assert!(r.is_playing);
}
