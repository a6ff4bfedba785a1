use super::*;
use crate::config::ViewerConfig;
use crate::format::data::AnimationData;
use crate::foundation::core::Vec3;

fn session_with(frames: u32, fps: f32) -> ViewerSession {
    let mut s = ViewerSession::new(ViewerConfig::default()).unwrap();
    let vertices = vec![Vec3::ZERO; frames as usize];
    s.set_data(AnimationData::new(frames, 1, fps, "", vertices, Vec::new()).unwrap());
    s
}

#[test]
fn manual_clock_only_moves_when_told() {
    let c = ManualClock::new(10.0);
    assert_eq!(c.now_ms(), 10.0);
    c.sleep_ms(5.0);
    c.advance(2.5);
    c.sleep_ms(-1.0);
    assert_eq!(c.now_ms(), 17.5);
}

#[test]
fn stops_when_paused_or_empty() {
    let mut driver = PlaybackDriver::new(ManualClock::new(0.0), 10.0);
    let mut empty = ViewerSession::new(ViewerConfig::default()).unwrap();
    empty.toggle_play(0.0);
    assert_eq!(driver.on_refresh(&mut empty), TickOutcome::Stop);

    let mut paused = session_with(10, 30.0);
    assert_eq!(driver.on_refresh(&mut paused), TickOutcome::Stop);
}

#[test]
fn refresh_reports_frame_advances() {
    let mut driver = PlaybackDriver::new(ManualClock::new(0.0), 10.0);
    let mut s = session_with(10, 30.0);
    s.toggle_play(driver.now_ms());

    driver.clock().advance(20.0);
    assert_eq!(
        driver.on_refresh(&mut s),
        TickOutcome::Continue { advanced: false }
    );
    driver.clock().advance(20.0);
    assert_eq!(
        driver.on_refresh(&mut s),
        TickOutcome::Continue { advanced: true }
    );
    assert_eq!(s.playback().current_frame, 1);
}

#[test]
fn run_for_plays_in_real_time() {
    let mut driver = PlaybackDriver::new(ManualClock::new(0.0), 10.0);
    let mut s = session_with(100, 25.0);
    s.toggle_play(driver.now_ms());

    let mut shown = Vec::new();
    let refreshes = driver.run_for(&mut s, 1000.0, |s| shown.push(s.playback().current_frame));

    assert_eq!(refreshes, 100);
    // 990ms of ticks at 40ms per frame.
    assert_eq!(s.playback().current_frame, 24);
    assert_eq!(shown.len(), 24);
    assert!(shown.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn run_for_returns_immediately_when_paused() {
    let mut driver = PlaybackDriver::new(ManualClock::new(0.0), 10.0);
    let mut s = session_with(10, 30.0);
    let refreshes = driver.run_for(&mut s, 1000.0, |_| {});
    assert_eq!(refreshes, 0);
    assert_eq!(driver.now_ms(), 0.0);
}

#[test]
fn bad_refresh_interval_falls_back_to_60hz() {
    let driver = PlaybackDriver::new(ManualClock::new(0.0), 0.0);
    assert_eq!(driver.refresh_interval_ms, DEFAULT_REFRESH_MS);
}
