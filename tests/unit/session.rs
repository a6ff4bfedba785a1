use super::*;
use crate::encode::sink::InMemorySink;
use crate::format::encode::encode;
use crate::foundation::core::Vec3;
use crate::render::plan::DrawOp;
use crate::render::surface::RecordingSurface;

fn animation(frames: u32, fps: f32, offset: Vec3) -> AnimationData {
    let mut vertices = Vec::new();
    for f in 0..frames {
        let dx = f as f32 * 0.1;
        vertices.push(offset + Vec3::new(dx, 0.0, 0.0));
        vertices.push(offset + Vec3::new(dx + 1.0, 0.0, 0.0));
        vertices.push(offset + Vec3::new(dx, 2.0, 0.0));
    }
    AnimationData::new(frames, 3, fps, "#ff0000", vertices, vec![[0, 1, 2]]).unwrap()
}

fn bytes(frames: u32, fps: f32) -> Vec<u8> {
    encode(&animation(frames, fps, Vec3::ZERO)).unwrap()
}

fn small_session() -> ViewerSession {
    ViewerSession::new(ViewerConfig {
        width: 64,
        height: 48,
        ..ViewerConfig::default()
    })
    .unwrap()
}

#[test]
fn new_session_is_empty() {
    let s = small_session();
    assert!(s.data().is_none());
    assert_eq!(s.load_state(), &LoadState::Empty);
    assert_eq!(s.status_text(), "No data loaded");
    assert_eq!(s.camera().center_x, 32.0);
    assert_eq!(s.camera().center_y, 24.0);
    assert!(!s.is_playing());
}

#[test]
fn rejects_invalid_config() {
    let cfg = ViewerConfig {
        width: 0,
        ..ViewerConfig::default()
    };
    assert!(ViewerSession::new(cfg).is_err());
}

#[test]
fn load_resets_playback_and_centers_camera() {
    let mut s = small_session();
    s.load(&bytes(5, 30.0)).unwrap();
    s.scrub(3);
    assert_eq!(s.playback().current_frame, 3);

    s.load(&bytes(4, 30.0)).unwrap();
    assert_eq!(s.playback().current_frame, 0);
    assert_eq!(s.data().unwrap().frames(), 4);
    assert_eq!(s.load_state(), &LoadState::Loaded);
    // Frame 0 spans x in [0, 1], y in [0, 2].
    assert_eq!(s.camera().target, Vec3::new(0.5, 1.0, 0.0));
}

#[test]
fn auto_center_can_be_disabled() {
    let mut s = ViewerSession::new(ViewerConfig {
        auto_center: false,
        ..ViewerConfig::default()
    })
    .unwrap();
    s.load(&bytes(2, 30.0)).unwrap();
    assert_eq!(s.camera().target, Vec3::new(0.0, 0.9, 0.0));
}

#[test]
fn failed_load_keeps_previous_animation() {
    let mut s = small_session();
    s.load(&bytes(5, 30.0)).unwrap();
    s.scrub(2);
    let camera = *s.camera();

    let mut bad = bytes(5, 30.0);
    bad.pop();
    let err = s.load(&bad).unwrap_err();
    assert!(matches!(err, ViewerError::TruncatedBuffer { .. }));

    assert_eq!(s.data().unwrap().frames(), 5);
    assert_eq!(s.playback().current_frame, 2);
    assert_eq!(s.camera(), &camera);
    assert!(matches!(s.load_state(), LoadState::Failed(_)));
    assert_eq!(s.status_text(), "Error loading mesh");

    s.load(&bytes(3, 30.0)).unwrap();
    assert_eq!(s.status_text(), "Frame 1 / 3");
}

#[test]
fn status_text_is_one_based() {
    let mut s = small_session();
    s.load(&bytes(10, 30.0)).unwrap();
    s.scrub(9);
    assert_eq!(s.status_text(), "Frame 10 / 10");
}

#[test]
fn drag_and_zoom_use_configured_sensitivity() {
    let mut s = ViewerSession::new(ViewerConfig {
        drag_sensitivity: 0.02,
        zoom_sensitivity: 0.001,
        ..ViewerConfig::default()
    })
    .unwrap();
    s.drag(10.0, 0.0);
    assert!((s.camera().azimuth + 0.2).abs() < 1e-6);
    s.zoom(1000.0);
    assert!((s.camera().distance - 4.0).abs() < 1e-5);
}

#[test]
fn resize_recenters_and_ignores_zero() {
    let mut s = small_session();
    s.resize(200, 100);
    assert_eq!(s.canvas(), Canvas { width: 200, height: 100 });
    assert_eq!(s.camera().center_x, 100.0);
    assert_eq!(s.camera().center_y, 50.0);

    s.resize(0, 100);
    assert_eq!(s.canvas(), Canvas { width: 200, height: 100 });
}

#[test]
fn tick_and_scrub_without_data_are_noops() {
    let mut s = small_session();
    s.toggle_play(0.0);
    s.tick(1000.0);
    s.scrub(4);
    assert_eq!(s.playback().current_frame, 0);
}

#[test]
fn playback_advances_with_time() {
    let mut s = small_session();
    s.load(&bytes(10, 30.0)).unwrap();
    s.toggle_play(1000.0);
    s.tick(1100.0);
    assert_eq!(s.playback().current_frame, 3);
    s.toggle_play(1200.0);
    s.tick(5000.0);
    assert_eq!(s.playback().current_frame, 3);
}

#[test]
fn compile_without_data_is_placeholder() {
    let s = small_session();
    let plan = s.compile();
    assert!(matches!(plan.ops.last(), Some(DrawOp::Status { .. })));
}

#[test]
fn render_draws_current_frame() {
    let mut s = small_session();
    s.load(&bytes(2, 30.0)).unwrap();
    let mut surface = RecordingSurface::new();
    s.render(&mut surface).unwrap();
    assert_eq!(surface.frames(), 1);
    assert_eq!(surface.canvas(), Some(s.canvas()));
    let triangles = surface
        .ops()
        .iter()
        .filter(|op| matches!(op, DrawOp::Triangle { .. }))
        .count();
    assert_eq!(triangles, 1);
}

#[test]
fn render_range_streams_frames_in_order() {
    let mut s = small_session();
    s.load(&bytes(4, 24.0)).unwrap();
    let mut sink = InMemorySink::new();
    s.render_range(FrameRange::all(4), &mut sink).unwrap();

    let cfg = sink.config().unwrap();
    assert_eq!((cfg.width, cfg.height, cfg.fps), (64, 48, 24.0));
    let idx: Vec<u32> = sink.frames().iter().map(|(i, _)| i.0).collect();
    assert_eq!(idx, vec![0, 1, 2, 3]);
    for (_, frame) in sink.frames() {
        assert_eq!(frame.data.len(), 64 * 48 * 4);
    }
    // Playback position is untouched.
    assert_eq!(s.playback().current_frame, 0);
}

#[test]
fn render_range_validates_bounds() {
    let mut sink = InMemorySink::new();
    let mut s = small_session();
    assert!(s.render_range(FrameRange::all(1), &mut sink).is_err());

    s.load(&bytes(3, 30.0)).unwrap();
    assert!(s.render_range(FrameRange::all(4), &mut sink).is_err());
    let empty = FrameRange::new(FrameIndex(1), FrameIndex(1)).unwrap();
    assert!(s.render_range(empty, &mut sink).is_err());
}
