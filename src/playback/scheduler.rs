use crate::foundation::core::FrameIndex;

// Absorbs rounding when `elapsed` is an exact multiple of the frame duration.
const FRAME_COUNT_EPSILON: f64 = 1e-9;

/// Playback state for one viewer session.
///
/// `tick`, `scrub` and `toggle_play` are pure: they take the state by value and return the next
/// one, so a test can drive playback with made-up timestamps.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PlaybackState {
    /// Frame currently shown.
    pub current_frame: u32,
    /// Whether ticks advance the frame.
    pub is_playing: bool,
    /// Timestamp (ms) of the last frame advance, minus the carried remainder.
    pub last_tick_ms: f64,
    /// Sub-frame time (ms) carried over from the last advance.
    pub carry_ms: f64,
}

impl PlaybackState {
    /// Paused at frame 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current frame as an index.
    pub fn frame(&self) -> FrameIndex {
        FrameIndex(self.current_frame)
    }

    /// Forget the position: frame 0, no carried time. The play/pause state is kept.
    pub fn reset(self) -> Self {
        Self {
            current_frame: 0,
            carry_ms: 0.0,
            ..self
        }
    }
}

/// Flip between playing and paused.
///
/// Entering the playing state records `now_ms` as the tick baseline.
pub fn toggle_play(playback: PlaybackState, now_ms: f64) -> PlaybackState {
    if playback.is_playing {
        PlaybackState {
            is_playing: false,
            ..playback
        }
    } else {
        PlaybackState {
            is_playing: true,
            last_tick_ms: now_ms,
            carry_ms: 0.0,
            ..playback
        }
    }
}

/// Advance playback to wall-clock time `now_ms`.
///
/// While playing, every whole frame duration (`1000 / fps` ms) elapsed since the baseline
/// advances the frame by one, wrapping at `frame_count`. The unconsumed remainder is kept by
/// moving the baseline to `now_ms - remainder`, so irregular tick spacing does not drift.
pub fn tick(playback: PlaybackState, now_ms: f64, fps: f32, frame_count: u32) -> PlaybackState {
    if !playback.is_playing || frame_count == 0 {
        return playback;
    }
    let fps = f64::from(fps);
    if !fps.is_finite() || fps <= 0.0 {
        return playback;
    }

    let elapsed = now_ms - playback.last_tick_ms;
    if !elapsed.is_finite() || elapsed < 0.0 {
        // Clock went backwards or the baseline is garbage: restart from now.
        return PlaybackState {
            last_tick_ms: now_ms,
            carry_ms: 0.0,
            ..playback
        };
    }

    let frame_duration = 1000.0 / fps;
    let steps = (elapsed * fps / 1000.0 + FRAME_COUNT_EPSILON).floor();
    if steps < 1.0 {
        return playback;
    }

    let carry = (elapsed - steps * frame_duration).clamp(0.0, frame_duration);
    let advance = (steps % f64::from(frame_count)) as u32;
    let current = (u64::from(playback.current_frame % frame_count) + u64::from(advance))
        % u64::from(frame_count);

    PlaybackState {
        current_frame: current as u32,
        is_playing: true,
        last_tick_ms: now_ms - carry,
        carry_ms: carry,
    }
}

/// Jump to `frame`, clamped into `0..frame_count`, and pause.
pub fn scrub(playback: PlaybackState, frame: u32, frame_count: u32) -> PlaybackState {
    PlaybackState {
        current_frame: frame.min(frame_count.saturating_sub(1)),
        is_playing: false,
        carry_ms: 0.0,
        ..playback
    }
}

#[cfg(test)]
#[path = "../../tests/unit/playback/scheduler.rs"]
mod tests;
