use std::cell::Cell;
use std::time::{Duration, Instant};

use crate::session::ViewerSession;

/// Refresh interval of a 60 Hz display.
pub const DEFAULT_REFRESH_MS: f64 = 1000.0 / 60.0;

/// Millisecond time source for the playback driver.
pub trait Clock {
    /// Monotonic time in milliseconds.
    fn now_ms(&self) -> f64;
    /// Wait for roughly `ms` milliseconds.
    fn sleep_ms(&self, ms: f64);
}

/// Wall clock backed by [`Instant`].
#[derive(Debug)]
pub struct SystemClock {
    origin: Instant,
}

impl Default for SystemClock {
    fn default() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl SystemClock {
    /// Clock whose zero is now.
    pub fn new() -> Self {
        Self::default()
    }
}

impl Clock for SystemClock {
    fn now_ms(&self) -> f64 {
        self.origin.elapsed().as_secs_f64() * 1000.0
    }

    fn sleep_ms(&self, ms: f64) {
        if ms.is_finite() && ms > 0.0 {
            std::thread::sleep(Duration::from_secs_f64(ms / 1000.0));
        }
    }
}

/// Clock that only moves when told to; sleeping advances it instantly.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<f64>,
}

impl ManualClock {
    /// Clock starting at `start_ms`.
    pub fn new(start_ms: f64) -> Self {
        Self {
            now: Cell::new(start_ms),
        }
    }

    /// Move time forward by `ms`.
    pub fn advance(&self, ms: f64) {
        self.now.set(self.now.get() + ms);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> f64 {
        self.now.get()
    }

    fn sleep_ms(&self, ms: f64) {
        if ms.is_finite() && ms > 0.0 {
            self.advance(ms);
        }
    }
}

/// What the host should do after a refresh callback.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    /// Still playing: schedule another refresh. `advanced` tells whether a redraw is needed.
    Continue {
        /// The frame changed during this refresh.
        advanced: bool,
    },
    /// Paused (or nothing loaded): stop scheduling refreshes.
    Stop,
}

/// Thin scheduling loop around [`ViewerSession::tick`].
///
/// The driver owns no viewer state; it reads the clock and calls `tick` only while the session is
/// playing, which is how pausing stops the loop.
#[derive(Debug)]
pub struct PlaybackDriver<C: Clock> {
    clock: C,
    refresh_interval_ms: f64,
}

impl<C: Clock> PlaybackDriver<C> {
    /// Driver refreshing every `refresh_interval_ms`; non-positive values use 60 Hz.
    pub fn new(clock: C, refresh_interval_ms: f64) -> Self {
        let refresh_interval_ms = if refresh_interval_ms.is_finite() && refresh_interval_ms > 0.0 {
            refresh_interval_ms
        } else {
            DEFAULT_REFRESH_MS
        };
        Self {
            clock,
            refresh_interval_ms,
        }
    }

    /// Borrow the clock.
    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Current clock time, for `toggle_play` baselines.
    pub fn now_ms(&self) -> f64 {
        self.clock.now_ms()
    }

    /// One display-refresh callback.
    pub fn on_refresh(&mut self, session: &mut ViewerSession) -> TickOutcome {
        if !session.is_playing() || session.data().is_none() {
            return TickOutcome::Stop;
        }
        let before = session.playback().current_frame;
        session.tick(self.clock.now_ms());
        let advanced = session.playback().current_frame != before;
        if advanced {
            tracing::trace!(frame = session.playback().current_frame, "frame advanced");
        }
        TickOutcome::Continue { advanced }
    }

    /// Refresh until playback stops or `duration_ms` of clock time has passed.
    ///
    /// `on_advance` runs after every refresh that changed the frame. Returns the number of
    /// refreshes performed.
    pub fn run_for(
        &mut self,
        session: &mut ViewerSession,
        duration_ms: f64,
        mut on_advance: impl FnMut(&ViewerSession),
    ) -> u64 {
        let deadline = self.clock.now_ms() + duration_ms;
        let mut refreshes = 0u64;
        while self.clock.now_ms() < deadline {
            match self.on_refresh(session) {
                TickOutcome::Stop => break,
                TickOutcome::Continue { advanced } => {
                    refreshes += 1;
                    if advanced {
                        on_advance(session);
                    }
                }
            }
            self.clock.sleep_ms(self.refresh_interval_ms);
        }
        refreshes
    }
}

#[cfg(test)]
#[path = "../../tests/unit/playback/driver.rs"]
mod tests;
