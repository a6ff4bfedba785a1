use crate::camera::orbit::{CameraState, apply_drag_with, apply_zoom_with};
use crate::config::{RenderStyle, ViewerConfig};
use crate::encode::sink::{FrameSink, SinkConfig};
use crate::format::data::AnimationData;
use crate::format::decode::decode;
use crate::foundation::core::{Canvas, FrameIndex, FrameRange};
use crate::foundation::error::{ViewerError, ViewerResult};
use crate::playback::scheduler::{self, PlaybackState};
use crate::render::cpu::CpuSurface;
use crate::render::plan::{FramePlan, compile_frame};
use crate::render::surface::{Surface, execute_plan};

/// Outcome of the most recent load attempt.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum LoadState {
    /// Nothing has been loaded yet.
    #[default]
    Empty,
    /// The last load succeeded.
    Loaded,
    /// The last load failed; any previously loaded animation is still shown.
    Failed(String),
}

/// One viewer instance: camera, playback and the active animation.
///
/// All interaction goes through this type. It is single-threaded; every method runs to
/// completion and leaves the session consistent for the next redraw.
#[derive(Debug)]
pub struct ViewerSession {
    config: ViewerConfig,
    style: RenderStyle,
    canvas: Canvas,
    camera: CameraState,
    playback: PlaybackState,
    data: Option<AnimationData>,
    load_state: LoadState,
}

impl ViewerSession {
    /// Create an empty session from a validated configuration.
    pub fn new(config: ViewerConfig) -> ViewerResult<Self> {
        config.validate()?;
        let style = config.style()?;
        Ok(Self {
            canvas: config.canvas(),
            camera: config.initial_camera(),
            style,
            config,
            playback: PlaybackState::new(),
            data: None,
            load_state: LoadState::Empty,
        })
    }

    /// Decode `bytes` and make the result the active animation.
    ///
    /// On failure the previous animation, camera and playback position are kept untouched and
    /// the error is returned; [`ViewerSession::status_text`] reports the failure.
    #[tracing::instrument(skip(self, bytes), fields(len = bytes.len()))]
    pub fn load(&mut self, bytes: &[u8]) -> ViewerResult<()> {
        match decode(bytes) {
            Ok(data) => {
                self.set_data(data);
                Ok(())
            }
            Err(e) => {
                tracing::warn!(error = %e, "load failed, keeping previous animation");
                self.load_state = LoadState::Failed(e.to_string());
                Err(e)
            }
        }
    }

    /// Replace the active animation with an already decoded one.
    ///
    /// The swap and the playback reset happen together, so the next redraw sees frame 0 of the
    /// new data.
    pub fn set_data(&mut self, data: AnimationData) {
        if self.config.auto_center
            && let Some((min, max)) = data.frame_bounds(FrameIndex(0))
        {
            self.camera = self.camera.with_target((min + max) * 0.5);
        }
        tracing::debug!(
            frames = data.frames(),
            vertices = data.num_vertices(),
            faces = data.num_faces(),
            fps = data.fps(),
            "animation loaded"
        );
        self.data = Some(data);
        self.playback = self.playback.reset();
        self.load_state = LoadState::Loaded;
    }

    /// Active animation, if any.
    pub fn data(&self) -> Option<&AnimationData> {
        self.data.as_ref()
    }

    /// Result of the last load attempt.
    pub fn load_state(&self) -> &LoadState {
        &self.load_state
    }

    /// Configuration the session was built from.
    pub fn config(&self) -> &ViewerConfig {
        &self.config
    }

    /// Render style derived from the configuration.
    pub fn style(&self) -> &RenderStyle {
        &self.style
    }

    /// Current canvas size.
    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    /// Current camera.
    pub fn camera(&self) -> &CameraState {
        &self.camera
    }

    /// Replace the camera, e.g. from command-line overrides.
    pub fn set_camera(&mut self, camera: CameraState) {
        self.camera = CameraState::new(
            camera.target,
            camera.azimuth,
            camera.elevation,
            camera.distance,
            self.canvas.center(),
        );
    }

    /// Current playback state.
    pub fn playback(&self) -> &PlaybackState {
        &self.playback
    }

    /// Whether playback is running.
    pub fn is_playing(&self) -> bool {
        self.playback.is_playing
    }

    /// Orbit the camera by a pointer drag of `(dx, dy)` pixels.
    pub fn drag(&mut self, dx: f32, dy: f32) {
        self.camera = apply_drag_with(self.camera, dx, dy, self.config.drag_sensitivity);
    }

    /// Zoom the camera by a wheel delta.
    pub fn zoom(&mut self, delta_y: f32) {
        self.camera = apply_zoom_with(self.camera, delta_y, self.config.zoom_sensitivity);
    }

    /// Resize the canvas and re-center the projection on it. Zero sizes are ignored.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            tracing::debug!(width, height, "ignoring zero-sized resize");
            return;
        }
        self.canvas = Canvas { width, height };
        self.camera = self.camera.with_center(self.canvas.center());
    }

    /// Flip between playing and paused at wall-clock time `now_ms`.
    pub fn toggle_play(&mut self, now_ms: f64) {
        self.playback = scheduler::toggle_play(self.playback, now_ms);
    }

    /// Advance playback to `now_ms`. Does nothing without an animation or while paused.
    pub fn tick(&mut self, now_ms: f64) {
        if let Some(data) = &self.data {
            self.playback = scheduler::tick(self.playback, now_ms, data.fps(), data.frames());
        }
    }

    /// Show `frame` (clamped to the animation) and pause.
    pub fn scrub(&mut self, frame: u32) {
        if let Some(data) = &self.data {
            self.playback = scheduler::scrub(self.playback, frame, data.frames());
        }
    }

    /// Drawing instructions for the current frame.
    pub fn compile(&self) -> FramePlan {
        self.compile_at(self.playback.frame())
    }

    fn compile_at(&self, frame: FrameIndex) -> FramePlan {
        compile_frame(
            self.data.as_ref(),
            frame,
            &self.camera,
            &self.style,
            self.canvas,
        )
    }

    /// Redraw the current frame onto `surface`.
    pub fn render(&self, surface: &mut dyn Surface) -> ViewerResult<()> {
        execute_plan(surface, &self.compile())
    }

    /// Human-readable status line for the host UI.
    pub fn status_text(&self) -> String {
        if matches!(self.load_state, LoadState::Failed(_)) {
            return "Error loading mesh".to_owned();
        }
        match &self.data {
            None => "No data loaded".to_owned(),
            Some(data) => format!(
                "Frame {} / {}",
                self.playback.current_frame + 1,
                data.frames()
            ),
        }
    }

    /// Render `range` with the CPU surface and stream the frames into `sink`.
    ///
    /// Frames reach the sink in strictly increasing index order. The camera is the session's
    /// current camera for every frame; playback state is not touched.
    #[tracing::instrument(skip(self, sink), fields(start = range.start.0, end = range.end.0))]
    pub fn render_range(&self, range: FrameRange, sink: &mut dyn FrameSink) -> ViewerResult<()> {
        let data = self
            .data
            .as_ref()
            .ok_or_else(|| ViewerError::validation("render_range requires a loaded animation"))?;
        if range.is_empty() {
            return Err(ViewerError::validation(
                "render_range range must be non-empty",
            ));
        }
        if range.end.0 > data.frames() {
            return Err(ViewerError::validation(format!(
                "render_range end {} exceeds frame count {}",
                range.end.0,
                data.frames()
            )));
        }

        let mut surface = CpuSurface::new(self.canvas)?;
        sink.begin(SinkConfig {
            width: self.canvas.width,
            height: self.canvas.height,
            fps: data.fps(),
        })?;
        for frame in range.iter() {
            execute_plan(&mut surface, &self.compile_at(frame))?;
            sink.push_frame(frame, &surface.frame())?;
        }
        sink.end()?;
        tracing::debug!(frames = range.len_frames(), "range rendered");
        Ok(())
    }
}

#[cfg(test)]
#[path = "../tests/unit/session.rs"]
mod tests;
