//! smplview is the core of a wireframe viewer for SMPL body-mesh animations.
//!
//! The public API is session-oriented:
//!
//! - [`decode`] a binary `SMPL` buffer into [`AnimationData`]
//! - create a [`ViewerSession`] and feed it input gestures and clock ticks
//! - render the current frame onto a [`Surface`], or stream a range into a [`FrameSink`]
//!
//! Camera math, projection, depth sorting and playback timing are plain functions over value
//! types, so a host can also drive them without a session.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

pub(crate) mod camera;
pub(crate) mod config;
pub(crate) mod encode;
pub(crate) mod format;
pub(crate) mod playback;
pub(crate) mod render;
pub(crate) mod session;

pub use crate::foundation::color::parse_hex_color;
pub use crate::foundation::core::{Canvas, FrameIndex, FrameRange, Point, Rgba8, Vec3};
pub use crate::foundation::error::{ViewerError, ViewerResult};

pub use crate::camera::orbit::{
    CameraState, DEFAULT_DRAG_SENSITIVITY, DEFAULT_ZOOM_SENSITIVITY, MAX_DISTANCE, MAX_ELEVATION,
    MIN_DISTANCE, apply_drag, apply_drag_with, apply_zoom, apply_zoom_with,
};
pub use crate::camera::project::{CameraBasis, FOCAL_SCALE, MIN_DEPTH, ProjectedPoint, project};
pub use crate::config::{CameraConfig, RenderStyle, ViewerConfig};
pub use crate::encode::ffmpeg::{FfmpegSink, FfmpegSinkOpts, is_ffmpeg_on_path};
pub use crate::encode::png::{PngSequenceSink, write_png};
pub use crate::encode::sink::{FrameSink, InMemorySink, SinkConfig};
pub use crate::format::data::{AnimationData, DEFAULT_MESH_COLOR};
pub use crate::format::decode::{SmplHeader, decode, decode_header};
pub use crate::format::encode::encode;
pub use crate::format::{COLOR_FIELD_LEN, HEADER_LEN, MAGIC};
pub use crate::playback::driver::{
    Clock, DEFAULT_REFRESH_MS, ManualClock, PlaybackDriver, SystemClock, TickOutcome,
};
pub use crate::playback::scheduler::{PlaybackState, scrub, tick, toggle_play};
pub use crate::render::cpu::CpuSurface;
pub use crate::render::plan::{
    DrawOp, FaceDepth, FramePlan, GRID_HALF_EXTENT, compile_frame, sort_far_to_near,
};
pub use crate::render::render_frame;
pub use crate::render::surface::{FrameRGBA, RecordingSurface, Surface, execute_plan};
pub use crate::session::{LoadState, ViewerSession};
