//! Frame sinks.
//!
//! Sinks consume rendered frames in timeline order and are used by
//! [`ViewerSession::render_range`](crate::ViewerSession::render_range).

pub(crate) mod ffmpeg;
pub(crate) mod png;
pub(crate) mod sink;
