use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::encode::ffmpeg::ensure_parent_dir;
use crate::encode::sink::{FrameSink, SinkConfig};
use crate::foundation::core::FrameIndex;
use crate::foundation::error::{ViewerError, ViewerResult};
use crate::render::surface::FrameRGBA;

/// Write `frame` as an 8-bit RGBA PNG, converting premultiplied pixels to straight alpha.
pub fn write_png(path: &Path, frame: &FrameRGBA) -> ViewerResult<()> {
    let expected = frame.width as usize * frame.height as usize * 4;
    if frame.data.len() != expected {
        return Err(ViewerError::validation(format!(
            "frame.data holds {} bytes, expected {expected} for {}x{}",
            frame.data.len(),
            frame.width,
            frame.height
        )));
    }
    ensure_parent_dir(path)?;

    let mut straight = frame.data.clone();
    if frame.premultiplied {
        unpremultiply_in_place(&mut straight);
    }
    image::save_buffer_with_format(
        path,
        &straight,
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", path.display()))?;
    Ok(())
}

fn unpremultiply_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = u16::from(px[3]);
        if a == 0 || a == 255 {
            continue;
        }
        for c in &mut px[..3] {
            *c = ((u16::from(*c) * 255 + a / 2) / a).min(255) as u8;
        }
    }
}

/// Sink that writes each frame as `frame_00000.png`, `frame_00001.png`, ... into a directory.
#[derive(Debug)]
pub struct PngSequenceSink {
    dir: PathBuf,
    cfg: Option<SinkConfig>,
    written: Vec<PathBuf>,
}

impl PngSequenceSink {
    /// Create a sink writing into `dir` (created on `begin`).
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            cfg: None,
            written: Vec::new(),
        }
    }

    /// File name used for frame `idx`.
    pub fn file_name(idx: FrameIndex) -> String {
        format!("frame_{:05}.png", idx.0)
    }

    /// Paths written so far, in frame order.
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }
}

impl FrameSink for PngSequenceSink {
    fn begin(&mut self, cfg: SinkConfig) -> ViewerResult<()> {
        std::fs::create_dir_all(&self.dir)
            .with_context(|| format!("create output dir '{}'", self.dir.display()))?;
        self.cfg = Some(cfg);
        self.written.clear();
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> ViewerResult<()> {
        let cfg = self
            .cfg
            .ok_or_else(|| ViewerError::encode("png sink not started"))?;
        if frame.width != cfg.width || frame.height != cfg.height {
            return Err(ViewerError::validation(format!(
                "frame size mismatch: got {}x{}, expected {}x{}",
                frame.width, frame.height, cfg.width, cfg.height
            )));
        }
        let path = self.dir.join(Self::file_name(idx));
        write_png(&path, frame)?;
        self.written.push(path);
        Ok(())
    }

    fn end(&mut self) -> ViewerResult<()> {
        tracing::debug!(
            frames = self.written.len(),
            dir = %self.dir.display(),
            "png sequence written"
        );
        self.cfg = None;
        Ok(())
    }
}
