use crate::foundation::error::{ViewerError, ViewerResult};

pub use glam::Vec3;
pub use kurbo::Point;

/// Zero-based index of an animation frame.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    serde::Serialize,
    serde::Deserialize,
)]
pub struct FrameIndex(pub u32);

/// Half-open range of frames `[start, end)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct FrameRange {
    /// First frame in the range.
    pub start: FrameIndex,
    /// One past the last frame in the range.
    pub end: FrameIndex, // exclusive
}

impl FrameRange {
    /// Build a range, rejecting `start > end`.
    pub fn new(start: FrameIndex, end: FrameIndex) -> ViewerResult<Self> {
        if start.0 > end.0 {
            return Err(ViewerError::validation("FrameRange start must be <= end"));
        }
        Ok(Self { start, end })
    }

    /// Range covering every frame of an animation with `frame_count` frames.
    pub fn all(frame_count: u32) -> Self {
        Self {
            start: FrameIndex(0),
            end: FrameIndex(frame_count),
        }
    }

    /// Number of frames in the range.
    pub fn len_frames(self) -> u32 {
        self.end.0.saturating_sub(self.start.0)
    }

    /// Whether the range holds no frames.
    pub fn is_empty(self) -> bool {
        self.start.0 == self.end.0
    }

    /// Whether `f` lies inside the range.
    pub fn contains(self, f: FrameIndex) -> bool {
        self.start.0 <= f.0 && f.0 < self.end.0
    }

    /// Iterate the frame indices of the range in increasing order.
    pub fn iter(self) -> impl Iterator<Item = FrameIndex> {
        (self.start.0..self.end.0).map(FrameIndex)
    }
}

/// Pixel dimensions of a drawing surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Canvas {
    /// Screen-space center of the canvas.
    pub fn center(self) -> Point {
        Point::new(f64::from(self.width) / 2.0, f64::from(self.height) / 2.0)
    }
}

/// Straight (non-premultiplied) RGBA8 color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Rgba8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl Rgba8 {
    /// Opaque color from RGB channels.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Same color with alpha replaced by `alpha` in `0.0..=1.0`.
    pub fn with_alpha(self, alpha: f32) -> Self {
        let a = (alpha.clamp(0.0, 1.0) * 255.0).round() as u8;
        Self { a, ..self }
    }

    /// Premultiplied channels `[r, g, b, a]`.
    pub fn premultiplied(self) -> [u8; 4] {
        fn premul(c: u8, a: u8) -> u8 {
            let c = u16::from(c);
            let a = u16::from(a);
            (((c * a) + 127) / 255) as u8
        }

        [
            premul(self.r, self.a),
            premul(self.g, self.a),
            premul(self.b, self.a),
            self.a,
        ]
    }
}
