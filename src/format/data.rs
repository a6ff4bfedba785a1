use crate::foundation::core::{FrameIndex, Vec3};
use crate::foundation::error::{ViewerError, ViewerResult};

/// Display color used when the color field of a buffer is empty.
pub const DEFAULT_MESH_COLOR: &str = "#4a9eff";

/// A decoded SMPL mesh animation.
///
/// Every frame holds the same number of vertices, and all frames share one face list. The
/// constructor enforces the invariants, so a value of this type is always safe to index with any
/// face of [`AnimationData::faces`] on any frame in `0..frames()`.
#[derive(Clone, Debug, PartialEq)]
pub struct AnimationData {
    frames: u32,
    num_vertices: u32,
    fps: f32,
    mesh_color: String,
    // frame-major, `frames * num_vertices` entries
    vertices: Vec<Vec3>,
    faces: Vec<[u32; 3]>,
}

impl AnimationData {
    /// Build an animation from flat frame-major vertex positions and a shared face list.
    ///
    /// Fails with [`ViewerError::Validation`] when the counts are zero, the fps is not a positive
    /// finite number, the vertex array does not hold exactly `frames * num_vertices` entries, or
    /// a face references a vertex outside `0..num_vertices`.
    pub fn new(
        frames: u32,
        num_vertices: u32,
        fps: f32,
        mesh_color: impl Into<String>,
        vertices: Vec<Vec3>,
        faces: Vec<[u32; 3]>,
    ) -> ViewerResult<Self> {
        if frames == 0 {
            return Err(ViewerError::validation("animation must have at least one frame"));
        }
        if num_vertices == 0 {
            return Err(ViewerError::validation(
                "animation must have at least one vertex",
            ));
        }
        if !fps.is_finite() || fps <= 0.0 {
            return Err(ViewerError::validation(format!(
                "fps must be positive and finite (got {fps})"
            )));
        }
        let expected = frames as usize * num_vertices as usize;
        if vertices.len() != expected {
            return Err(ViewerError::validation(format!(
                "expected {expected} vertex positions ({frames} frames x {num_vertices} vertices), got {}",
                vertices.len()
            )));
        }
        if let Some((i, face)) = faces
            .iter()
            .enumerate()
            .find(|(_, face)| face.iter().any(|&v| v >= num_vertices))
        {
            return Err(ViewerError::validation(format!(
                "face {i} {face:?} references a vertex outside 0..{num_vertices}"
            )));
        }

        let mesh_color = mesh_color.into();
        let mesh_color = if mesh_color.is_empty() {
            DEFAULT_MESH_COLOR.to_owned()
        } else {
            mesh_color
        };

        Ok(Self {
            frames,
            num_vertices,
            fps,
            mesh_color,
            vertices,
            faces,
        })
    }

    /// Frame count `F`.
    pub fn frames(&self) -> u32 {
        self.frames
    }

    /// Vertex count `V` (per frame).
    pub fn num_vertices(&self) -> u32 {
        self.num_vertices
    }

    /// Face count `Nf`.
    pub fn num_faces(&self) -> u32 {
        self.faces.len() as u32
    }

    /// Playback rate in frames per second.
    pub fn fps(&self) -> f32 {
        self.fps
    }

    /// Display color string as stored in the buffer (never empty).
    pub fn mesh_color(&self) -> &str {
        &self.mesh_color
    }

    /// Shared face list.
    pub fn faces(&self) -> &[[u32; 3]] {
        &self.faces
    }

    /// All vertex positions, frame-major.
    pub fn vertices(&self) -> &[Vec3] {
        &self.vertices
    }

    /// Vertex positions of one frame, or `None` when `frame` is out of range.
    pub fn frame(&self, frame: FrameIndex) -> Option<&[Vec3]> {
        if frame.0 >= self.frames {
            return None;
        }
        let v = self.num_vertices as usize;
        let start = frame.0 as usize * v;
        self.vertices.get(start..start + v)
    }

    /// Axis-aligned bounds `(min, max)` of one frame.
    pub fn frame_bounds(&self, frame: FrameIndex) -> Option<(Vec3, Vec3)> {
        let verts = self.frame(frame)?;
        let (min, max) = verts.iter().fold(
            (Vec3::splat(f32::INFINITY), Vec3::splat(f32::NEG_INFINITY)),
            |(min, max), &v| (min.min(v), max.max(v)),
        );
        (min.is_finite() && max.is_finite()).then_some((min, max))
    }

    /// Duration of one frame in milliseconds.
    pub fn frame_duration_ms(&self) -> f64 {
        1000.0 / f64::from(self.fps)
    }
}
