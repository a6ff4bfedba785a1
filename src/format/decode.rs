use crate::format::data::{AnimationData, DEFAULT_MESH_COLOR};
use crate::format::{COLOR_FIELD_LEN, HEADER_LEN, MAGIC};
use crate::foundation::core::Vec3;
use crate::foundation::error::{ViewerError, ViewerResult};

/// Fixed-size header of an SMPL buffer.
#[derive(Clone, Debug, PartialEq)]
pub struct SmplHeader {
    /// Frame count `F`.
    pub frames: u32,
    /// Vertex count `V`.
    pub num_vertices: u32,
    /// Face count `Nf`.
    pub num_faces: u32,
    /// Playback rate.
    pub fps: f32,
    /// Display color, already defaulted when the field was empty.
    pub mesh_color: String,
}

impl SmplHeader {
    /// Total byte length implied by the header counts (saturating).
    pub fn expected_len(&self) -> u64 {
        let vertex_bytes = u64::from(self.frames)
            .saturating_mul(u64::from(self.num_vertices))
            .saturating_mul(12);
        let face_bytes = u64::from(self.num_faces).saturating_mul(12);
        (HEADER_LEN as u64)
            .saturating_add(vertex_bytes)
            .saturating_add(face_bytes)
    }
}

/// Decode a complete SMPL animation buffer.
///
/// Either a fully valid [`AnimationData`] is returned or an error; nothing is partially applied.
#[tracing::instrument(skip(bytes), fields(len = bytes.len()))]
pub fn decode(bytes: &[u8]) -> ViewerResult<AnimationData> {
    let header = decode_header(bytes)?;

    let expected = header.expected_len();
    let actual = bytes.len() as u64;
    if actual < expected {
        return Err(ViewerError::truncated(expected, actual));
    }
    if actual > expected {
        return Err(ViewerError::format(format!(
            "{} trailing bytes after face block",
            actual - expected
        )));
    }

    // `expected` fits in the buffer, so the block sizes fit in usize.
    let vertex_count = header.frames as usize * header.num_vertices as usize;
    let vertex_end = HEADER_LEN + vertex_count * 12;
    let vertices = bytes[HEADER_LEN..vertex_end]
        .chunks_exact(12)
        .map(|c| Vec3::new(f32_at(c, 0), f32_at(c, 4), f32_at(c, 8)))
        .collect::<Vec<_>>();

    let mut faces = Vec::with_capacity(header.num_faces as usize);
    for (i, c) in bytes[vertex_end..].chunks_exact(12).enumerate() {
        let face = [u32_at(c, 0), u32_at(c, 4), u32_at(c, 8)];
        if face.iter().any(|&v| v >= header.num_vertices) {
            return Err(ViewerError::format(format!(
                "face {i} {face:?} references a vertex outside 0..{}",
                header.num_vertices
            )));
        }
        faces.push(face);
    }

    let data = AnimationData::new(
        header.frames,
        header.num_vertices,
        header.fps,
        header.mesh_color,
        vertices,
        faces,
    )
    .map_err(|e| ViewerError::format(e.to_string()))?;

    tracing::debug!(
        frames = data.frames(),
        vertices = data.num_vertices(),
        faces = data.num_faces(),
        fps = data.fps(),
        "decoded smpl animation"
    );
    Ok(data)
}

/// Decode and validate only the 84-byte header.
pub fn decode_header(bytes: &[u8]) -> ViewerResult<SmplHeader> {
    match bytes.get(..MAGIC.len()) {
        Some(magic) if magic == MAGIC => {}
        Some(magic) => {
            return Err(ViewerError::format(format!(
                "bad magic: expected \"SMPL\", found {:?}",
                String::from_utf8_lossy(magic)
            )));
        }
        None => {
            return Err(ViewerError::format(format!(
                "buffer of {} bytes is too short to hold the \"SMPL\" magic",
                bytes.len()
            )));
        }
    }
    if bytes.len() < HEADER_LEN {
        return Err(ViewerError::truncated(HEADER_LEN as u64, bytes.len() as u64));
    }

    let frames = u32_at(bytes, 4);
    let num_vertices = u32_at(bytes, 8);
    let num_faces = u32_at(bytes, 12);
    let fps = f32_at(bytes, 16);
    let mesh_color = read_color_field(&bytes[20..20 + COLOR_FIELD_LEN]);

    if frames == 0 {
        return Err(ViewerError::format("frame count must be at least 1"));
    }
    if num_vertices == 0 {
        return Err(ViewerError::format("vertex count must be at least 1"));
    }
    if !fps.is_finite() || fps <= 0.0 {
        return Err(ViewerError::format(format!(
            "fps must be positive and finite (got {fps})"
        )));
    }

    Ok(SmplHeader {
        frames,
        num_vertices,
        num_faces,
        fps,
        mesh_color,
    })
}

fn read_color_field(field: &[u8]) -> String {
    let end = memchr::memchr(0, field).unwrap_or(field.len());
    let color = String::from_utf8_lossy(&field[..end]);
    if color.is_empty() {
        DEFAULT_MESH_COLOR.to_owned()
    } else {
        color.into_owned()
    }
}

fn u32_at(bytes: &[u8], offset: usize) -> u32 {
    let mut buf = [0u8; 4];
    buf.copy_from_slice(&bytes[offset..offset + 4]);
    u32::from_le_bytes(buf)
}

fn f32_at(bytes: &[u8], offset: usize) -> f32 {
    f32::from_bits(u32_at(bytes, offset))
}

#[cfg(test)]
#[path = "../../tests/unit/format/decode.rs"]
mod tests;
