use crate::format::data::AnimationData;
use crate::format::{COLOR_FIELD_LEN, HEADER_LEN, MAGIC};
use crate::foundation::error::{ViewerError, ViewerResult};

/// Serialize an animation into the SMPL binary layout.
///
/// The color is written NUL-padded; a color of exactly 64 bytes is written full-width.
pub fn encode(data: &AnimationData) -> ViewerResult<Vec<u8>> {
    let color = data.mesh_color().as_bytes();
    if color.len() > COLOR_FIELD_LEN {
        return Err(ViewerError::validation(format!(
            "mesh color is {} bytes, the color field holds at most {COLOR_FIELD_LEN}",
            color.len()
        )));
    }

    let len = HEADER_LEN + data.vertices().len() * 12 + data.faces().len() * 12;
    let mut out = Vec::with_capacity(len);
    out.extend_from_slice(MAGIC);
    out.extend_from_slice(&data.frames().to_le_bytes());
    out.extend_from_slice(&data.num_vertices().to_le_bytes());
    out.extend_from_slice(&data.num_faces().to_le_bytes());
    out.extend_from_slice(&data.fps().to_le_bytes());

    let mut field = [0u8; COLOR_FIELD_LEN];
    field[..color.len()].copy_from_slice(color);
    out.extend_from_slice(&field);

    for v in data.vertices() {
        out.extend_from_slice(&v.x.to_le_bytes());
        out.extend_from_slice(&v.y.to_le_bytes());
        out.extend_from_slice(&v.z.to_le_bytes());
    }
    for face in data.faces() {
        for idx in face {
            out.extend_from_slice(&idx.to_le_bytes());
        }
    }

    debug_assert_eq!(out.len(), len);
    Ok(out)
}
