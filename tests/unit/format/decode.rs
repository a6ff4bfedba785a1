use super::*;
use crate::format::encode::encode;

fn header_bytes(frames: u32, verts: u32, faces: u32, fps: f32, color: &[u8]) -> Vec<u8> {
    let mut out = Vec::new();
    out.extend_from_slice(b"SMPL");
    out.extend_from_slice(&frames.to_le_bytes());
    out.extend_from_slice(&verts.to_le_bytes());
    out.extend_from_slice(&faces.to_le_bytes());
    out.extend_from_slice(&fps.to_le_bytes());
    let mut field = [0u8; 64];
    field[..color.len()].copy_from_slice(color);
    out.extend_from_slice(&field);
    out
}

fn one_triangle(color: &[u8]) -> Vec<u8> {
    let mut b = header_bytes(1, 3, 1, 30.0, color);
    for v in [0.0f32, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0] {
        b.extend_from_slice(&v.to_le_bytes());
    }
    for i in [0u32, 1, 2] {
        b.extend_from_slice(&i.to_le_bytes());
    }
    b
}

#[test]
fn bad_magic_is_format_error() {
    let mut b = one_triangle(b"#fff");
    b[0] = b'X';
    assert!(matches!(decode(&b), Err(ViewerError::Format(_))));
    assert!(matches!(decode(b"SM"), Err(ViewerError::Format(_))));
    assert!(matches!(decode(&[]), Err(ViewerError::Format(_))));
}

#[test]
fn short_header_is_truncated() {
    let b = one_triangle(b"#fff");
    match decode(&b[..40]) {
        Err(ViewerError::TruncatedBuffer { expected, actual }) => {
            assert_eq!(expected, 84);
            assert_eq!(actual, 40);
        }
        other => panic!("expected truncation, got {other:?}"),
    }
}

#[test]
fn missing_face_bytes_is_truncated() {
    let b = one_triangle(b"#fff");
    let err = decode(&b[..b.len() - 1]).unwrap_err();
    assert!(matches!(
        err,
        ViewerError::TruncatedBuffer {
            expected: 132,
            actual: 131
        }
    ));
}

#[test]
fn huge_declared_counts_are_truncated_not_overflowing() {
    let b = header_bytes(u32::MAX, u32::MAX, u32::MAX, 30.0, b"");
    assert!(matches!(
        decode(&b),
        Err(ViewerError::TruncatedBuffer { .. })
    ));
}

#[test]
fn trailing_bytes_are_rejected() {
    let mut b = one_triangle(b"#fff");
    b.push(0);
    assert!(matches!(decode(&b), Err(ViewerError::Format(_))));
}

#[test]
fn zero_counts_and_bad_fps_are_format_errors() {
    assert!(matches!(
        decode(&header_bytes(0, 3, 0, 30.0, b"")),
        Err(ViewerError::Format(_))
    ));
    assert!(matches!(
        decode(&header_bytes(1, 0, 0, 30.0, b"")),
        Err(ViewerError::Format(_))
    ));
    assert!(matches!(
        decode(&header_bytes(1, 1, 0, -1.0, b"")),
        Err(ViewerError::Format(_))
    ));
}

#[test]
fn face_index_out_of_range_is_format_error() {
    let mut b = one_triangle(b"#fff");
    let n = b.len();
    b[n - 4..].copy_from_slice(&3u32.to_le_bytes());
    let err = decode(&b).unwrap_err();
    assert!(matches!(err, ViewerError::Format(_)));
    assert!(err.to_string().contains("face 0"));
}

#[test]
fn empty_color_falls_back_to_default() {
    let data = decode(&one_triangle(b"")).unwrap();
    assert_eq!(data.mesh_color(), DEFAULT_MESH_COLOR);
}

#[test]
fn full_width_color_without_nul_is_read_entirely() {
    let color = [b'a'; 64];
    let data = decode(&one_triangle(&color)).unwrap();
    assert_eq!(data.mesh_color().len(), 64);
}

#[test]
fn color_stops_at_first_nul() {
    let data = decode(&one_triangle(b"#123456\0junk")).unwrap();
    assert_eq!(data.mesh_color(), "#123456");
}

#[test]
fn encode_writes_full_width_color_and_rejects_overlong() {
    let data = decode(&one_triangle(&[b'b'; 64])).unwrap();
    let bytes = encode(&data).unwrap();
    assert_eq!(&bytes[20..84], &[b'b'; 64][..]);

    let long = crate::format::data::AnimationData::new(
        1,
        1,
        30.0,
        "x".repeat(65),
        vec![Vec3::ZERO],
        vec![],
    )
    .unwrap();
    assert!(matches!(encode(&long), Err(ViewerError::Validation(_))));
}

#[test]
fn header_reports_expected_length() {
    let h = decode_header(&one_triangle(b"#fff")).unwrap();
    assert_eq!(h.expected_len(), 84 + 36 + 12);
    assert_eq!(h.mesh_color, "#fff");
}
