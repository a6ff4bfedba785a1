use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(ViewerError::format("x").to_string().contains("format error:"));
    assert!(
        ViewerError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(ViewerError::render("x").to_string().contains("render error:"));
    assert!(ViewerError::encode("x").to_string().contains("encode error:"));
    assert_eq!(
        ViewerError::truncated(120, 84).to_string(),
        "truncated buffer: expected 120 bytes, got 84"
    );
}

#[test]
fn decode_errors_are_classified() {
    assert!(ViewerError::format("bad magic").is_decode_error());
    assert!(ViewerError::truncated(10, 2).is_decode_error());
    assert!(!ViewerError::validation("x").is_decode_error());
    assert!(!ViewerError::render("x").is_decode_error());
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = ViewerError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
