use crate::foundation::core::Rgba8;
use crate::foundation::error::{ViewerError, ViewerResult};

/// Parse a CSS-style hex color: `#rgb`, `#rgba`, `#rrggbb` or `#rrggbbaa` (the `#` is optional).
pub fn parse_hex_color(s: &str) -> ViewerResult<Rgba8> {
    let s = s.trim();
    let s = s.strip_prefix('#').unwrap_or(s);
    if !s.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(ViewerError::validation(format!(
            "hex color \"{s}\" contains non-hex characters"
        )));
    }

    fn hex_byte(pair: &str) -> ViewerResult<u8> {
        u8::from_str_radix(pair, 16)
            .map_err(|_| ViewerError::validation(format!("invalid hex byte \"{pair}\"")))
    }

    // #abc expands to #aabbcc.
    fn hex_nibble(c: &str) -> ViewerResult<u8> {
        Ok(hex_byte(c)? * 17)
    }

    match s.len() {
        3 | 4 => {
            let r = hex_nibble(&s[0..1])?;
            let g = hex_nibble(&s[1..2])?;
            let b = hex_nibble(&s[2..3])?;
            let a = if s.len() == 4 {
                hex_nibble(&s[3..4])?
            } else {
                255
            };
            Ok(Rgba8 { r, g, b, a })
        }
        6 | 8 => {
            let r = hex_byte(&s[0..2])?;
            let g = hex_byte(&s[2..4])?;
            let b = hex_byte(&s[4..6])?;
            let a = if s.len() == 8 {
                hex_byte(&s[6..8])?
            } else {
                255
            };
            Ok(Rgba8 { r, g, b, a })
        }
        _ => Err(ViewerError::validation(
            "hex color must be #RGB, #RGBA, #RRGGBB or #RRGGBBAA (case-insensitive)",
        )),
    }
}
