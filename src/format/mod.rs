//! The SMPL binary mesh-animation format.
//!
//! Layout, little-endian throughout:
//!
//! | offset | field | type |
//! |---|---|---|
//! | 0 | magic | `b"SMPL"` |
//! | 4 | frame count `F` | u32 |
//! | 8 | vertex count `V` | u32 |
//! | 12 | face count `Nf` | u32 |
//! | 16 | fps | f32 |
//! | 20 | color | 64 bytes UTF-8, NUL-terminated or full-width |
//! | 84 | vertices | `F*V*3` f32, frame-major then vertex then axis |
//! | `84+F*V*12` | faces | `Nf*3` u32 |

pub(crate) mod data;
pub(crate) mod decode;
pub(crate) mod encode;

/// Leading magic bytes of every buffer.
pub const MAGIC: &[u8; 4] = b"SMPL";
/// Width of the fixed color field in bytes.
pub const COLOR_FIELD_LEN: usize = 64;
/// Size of the fixed header in bytes.
pub const HEADER_LEN: usize = 20 + COLOR_FIELD_LEN;
