//! Character to code value mapping.
//!
//! The alphabet is deliberately small: digits, both letter cases, space and
//! the three separators that appear in SKUs (`.`, `-`, `/`). Everything else
//! is rejected by the encoder.

/// Map a character to its code value.
///
/// | Characters | Code values |
/// |------------|-------------|
/// | `0`-`9`    | 0-9         |
/// | `A`-`Z`    | 10-35       |
/// | `a`-`z`    | 36-61       |
/// | space      | 0           |
/// | `-`        | 45          |
/// | `.`        | 46          |
/// | `/`        | 47          |
#[inline]
pub fn code_value(ch: char) -> Option<u8> {
    match ch {
        'A'..='Z' => Some(ch as u8 - b'A' + 10),
        'a'..='z' => Some(ch as u8 - b'a' + 36),
        '0'..='9' => Some(ch as u8 - b'0'),
        '/' => Some(47),
        '-' => Some(45),
        ' ' => Some(0),
        '.' => Some(46),
        _ => None,
    }
}

/// Whether the encoder accepts this character.
#[inline]
pub fn is_supported(ch: char) -> bool {
    code_value(ch).is_some()
}
