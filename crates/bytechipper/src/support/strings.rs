//! # String Utilities

use std::borrow::Cow;

/// Owned-buffer variant of [`String::from_utf8_lossy`].
///
/// Reuses `v`'s allocation when it is already valid UTF-8.
pub fn string_from_utf8_lossy(v: Vec<u8>) -> String {
    match String::from_utf8(v) {
        Ok(s) => s,
        Err(err) => match String::from_utf8_lossy(err.as_bytes()) {
            Cow::Owned(s) => s,
            Cow::Borrowed(s) => s.to_string(),
        },
    }
}

/// Render a byte span for error messages.
///
/// Valid UTF-8 is shown as text; anything else as an escaped byte string.
pub fn describe_bytes(bytes: &[u8]) -> String {
    match core::str::from_utf8(bytes) {
        Ok(s) => format!("{s:?}"),
        Err(_) => format!("b\"{}\"", bytes.escape_ascii()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_from_lossy_utf8() {
        let v = vec![0x61, 0x62, 0xff, 0x28];
        let s = string_from_utf8_lossy(v);
        assert_eq!(s, "ab\u{fffd}(".to_string());

        let v = vec![0x61, 0x62];
        let s = string_from_utf8_lossy(v);
        assert_eq!(s, "ab".to_string());
    }

    #[test]
    fn test_describe_bytes() {
        assert_eq!(describe_bytes(b"hi"), "\"hi\"");
        assert_eq!(describe_bytes(&[0x61, 0xff]), "b\"a\\xff\"");
    }
}
