//! Plain text files.

/// Decode a text file, replacing invalid UTF-8 and dropping a leading BOM.
pub fn extract_txt(bytes: &[u8]) -> String {
    let bytes = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);
    String::from_utf8_lossy(bytes).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bom_is_dropped() {
        assert_eq!(extract_txt(b"\xEF\xBB\xBFhello"), "hello");
    }

    #[test]
    fn test_invalid_utf8_is_replaced() {
        assert_eq!(extract_txt(b"caf\xE9 ok"), "caf\u{FFFD} ok");
    }
}
