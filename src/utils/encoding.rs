// FourCC text handling
//
// RIFF chunk ids are four bytes of ASCII. Anything outside that range is
// rejected rather than decoded lossily.

use encoding_rs::mem::is_ascii;
use encoding_rs::WINDOWS_1252;
use thiserror::Error;

/// Decode a chunk id, or None if it is not pure ASCII
pub fn decode_fourcc(raw: &[u8; 4]) -> Option<String> {
    if !is_ascii(raw) {
        return None;
    }
    let (text, had_errors) = WINDOWS_1252.decode_without_bom_handling(raw);
    if had_errors {
        return None;
    }
    Some(text.into_owned())
}

/// Encode a caller-supplied id into four ASCII bytes
pub fn encode_fourcc(id: &str) -> Result<[u8; 4], FourccError> {
    let bytes = id.as_bytes();
    if !is_ascii(bytes) {
        return Err(FourccError::NonAscii);
    }
    bytes.try_into().map_err(|_| FourccError::Length(bytes.len()))
}

/// Why an id cannot be a chunk id
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FourccError {
    /// Not exactly four characters
    #[error("chunk id must be exactly 4 characters, got {0}")]
    Length(usize),
    /// Contains non-ASCII characters
    #[error("chunk id must contain only ASCII characters")]
    NonAscii,
}

/// Render raw id bytes for error messages
pub fn escape_fourcc(raw: &[u8]) -> String {
    raw.iter().flat_map(|b| std::ascii::escape_default(*b)).map(char::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_ascii_ids() {
        assert_eq!(decode_fourcc(b"fmt ").as_deref(), Some("fmt "));
        assert_eq!(decode_fourcc(b"LIST").as_deref(), Some("LIST"));
    }

    #[test]
    fn rejects_high_bytes() {
        assert_eq!(decode_fourcc(&[0xFF, 0xFE, b'a', b'b']), None);
    }

    #[test]
    fn encodes_caller_ids() {
        assert_eq!(encode_fourcc("INFO"), Ok(*b"INFO"));
        assert_eq!(encode_fourcc("IN"), Err(FourccError::Length(2)));
        assert_eq!(encode_fourcc("INFOO"), Err(FourccError::Length(5)));
        assert_eq!(encode_fourcc("IN\u{ff}"), Err(FourccError::NonAscii));
        assert_eq!(
            FourccError::Length(2).to_string(),
            "chunk id must be exactly 4 characters, got 2"
        );
    }

    #[test]
    fn escapes_for_messages() {
        assert_eq!(escape_fourcc(&[b'a', 0xFF]), "a\\xff");
    }
}
