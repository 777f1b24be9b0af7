//! Base64 transport encoding
//!
//! Every value crossing the host boundary is standard, padded base64.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::error::{Error, Result};

/// Decode a transported value into UTF-8 text.
///
/// `entry_key` names the entry in the resulting error.
pub fn decode_value(entry_key: &str, encoded: &str) -> Result<String> {
    let bytes = STANDARD
        .decode(encoded)
        .map_err(|e| Error::decode(entry_key, e))?;

    String::from_utf8(bytes).map_err(|e| Error::decode(entry_key, e.utf8_error()))
}

/// Encode a value for transport back to the host
pub fn encode_value(value: &str) -> String {
    STANDARD.encode(value.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_value() {
        let decoded = decode_value("DB_HOST", "ZGIuaW50ZXJuYWw=").unwrap();
        assert_eq!(decoded, "db.internal");
    }

    #[test]
    fn test_decode_invalid_base64_names_entry() {
        let err = decode_value("DB_HOST", "not base64!").unwrap_err();
        match err {
            Error::Decode { entry_key, .. } => assert_eq!(entry_key, "DB_HOST"),
            other => panic!("Expected decode error, got {other:?}"),
        }
    }

    #[test]
    fn test_decode_rejects_non_utf8() {
        // 0xff 0xfe
        let err = decode_value("BINARY", "//4=").unwrap_err();
        assert!(matches!(err, Error::Decode { .. }));
    }

    #[test]
    fn test_encode_value() {
        assert_eq!(encode_value("db.internal"), "ZGIuaW50ZXJuYWw=");
        assert_eq!(encode_value(""), "");
    }
}
