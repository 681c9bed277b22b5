//! Reversible text obfuscation for the persisted blob.
//!
//! Percent-escapes the text and base64-encodes the result. This keeps a raw
//! storage dump from being readable at a glance. It is not encryption: anyone
//! with the blob can reverse it.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};

/// Percent-escapes `data`, then base64-encodes it.
pub fn encode(data: &str) -> String {
    BASE64.encode(urlencoding::encode(data).as_bytes())
}

/// Reverses [`encode`].
///
/// Fails if `data` is not base64, or if it does not decode to a
/// percent-escaped UTF-8 string.
pub fn decode(data: &str) -> Result<String, String> {
    let bytes = BASE64
        .decode(data.trim())
        .map_err(|e| format!("base64 decode error: {}", e))?;
    let escaped = String::from_utf8(bytes).map_err(|e| format!("invalid utf-8: {}", e))?;
    urlencoding::decode(&escaped)
        .map(|text| text.into_owned())
        .map_err(|e| format!("percent decode error: {}", e))
}
