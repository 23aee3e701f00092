//! Image payload decoding.
//!
//! Payloads arrive as standard base64, optionally prefixed with a
//! `data:image/<subtype>;base64,` header and possibly line-wrapped.

use base64::alphabet;
use base64::engine::general_purpose::{GeneralPurpose, PAD};
use base64::Engine;

use crate::error::{AnalyzerError, AnalyzerResult};

/// Standard padded base64 that ignores non-zero trailing bits in the last
/// symbol.
const IMAGE_ENGINE: GeneralPurpose =
    GeneralPurpose::new(&alphabet::STANDARD, PAD.with_decode_allow_trailing_bits(true));

/// Remove a `data:image/...;base64,` header if present.
pub fn strip_data_url(payload: &str) -> &str {
    let Some(rest) = payload.strip_prefix("data:image/") else {
        return payload;
    };

    match rest.split_once(";base64,") {
        Some((subtype, data)) if !subtype.is_empty() && subtype.chars().all(is_subtype_char) => {
            data
        }
        _ => payload,
    }
}

fn is_subtype_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Decode a base64 image payload into raw bytes.
pub fn decode_image(payload: &str) -> AnalyzerResult<Vec<u8>> {
    let data = strip_data_url(payload.trim());

    let compact: String = data.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    if compact.is_empty() {
        return Err(AnalyzerError::invalid_image("empty image payload"));
    }

    Ok(IMAGE_ENGINE.decode(compact.as_bytes())?)
}
