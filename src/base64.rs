//! MEGA-style URL-safe base64.
//!
//! Keys, handles and encrypted attributes travel as base64 with the URL-safe
//! alphabet (`-` and `_`) and without `=` padding. Decoding is lenient and
//! also accepts the standard alphabet and trailing padding.

use base64::{engine::general_purpose, Engine};

/// Encode bytes to MEGA's URL-safe base64 (no padding).
///
/// # Example
/// ```
/// use megacp::base64::base64url_encode;
/// let encoded = base64url_encode(&[0xfb, 0xff]);
/// assert_eq!(encoded, "-_8");
/// ```
pub fn base64url_encode(data: &[u8]) -> String {
    general_purpose::URL_SAFE_NO_PAD.encode(data)
}

/// Decode MEGA's URL-safe base64 to bytes.
pub fn base64url_decode(s: &str) -> Result<Vec<u8>, base64::DecodeError> {
    let normalized: String = s
        .trim_end_matches('=')
        .chars()
        .map(|c| match c {
            '+' => '-',
            '/' => '_',
            c => c,
        })
        .collect();

    general_purpose::URL_SAFE_NO_PAD.decode(normalized)
}
