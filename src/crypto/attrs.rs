//! Node attribute codec.
//!
//! Attributes are a JSON object prefixed with `MEGA`, zero-padded to the AES
//! block size and encrypted with AES-128-CBC (zero IV) under the node's
//! attribute key. The node name lives under `n`.

use serde_json::{Map, Value};

use crate::base64::{base64url_decode, base64url_encode};
use crate::error::{MegaError, Result};

use super::aes::{aes128_cbc_decrypt, aes128_cbc_encrypt};
use super::keys::attr_key;

const ATTR_PREFIX: &str = "MEGA";

/// Decrypted node attributes.
pub type NodeAttrs = Map<String, Value>;

/// Encrypt attributes under the node's own key.
pub fn encrypt_attrs(attrs: &NodeAttrs, key_full: &[u8]) -> Result<String> {
    let key = attr_key(key_full)?;

    let mut plain = format!("{}{}", ATTR_PREFIX, serde_json::to_string(attrs)?).into_bytes();
    let pad_len = (16 - plain.len() % 16) % 16;
    plain.resize(plain.len() + pad_len, 0);

    let encrypted = aes128_cbc_encrypt(&plain, &key)?;
    Ok(base64url_encode(&encrypted))
}

/// Decrypt an attribute blob with the node's own key.
///
/// # Errors
/// Fails if the blob isn't valid base64, isn't block aligned, or doesn't
/// decrypt to a `MEGA{...}` JSON object (wrong key).
pub fn decrypt_attrs(attrs_b64: &str, key_full: &[u8]) -> Result<NodeAttrs> {
    let key = attr_key(key_full)?;
    let encrypted = base64url_decode(attrs_b64)?;
    let decrypted = aes128_cbc_decrypt(&encrypted, &key)?;

    let text = String::from_utf8_lossy(&decrypted);
    let json_str = text
        .strip_prefix(ATTR_PREFIX)
        .ok_or_else(|| MegaError::CryptoError("Bad attribute signature".to_string()))?
        .trim_end_matches('\0');

    match serde_json::from_str::<Value>(json_str)? {
        Value::Object(map) => Ok(map),
        _ => Err(MegaError::CryptoError(
            "Attributes are not an object".to_string(),
        )),
    }
}

/// Attributes carrying only a name.
pub fn name_attrs(name: &str) -> NodeAttrs {
    let mut attrs = NodeAttrs::new();
    attrs.insert("n".to_string(), Value::from(name));
    attrs
}

/// Build the attribute blob for a renamed copy.
///
/// Every attribute other than the name is carried over from `current`.
pub fn renamed_attrs(current: &NodeAttrs, new_name: &str, key_full: &[u8]) -> Result<String> {
    let mut attrs = current.clone();
    attrs.insert("n".to_string(), Value::from(new_name));
    encrypt_attrs(&attrs, key_full)
}
