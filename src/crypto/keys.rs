//! Node key wrapping.
//!
//! Every node carries its own symmetric key. Folder keys are 16 bytes, file
//! keys are 32 bytes (AES key XOR'd with nonce/meta-MAC, followed by the
//! nonce and meta-MAC). The server only ever stores those keys wrapped
//! (AES-128-ECB) under some other key: the owner's master key or a share key.
//!
//! Copying a node server-side amounts to storing a fresh wrapping of the same
//! raw key next to a new parent link, so the payload never moves.

use crate::base64::{base64url_decode, base64url_encode};
use crate::error::{MegaError, Result};

use super::aes::{aes128_ecb_decrypt, aes128_ecb_encrypt};

/// Length of a folder node key.
pub const FOLDER_KEY_LEN: usize = 16;
/// Length of a file node key.
pub const FILE_KEY_LEN: usize = 32;

/// Wrap a raw node key under `wrapping_key` and encode it for transport.
///
/// # Example
/// ```
/// use megacp::crypto::{unwrap_node_key, wrap_node_key};
///
/// # fn example() -> megacp::Result<()> {
/// let master_key = [7u8; 16];
/// let node_key = [1u8; 32];
/// let wrapped = wrap_node_key(&node_key, &master_key)?;
/// assert_eq!(unwrap_node_key(&wrapped, &master_key)?, node_key);
/// # Ok(())
/// # }
/// ```
pub fn wrap_node_key(key_full: &[u8], wrapping_key: &[u8; 16]) -> Result<String> {
    check_key_len(key_full.len())?;
    let encrypted = aes128_ecb_encrypt(key_full, wrapping_key)?;
    Ok(base64url_encode(&encrypted))
}

/// Decode and unwrap a node key previously wrapped under `wrapping_key`.
pub fn unwrap_node_key(wrapped_b64: &str, wrapping_key: &[u8; 16]) -> Result<Vec<u8>> {
    let encrypted = base64url_decode(wrapped_b64)?;
    check_key_len(encrypted.len())?;
    aes128_ecb_decrypt(&encrypted, wrapping_key)
}

/// Derive the key that protects a node's attributes.
///
/// Folder keys are used as-is; file keys fold their two halves with XOR.
pub fn attr_key(key_full: &[u8]) -> Result<[u8; 16]> {
    let mut key = [0u8; 16];
    match key_full.len() {
        FILE_KEY_LEN => {
            for (i, k) in key.iter_mut().enumerate() {
                *k = key_full[i] ^ key_full[i + 16];
            }
        }
        FOLDER_KEY_LEN => key.copy_from_slice(key_full),
        n => {
            return Err(MegaError::CryptoError(format!(
                "Invalid node key length {}",
                n
            )))
        }
    }
    Ok(key)
}

fn check_key_len(len: usize) -> Result<()> {
    if len == FOLDER_KEY_LEN || len == FILE_KEY_LEN {
        Ok(())
    } else {
        Err(MegaError::CryptoError(format!(
            "Invalid node key length {}",
            len
        )))
    }
}
