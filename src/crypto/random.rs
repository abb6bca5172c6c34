//! Random key generation.

use rand::RngCore;

/// Generate a random 16-byte AES-128 key (master keys, folder keys).
pub fn make_random_key() -> [u8; 16] {
    let mut key = [0u8; 16];
    rand::thread_rng().fill_bytes(&mut key);
    key
}

/// Generate a random 32-byte file node key (AES key, nonce and meta-MAC).
pub fn make_random_file_key() -> [u8; 32] {
    let mut key = [0u8; 32];
    rand::thread_rng().fill_bytes(&mut key);
    key
}
