//! AES-128 primitives.
//!
//! MEGA wraps node keys with AES-128-ECB and encrypts node attributes with
//! AES-128-CBC under a zero IV. Node content encryption (CTR) is never
//! touched by a server-side copy and is not provided here.

use aes::cipher::{generic_array::GenericArray, BlockDecrypt, BlockEncrypt, KeyInit};
use aes::Aes128;

use crate::error::{MegaError, Result};

fn check_block_len(data: &[u8]) -> Result<()> {
    if data.is_empty() || data.len() % 16 != 0 {
        return Err(MegaError::CryptoError(format!(
            "Data length must be a non-zero multiple of 16, got {}",
            data.len()
        )));
    }
    Ok(())
}

/// AES-128-ECB encrypt one or more blocks.
///
/// # Errors
/// Fails if `data` is empty or not a multiple of 16 bytes.
pub fn aes128_ecb_encrypt(data: &[u8], key: &[u8; 16]) -> Result<Vec<u8>> {
    check_block_len(data)?;

    let cipher = Aes128::new(GenericArray::from_slice(key));
    let mut result = data.to_vec();
    for chunk in result.chunks_mut(16) {
        cipher.encrypt_block(GenericArray::from_mut_slice(chunk));
    }
    Ok(result)
}

/// AES-128-ECB decrypt one or more blocks.
///
/// # Errors
/// Fails if `data` is empty or not a multiple of 16 bytes.
pub fn aes128_ecb_decrypt(data: &[u8], key: &[u8; 16]) -> Result<Vec<u8>> {
    check_block_len(data)?;

    let cipher = Aes128::new(GenericArray::from_slice(key));
    let mut result = data.to_vec();
    for chunk in result.chunks_mut(16) {
        cipher.decrypt_block(GenericArray::from_mut_slice(chunk));
    }
    Ok(result)
}

/// AES-128-CBC encrypt with a zero IV.
///
/// # Errors
/// Fails if `data` is empty or not a multiple of 16 bytes.
pub fn aes128_cbc_encrypt(data: &[u8], key: &[u8; 16]) -> Result<Vec<u8>> {
    check_block_len(data)?;

    let cipher = Aes128::new(GenericArray::from_slice(key));
    let mut result = Vec::with_capacity(data.len());
    let mut prev = [0u8; 16];

    for chunk in data.chunks(16) {
        let mut block = GenericArray::clone_from_slice(chunk);
        for (b, p) in block.iter_mut().zip(prev.iter()) {
            *b ^= p;
        }
        cipher.encrypt_block(&mut block);
        prev.copy_from_slice(&block);
        result.extend_from_slice(&block);
    }

    Ok(result)
}

/// AES-128-CBC decrypt with a zero IV.
///
/// # Errors
/// Fails if `data` is empty or not a multiple of 16 bytes.
pub fn aes128_cbc_decrypt(data: &[u8], key: &[u8; 16]) -> Result<Vec<u8>> {
    check_block_len(data)?;

    let cipher = Aes128::new(GenericArray::from_slice(key));
    let mut result = Vec::with_capacity(data.len());
    let mut prev = [0u8; 16];

    for chunk in data.chunks(16) {
        let mut block = GenericArray::clone_from_slice(chunk);
        cipher.decrypt_block(&mut block);
        for (b, p) in block.iter_mut().zip(prev.iter()) {
            *b ^= p;
        }
        prev.copy_from_slice(chunk);
        result.extend_from_slice(&block);
    }

    Ok(result)
}
