//! Password-based symmetric encryption.
//!
//! This module provides:
//! - PBKDF2-HMAC-SHA256 (100 000 iterations) for key derivation
//! - AES-256-GCM for authenticated encryption
//!
//! The framed buffer is `salt (16) || iv (12) || ciphertext (includes tag)`.
//! These offsets are a wire contract: other implementations slice the same
//! way.

use aes_gcm::{
    aead::{Aead, KeyInit},
    Aes256Gcm, Nonce,
};
use pbkdf2::pbkdf2_hmac;
use rand::rngs::OsRng;
use rand::RngCore;
use sha2::Sha256;
use thiserror::Error;
use zeroize::Zeroizing;

/// Salt size for key derivation.
pub const SALT_SIZE: usize = 16;

/// IV size for AES-GCM.
pub const IV_SIZE: usize = 12;

/// Authentication tag appended by AES-GCM.
pub const TAG_SIZE: usize = 16;

/// PBKDF2 iteration count.
pub const PBKDF2_ITERATIONS: u32 = 100_000;

/// Errors that can occur during symmetric encryption.
///
/// Decryption collapses every cause into a single variant so callers
/// cannot tell a wrong password from a damaged buffer.
#[derive(Error, Debug)]
pub enum SymmetricError {
    #[error("Encryption failed")]
    EncryptionFailed,

    #[error("Invalid password or corrupted data")]
    DecryptionFailed,

    #[error("Invalid ciphertext: too short")]
    CiphertextTooShort,
}

/// Derives a 256-bit AES key from a password and salt.
fn derive_key(password: &str, salt: &[u8]) -> Zeroizing<[u8; 32]> {
    let mut key = Zeroizing::new([0u8; 32]);
    pbkdf2_hmac::<Sha256>(password.as_bytes(), salt, PBKDF2_ITERATIONS, &mut *key);
    key
}

/// Encrypts data with a password.
///
/// A fresh salt and IV are drawn for every call, so encrypting the same
/// plaintext twice never yields the same buffer.
pub fn encrypt_symmetric(plaintext: &[u8], password: &str) -> Result<Vec<u8>, SymmetricError> {
    let mut salt = [0u8; SALT_SIZE];
    let mut iv = [0u8; IV_SIZE];
    OsRng.fill_bytes(&mut salt);
    OsRng.fill_bytes(&mut iv);

    let key = derive_key(password, &salt);
    let cipher =
        Aes256Gcm::new_from_slice(&*key).map_err(|_| SymmetricError::EncryptionFailed)?;

    let ciphertext = cipher
        .encrypt(Nonce::from_slice(&iv), plaintext)
        .map_err(|_| SymmetricError::EncryptionFailed)?;

    let mut result = Vec::with_capacity(SALT_SIZE + IV_SIZE + ciphertext.len());
    result.extend_from_slice(&salt);
    result.extend_from_slice(&iv);
    result.extend_from_slice(&ciphertext);

    Ok(result)
}

/// Decrypts a framed buffer produced by [`encrypt_symmetric`].
pub fn decrypt_symmetric(data: &[u8], password: &str) -> Result<Vec<u8>, SymmetricError> {
    if data.len() < SALT_SIZE + IV_SIZE + TAG_SIZE {
        return Err(SymmetricError::CiphertextTooShort);
    }

    let salt = &data[..SALT_SIZE];
    let iv = &data[SALT_SIZE..SALT_SIZE + IV_SIZE];
    let ciphertext = &data[SALT_SIZE + IV_SIZE..];

    let key = derive_key(password, salt);
    let cipher =
        Aes256Gcm::new_from_slice(&*key).map_err(|_| SymmetricError::DecryptionFailed)?;

    cipher
        .decrypt(Nonce::from_slice(iv), ciphertext)
        .map_err(|_| SymmetricError::DecryptionFailed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encrypt_decrypt_roundtrip() {
        let plaintext = b"Hello, ZeroCrypt!";
        let password = "my_secret_password";

        let encrypted = encrypt_symmetric(plaintext, password).unwrap();
        let decrypted = decrypt_symmetric(&encrypted, password).unwrap();

        assert_eq!(plaintext.as_slice(), decrypted.as_slice());
    }

    #[test]
    fn test_framed_layout_length() {
        let plaintext = b"twelve bytes";
        let encrypted = encrypt_symmetric(plaintext, "pw").unwrap();

        assert_eq!(
            encrypted.len(),
            SALT_SIZE + IV_SIZE + plaintext.len() + TAG_SIZE
        );
    }

    #[test]
    fn test_fresh_salt_and_iv_per_call() {
        let a = encrypt_symmetric(b"same", "same").unwrap();
        let b = encrypt_symmetric(b"same", "same").unwrap();

        assert_ne!(a[..SALT_SIZE], b[..SALT_SIZE]);
        assert_ne!(
            a[SALT_SIZE..SALT_SIZE + IV_SIZE],
            b[SALT_SIZE..SALT_SIZE + IV_SIZE]
        );
    }

    #[test]
    fn test_wrong_password_fails() {
        let encrypted = encrypt_symmetric(b"Secret data", "correct").unwrap();
        let result = decrypt_symmetric(&encrypted, "wrong");

        assert!(matches!(result, Err(SymmetricError::DecryptionFailed)));
    }

    #[test]
    fn test_tampered_ciphertext_fails() {
        let mut encrypted = encrypt_symmetric(b"Secret data", "pw").unwrap();
        let last = encrypted.len() - 1;
        encrypted[last] ^= 0x01;

        assert!(matches!(
            decrypt_symmetric(&encrypted, "pw"),
            Err(SymmetricError::DecryptionFailed)
        ));
    }

    #[test]
    fn test_empty_plaintext() {
        let encrypted = encrypt_symmetric(b"", "test").unwrap();
        let decrypted = decrypt_symmetric(&encrypted, "test").unwrap();

        assert!(decrypted.is_empty());
    }

    #[test]
    fn test_ciphertext_too_short() {
        let short_data = vec![0u8; SALT_SIZE + IV_SIZE + TAG_SIZE - 1];
        let result = decrypt_symmetric(&short_data, "test");

        assert!(matches!(result, Err(SymmetricError::CiphertextTooShort)));
    }

    #[test]
    fn test_key_derivation_depends_on_salt() {
        let k1 = derive_key("password", &[1u8; SALT_SIZE]);
        let k2 = derive_key("password", &[2u8; SALT_SIZE]);
        let k3 = derive_key("password", &[1u8; SALT_SIZE]);

        assert_ne!(*k1, *k2);
        assert_eq!(*k1, *k3);
    }
}
