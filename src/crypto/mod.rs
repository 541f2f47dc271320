//! Cryptographic operations for ZeroCrypt.
//!
//! This module provides:
//! - Password-based encryption (PBKDF2-HMAC-SHA256 + AES-256-GCM)
//! - Public-key encryption (X25519 + HKDF + ChaCha20Poly1305)
//! - Key generation and base64 export
//! - The [`CryptoProvider`] seam the pipeline talks to
//!
//! Every buffer that leaves this module is standard base64 text, so it can
//! be fed straight into the zero-width codec.

pub mod asymmetric;
pub mod keys;
pub mod symmetric;

pub use asymmetric::{decrypt_from_bytes, encrypt_to_bytes, AsymmetricError, EncryptedData};
pub use keys::{
    decode_public_key, decode_secret_key, encode_public_key, encode_secret_key, read_key_file,
    ExportedKeyPair, KeyError, KeyPair,
};
pub use symmetric::{decrypt_symmetric, encrypt_symmetric, SymmetricError};

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use thiserror::Error;

/// Errors surfaced by a [`CryptoProvider`].
///
/// Messages are fixed strings and never say why an operation failed.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CryptoError {
    #[error("Encryption failed")]
    EncryptionFailed,

    #[error("Invalid key or corrupted data")]
    DecryptionFailed,

    #[error("Key generation failed")]
    KeyGenerationFailed,
}

/// Cryptographic backend used by the encode/decode pipeline.
///
/// Ciphertexts and keys cross this boundary as base64 text; plaintexts as
/// raw bytes.
pub trait CryptoProvider: Send + Sync {
    /// Encrypts with a password and returns the framed buffer as base64.
    fn symmetric_encrypt(&self, plaintext: &[u8], password: &str) -> Result<String, CryptoError>;

    /// Reverses [`CryptoProvider::symmetric_encrypt`].
    fn symmetric_decrypt(&self, encoded: &str, password: &str) -> Result<Vec<u8>, CryptoError>;

    /// Generates a fresh key pair, both halves base64-encoded.
    fn generate_key_pair(&self) -> Result<ExportedKeyPair, CryptoError>;

    /// Encrypts for the holder of `public_key` and returns base64.
    fn asymmetric_encrypt(&self, plaintext: &[u8], public_key: &str)
        -> Result<String, CryptoError>;

    /// Reverses [`CryptoProvider::asymmetric_encrypt`] with the matching private key.
    fn asymmetric_decrypt(&self, encoded: &str, private_key: &str)
        -> Result<Vec<u8>, CryptoError>;
}

/// The built-in provider backed by RustCrypto and x25519-dalek.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultProvider;

impl CryptoProvider for DefaultProvider {
    fn symmetric_encrypt(&self, plaintext: &[u8], password: &str) -> Result<String, CryptoError> {
        let framed =
            encrypt_symmetric(plaintext, password).map_err(|_| CryptoError::EncryptionFailed)?;
        Ok(BASE64.encode(framed))
    }

    fn symmetric_decrypt(&self, encoded: &str, password: &str) -> Result<Vec<u8>, CryptoError> {
        let framed = BASE64
            .decode(encoded.trim())
            .map_err(|_| CryptoError::DecryptionFailed)?;
        decrypt_symmetric(&framed, password).map_err(|_| CryptoError::DecryptionFailed)
    }

    fn generate_key_pair(&self) -> Result<ExportedKeyPair, CryptoError> {
        Ok(KeyPair::generate().export())
    }

    fn asymmetric_encrypt(
        &self,
        plaintext: &[u8],
        public_key: &str,
    ) -> Result<String, CryptoError> {
        let public = decode_public_key(public_key).map_err(|_| CryptoError::EncryptionFailed)?;
        let encrypted =
            encrypt_to_bytes(plaintext, &public).map_err(|_| CryptoError::EncryptionFailed)?;
        Ok(BASE64.encode(encrypted))
    }

    fn asymmetric_decrypt(
        &self,
        encoded: &str,
        private_key: &str,
    ) -> Result<Vec<u8>, CryptoError> {
        let secret = decode_secret_key(private_key).map_err(|_| CryptoError::DecryptionFailed)?;
        let data = BASE64
            .decode(encoded.trim())
            .map_err(|_| CryptoError::DecryptionFailed)?;
        decrypt_from_bytes(&data, &secret).map_err(|_| CryptoError::DecryptionFailed)
    }
}

/// Generates a fresh key pair with the default provider.
pub fn generate_key_pair() -> ExportedKeyPair {
    KeyPair::generate().export()
}
