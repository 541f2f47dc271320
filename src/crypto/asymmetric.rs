//! Public-key encryption using X25519 key exchange and ChaCha20Poly1305.
//!
//! This module implements an ephemeral-static scheme:
//! 1. Generate an ephemeral X25519 key pair
//! 2. Perform ECDH with the recipient's public key
//! 3. Derive a symmetric key using HKDF-SHA256
//! 4. Encrypt data with ChaCha20Poly1305

use chacha20poly1305::{
    aead::{Aead, KeyInit},
    ChaCha20Poly1305, Nonce,
};
use hkdf::Hkdf;
use rand::rngs::OsRng;
use rand::RngCore;
use sha2::Sha256;
use thiserror::Error;
use x25519_dalek::{EphemeralSecret, PublicKey, StaticSecret};
use zeroize::Zeroizing;

/// HKDF info string for key derivation.
const HKDF_INFO: &[u8] = b"ZEROCRYPT-V1-ASYMMETRIC";

/// Size of an X25519 public key.
pub const PUBLIC_KEY_SIZE: usize = 32;

/// Nonce size for ChaCha20Poly1305.
pub const NONCE_SIZE: usize = 12;

/// Authentication tag size for ChaCha20Poly1305.
const TAG_SIZE: usize = 16;

/// Errors that can occur during asymmetric encryption operations.
#[derive(Error, Debug)]
pub enum AsymmetricError {
    #[error("Encryption failed")]
    EncryptionFailed,

    #[error("Decryption failed")]
    DecryptionFailed,

    #[error("Invalid ciphertext: too short")]
    CiphertextTooShort,

    #[error("Key derivation failed")]
    KeyDerivationFailed,
}

/// Encrypted data bundle containing ephemeral public key, nonce, and ciphertext.
#[derive(Clone, Debug)]
pub struct EncryptedData {
    /// Ephemeral public key (32 bytes)
    pub ephemeral_public: [u8; PUBLIC_KEY_SIZE],
    /// Nonce (12 bytes)
    pub nonce: [u8; NONCE_SIZE],
    /// Encrypted ciphertext (variable length, includes auth tag)
    pub ciphertext: Vec<u8>,
}

impl EncryptedData {
    /// Serializes the encrypted data to bytes.
    ///
    /// Format: ephemeral_public (32) || nonce (12) || ciphertext (variable)
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut result =
            Vec::with_capacity(PUBLIC_KEY_SIZE + NONCE_SIZE + self.ciphertext.len());
        result.extend_from_slice(&self.ephemeral_public);
        result.extend_from_slice(&self.nonce);
        result.extend_from_slice(&self.ciphertext);
        result
    }

    /// Deserializes encrypted data from bytes.
    pub fn from_bytes(data: &[u8]) -> Result<Self, AsymmetricError> {
        if data.len() < PUBLIC_KEY_SIZE + NONCE_SIZE + TAG_SIZE {
            return Err(AsymmetricError::CiphertextTooShort);
        }

        let mut ephemeral_public = [0u8; PUBLIC_KEY_SIZE];
        ephemeral_public.copy_from_slice(&data[..PUBLIC_KEY_SIZE]);

        let mut nonce = [0u8; NONCE_SIZE];
        nonce.copy_from_slice(&data[PUBLIC_KEY_SIZE..PUBLIC_KEY_SIZE + NONCE_SIZE]);

        let ciphertext = data[PUBLIC_KEY_SIZE + NONCE_SIZE..].to_vec();

        Ok(Self {
            ephemeral_public,
            nonce,
            ciphertext,
        })
    }
}

/// Expands an ECDH shared secret into a ChaCha20Poly1305 key.
fn derive_symmetric_key(shared: &[u8]) -> Result<Zeroizing<[u8; 32]>, AsymmetricError> {
    let hk = Hkdf::<Sha256>::new(None, shared);
    let mut key = Zeroizing::new([0u8; 32]);
    hk.expand(HKDF_INFO, &mut *key)
        .map_err(|_| AsymmetricError::KeyDerivationFailed)?;
    Ok(key)
}

/// Encrypts data for a recipient using their public key.
pub fn encrypt(
    plaintext: &[u8],
    recipient_public: &PublicKey,
) -> Result<EncryptedData, AsymmetricError> {
    let ephemeral_secret = EphemeralSecret::random_from_rng(OsRng);
    let ephemeral_public = PublicKey::from(&ephemeral_secret);

    let shared_secret = ephemeral_secret.diffie_hellman(recipient_public);
    let key = derive_symmetric_key(shared_secret.as_bytes())?;

    let mut nonce_bytes = [0u8; NONCE_SIZE];
    OsRng.fill_bytes(&mut nonce_bytes);

    let cipher = ChaCha20Poly1305::new_from_slice(&*key)
        .map_err(|_| AsymmetricError::EncryptionFailed)?;

    let ciphertext = cipher
        .encrypt(Nonce::from_slice(&nonce_bytes), plaintext)
        .map_err(|_| AsymmetricError::EncryptionFailed)?;

    Ok(EncryptedData {
        ephemeral_public: *ephemeral_public.as_bytes(),
        nonce: nonce_bytes,
        ciphertext,
    })
}

/// Decrypts data using the recipient's secret key.
pub fn decrypt(
    encrypted: &EncryptedData,
    secret_key: &StaticSecret,
) -> Result<Vec<u8>, AsymmetricError> {
    let ephemeral_public = PublicKey::from(encrypted.ephemeral_public);

    let shared_secret = secret_key.diffie_hellman(&ephemeral_public);
    let key = derive_symmetric_key(shared_secret.as_bytes())?;

    let cipher = ChaCha20Poly1305::new_from_slice(&*key)
        .map_err(|_| AsymmetricError::DecryptionFailed)?;

    cipher
        .decrypt(
            Nonce::from_slice(&encrypted.nonce),
            encrypted.ciphertext.as_ref(),
        )
        .map_err(|_| AsymmetricError::DecryptionFailed)
}

/// Convenience function to encrypt bytes and return serialized result.
pub fn encrypt_to_bytes(
    plaintext: &[u8],
    recipient_public: &PublicKey,
) -> Result<Vec<u8>, AsymmetricError> {
    let encrypted = encrypt(plaintext, recipient_public)?;
    Ok(encrypted.to_bytes())
}

/// Convenience function to decrypt from serialized bytes.
pub fn decrypt_from_bytes(
    data: &[u8],
    secret_key: &StaticSecret,
) -> Result<Vec<u8>, AsymmetricError> {
    let encrypted = EncryptedData::from_bytes(data)?;
    decrypt(&encrypted, secret_key)
}
