//! Key generation and management for ZeroCrypt.
//!
//! Key pairs are X25519. Both halves are exported as the raw 32-byte
//! RFC 7748 encoding, base64-encoded, and passed around as opaque strings.

use std::fs;
use std::path::Path;

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use rand::rngs::OsRng;
use thiserror::Error;
use x25519_dalek::{PublicKey, StaticSecret};
use zeroize::Zeroizing;

/// Length of an exported X25519 key in bytes.
pub const KEY_SIZE: usize = 32;

/// Errors that can occur during key operations.
#[derive(Error, Debug)]
pub enum KeyError {
    #[error("Invalid key length: expected {expected}, got {got}")]
    InvalidKeyLength { expected: usize, got: usize },

    #[error("Base64 decode error: {0}")]
    Base64Error(#[from] base64::DecodeError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// A base64-exported key pair, as handed to callers.
#[derive(Clone, PartialEq, Eq)]
pub struct ExportedKeyPair {
    pub public_key: String,
    pub private_key: String,
}

impl std::fmt::Debug for ExportedKeyPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExportedKeyPair")
            .field("public_key", &self.public_key)
            .field("private_key", &"[REDACTED]")
            .finish()
    }
}

/// A ZeroCrypt key pair containing both public and private keys.
#[derive(Clone)]
pub struct KeyPair {
    secret: StaticSecret,
    public: PublicKey,
}

impl std::fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Don't expose private key in debug output
        f.debug_struct("KeyPair")
            .field("public", &BASE64.encode(self.public.as_bytes()))
            .field("secret", &"[REDACTED]")
            .finish()
    }
}

impl KeyPair {
    /// Generates a new random key pair.
    pub fn generate() -> Self {
        let secret = StaticSecret::random_from_rng(OsRng);
        let public = PublicKey::from(&secret);
        Self { secret, public }
    }

    /// Returns the public key.
    pub fn public_key(&self) -> &PublicKey {
        &self.public
    }

    /// Returns the secret key.
    pub fn secret_key(&self) -> &StaticSecret {
        &self.secret
    }

    /// Exports both halves as base64 strings.
    pub fn export(&self) -> ExportedKeyPair {
        ExportedKeyPair {
            public_key: encode_public_key(&self.public),
            private_key: encode_secret_key(&self.secret),
        }
    }

    /// Saves the key pair to files.
    ///
    /// Creates `{base_path}.pub` for the public key and `{base_path}.key` for
    /// the private key. The private key file is made owner-only on Unix.
    pub fn save_to_files(&self, base_path: &Path) -> Result<(), KeyError> {
        let pub_path = base_path.with_extension("pub");
        let key_path = base_path.with_extension("key");

        fs::write(&pub_path, format!("{}\n", encode_public_key(&self.public)))?;
        let secret_line = Zeroizing::new(format!("{}\n", encode_secret_key(&self.secret)));
        fs::write(&key_path, secret_line.as_bytes())?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mut perms = fs::metadata(&key_path)?.permissions();
            perms.set_mode(0o600);
            fs::set_permissions(&key_path, perms)?;
        }

        Ok(())
    }
}

/// Encodes a public key as base64.
pub fn encode_public_key(key: &PublicKey) -> String {
    BASE64.encode(key.as_bytes())
}

/// Encodes a secret key as base64.
pub fn encode_secret_key(key: &StaticSecret) -> String {
    BASE64.encode(key.as_bytes())
}

/// Decodes a base64 key into its 32 raw bytes.
fn decode_key_bytes(encoded: &str) -> Result<Zeroizing<[u8; KEY_SIZE]>, KeyError> {
    let bytes = Zeroizing::new(BASE64.decode(encoded.trim())?);
    if bytes.len() != KEY_SIZE {
        return Err(KeyError::InvalidKeyLength {
            expected: KEY_SIZE,
            got: bytes.len(),
        });
    }
    let mut out = Zeroizing::new([0u8; KEY_SIZE]);
    out.copy_from_slice(&bytes);
    Ok(out)
}

/// Decodes a base64 public key.
pub fn decode_public_key(encoded: &str) -> Result<PublicKey, KeyError> {
    let bytes = decode_key_bytes(encoded)?;
    Ok(PublicKey::from(*bytes))
}

/// Decodes a base64 secret key.
pub fn decode_secret_key(encoded: &str) -> Result<StaticSecret, KeyError> {
    let bytes = decode_key_bytes(encoded)?;
    Ok(StaticSecret::from(*bytes))
}

/// Reads a base64 key from a file, trimming surrounding whitespace.
pub fn read_key_file(path: &Path) -> Result<Zeroizing<String>, KeyError> {
    let content = Zeroizing::new(fs::read_to_string(path)?);
    Ok(Zeroizing::new(content.trim().to_string()))
}
