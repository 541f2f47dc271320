//! Message encoding.
//!
//! This module orchestrates the encode direction:
//! 1. Check that the chosen method has its key material
//! 2. Encrypt the secret (symmetric or asymmetric), or pass it through
//! 3. Hide the resulting text in the carrier with zero-width characters
//!
//! Nothing is returned unless every stage succeeds.

use thiserror::Error;
use tracing::debug;

use crate::crypto::{CryptoProvider, DefaultProvider};
use crate::method::Method;
use crate::stego;

/// Errors that can occur during encoding.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncoderError {
    #[error("{0} encryption requires key material")]
    MissingKeyMaterial(Method),

    #[error("Encryption failed")]
    EncryptionFailure,
}

/// Encodes a secret into a carrier using the default crypto provider.
///
/// # Arguments
/// * `carrier` - Visible text that will host the secret (may be empty)
/// * `secret` - The message to hide
/// * `method` - Confidentiality method applied before hiding
/// * `key` - Password for [`Method::Symmetric`], recipient public key
///   (base64) for [`Method::Asymmetric`], ignored for [`Method::None`]
///
/// # Returns
/// The carrier with the hidden sequence spliced in.
pub fn encode_message(
    carrier: &str,
    secret: &str,
    method: Method,
    key: &str,
) -> Result<String, EncoderError> {
    encode_message_with(&DefaultProvider, carrier, secret, method, key)
}

/// Encodes a secret into a carrier with a caller-supplied crypto provider.
pub fn encode_message_with<P>(
    provider: &P,
    carrier: &str,
    secret: &str,
    method: Method,
    key: &str,
) -> Result<String, EncoderError>
where
    P: CryptoProvider + ?Sized,
{
    if method.requires_key() && key.is_empty() {
        return Err(EncoderError::MissingKeyMaterial(method));
    }

    // Stage A: confidentiality
    let payload = match method {
        Method::None => secret.to_string(),
        Method::Symmetric => provider
            .symmetric_encrypt(secret.as_bytes(), key)
            .map_err(|_| EncoderError::EncryptionFailure)?,
        Method::Asymmetric => provider
            .asymmetric_encrypt(secret.as_bytes(), key)
            .map_err(|_| EncoderError::EncryptionFailure)?,
    };

    debug!(
        %method,
        payload_units = payload.encode_utf16().count(),
        carrier_chars = carrier.chars().count(),
        "hiding payload in carrier"
    );

    // Stage B: concealment
    let output = stego::hide(carrier, &payload);

    debug!(
        zero_width_chars = stego::hidden_len(&payload),
        "encoded message"
    );

    Ok(output)
}
