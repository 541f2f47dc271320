//! Message decoding.
//!
//! This module orchestrates the decode direction:
//! 1. Extract the hidden payload from the input text
//! 2. Check that the chosen method has its key material
//! 3. Decrypt the payload (symmetric or asymmetric), or return it as-is
//!
//! Extraction always runs first. If the text carries nothing, no decryption
//! is attempted. Every decryption failure looks the same to the caller.

use thiserror::Error;
use tracing::debug;

use crate::crypto::{CryptoProvider, DefaultProvider};
use crate::method::Method;
use crate::stego::{self, ExtractError, TrailingBits};

/// Errors that can occur during decoding.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecoderError {
    #[error("No hidden data found in text")]
    NoHiddenData,

    #[error("{0} decryption requires key material")]
    MissingKeyMaterial(Method),

    #[error("Decryption failed: invalid key or corrupted data")]
    DecryptionFailure,

    #[error("Hidden data is corrupted")]
    CorruptPayload,
}

impl From<ExtractError> for DecoderError {
    fn from(err: ExtractError) -> Self {
        match err {
            ExtractError::NotFound => DecoderError::NoHiddenData,
            ExtractError::TrailingBits { .. } | ExtractError::InvalidUtf16 => {
                DecoderError::CorruptPayload
            }
        }
    }
}

/// Configuration for the decoder.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DecoderConfig {
    /// Policy for marker runs that are not a whole number of characters.
    pub trailing_bits: TrailingBits,
}

/// Decodes a secret from text using the default crypto provider.
///
/// # Arguments
/// * `input` - Text that may carry a hidden payload
/// * `method` - Method the sender used when encoding
/// * `key` - Password for [`Method::Symmetric`], own private key (base64)
///   for [`Method::Asymmetric`], ignored for [`Method::None`]
pub fn decode_message(input: &str, method: Method, key: &str) -> Result<String, DecoderError> {
    decode_message_with(&DefaultProvider, input, method, key)
}

/// Decodes a secret from text with a caller-supplied crypto provider.
pub fn decode_message_with<P>(
    provider: &P,
    input: &str,
    method: Method,
    key: &str,
) -> Result<String, DecoderError>
where
    P: CryptoProvider + ?Sized,
{
    decode_message_with_config(provider, input, method, key, &DecoderConfig::default())
}

/// Decodes a secret with a custom provider and configuration.
pub fn decode_message_with_config<P>(
    provider: &P,
    input: &str,
    method: Method,
    key: &str,
    config: &DecoderConfig,
) -> Result<String, DecoderError>
where
    P: CryptoProvider + ?Sized,
{
    // Stage A: extraction
    let payload = stego::extract_with_policy(input, config.trailing_bits).map_err(|e| {
        debug!(error = %e, "extraction failed");
        DecoderError::from(e)
    })?;

    debug!(
        %method,
        payload_units = payload.encode_utf16().count(),
        "extracted hidden payload"
    );

    if method.requires_key() && key.is_empty() {
        return Err(DecoderError::MissingKeyMaterial(method));
    }

    // Stage B: confidentiality reversal
    let plaintext = match method {
        Method::None => return Ok(payload),
        Method::Symmetric => provider.symmetric_decrypt(&payload, key),
        Method::Asymmetric => provider.asymmetric_decrypt(&payload, key),
    }
    .map_err(|_| DecoderError::DecryptionFailure)?;

    String::from_utf8(plaintext).map_err(|_| DecoderError::DecryptionFailure)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::generate_key_pair;
    use crate::encoder::encode_message;
    use crate::stego::{hide, DELIM, MARK_0, MARK_1};

    #[test]
    fn test_decode_none_roundtrip() {
        let encoded = encode_message("Lovely day", "the eagle has landed", Method::None, "").unwrap();
        let decoded = decode_message(&encoded, Method::None, "").unwrap();

        assert_eq!(decoded, "the eagle has landed");
    }

    #[test]
    fn test_decode_no_hidden_data() {
        assert_eq!(
            decode_message("just text", Method::Symmetric, "pw"),
            Err(DecoderError::NoHiddenData)
        );
    }

    #[test]
    fn test_decode_no_hidden_data_checked_before_key() {
        assert_eq!(
            decode_message("just text", Method::Symmetric, ""),
            Err(DecoderError::NoHiddenData)
        );
    }

    #[test]
    fn test_decode_missing_password() {
        let encoded = encode_message("c", "s", Method::Symmetric, "pw").unwrap();
        assert_eq!(
            decode_message(&encoded, Method::Symmetric, ""),
            Err(DecoderError::MissingKeyMaterial(Method::Symmetric))
        );
    }

    #[test]
    fn test_decode_missing_private_key() {
        let pair = generate_key_pair();
        let encoded = encode_message("c", "s", Method::Asymmetric, &pair.public_key).unwrap();
        assert_eq!(
            decode_message(&encoded, Method::Asymmetric, ""),
            Err(DecoderError::MissingKeyMaterial(Method::Asymmetric))
        );
    }

    #[test]
    fn test_decode_symmetric_wrong_password() {
        let encoded = encode_message("carrier", "secret", Method::Symmetric, "right").unwrap();
        assert_eq!(
            decode_message(&encoded, Method::Symmetric, "wrong"),
            Err(DecoderError::DecryptionFailure)
        );
    }

    #[test]
    fn test_decode_symmetric_on_plain_payload_fails() {
        let encoded = hide("carrier", "not base64 at all");
        assert_eq!(
            decode_message(&encoded, Method::Symmetric, "pw"),
            Err(DecoderError::DecryptionFailure)
        );
    }

    #[test]
    fn test_decode_asymmetric_roundtrip() {
        let pair = generate_key_pair();
        let encoded =
            encode_message("Regards, Bob", "launch codes", Method::Asymmetric, &pair.public_key)
                .unwrap();

        assert_eq!(
            decode_message(&encoded, Method::Asymmetric, &pair.private_key).unwrap(),
            "launch codes"
        );
    }

    #[test]
    fn test_decode_corrupt_payload() {
        // 17 bits
        let run: String = std::iter::repeat(MARK_0)
            .take(16)
            .chain(std::iter::once(MARK_1))
            .collect();
        let text = format!("a{DELIM}{run}{DELIM}b");

        assert_eq!(
            decode_message(&text, Method::None, ""),
            Err(DecoderError::CorruptPayload)
        );

        let lenient = DecoderConfig {
            trailing_bits: TrailingBits::Truncate,
        };
        assert_eq!(
            decode_message_with_config(&DefaultProvider, &text, Method::None, "", &lenient)
                .unwrap(),
            "\0"
        );
    }
}
