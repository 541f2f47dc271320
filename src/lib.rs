//! # ZeroCrypt - Hide secrets in plain text
//!
//! ZeroCrypt hides a secret message inside ordinary text using invisible
//! zero-width characters, optionally encrypting it first.
//!
//! ## Overview
//!
//! - The secret is turned into UTF-16 code units, 16 bits each
//! - Each bit becomes a zero-width marker (ZWSP = 0, ZWNJ = 1)
//! - The marker run is wrapped in ZWJ delimiters
//! - The run is spliced in after the first visible character of the carrier
//!
//! The output renders exactly like the carrier. Removing every zero-width
//! marker gives the carrier back.
//!
//! ## Methods
//!
//! - **None**: hide the secret as-is
//! - **Symmetric**: PBKDF2-HMAC-SHA256 + AES-256-GCM with a shared password
//! - **Asymmetric**: X25519 + ChaCha20Poly1305 for a recipient's public key
//!
//! Encrypted secrets are hidden as base64 text.
//!
//! ## Example Usage
//!
//! ```rust
//! use zerocrypt::{decode_message, encode_message, Method};
//!
//! let carrier = "See you at the usual place.";
//!
//! let output = encode_message(carrier, "bring the documents", Method::Symmetric, "hunter2")
//!     .unwrap();
//!
//! // Looks exactly like the carrier
//! assert_eq!(zerocrypt::stego::strip(&output), carrier);
//!
//! let secret = decode_message(&output, Method::Symmetric, "hunter2").unwrap();
//! assert_eq!(secret, "bring the documents");
//! ```
//!
//! ## Modules
//!
//! - [`stego`]: Zero-width codec (hide, extract, strip)
//! - [`crypto`]: Encryption, key generation and the provider trait
//! - [`encoder`]: Encode pipeline (encrypt, then hide)
//! - [`decoder`]: Decode pipeline (extract, then decrypt)
//! - [`config`]: TOML configuration

pub mod config;
pub mod crypto;
pub mod decoder;
pub mod encoder;
pub mod method;
pub mod stego;

// Re-export commonly used types at the crate root
pub use config::{Config, ConfigError};
pub use crypto::{
    generate_key_pair, CryptoError, CryptoProvider, DefaultProvider, ExportedKeyPair, KeyPair,
};
pub use decoder::{
    decode_message, decode_message_with, decode_message_with_config, DecoderConfig, DecoderError,
};
pub use encoder::{encode_message, encode_message_with, EncoderError};
pub use method::{Method, ParseMethodError};
pub use stego::{extract, extract_with_policy, hide, ExtractError, TrailingBits};
