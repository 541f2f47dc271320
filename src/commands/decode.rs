//! Decode command - extract a hidden message from text.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use zeroize::Zeroizing;

use zerocrypt::{decode_message_with_config, Config, DefaultProvider, Method, TrailingBits};

use super::{read_key, read_text, CommandExecutor};

/// Extract (and decrypt) a hidden message from text.
///
/// With no --input or --input-file, the text is read from stdin.
#[derive(Args, Debug)]
pub struct DecodeCommand {
    /// Text carrying the hidden message
    #[arg(short, long, conflicts_with = "input_file")]
    pub input: Option<String>,

    /// Read the text from a file
    #[arg(long, conflicts_with = "input")]
    pub input_file: Option<PathBuf>,

    /// Method the sender used: none, symmetric, asymmetric (default from config)
    #[arg(long)]
    pub method: Option<Method>,

    /// Password for symmetric decryption
    #[arg(short, long)]
    pub password: Option<String>,

    /// Your private key (base64) for asymmetric decryption
    #[arg(short, long, conflicts_with = "key_file")]
    pub key: Option<String>,

    /// Path to your private key file (.key)
    #[arg(long, conflicts_with = "key")]
    pub key_file: Option<PathBuf>,

    /// What to do with hidden data that ends mid-character: reject, truncate
    #[arg(long)]
    pub trailing_bits: Option<TrailingBits>,
}

impl CommandExecutor for DecodeCommand {
    fn execute(&self, config: &Config) -> Result<()> {
        let method = self.method.unwrap_or(config.default_method);

        let input = read_text(self.input.as_deref(), self.input_file.as_deref(), "input")?;

        let key = match method {
            Method::None => Zeroizing::new(String::new()),
            Method::Symmetric => Zeroizing::new(self.password.clone().unwrap_or_default()),
            Method::Asymmetric => read_key(self.key.as_deref(), self.key_file.as_deref())?,
        };

        let mut decoder_config = config.decoder_config();
        if let Some(policy) = self.trailing_bits {
            decoder_config.trailing_bits = policy;
        }

        let secret = Zeroizing::new(
            decode_message_with_config(&DefaultProvider, &input, method, &key, &decoder_config)
                .context("Failed to decode message")?,
        );

        println!("{}", *secret);

        Ok(())
    }
}
