//! Encode command - hide a message inside carrier text.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use tracing::info;
use zeroize::Zeroizing;

use zerocrypt::{encode_message, Config, Method};

use super::{read_key, read_text, CommandExecutor};

/// Hide a message inside carrier text.
///
/// The output looks exactly like the carrier. With no --message, the
/// secret is read from stdin.
#[derive(Args, Debug)]
pub struct EncodeCommand {
    /// Visible carrier text (empty means a single space)
    #[arg(short, long, conflicts_with = "carrier_file")]
    pub carrier: Option<String>,

    /// Read the carrier text from a file
    #[arg(long, conflicts_with = "carrier")]
    pub carrier_file: Option<PathBuf>,

    /// Secret message to hide (reads from stdin if not provided)
    #[arg(short, long)]
    pub message: Option<String>,

    /// Encryption method: none, symmetric, asymmetric (default from config)
    #[arg(long)]
    pub method: Option<Method>,

    /// Password for symmetric encryption
    #[arg(short, long)]
    pub password: Option<String>,

    /// Recipient's public key (base64) for asymmetric encryption
    #[arg(short, long, conflicts_with = "key_file")]
    pub key: Option<String>,

    /// Path to the recipient's public key file (.pub)
    #[arg(long, conflicts_with = "key")]
    pub key_file: Option<PathBuf>,

    /// Write the output text to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl CommandExecutor for EncodeCommand {
    fn execute(&self, config: &Config) -> Result<()> {
        let method = self.method.unwrap_or(config.default_method);

        let carrier = match (&self.carrier, &self.carrier_file) {
            (Some(text), _) => text.clone(),
            (None, Some(path)) => read_text(None, Some(path.as_path()), "carrier")?,
            (None, None) => String::new(),
        };

        let secret = Zeroizing::new(read_text(self.message.as_deref(), None, "message")?);

        let key = match method {
            Method::None => Zeroizing::new(String::new()),
            Method::Symmetric => Zeroizing::new(self.password.clone().unwrap_or_default()),
            Method::Asymmetric => read_key(self.key.as_deref(), self.key_file.as_deref())?,
        };

        let output = encode_message(&carrier, &secret, method, &key)
            .context("Failed to encode message")?;

        match &self.output {
            Some(path) => {
                std::fs::write(path, &output)
                    .with_context(|| format!("Failed to write output to {}", path.display()))?;
                info!(path = %path.display(), %method, "wrote encoded text");
                eprintln!("Encoded text written to: {}", path.display());
            }
            None => println!("{}", output),
        }

        Ok(())
    }
}
