//! Key generation command.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use tracing::info;

use zerocrypt::crypto::KeyPair;
use zerocrypt::Config;

use super::CommandExecutor;

/// Generate a new key pair for public-key encryption.
#[derive(Args, Debug)]
pub struct KeygenCommand {
    /// Output path for keys (creates .pub and .key files)
    #[arg(short, long, default_value = "zerocrypt")]
    pub output: PathBuf,
}

impl CommandExecutor for KeygenCommand {
    fn execute(&self, _config: &Config) -> Result<()> {
        let keypair = KeyPair::generate();
        keypair
            .save_to_files(&self.output)
            .context("Failed to save key pair")?;

        let pub_path = self.output.with_extension("pub");
        let key_path = self.output.with_extension("key");
        info!(public = %pub_path.display(), private = %key_path.display(), "generated key pair");

        println!("Key pair generated successfully:");
        println!("  Public key:  {}", pub_path.display());
        println!("  Private key: {}", key_path.display());
        println!();
        println!("Public key (share this with senders):");
        println!("  {}", keypair.export().public_key);
        println!();
        println!("Keep your private key (.key) secret and secure.");

        Ok(())
    }
}
