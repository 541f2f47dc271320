//! Inspect command - report whether text carries hidden data.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use zerocrypt::stego::{self, ExtractError, TrailingBits};
use zerocrypt::Config;

use super::{read_text, CommandExecutor};

/// Report whether text carries hidden data, without decrypting it.
#[derive(Args, Debug)]
pub struct InspectCommand {
    /// Text to inspect
    #[arg(short, long, conflicts_with = "input_file")]
    pub input: Option<String>,

    /// Read the text from a file
    #[arg(long, conflicts_with = "input")]
    pub input_file: Option<PathBuf>,
}

impl CommandExecutor for InspectCommand {
    fn execute(&self, config: &Config) -> Result<()> {
        let input = read_text(self.input.as_deref(), self.input_file.as_deref(), "input")?;

        let zero_width = input.chars().filter(|&c| stego::is_alphabet_char(c)).count();
        let visible = stego::strip(&input).chars().count();

        println!("Visible characters:    {}", visible);
        println!("Zero-width characters: {}", zero_width);

        match stego::extract_with_policy(&input, config.trailing_bits) {
            Ok(payload) => {
                println!("Hidden data:           yes");
                println!("Payload length:        {} UTF-16 units", payload.encode_utf16().count());
            }
            Err(ExtractError::NotFound) => {
                println!("Hidden data:           no");
            }
            Err(e) => {
                println!("Hidden data:           corrupted ({})", e);
                if config.trailing_bits == TrailingBits::Reject {
                    println!("                       (try decode --trailing-bits truncate)");
                }
            }
        }

        Ok(())
    }
}
