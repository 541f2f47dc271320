//! Command module - Strategy pattern for CLI commands.
//!
//! Each command is a separate module implementing the `CommandExecutor` trait.
//! The commands are the only stateful layer: they gather text, keys and
//! settings from flags, files, stdin and config, then call the pure
//! library pipeline.

mod decode;
mod encode;
mod inspect;
mod keygen;

pub use decode::DecodeCommand;
pub use encode::EncodeCommand;
pub use inspect::InspectCommand;
pub use keygen::KeygenCommand;

use std::io::{self, Read};
use std::path::Path;

use anyhow::{Context, Result};
use zeroize::Zeroizing;

use zerocrypt::crypto::read_key_file;
use zerocrypt::Config;

/// Trait for command execution - Strategy pattern.
///
/// Each command struct holds its parsed arguments and implements
/// this trait to define its execution logic.
pub trait CommandExecutor {
    /// Executes the command with its parsed arguments and loaded config.
    fn execute(&self, config: &Config) -> Result<()>;
}

/// Resolves text from a direct argument, a file, or stdin, in that order.
///
/// Text read from a file or stdin loses its trailing line break only.
fn read_text(direct: Option<&str>, file: Option<&Path>, what: &str) -> Result<String> {
    if let Some(text) = direct {
        return Ok(text.to_string());
    }

    let raw = match file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {} from {}", what, path.display()))?,
        None => {
            eprintln!("Reading {} from stdin (Ctrl+D to finish):", what);
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .with_context(|| format!("Failed to read {} from stdin", what))?;
            buffer
        }
    };

    Ok(raw.trim_end_matches(['\n', '\r']).to_string())
}

/// Resolves a base64 key from a direct argument or a key file.
///
/// Returns an empty string when neither is given; the pipeline turns that
/// into a missing-key error.
fn read_key(direct: Option<&str>, file: Option<&Path>) -> Result<Zeroizing<String>> {
    if let Some(key) = direct {
        return Ok(Zeroizing::new(key.trim().to_string()));
    }
    match file {
        Some(path) => read_key_file(path)
            .with_context(|| format!("Failed to read key from {}", path.display())),
        None => Ok(Zeroizing::new(String::new())),
    }
}
