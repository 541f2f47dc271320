//! ZeroCrypt - Hide secrets in plain text
//!
//! A CLI tool for zero-width character steganography with optional
//! password or public-key encryption.

mod commands;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use zerocrypt::{Config, ConfigError};

use commands::{CommandExecutor, DecodeCommand, EncodeCommand, InspectCommand, KeygenCommand};

/// ZeroCrypt - Hide secrets in plain text
///
/// Hides a message inside ordinary text using invisible zero-width characters.
/// The message can be encrypted first with a password or a public key.
#[derive(Parser)]
#[command(name = "zerocrypt")]
#[command(version)]
#[command(about = "Hide secrets in plain text with zero-width characters")]
#[command(long_about = None)]
struct Cli {
    /// Path to a config file (default: <config dir>/zerocrypt/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Verbose logging to stderr (overrides the configured log level)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Hide a message inside carrier text
    Encode(EncodeCommand),

    /// Extract (and decrypt) a hidden message
    Decode(DecodeCommand),

    /// Generate a key pair for public-key encryption
    Keygen(KeygenCommand),

    /// Report whether text carries hidden data
    Inspect(InspectCommand),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = load_config(cli.config.as_deref())?;

    let level = if cli.verbose {
        "debug"
    } else {
        config.log_level.as_str()
    };
    init_logging(level);

    match &cli.command {
        Commands::Encode(cmd) => cmd.execute(&config),
        Commands::Decode(cmd) => cmd.execute(&config),
        Commands::Keygen(cmd) => cmd.execute(&config),
        Commands::Inspect(cmd) => cmd.execute(&config),
    }
}

/// Loads the config from an explicit path or the default location.
fn load_config(path: Option<&std::path::Path>) -> Result<Config> {
    match path {
        Some(p) => Config::load_from(p)
            .with_context(|| format!("Failed to load config from {}", p.display())),
        None => match Config::load() {
            Err(ConfigError::NoConfigDir) => Ok(Config::default()),
            other => other.context("Failed to load config"),
        },
    }
}

/// Installs the stderr log subscriber. `RUST_LOG` wins over `level`.
fn init_logging(level: &str) {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}
