//! Murmur terminal entry point.
//!
//! # Usage
//!
//! ```bash
//! # Connect as the key in ~/.ssh/id_ed25519.pub
//! murmur --key ~/.ssh/id_ed25519.pub
//!
//! # With a config file and debug logs
//! murmur --key id.pub --config murmur.toml --log-file murmur.log --log-level debug
//! ```

use std::{fs::File, path::PathBuf, sync::Arc};

use clap::Parser;
use murmur_server::{Connection, LOG_LEVELS, Server, ServerConfig};
use murmur_store::{MemoryStore, PublicKey};
use murmur_tui::TerminalDriver;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Murmur terminal feed
#[derive(Parser, Debug)]
#[command(name = "murmur")]
#[command(about = "Read and post to a shared feed, identified by an SSH key")]
#[command(version)]
struct Args {
    /// OpenSSH public key file (`ssh-ed25519 AAAA... comment`)
    #[arg(short, long)]
    key: PathBuf,

    /// Server configuration (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Write logs to this file. Nothing is logged without it.
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Log level, overriding the config file
    #[arg(long, value_parser = clap::builder::PossibleValuesParser::new(LOG_LEVELS))]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => ServerConfig::load(path)?,
        None => ServerConfig::default(),
    };

    // The terminal belongs to the UI, so logs only ever go to a file
    if let Some(path) = &args.log_file {
        let level = args.log_level.as_deref().unwrap_or(&config.log_level);
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
        let file = Arc::new(File::create(path)?);

        tracing_subscriber::registry()
            .with(fmt::layer().with_writer(file).with_ansi(false))
            .with(filter)
            .init();
    }

    let key_text = std::fs::read_to_string(&args.key)?;
    let key = PublicKey::parse_openssh(key_text.trim())?;
    tracing::info!(fingerprint = %key.fingerprint(), "murmur starting");

    let server = Server::new(MemoryStore::new(), config);
    let driver = TerminalDriver::new()?;
    let (columns, rows) = TerminalDriver::size()?;
    let connection = Connection::new(key.to_wire()).with_size(columns, rows);
    let session = server.run_session(driver, connection).await?;

    tracing::info!(state = ?session.state(), "murmur exiting");
    Ok(())
}
