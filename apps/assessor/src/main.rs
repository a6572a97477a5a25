mod cli;
mod config;
mod errors;

use anyhow::Result;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;

fn main() -> Result<()> {
    // Load configuration first so RUST_LOG from .env is honoured
    let config = Config::from_env()?;

    // Structured logging on stderr; stdout carries the JSON report
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    info!("Starting assessor v{}", env!("CARGO_PKG_VERSION"));

    let transcript = cli::read_transcript(config.transcript_path.as_deref())?;
    let output = cli::assess(&transcript, &config);
    println!("{}", cli::render(&output, config.pretty_output)?);

    Ok(())
}
