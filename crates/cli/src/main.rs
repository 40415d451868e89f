//! # docfill: Lab Report Filler
//!
//! This is the main entry point for the `docfill` command-line interface.
//! The binary is a thin entrypoint; all logic lives in the `docfill_cli`
//! library crate.

use anyhow::Result;
use clap::Parser;
use docfill_cli::{run, Cli};
use tracing_subscriber::{fmt, EnvFilter};

// --- Main Application Entry ---

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Load `.env` so DOCFILL_API_KEY can live there.
    dotenvy::dotenv().ok();

    // 2. Setup logging. Logs go to stderr; stdout carries command output.
    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(EnvFilter::from_default_env().add_directive("docfill=info".parse()?))
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    // 3. Parse CLI arguments
    let cli = Cli::parse();

    // 4. Run and report the final result
    if let Err(e) = run(cli).await {
        eprintln!("[docfill error] Failed to execute command: {:?}", e);
        std::process::exit(1);
    }

    Ok(())
}
