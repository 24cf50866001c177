//! Adventure client binary.
//!
//! # Examples
//!
//! ```bash
//! # Interactive play
//! cargo run -p adventure-client -- new --scenario crates/game/content/data/scenarios/greenwood.ron
//!
//! # Scripted self-play, then resume from the autosave
//! cargo run -p adventure-client -- new --scenario greenwood.ron --self-play run.txt
//! cargo run -p adventure-client -- resume --scenario greenwood.ron --save saves/session_x.json
//! ```

use adventure_client::{Cli, ClientConfig, app, logging};
use anyhow::Result;
use clap::Parser;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    let config = ClientConfig::from_env();

    let (_guard, log_file) = logging::setup_logging(&config)?;
    tracing::info!(log = %log_file.display(), "starting adventure client");

    let result = app::run(cli.command, config).await;
    if let Err(error) = &result {
        tracing::error!("client failed: {error:#}");
    }
    tracing::info!("client shutdown complete");
    result
}
