use anyhow::Result;
use colored::Colorize;
use house_pricer::{config, init_tracing, server};
use std::path::PathBuf;
use tracing::info;

/// Execute the start command
///
/// This will:
/// 1. Load configuration
/// 2. Initialize tracing with the configured level and format
/// 3. Start the server
pub async fn execute(config_path: PathBuf) -> Result<()> {
    println!("{}", "Starting house pricer...".green());

    let cfg = config::load_config(&config_path)?;

    init_tracing(&cfg.server.log_level, &cfg.server.log_format);
    info!("Configuration loaded from {}", config_path.display());

    // Start the server (blocks until shutdown)
    server::start_server(cfg, config_path).await?;

    Ok(())
}
