// Event Planner
// Main entry point

mod cli;

use anyhow::Result;
use chrono::Local;
use clap::Parser;

use cli::{App, Cli};
use event_planner::config::AppConfig;
use event_planner::services::session::{FileSessionStore, SessionContext};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    env_logger::init();

    let cli = Cli::parse();
    let config = AppConfig::load(cli.config.as_deref())?;
    log::debug!("Using event store at {}", config.api_base_url);

    let session = SessionContext::load(FileSessionStore::new(config.session_path()));

    match config.timezone()? {
        Some(tz) => App::new(config, session, tz).run(cli.command).await,
        None => App::new(config, session, Local).run(cli.command).await,
    }
}
