//! roster — terminal employee roster editor
//!
//! Two views over the same roster core:
//! - `manual`: edits stay local until `save`
//! - `autosave`: pending changes flush after a quiet period

mod command;
mod config;
mod logger;
mod view;

use clap::Parser;
use config::Cli;
use roster_client::{EmployeeApi, RosterSession};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    logger::init_logger(&cli.log_level)?;

    let roster_config = cli.roster_config();
    tracing::info!(
        base_url = %cli.base_url,
        mode = ?roster_config.save_mode,
        "Starting roster"
    );

    let http = cli.client_config().build_http_client()?;
    let session = RosterSession::open(EmployeeApi::new(http), &roster_config).await?;

    view::run(session).await
}
