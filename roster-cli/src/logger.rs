//! Logging Infrastructure

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the logger.
///
/// `RUST_LOG` wins over `level` when set. Records go to the view's log
/// panel instead of the terminal, which is in raw mode while the table runs.
pub fn init_logger(level: &str) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(level))?;

    tracing_subscriber::registry()
        .with(tui_logger::tracing_subscriber_layer())
        .with(filter)
        .try_init()?;

    // log crate adapter for dependencies that do not use tracing
    tui_logger::init_logger(log::LevelFilter::Trace).ok();
    tui_logger::set_default_level(log::LevelFilter::Trace);
    Ok(())
}
