//! Command-line and environment configuration

use clap::{Parser, Subcommand};
use roster_client::config::DEFAULT_BASE_URL;
use roster_client::{ClientConfig, RosterConfig};
use std::time::Duration;

#[derive(Debug, Parser)]
#[command(name = "roster", about = "Employee roster editor", version)]
pub struct Cli {
    /// Employee store base URL
    #[arg(long, env = "ROSTER_API_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Bearer token for the store
    #[arg(long, env = "ROSTER_TOKEN")]
    pub token: Option<String>,

    /// Request timeout in seconds
    #[arg(long, env = "ROSTER_TIMEOUT_SECS", default_value_t = 30)]
    pub timeout: u64,

    /// Seconds without edits before autosave fires
    #[arg(long, env = "ROSTER_QUIET_PERIOD_SECS", default_value_t = 120)]
    pub quiet_period_secs: u64,

    /// Rows per page (5, 10 or 25)
    #[arg(long, env = "ROSTER_PAGE_SIZE", default_value_t = 5)]
    pub page_size: usize,

    /// Log filter, e.g. "info" or "roster_client=debug"
    #[arg(long, env = "ROSTER_LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    #[command(subcommand)]
    pub view: Option<ViewKind>,
}

/// Which table to open
#[derive(Debug, Clone, Copy, PartialEq, Eq, Subcommand)]
pub enum ViewKind {
    /// Edit locally, save explicitly
    Manual,
    /// Save automatically after a quiet period
    Autosave,
}

impl Cli {
    pub fn client_config(&self) -> ClientConfig {
        let config = ClientConfig::new(&self.base_url).with_timeout(self.timeout);
        match &self.token {
            Some(token) => config.with_token(token),
            None => config,
        }
    }

    pub fn roster_config(&self) -> RosterConfig {
        let config = match self.view.unwrap_or(ViewKind::Manual) {
            ViewKind::Manual => RosterConfig::manual(),
            ViewKind::Autosave => RosterConfig::autosave(),
        };
        config
            .with_quiet_period(Duration::from_secs(self.quiet_period_secs))
            .with_page_size(self.page_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::{CommandFactory, FromArgMatches};
    use roster_client::SaveMode;

    /// Parse flags only; `ROSTER_*` variables in the test environment are ignored
    fn parse_flags(args: &[&str]) -> Cli {
        let matches = Cli::command()
            .mut_args(|arg| arg.env(None::<&'static str>))
            .try_get_matches_from(args.iter().copied())
            .unwrap();
        Cli::from_arg_matches(&matches).unwrap()
    }

    #[test]
    fn test_defaults_open_manual_view() {
        let cli = parse_flags(&["roster"]);
        let config = cli.roster_config();
        assert_eq!(config.save_mode, SaveMode::Manual);
        assert_eq!(config.page_size, 5);
        assert_eq!(config.quiet_period, Duration::from_secs(120));
        assert_eq!(cli.log_level, "info");
        assert_eq!(cli.client_config().timeout, 30);
    }

    #[test]
    fn test_flags_parse_without_env_lookup() {
        let cmd = Cli::command().mut_args(|arg| arg.env(None::<&'static str>));
        assert!(cmd.get_arguments().all(|arg| arg.get_env().is_none()));
    }

    #[test]
    fn test_autosave_view_and_overrides() {
        let cli = parse_flags(&[
            "roster",
            "--base-url",
            "http://store:9000/api/employee",
            "--quiet-period-secs",
            "5",
            "--token",
            "t",
            "autosave",
        ]);
        let roster = cli.roster_config();
        assert_eq!(roster.save_mode, SaveMode::Autosave);
        assert_eq!(roster.quiet_period, Duration::from_secs(5));

        let client = cli.client_config();
        assert_eq!(client.base_url, "http://store:9000/api/employee");
        assert_eq!(client.token.as_deref(), Some("t"));
        assert_eq!(client.timeout, 30);
    }
}
