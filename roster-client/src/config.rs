//! Client configuration

use std::time::Duration;

/// Default store endpoint, the employee resource root
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080/api/employee";

/// Quiet period before autosave fires
pub const DEFAULT_QUIET_PERIOD: Duration = Duration::from_secs(120);

/// Page sizes offered by the table
pub const PAGE_SIZE_OPTIONS: [usize; 3] = [5, 10, 25];

/// Client configuration for connecting to the employee store
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Store base URL (e.g., "http://localhost:8080/api/employee")
    pub base_url: String,

    /// Bearer token, sent when present
    pub token: Option<String>,

    /// Request timeout in seconds
    pub timeout: u64,
}

impl ClientConfig {
    /// Create a new client configuration
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            token: None,
            timeout: 30,
        }
    }

    /// Set the bearer token
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout = seconds;
        self
    }

    /// Create an HTTP client from this configuration
    pub fn build_http_client(&self) -> crate::ClientResult<crate::NetworkHttpClient> {
        crate::NetworkHttpClient::new(self)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

/// How pending changes reach the store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SaveMode {
    /// Only an explicit save flushes
    Manual,
    /// Flush after a quiet period since the last mutation
    #[default]
    Autosave,
}

/// Roster session configuration
#[derive(Debug, Clone)]
pub struct RosterConfig {
    /// Inactivity before an autosave flush
    pub quiet_period: Duration,

    /// Initial rows per page
    pub page_size: usize,

    pub save_mode: SaveMode,
}

impl RosterConfig {
    pub fn new(save_mode: SaveMode) -> Self {
        Self {
            quiet_period: DEFAULT_QUIET_PERIOD,
            page_size: PAGE_SIZE_OPTIONS[0],
            save_mode,
        }
    }

    /// Manual-save table
    pub fn manual() -> Self {
        Self::new(SaveMode::Manual)
    }

    /// Autosave table
    pub fn autosave() -> Self {
        Self::new(SaveMode::Autosave)
    }

    /// Set the quiet period
    pub fn with_quiet_period(mut self, quiet_period: Duration) -> Self {
        self.quiet_period = quiet_period;
        self
    }

    /// Set the initial page size
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }
}

impl Default for RosterConfig {
    fn default() -> Self {
        Self::autosave()
    }
}
