// ABOUTME: Configuration options for the directory client and its fluent builder.
// ABOUTME: DirectoryClientBuilder constructs a DirectoryClient with timeout, user agent, and headers.

use std::collections::HashMap;
use std::time::Duration;

use crate::client::DirectoryClient;
use crate::error::Result;

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default User-Agent header.
pub const DEFAULT_USER_AGENT: &str = concat!("docdir-scrape/", env!("CARGO_PKG_VERSION"));

/// Configuration options for the directory client.
#[derive(Debug, Clone)]
pub struct Options {
    pub timeout: Duration,
    pub user_agent: String,
    pub headers: HashMap<String, String>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            headers: HashMap::new(),
        }
    }
}

/// Builder for constructing DirectoryClient instances with custom configuration.
#[derive(Debug, Clone)]
pub struct DirectoryClientBuilder {
    opts: Options,
}

impl DirectoryClientBuilder {
    /// Create a new builder with default options.
    pub fn new() -> Self {
        Self {
            opts: Options::default(),
        }
    }

    /// Set the per-request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.opts.timeout = timeout;
        self
    }

    /// Set the User-Agent header.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.opts.user_agent = user_agent.into();
        self
    }

    /// Add a custom header to all requests.
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.opts.headers.insert(key.into(), value.into());
        self
    }

    /// Build the client. Fails only if the TLS backend cannot be initialized.
    pub fn build(self) -> Result<DirectoryClient> {
        DirectoryClient::new(self.opts)
    }
}

impl Default for DirectoryClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
