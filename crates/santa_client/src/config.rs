//! Configuration for the client.

use crate::cache::CACHE_KEY;
use crate::input::RESET_KEYWORD;
use santa_core::DrawConfig;
use std::path::PathBuf;
use std::time::Duration;

/// Server used when none is configured.
pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:3000";
/// Cache file used when none is configured.
pub const DEFAULT_CACHE_FILE: &str = "santa-cache.json";

/// Whether the client talks to the server at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncMode {
    /// Prefer the server, falling back to the local cache when it is unreachable.
    ServerSync,
    /// Use the local cache only.
    LocalOnly,
}

/// Configuration for a [`crate::DrawClient`].
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Sync mode.
    pub mode: SyncMode,
    /// Base URL of the server.
    pub server_url: String,
    /// Local cache file.
    pub cache_path: PathBuf,
    /// Key the assignment is cached under.
    pub cache_key: String,
    /// Roster and attempt budget for local draws.
    pub draw: DrawConfig,
    /// Request timeout.
    pub timeout: Duration,
    /// Input that triggers a new draw.
    pub reset_keyword: String,
}

impl ClientConfig {
    /// Creates a server-sync configuration for `server_url`.
    pub fn new(server_url: impl Into<String>) -> Self {
        Self {
            mode: SyncMode::ServerSync,
            server_url: server_url.into(),
            cache_path: PathBuf::from(DEFAULT_CACHE_FILE),
            cache_key: CACHE_KEY.to_string(),
            draw: DrawConfig::default(),
            timeout: Duration::from_secs(5),
            reset_keyword: RESET_KEYWORD.to_string(),
        }
    }

    /// Creates a local-only configuration.
    pub fn local_only() -> Self {
        Self::new(DEFAULT_SERVER_URL).with_mode(SyncMode::LocalOnly)
    }

    /// Sets the sync mode.
    pub fn with_mode(mut self, mode: SyncMode) -> Self {
        self.mode = mode;
        self
    }

    /// Sets the local cache file.
    pub fn with_cache_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.cache_path = path.into();
        self
    }

    /// Sets the draw configuration.
    pub fn with_draw(mut self, draw: DrawConfig) -> Self {
        self.draw = draw;
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the reset keyword.
    pub fn with_reset_keyword(mut self, keyword: impl Into<String>) -> Self {
        self.reset_keyword = keyword.into();
        self
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_SERVER_URL)
    }
}
