//! Server configuration.

use santa_core::DrawConfig;
use std::net::SocketAddr;
use std::path::PathBuf;

/// Default file the assignment is persisted to.
pub const DEFAULT_DATA_FILE: &str = "assignments.json";

/// Configuration for the assignment server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind to.
    pub bind_addr: SocketAddr,
    /// JSON file holding the authoritative assignment.
    pub data_file: PathBuf,
    /// Roster and attempt budget for resets.
    pub draw: DrawConfig,
}

impl ServerConfig {
    /// Creates a new server configuration.
    pub fn new(bind_addr: SocketAddr) -> Self {
        Self {
            bind_addr,
            data_file: PathBuf::from(DEFAULT_DATA_FILE),
            draw: DrawConfig::default(),
        }
    }

    /// Sets the data file path.
    pub fn with_data_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.data_file = path.into();
        self
    }

    /// Sets the draw configuration.
    pub fn with_draw(mut self, draw: DrawConfig) -> Self {
        self.draw = draw;
        self
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self::new(SocketAddr::from(([127, 0, 0, 1], 3000)))
    }
}
