//! Draw configuration.

use crate::participant::Roster;

/// Default number of shuffles tried per draw.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 1000;

/// Configuration shared by every assignment store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrawConfig {
    /// Participants the draw is made over.
    pub roster: Roster,
    /// Maximum shuffles per draw.
    pub max_attempts: u32,
}

impl Default for DrawConfig {
    fn default() -> Self {
        Self {
            roster: Roster::default(),
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}

impl DrawConfig {
    /// Creates a configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the roster.
    #[must_use]
    pub fn with_roster(mut self, roster: Roster) -> Self {
        self.roster = roster;
        self
    }

    /// Sets the maximum number of shuffles per draw.
    #[must_use]
    pub fn with_max_attempts(mut self, attempts: u32) -> Self {
        self.max_attempts = attempts;
        self
    }
}
