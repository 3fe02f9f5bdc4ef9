//! Participants and the roster a draw is made over.

use crate::error::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Names used when no roster is configured.
pub const DEFAULT_PARTICIPANTS: [&str; 3] = ["ibo", "adnan", "ahmet"];

/// A person eligible for the draw.
///
/// Stored exactly as written. Use [`Participant::normalized`] when the name
/// comes from user input.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Participant(String);

impl Participant {
    /// Creates a participant from a raw name.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Creates a participant from user input (trimmed, lower-cased).
    pub fn normalized(input: &str) -> Self {
        Self(input.trim().to_lowercase())
    }

    /// Returns the name.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the name with its first character upper-cased.
    #[must_use]
    pub fn display_name(&self) -> String {
        let mut chars = self.0.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }
}

impl fmt::Display for Participant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Participant {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

/// The ordered, duplicate-free set of participants.
///
/// Order matters only for the generator: the n-th member is paired with the
/// n-th element of the shuffled roster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Roster {
    members: Vec<Participant>,
}

impl Roster {
    /// Builds a roster from names, normalizing each one.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidRoster`] if a name is blank or appears twice.
    pub fn new<I, S>(names: I) -> CoreResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen = BTreeSet::new();
        let mut members = Vec::new();
        for name in names {
            let participant = Participant::normalized(name.as_ref());
            if participant.as_str().is_empty() {
                return Err(CoreError::InvalidRoster("blank participant name".into()));
            }
            if !seen.insert(participant.clone()) {
                return Err(CoreError::InvalidRoster(format!(
                    "duplicate participant: {participant}"
                )));
            }
            members.push(participant);
        }
        Ok(Self { members })
    }

    /// Returns the members in roster order.
    #[must_use]
    pub fn members(&self) -> &[Participant] {
        &self.members
    }

    /// Returns the number of participants.
    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Returns true if the roster has no participants.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Returns true if the participant belongs to the roster.
    #[must_use]
    pub fn contains(&self, participant: &Participant) -> bool {
        self.members.contains(participant)
    }

    /// Resolves user input to a roster member.
    #[must_use]
    pub fn find(&self, input: &str) -> Option<&Participant> {
        let wanted = Participant::normalized(input);
        self.members.iter().find(|p| **p == wanted)
    }
}

impl Default for Roster {
    fn default() -> Self {
        Self {
            members: DEFAULT_PARTICIPANTS
                .iter()
                .map(|name| Participant::new(*name))
                .collect(),
        }
    }
}
