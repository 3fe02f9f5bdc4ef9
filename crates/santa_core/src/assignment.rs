//! The giver → receiver mapping produced by a draw.

use crate::error::ValidationError;
use crate::participant::{Participant, Roster};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A mapping from each giver to the person they give to.
///
/// Serialised as a flat JSON object (`{"ibo": "adnan", ...}`). Decoding does
/// not validate; call [`Assignment::validate`] against a roster before
/// trusting one that came from outside.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Assignment {
    pairs: BTreeMap<Participant, Participant>,
}

impl Assignment {
    /// Pairs `givers[i]` with `receivers[i]`.
    ///
    /// Extra elements of the longer slice are ignored.
    pub fn pair(givers: &[Participant], receivers: &[Participant]) -> Self {
        givers
            .iter()
            .cloned()
            .zip(receivers.iter().cloned())
            .collect()
    }

    /// Decodes an assignment from an untyped JSON value.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::MalformedPayload`] unless the value is an
    /// object whose values are all strings.
    pub fn from_json(value: &serde_json::Value) -> Result<Self, ValidationError> {
        let object = value
            .as_object()
            .ok_or_else(|| ValidationError::MalformedPayload("expected a JSON object".into()))?;

        let mut pairs = BTreeMap::new();
        for (giver, receiver) in object {
            let receiver = receiver.as_str().ok_or_else(|| {
                ValidationError::MalformedPayload(format!("target of {giver} is not a string"))
            })?;
            pairs.insert(Participant::new(giver.as_str()), Participant::new(receiver));
        }
        Ok(Self { pairs })
    }

    /// Returns who `giver` was assigned, if anyone.
    #[must_use]
    pub fn target_of(&self, giver: &Participant) -> Option<&Participant> {
        self.pairs.get(giver)
    }

    /// Iterates over `(giver, receiver)` pairs in giver order.
    pub fn iter(&self) -> impl Iterator<Item = (&Participant, &Participant)> {
        self.pairs.iter()
    }

    /// Returns the number of givers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Returns true if nobody is assigned.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Returns true if at least one pairing differs from `other`.
    #[must_use]
    pub fn differs_from(&self, other: &Assignment) -> bool {
        self != other
    }

    /// Returns the givers assigned to themselves.
    pub fn fixed_points(&self) -> impl Iterator<Item = &Participant> {
        self.pairs
            .iter()
            .filter(|(giver, receiver)| giver == receiver)
            .map(|(giver, _)| giver)
    }

    /// Checks that this is a derangement over exactly `roster`.
    ///
    /// # Errors
    ///
    /// Checks run in order: key set, target set, then fixed points. The
    /// first failure is returned.
    pub fn validate(&self, roster: &Roster) -> Result<(), ValidationError> {
        let missing: Vec<String> = roster
            .members()
            .iter()
            .filter(|p| !self.pairs.contains_key(*p))
            .map(|p| p.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(ValidationError::MissingParticipants(missing));
        }

        let unknown: Vec<String> = self
            .pairs
            .keys()
            .filter(|p| !roster.contains(p))
            .map(|p| p.to_string())
            .collect();
        if !unknown.is_empty() {
            return Err(ValidationError::UnknownParticipants(unknown));
        }

        let mut targets: Vec<&Participant> = self.pairs.values().collect();
        let mut expected: Vec<&Participant> = roster.members().iter().collect();
        targets.sort();
        expected.sort();
        if targets != expected {
            return Err(ValidationError::NotAPermutation);
        }

        if let Some(giver) = self.fixed_points().next() {
            return Err(ValidationError::SelfAssignment(giver.to_string()));
        }

        Ok(())
    }
}

impl FromIterator<(Participant, Participant)> for Assignment {
    fn from_iter<T: IntoIterator<Item = (Participant, Participant)>>(iter: T) -> Self {
        Self {
            pairs: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Assignment {
    type Item = (&'a Participant, &'a Participant);
    type IntoIter = std::collections::btree_map::Iter<'a, Participant, Participant>;

    fn into_iter(self) -> Self::IntoIter {
        self.pairs.iter()
    }
}
