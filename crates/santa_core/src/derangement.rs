//! Rejection-sampling derangement generator.
//!
//! Candidates are uniform random permutations (Fisher–Yates via
//! [`SliceRandom::shuffle`]). The first candidate without fixed points that
//! also differs from the previous draw wins. For n participants roughly
//! `1/e` of all permutations are derangements, so small rosters converge in a
//! handful of shuffles.

use crate::assignment::Assignment;
use crate::error::{CoreError, CoreResult};
use crate::participant::Participant;
use rand::seq::SliceRandom;
use rand::Rng;

/// Result of a successful draw.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Draw {
    /// The generated derangement.
    pub assignment: Assignment,
    /// True when no derangement different from the previous one was found
    /// and the previous mapping was drawn again.
    pub repeated: bool,
    /// Number of shuffles performed.
    pub attempts: u32,
}

/// Draws a derangement of `participants`.
///
/// When `previous` is given, a candidate identical to it is only accepted as
/// a fallback once `max_attempts` shuffles have failed to produce anything
/// else; [`Draw::repeated`] reports that case.
///
/// # Errors
///
/// Returns [`CoreError::NoDerangement`] if no fixed-point-free permutation
/// was found, which is always the case for fewer than two participants.
pub fn generate<R: Rng + ?Sized>(
    participants: &[Participant],
    previous: Option<&Assignment>,
    max_attempts: u32,
    rng: &mut R,
) -> CoreResult<Draw> {
    if participants.len() < 2 {
        return Err(CoreError::NoDerangement { attempts: 0 });
    }

    let mut shuffled = participants.to_vec();
    let mut fallback = None;

    for attempt in 1..=max_attempts {
        shuffled.shuffle(rng);
        if has_fixed_point(participants, &shuffled) {
            continue;
        }

        let candidate = Assignment::pair(participants, &shuffled);
        match previous {
            Some(prev) if !candidate.differs_from(prev) => {
                fallback.get_or_insert(candidate);
            }
            _ => {
                return Ok(Draw {
                    assignment: candidate,
                    repeated: false,
                    attempts: attempt,
                })
            }
        }
    }

    fallback
        .map(|assignment| Draw {
            assignment,
            repeated: true,
            attempts: max_attempts,
        })
        .ok_or(CoreError::NoDerangement {
            attempts: max_attempts,
        })
}

fn has_fixed_point(givers: &[Participant], shuffled: &[Participant]) -> bool {
    givers.iter().zip(shuffled).any(|(a, b)| a == b)
}
