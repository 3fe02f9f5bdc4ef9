//! Validation and classification of the text a user submits.

use santa_core::{Participant, Roster};
use thiserror::Error;

/// Default input that triggers a new draw.
pub const RESET_KEYWORD: &str = "sıfırla";

/// Minimum number of characters accepted.
pub const MIN_INPUT_CHARS: usize = 3;

const EXTRA_LETTERS: &str = "ığüşöçİĞÜŞÖÇ";
const PUNCTUATION: &str = ".,!?-";

/// Reasons submitted text is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    /// Nothing but whitespace.
    #[error("input must not be empty")]
    Empty,

    /// Fewer than [`MIN_INPUT_CHARS`] characters.
    #[error("enter at least {} characters", MIN_INPUT_CHARS)]
    TooShort,

    /// Characters outside the accepted alphabet.
    #[error("input contains invalid characters")]
    InvalidCharacters,
}

/// What a validated input asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    /// Draw again.
    Reset,
    /// Show who this participant was assigned.
    Lookup(Participant),
    /// Well-formed text that is neither a name nor the keyword.
    Other(String),
}

/// Trims `raw` and checks length and alphabet.
///
/// Accepted characters are ASCII letters and digits, Turkish letters,
/// whitespace and `. , ! ? -`.
pub fn validate_input(raw: &str) -> Result<&str, InputError> {
    let value = raw.trim();
    if value.is_empty() {
        return Err(InputError::Empty);
    }
    if value.chars().count() < MIN_INPUT_CHARS {
        return Err(InputError::TooShort);
    }
    if !value.chars().all(is_allowed) {
        return Err(InputError::InvalidCharacters);
    }
    Ok(value)
}

/// Validates `raw` and decides what it asks for.
pub fn classify(raw: &str, roster: &Roster, reset_keyword: &str) -> Result<Intent, InputError> {
    let value = validate_input(raw)?;
    let lowered = value.to_lowercase();

    if lowered == reset_keyword.to_lowercase() {
        return Ok(Intent::Reset);
    }
    Ok(match roster.find(&lowered) {
        Some(participant) => Intent::Lookup(participant.clone()),
        None => Intent::Other(value.to_string()),
    })
}

fn is_allowed(c: char) -> bool {
    c.is_ascii_alphanumeric()
        || c.is_whitespace()
        || EXTRA_LETTERS.contains(c)
        || PUNCTUATION.contains(c)
}
