//! # Question
//!
//! A question is only ever built through [`Question::parse`], so holding one
//! means the text is trimmed and between 1 and [`MAX_QUESTION_CHARS`] characters.

use std::fmt;

/// Upper bound on question length, in characters.
pub const MAX_QUESTION_CHARS: usize = 500;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question(String);

impl Question {
    /// Trims `raw` and validates its length. Returns `None` for blank or over-long input.
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        let len = trimmed.chars().count();
        (1..=MAX_QUESTION_CHARS)
            .contains(&len)
            .then(|| Question(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for Question {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
