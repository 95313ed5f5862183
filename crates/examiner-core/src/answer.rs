//! The outcome recorded for each resolved question.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One slot in the append-only answer log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "text", rename_all = "snake_case")]
pub enum Answer {
    /// The participant's text matched a valid answer.
    Correct(String),
    /// The participant's text matched none of the valid answers.
    Incorrect(String),
    /// The time limit ran out before an answer arrived.
    Timeout,
    /// The participant abandoned the session.
    Quit,
}

impl Answer {
    pub fn is_correct(&self) -> bool {
        matches!(self, Answer::Correct(_))
    }

    /// Whether this slot counts against the wrong-answer budget.
    ///
    /// `Quit` is not a wrong answer; giving up fails the exam on its own.
    pub fn is_wrong(&self) -> bool {
        match self {
            Answer::Incorrect(_) | Answer::Timeout => true,
            Answer::Correct(_) | Answer::Quit => false,
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, Answer::Timeout)
    }

    pub fn is_quit(&self) -> bool {
        matches!(self, Answer::Quit)
    }

    /// The submitted text, if the participant typed anything.
    pub fn text(&self) -> Option<&str> {
        match self {
            Answer::Correct(text) | Answer::Incorrect(text) => Some(text),
            Answer::Timeout | Answer::Quit => None,
        }
    }
}

impl fmt::Display for Answer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Answer::Correct(text) | Answer::Incorrect(text) => write!(f, "{text}"),
            Answer::Timeout => write!(f, "*timed out*"),
            Answer::Quit => write!(f, "*gave up*"),
        }
    }
}
