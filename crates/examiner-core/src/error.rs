//! Exam error types.
//!
//! Timeouts, giving up and running out of wrong answers are ordinary
//! outcomes reported through [`crate::TickResult`] and the query methods.
//! These errors are reserved for misconfigured catalogs and for callers
//! that break the tick/answer protocol.

use thiserror::Error;

/// Errors raised by the exam engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExamError {
    /// The catalog has no questions at all.
    #[error("exam '{name}' has an empty deck")]
    EmptyDeck { name: String },

    /// A graded session would draw zero questions.
    #[error("exam '{name}' draws no questions")]
    NoQuestionsDrawn { name: String },

    /// `tick()` has not presented the first question yet.
    #[error("no question has been presented yet; call tick() first")]
    NoQuestionYet,

    /// An answer or give-up arrived while no question was outstanding.
    #[error("not ready for an answer until the next question is presented")]
    NotReadyForAnswer,

    /// The session is already over.
    #[error("exam is already finished")]
    AlreadyFinished,

    /// A result was requested before the session ended.
    #[error("exam is not finished")]
    NotFinished,

    /// The participant already has a live session.
    #[error("participant {0} already has an exam in progress")]
    SessionBusy(String),

    /// No live session exists for the participant.
    #[error("no exam in progress for participant {0}")]
    UnknownSession(String),
}

impl ExamError {
    /// Returns `true` if this error is a caller contract violation rather
    /// than a bad catalog.
    pub fn is_usage_error(&self) -> bool {
        !matches!(
            self,
            ExamError::EmptyDeck { .. } | ExamError::NoQuestionsDrawn { .. }
        )
    }
}
