//! Core data model types for examiner.
//!
//! An [`ExamCatalog`] is the immutable definition of a quiz. It is produced
//! by a loader (see [`crate::parser`]) and only ever read by the engine.

use serde::{Deserialize, Serialize};

/// A single prompt with the answers that count as correct.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    /// The prompt shown to the participant.
    pub question: String,
    /// Acceptable answers, compared case-insensitively.
    #[serde(alias = "validAnswers")]
    pub valid_answers: Vec<String>,
    /// Display-only annotation. Never used for grading.
    #[serde(default)]
    pub meaning: String,
}

impl Question {
    pub fn new(
        question: impl Into<String>,
        valid_answers: impl IntoIterator<Item = impl Into<String>>,
        meaning: impl Into<String>,
    ) -> Self {
        Self {
            question: question.into(),
            valid_answers: valid_answers.into_iter().map(Into::into).collect(),
            meaning: meaning.into(),
        }
    }

    /// Whether `answer` matches one of the valid answers, ignoring case.
    pub fn is_correct(&self, answer: &str) -> bool {
        let answer = answer.to_lowercase();
        self.valid_answers
            .iter()
            .any(|valid| valid.to_lowercase() == answer)
    }
}

/// The immutable description of a quiz.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExamCatalog {
    /// Identifying name (e.g. "hsk1").
    pub name: String,
    /// Full candidate pool, in load order.
    #[serde(alias = "cards")]
    pub deck: Vec<Question>,
    /// How many questions a graded session draws from the shuffled deck.
    #[serde(alias = "numQuestions")]
    pub num_questions: usize,
    /// Wrong-answer budget for graded sessions.
    #[serde(default, alias = "maxWrong")]
    pub max_wrong: Option<usize>,
    /// Ticks allotted per question in graded mode.
    #[serde(default = "default_timelimit")]
    pub timelimit: u32,
    /// Difficulty tag. Opaque to the engine.
    #[serde(default, alias = "hskLevel")]
    pub hsk_level: u32,
}

/// Per-question time limit for catalogs that do not set one.
pub(crate) fn default_timelimit() -> u32 {
    10
}

impl ExamCatalog {
    /// Number of questions a graded session will actually present.
    pub fn graded_draw(&self) -> usize {
        self.num_questions.min(self.deck.len())
    }
}
