//! The exam state machine.
//!
//! An [`Examiner`] administers one attempt at an [`ExamCatalog`]. It is
//! driven exclusively by [`Examiner::tick`], [`Examiner::answer`] and
//! [`Examiner::give_up`]; everything else is a read-only query.
//!
//! The general pattern is to call `tick()` once per time unit (nominally a
//! second). The first call presents question 0. When the participant
//! replies, pass the text to `answer()`; the next `tick()` presents the
//! following question. The session is over once `tick()` returns
//! [`TickResult::Finished`], after which `score()`, `passed()` and
//! `grade()` describe the outcome.
//!
//! The engine never reads a clock. Elapsed time is the number of ticks.

use std::fmt;
use std::str::FromStr;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use crate::answer::Answer;
use crate::error::ExamError;
use crate::model::{ExamCatalog, Question};
use crate::seed::{OsSeedSource, SeedSource};

/// Ticks allotted per question in practice mode, whatever the catalog says.
pub const PRACTICE_TIMELIMIT: u32 = 30;

/// Ticks to hold after a timeout before the next question appears.
pub const TIMEOUT_PAUSE_TICKS: u32 = 2;

/// Whether a session counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExamMode {
    /// Draws `num_questions`, enforces `max_wrong`, can be passed.
    #[default]
    Graded,
    /// Uses the whole deck, has no budget, ends on the first timeout.
    Practice,
}

impl ExamMode {
    pub fn from_practice(practice: bool) -> Self {
        if practice {
            ExamMode::Practice
        } else {
            ExamMode::Graded
        }
    }

    pub fn is_practice(self) -> bool {
        self == ExamMode::Practice
    }
}

impl fmt::Display for ExamMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExamMode::Graded => write!(f, "graded"),
            ExamMode::Practice => write!(f, "practice"),
        }
    }
}

impl FromStr for ExamMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "graded" | "exam" => Ok(ExamMode::Graded),
            "practice" => Ok(ExamMode::Practice),
            other => Err(format!("unknown exam mode: {other}")),
        }
    }
}

/// What happened on a call to [`Examiner::tick`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickResult {
    /// The session is over. Nothing changed.
    Finished,
    /// Holding after a timeout; the pause counter went down by one.
    Paused,
    /// A new question is now current.
    NextQuestion,
    /// The current question ran out of time and a timeout was recorded.
    TimedOut,
    /// One tick of the current question's time elapsed.
    Nothing,
}

/// The live state of one exam attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Examiner {
    // Fixed at construction
    exam_name: String,
    seed: u64,
    mode: ExamMode,
    questions: Vec<Question>,
    max_wrong: Option<usize>,
    timelimit: u32,
    fail_on_timeout: bool,

    // Advanced by tick/answer/give_up
    current_question_index: Option<usize>,
    current_question_time_left: u32,
    answers_given: Vec<Answer>,
    pause_time: u32,
}

impl Examiner {
    /// Start a session, drawing a seed from the OS when none is given.
    pub fn new(
        catalog: &ExamCatalog,
        mode: ExamMode,
        seed: Option<u64>,
    ) -> Result<Self, ExamError> {
        Self::with_seed_source(catalog, mode, seed, &mut OsSeedSource)
    }

    /// Start a session, drawing a seed from `seeds` when none is given.
    pub fn with_seed_source<S: SeedSource + ?Sized>(
        catalog: &ExamCatalog,
        mode: ExamMode,
        seed: Option<u64>,
        seeds: &mut S,
    ) -> Result<Self, ExamError> {
        if catalog.deck.is_empty() {
            return Err(ExamError::EmptyDeck {
                name: catalog.name.clone(),
            });
        }
        if mode == ExamMode::Graded && catalog.num_questions == 0 {
            return Err(ExamError::NoQuestionsDrawn {
                name: catalog.name.clone(),
            });
        }

        let seed = seed.unwrap_or_else(|| seeds.next_seed());

        let mut questions = shuffled_deck(&catalog.deck, seed);
        let (max_wrong, timelimit) = match mode {
            ExamMode::Graded => {
                questions.truncate(catalog.num_questions);
                (catalog.max_wrong, catalog.timelimit)
            }
            ExamMode::Practice => (None, PRACTICE_TIMELIMIT),
        };

        tracing::debug!(
            "starting {mode} exam '{}' with seed {seed}: {} of {} questions, {timelimit} ticks each",
            catalog.name,
            questions.len(),
            catalog.deck.len(),
        );

        Ok(Self {
            exam_name: catalog.name.clone(),
            seed,
            mode,
            questions,
            max_wrong,
            timelimit,
            fail_on_timeout: mode.is_practice(),
            current_question_index: None,
            current_question_time_left: timelimit,
            answers_given: Vec::new(),
            pause_time: 0,
        })
    }

    // ------------------------------------------------------------------
    // Actions
    // ------------------------------------------------------------------

    /// Advance the session by one time unit.
    pub fn tick(&mut self) -> TickResult {
        let result = if self.finished() {
            TickResult::Finished
        } else if self.pause_time > 0 {
            self.pause_time -= 1;
            TickResult::Paused
        } else if self.ready_for_next_question() {
            self.current_question_index = Some(self.answers_given.len());
            self.current_question_time_left = self.timelimit;
            TickResult::NextQuestion
        } else if self.timed_out() {
            self.answers_given.push(Answer::Timeout);
            self.pause_time = TIMEOUT_PAUSE_TICKS;
            self.log_if_finished();
            TickResult::TimedOut
        } else {
            self.current_question_time_left -= 1;
            TickResult::Nothing
        };

        tracing::trace!(
            "tick {result:?}: question {:?}, {} left, pause {}",
            self.current_question_index,
            self.current_question_time_left,
            self.pause_time,
        );
        result
    }

    /// Grade `text` against the current question and record the result.
    ///
    /// Returns whether the answer was correct.
    pub fn answer(&mut self, text: &str) -> Result<bool, ExamError> {
        if self.finished() {
            return Err(ExamError::AlreadyFinished);
        }
        if !self.ready_for_next_answer() {
            return Err(ExamError::NotReadyForAnswer);
        }

        let correct = self.current_question()?.is_correct(text);
        self.answers_given.push(if correct {
            Answer::Correct(text.to_string())
        } else {
            Answer::Incorrect(text.to_string())
        });
        self.log_if_finished();

        Ok(correct)
    }

    /// Abandon the session. It is finished and failed afterwards.
    pub fn give_up(&mut self) -> Result<(), ExamError> {
        if !self.ready_for_next_answer() {
            return Err(ExamError::NotReadyForAnswer);
        }
        self.answers_given.push(Answer::Quit);
        self.log_if_finished();
        Ok(())
    }

    fn log_if_finished(&self) {
        if self.finished() {
            tracing::info!(
                "exam '{}' (seed {}) finished after {} answers, {} wrong",
                self.exam_name,
                self.seed,
                self.answers_given.len(),
                self.number_wrong(),
            );
        }
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    pub fn exam_name(&self) -> &str {
        &self.exam_name
    }

    /// The seed the question order was drawn with. Replaying with it
    /// reproduces the session.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn mode(&self) -> ExamMode {
        self.mode
    }

    /// The drawn questions, in presentation order.
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    /// The answer log, one entry per resolved question.
    pub fn answers(&self) -> &[Answer] {
        &self.answers_given
    }

    pub fn max_wrong(&self) -> Option<usize> {
        self.max_wrong
    }

    /// Ticks allotted per question.
    pub fn timelimit(&self) -> u32 {
        self.timelimit
    }

    /// Index of the question most recently presented, if any.
    pub fn current_question_index(&self) -> Option<usize> {
        self.current_question_index
    }

    /// Ticks left on the current question.
    pub fn time_left(&self) -> u32 {
        self.current_question_time_left
    }

    pub fn pause_time(&self) -> u32 {
        self.pause_time
    }

    /// Every presented question has been resolved.
    pub fn ready_for_next_question(&self) -> bool {
        let presented = self.current_question_index.map_or(0, |i| i + 1);
        presented == self.answers_given.len()
    }

    /// Exactly one presented question is still unresolved.
    pub fn ready_for_next_answer(&self) -> bool {
        self.current_question_index == Some(self.answers_given.len())
    }

    /// The question most recently presented.
    pub fn current_question(&self) -> Result<&Question, ExamError> {
        self.current_question_index
            .and_then(|i| self.questions.get(i))
            .ok_or(ExamError::NoQuestionYet)
    }

    pub fn previous_answer(&self) -> Option<&Answer> {
        self.answers_given.last()
    }

    /// Incorrect answers plus timeouts.
    pub fn number_wrong(&self) -> usize {
        self.answers_given.iter().filter(|a| a.is_wrong()).count()
    }

    pub fn number_timeouts(&self) -> usize {
        self.answers_given.iter().filter(|a| a.is_timeout()).count()
    }

    pub fn gave_up(&self) -> bool {
        self.answers_given.iter().any(Answer::is_quit)
    }

    /// Fraction of resolved questions not answered wrong.
    ///
    /// `None` until at least one question is resolved.
    pub fn score(&self) -> Option<f64> {
        if self.answers_given.is_empty() {
            return None;
        }
        Some(1.0 - self.number_wrong() as f64 / self.answers_given.len() as f64)
    }

    pub fn finished(&self) -> bool {
        self.gave_up()
            || self.too_many_wrong()
            || self.all_questions_answered()
            || self.failed_on_timeout()
    }

    /// Whether the participant passed. Only meaningful once finished.
    ///
    /// Practice sessions have no wrong-answer budget and never pass.
    pub fn passed(&self) -> Result<bool, ExamError> {
        if !self.finished() {
            return Err(ExamError::NotFinished);
        }
        Ok(!self.gave_up()
            && self
                .max_wrong
                .is_some_and(|max_wrong| self.number_wrong() <= max_wrong))
    }

    /// Every resolved question paired with its answer, in presentation order.
    pub fn grade(&self) -> Vec<(&Question, &Answer)> {
        self.questions.iter().zip(&self.answers_given).collect()
    }

    fn too_many_wrong(&self) -> bool {
        self.max_wrong
            .is_some_and(|max_wrong| self.number_wrong() > max_wrong)
    }

    fn all_questions_answered(&self) -> bool {
        self.answers_given.len() == self.questions.len()
    }

    fn failed_on_timeout(&self) -> bool {
        self.fail_on_timeout && self.number_timeouts() > 0
    }

    fn timed_out(&self) -> bool {
        self.current_question_time_left == 0
    }
}

/// Shuffle a copy of `deck` with a generator seeded only by `seed`.
fn shuffled_deck(deck: &[Question], seed: u64) -> Vec<Question> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut questions = deck.to_vec();
    questions.shuffle(&mut rng);
    questions
}
