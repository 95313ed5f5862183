//! Exam report types with JSON persistence.
//!
//! An [`ExamReport`] is the permanent record of one finished session: the
//! outcome plus the full grade sheet. The host application persists it and
//! uses `passed`/`score` to update the participant's profile.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::answer::Answer;
use crate::error::ExamError;
use crate::examiner::{ExamMode, Examiner};
use crate::model::ExamCatalog;

/// A finished exam.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExamReport {
    /// Unique report identifier.
    pub id: Uuid,
    /// When the report was created.
    pub created_at: DateTime<Utc>,
    /// Catalog name.
    pub exam: String,
    pub hsk_level: u32,
    pub mode: ExamMode,
    /// Seed that reproduces the question order.
    pub seed: u64,
    /// `None` if the session ended before any question was resolved.
    pub score: Option<f64>,
    pub passed: bool,
    pub number_wrong: usize,
    /// Questions drawn for the session, answered or not.
    pub questions_drawn: usize,
    /// One entry per resolved question, in presentation order.
    pub graded: Vec<GradedQuestion>,
}

/// One line of the grade sheet.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GradedQuestion {
    pub question: String,
    pub meaning: String,
    pub valid_answers: Vec<String>,
    pub answer: Answer,
}

impl ExamReport {
    /// Build the report for a finished session.
    pub fn from_examiner(examiner: &Examiner, catalog: &ExamCatalog) -> Result<Self, ExamError> {
        let passed = examiner.passed()?;

        let graded = examiner
            .grade()
            .into_iter()
            .map(|(question, answer)| GradedQuestion {
                question: question.question.clone(),
                meaning: question.meaning.clone(),
                valid_answers: question.valid_answers.clone(),
                answer: answer.clone(),
            })
            .collect();

        Ok(Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            exam: examiner.exam_name().to_string(),
            hsk_level: catalog.hsk_level,
            mode: examiner.mode(),
            seed: examiner.seed(),
            score: examiner.score(),
            passed,
            number_wrong: examiner.number_wrong(),
            questions_drawn: examiner.questions().len(),
            graded,
        })
    }

    /// Number of resolved questions.
    pub fn answered(&self) -> usize {
        self.graded.len()
    }

    pub fn gave_up(&self) -> bool {
        self.graded.iter().any(|g| g.answer.is_quit())
    }

    /// One-line verdict, e.g. `Score: 66.7%  PASSED`.
    pub fn summary_line(&self) -> String {
        let score = self
            .score
            .map(|s| format!("{:.1}%", s * 100.0))
            .unwrap_or_else(|| "n/a".to_string());
        let verdict = match (self.mode, self.passed) {
            (ExamMode::Practice, _) => "PRACTICE",
            (ExamMode::Graded, true) => "PASSED",
            (ExamMode::Graded, false) => "FAILED",
        };
        format!("Score: {score}  {verdict}")
    }

    /// Save the report as JSON to a file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize report")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        Ok(())
    }

    /// Load a report from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read report from {}", path.display()))?;
        let report: ExamReport =
            serde_json::from_str(&content).context("failed to parse report JSON")?;
        Ok(report)
    }

    /// Default file name: `<exam>-<timestamp>.json`. Path separators and
    /// whitespace in the exam name become `-`.
    pub fn file_name(&self) -> String {
        let exam: String = self
            .exam
            .chars()
            .map(|c| {
                if c == '/' || c == '\\' || c.is_whitespace() {
                    '-'
                } else {
                    c
                }
            })
            .collect();
        format!(
            "{}-{}.json",
            exam,
            self.created_at.format("%Y-%m-%dT%H%M%S")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::examiner::TickResult;
    use crate::model::Question;

    fn catalog() -> ExamCatalog {
        ExamCatalog {
            name: "hsk1".into(),
            deck: vec![
                Question::new("你", ["ni3"], "you"),
                Question::new("我", ["wo3"], "I"),
                Question::new("他", ["ta1"], "he"),
            ],
            num_questions: 2,
            max_wrong: Some(1),
            timelimit: 5,
            hsk_level: 1,
        }
    }

    fn finished_examiner() -> Examiner {
        let mut e = Examiner::new(&catalog(), ExamMode::Graded, Some(3)).unwrap();
        assert_eq!(e.tick(), TickResult::NextQuestion);
        let text = e.current_question().unwrap().valid_answers[0].clone();
        e.answer(&text).unwrap();
        assert_eq!(e.tick(), TickResult::NextQuestion);
        e.answer("nope").unwrap();
        e
    }

    #[test]
    fn report_from_finished_session() {
        let e = finished_examiner();
        let report = ExamReport::from_examiner(&e, &catalog()).unwrap();
        assert_eq!(report.exam, "hsk1");
        assert_eq!(report.seed, 3);
        assert_eq!(report.score, Some(0.5));
        assert!(report.passed);
        assert_eq!(report.answered(), 2);
        assert_eq!(report.graded[1].answer, Answer::Incorrect("nope".into()));
        assert_eq!(report.summary_line(), "Score: 50.0%  PASSED");
        assert!(!report.gave_up());
    }

    #[test]
    fn report_requires_finished_session() {
        let e = Examiner::new(&catalog(), ExamMode::Graded, Some(3)).unwrap();
        let err = ExamReport::from_examiner(&e, &catalog()).unwrap_err();
        assert_eq!(err, ExamError::NotFinished);
    }

    #[test]
    fn save_and_load_json() {
        let dir = tempfile::tempdir().unwrap();
        let report = ExamReport::from_examiner(&finished_examiner(), &catalog()).unwrap();
        let path = dir.path().join("nested").join(report.file_name());
        report.save_json(&path).unwrap();

        let loaded = ExamReport::load_json(&path).unwrap();
        assert_eq!(loaded.id, report.id);
        assert_eq!(loaded.graded.len(), 2);
        assert_eq!(loaded.mode, ExamMode::Graded);
    }

    #[test]
    fn load_missing_report_fails() {
        assert!(ExamReport::load_json(Path::new("no_such_report.json")).is_err());
    }

    #[test]
    fn file_name_flattens_exam_name() {
        let mut report = ExamReport::from_examiner(&finished_examiner(), &catalog()).unwrap();
        report.exam = "HSK 1/part\\two".into();
        let name = report.file_name();
        assert!(name.starts_with("HSK-1-part-two-"), "{name}");
        assert!(name.ends_with(".json"));
        assert!(!name.contains('/'));
        assert_eq!(Path::new(&name).components().count(), 1);
    }
}
