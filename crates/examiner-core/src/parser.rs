//! Exam catalog parser.
//!
//! Loads catalogs from TOML or JSON files and directories, and validates
//! them.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::model::{default_timelimit, ExamCatalog, Question};

/// Intermediate TOML structure for parsing catalog files.
#[derive(Debug, Deserialize)]
struct TomlCatalogFile {
    exam: TomlExamHeader,
    #[serde(default)]
    deck: Vec<TomlCard>,
}

#[derive(Debug, Deserialize)]
struct TomlExamHeader {
    name: String,
    num_questions: usize,
    #[serde(default)]
    max_wrong: Option<usize>,
    #[serde(default = "default_timelimit")]
    timelimit: u32,
    #[serde(default)]
    hsk_level: u32,
}

#[derive(Debug, Deserialize)]
struct TomlCard {
    question: String,
    valid_answers: Vec<String>,
    #[serde(default)]
    meaning: String,
}

/// Parse a catalog file, picking the format from the extension.
pub fn parse_catalog(path: &Path) -> Result<ExamCatalog> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read exam catalog: {}", path.display()))?;

    match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => parse_catalog_json(&content, path),
        Some("toml") => parse_catalog_toml(&content, path),
        _ => anyhow::bail!("unsupported catalog format: {}", path.display()),
    }
}

/// Parse a TOML string into an `ExamCatalog` (useful for testing).
pub fn parse_catalog_toml(content: &str, source_path: &Path) -> Result<ExamCatalog> {
    let parsed: TomlCatalogFile = toml::from_str(content)
        .with_context(|| format!("failed to parse TOML: {}", source_path.display()))?;

    let deck = parsed
        .deck
        .into_iter()
        .map(|card| Question {
            question: card.question,
            valid_answers: card.valid_answers,
            meaning: card.meaning,
        })
        .collect();

    Ok(ExamCatalog {
        name: parsed.exam.name,
        deck,
        num_questions: parsed.exam.num_questions,
        max_wrong: parsed.exam.max_wrong,
        timelimit: parsed.exam.timelimit,
        hsk_level: parsed.exam.hsk_level,
    })
}

/// Parse a JSON catalog, as exported from the exam document store.
pub fn parse_catalog_json(content: &str, source_path: &Path) -> Result<ExamCatalog> {
    serde_json::from_str(content)
        .with_context(|| format!("failed to parse JSON: {}", source_path.display()))
}

/// Recursively load all `.toml` and `.json` catalogs from a directory.
pub fn load_catalog_directory(dir: &Path) -> Result<Vec<ExamCatalog>> {
    let mut catalogs = Vec::new();

    if !dir.is_dir() {
        anyhow::bail!("not a directory: {}", dir.display());
    }

    let mut entries = std::fs::read_dir(dir)
        .with_context(|| format!("failed to read directory: {}", dir.display()))?
        .collect::<std::io::Result<Vec<_>>>()?;
    entries.sort_by_key(|entry| entry.path());

    for entry in entries {
        let path = entry.path();

        if path.is_dir() {
            catalogs.extend(load_catalog_directory(&path)?);
        } else if path
            .extension()
            .is_some_and(|ext| ext == "toml" || ext == "json")
        {
            match parse_catalog(&path) {
                Ok(catalog) => catalogs.push(catalog),
                Err(e) => {
                    tracing::warn!("skipping {}: {:#}", path.display(), e);
                }
            }
        }
    }

    Ok(catalogs)
}

/// Resolve `name_or_path` to a catalog: an existing file is parsed
/// directly, anything else is looked up by name in `catalog_dir`.
pub fn find_catalog(catalog_dir: &Path, name_or_path: &str) -> Result<ExamCatalog> {
    let path = Path::new(name_or_path);
    if path.is_file() {
        return parse_catalog(path);
    }

    let catalogs = load_catalog_directory(catalog_dir)?;
    let available: Vec<String> = catalogs.iter().map(|c| c.name.clone()).collect();
    catalogs
        .into_iter()
        .find(|c| c.name == name_or_path)
        .with_context(|| {
            format!(
                "exam '{name_or_path}' not found in {}. Available: {available:?}",
                catalog_dir.display()
            )
        })
}

/// A warning from catalog validation.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// The offending question prompt (if applicable).
    pub question: Option<String>,
    /// Warning message.
    pub message: String,
}

impl ValidationWarning {
    fn exam(message: impl Into<String>) -> Self {
        Self {
            question: None,
            message: message.into(),
        }
    }

    fn question(question: &Question, message: impl Into<String>) -> Self {
        Self {
            question: Some(question.question.clone()),
            message: message.into(),
        }
    }
}

/// Validate a catalog for common issues.
pub fn validate_catalog(catalog: &ExamCatalog) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    if catalog.deck.is_empty() {
        warnings.push(ValidationWarning::exam("deck is empty"));
    }

    if catalog.num_questions == 0 {
        warnings.push(ValidationWarning::exam(
            "num_questions is 0; graded sessions cannot start",
        ));
    } else if catalog.num_questions > catalog.deck.len() {
        warnings.push(ValidationWarning::exam(format!(
            "num_questions is {} but the deck only has {} questions",
            catalog.num_questions,
            catalog.deck.len()
        )));
    }

    if catalog.timelimit == 0 {
        warnings.push(ValidationWarning::exam(
            "timelimit is 0; every graded question times out immediately",
        ));
    }

    if let Some(max_wrong) = catalog.max_wrong {
        if catalog.num_questions > 0 && max_wrong >= catalog.graded_draw() {
            warnings.push(ValidationWarning::exam(format!(
                "max_wrong is {max_wrong}; the exam cannot be failed by wrong answers"
            )));
        }
    } else {
        warnings.push(ValidationWarning::exam(
            "max_wrong is not set; graded sessions can never pass",
        ));
    }

    let mut seen = std::collections::HashSet::new();
    for question in &catalog.deck {
        if question.question.trim().is_empty() {
            warnings.push(ValidationWarning::question(question, "prompt is empty"));
        }
        if question.valid_answers.is_empty() {
            warnings.push(ValidationWarning::question(
                question,
                "no valid answers; this question can never be answered correctly",
            ));
        }
        if !seen.insert(question.question.as_str()) {
            warnings.push(ValidationWarning::question(
                question,
                format!("duplicate question: {}", question.question),
            ));
        }
    }

    warnings
}
