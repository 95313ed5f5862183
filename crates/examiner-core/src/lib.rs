//! examiner-core — Timed exam engine, catalogs, and grading.
//!
//! This crate defines the exam data model, the [`examiner::Examiner`] state
//! machine that administers a quiz one tick at a time, and the loading,
//! validation, and reporting code built around it.

pub mod answer;
pub mod error;
pub mod examiner;
pub mod model;
pub mod parser;
pub mod proctor;
pub mod report;
pub mod seed;

pub use answer::Answer;
pub use error::ExamError;
pub use examiner::{ExamMode, Examiner, TickResult};
pub use model::{ExamCatalog, Question};
