//! The `examiner take` command.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use tokio::io::{AsyncBufReadExt, BufReader};

use examiner_core::examiner::{ExamMode, Examiner, TickResult};
use examiner_core::parser;
use examiner_core::report::ExamReport;

use crate::config::load_config_from;
use crate::render;

/// Typing this instead of an answer gives up the exam.
const QUIT_COMMAND: &str = "!quit";

pub async fn execute(
    catalog: Option<String>,
    practice: bool,
    seed: Option<u64>,
    tick_millis: Option<u64>,
    save: bool,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let tick_millis = tick_millis.unwrap_or(config.tick_millis);
    anyhow::ensure!(tick_millis >= 1, "tick-millis must be at least 1");

    let name = config.resolve_exam(catalog)?;
    let catalog = parser::find_catalog(&config.catalog_dir, &name)?;
    let mut examiner = Examiner::new(&catalog, ExamMode::from_practice(practice), seed)?;

    println!(
        "Exam: {} ({}, {} questions, {} ticks per question, seed {})",
        catalog.name,
        examiner.mode(),
        examiner.questions().len(),
        examiner.timelimit(),
        examiner.seed()
    );
    println!("Type your answer and press enter. Type {QUIT_COMMAND} to give up.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdin_open = true;
    let mut interval = tokio::time::interval(Duration::from_millis(tick_millis));

    loop {
        tokio::select! {
            _ = interval.tick() => {
                match examiner.tick() {
                    TickResult::Finished => break,
                    TickResult::NextQuestion => {
                        let index = examiner.current_question_index().unwrap_or_default();
                        let question = examiner.current_question()?;
                        println!("\nQuestion {}: {}", index + 1, question.question);
                    }
                    TickResult::TimedOut => {
                        let question = examiner.current_question()?;
                        println!("*timed out* ({})", question.valid_answers.join(", "));
                    }
                    TickResult::Paused | TickResult::Nothing => {}
                }
            }
            // Typed-ahead lines wait until a question is showing.
            line = lines.next_line(), if stdin_open && examiner.ready_for_next_answer() => {
                match line? {
                    Some(line) => handle_line(&mut examiner, line.trim()),
                    None => {
                        tracing::debug!("stdin closed; letting the clock run out");
                        stdin_open = false;
                    }
                }
            }
            _ = tokio::signal::ctrl_c() => {
                if examiner.give_up().is_err() {
                    anyhow::bail!("exam interrupted");
                }
            }
        }
    }

    let report = ExamReport::from_examiner(&examiner, &catalog)?;
    println!();
    render::print_report(&report);

    if save {
        let path = config.output_dir.join(report.file_name());
        report.save_json(&path)?;
        eprintln!("Report saved to: {}", path.display());
    }

    Ok(())
}

fn handle_line(examiner: &mut Examiner, line: &str) {
    if line.is_empty() {
        return;
    }

    if line == QUIT_COMMAND {
        if let Err(e) = examiner.give_up() {
            eprintln!("  ({e})");
        }
        return;
    }

    let expected = examiner
        .current_question()
        .map(|q| q.valid_answers.join(", "))
        .unwrap_or_default();
    match examiner.answer(line) {
        Ok(true) => println!("CORRECT"),
        Ok(false) => println!("INCORRECT: {expected}"),
        Err(e) => eprintln!("  ({e})"),
    }
}
