//! The `examiner simulate` command.
//!
//! Plays an exam against a scripted participant, ticking as fast as
//! possible. Both the question order and the scripted answers derive from
//! the seed, so a given seed always produces the same transcript.

use std::path::PathBuf;

use anyhow::Result;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use examiner_core::examiner::{ExamMode, Examiner, TickResult};
use examiner_core::parser;
use examiner_core::report::ExamReport;

use crate::config::load_config_from;
use crate::render;

/// Text submitted when the script decides to answer wrong.
const WRONG_ANSWER: &str = ".";

pub fn execute(
    catalog: Option<String>,
    practice: bool,
    seed: Option<u64>,
    accuracy: u8,
    answer_after: u32,
    json: bool,
    config_path: Option<PathBuf>,
) -> Result<()> {
    anyhow::ensure!(accuracy <= 100, "accuracy must be between 0 and 100");

    let config = load_config_from(config_path.as_deref())?;
    let name = config.resolve_exam(catalog)?;
    let catalog = parser::find_catalog(&config.catalog_dir, &name)?;

    let mut examiner = Examiner::new(&catalog, ExamMode::from_practice(practice), seed)?;
    let mut rng = StdRng::seed_from_u64(examiner.seed().wrapping_add(1));

    if !json {
        println!("Seed: {}", examiner.seed());
    }

    let mut wait = 0;
    let mut ticks = 0u64;
    loop {
        let result = examiner.tick();
        ticks += 1;
        match result {
            TickResult::Finished => break,
            TickResult::NextQuestion => wait = answer_after,
            TickResult::TimedOut if !json => {
                let question = examiner.current_question()?;
                println!("{}: *timed out*", question.question);
            }
            _ => {}
        }

        if !examiner.ready_for_next_answer() {
            continue;
        }
        if wait > 0 {
            wait -= 1;
            continue;
        }

        let question = examiner.current_question()?;
        let text = match question.valid_answers.first() {
            Some(valid) if rng.gen_range(0..100) < accuracy => valid.clone(),
            _ => WRONG_ANSWER.to_string(),
        };
        let prompt = question.question.clone();
        let correct = examiner.answer(&text)?;
        if !json {
            let verdict = if correct { "correct" } else { "wrong" };
            println!("{prompt}: {text} ({verdict})");
        }
    }

    tracing::debug!("simulation finished after {ticks} ticks");

    let report = ExamReport::from_examiner(&examiner, &catalog)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!();
        render::print_report(&report);
    }

    Ok(())
}
