use criterion::{black_box, criterion_group, criterion_main, Criterion};

use examiner_core::examiner::{ExamMode, Examiner, TickResult};
use examiner_core::model::{ExamCatalog, Question};

fn make_catalog(deck_size: usize) -> ExamCatalog {
    ExamCatalog {
        name: "bench".into(),
        deck: (0..deck_size)
            .map(|i| Question::new(format!("q{i}"), [format!("a{i}"), format!("A{i}")], ""))
            .collect(),
        num_questions: deck_size / 2,
        max_wrong: Some(deck_size),
        timelimit: 10,
        hsk_level: 1,
    }
}

/// Drive a session to completion, answering every other question correctly.
fn run_session(catalog: &ExamCatalog, seed: u64) -> usize {
    let mut examiner = Examiner::new(catalog, ExamMode::Graded, Some(seed)).unwrap();
    let mut flip = false;
    loop {
        match examiner.tick() {
            TickResult::Finished => break,
            TickResult::NextQuestion => {
                flip = !flip;
                let text = if flip {
                    examiner.current_question().unwrap().valid_answers[0].clone()
                } else {
                    "nope".to_string()
                };
                examiner.answer(&text).unwrap();
            }
            _ => {}
        }
    }
    examiner.number_wrong()
}

fn bench_construct(c: &mut Criterion) {
    let mut group = c.benchmark_group("construct");

    for size in [10, 150, 1000] {
        let catalog = make_catalog(size);
        group.bench_function(format!("deck={size}"), |b| {
            b.iter(|| Examiner::new(black_box(&catalog), ExamMode::Practice, Some(42)))
        });
    }

    group.finish();
}

fn bench_full_session(c: &mut Criterion) {
    let mut group = c.benchmark_group("full_session");

    for size in [10, 150] {
        let catalog = make_catalog(size);
        group.bench_function(format!("deck={size}"), |b| {
            b.iter(|| run_session(black_box(&catalog), black_box(7)))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_construct, bench_full_session);
criterion_main!(benches);
