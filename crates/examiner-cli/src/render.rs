//! Terminal rendering of grade sheets.

use comfy_table::{Cell, Table};

use examiner_core::answer::Answer;
use examiner_core::report::ExamReport;

fn verdict(answer: &Answer) -> &'static str {
    match answer {
        Answer::Correct(_) => "OK",
        Answer::Incorrect(_) => "WRONG",
        Answer::Timeout => "TIMEOUT",
        Answer::Quit => "QUIT",
    }
}

/// Grade sheet as a table, one row per resolved question.
pub fn grade_table(report: &ExamReport) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["#", "Question", "Answer", "Expected", "Meaning", "Result"]);

    for (n, graded) in report.graded.iter().enumerate() {
        table.add_row(vec![
            Cell::new(n + 1),
            Cell::new(&graded.question),
            Cell::new(graded.answer.to_string()),
            Cell::new(graded.valid_answers.join(", ")),
            Cell::new(&graded.meaning),
            Cell::new(verdict(&graded.answer)),
        ]);
    }

    table
}

/// Print the report header, grade sheet, and verdict to stdout.
pub fn print_report(report: &ExamReport) {
    println!(
        "Exam: {} (HSK {}, {}, seed {})",
        report.exam, report.hsk_level, report.mode, report.seed
    );
    println!(
        "Answered {}/{} questions, {} wrong",
        report.answered(),
        report.questions_drawn,
        report.number_wrong
    );
    if !report.graded.is_empty() {
        println!("{}", grade_table(report));
    }
    println!("{}", report.summary_line());
}
