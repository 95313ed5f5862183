//! The `examiner show` command.

use std::path::PathBuf;

use anyhow::Result;

use examiner_core::report::ExamReport;

use crate::render;

pub fn execute(report_path: PathBuf) -> Result<()> {
    let report = ExamReport::load_json(&report_path)?;
    println!(
        "Report {} ({})",
        report.id,
        report.created_at.format("%Y-%m-%d %H:%M:%S UTC")
    );
    render::print_report(&report);
    Ok(())
}
