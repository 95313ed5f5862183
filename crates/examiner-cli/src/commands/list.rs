//! The `examiner list` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};

use examiner_core::parser;

use crate::config::load_config_from;

pub fn execute(config_path: Option<PathBuf>) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;

    let catalogs = if config.catalog_dir.is_dir() {
        parser::load_catalog_directory(&config.catalog_dir)?
    } else {
        Vec::new()
    };

    if catalogs.is_empty() {
        println!(
            "No exams found in {}. Run `examiner init` to create one.",
            config.catalog_dir.display()
        );
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec![
        "Exam",
        "HSK",
        "Deck",
        "Questions",
        "Max wrong",
        "Time limit",
    ]);

    for catalog in &catalogs {
        table.add_row(vec![
            Cell::new(&catalog.name),
            Cell::new(catalog.hsk_level),
            Cell::new(catalog.deck.len()),
            Cell::new(catalog.graded_draw()),
            Cell::new(
                catalog
                    .max_wrong
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| "-".to_string()),
            ),
            Cell::new(format!("{}s", catalog.timelimit)),
        ]);
    }

    println!("{table}");
    Ok(())
}
