//! The `examiner validate` command.

use std::path::PathBuf;

use anyhow::Result;

use examiner_core::parser;

pub fn execute(catalog_path: PathBuf) -> Result<()> {
    let catalogs = if catalog_path.is_dir() {
        parser::load_catalog_directory(&catalog_path)?
    } else {
        vec![parser::parse_catalog(&catalog_path)?]
    };

    let mut total_warnings = 0;

    for catalog in &catalogs {
        println!(
            "Exam: {} ({} questions in deck, {} drawn)",
            catalog.name,
            catalog.deck.len(),
            catalog.graded_draw()
        );

        let warnings = parser::validate_catalog(catalog);
        for w in &warnings {
            let prefix = w
                .question
                .as_ref()
                .map(|q| format!("  [{q}]"))
                .unwrap_or_else(|| "  ".to_string());
            println!("{prefix} WARNING: {}", w.message);
        }
        total_warnings += warnings.len();
    }

    if total_warnings == 0 {
        println!("All catalogs valid.");
    } else {
        println!("\n{total_warnings} warning(s) found.");
    }

    Ok(())
}
