//! Validate command: format-contract checks over dataset files.

use std::path::{Path, PathBuf};

use anyhow::bail;
use console::style;

use crate::cli::helpers;
use crate::config::Settings;
use crate::storage;
use crate::validate::{round_trip_semantics, validate_text, Severity};

struct FileOutcome {
    path: PathBuf,
    errors: usize,
    warnings: usize,
    lines: Vec<String>,
}

fn check_file(path: &Path, strict: bool) -> FileOutcome {
    let mut outcome = FileOutcome {
        path: path.to_path_buf(),
        errors: 0,
        warnings: 0,
        lines: Vec::new(),
    };

    let text = match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) => {
            outcome.errors = 1;
            outcome.lines.push(format!("unreadable: {err}"));
            return outcome;
        }
    };

    let report = validate_text(&text, strict);
    outcome.errors = report.error_count();
    outcome.warnings = report.warning_count();
    for finding in &report.findings {
        let glyph = match finding.severity {
            Severity::Error => style("✗").red(),
            Severity::Warning => style("!").yellow(),
        };
        outcome
            .lines
            .push(format!("{} {}: {}", glyph, finding.location, finding.message));
    }

    // The round-trip property only makes sense for structurally sound files.
    if report.is_clean() {
        match round_trip_semantics(&text) {
            Ok(true) => {}
            Ok(false) => {
                outcome.errors += 1;
                outcome
                    .lines
                    .push(format!("{} re-serialization is not semantically equal", style("✗").red()));
            }
            Err(err) => {
                outcome.errors += 1;
                outcome
                    .lines
                    .push(format!("{} typed model rejected the document: {err}", style("✗").red()));
            }
        }
    }

    outcome
}

/// Validate the given files, or every `.geojson` under the data directory.
pub async fn cmd_validate(
    settings: &Settings,
    files: &[PathBuf],
    strict: bool,
) -> anyhow::Result<()> {
    let files = if files.is_empty() {
        if !settings.data_dir.exists() {
            bail!(
                "data directory {} does not exist (run `geoprep init`)",
                settings.data_dir.display()
            );
        }
        storage::list_geojson_files(&settings.data_dir)?
    } else {
        files.to_vec()
    };

    if files.is_empty() {
        println!("{} No .geojson files to validate", style("!").yellow());
        return Ok(());
    }

    let bar = helpers::file_progress(files.len() as u64);
    let mut outcomes = Vec::with_capacity(files.len());
    for path in &files {
        bar.set_message(path.display().to_string());
        outcomes.push(check_file(path, strict));
        bar.inc(1);
    }
    bar.finish_and_clear();

    let mut total_errors = 0;
    let mut total_warnings = 0;
    for outcome in &outcomes {
        total_errors += outcome.errors;
        total_warnings += outcome.warnings;

        let glyph = if outcome.errors > 0 {
            style("✗").red()
        } else {
            style("✓").green()
        };
        println!("{} {}", glyph, outcome.path.display());
        for line in &outcome.lines {
            println!("    {line}");
        }
    }

    println!(
        "\n{} file(s), {} error(s), {} warning(s)",
        outcomes.len(),
        total_errors,
        total_warnings
    );

    if total_errors > 0 {
        bail!("validation failed with {total_errors} error(s)");
    }
    Ok(())
}
