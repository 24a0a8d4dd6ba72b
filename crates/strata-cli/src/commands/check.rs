//! Check command - analyse files in parallel and report rejected tokens.

use rayon::prelude::*;
use std::path::{Path, PathBuf};
use tracing::debug;

use strata_vlog::VlogAnalyzer;

use super::{analyzer, read_source};

/// Outcome of checking one file.
#[derive(Debug)]
struct FileReport {
    messages: Vec<String>,
}

pub fn run(files: &[PathBuf], plain: bool) -> miette::Result<()> {
    if files.is_empty() {
        return Err(miette::miette!("No files specified"));
    }

    // Files are independent; each gets its own analyzer.
    let reports: Vec<miette::Result<FileReport>> = files
        .par_iter()
        .map(|file| check_file(file, plain))
        .collect();

    let mut total_errors = 0;
    for (file, report) in files.iter().zip(reports) {
        let report = report?;
        if report.messages.is_empty() {
            println!("{}: ok", file.display());
        }
        for message in &report.messages {
            println!("{message}");
        }
        total_errors += report.messages.len();
    }

    println!();
    if total_errors > 0 {
        println!("Check complete: {} error(s)", total_errors);
        Err(miette::miette!("{} errors found", total_errors))
    } else {
        println!("Check complete: no issues found");
        Ok(())
    }
}

fn check_file(file: &Path, plain: bool) -> miette::Result<FileReport> {
    let source = read_source(file)?;
    debug!(file = %file.display(), bytes = source.len(), "checking");

    let mut analyzer = analyzer(&source, file);
    let _ = analyzer.analyze();
    Ok(FileReport {
        messages: messages(&analyzer, plain),
    })
}

fn messages(analyzer: &VlogAnalyzer<'_>, plain: bool) -> Vec<String> {
    let data = analyzer.data();
    if plain {
        data.token_error_messages()
            .into_iter()
            .map(|message| format!("{}: {message}", data.filename()))
            .collect()
    } else {
        data.linter_token_error_messages()
    }
}
