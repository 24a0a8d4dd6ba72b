//! CLI commands.

pub mod check;
pub mod lex;
pub mod parse;

use std::fs;
use std::path::Path;

use strata_analysis::DiagnosticConfig;
use strata_lexer::LexerConfig;
use strata_vlog::VlogAnalyzer;

fn read_source(file: &Path) -> miette::Result<String> {
    fs::read_to_string(file)
        .map_err(|e| miette::miette!("Failed to read {}: {}", file.display(), e))
}

/// An analyzer configured from the environment.
fn analyzer<'src>(source: &'src str, file: &Path) -> VlogAnalyzer<'src> {
    VlogAnalyzer::with_config(
        source,
        file.display().to_string(),
        LexerConfig::from_env(),
        DiagnosticConfig::from_env(),
    )
}
