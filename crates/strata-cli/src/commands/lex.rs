//! Lex command - tokenize a file.

use serde::Serialize;
use std::path::Path;

use strata_analysis::FileAnalyzer;
use strata_vlog::{VlogSymbol, VlogToken};

use super::{analyzer, read_source};

/// One token as printed by `lex --json`.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct TokenRecord<'a> {
    pub kind: String,
    pub start: usize,
    pub end: usize,
    /// 1-based
    pub line: usize,
    /// 1-based
    pub column: usize,
    pub text: &'a str,
}

pub fn run(file: &Path, json: bool) -> miette::Result<()> {
    let source = read_source(file)?;
    let mut analyzer = analyzer(&source, file);
    let status = analyzer.tokenize();
    let records = token_records(analyzer.data());

    if json {
        let out = serde_json::to_string_pretty(&records)
            .map_err(|e| miette::miette!("Failed to serialize tokens: {}", e))?;
        println!("{out}");
    } else {
        println!("Tokenizing: {}\n", file.display());
        for record in &records {
            println!(
                "{:4}..{:4}  {:>4}:{:<4} {:16}  {:?}",
                record.start, record.end, record.line, record.column, record.kind, record.text
            );
        }
        println!("\n{} tokens", records.len());
    }

    match status {
        Ok(()) => Ok(()),
        Err(err) => {
            for message in analyzer.data().linter_token_error_messages() {
                eprintln!("{message}");
            }
            Err(miette::miette!("{}", err))
        }
    }
}

pub fn token_records<'a>(
    data: &'a FileAnalyzer<'_, VlogToken, VlogSymbol<'_>>,
) -> Vec<TokenRecord<'a>> {
    let map = data.line_column_map();
    data.tokens()
        .iter()
        .map(|token| {
            let position = map.resolve(token.left());
            TokenRecord {
                kind: format!("{:?}", token.kind),
                start: token.left(),
                end: token.right(),
                line: position.line + 1,
                column: position.column + 1,
                text: token.text,
            }
        })
        .collect()
}
