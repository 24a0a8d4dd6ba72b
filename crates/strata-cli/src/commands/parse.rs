//! Parse command - parse a file and show the syntax tree.

use std::path::Path;

use strata_syntax::render_tree;

use super::{analyzer, read_source};

pub fn run(file: &Path) -> miette::Result<()> {
    let source = read_source(file)?;
    let mut analyzer = analyzer(&source, file);

    println!("Parsing: {}\n", file.display());

    let status = analyzer.analyze();

    // Report errors
    let messages = analyzer.data().linter_token_error_messages();
    if !messages.is_empty() {
        println!("Errors:");
        for message in &messages {
            println!("  {message}");
        }
        println!();
    }

    // A partial tree is still shown after a syntax error.
    match analyzer.syntax_tree() {
        Some(tree) => print!("{}", render_tree(tree)),
        None => println!("(no syntax tree)"),
    }

    println!("\n{} errors", messages.len());

    status.map_err(|err| miette::miette!("{}", err))
}
