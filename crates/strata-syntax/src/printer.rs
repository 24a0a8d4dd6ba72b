//! Indented text rendering of syntax trees.

use std::fmt::{self, Write};

use strata_text::TokenKind;

use crate::symbol::Symbol;

/// Renders `root` one symbol per line, children indented by two spaces.
///
/// Null children are shown as `(null)` so the rendering mirrors the exact
/// child positions of each node.
pub fn render_tree<K, T>(root: &Symbol<'_, K, T>) -> String
where
    K: TokenKind,
    T: Copy + Eq + fmt::Debug,
{
    let mut out = String::new();
    render(Some(root), 0, &mut out);
    out
}

fn render<K, T>(symbol: Option<&Symbol<'_, K, T>>, depth: usize, out: &mut String)
where
    K: TokenKind,
    T: Copy + Eq + fmt::Debug,
{
    let indent = "  ".repeat(depth);
    // Writing into a String cannot fail.
    let _ = match symbol {
        None => writeln!(out, "{indent}(null)"),
        Some(Symbol::Leaf(token)) => writeln!(
            out,
            "{indent}Leaf #{:?} \"{}\"",
            token.kind,
            token.text.escape_debug()
        ),
        Some(Symbol::Node(node)) => writeln!(out, "{indent}Node @{:?}", node.tag),
    };
    if let Some(Symbol::Node(node)) = symbol {
        for child in &node.children {
            render(child.as_ref(), depth + 1, out);
        }
    }
}
