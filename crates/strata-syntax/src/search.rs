//! Tree pattern search.

use std::fmt;

use strata_text::TokenKind;

use crate::symbol::Symbol;

/// A subtree that satisfied a search predicate.
#[derive(Debug)]
pub struct SymbolMatch<'t, 'src, K, T> {
    pub matched: &'t Symbol<'src, K, T>,
    /// Tags of the enclosing nodes, outermost first.
    pub context: Vec<T>,
}

/// Collects every subtree of `root` matching `predicate`, in pre-order.
///
/// Matching does not stop descent: a match nested inside another match is
/// reported too.
pub fn find_all<'t, 'src, K, T, P>(
    root: &'t Symbol<'src, K, T>,
    mut predicate: P,
) -> Vec<SymbolMatch<'t, 'src, K, T>>
where
    K: TokenKind,
    T: Copy + Eq + fmt::Debug,
    P: FnMut(&Symbol<'src, K, T>) -> bool,
{
    let mut matches = Vec::new();
    let mut context = Vec::new();
    visit(root, &mut predicate, &mut context, &mut matches);
    matches
}

fn visit<'t, 'src, K, T, P>(
    symbol: &'t Symbol<'src, K, T>,
    predicate: &mut P,
    context: &mut Vec<T>,
    matches: &mut Vec<SymbolMatch<'t, 'src, K, T>>,
) where
    K: TokenKind,
    T: Copy + Eq + fmt::Debug,
    P: FnMut(&Symbol<'src, K, T>) -> bool,
{
    if predicate(symbol) {
        matches.push(SymbolMatch {
            matched: symbol,
            context: context.clone(),
        });
    }
    if let Symbol::Node(node) = symbol {
        context.push(node.tag);
        for child in node.children() {
            visit(child, predicate, context, matches);
        }
        context.pop();
    }
}
