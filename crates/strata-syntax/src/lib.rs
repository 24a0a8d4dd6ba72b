//! # Strata Syntax
//!
//! The parser side of the pipeline: the [`Parser`] collaborator interface,
//! the [`TokenStream`] it consumes, and a generic concrete syntax tree
//! ([`Symbol`]) whose leaves are zero-copy tokens.
//!
//! Trees are concrete: every token the parser accepted stays in the tree,
//! so exact source spans can be rebuilt from any subtree.

mod parser;
mod printer;
mod search;
mod symbol;

pub use parser::{ParseFailure, Parser, Rejection, TokenStream};
pub use printer::render_tree;
pub use search::{find_all, SymbolMatch};
pub use symbol::{Symbol, SyntaxNode};
