//! # Strata Vlog
//!
//! A small Verilog-flavoured front end built on the Strata pipeline.
//!
//! It covers modules, functions, tasks, classes and packages, simple
//! assignments and expressions, and the macro forms `` `define ``,
//! `` `NAME(args) `` and bare `` `NAME `` items. The lexer uses three
//! lexical modes so that macro definitions are scanned as a name plus an
//! opaque body.
//!
//! ## Example
//!
//! ```
//! use strata_vlog::{find_all_macro_calls, macro_call_id, VlogAnalyzer};
//!
//! let mut analyzer = VlogAnalyzer::new("`FOO(`BAR());\n", "top.sv");
//! analyzer.analyze().unwrap();
//!
//! let root = analyzer.syntax_tree().unwrap();
//! let names: Vec<_> = find_all_macro_calls(root)
//!     .iter()
//!     .filter_map(|m| macro_call_id(m.matched))
//!     .map(|id| id.text)
//!     .collect();
//! assert_eq!(names, vec!["`FOO", "`BAR"]);
//! ```

mod analyzer;
mod engine;
mod macros;
mod parser;
mod token;
mod tree;

pub use analyzer::VlogAnalyzer;
pub use engine::{vlog_lexer, VlogEngine, VlogLexer, VlogMode};
pub use macros::{
    find_all_macro_calls, find_all_macro_generic_items, macro_call_args,
    macro_call_args_is_empty, macro_call_id, macro_generic_item_id,
};
pub use parser::{VlogParser, MAX_NESTING};
pub use token::VlogToken;
pub use tree::{VlogMatch, VlogNode, VlogSymbol};
