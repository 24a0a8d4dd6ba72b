//! # Strata Analysis
//!
//! Orchestrates the front end over one source buffer.
//!
//! A [`FileAnalyzer`] drives any [`Lexer`](strata_lexer::Lexer) to build the
//! token sequence and its filtered view, hands the view to any
//! [`Parser`](strata_syntax::Parser), and keeps the resulting syntax tree
//! together with every token rejected along the way. The
//! [`DiagnosticFormatter`] turns those rejections into messages resolved to
//! `file:line:column`.
//!
//! Each phase returns a single terminal status ([`AnalysisError`]); the
//! detail lives in [`FileAnalyzer::rejected_tokens`].

mod analyzer;
mod config;
mod diagnostics;
mod error;
mod phase;

pub use analyzer::FileAnalyzer;
pub use config::{DiagnosticConfig, DEFAULT_EOF_MARKER, DEFAULT_HELP_URL};
pub use diagnostics::DiagnosticFormatter;
pub use error::AnalysisError;
pub use phase::{AnalysisPhase, RejectedToken};
