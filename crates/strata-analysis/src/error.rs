//! Analysis status definitions.

use thiserror::Error;

/// Terminal status of a failed analysis phase.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum AnalysisError {
    #[error("Lexical error.")]
    Lexical,

    #[error("Syntax error.")]
    Syntax,
}
