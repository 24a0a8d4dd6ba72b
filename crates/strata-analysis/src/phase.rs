//! Diagnostic provenance.

use std::fmt;

use strata_text::TokenInfo;

/// The pipeline phase that rejected a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnalysisPhase {
    Lex,
    Preprocess,
    Parse,
}

impl AnalysisPhase {
    /// Lowercase English name used in diagnostic messages.
    pub fn name(self) -> &'static str {
        match self {
            AnalysisPhase::Lex => "lexical",
            AnalysisPhase::Preprocess => "preprocessing",
            AnalysisPhase::Parse => "syntax",
        }
    }
}

impl fmt::Display for AnalysisPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A token rejected by some phase, with an optional explanation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedToken<'src, K> {
    pub token: TokenInfo<'src, K>,
    pub phase: AnalysisPhase,
    pub explanation: Option<String>,
}

impl<'src, K> RejectedToken<'src, K> {
    pub fn new(
        token: TokenInfo<'src, K>,
        phase: AnalysisPhase,
        explanation: Option<String>,
    ) -> Self {
        Self {
            token,
            phase,
            explanation,
        }
    }
}
