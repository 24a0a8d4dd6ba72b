//! Lexing session configuration.

/// What a session does with text no lexical rule matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnmatchedPolicy {
    /// Emit an error-kind token spanning the unmatched run.
    #[default]
    Reject,
    /// Log the run, step over it, and keep scanning.
    Skip,
}

/// Configuration for a [`ScanSession`](crate::ScanSession).
#[derive(Debug, Clone, Default)]
pub struct LexerConfig {
    pub unmatched: UnmatchedPolicy,
}

impl LexerConfig {
    /// Create config from environment variables.
    ///
    /// `STRATA_LEX_SKIP_UNMATCHED=1` (or `true`) selects [`UnmatchedPolicy::Skip`].
    pub fn from_env() -> Self {
        let skip = std::env::var("STRATA_LEX_SKIP_UNMATCHED")
            .map(|v| v == "1" || v.to_lowercase() == "true")
            .unwrap_or(false);

        Self {
            unmatched: if skip {
                UnmatchedPolicy::Skip
            } else {
                UnmatchedPolicy::Reject
            },
        }
    }

    pub fn with_unmatched(mut self, policy: UnmatchedPolicy) -> Self {
        self.unmatched = policy;
        self
    }
}
