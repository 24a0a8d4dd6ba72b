//! Scanning engine error definitions.

use thiserror::Error;

/// An unrecoverable condition inside a scanning engine.
///
/// Scanner state is undefined after one of these, so the session never
/// returns it to callers; see [`ScanSession`](crate::ScanSession).
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EngineError {
    #[error("corrupted scanner state: {0}")]
    CorruptState(String),

    #[error("empty lexeme of kind {kind} at offset {offset}")]
    EmptyLexeme { kind: String, offset: usize },
}
