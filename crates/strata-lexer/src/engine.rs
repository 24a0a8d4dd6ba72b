//! Scanning engine interface.

use std::fmt;

use strata_text::TokenKind;

use crate::error::EngineError;

/// A lexical rule engine that recognizes one lexeme at a time.
///
/// The engine sees only the unscanned remainder of the current buffer
/// context (`window`) and the current lexical mode. It reports how many
/// bytes it consumed; the [`ScanSession`](crate::ScanSession) owns all
/// position tracking, so engines need not agree on how they count.
pub trait ScanEngine {
    type Kind: TokenKind;

    /// Lexical mode (start condition). `Default` is the initial mode.
    type Mode: Copy + Eq + fmt::Debug + Default;

    /// Scans one lexeme at the start of `window`.
    fn scan(
        &mut self,
        window: &str,
        mode: Self::Mode,
    ) -> Result<Scanned<Self::Kind, Self::Mode>, EngineError>;

    /// Clears engine-internal state. Called on every restart.
    fn reset(&mut self) {}

    /// Whether `kind` is one of this engine's lexical error kinds.
    fn is_error(&self, kind: Self::Kind) -> bool {
        kind == Self::Kind::ERROR
    }
}

/// Result of scanning one lexeme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scanned<K, M> {
    /// A recognized lexeme of `len` bytes.
    Token {
        kind: K,
        len: usize,
        transition: Transition<M>,
    },
    /// No rule matched the next `len` bytes.
    Unmatched { len: usize },
    /// The window is exhausted.
    End,
}

impl<K, M> Scanned<K, M> {
    /// A lexeme that leaves the mode stack unchanged.
    pub fn token(kind: K, len: usize) -> Self {
        Scanned::Token {
            kind,
            len,
            transition: Transition::Stay,
        }
    }

    /// A lexeme followed by a context change.
    pub fn token_then(kind: K, len: usize, transition: Transition<M>) -> Self {
        Scanned::Token {
            kind,
            len,
            transition,
        }
    }
}

/// Context change requested by the engine after a lexeme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition<M> {
    Stay,
    /// Enter `M`, remembering the current mode.
    Push(M),
    /// Replace the current mode.
    Switch(M),
    /// Return to the previous mode.
    Pop,
    /// Scan the next `len` bytes as a nested buffer.
    EnterBuffer(usize),
}
