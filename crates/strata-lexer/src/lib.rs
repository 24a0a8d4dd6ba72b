//! # Strata Lexer
//!
//! A restartable, stateful lexing session over one source buffer.
//!
//! The [`Lexer`] trait is what the analysis pipeline drives. [`ScanSession`]
//! implements it for any [`ScanEngine`], keeping its own location bookmark
//! and an explicit stack of nested buffer and lexical-mode contexts, so
//! heterogeneous engines share one restart and error-recovery protocol.
//!
//! ## Example
//!
//! ```
//! use strata_lexer::{EngineError, Lexer, ScanEngine, ScanSession, Scanned};
//! use strata_text::TokenKind;
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq)]
//! enum Kind { Eof, Error, Char }
//!
//! impl TokenKind for Kind {
//!     const EOF: Self = Kind::Eof;
//!     const ERROR: Self = Kind::Error;
//!     fn is_syntactic(self) -> bool { true }
//! }
//!
//! struct OneChar;
//!
//! impl ScanEngine for OneChar {
//!     type Kind = Kind;
//!     type Mode = ();
//!
//!     fn scan(&mut self, window: &str, _: ()) -> Result<Scanned<Kind, ()>, EngineError> {
//!         Ok(match window.chars().next() {
//!             Some(c) => Scanned::token(Kind::Char, c.len_utf8()),
//!             None => Scanned::End,
//!         })
//!     }
//! }
//!
//! let mut lexer = ScanSession::new(OneChar);
//! lexer.restart("ab");
//! assert_eq!(lexer.next_token().text, "a");
//! assert_eq!(lexer.next_token().text, "b");
//! assert!(lexer.next_token().is_eof());
//! ```

mod config;
mod engine;
mod error;
mod lexer;
mod session;

pub use config::{LexerConfig, UnmatchedPolicy};
pub use engine::{ScanEngine, Scanned, Transition};
pub use error::EngineError;
pub use lexer::Lexer;
pub use session::{ScanSession, SessionState};
