//! Mode-aware scanning engine backed by `logos`.
//!
//! Each lexical mode has its own generated automaton. The engine runs the
//! automaton of the current mode over the unscanned window and reports one
//! lexeme; the [`ScanSession`] keeps position and the mode stack.

use logos::Logos;
use strata_lexer::{EngineError, ScanEngine, ScanSession, Scanned, Transition};

use crate::token::VlogToken;

/// Lexical modes of the front end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum VlogMode {
    /// Ordinary source text.
    #[default]
    Code,
    /// After `` `define ``, before the macro name.
    DefineName,
    /// After the macro name, up to the end of the definition.
    DefineBody,
}

/// Tokens recognized between `` `define `` and the macro name.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
enum DefineNameToken {
    #[regex(r"[ \t\r]+")]
    Space,
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_$]*")]
    Name,
    #[token("\n")]
    Newline,
}

/// Tokens recognized in a macro definition body.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
enum DefineBodyToken {
    /// Backslash-newline continues the body onto the next line.
    #[regex(r"([^\\\n]|\\[^\n]|\\\n)+")]
    Body,
    #[token("\n")]
    Newline,
}

/// Scanning engine for [`VlogToken`]s.
#[derive(Debug, Default)]
pub struct VlogEngine {
    lexemes: usize,
}

/// The lexer the analysis pipeline drives.
pub type VlogLexer<'src> = ScanSession<'src, VlogEngine>;

impl VlogEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lexemes scanned since the last reset.
    pub fn lexemes(&self) -> usize {
        self.lexemes
    }
}

/// Builds a [`VlogLexer`] with default settings.
pub fn vlog_lexer<'src>() -> VlogLexer<'src> {
    ScanSession::new(VlogEngine::new())
}

/// Runs `X`'s automaton once at the start of `window`.
///
/// None of the automata skip input, so a lexeme must begin at offset 0.
fn first_lexeme<'w, X>(window: &'w str) -> Result<Option<(Result<X, ()>, usize)>, EngineError>
where
    X: Logos<'w, Source = str, Error = ()>,
    X::Extras: Default,
{
    let mut lexer = X::lexer(window);
    let Some(lexeme) = lexer.next() else {
        return Ok(None);
    };
    let span = lexer.span();
    if span.start != 0 {
        return Err(EngineError::CorruptState(format!(
            "lexeme began at window offset {}",
            span.start
        )));
    }
    Ok(Some((lexeme, span.end)))
}

fn scan_code(window: &str) -> Result<Scanned<VlogToken, VlogMode>, EngineError> {
    let scanned = match first_lexeme::<VlogToken>(window)? {
        None => Scanned::End,
        Some((Ok(VlogToken::DefineDirective), len)) => Scanned::token_then(
            VlogToken::DefineDirective,
            len,
            Transition::Push(VlogMode::DefineName),
        ),
        Some((Ok(token), len)) => Scanned::token(token, len),
        Some((Err(()), len)) => Scanned::Unmatched { len },
    };
    Ok(scanned)
}

fn scan_define_name(window: &str) -> Result<Scanned<VlogToken, VlogMode>, EngineError> {
    let scanned = match first_lexeme::<DefineNameToken>(window)? {
        None => Scanned::End,
        Some((Ok(DefineNameToken::Space), len)) => Scanned::token(VlogToken::Whitespace, len),
        Some((Ok(DefineNameToken::Name), len)) => Scanned::token_then(
            VlogToken::MacroName,
            len,
            Transition::Switch(VlogMode::DefineBody),
        ),
        // A definition without a name ends at the line break.
        Some((Ok(DefineNameToken::Newline), len)) => {
            Scanned::token_then(VlogToken::Newline, len, Transition::Pop)
        }
        Some((Err(()), len)) => Scanned::Unmatched { len },
    };
    Ok(scanned)
}

fn scan_define_body(window: &str) -> Result<Scanned<VlogToken, VlogMode>, EngineError> {
    let scanned = match first_lexeme::<DefineBodyToken>(window)? {
        None => Scanned::End,
        Some((Ok(DefineBodyToken::Body), len)) => Scanned::token(VlogToken::MacroDefBody, len),
        Some((Ok(DefineBodyToken::Newline), len)) => {
            Scanned::token_then(VlogToken::Newline, len, Transition::Pop)
        }
        Some((Err(()), len)) => Scanned::Unmatched { len },
    };
    Ok(scanned)
}

impl ScanEngine for VlogEngine {
    type Kind = VlogToken;
    type Mode = VlogMode;

    fn scan(
        &mut self,
        window: &str,
        mode: VlogMode,
    ) -> Result<Scanned<VlogToken, VlogMode>, EngineError> {
        let scanned = match mode {
            VlogMode::Code => scan_code(window)?,
            VlogMode::DefineName => scan_define_name(window)?,
            VlogMode::DefineBody => scan_define_body(window)?,
        };
        if let Scanned::Token { .. } = scanned {
            self.lexemes += 1;
        }
        Ok(scanned)
    }

    fn reset(&mut self) {
        self.lexemes = 0;
    }
}
