//! Lexer adapter over a scanning engine.
//!
//! [`ScanSession`] owns everything a scanning engine would otherwise keep in
//! hidden global or library state: the installed text, the location
//! bookmark, a stack of nested buffer contexts and a stack of lexical modes.
//! [`Lexer::restart`] is the single transition back to the base context.

use strata_text::{TokenInfo, TokenKind};
use tracing::{debug, error, trace, warn};

use crate::config::{LexerConfig, UnmatchedPolicy};
use crate::engine::{ScanEngine, Scanned, Transition};
use crate::error::EngineError;
use crate::lexer::Lexer;

/// Nesting state of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Only the base buffer and the initial mode are active.
    Base,
    /// Combined depth of nested buffers and pushed modes.
    Nested(usize),
}

/// A nested window `[start, end)` over the installed text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct BufferContext {
    start: usize,
    end: usize,
}

impl BufferContext {
    fn base(len: usize) -> Self {
        Self { start: 0, end: len }
    }
}

/// Drives a [`ScanEngine`] through the [`Lexer`] protocol.
///
/// Construction is two-phase: build the engine, hand it to
/// [`ScanSession::new`], then install input with [`Lexer::restart`].
pub struct ScanSession<'src, E: ScanEngine> {
    engine: E,
    config: LexerConfig,
    text: &'src str,
    /// Never empty; index 0 is the base buffer.
    buffers: Vec<BufferContext>,
    /// Never empty; index 0 is the initial mode.
    modes: Vec<E::Mode>,
    /// Location bookmark: the next lexeme starts at `last_token.right()`.
    last_token: TokenInfo<'src, E::Kind>,
}

impl<'src, E: ScanEngine> ScanSession<'src, E> {
    pub fn new(engine: E) -> Self {
        Self::with_config(engine, LexerConfig::default())
    }

    pub fn with_config(engine: E, config: LexerConfig) -> Self {
        Self {
            engine,
            config,
            text: "",
            buffers: vec![BufferContext::base(0)],
            modes: vec![E::Mode::default()],
            last_token: TokenInfo::empty_at(E::Kind::EOF, "", 0),
        }
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }

    pub fn config(&self) -> &LexerConfig {
        &self.config
    }

    /// The installed input.
    pub fn text(&self) -> &'src str {
        self.text
    }

    /// Byte offset where the next lexeme starts.
    pub fn position(&self) -> usize {
        self.last_token.right()
    }

    /// Number of buffers nested above the base buffer.
    pub fn buffer_depth(&self) -> usize {
        self.buffers.len().saturating_sub(1)
    }

    /// Number of modes pushed above the initial mode.
    pub fn mode_depth(&self) -> usize {
        self.modes.len().saturating_sub(1)
    }

    pub fn state(&self) -> SessionState {
        match self.buffer_depth() + self.mode_depth() {
            0 => SessionState::Base,
            depth => SessionState::Nested(depth),
        }
    }

    pub fn current_mode(&self) -> E::Mode {
        self.modes.last().copied().unwrap_or_default()
    }

    fn current_buffer(&self) -> BufferContext {
        self.buffers
            .last()
            .copied()
            .unwrap_or(BufferContext::base(self.text.len()))
    }

    /// Restricts scanning to the next `len` bytes until they are consumed.
    pub fn push_buffer(&mut self, len: usize) {
        let start = self.position();
        let limit = self.current_buffer().end;
        let mut end = start.saturating_add(len).min(limit);
        while !self.text.is_char_boundary(end) {
            end += 1;
        }
        trace!(start, end, depth = self.buffers.len(), "push buffer");
        self.buffers.push(BufferContext { start, end });
    }

    pub fn push_mode(&mut self, mode: E::Mode) {
        trace!(?mode, depth = self.modes.len(), "push mode");
        self.modes.push(mode);
    }

    /// Pops the current mode. The initial mode is never popped.
    pub fn pop_mode(&mut self) -> Option<E::Mode> {
        if self.modes.len() <= 1 {
            warn!(offset = self.position(), "mode stack underflow ignored");
            return None;
        }
        let mode = self.modes.pop();
        trace!(?mode, depth = self.modes.len(), "pop mode");
        mode
    }

    fn switch_mode(&mut self, mode: E::Mode) {
        trace!(?mode, "switch mode");
        if let Some(top) = self.modes.last_mut() {
            *top = mode;
        }
    }

    fn apply(&mut self, transition: Transition<E::Mode>) {
        match transition {
            Transition::Stay => {}
            Transition::Push(mode) => self.push_mode(mode),
            Transition::Switch(mode) => self.switch_mode(mode),
            Transition::Pop => {
                self.pop_mode();
            }
            Transition::EnterBuffer(len) => self.push_buffer(len),
        }
    }

    /// Pops nested buffers whose window has been fully consumed.
    fn unwind_exhausted_buffers(&mut self) {
        while self.buffers.len() > 1 && self.position() >= self.current_buffer().end {
            let buffer = self.buffers.pop();
            trace!(?buffer, "buffer exhausted");
        }
    }

    /// Handles the end of the current window. Returns the EOF token once the
    /// base buffer is exhausted, `None` when a nested buffer was popped.
    fn end_of_window(&mut self, position: usize) -> Option<TokenInfo<'src, E::Kind>> {
        if self.buffers.len() > 1 {
            let buffer = self.buffers.pop();
            trace!(?buffer, "buffer ended by engine");
            return None;
        }
        self.last_token = TokenInfo::empty_at(E::Kind::EOF, self.text, position);
        Some(self.last_token)
    }
}

impl<'src, E: ScanEngine> Lexer<'src> for ScanSession<'src, E> {
    type Kind = E::Kind;

    fn restart(&mut self, text: &'src str) {
        trace!(
            buffers = self.buffer_depth(),
            modes = self.mode_depth(),
            len = text.len(),
            "restart"
        );
        // Keep only the base buffer, rebound to the new text.
        self.buffers.clear();
        self.buffers.push(BufferContext::base(text.len()));
        // Keep only the initial mode.
        self.modes.clear();
        self.modes.push(E::Mode::default());

        self.engine.reset();
        self.text = text;
        self.last_token = TokenInfo::empty_at(E::Kind::EOF, text, 0);
    }

    fn next_token(&mut self) -> TokenInfo<'src, E::Kind> {
        loop {
            self.unwind_exhausted_buffers();
            let position = self.position();
            let end = self.current_buffer().end.max(position);
            let text = self.text;
            let window = &text[position..end];
            let mode = self.current_mode();

            let scanned = match self.engine.scan(window, mode) {
                Ok(scanned) => scanned,
                Err(err) => abort_on_engine_error(&err),
            };

            match scanned {
                Scanned::End => {
                    if let Some(eof) = self.end_of_window(position) {
                        return eof;
                    }
                }
                Scanned::Token { kind, .. } if kind == E::Kind::EOF => {
                    self.buffers.truncate(1);
                    if let Some(eof) = self.end_of_window(position) {
                        return eof;
                    }
                }
                Scanned::Token {
                    kind,
                    len,
                    transition,
                } => {
                    let len = len.min(window.len());
                    if len == 0 {
                        abort_on_engine_error(&EngineError::EmptyLexeme {
                            kind: format!("{kind:?}"),
                            offset: position,
                        });
                    }
                    self.last_token.kind = kind;
                    self.last_token.advance_text(self.text, len);
                    self.apply(transition);
                    return self.last_token;
                }
                Scanned::Unmatched { .. } if window.is_empty() => {
                    if let Some(eof) = self.end_of_window(position) {
                        return eof;
                    }
                }
                Scanned::Unmatched { len } => {
                    // Always make progress, whatever length the engine reported.
                    let len = len.clamp(1, window.len());
                    self.last_token.kind = E::Kind::ERROR;
                    self.last_token.advance_text(self.text, len);
                    debug!(
                        offset = position,
                        text = %self.last_token.text.escape_debug(),
                        "rejected unmatched text"
                    );
                    match self.config.unmatched {
                        UnmatchedPolicy::Reject => return self.last_token,
                        UnmatchedPolicy::Skip => continue,
                    }
                }
            }
        }
    }

    fn last_token(&self) -> TokenInfo<'src, E::Kind> {
        self.last_token
    }

    fn is_error_token(&self, token: &TokenInfo<'src, E::Kind>) -> bool {
        token.kind == E::Kind::ERROR || self.engine.is_error(token.kind)
    }
}

/// Scanner state is undefined after an engine failure; continuing would
/// produce garbage, so the process stops here.
fn abort_on_engine_error(err: &EngineError) -> ! {
    error!(%err, "fatal scanning engine error");
    eprintln!("Fatal LexerError: {err}");
    std::process::abort()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Kind {
        Eof,
        Error,
        Word,
        Space,
        Open,
        Close,
        Digits,
        Bang,
    }

    impl TokenKind for Kind {
        const EOF: Self = Kind::Eof;
        const ERROR: Self = Kind::Error;

        fn is_syntactic(self) -> bool {
            self != Kind::Space
        }
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    enum Mode {
        #[default]
        Outer,
        Bracket,
    }

    /// Hand-written engine: words and spaces outside brackets, digits inside.
    #[derive(Default)]
    struct BracketEngine {
        resets: usize,
    }

    fn run_len(window: &str, pred: impl Fn(char) -> bool) -> usize {
        window
            .char_indices()
            .find(|&(_, c)| !pred(c))
            .map_or(window.len(), |(i, _)| i)
    }

    impl ScanEngine for BracketEngine {
        type Kind = Kind;
        type Mode = Mode;

        fn scan(
            &mut self,
            window: &str,
            mode: Mode,
        ) -> Result<Scanned<Kind, Mode>, EngineError> {
            let Some(c) = window.chars().next() else {
                return Ok(Scanned::End);
            };
            let scanned = match (mode, c) {
                (Mode::Outer, c) if c.is_ascii_lowercase() => {
                    Scanned::token(Kind::Word, run_len(window, |c| c.is_ascii_lowercase()))
                }
                (Mode::Outer, ' ') => Scanned::token(Kind::Space, run_len(window, |c| c == ' ')),
                (Mode::Outer, '[') => {
                    Scanned::token_then(Kind::Open, 1, Transition::Push(Mode::Bracket))
                }
                (Mode::Outer, '!') => {
                    Scanned::token_then(Kind::Bang, 1, Transition::EnterBuffer(2))
                }
                // End-of-input marker reported by the engine itself.
                (_, '$') => Scanned::token(Kind::Eof, 1),
                (Mode::Bracket, c) if c.is_ascii_digit() => {
                    Scanned::token(Kind::Digits, run_len(window, |c| c.is_ascii_digit()))
                }
                (Mode::Bracket, ']') => Scanned::token_then(Kind::Close, 1, Transition::Pop),
                (_, c) => Scanned::Unmatched { len: c.len_utf8() },
            };
            Ok(scanned)
        }

        fn reset(&mut self) {
            self.resets += 1;
        }
    }

    fn lex_all<'src>(
        session: &mut ScanSession<'src, BracketEngine>,
        text: &'src str,
    ) -> Vec<(Kind, usize, &'src str)> {
        session.restart(text);
        let mut tokens = Vec::new();
        for _ in 0..100 {
            let token = session.next_token();
            tokens.push((token.kind, token.offset, token.text));
            if token.is_eof() {
                break;
            }
        }
        tokens
    }

    #[test]
    fn test_bookmark_tracks_offsets() {
        let mut session = ScanSession::new(BracketEngine::default());
        let tokens = lex_all(&mut session, "ab cd");
        assert_eq!(
            tokens,
            vec![
                (Kind::Word, 0, "ab"),
                (Kind::Space, 2, " "),
                (Kind::Word, 3, "cd"),
                (Kind::Eof, 5, ""),
            ]
        );
        assert_eq!(session.last_token().kind, Kind::Eof);
    }

    #[test]
    fn test_mode_push_and_pop() {
        let mut session = ScanSession::new(BracketEngine::default());
        session.restart("a[12]b");
        assert_eq!(session.next_token().text, "a");
        assert_eq!(session.next_token().kind, Kind::Open);
        assert_eq!(session.current_mode(), Mode::Bracket);
        assert_eq!(session.state(), SessionState::Nested(1));
        assert_eq!(session.next_token().text, "12");
        assert_eq!(session.next_token().kind, Kind::Close);
        assert_eq!(session.state(), SessionState::Base);
        assert_eq!(session.next_token().text, "b");
        assert!(session.next_token().is_eof());
    }

    #[test]
    fn test_unmatched_rejected_as_error_token() {
        let mut session = ScanSession::new(BracketEngine::default());
        session.restart("a?b");
        session.next_token();
        let error = session.next_token();
        assert_eq!(error.kind, Kind::Error);
        assert_eq!(error.text, "?");
        assert_eq!(error.offset, 1);
        assert!(session.is_error_token(&error));
        assert_eq!(session.next_token().text, "b");
    }

    #[test]
    fn test_unmatched_skipped_when_configured() {
        let config = LexerConfig::default().with_unmatched(UnmatchedPolicy::Skip);
        let mut session = ScanSession::with_config(BracketEngine::default(), config);
        let tokens = lex_all(&mut session, "a?éb");
        assert_eq!(
            tokens,
            vec![(Kind::Word, 0, "a"), (Kind::Word, 4, "b"), (Kind::Eof, 5, "")]
        );
    }

    #[test]
    fn test_restart_unwinds_nested_state() {
        let mut session = ScanSession::new(BracketEngine::default());
        session.restart("x[[1");
        session.next_token();
        session.next_token();
        session.push_mode(Mode::Bracket);
        session.push_buffer(1);
        assert_eq!(session.mode_depth(), 2);
        assert_eq!(session.buffer_depth(), 1);

        session.restart("zz");
        assert_eq!(session.state(), SessionState::Base);
        assert_eq!(session.current_mode(), Mode::Outer);
        assert_eq!(session.position(), 0);
        assert_eq!(session.next_token().text, "zz");
    }

    #[test]
    fn test_restart_is_idempotent() {
        let mut session = ScanSession::new(BracketEngine::default());
        let text = "ab [1 2] c";
        let once = lex_all(&mut session, text);

        session.restart(text);
        let twice = lex_all(&mut session, text);
        assert_eq!(once, twice);
        assert_eq!(session.engine().resets, 3);
    }

    #[test]
    fn test_nested_buffer_limits_window() {
        let mut session = ScanSession::new(BracketEngine::default());
        let tokens = lex_all(&mut session, "!abcd");
        assert_eq!(
            tokens,
            vec![
                (Kind::Bang, 0, "!"),
                (Kind::Word, 1, "ab"),
                (Kind::Word, 3, "cd"),
                (Kind::Eof, 5, ""),
            ]
        );
        assert_eq!(session.buffer_depth(), 0);
    }

    #[test]
    fn test_engine_eof_ends_nested_buffers() {
        let mut session = ScanSession::new(BracketEngine::default());
        session.restart("!a$cd");
        assert_eq!(session.next_token().kind, Kind::Bang);
        assert_eq!(session.next_token().text, "a");
        assert_eq!(session.buffer_depth(), 1);

        let eof = session.next_token();
        assert!(eof.is_eof());
        assert_eq!(eof.offset, 2);
        assert!(eof.text.is_empty());
        assert_eq!(session.buffer_depth(), 0);
        assert_eq!(session.last_token(), eof);
    }

    /// Engine that loses track of its input on the first lexeme.
    struct BrokenEngine;

    impl ScanEngine for BrokenEngine {
        type Kind = Kind;
        type Mode = Mode;

        fn scan(&mut self, _: &str, _: Mode) -> Result<Scanned<Kind, Mode>, EngineError> {
            Err(EngineError::CorruptState("lost input".to_string()))
        }
    }

    #[test]
    fn test_engine_error_aborts_process() {
        const CHILD: &str = "STRATA_LEXER_ABORT_CHILD";
        if std::env::var_os(CHILD).is_some() {
            let mut session = ScanSession::new(BrokenEngine);
            session.restart("x");
            session.next_token();
            return;
        }

        // Re-run only this test in a child process, which must abort.
        let exe = std::env::current_exe().expect("test binary");
        let output = std::process::Command::new(exe)
            .args([
                "session::tests::test_engine_error_aborts_process",
                "--exact",
                "--nocapture",
            ])
            .env(CHILD, "1")
            .output()
            .expect("run test binary");
        assert!(!output.status.success());
        let stderr = String::from_utf8_lossy(&output.stderr);
        assert!(
            stderr.contains("Fatal LexerError: corrupted scanner state: lost input"),
            "stderr: {stderr}"
        );
    }

    #[test]
    fn test_pop_mode_never_drops_initial_mode() {
        let mut session = ScanSession::new(BracketEngine::default());
        session.restart("]");
        assert_eq!(session.pop_mode(), None);
        assert_eq!(session.mode_depth(), 0);
    }
}
