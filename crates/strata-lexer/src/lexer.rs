//! The lexer contract driven by the analysis pipeline.

use strata_text::{TokenInfo, TokenKind};

/// A restartable lexing session producing one token per call.
///
/// Implementations track the current location themselves: each call to
/// [`Lexer::next_token`] moves the bookmark past the consumed bytes, so every
/// returned token is a slice of the buffer installed by [`Lexer::restart`].
pub trait Lexer<'src> {
    type Kind: TokenKind;

    /// Installs `text` as the input and resets all scanning state.
    ///
    /// Every nested buffer and lexical-mode context is unwound to the base
    /// context first; nothing from a previous run may survive.
    fn restart(&mut self, text: &'src str);

    /// Scans and returns the next token. Returns EOF once input is exhausted.
    fn next_token(&mut self) -> TokenInfo<'src, Self::Kind>;

    /// The most recently produced token.
    fn last_token(&self) -> TokenInfo<'src, Self::Kind>;

    /// Whether `token` marks a lexical error.
    fn is_error_token(&self, token: &TokenInfo<'src, Self::Kind>) -> bool;
}
