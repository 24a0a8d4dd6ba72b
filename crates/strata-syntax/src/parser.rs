//! Parser collaborator interface.

use strata_text::{TokenInfo, TokenKind, TokenStreamView};
use thiserror::Error;

/// Parser input: the full token sequence plus the view the parser reads.
///
/// Positions passed to [`TokenStream::get`] index the view, not the
/// sequence; [`TokenStream::tokens`] still exposes every token.
#[derive(Debug, Clone, Copy)]
pub struct TokenStream<'a, 'src, K> {
    tokens: &'a [TokenInfo<'src, K>],
    view: &'a TokenStreamView,
}

impl<'a, 'src, K: TokenKind> TokenStream<'a, 'src, K> {
    pub fn new(tokens: &'a [TokenInfo<'src, K>], view: &'a TokenStreamView) -> Self {
        Self { tokens, view }
    }

    /// Number of tokens visible to the parser.
    pub fn len(&self) -> usize {
        self.view.len()
    }

    pub fn is_empty(&self) -> bool {
        self.view.is_empty()
    }

    /// The `position`-th visible token.
    pub fn get(&self, position: usize) -> Option<&'a TokenInfo<'src, K>> {
        self.view.get(self.tokens, position)
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a TokenInfo<'src, K>> + 'a {
        self.view.iter(self.tokens)
    }

    /// The unfiltered token sequence.
    pub fn tokens(&self) -> &'a [TokenInfo<'src, K>] {
        self.tokens
    }

    pub fn view(&self) -> &'a TokenStreamView {
        self.view
    }
}

/// A token the parser could not accept, with an optional reason.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rejection<'src, K> {
    pub token: TokenInfo<'src, K>,
    pub explanation: Option<String>,
}

impl<'src, K> Rejection<'src, K> {
    pub fn new(token: TokenInfo<'src, K>, explanation: Option<String>) -> Self {
        Self { token, explanation }
    }
}

/// Terminal status of a failed parse. Details are in
/// [`Parser::rejected_tokens`].
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("syntax error: {rejected} token(s) rejected")]
pub struct ParseFailure {
    pub rejected: usize,
}

/// An error-tolerant parser over a filtered token stream.
///
/// After [`Parser::parse`] returns, whatever tree was built is available
/// exactly once through [`Parser::take_root`], whether or not parsing
/// succeeded.
pub trait Parser<'src> {
    type Kind: TokenKind;
    type Tree;

    fn parse(&mut self, stream: TokenStream<'_, 'src, Self::Kind>) -> Result<(), ParseFailure>;

    /// Relinquishes the tree from the last parse. Later calls return `None`.
    fn take_root(&mut self) -> Option<Self::Tree>;

    /// Tokens rejected by the last parse, in source order.
    fn rejected_tokens(&self) -> &[Rejection<'src, Self::Kind>];
}
