//! Token span model.

use std::fmt;
use std::ops::Range;

/// Tag type identifying the lexical category of a token.
///
/// Each language supplies its own enumeration. Two kinds are distinguished:
/// [`TokenKind::EOF`] terminates every successful tokenization, and
/// [`TokenKind::ERROR`] marks text the scanner could not classify.
pub trait TokenKind: Copy + Eq + fmt::Debug {
    /// End of input.
    const EOF: Self;

    /// Lexical error marker.
    const ERROR: Self;

    /// Whether tokens of this kind are visible to the parser.
    ///
    /// Whitespace and comment kinds return `false`.
    fn is_syntactic(self) -> bool;
}

/// A token: its kind and the exact slice of the source buffer it covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenInfo<'src, K> {
    pub kind: K,
    /// Byte offset of `text` within the analysed buffer.
    pub offset: usize,
    pub text: &'src str,
}

/// Ordered tokens of one buffer, in source order.
pub type TokenSequence<'src, K> = Vec<TokenInfo<'src, K>>;

impl<'src, K: TokenKind> TokenInfo<'src, K> {
    pub fn new(kind: K, offset: usize, text: &'src str) -> Self {
        Self { kind, offset, text }
    }

    /// Zero-length token of `kind` anchored at `offset` of `buffer`.
    pub fn empty_at(kind: K, buffer: &'src str, offset: usize) -> Self {
        let offset = offset.min(buffer.len());
        Self::new(kind, offset, &buffer[offset..offset])
    }

    /// The canonical end-of-file token: empty, one past the last byte.
    pub fn eof(buffer: &'src str) -> Self {
        Self::empty_at(K::EOF, buffer, buffer.len())
    }

    pub fn is_eof(&self) -> bool {
        self.kind == K::EOF
    }

    /// Left byte boundary (inclusive).
    pub fn left(&self) -> usize {
        self.offset
    }

    /// Right byte boundary (exclusive).
    pub fn right(&self) -> usize {
        self.offset + self.text.len()
    }

    pub fn range(&self) -> Range<usize> {
        self.left()..self.right()
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Moves the span to the `len` bytes that immediately follow it.
    ///
    /// The new span is clamped to the buffer and widened to the next
    /// character boundary, so it always slices valid UTF-8.
    pub fn advance_text(&mut self, buffer: &'src str, len: usize) {
        let start = self.right().min(buffer.len());
        let mut end = start.saturating_add(len).min(buffer.len());
        while !buffer.is_char_boundary(end) {
            end += 1;
        }
        self.offset = start;
        self.text = &buffer[start..end];
    }
}

impl<K: TokenKind> fmt::Display for TokenInfo<'_, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "(#{:?} @{}-{}: \"{}\")",
            self.kind,
            self.left(),
            self.right(),
            self.text.escape_debug()
        )
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub(crate) enum Tk {
        Eof,
        Error,
        Word,
        Space,
    }

    impl TokenKind for Tk {
        const EOF: Self = Tk::Eof;
        const ERROR: Self = Tk::Error;

        fn is_syntactic(self) -> bool {
            !matches!(self, Tk::Space)
        }
    }

    #[test]
    fn test_eof_is_empty_at_buffer_end() {
        let buffer = "abc\n";
        let eof = TokenInfo::<Tk>::eof(buffer);
        assert!(eof.is_eof());
        assert!(eof.is_empty());
        assert_eq!(eof.left(), buffer.len());
        assert_eq!(eof.right(), buffer.len());
    }

    #[test]
    fn test_advance_text_follows_previous_span() {
        let buffer = "foo bar";
        let mut token = TokenInfo::empty_at(Tk::Word, buffer, 0);
        token.advance_text(buffer, 3);
        assert_eq!(token.text, "foo");
        token.advance_text(buffer, 1);
        assert_eq!(token.text, " ");
        assert_eq!(token.range(), 3..4);
        token.advance_text(buffer, 100);
        assert_eq!(token.text, "bar");
        assert_eq!(token.right(), buffer.len());
    }

    #[test]
    fn test_advance_text_respects_char_boundaries() {
        let buffer = "é!";
        let mut token = TokenInfo::empty_at(Tk::Error, buffer, 0);
        token.advance_text(buffer, 1);
        assert_eq!(token.text, "é");
        assert_eq!(token.len(), 2);
    }

    #[test]
    fn test_text_is_slice_of_buffer() {
        let buffer = String::from("hello world");
        let mut token = TokenInfo::empty_at(Tk::Word, &buffer, 6);
        token.advance_text(&buffer, 5);
        assert_eq!(token.text.as_ptr(), buffer[6..].as_ptr());
    }

    #[test]
    fn test_display() {
        let token = TokenInfo::new(Tk::Word, 2, "a\"b");
        assert_eq!(token.to_string(), r#"(#Word @2-5: "a\"b")"#);
    }
}
