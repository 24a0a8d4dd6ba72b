//! Filtered views over a token sequence.

use crate::token::{TokenInfo, TokenKind};

/// An ordered selection of indices into a [`TokenSequence`](crate::TokenSequence).
///
/// The parser only ever sees the tokens selected here; the full sequence is
/// kept alongside for exact reconstruction and diagnostics.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenStreamView {
    indices: Vec<usize>,
}

impl TokenStreamView {
    /// Selects every token for which `keep` returns `true`.
    pub fn filtered<'src, K, F>(tokens: &[TokenInfo<'src, K>], mut keep: F) -> Self
    where
        K: TokenKind,
        F: FnMut(&TokenInfo<'src, K>) -> bool,
    {
        let indices = tokens
            .iter()
            .enumerate()
            .filter(|(_, token)| keep(token))
            .map(|(index, _)| index)
            .collect();
        Self { indices }
    }

    /// Selects syntactically significant tokens. EOF is always kept.
    pub fn syntactic<K: TokenKind>(tokens: &[TokenInfo<'_, K>]) -> Self {
        Self::filtered(tokens, |token| token.is_eof() || token.kind.is_syntactic())
    }

    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn clear(&mut self) {
        self.indices.clear();
    }

    /// The `position`-th selected token.
    pub fn get<'a, 'src, K>(
        &self,
        tokens: &'a [TokenInfo<'src, K>],
        position: usize,
    ) -> Option<&'a TokenInfo<'src, K>> {
        self.indices.get(position).and_then(|&index| tokens.get(index))
    }

    /// Iterates the selected tokens in order.
    pub fn iter<'a, 'src, K>(
        &'a self,
        tokens: &'a [TokenInfo<'src, K>],
    ) -> impl Iterator<Item = &'a TokenInfo<'src, K>> + 'a {
        self.indices.iter().filter_map(move |&index| tokens.get(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::tests::Tk;

    fn sample(buffer: &str) -> Vec<TokenInfo<'_, Tk>> {
        vec![
            TokenInfo::new(Tk::Word, 0, &buffer[0..2]),
            TokenInfo::new(Tk::Space, 2, &buffer[2..3]),
            TokenInfo::new(Tk::Word, 3, &buffer[3..5]),
            TokenInfo::eof(buffer),
        ]
    }

    #[test]
    fn test_syntactic_view_skips_trivia() {
        let buffer = "ab cd";
        let tokens = sample(buffer);
        let view = TokenStreamView::syntactic(&tokens);
        assert_eq!(view.indices(), &[0, 2, 3]);

        let texts: Vec<_> = view.iter(&tokens).map(|t| t.text).collect();
        assert_eq!(texts, vec!["ab", "cd", ""]);
    }

    #[test]
    fn test_get_maps_through_indices() {
        let buffer = "ab cd";
        let tokens = sample(buffer);
        let view = TokenStreamView::syntactic(&tokens);
        assert_eq!(view.get(&tokens, 1).map(|t| t.text), Some("cd"));
        assert!(view.get(&tokens, 1).is_some_and(|t| t.offset == 3));
        assert!(view.get(&tokens, 3).is_none());
    }

    #[test]
    fn test_custom_filter() {
        let buffer = "ab cd";
        let tokens = sample(buffer);
        let view = TokenStreamView::filtered(&tokens, |t| t.kind == Tk::Space);
        assert_eq!(view.len(), 1);
        assert!(!view.is_empty());
    }
}
